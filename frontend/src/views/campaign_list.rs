use crate::{
    campaigns::{
        api::CampaignApi,
        confirm::Confirm,
        state::{Epoch, LoadState, Ticket, ViewCell},
        types::{Campaign, CampaignId},
    },
    error::{ApiError, ViewError},
};

use super::DeleteOutcome;

pub const LOAD_FAILED: &str = "Failed to fetch campaigns. Please try again later.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this campaign?";
pub const DELETE_FAILED: &str = "Failed to delete campaign. Please try again later.";
pub const EMPTY_MESSAGE: &str =
    "No campaigns found. Click \"Create New Campaign\" to get started.";

/// State of the campaign overview page.
#[derive(Debug, Clone, Default)]
pub struct CampaignListView {
    state: LoadState<Vec<Campaign>>,
    notice: Option<&'static str>,
    epoch: Epoch,
}

impl CampaignListView {
    pub fn state(&self) -> &LoadState<Vec<Campaign>> {
        &self.state
    }

    /// Inline message left by a failed delete.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn is_empty(&self) -> bool {
        self.state.ready().is_some_and(Vec::is_empty)
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.notice = None;
        self.epoch.advance()
    }

    /// Apply a fetch result; returns `false` when the ticket was superseded.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Campaign>, ApiError>) -> bool {
        if !self.epoch.is_current(ticket) {
            log::debug!("discarding stale campaign list response");
            return false;
        }
        self.state = match result {
            Ok(campaigns) => LoadState::Ready(campaigns),
            Err(err) => LoadState::Error(ViewError::from_load(&err, LOAD_FAILED)),
        };
        true
    }

    /// Forget any in-flight load, e.g. when the page unmounts.
    pub fn detach(&mut self) {
        self.epoch.advance();
    }

    /// Drop a deleted campaign from the local collection by id.
    pub fn remove(&mut self, id: CampaignId) {
        if let Some(campaigns) = self.state.ready_mut() {
            campaigns.retain(|campaign| campaign.id != id);
        }
        self.notice = None;
    }

    pub fn delete_failed(&mut self) {
        self.notice = Some(DELETE_FAILED);
    }
}

pub async fn load<A, C>(api: &A, cell: &C)
where
    A: CampaignApi,
    C: ViewCell<CampaignListView>,
{
    let Some(ticket) = cell.apply(CampaignListView::begin_load) else {
        return;
    };

    let result = api.list_campaigns().await;
    if let Err(err) = &result {
        log::error!("error fetching campaigns: {err}");
    }
    cell.apply(|view| view.finish_load(ticket, result));
}

pub async fn delete<A, C, K>(api: &A, cell: &C, confirm: &K, id: CampaignId) -> DeleteOutcome
where
    A: CampaignApi,
    C: ViewCell<CampaignListView>,
    K: Confirm,
{
    if !confirm.confirm(DELETE_PROMPT) {
        return DeleteOutcome::Cancelled;
    }

    match api.delete_campaign(id).await {
        Ok(()) => {
            log::info!("deleted campaign {id}");
            cell.apply(|view| view.remove(id));
            DeleteOutcome::Deleted
        }
        Err(err) => {
            log::error!("error deleting campaign {id}: {err}");
            cell.apply(CampaignListView::delete_failed);
            DeleteOutcome::Failed
        }
    }
}
