use crate::{
    campaigns::{
        api::CampaignApi,
        confirm::Confirm,
        state::{Epoch, LoadState, Ticket, ViewCell},
        types::{Campaign, CampaignId},
    },
    error::{ApiError, ViewError},
    routes::AppRoute,
};

use super::{DeleteOutcome, campaign_list};

pub const LOAD_FAILED: &str = "Failed to fetch campaign details. Please try again later.";
pub const NO_DESCRIPTION: &str = "No description provided";

/// State of the single-campaign page.
#[derive(Debug, Clone, Default)]
pub struct CampaignDetailView {
    state: LoadState<Campaign>,
    notice: Option<&'static str>,
    epoch: Epoch,
}

impl CampaignDetailView {
    pub fn state(&self) -> &LoadState<Campaign> {
        &self.state
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.notice = None;
        self.epoch.advance()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Campaign, ApiError>) -> bool {
        if !self.epoch.is_current(ticket) {
            log::debug!("discarding stale campaign detail response");
            return false;
        }
        self.state = match result {
            Ok(campaign) => LoadState::Ready(campaign),
            Err(err) => LoadState::Error(ViewError::from_load(&err, LOAD_FAILED)),
        };
        true
    }

    pub fn detach(&mut self) {
        self.epoch.advance();
    }

    pub fn delete_failed(&mut self) {
        self.notice = Some(campaign_list::DELETE_FAILED);
    }
}

pub async fn load<A, C>(api: &A, cell: &C, id: CampaignId)
where
    A: CampaignApi,
    C: ViewCell<CampaignDetailView>,
{
    let Some(ticket) = cell.apply(CampaignDetailView::begin_load) else {
        return;
    };

    let result = api.get_campaign(id).await;
    if let Err(err) = &result {
        log::error!("error fetching campaign {id}: {err}");
    }
    cell.apply(|view| view.finish_load(ticket, result));
}

/// Confirm, delete, and hand back the route to leave for on success.
pub async fn delete<A, C, K>(
    api: &A,
    cell: &C,
    confirm: &K,
    id: CampaignId,
) -> (DeleteOutcome, Option<AppRoute>)
where
    A: CampaignApi,
    C: ViewCell<CampaignDetailView>,
    K: Confirm,
{
    if !confirm.confirm(campaign_list::DELETE_PROMPT) {
        return (DeleteOutcome::Cancelled, None);
    }

    match api.delete_campaign(id).await {
        Ok(()) => {
            log::info!("deleted campaign {id}");
            (DeleteOutcome::Deleted, Some(AppRoute::CampaignList))
        }
        Err(err) => {
            log::error!("error deleting campaign {id}: {err}");
            cell.apply(CampaignDetailView::delete_failed);
            (DeleteOutcome::Failed, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;

    use super::*;
    use crate::campaigns::{
        format::CampaignDisplay,
        testkit::{FakeBackend, Operation, sample_campaign},
    };

    fn loaded(backend: &FakeBackend, id: i64) -> Rc<RefCell<CampaignDetailView>> {
        let cell = Rc::new(RefCell::new(CampaignDetailView::default()));
        block_on(load(backend, &cell, CampaignId(id)));
        cell
    }

    #[test]
    fn ready_view_renders_formatted_fields() {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(5, "Spring Sale"));
        let cell = loaded(&backend, 5);

        let view = cell.borrow();
        let display = CampaignDisplay::in_zone(view.state().ready().expect("ready"), &chrono::Utc);
        assert_eq!(display.name, "Spring Sale");
        assert_eq!(display.budget, "$1000.00");
        assert_eq!(display.status, "Active");
        assert_eq!(display.status_class, "status-active");
        assert_eq!(display.period, "3/1/2024 - 4/1/2024");
    }

    #[test]
    fn unknown_campaign_is_not_found() {
        let backend = FakeBackend::default();
        let cell = loaded(&backend, 404);
        assert_eq!(cell.borrow().state().error(), Some(&ViewError::NotFound));
    }

    #[test]
    fn successful_delete_navigates_to_list() {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(5, "Spring Sale"));
        let cell = loaded(&backend, 5);

        let (outcome, next) = block_on(delete(&backend, &cell, &|_: &str| true, CampaignId(5)));

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(next, Some(AppRoute::CampaignList));
        assert!(backend.campaigns().is_empty());
    }

    #[test]
    fn failed_delete_stays_with_notice() {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(5, "Spring Sale"));
        let cell = loaded(&backend, 5);
        backend.fail(Operation::DeleteCampaign, 503);

        let (outcome, next) = block_on(delete(&backend, &cell, &|_: &str| true, CampaignId(5)));

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(next, None);
        let view = cell.borrow();
        assert!(view.state().ready().is_some());
        assert_eq!(view.notice(), Some(campaign_list::DELETE_FAILED));
    }

    #[test]
    fn declined_delete_is_silent() {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(5, "Spring Sale"));
        let cell = loaded(&backend, 5);

        let (outcome, next) = block_on(delete(&backend, &cell, &|_: &str| false, CampaignId(5)));

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(next, None);
        assert_eq!(backend.count(Operation::DeleteCampaign), 0);
    }
}
