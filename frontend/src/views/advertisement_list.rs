use crate::{
    campaigns::{
        api::CampaignApi,
        confirm::Confirm,
        state::{Epoch, LoadState, Ticket, ViewCell},
        types::{Advertisement, AdvertisementId, Campaign, CampaignId},
    },
    error::{ApiError, ViewError},
};

use super::DeleteOutcome;

pub const LOAD_FAILED: &str = "Failed to fetch advertisements. Please try again later.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this advertisement?";
pub const DELETE_FAILED: &str = "Failed to delete advertisement. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No advertisements found for this campaign. Click \"Create New Advertisement\" to add one.";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150?text=Image+Not+Found";

/// Everything the page needs once both requests have resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignAdvertisements {
    pub campaign: Campaign,
    pub advertisements: Vec<Advertisement>,
}

/// State of the advertisements-of-a-campaign page.
#[derive(Debug, Clone, Default)]
pub struct AdvertisementListView {
    campaign_id: Option<CampaignId>,
    state: LoadState<CampaignAdvertisements>,
    notice: Option<&'static str>,
    epoch: Epoch,
}

impl AdvertisementListView {
    pub fn campaign_id(&self) -> Option<CampaignId> {
        self.campaign_id
    }

    pub fn state(&self) -> &LoadState<CampaignAdvertisements> {
        &self.state
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn is_empty(&self) -> bool {
        self.state
            .ready()
            .is_some_and(|data| data.advertisements.is_empty())
    }

    /// Start loading for `campaign_id`, superseding any load for a previous campaign.
    pub fn begin_load(&mut self, campaign_id: CampaignId) -> Ticket {
        self.campaign_id = Some(campaign_id);
        self.state = LoadState::Loading;
        self.notice = None;
        self.epoch.advance()
    }

    /// Both requests must succeed; a missing campaign is reported as not found.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        advertisements: Result<Vec<Advertisement>, ApiError>,
        campaign: Result<Campaign, ApiError>,
    ) -> bool {
        if !self.epoch.is_current(ticket) {
            log::debug!("discarding stale advertisement list response");
            return false;
        }
        self.state = match (campaign, advertisements) {
            (Ok(campaign), Ok(advertisements)) => LoadState::Ready(CampaignAdvertisements {
                campaign,
                advertisements,
            }),
            (Err(err), _) | (_, Err(err)) => {
                LoadState::Error(ViewError::from_load(&err, LOAD_FAILED))
            }
        };
        true
    }

    pub fn detach(&mut self) {
        self.epoch.advance();
    }

    pub fn remove(&mut self, id: AdvertisementId) {
        if let Some(data) = self.state.ready_mut() {
            data.advertisements.retain(|ad| ad.id != id);
        }
        self.notice = None;
    }

    pub fn delete_failed(&mut self) {
        self.notice = Some(DELETE_FAILED);
    }
}

/// Image to swap in after `current_src` failed to load; `None` once the placeholder itself is shown.
pub fn placeholder_for(current_src: &str) -> Option<&'static str> {
    (current_src != PLACEHOLDER_IMAGE).then_some(PLACEHOLDER_IMAGE)
}

/// Fetch the campaign's advertisements and the campaign itself concurrently.
pub async fn load<A, C>(api: &A, cell: &C, campaign_id: CampaignId)
where
    A: CampaignApi,
    C: ViewCell<AdvertisementListView>,
{
    let Some(ticket) = cell.apply(|view| view.begin_load(campaign_id)) else {
        return;
    };

    let (advertisements, campaign) = futures::join!(
        api.list_advertisements(campaign_id),
        api.get_campaign(campaign_id)
    );
    for err in [advertisements.as_ref().err(), campaign.as_ref().err()]
        .into_iter()
        .flatten()
    {
        log::error!("error fetching advertisements for campaign {campaign_id}: {err}");
    }
    cell.apply(|view| view.finish_load(ticket, advertisements, campaign));
}

pub async fn delete<A, C, K>(api: &A, cell: &C, confirm: &K, id: AdvertisementId) -> DeleteOutcome
where
    A: CampaignApi,
    C: ViewCell<AdvertisementListView>,
    K: Confirm,
{
    if !confirm.confirm(DELETE_PROMPT) {
        return DeleteOutcome::Cancelled;
    }

    match api.delete_advertisement(id).await {
        Ok(()) => {
            log::info!("deleted advertisement {id}");
            cell.apply(|view| view.remove(id));
            DeleteOutcome::Deleted
        }
        Err(err) => {
            log::error!("error deleting advertisement {id}: {err}");
            cell.apply(AdvertisementListView::delete_failed);
            DeleteOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;

    use super::*;
    use crate::campaigns::testkit::{
        Call, FakeBackend, Operation, sample_advertisement, sample_campaign,
    };

    fn backend_with_ads(count: i64) -> FakeBackend {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(1, "Spring Sale"));
        for id in 0..count {
            backend.insert_advertisement(sample_advertisement(100 + id, 1, &format!("Ad {id}")));
        }
        backend
    }

    fn loaded(backend: &FakeBackend) -> Rc<RefCell<AdvertisementListView>> {
        let cell = Rc::new(RefCell::new(AdvertisementListView::default()));
        block_on(load(backend, &cell, CampaignId(1)));
        cell
    }

    fn ad_ids(view: &AdvertisementListView) -> Vec<AdvertisementId> {
        view.state()
            .ready()
            .map(|data| data.advertisements.iter().map(|ad| ad.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn broken_images_fall_back_once() {
        assert_eq!(
            placeholder_for("https://cdn.example.com/missing.png"),
            Some(PLACEHOLDER_IMAGE)
        );
        assert_eq!(placeholder_for(PLACEHOLDER_IMAGE), None);
    }

    #[test]
    fn ready_requires_both_requests() {
        let backend = backend_with_ads(2);
        let cell = loaded(&backend);

        let view = cell.borrow();
        let data = view.state().ready().expect("ready");
        assert_eq!(data.campaign.name, "Spring Sale");
        assert_eq!(data.advertisements.len(), 2);
        assert_eq!(backend.count(Operation::ListAdvertisements), 1);
        assert_eq!(backend.count(Operation::GetCampaign), 1);
    }

    #[test]
    fn either_failure_enters_error_state() {
        let backend = backend_with_ads(2);
        backend.fail(Operation::ListAdvertisements, 500);
        let cell = loaded(&backend);

        assert_eq!(
            cell.borrow().state().error(),
            Some(&ViewError::LoadFailed(LOAD_FAILED))
        );
    }

    #[test]
    fn missing_campaign_is_not_found() {
        let backend = FakeBackend::default();
        let cell = Rc::new(RefCell::new(AdvertisementListView::default()));
        block_on(load(&backend, &cell, CampaignId(77)));

        assert_eq!(cell.borrow().state().error(), Some(&ViewError::NotFound));
    }

    #[test]
    fn deleting_kth_of_n_leaves_the_rest() {
        let backend = backend_with_ads(4);
        let cell = loaded(&backend);
        let before = ad_ids(&cell.borrow());

        let target = before[2];
        let outcome = block_on(delete(&backend, &cell, &|_: &str| true, target));

        assert_eq!(outcome, DeleteOutcome::Deleted);
        let after = ad_ids(&cell.borrow());
        assert_eq!(after.len(), before.len() - 1);
        assert!(!after.contains(&target));
        assert!(backend.calls().contains(&Call::DeleteAdvertisement(target)));
    }

    #[test]
    fn cancelled_delete_keeps_all_items() {
        let backend = backend_with_ads(3);
        let cell = loaded(&backend);
        let before = ad_ids(&cell.borrow());

        let outcome = block_on(delete(&backend, &cell, &|_: &str| false, before[0]));

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(ad_ids(&cell.borrow()), before);
        assert_eq!(backend.count(Operation::DeleteAdvertisement), 0);
    }

    #[test]
    fn empty_list_is_flagged() {
        let backend = backend_with_ads(0);
        let cell = loaded(&backend);
        assert!(cell.borrow().is_empty());
    }

    #[test]
    fn reload_for_other_campaign_supersedes_previous() {
        let mut view = AdvertisementListView::default();
        let first = view.begin_load(CampaignId(1));
        let second = view.begin_load(CampaignId(2));

        assert!(view.finish_load(
            second,
            Ok(Vec::new()),
            Ok(sample_campaign(2, "Second"))
        ));
        assert!(!view.finish_load(first, Ok(Vec::new()), Ok(sample_campaign(1, "First"))));
        assert_eq!(view.campaign_id(), Some(CampaignId(2)));
        assert_eq!(view.state().ready().unwrap().campaign.name, "Second");
    }
}
