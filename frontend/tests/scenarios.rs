use std::{cell::RefCell, rc::Rc};

use campaign_frontend::{
    AdvertisementId, AppRoute, CampaignId, CampaignStatus, ViewError,
    campaigns::{
        format::CampaignDisplay,
        testkit::{Call, FakeBackend, Operation, sample_advertisement, sample_campaign},
    },
    views::{
        DeleteOutcome, SubmitOutcome,
        advertisement_form::{self, AdvertisementFormView, AdvertisementTarget},
        advertisement_list::{self, AdvertisementListView},
        campaign_detail::{self, CampaignDetailView},
        campaign_form::{self, CampaignFormView},
        campaign_list::{self, CampaignListView},
    },
};
use chrono::{TimeZone, Utc};
use futures::executor::block_on;

fn cell<V>(view: V) -> Rc<RefCell<V>> {
    Rc::new(RefCell::new(view))
}

#[test]
fn campaign_created_from_the_form_shows_up_in_the_list() {
    let backend = FakeBackend::default();
    let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

    let form = cell(CampaignFormView::for_route(None, now));
    block_on(campaign_form::load(&backend, &form));
    form.borrow_mut().edit_fields(|fields| {
        fields.name = "Launch".to_string();
        fields.budget = "250.50".to_string();
        fields.status = CampaignStatus::Active;
    });

    let outcome = block_on(campaign_form::submit(&backend, &form));
    assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::CampaignList));
    assert_eq!(backend.count(Operation::CreateCampaign), 1);

    let list = cell(CampaignListView::default());
    block_on(campaign_list::load(&backend, &list));
    let view = list.borrow();
    let campaigns = view.state().ready().expect("list ready");
    assert_eq!(campaigns.len(), 1);

    let display = CampaignDisplay::in_zone(&campaigns[0], &Utc);
    assert_eq!(display.name, "Launch");
    assert_eq!(display.budget, "$250.50");
    assert_eq!(display.period, "5/10/2024 - 6/10/2024");
}

#[test]
fn editing_without_changes_sends_back_the_loaded_values() {
    let backend = FakeBackend::default();
    let stored = sample_campaign(3, "Autumn Push");
    backend.insert_campaign(stored.clone());

    let form = cell(CampaignFormView::for_route(Some(CampaignId(3)), Utc::now()));
    block_on(campaign_form::load(&backend, &form));
    let outcome = block_on(campaign_form::submit(&backend, &form));

    assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::CampaignList));
    let calls = backend.calls();
    let Some(Call::UpdateCampaign(id, payload)) = calls.last() else {
        panic!("expected an update call, got {calls:?}");
    };
    assert_eq!(*id, CampaignId(3));
    assert_eq!(payload.name, stored.name);
    assert_eq!(payload.start_date, stored.start_date);
    assert_eq!(payload.end_date, stored.end_date);
    assert_eq!(payload.budget, stored.budget);
    assert_eq!(payload.status, stored.status);
}

#[test]
fn advertisement_lifecycle_under_one_campaign() {
    let backend = FakeBackend::default();
    backend.insert_campaign(sample_campaign(1, "Spring Sale"));

    let create = cell(AdvertisementFormView::new(AdvertisementTarget::Create(CampaignId(1))));
    block_on(advertisement_form::load(&backend, &create));
    create.borrow_mut().edit_fields(|fields| {
        fields.title = "Banner".to_string();
        fields.image_url = "https://cdn.example.com/banner.png".to_string();
    });
    let outcome = block_on(advertisement_form::submit(&backend, &create));
    assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::Advertisements(CampaignId(1))));

    let created = backend.advertisements()[0].clone();
    let edit = cell(AdvertisementFormView::new(AdvertisementTarget::Edit(created.id)));
    block_on(advertisement_form::load(&backend, &edit));
    assert_eq!(
        edit.borrow().list_route(),
        Some(AppRoute::Advertisements(CampaignId(1)))
    );
    edit.borrow_mut()
        .edit_fields(|fields| fields.target_audience = "Students".to_string());
    let outcome = block_on(advertisement_form::submit(&backend, &edit));
    assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::Advertisements(CampaignId(1))));
    assert_eq!(
        backend.advertisements()[0].target_audience.as_deref(),
        Some("Students")
    );

    let list = cell(AdvertisementListView::default());
    block_on(advertisement_list::load(&backend, &list, CampaignId(1)));
    let outcome = block_on(advertisement_list::delete(
        &backend,
        &list,
        &|_: &str| true,
        created.id,
    ));
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(list.borrow().is_empty());
    assert!(backend.advertisements().is_empty());
}

#[test]
fn deleting_from_detail_removes_campaign_and_its_advertisements() {
    let backend = FakeBackend::default();
    backend.insert_campaign(sample_campaign(1, "Spring Sale"));
    backend.insert_advertisement(sample_advertisement(10, 1, "Banner"));

    let detail = cell(CampaignDetailView::default());
    block_on(campaign_detail::load(&backend, &detail, CampaignId(1)));
    let (outcome, next) = block_on(campaign_detail::delete(
        &backend,
        &detail,
        &|_: &str| true,
        CampaignId(1),
    ));

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(next, Some(AppRoute::CampaignList));

    let list = cell(AdvertisementListView::default());
    block_on(advertisement_list::load(&backend, &list, CampaignId(1)));
    assert_eq!(list.borrow().state().error(), Some(&ViewError::NotFound));
}

#[test]
fn failed_campaign_save_can_be_retried() {
    let backend = FakeBackend::default();
    let form = cell(CampaignFormView::for_route(None, Utc::now()));
    form.borrow_mut().edit_fields(|fields| {
        fields.name = "Retry".to_string();
        fields.budget = "10".to_string();
    });
    backend.fail(Operation::CreateCampaign, 500);

    assert_eq!(block_on(campaign_form::submit(&backend, &form)), SubmitOutcome::Failed);
    assert_eq!(form.borrow().submit_error(), Some(campaign_form::CREATE_FAILED));
    assert_eq!(form.borrow().fields().map(|fields| fields.name.as_str()), Some("Retry"));

    backend.recover(Operation::CreateCampaign);
    assert_eq!(
        block_on(campaign_form::submit(&backend, &form)),
        SubmitOutcome::Saved(AppRoute::CampaignList)
    );
    assert_eq!(backend.count(Operation::CreateCampaign), 2);
    assert_eq!(backend.campaigns().len(), 1);
}

#[test]
fn editing_an_unknown_advertisement_reports_it_missing() {
    let backend = FakeBackend::default();
    let form = cell(AdvertisementFormView::new(AdvertisementTarget::Edit(AdvertisementId(9))));
    block_on(advertisement_form::load(&backend, &form));

    assert_eq!(
        form.borrow().state().error(),
        Some(&ViewError::LoadFailed(advertisement_form::ADVERTISEMENT_NOT_FOUND))
    );
    assert_eq!(backend.count(Operation::GetCampaign), 0);
}
