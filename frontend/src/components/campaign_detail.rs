use leptos::*;
use leptos_router::{A, use_navigate};
use wasm_bindgen_futures::spawn_local;

use crate::{
    campaigns::{confirm::BrowserConfirm, format::CampaignDisplay, state::LoadPhase, types::CampaignId},
    routes::AppRoute,
    views::campaign_detail::{self, CampaignDetailView, NO_DESCRIPTION},
};

use super::{
    LoadFailure, LoadingIndicator, NotFound, Notice, RouteParam, StatusBadge, route_param, use_api,
};

#[component]
pub fn CampaignDetail() -> impl IntoView {
    let api = store_value(use_api());
    let navigate = use_navigate();
    let page = create_rw_signal(CampaignDetailView::default());
    let campaign_id = route_param::<CampaignId>("id");

    create_effect(move |_| match campaign_id.get() {
        RouteParam::Valid(id) => {
            let client = api.get_value();
            spawn_local(async move { campaign_detail::load(&client, &page, id).await });
        }
        _ => page.update(CampaignDetailView::detach),
    });
    on_cleanup(move || {
        page.try_update(CampaignDetailView::detach);
    });

    let phase = create_memo(move |_| page.with(|page| page.state().phase()));
    let campaign = create_memo(move |_| page.with(|page| page.state().ready().cloned()));
    let notice = Signal::derive(move || page.with(CampaignDetailView::notice));

    let on_delete = Callback::new(move |id: CampaignId| {
        let client = api.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            let (_, next) = campaign_detail::delete(&client, &page, &BrowserConfirm, id).await;
            if let Some(route) = next {
                navigate(&route.path(), Default::default());
            }
        });
    });

    let body = move || match phase.get() {
        LoadPhase::Loading => view! { <LoadingIndicator /> }.into_view(),
        LoadPhase::Failed(error) => view! { <LoadFailure error=error /> }.into_view(),
        LoadPhase::Ready => {
            let Some(campaign) = campaign.get() else {
                return ().into_view();
            };
            let id = campaign.id;
            let display = CampaignDisplay::of(&campaign);
            view! {
                <div class="d-flex justify-content-between align-items-center mb-4">
                    <h1 class="page-title">"Campaign Details"</h1>
                    <div class="action-buttons">
                        <A href=AppRoute::CampaignList.path() class="btn btn-outline-secondary">
                            "Back to List"
                        </A>
                        <A href=AppRoute::EditCampaign(id).path() class="btn btn-outline-primary">
                            "Edit Campaign"
                        </A>
                        <button
                            type="button"
                            class="btn btn-outline-danger"
                            on:click=move |_| on_delete.call(id)
                        >
                            "Delete Campaign"
                        </button>
                        <A href=AppRoute::Advertisements(id).path() class="btn btn-outline-info">
                            "Manage Advertisements"
                        </A>
                    </div>
                </div>
                <Notice message=notice />
                <div class="card mb-4">
                    <div class="card-header">
                        <div class="d-flex justify-content-between align-items-center">
                            <h2>{display.name}</h2>
                            <StatusBadge status=campaign.status />
                        </div>
                    </div>
                    <div class="card-body">
                        <div class="row">
                            <div class="col-md-8">
                                <h5>"Description"</h5>
                                <p>{display.description.unwrap_or_else(|| NO_DESCRIPTION.to_string())}</p>
                            </div>
                            <div class="col-md-4">
                                <div class="mb-3">
                                    <h5>"Budget"</h5>
                                    <p>{display.budget}</p>
                                </div>
                                <div class="mb-3">
                                    <h5>"Campaign Period"</h5>
                                    <p>
                                        <strong>"Start:"</strong>
                                        " "
                                        {display.start}
                                        <br />
                                        <strong>"End:"</strong>
                                        " "
                                        {display.end}
                                    </p>
                                </div>
                            </div>
                        </div>
                    </div>
                    <div class="card-footer text-muted">
                        <small>
                            "Created: "
                            {display.created.unwrap_or_default()}
                            <br />
                            "Last Updated: "
                            {display.updated.unwrap_or_default()}
                        </small>
                    </div>
                </div>
            }
            .into_view()
        }
    };

    view! {
        <div class="campaign-detail">
            {move || match campaign_id.get() {
                RouteParam::Valid(_) => body.into_view(),
                _ => view! { <NotFound /> }.into_view(),
            }}
        </div>
    }
}
