use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

use crate::{
    campaigns::{
        confirm::BrowserConfirm,
        format::CampaignDisplay,
        state::LoadPhase,
        types::{Campaign, CampaignId},
    },
    routes::AppRoute,
    views::campaign_list::{self, CampaignListView, EMPTY_MESSAGE},
};

use super::{LoadFailure, LoadingIndicator, Notice, StatusBadge, use_api};

#[component]
pub fn CampaignList() -> impl IntoView {
    let api = store_value(use_api());
    let page = create_rw_signal(CampaignListView::default());

    let client = api.get_value();
    spawn_local(async move { campaign_list::load(&client, &page).await });
    on_cleanup(move || {
        page.try_update(CampaignListView::detach);
    });

    let phase = create_memo(move |_| page.with(|page| page.state().phase()));
    let campaigns = create_memo(move |_| {
        page.with(|page| page.state().ready().cloned().unwrap_or_default())
    });
    let notice = Signal::derive(move || page.with(CampaignListView::notice));

    let on_delete = Callback::new(move |id: CampaignId| {
        let client = api.get_value();
        spawn_local(async move {
            campaign_list::delete(&client, &page, &BrowserConfirm, id).await;
        });
    });

    view! {
        <div class="campaign-list">
            <div class="d-flex justify-content-between align-items-center mb-4">
                <h1 class="page-title">"Advertising Campaigns"</h1>
                <A href=AppRoute::NewCampaign.path() class="btn btn-primary">
                    "Create New Campaign"
                </A>
            </div>
            <Notice message=notice />
            {move || match phase.get() {
                LoadPhase::Loading => view! { <LoadingIndicator /> }.into_view(),
                LoadPhase::Failed(error) => view! { <LoadFailure error=error /> }.into_view(),
                LoadPhase::Ready => {
                    view! {
                        <Show
                            when=move || campaigns.with(|campaigns| !campaigns.is_empty())
                            fallback=|| view! { <div class="alert alert-info">{EMPTY_MESSAGE}</div> }
                        >
                            <div class="row">
                                <For
                                    each=move || campaigns.get()
                                    key=|campaign| campaign.id
                                    children=move |campaign: Campaign| {
                                        view! { <CampaignCard campaign=campaign on_delete=on_delete /> }
                                    }
                                />
                            </div>
                        </Show>
                    }
                        .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn CampaignCard(campaign: Campaign, on_delete: Callback<CampaignId>) -> impl IntoView {
    let id = campaign.id;
    let display = CampaignDisplay::of(&campaign);

    view! {
        <div class="col-md-6 col-lg-4 mb-4">
            <div class="card h-100">
                <div class="card-body">
                    <h5 class="card-title">{display.name}</h5>
                    <p class="card-text">{display.description.unwrap_or_default()}</p>
                    <div class="mb-2">
                        <StatusBadge status=campaign.status />
                    </div>
                    <div class="mb-2">
                        <strong>"Budget:"</strong>
                        " "
                        {display.budget}
                    </div>
                    <div class="mb-2">
                        <strong>"Period:"</strong>
                        " "
                        {display.period}
                    </div>
                </div>
                <div class="card-footer">
                    <div class="action-buttons">
                        <A href=AppRoute::CampaignDetail(id).path() class="btn btn-outline-primary btn-sm">
                            "View"
                        </A>
                        <A href=AppRoute::EditCampaign(id).path() class="btn btn-outline-secondary btn-sm">
                            "Edit"
                        </A>
                        <button
                            type="button"
                            class="btn btn-outline-danger btn-sm"
                            on:click=move |_| on_delete.call(id)
                        >
                            "Delete"
                        </button>
                        <A href=AppRoute::Advertisements(id).path() class="btn btn-outline-info btn-sm">
                            "Ads"
                        </A>
                    </div>
                </div>
            </div>
        </div>
    }
}
