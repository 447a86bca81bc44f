use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlImageElement;

use crate::{
    campaigns::{
        confirm::BrowserConfirm,
        state::LoadPhase,
        types::{Advertisement, AdvertisementId, CampaignId},
    },
    routes::AppRoute,
    views::advertisement_list::{self, AdvertisementListView, EMPTY_MESSAGE, placeholder_for},
};

use super::{LoadFailure, LoadingIndicator, NotFound, Notice, RouteParam, route_param, use_api};

#[component]
pub fn AdvertisementList() -> impl IntoView {
    let api = store_value(use_api());
    let page = create_rw_signal(AdvertisementListView::default());
    let campaign_id = route_param::<CampaignId>("campaignId");

    create_effect(move |_| match campaign_id.get() {
        RouteParam::Valid(id) => {
            let client = api.get_value();
            spawn_local(async move { advertisement_list::load(&client, &page, id).await });
        }
        _ => page.update(AdvertisementListView::detach),
    });
    on_cleanup(move || {
        page.try_update(AdvertisementListView::detach);
    });

    let phase = create_memo(move |_| page.with(|page| page.state().phase()));
    let owner = create_memo(move |_| {
        page.with(|page| page.state().ready().map(|data| data.campaign.clone()))
    });
    let advertisements = create_memo(move |_| {
        page.with(|page| {
            page.state()
                .ready()
                .map(|data| data.advertisements.clone())
                .unwrap_or_default()
        })
    });
    let notice = Signal::derive(move || page.with(AdvertisementListView::notice));

    let on_delete = Callback::new(move |id: AdvertisementId| {
        let client = api.get_value();
        spawn_local(async move {
            advertisement_list::delete(&client, &page, &BrowserConfirm, id).await;
        });
    });

    let body = move || match phase.get() {
        LoadPhase::Loading => view! { <LoadingIndicator /> }.into_view(),
        LoadPhase::Failed(error) => view! { <LoadFailure error=error /> }.into_view(),
        LoadPhase::Ready => {
            let Some(campaign) = owner.get() else {
                return ().into_view();
            };
            let id = campaign.id;
            view! {
                <div class="d-flex justify-content-between align-items-center mb-4">
                    <div>
                        <h1 class="page-title">"Advertisements"</h1>
                        <h5>"Campaign: " {campaign.name}</h5>
                    </div>
                    <div class="action-buttons">
                        <A href=AppRoute::CampaignDetail(id).path() class="btn btn-outline-secondary">
                            "Back to Campaign"
                        </A>
                        <A href=AppRoute::NewAdvertisement(id).path() class="btn btn-primary">
                            "Create New Advertisement"
                        </A>
                    </div>
                </div>
                <Notice message=notice />
                <Show
                    when=move || advertisements.with(|ads| !ads.is_empty())
                    fallback=|| view! { <div class="alert alert-info">{EMPTY_MESSAGE}</div> }
                >
                    <div class="row">
                        <For
                            each=move || advertisements.get()
                            key=|ad| ad.id
                            children=move |ad: Advertisement| {
                                view! { <AdvertisementCard advertisement=ad on_delete=on_delete /> }
                            }
                        />
                    </div>
                </Show>
            }
            .into_view()
        }
    };

    view! {
        <div class="advertisement-list">
            {move || match campaign_id.get() {
                RouteParam::Valid(_) => body.into_view(),
                _ => view! { <NotFound /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AdvertisementCard(advertisement: Advertisement, on_delete: Callback<AdvertisementId>) -> impl IntoView {
    let id = advertisement.id;
    let image = advertisement
        .image_url
        .filter(|url| !url.is_empty())
        .map(|url| {
            view! {
                <div class="mb-3 text-center">
                    <img
                        src=url
                        alt=advertisement.title.clone()
                        class="img-fluid"
                        style="max-height: 150px;"
                        on:error=move |ev| {
                            let image = event_target::<HtmlImageElement>(&ev);
                            if let Some(fallback) = placeholder_for(&image.src()) {
                                image.set_src(fallback);
                            }
                        }
                    />
                </div>
            }
        });
    let audience = advertisement
        .target_audience
        .filter(|audience| !audience.is_empty())
        .map(|audience| {
            view! {
                <div class="mb-2">
                    <strong>"Target Audience:"</strong>
                    " "
                    {audience}
                </div>
            }
        });

    view! {
        <div class="col-md-4">
            <div class="card mb-4 advertisement-card">
                <div class="card-body">
                    <h5 class="card-title">{advertisement.title}</h5>
                    {image}
                    <p class="card-text">{advertisement.content}</p>
                    {audience}
                </div>
                <div class="card-footer">
                    <div class="action-buttons">
                        <A href=AppRoute::EditAdvertisement(id).path() class="btn btn-outline-secondary btn-sm">
                            "Edit"
                        </A>
                        <button
                            type="button"
                            class="btn btn-outline-danger btn-sm"
                            on:click=move |_| on_delete.call(id)
                        >
                            "Delete"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
