use leptos::{ev, *};
use leptos_router::{A, use_navigate};
use wasm_bindgen_futures::spawn_local;

use crate::{
    campaigns::{
        state::LoadPhase,
        types::{AdvertisementId, CampaignId},
    },
    views::{
        SubmitOutcome,
        advertisement_form::{self, AdvertisementFields, AdvertisementFormView, AdvertisementTarget},
        field_message,
    },
};

use super::{FieldFeedback, LoadFailure, LoadingIndicator, NotFound, RouteParam, route_param, use_api};

/// Serves both the create route (campaign id in the path) and the edit route.
#[component]
pub fn AdvertisementForm() -> impl IntoView {
    let advertisement_id = route_param::<AdvertisementId>("id");
    let campaign_id = route_param::<CampaignId>("campaignId");

    let target = create_memo(move |_| {
        let (id, campaign) = (advertisement_id.get(), campaign_id.get());
        if id == RouteParam::Invalid || campaign == RouteParam::Invalid {
            return None;
        }
        AdvertisementTarget::from_route(id.valid(), campaign.valid())
    });

    move || match target.get() {
        Some(target) => view! { <AdvertisementEditor target=target /> }.into_view(),
        None => view! { <NotFound /> }.into_view(),
    }
}

#[component]
fn AdvertisementEditor(target: AdvertisementTarget) -> impl IntoView {
    let api = store_value(use_api());
    let navigate = use_navigate();
    let page = create_rw_signal(AdvertisementFormView::new(target));

    let client = api.get_value();
    spawn_local(async move { advertisement_form::load(&client, &page).await });
    on_cleanup(move || {
        page.try_update(AdvertisementFormView::detach);
    });

    let phase = create_memo(move |_| page.with(|page| page.state().phase()));
    let campaign_name = move || {
        page.with(|page| {
            page.draft()
                .map(|draft| draft.campaign.name.clone())
                .unwrap_or_default()
        })
    };
    let cancel_href = move || {
        page.with(|page| {
            page.list_route()
                .map(|route| route.path())
                .unwrap_or_default()
        })
    };

    let on_submit = Callback::new(move |()| {
        let client = api.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            if let SubmitOutcome::Saved(route) = advertisement_form::submit(&client, &page).await {
                navigate(&route.path(), Default::default());
            }
        });
    });

    let text = move |read: fn(&AdvertisementFields) -> String| {
        move || {
            page.with(|page| {
                page.draft()
                    .map(|draft| read(&draft.fields))
                    .unwrap_or_default()
            })
        }
    };
    let edit = move |write: fn(&mut AdvertisementFields, String)| {
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            page.update(|page| page.edit_fields(|fields| write(fields, value)));
        }
    };
    let feedback = move |field: &'static str| {
        Signal::derive(move || page.with(|page| field_message(page.errors(), field)))
    };
    let invalid = move |field: &'static str| {
        move || page.with(|page| field_message(page.errors(), field).is_some())
    };

    let form = move || {
        view! {
            <h1 class="page-title">{move || page.with(AdvertisementFormView::title)}</h1>
            <h5 class="mb-4">"Campaign: " {campaign_name}</h5>
            {move || {
                page.with(AdvertisementFormView::submit_error)
                    .map(|message| {
                        view! { <div class="alert alert-danger" role="alert">{message}</div> }
                    })
            }}
            <div class="card">
                <div class="card-body">
                    <form
                        novalidate
                        class="form-container"
                        on:submit=move |ev: ev::SubmitEvent| {
                            ev.prevent_default();
                            on_submit.call(());
                        }
                    >
                        <div class="mb-3">
                            <label class="form-label" for="title">"Title"</label>
                            <input
                                id="title"
                                type="text"
                                name="title"
                                class="form-control"
                                class=("is-invalid", invalid("title"))
                                required
                                placeholder="Enter advertisement title"
                                prop:value=text(|fields| fields.title.clone())
                                on:input=edit(|fields, value| fields.title = value)
                            />
                            <FieldFeedback message=feedback("title") />
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="content">"Content"</label>
                            <textarea
                                id="content"
                                name="content"
                                class="form-control"
                                rows="3"
                                placeholder="Enter advertisement content"
                                prop:value=text(|fields| fields.content.clone())
                                on:input=edit(|fields, value| fields.content = value)
                            ></textarea>
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="image_url">"Image URL"</label>
                            <input
                                id="image_url"
                                type="url"
                                name="image_url"
                                class="form-control"
                                class=("is-invalid", invalid("image_url"))
                                placeholder="Enter image URL (optional)"
                                prop:value=text(|fields| fields.image_url.clone())
                                on:input=edit(|fields, value| fields.image_url = value)
                            />
                            <FieldFeedback message=feedback("image_url") />
                            <div class="form-text text-muted">
                                "Provide a URL to an image for this advertisement."
                            </div>
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="target_audience">"Target Audience"</label>
                            <input
                                id="target_audience"
                                type="text"
                                name="target_audience"
                                class="form-control"
                                placeholder="Enter target audience (optional)"
                                prop:value=text(|fields| fields.target_audience.clone())
                                on:input=edit(|fields, value| fields.target_audience = value)
                            />
                        </div>
                        <div class="d-flex justify-content-between mt-4">
                            <A href=cancel_href class="btn btn-secondary">
                                "Cancel"
                            </A>
                            <button type="submit" class="btn btn-primary">
                                {move || page.with(AdvertisementFormView::submit_label)}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        }
        .into_view()
    };

    view! {
        <div class="advertisement-form">
            {move || match phase.get() {
                LoadPhase::Loading => view! { <LoadingIndicator /> }.into_view(),
                LoadPhase::Failed(error) => view! { <LoadFailure error=error /> }.into_view(),
                LoadPhase::Ready => form(),
            }}
        </div>
    }
}
