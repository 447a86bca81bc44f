use chrono::Utc;
use leptos::{ev, *};
use leptos_router::{A, use_navigate};
use wasm_bindgen_futures::spawn_local;

use crate::{
    campaigns::{
        format::{apply_date_input, date_input_value},
        state::LoadPhase,
        types::{CampaignId, CampaignStatus},
    },
    views::{
        SubmitOutcome,
        campaign_form::{self, CampaignFields, CampaignFormView},
        field_message,
    },
};

use super::{FieldFeedback, LoadFailure, LoadingIndicator, NotFound, RouteParam, route_param, use_api};

/// Create and edit page; edit mode when the route carries an id.
#[component]
pub fn CampaignForm() -> impl IntoView {
    let api = store_value(use_api());
    let navigate = use_navigate();
    let campaign_id = route_param::<CampaignId>("id");
    let page = create_rw_signal(CampaignFormView::for_route(
        campaign_id.get_untracked().valid(),
        Utc::now(),
    ));

    create_effect(move |previous: Option<RouteParam<CampaignId>>| {
        let current = campaign_id.get();
        if current == RouteParam::Invalid {
            page.update(CampaignFormView::detach);
            return current;
        }
        if previous.is_some() {
            page.set(CampaignFormView::for_route(current.valid(), Utc::now()));
        }
        let client = api.get_value();
        spawn_local(async move { campaign_form::load(&client, &page).await });
        current
    });
    on_cleanup(move || {
        page.try_update(CampaignFormView::detach);
    });

    let phase = create_memo(move |_| page.with(|page| page.state().phase()));
    let title = move || page.with(CampaignFormView::title);
    let submit_error = move || page.with(CampaignFormView::submit_error);

    let on_submit = Callback::new(move |()| {
        let client = api.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            if let SubmitOutcome::Saved(route) = campaign_form::submit(&client, &page).await {
                navigate(&route.path(), Default::default());
            }
        });
    });

    let text = move |read: fn(&CampaignFields) -> String| {
        move || page.with(|page| page.fields().map(read).unwrap_or_default())
    };
    let edit = move |write: fn(&mut CampaignFields, String)| {
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
                            <label class="form-label" for="name">"Campaign Name"</label>
                            <input
                                id="name"
                                type="text"
                                name="name"
                                class="form-control"
                                class=("is-invalid", invalid("name"))
                                required
                                placeholder="Enter campaign name"
                                prop:value=text(|fields| fields.name.clone())
                                on:input=edit(|fields, value| fields.name = value)
                            />
                            <FieldFeedback message=feedback("name") />
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="description">"Description"</label>
                            <textarea
                                id="description"
                                name="description"
                                class="form-control"
                                rows="3"
                                placeholder="Enter campaign description"
                                prop:value=text(|fields| fields.description.clone())
                                on:input=edit(|fields, value| fields.description = value)
                            ></textarea>
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="start_date">"Start Date"</label>
                            <input
                                id="start_date"
                                type="date"
                                name="start_date"
                                class="form-control"
                                class=("is-invalid", invalid("start_date"))
                                required
                                prop:value=text(|fields| {
                                    fields.start_date.as_ref().map(date_input_value).unwrap_or_default()
                                })
                                on:input=edit(|fields, value| {
                                    fields.start_date = apply_date_input(fields.start_date, &value);
                                })
                            />
                            <FieldFeedback message=feedback("start_date") />
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="end_date">"End Date"</label>
                            <input
                                id="end_date"
                                type="date"
                                name="end_date"
                                class="form-control"
                                class=("is-invalid", invalid("end_date"))
                                required
                                min=text(|fields| {
                                    fields.start_date.as_ref().map(date_input_value).unwrap_or_default()
                                })
                                prop:value=text(|fields| {
                                    fields.end_date.as_ref().map(date_input_value).unwrap_or_default()
                                })
                                on:input=edit(|fields, value| {
                                    fields.end_date = apply_date_input(fields.end_date, &value);
                                })
                            />
                            <FieldFeedback message=feedback("end_date") />
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="budget">"Budget ($)"</label>
                            <input
                                id="budget"
                                type="number"
                                name="budget"
                                class="form-control"
                                class=("is-invalid", invalid("budget"))
                                required
                                min="0"
                                step="0.01"
                                placeholder="Enter campaign budget"
                                prop:value=text(|fields| fields.budget.clone())
                                on:input=edit(|fields, value| fields.budget = value)
                            />
                            <FieldFeedback message=feedback("budget") />
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="status">"Status"</label>
                            <select
                                id="status"
                                name="status"
                                class="form-select"
                                required
                                prop:value=text(|fields| fields.status.as_str().to_string())
                                on:change=edit(|fields, value| {
                                    if let Ok(status) = value.parse() {
                                        fields.status = status;
                                    }
                                })
                            >
                                {CampaignStatus::ALL
                                    .into_iter()
                                    .map(|status| {
                                        view! { <option value=status.as_str()>{status.as_str()}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="d-flex justify-content-between mt-4">
                            <A
                                href=move || page.with(|page| page.cancel_route().path())
                                class="btn btn-secondary"
                            >
                                "Cancel"
                            </A>
                            <button type="submit" class="btn btn-primary">
                                {move || page.with(CampaignFormView::submit_label)}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        }
        .into_view()
    };

    let body = move || match phase.get() {
        LoadPhase::Loading => view! { <LoadingIndicator /> }.into_view(),
        LoadPhase::Failed(error) => view! { <LoadFailure error=error /> }.into_view(),
        LoadPhase::Ready => form(),
    };

    view! {
        <div class="campaign-form">
            {move || match campaign_id.get() {
                RouteParam::Invalid => view! { <NotFound /> }.into_view(),
                _ => {
                    view! {
                        <h1 class="page-title">{title}</h1>
                        {move || {
                            submit_error()
                                .map(|message| {
                                    view! { <div class="alert alert-danger" role="alert">{message}</div> }
                                })
                        }}
                        {body}
                    }
                        .into_view()
                }
            }}
        </div>
    }
}
