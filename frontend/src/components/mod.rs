//! Routed pages and the pieces they share.

pub mod advertisement_form;
pub mod advertisement_list;
pub mod campaign_detail;
pub mod campaign_form;
pub mod campaign_list;
pub mod navigation;

use std::str::FromStr;

use leptos::*;
use leptos_router::{A, use_params_map};

use crate::{
    campaigns::{api::ApiClient, format::status_badge_class, types::CampaignStatus},
    error::ViewError,
};

/// Backend client shared with every page.
#[derive(Clone)]
pub struct ApiContext(pub ApiClient);

pub(crate) fn use_api() -> ApiClient {
    use_context::<ApiContext>()
        .expect("api client context missing")
        .0
}

/// A path parameter as the page sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteParam<T> {
    Absent,
    /// Present but not a valid id; the page renders as not found.
    Invalid,
    Valid(T),
}

impl<T: FromStr> RouteParam<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => RouteParam::Absent,
            Some(value) => value.parse().map_or(RouteParam::Invalid, RouteParam::Valid),
        }
    }
}

impl<T> RouteParam<T> {
    pub fn valid(self) -> Option<T> {
        match self {
            RouteParam::Valid(value) => Some(value),
            _ => None,
        }
    }
}

/// Track the named path parameter of the current route.
pub(crate) fn route_param<T>(name: &'static str) -> Memo<RouteParam<T>>
where
    T: FromStr + Clone + PartialEq + 'static,
{
    let params = use_params_map();
    create_memo(move |_| params.with(|map| RouteParam::parse(map.get(name).map(String::as_str))))
}

#[component]
pub fn StatusBadge(status: CampaignStatus) -> impl IntoView {
    view! {
        <span class=format!("campaign-status {}", status_badge_class(status))>
            {status.as_str()}
        </span>
    }
}

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="text-center mt-5">
            <div class="spinner-border" role="status">
                <span class="visually-hidden">"Loading..."</span>
            </div>
        </div>
    }
}

#[component]
pub fn LoadFailure(error: ViewError) -> impl IntoView {
    let class = match &error {
        ViewError::NotFound => "alert alert-warning",
        ViewError::LoadFailed(_) => "alert alert-danger",
    };
    view! { <div class=class role="alert">{error.message()}</div> }
}

/// Inline banner for failures that leave the page usable.
#[component]
pub fn Notice(#[prop(into)] message: Signal<Option<&'static str>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="alert alert-danger" role="alert">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

/// Per-input validation message, hidden while the field is valid.
#[component]
pub fn FieldFeedback(#[prop(into)] message: Signal<Option<&'static str>>) -> impl IntoView {
    view! {
        <div class="invalid-feedback" class=("d-block", move || message.get().is_some())>
            {move || message.get().unwrap_or_default()}
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center mt-5">
            <h2>"Page not found"</h2>
            <A href="/" class="btn btn-primary mt-3">"Back to Campaigns"</A>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaigns::types::CampaignId;

    #[test]
    fn route_params_distinguish_missing_from_malformed() {
        assert_eq!(RouteParam::<CampaignId>::parse(None), RouteParam::Absent);
        assert_eq!(RouteParam::<CampaignId>::parse(Some("abc")), RouteParam::Invalid);
        assert_eq!(
            RouteParam::<CampaignId>::parse(Some("42")),
            RouteParam::Valid(CampaignId(42))
        );
        assert_eq!(RouteParam::Valid(CampaignId(42)).valid(), Some(CampaignId(42)));
        assert_eq!(RouteParam::<CampaignId>::Invalid.valid(), None);
    }
}
