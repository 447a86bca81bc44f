use leptos::*;
use leptos_router::A;

use crate::routes::AppRoute;

pub const BRAND: &str = "Ad Campaign Manager";

/// Static links shown on every page.
pub const NAV_LINKS: [(&str, AppRoute); 2] = [
    ("Campaigns", AppRoute::CampaignList),
    ("New Campaign", AppRoute::NewCampaign),
];

#[component]
pub fn Navigation() -> impl IntoView {
    view! {
        <nav class="navbar navbar-expand-lg navbar-dark bg-dark">
            <div class="container">
                <A href=AppRoute::CampaignList.path() class="navbar-brand">{BRAND}</A>
                <ul class="navbar-nav me-auto">
                    {NAV_LINKS
                        .into_iter()
                        .map(|(label, route)| {
                            view! {
                                <li class="nav-item">
                                    <A href=route.path() class="nav-link">{label}</A>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </nav>
    }
}
