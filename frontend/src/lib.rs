use leptos::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{Route, Router, Routes};
use wasm_bindgen::prelude::wasm_bindgen;

pub mod campaigns;
mod components;
pub mod config;
pub mod error;
mod logging;
pub mod routes;
pub mod views;

use components::{
    ApiContext, NotFound, advertisement_form::AdvertisementForm,
    advertisement_list::AdvertisementList, campaign_detail::CampaignDetail,
    campaign_form::CampaignForm, campaign_list::CampaignList, navigation::Navigation,
};

pub use campaigns::api::{ApiClient, CampaignApi};
pub use campaigns::types::{
    Advertisement, AdvertisementId, AdvertisementPayload, Campaign, CampaignId, CampaignPayload,
    CampaignStatus,
};
pub use config::ClientConfig;
pub use error::{ApiError, ViewError};
pub use logging::init_logging;
pub use routes::AppRoute;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";

/// Root component: navigation bar above the routed pages.
#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    provide_meta_context();
    provide_context(ApiContext(ApiClient::new(&config)));

    view! {
        <Title text="Ad Campaign Manager" />
        <Stylesheet href=BOOTSTRAP_CSS />
        <Router>
            <Navigation />
            <main class="container mt-4">
                <Routes>
                    <Route path=routes::CAMPAIGN_LIST view=CampaignList />
                    <Route path=routes::NEW_CAMPAIGN view=CampaignForm />
                    <Route path=routes::CAMPAIGN_DETAIL view=CampaignDetail />
                    <Route path=routes::EDIT_CAMPAIGN view=CampaignForm />
                    <Route path=routes::ADVERTISEMENTS view=AdvertisementList />
                    <Route path=routes::NEW_ADVERTISEMENT view=AdvertisementForm />
                    <Route path=routes::EDIT_ADVERTISEMENT view=AdvertisementForm />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// WASM entry point called automatically by `trunk`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), wasm_bindgen::JsValue> {
    let config = ClientConfig::from_build_env();
    init_logging(config.log_level);
    console_error_panic_hook::set_once();

    log::info!("campaign api at {}", config.base_url);
    leptos::mount_to_body(move || view! { <App config=config /> });
    Ok(())
}
