use crate::{config::ClientConfig, error::ApiError};

use super::types::{
    Advertisement, AdvertisementId, AdvertisementPayload, Campaign, CampaignId, CampaignPayload,
};

/// The only gateway the views use to reach the backend.
///
/// Every method is exactly one round trip: no retries, no caching, nothing
/// beyond JSON decoding. Any transport or non-2xx outcome comes back as an
/// [`ApiError`].
#[allow(async_fn_in_trait)]
pub trait CampaignApi {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError>;
    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, ApiError>;
    async fn create_campaign(&self, payload: &CampaignPayload) -> Result<Campaign, ApiError>;
    async fn update_campaign(
        &self,
        id: CampaignId,
        payload: &CampaignPayload,
    ) -> Result<Campaign, ApiError>;
    async fn delete_campaign(&self, id: CampaignId) -> Result<(), ApiError>;

    async fn list_advertisements(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Advertisement>, ApiError>;
    async fn get_advertisement(&self, id: AdvertisementId) -> Result<Advertisement, ApiError>;
    async fn create_advertisement(
        &self,
        campaign_id: CampaignId,
        payload: &AdvertisementPayload,
    ) -> Result<Advertisement, ApiError>;
    async fn update_advertisement(
        &self,
        id: AdvertisementId,
        payload: &AdvertisementPayload,
    ) -> Result<Advertisement, ApiError>;
    async fn delete_advertisement(&self, id: AdvertisementId) -> Result<(), ApiError>;
}

/// URL builder for the backend routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base: config.base_url.clone(),
        }
    }

    pub fn campaigns(&self) -> String {
        format!("{}/campaigns", self.base)
    }

    pub fn campaign(&self, id: CampaignId) -> String {
        format!("{}/campaigns/{id}", self.base)
    }

    pub fn campaign_advertisements(&self, campaign_id: CampaignId) -> String {
        format!("{}/campaigns/{campaign_id}/advertisements", self.base)
    }

    pub fn advertisement(&self, id: AdvertisementId) -> String {
        format!("{}/advertisements/{id}", self.base)
    }
}

/// Browser implementation of [`CampaignApi`] on top of `gloo-net`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoints: Endpoints::new(config),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl CampaignApi for ApiClient {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        transport::get(&self.endpoints.campaigns()).await
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, ApiError> {
        transport::get(&self.endpoints.campaign(id)).await
    }

    async fn create_campaign(&self, payload: &CampaignPayload) -> Result<Campaign, ApiError> {
        transport::post(&self.endpoints.campaigns(), payload).await
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        payload: &CampaignPayload,
    ) -> Result<Campaign, ApiError> {
        transport::put(&self.endpoints.campaign(id), payload).await
    }

    async fn delete_campaign(&self, id: CampaignId) -> Result<(), ApiError> {
        transport::delete(&self.endpoints.campaign(id)).await
    }

    async fn list_advertisements(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Advertisement>, ApiError> {
        transport::get(&self.endpoints.campaign_advertisements(campaign_id)).await
    }

    async fn get_advertisement(&self, id: AdvertisementId) -> Result<Advertisement, ApiError> {
        transport::get(&self.endpoints.advertisement(id)).await
    }

    async fn create_advertisement(
        &self,
        campaign_id: CampaignId,
        payload: &AdvertisementPayload,
    ) -> Result<Advertisement, ApiError> {
        transport::post(&self.endpoints.campaign_advertisements(campaign_id), payload).await
    }

    async fn update_advertisement(
        &self,
        id: AdvertisementId,
        payload: &AdvertisementPayload,
    ) -> Result<Advertisement, ApiError> {
        transport::put(&self.endpoints.advertisement(id), payload).await
    }

    async fn delete_advertisement(&self, id: AdvertisementId) -> Result<(), ApiError> {
        transport::delete(&self.endpoints.advertisement(id)).await
    }
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::{Serialize, de::DeserializeOwned};

    use crate::error::ApiError;

    pub async fn get<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
        let response = Request::get(url).send().await.map_err(network)?;
        decode(ensure_success(response)?).await
    }

    pub async fn post<B, T>(url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        send_json(Request::post(url), body).await
    }

    pub async fn put<B, T>(url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        send_json(Request::put(url), body).await
    }

    pub async fn delete(url: &str) -> Result<(), ApiError> {
        let response = Request::delete(url).send().await.map_err(network)?;
        ensure_success(response).map(|_| ())
    }

    async fn send_json<B, T>(builder: RequestBuilder, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = builder
            .json(body)
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        let response = request.send().await.map_err(network)?;
        decode(ensure_success(response)?).await
    }

    fn ensure_success(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status(),
                message: response.status_text(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn network(err: gloo_net::Error) -> ApiError {
        ApiError::Network(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod transport {
    use serde::{Serialize, de::DeserializeOwned};

    use crate::error::ApiError;

    fn unsupported<T>() -> Result<T, ApiError> {
        Err(ApiError::Network(
            "HTTP transport is only available in the browser".to_string(),
        ))
    }

    pub async fn get<T: DeserializeOwned>(_url: &str) -> Result<T, ApiError> {
        unsupported()
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        _url: &str,
        _body: &B,
    ) -> Result<T, ApiError> {
        unsupported()
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        _url: &str,
        _body: &B,
    ) -> Result<T, ApiError> {
        unsupported()
    }

    pub async fn delete(_url: &str) -> Result<(), ApiError> {
        unsupported()
    }
}
