//! In-memory stand-in for the REST backend, used to drive views without a browser.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ApiError;

use super::{
    api::CampaignApi,
    types::{
        Advertisement, AdvertisementId, AdvertisementPayload, Campaign, CampaignId,
        CampaignPayload, CampaignStatus,
    },
};

/// One facade call, recorded with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCampaigns,
    GetCampaign(CampaignId),
    CreateCampaign(CampaignPayload),
    UpdateCampaign(CampaignId, CampaignPayload),
    DeleteCampaign(CampaignId),
    ListAdvertisements(CampaignId),
    GetAdvertisement(AdvertisementId),
    CreateAdvertisement(CampaignId, AdvertisementPayload),
    UpdateAdvertisement(AdvertisementId, AdvertisementPayload),
    DeleteAdvertisement(AdvertisementId),
}

/// Facade operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCampaigns,
    GetCampaign,
    CreateCampaign,
    UpdateCampaign,
    DeleteCampaign,
    ListAdvertisements,
    GetAdvertisement,
    CreateAdvertisement,
    UpdateAdvertisement,
    DeleteAdvertisement,
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::ListCampaigns => Operation::ListCampaigns,
            Call::GetCampaign(_) => Operation::GetCampaign,
            Call::CreateCampaign(_) => Operation::CreateCampaign,
            Call::UpdateCampaign(..) => Operation::UpdateCampaign,
            Call::DeleteCampaign(_) => Operation::DeleteCampaign,
            Call::ListAdvertisements(_) => Operation::ListAdvertisements,
            Call::GetAdvertisement(_) => Operation::GetAdvertisement,
            Call::CreateAdvertisement(..) => Operation::CreateAdvertisement,
            Call::UpdateAdvertisement(..) => Operation::UpdateAdvertisement,
            Call::DeleteAdvertisement(_) => Operation::DeleteAdvertisement,
        }
    }
}

/// Behaves like the campaign service: 404 for unknown ids, ids assigned on create.
#[derive(Debug, Default)]
pub struct FakeBackend {
    campaigns: RefCell<Vec<Campaign>>,
    advertisements: RefCell<Vec<Advertisement>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<HashMap<Operation, u16>>,
    last_id: Cell<i64>,
}

impl FakeBackend {
    pub fn insert_campaign(&self, campaign: Campaign) {
        self.bump_id(campaign.id.0);
        self.campaigns.borrow_mut().push(campaign);
    }

    pub fn insert_advertisement(&self, advertisement: Advertisement) {
        self.bump_id(advertisement.id.0);
        self.advertisements.borrow_mut().push(advertisement);
    }

    /// Make every later call of `operation` answer with `status`.
    pub fn fail(&self, operation: Operation, status: u16) {
        self.failures.borrow_mut().insert(operation, status);
    }

    pub fn recover(&self, operation: Operation) {
        self.failures.borrow_mut().remove(&operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.borrow().clone()
    }

    pub fn advertisements(&self) -> Vec<Advertisement> {
        self.advertisements.borrow().clone()
    }

    fn bump_id(&self, id: i64) {
        if id > self.last_id.get() {
            self.last_id.set(id);
        }
    }

    fn next_id(&self) -> i64 {
        let id = self.last_id.get() + 1;
        self.last_id.set(id);
        id
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let operation = call.operation();
        self.calls.borrow_mut().push(call);
        match self.failures.borrow().get(&operation) {
            Some(&status) => Err(ApiError::Status {
                status,
                message: "INJECTED FAILURE".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn find_campaign(&self, id: CampaignId) -> Result<Campaign, ApiError> {
        self.campaigns
            .borrow()
            .iter()
            .find(|campaign| campaign.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn find_advertisement(&self, id: AdvertisementId) -> Result<Advertisement, ApiError> {
        self.advertisements
            .borrow()
            .iter()
            .find(|ad| ad.id == id)
            .cloned()
            .ok_or_else(not_found)
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "NOT FOUND".to_string(),
    }
}

impl CampaignApi for FakeBackend {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        self.record(Call::ListCampaigns)?;
        Ok(self.campaigns())
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, ApiError> {
        self.record(Call::GetCampaign(id))?;
        self.find_campaign(id)
    }

    async fn create_campaign(&self, payload: &CampaignPayload) -> Result<Campaign, ApiError> {
        self.record(Call::CreateCampaign(payload.clone()))?;
        let now = Utc::now();
        let campaign = Campaign {
            id: CampaignId(self.next_id()),
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            start_date: payload.start_date,
            end_date: payload.end_date,
            budget: payload.budget,
            status: payload.status,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.campaigns.borrow_mut().push(campaign.clone());
        Ok(campaign)
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        payload: &CampaignPayload,
    ) -> Result<Campaign, ApiError> {
        self.record(Call::UpdateCampaign(id, payload.clone()))?;
        let mut campaigns = self.campaigns.borrow_mut();
        let campaign = campaigns
            .iter_mut()
            .find(|campaign| campaign.id == id)
            .ok_or_else(not_found)?;
        campaign.name = payload.name.clone();
        campaign.description = Some(payload.description.clone());
        campaign.start_date = payload.start_date;
        campaign.end_date = payload.end_date;
        campaign.budget = payload.budget;
        campaign.status = payload.status;
        campaign.updated_at = Some(Utc::now());
        Ok(campaign.clone())
    }

    async fn delete_campaign(&self, id: CampaignId) -> Result<(), ApiError> {
        self.record(Call::DeleteCampaign(id))?;
        self.find_campaign(id)?;
        self.campaigns.borrow_mut().retain(|campaign| campaign.id != id);
        self.advertisements
            .borrow_mut()
            .retain(|ad| ad.campaign_id != id);
        Ok(())
    }

    async fn list_advertisements(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Advertisement>, ApiError> {
        self.record(Call::ListAdvertisements(campaign_id))?;
        self.find_campaign(campaign_id)?;
        Ok(self
            .advertisements
            .borrow()
            .iter()
            .filter(|ad| ad.campaign_id == campaign_id)
            .cloned()
            .collect())
    }

    async fn get_advertisement(&self, id: AdvertisementId) -> Result<Advertisement, ApiError> {
        self.record(Call::GetAdvertisement(id))?;
        self.find_advertisement(id)
    }

    async fn create_advertisement(
        &self,
        campaign_id: CampaignId,
        payload: &AdvertisementPayload,
    ) -> Result<Advertisement, ApiError> {
        self.record(Call::CreateAdvertisement(campaign_id, payload.clone()))?;
        self.find_campaign(campaign_id)?;
        let now = Utc::now();
        let advertisement = Advertisement {
            id: AdvertisementId(self.next_id()),
            campaign_id,
            title: payload.title.clone(),
            content: optional(&payload.content),
            image_url: optional(&payload.image_url),
            target_audience: optional(&payload.target_audience),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.advertisements.borrow_mut().push(advertisement.clone());
        Ok(advertisement)
    }

    async fn update_advertisement(
        &self,
        id: AdvertisementId,
        payload: &AdvertisementPayload,
    ) -> Result<Advertisement, ApiError> {
        self.record(Call::UpdateAdvertisement(id, payload.clone()))?;
        let mut advertisements = self.advertisements.borrow_mut();
        let ad = advertisements
            .iter_mut()
            .find(|ad| ad.id == id)
            .ok_or_else(not_found)?;
        ad.title = payload.title.clone();
        ad.content = optional(&payload.content);
        ad.image_url = optional(&payload.image_url);
        ad.target_audience = optional(&payload.target_audience);
        ad.updated_at = Some(Utc::now());
        Ok(ad.clone())
    }

    async fn delete_advertisement(&self, id: AdvertisementId) -> Result<(), ApiError> {
        self.record(Call::DeleteAdvertisement(id))?;
        self.find_advertisement(id)?;
        self.advertisements.borrow_mut().retain(|ad| ad.id != id);
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn fixture_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid fixture date")
}

/// Active campaign running through March 2024 with a 1000 budget.
pub fn sample_campaign(id: i64, name: &str) -> Campaign {
    Campaign {
        id: CampaignId(id),
        name: name.to_string(),
        description: Some(format!("{name} description")),
        start_date: fixture_date(2024, 3, 1, 0, 0),
        end_date: fixture_date(2024, 4, 1, 0, 0),
        budget: 1000.0,
        status: CampaignStatus::Active,
        created_at: Some(fixture_date(2024, 2, 20, 10, 0)),
        updated_at: Some(fixture_date(2024, 2, 21, 8, 30)),
    }
}

pub fn sample_advertisement(id: i64, campaign_id: i64, title: &str) -> Advertisement {
    Advertisement {
        id: AdvertisementId(id),
        campaign_id: CampaignId(campaign_id),
        title: title.to_string(),
        content: Some(format!("{title} copy")),
        image_url: None,
        target_audience: Some("Adults 25-34".to_string()),
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaigns::types::timestamp;

    #[test]
    fn sample_campaign_spans_march_2024() {
        let campaign = sample_campaign(1, "Spring Sale");
        assert_eq!(timestamp::canonical(&campaign.start_date), "2024-03-01T00:00:00.000Z");
        assert_eq!(timestamp::canonical(&campaign.end_date), "2024-04-01T00:00:00.000Z");
        assert_eq!(
            campaign.updated_at.as_ref().map(timestamp::canonical).as_deref(),
            Some("2024-02-21T08:30:00.000Z")
        );
        assert!(campaign.created_at < campaign.updated_at);
    }
}
