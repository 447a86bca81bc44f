use url::Url;

use crate::{
    campaigns::{
        api::CampaignApi,
        state::{Epoch, LoadState, Ticket, ViewCell},
        types::{Advertisement, AdvertisementId, AdvertisementPayload, Campaign, CampaignId},
    },
    error::ViewError,
    routes::AppRoute,
};

use super::{FieldError, SubmitOutcome};

pub const LOAD_FAILED: &str = "Failed to fetch data. Please try again later.";
pub const ADVERTISEMENT_NOT_FOUND: &str = "Advertisement not found";
pub const CREATE_FAILED: &str =
    "Failed to create advertisement. Please check your inputs and try again.";
pub const UPDATE_FAILED: &str =
    "Failed to update advertisement. Please check your inputs and try again.";

pub const TITLE_REQUIRED: FieldError = FieldError::new("title", "Please provide a title.");
pub const IMAGE_URL_INVALID: FieldError =
    FieldError::new("image_url", "Please provide a valid image URL.");

/// Which advertisement the form works on, decided by the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertisementTarget {
    /// New advertisement under the campaign named in the path.
    Create(CampaignId),
    Edit(AdvertisementId),
}

impl AdvertisementTarget {
    /// An advertisement id in the path means edit mode.
    pub fn from_route(id: Option<AdvertisementId>, campaign_id: Option<CampaignId>) -> Option<Self> {
        match (id, campaign_id) {
            (Some(id), _) => Some(AdvertisementTarget::Edit(id)),
            (None, Some(campaign_id)) => Some(AdvertisementTarget::Create(campaign_id)),
            (None, None) => None,
        }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, AdvertisementTarget::Edit(_))
    }
}

/// Values currently typed into the advertisement form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdvertisementFields {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub target_audience: String,
}

impl AdvertisementFields {
    pub fn from_advertisement(ad: &Advertisement) -> Self {
        Self {
            title: ad.title.clone(),
            content: ad.content.clone().unwrap_or_default(),
            image_url: ad.image_url.clone().unwrap_or_default(),
            target_audience: ad.target_audience.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<AdvertisementPayload, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(TITLE_REQUIRED);
        }
        let image_url = self.image_url.trim();
        if !image_url.is_empty() && Url::parse(image_url).is_err() {
            errors.push(IMAGE_URL_INVALID);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(AdvertisementPayload {
            title: self.title.clone(),
            content: self.content.clone(),
            image_url: image_url.to_string(),
            target_audience: self.target_audience.clone(),
        })
    }
}

/// Loaded form: the owning campaign (shown by name) and the editable values.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvertisementDraft {
    pub campaign: Campaign,
    pub fields: AdvertisementFields,
}

/// State of the create/edit advertisement page.
#[derive(Debug, Clone)]
pub struct AdvertisementFormView {
    target: AdvertisementTarget,
    state: LoadState<AdvertisementDraft>,
    validated: bool,
    errors: Vec<FieldError>,
    submit_error: Option<&'static str>,
    epoch: Epoch,
}

impl AdvertisementFormView {
    /// Both modes wait for the owning campaign before anything can be submitted.
    pub fn new(target: AdvertisementTarget) -> Self {
        Self {
            target,
            state: LoadState::Idle,
            validated: false,
            errors: Vec::new(),
            submit_error: None,
            epoch: Epoch::default(),
        }
    }

    pub fn target(&self) -> AdvertisementTarget {
        self.target
    }

    pub fn state(&self) -> &LoadState<AdvertisementDraft> {
        &self.state
    }

    pub fn draft(&self) -> Option<&AdvertisementDraft> {
        self.state.ready()
    }

    pub fn edit_fields(&mut self, f: impl FnOnce(&mut AdvertisementFields)) {
        if let Some(draft) = self.state.ready_mut() {
            f(&mut draft.fields);
            if self.validated {
                self.errors = draft.fields.validate().err().unwrap_or_default();
            }
        }
    }

    pub fn validated(&self) -> bool {
        self.validated
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&'static str> {
        self.submit_error
    }

    pub fn title(&self) -> &'static str {
        if self.target.is_edit() {
            "Edit Advertisement"
        } else {
            "Create New Advertisement"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.target.is_edit() {
            "Update Advertisement"
        } else {
            "Create Advertisement"
        }
    }

    /// The owning campaign's advertisement list, once it is known.
    pub fn list_route(&self) -> Option<AppRoute> {
        match (self.target, self.state.ready()) {
            (AdvertisementTarget::Create(campaign_id), _) => {
                Some(AppRoute::Advertisements(campaign_id))
            }
            (AdvertisementTarget::Edit(_), Some(draft)) => {
                Some(AppRoute::Advertisements(draft.campaign.id))
            }
            (AdvertisementTarget::Edit(_), None) => None,
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.epoch.advance()
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<AdvertisementDraft, ViewError>,
    ) -> bool {
        if !self.epoch.is_current(ticket) {
            log::debug!("discarding stale advertisement form response");
            return false;
        }
        self.state = match result {
            Ok(draft) => LoadState::Ready(draft),
            Err(err) => LoadState::Error(err),
        };
        true
    }

    pub fn detach(&mut self) {
        self.epoch.advance();
    }

    /// Validate; returns the target, body and owning campaign when it can be sent.
    pub fn prepare_submit(
        &mut self,
    ) -> Option<(AdvertisementTarget, AdvertisementPayload, CampaignId)> {
        let draft = self.state.ready()?;
        match draft.fields.validate() {
            Ok(payload) => {
                self.errors.clear();
                Some((self.target, payload, draft.campaign.id))
            }
            Err(errors) => {
                self.validated = true;
                self.errors = errors;
                None
            }
        }
    }

    pub fn submit_failed(&mut self) {
        self.submit_error = Some(if self.target.is_edit() {
            UPDATE_FAILED
        } else {
            CREATE_FAILED
        });
    }
}

/// Load the owning campaign, and in edit mode the advertisement before it.
pub async fn load<A, C>(api: &A, cell: &C)
where
    A: CampaignApi,
    C: ViewCell<AdvertisementFormView>,
{
    let Some((ticket, target)) = cell.apply(|view| (view.begin_load(), view.target())) else {
        return;
    };

    let result = match target {
        AdvertisementTarget::Create(campaign_id) => api
            .get_campaign(campaign_id)
            .await
            .map(|campaign| AdvertisementDraft {
                campaign,
                fields: AdvertisementFields::default(),
            })
            .map_err(|err| {
                log::error!("error fetching campaign {campaign_id}: {err}");
                ViewError::from_load(&err, LOAD_FAILED)
            }),
        AdvertisementTarget::Edit(id) => load_for_edit(api, id).await,
    };
    cell.apply(|view| view.finish_load(ticket, result));
}

async fn load_for_edit<A: CampaignApi>(
    api: &A,
    id: AdvertisementId,
) -> Result<AdvertisementDraft, ViewError> {
    let ad = api.get_advertisement(id).await.map_err(|err| {
        log::error!("error fetching advertisement {id}: {err}");
        if err.is_not_found() {
            ViewError::LoadFailed(ADVERTISEMENT_NOT_FOUND)
        } else {
            ViewError::LoadFailed(LOAD_FAILED)
        }
    })?;
    let campaign = api.get_campaign(ad.campaign_id).await.map_err(|err| {
        log::error!("error fetching campaign {}: {err}", ad.campaign_id);
        ViewError::from_load(&err, LOAD_FAILED)
    })?;

    Ok(AdvertisementDraft {
        campaign,
        fields: AdvertisementFields::from_advertisement(&ad),
    })
}

pub async fn submit<A, C>(api: &A, cell: &C) -> SubmitOutcome
where
    A: CampaignApi,
    C: ViewCell<AdvertisementFormView>,
{
    let Some((target, payload, campaign_id)) =
        cell.apply(AdvertisementFormView::prepare_submit).flatten()
    else {
        return SubmitOutcome::Invalid;
    };

    let result = match target {
        AdvertisementTarget::Create(path_campaign) => {
            api.create_advertisement(path_campaign, &payload).await
        }
        AdvertisementTarget::Edit(id) => api.update_advertisement(id, &payload).await,
    };

    match result {
        Ok(ad) => {
            log::info!("saved advertisement {} for campaign {campaign_id}", ad.id);
            SubmitOutcome::Saved(AppRoute::Advertisements(campaign_id))
        }
        Err(err) => {
            let action = if target.is_edit() { "updating" } else { "creating" };
            log::error!("error {action} advertisement: {err}");
            cell.apply(AdvertisementFormView::submit_failed);
            SubmitOutcome::Failed
        }
    }
}
