use chrono::{DateTime, Local, Months, TimeZone, Utc};

use crate::{
    campaigns::{
        api::CampaignApi,
        format::{budget_input, local_day_in},
        state::{Epoch, LoadState, Ticket, ViewCell},
        types::{Campaign, CampaignId, CampaignPayload, CampaignStatus},
    },
    error::{ApiError, ViewError},
    routes::AppRoute,
};

use super::{FieldError, SubmitOutcome};

pub const LOAD_FAILED: &str = "Failed to fetch campaign data. Please try again later.";
pub const CREATE_FAILED: &str =
    "Failed to create campaign. Please check your inputs and try again.";
pub const UPDATE_FAILED: &str =
    "Failed to update campaign. Please check your inputs and try again.";

pub const NAME_REQUIRED: FieldError =
    FieldError::new("name", "Please provide a campaign name.");
pub const START_REQUIRED: FieldError =
    FieldError::new("start_date", "Please select a start date.");
pub const END_REQUIRED: FieldError = FieldError::new("end_date", "Please select an end date.");
pub const END_BEFORE_START: FieldError =
    FieldError::new("end_date", "The end date cannot be before the start date.");
pub const BUDGET_INVALID: FieldError =
    FieldError::new("budget", "Please provide a valid budget amount.");

/// Whether the form creates a new campaign or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

impl<Id> FormMode<Id> {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Values currently typed into the campaign form.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignFields {
    pub name: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub budget: String,
    pub status: CampaignStatus,
}

impl CampaignFields {
    /// Blank form starting `now` and ending one calendar month later.
    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        Self::defaults_in(now, &Local)
    }

    /// The month is added on the calendar of `zone`.
    pub fn defaults_in<Tz: TimeZone>(now: DateTime<Utc>, zone: &Tz) -> Self {
        let end_date = now
            .with_timezone(zone)
            .checked_add_months(Months::new(1))
            .map(|end| end.with_timezone(&Utc));
        Self {
            name: String::new(),
            description: String::new(),
            start_date: Some(now),
            end_date,
            budget: String::new(),
            status: CampaignStatus::Draft,
        }
    }

    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            name: campaign.name.clone(),
            description: campaign.description.clone().unwrap_or_default(),
            start_date: Some(campaign.start_date),
            end_date: Some(campaign.end_date),
            budget: budget_input(campaign.budget),
            status: campaign.status,
        }
    }

    /// Run the browser-style constraint checks and build the request body.
    pub fn validate(&self) -> Result<CampaignPayload, Vec<FieldError>> {
        self.validate_in(&Local)
    }

    /// Same checks, with start and end compared as calendar days in `zone`.
    pub fn validate_in<Tz: TimeZone>(&self, zone: &Tz) -> Result<CampaignPayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(NAME_REQUIRED);
        }
        if self.start_date.is_none() {
            errors.push(START_REQUIRED);
        }
        match (self.start_date, self.end_date) {
            (_, None) => errors.push(END_REQUIRED),
            (Some(start), Some(end)) if local_day_in(&end, zone) < local_day_in(&start, zone) => {
                errors.push(END_BEFORE_START)
            }
            _ => {}
        }
        let budget = parse_budget(&self.budget);
        if budget.is_none() {
            errors.push(BUDGET_INVALID);
        }

        match (self.start_date, self.end_date, budget) {
            (Some(start_date), Some(end_date), Some(budget)) if errors.is_empty() => {
                Ok(CampaignPayload {
                    name: self.name.clone(),
                    description: self.description.clone(),
                    start_date,
                    end_date,
                    budget,
                    status: self.status,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Non-negative number with at most cent precision, like `min="0" step="0.01"`.
fn parse_budget(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // Product error grows with magnitude, so the tolerance does too.
    let cents = value * 100.0;
    let tolerance = cents.abs().max(1.0) * f64::EPSILON * 4.0;
    ((cents - cents.round()).abs() <= tolerance).then_some(value)
}

/// State of the create/edit campaign page.
#[derive(Debug, Clone)]
pub struct CampaignFormView {
    mode: FormMode<CampaignId>,
    state: LoadState<CampaignFields>,
    validated: bool,
    errors: Vec<FieldError>,
    submit_error: Option<&'static str>,
    epoch: Epoch,
}

impl CampaignFormView {
    /// Create mode is usable straight away.
    pub fn create_at(now: DateTime<Utc>) -> Self {
        Self::with_state(FormMode::Create, LoadState::Ready(CampaignFields::defaults_at(now)))
    }

    /// Edit mode waits for the existing record.
    pub fn edit(id: CampaignId) -> Self {
        Self::with_state(FormMode::Edit(id), LoadState::Idle)
    }

    pub fn for_route(id: Option<CampaignId>, now: DateTime<Utc>) -> Self {
        match id {
            Some(id) => Self::edit(id),
            None => Self::create_at(now),
        }
    }

    fn with_state(mode: FormMode<CampaignId>, state: LoadState<CampaignFields>) -> Self {
        Self {
            mode,
            state,
            validated: false,
            errors: Vec::new(),
            submit_error: None,
            epoch: Epoch::default(),
        }
    }

    pub fn mode(&self) -> FormMode<CampaignId> {
        self.mode
    }

    pub fn state(&self) -> &LoadState<CampaignFields> {
        &self.state
    }

    pub fn fields(&self) -> Option<&CampaignFields> {
        self.state.ready()
    }

    /// Edit the typed values; a no-op until the form is loaded.
    pub fn edit_fields(&mut self, f: impl FnOnce(&mut CampaignFields)) {
        if let Some(fields) = self.state.ready_mut() {
            f(fields);
            if self.validated {
                self.errors = fields.validate().err().unwrap_or_default();
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
        if self.mode.is_edit() {
            "Edit Campaign"
        } else {
            "Create New Campaign"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.mode.is_edit() {
            "Update Campaign"
        } else {
            "Create Campaign"
        }
    }

    pub fn cancel_route(&self) -> AppRoute {
        match self.mode {
            FormMode::Create => AppRoute::CampaignList,
            FormMode::Edit(id) => AppRoute::CampaignDetail(id),
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.epoch.advance()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Campaign, ApiError>) -> bool {
        if !self.epoch.is_current(ticket) {
            log::debug!("discarding stale campaign form response");
            return false;
        }
        self.state = match result {
            Ok(campaign) => LoadState::Ready(CampaignFields::from_campaign(&campaign)),
            Err(err) => LoadState::Error(ViewError::from_load(&err, LOAD_FAILED)),
        };
        true
    }

    pub fn detach(&mut self) {
        self.epoch.advance();
    }

    /// Validate the typed values; on failure switch on validation feedback.
    pub fn prepare_submit(&mut self) -> Option<(FormMode<CampaignId>, CampaignPayload)> {
        let fields = self.state.ready()?;
        match fields.validate() {
            Ok(payload) => {
                self.errors.clear();
                Some((self.mode, payload))
            }
            Err(errors) => {
                self.validated = true;
                self.errors = errors;
                None
            }
        }
    }

    pub fn submit_failed(&mut self) {
        self.submit_error = Some(match self.mode {
            FormMode::Create => CREATE_FAILED,
            FormMode::Edit(_) => UPDATE_FAILED,
        });
    }
}

/// Pre-fill an edit form from the backend. Create mode has nothing to load.
pub async fn load<A, C>(api: &A, cell: &C)
where
    A: CampaignApi,
    C: ViewCell<CampaignFormView>,
{
    let Some(FormMode::Edit(id)) = cell.apply(|view| view.mode()) else {
        return;
    };
    let Some(ticket) = cell.apply(CampaignFormView::begin_load) else {
        return;
    };

    let result = api.get_campaign(id).await;
    if let Err(err) = &result {
        log::error!("error fetching campaign {id}: {err}");
    }
    cell.apply(|view| view.finish_load(ticket, result));
}

pub async fn submit<A, C>(api: &A, cell: &C) -> SubmitOutcome
where
    A: CampaignApi,
    C: ViewCell<CampaignFormView>,
{
    let Some((mode, payload)) = cell.apply(CampaignFormView::prepare_submit).flatten() else {
        return SubmitOutcome::Invalid;
    };

    let result = match mode {
        FormMode::Create => api.create_campaign(&payload).await,
        FormMode::Edit(id) => api.update_campaign(id, &payload).await,
    };

    match result {
        Ok(campaign) => {
            log::info!("saved campaign {}", campaign.id);
            SubmitOutcome::Saved(AppRoute::CampaignList)
        }
        Err(err) => {
            let action = if mode.is_edit() { "updating" } else { "creating" };
            log::error!("error {action} campaign: {err}");
            cell.apply(CampaignFormView::submit_failed);
            SubmitOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;

    use super::*;
    use crate::campaigns::{
        format::date_input_value_in,
        testkit::{Call, FakeBackend, Operation, sample_campaign},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap()
    }

    fn filled() -> CampaignFields {
        CampaignFields {
            name: "Summer Launch".into(),
            budget: "2500.50".into(),
            ..CampaignFields::defaults_at(now())
        }
    }

    #[test]
    fn defaults_span_one_calendar_month() {
        let fields = CampaignFields::defaults_in(now(), &Utc);
        assert_eq!(fields.start_date, Some(now()));
        assert_eq!(
            fields.end_date,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap())
        );
        assert_eq!(fields.status, CampaignStatus::Draft);
        assert!(fields.budget.is_empty());
    }

    #[test]
    fn validation_flags_each_missing_field() {
        let fields = CampaignFields {
            name: "   ".into(),
            start_date: None,
            end_date: None,
            budget: String::new(),
            ..CampaignFields::defaults_at(now())
        };
        let errors = fields.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![NAME_REQUIRED, START_REQUIRED, END_REQUIRED, BUDGET_INVALID]
        );
    }

    #[test]
    fn budget_must_be_non_negative_cents() {
        assert_eq!(parse_budget("0"), Some(0.0));
        assert_eq!(parse_budget("19.99"), Some(19.99));
        assert_eq!(parse_budget("-1"), None);
        assert_eq!(parse_budget("10.005"), None);
        assert_eq!(parse_budget("lots"), None);
        assert_eq!(parse_budget("NaN"), None);
    }

    #[test]
    fn large_budgets_keep_cent_precision() {
        assert_eq!(parse_budget("142322898.36"), Some(142322898.36));
        assert_eq!(parse_budget("999999999.99"), Some(999999999.99));
        assert_eq!(parse_budget(" 120000000.07 "), Some(120000000.07));
        assert_eq!(parse_budget("142322898.365"), None);
    }

    #[test]
    fn end_date_may_not_precede_start() {
        let fields = CampaignFields {
            end_date: Some(now() - chrono::Duration::days(1)),
            ..filled()
        };
        assert_eq!(fields.validate_in(&Utc).unwrap_err(), vec![END_BEFORE_START]);

        let same_day = CampaignFields {
            end_date: Some(now() - chrono::Duration::hours(1)),
            ..filled()
        };
        assert!(same_day.validate_in(&Utc).is_ok());
    }

    #[test]
    fn date_order_is_judged_by_the_viewer_calendar() {
        let plus_ten = chrono::FixedOffset::east_opt(10 * 3600).unwrap();
        // Both fall on May 10th at UTC+10 but on different UTC days.
        let fields = CampaignFields {
            start_date: Some(Utc.with_ymd_and_hms(2024, 5, 10, 1, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2024, 5, 9, 23, 0, 0).unwrap()),
            ..filled()
        };
        assert!(fields.validate_in(&plus_ten).is_ok());
        assert_eq!(fields.validate_in(&Utc).unwrap_err(), vec![END_BEFORE_START]);
    }

    #[test]
    fn defaults_start_on_the_viewer_today() {
        let plus_ten = chrono::FixedOffset::east_opt(10 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 9, 22, 0, 0).unwrap();
        let fields = CampaignFields::defaults_in(now, &plus_ten);
        let start = fields.start_date.expect("start defaults to now");
        assert_eq!(start, now);
        assert_eq!(date_input_value_in(&start, &plus_ten), "2024-05-10");
        assert_eq!(
            fields.end_date.map(|end| date_input_value_in(&end, &plus_ten)),
            Some("2024-06-10".to_string())
        );
    }

    #[test]
    fn valid_create_issues_one_call_and_returns_to_list() {
        let backend = FakeBackend::default();
        let cell = Rc::new(RefCell::new(CampaignFormView::create_at(now())));
        cell.borrow_mut().edit_fields(|fields| *fields = filled());

        let outcome = block_on(submit(&backend, &cell));

        assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::CampaignList));
        assert_eq!(backend.count(Operation::CreateCampaign), 1);
        let calls = backend.calls();
        let Call::CreateCampaign(payload) = &calls[0] else {
            panic!("expected create call");
        };
        assert_eq!(payload.budget, 2500.5);
        assert_eq!(payload.name, "Summer Launch");
    }

    #[test]
    fn invalid_submit_shows_feedback_without_network() {
        let backend = FakeBackend::default();
        let cell = Rc::new(RefCell::new(CampaignFormView::create_at(now())));

        let outcome = block_on(submit(&backend, &cell));

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(backend.calls().is_empty());
        let view = cell.borrow();
        assert!(view.validated());
        assert!(view.errors().contains(&NAME_REQUIRED));
    }

    #[test]
    fn feedback_refreshes_as_user_types() {
        let mut view = CampaignFormView::create_at(now());
        assert!(view.prepare_submit().is_none());
        assert!(view.errors().contains(&NAME_REQUIRED));

        view.edit_fields(|fields| fields.name = "Fixed".into());
        assert!(!view.errors().contains(&NAME_REQUIRED));
        assert!(view.errors().contains(&BUDGET_INVALID));
    }

    #[test]
    fn edit_prefills_from_fetched_record() {
        let backend = FakeBackend::default();
        let campaign = sample_campaign(5, "Spring Sale");
        backend.insert_campaign(campaign.clone());
        let cell = Rc::new(RefCell::new(CampaignFormView::edit(CampaignId(5))));
        assert!(cell.borrow().fields().is_none());

        block_on(load(&backend, &cell));

        let view = cell.borrow();
        let fields = view.fields().expect("loaded");
        assert_eq!(fields.name, campaign.name);
        assert_eq!(fields.description, campaign.description.clone().unwrap());
        assert_eq!(fields.start_date, Some(campaign.start_date));
        assert_eq!(fields.end_date, Some(campaign.end_date));
        assert_eq!(fields.budget, "1000");
        assert_eq!(fields.status, campaign.status);
    }

    #[test]
    fn unchanged_edit_round_trips_the_record() {
        let backend = FakeBackend::default();
        let campaign = sample_campaign(5, "Spring Sale");
        backend.insert_campaign(campaign.clone());
        let cell = Rc::new(RefCell::new(CampaignFormView::edit(CampaignId(5))));
        block_on(load(&backend, &cell));

        let outcome = block_on(submit(&backend, &cell));

        assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::CampaignList));
        let Some(Call::UpdateCampaign(id, payload)) = backend.calls().last().cloned() else {
            panic!("expected update call");
        };
        assert_eq!(id, CampaignId(5));
        assert_eq!(payload.start_date, campaign.start_date);
        assert_eq!(payload.end_date, campaign.end_date);
        assert_eq!(payload.budget, campaign.budget);
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["start_date"], "2024-03-01T00:00:00.000Z");
    }

    #[test]
    fn failed_update_keeps_values_and_reports() {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(5, "Spring Sale"));
        let cell = Rc::new(RefCell::new(CampaignFormView::edit(CampaignId(5))));
        block_on(load(&backend, &cell));
        cell.borrow_mut()
            .edit_fields(|fields| fields.name = "Renamed".into());
        backend.fail(Operation::UpdateCampaign, 400);

        let outcome = block_on(submit(&backend, &cell));

        assert_eq!(outcome, SubmitOutcome::Failed);
        let view = cell.borrow();
        assert_eq!(view.submit_error(), Some(UPDATE_FAILED));
        assert_eq!(view.fields().unwrap().name, "Renamed");
    }

    #[test]
    fn edit_load_failure_blocks_the_form() {
        let backend = FakeBackend::default();
        backend.insert_campaign(sample_campaign(5, "Spring Sale"));
        backend.fail(Operation::GetCampaign, 500);
        let cell = Rc::new(RefCell::new(CampaignFormView::edit(CampaignId(5))));
        block_on(load(&backend, &cell));

        assert_eq!(
            cell.borrow().state().error(),
            Some(&ViewError::LoadFailed(LOAD_FAILED))
        );
        assert_eq!(block_on(submit(&backend, &cell)), SubmitOutcome::Invalid);
        assert_eq!(backend.count(Operation::UpdateCampaign), 0);
    }

    #[test]
    fn labels_follow_mode() {
        let create = CampaignFormView::for_route(None, now());
        let edit = CampaignFormView::for_route(Some(CampaignId(3)), now());
        assert_eq!(create.title(), "Create New Campaign");
        assert_eq!(edit.submit_label(), "Update Campaign");
        assert_eq!(create.cancel_route(), AppRoute::CampaignList);
        assert_eq!(edit.cancel_route(), AppRoute::CampaignDetail(CampaignId(3)));
    }
}
