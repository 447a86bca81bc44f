use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use super::types::{Campaign, CampaignStatus};

/// Currency display used on cards and the detail view, always two decimals.
///
/// Halves round away from zero, so `1000.125` shows as `$1000.13`.
pub fn format_budget(budget: f64) -> String {
    let rounded = (budget * 100.0).round() / 100.0;
    format!("${rounded:.2}")
}

/// Text placed in the budget input when editing an existing campaign.
pub fn budget_input(budget: f64) -> String {
    budget.to_string()
}

// Timestamps travel as UTC; everything the user sees or picks is in the
// browser's zone. The `_in` variants take the zone explicitly.

/// Calendar day of `value` as seen in `zone`.
pub fn local_day_in<Tz: TimeZone>(value: &DateTime<Utc>, zone: &Tz) -> NaiveDate {
    value.with_timezone(zone).date_naive()
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    format_date_in(value, &Local)
}

pub fn format_date_in<Tz: TimeZone>(value: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: Display,
{
    value.with_timezone(zone).format("%-m/%-d/%Y").to_string()
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    format_datetime_in(value, &Local)
}

pub fn format_datetime_in<Tz: TimeZone>(value: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: Display,
{
    value
        .with_timezone(zone)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

pub fn format_period(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format_period_in(start, end, &Local)
}

pub fn format_period_in<Tz: TimeZone>(start: &DateTime<Utc>, end: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: Display,
{
    format!("{} - {}", format_date_in(start, zone), format_date_in(end, zone))
}

/// Value for an `<input type="date">`.
pub fn date_input_value(value: &DateTime<Utc>) -> String {
    date_input_value_in(value, &Local)
}

pub fn date_input_value_in<Tz: TimeZone>(value: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: Display,
{
    value.with_timezone(zone).format("%Y-%m-%d").to_string()
}

/// Apply a date picked in a date input, keeping the time of day already held.
pub fn apply_date_input(current: Option<DateTime<Utc>>, raw: &str) -> Option<DateTime<Utc>> {
    apply_date_input_in(current, raw, &Local)
}

/// The picked day and the kept time of day are both read in `zone`.
pub fn apply_date_input_in<Tz: TimeZone>(
    current: Option<DateTime<Utc>>,
    raw: &str,
    zone: &Tz,
) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;
    let time = current
        .map(|value| value.with_timezone(zone).time())
        .or_else(|| NaiveTime::from_hms_opt(0, 0, 0))?;
    zone.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|value| value.with_timezone(&Utc))
}

pub fn status_badge_class(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Active => "status-active",
        CampaignStatus::Paused => "status-paused",
        CampaignStatus::Completed => "status-completed",
        CampaignStatus::Draft => "status-draft",
    }
}

/// Display strings derived from a campaign, rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDisplay {
    pub name: String,
    pub description: Option<String>,
    pub status: &'static str,
    pub status_class: &'static str,
    pub budget: String,
    pub start: String,
    pub end: String,
    pub period: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl CampaignDisplay {
    pub fn of(campaign: &Campaign) -> Self {
        Self::in_zone(campaign, &Local)
    }

    pub fn in_zone<Tz: TimeZone>(campaign: &Campaign, zone: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            name: campaign.name.clone(),
            description: campaign
                .description
                .clone()
                .filter(|description| !description.is_empty()),
            status: campaign.status.as_str(),
            status_class: status_badge_class(campaign.status),
            budget: format_budget(campaign.budget),
            start: format_date_in(&campaign.start_date, zone),
            end: format_date_in(&campaign.end_date, zone),
            period: format_period_in(&campaign.start_date, &campaign.end_date, zone),
            created: campaign
                .created_at
                .as_ref()
                .map(|value| format_datetime_in(value, zone)),
            updated: campaign
                .updated_at
                .as_ref()
                .map(|value| format_datetime_in(value, zone)),
        }
    }
}
