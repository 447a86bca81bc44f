//! Per-screen controllers.
//!
//! Each controller is a plain state machine plus a couple of async functions
//! that drive it through the [`CampaignApi`](crate::campaigns::api::CampaignApi)
//! facade. Pages keep the controller in a signal; tests keep it in a `RefCell`.

pub mod advertisement_form;
pub mod advertisement_list;
pub mod campaign_detail;
pub mod campaign_form;
pub mod campaign_list;

use crate::routes::AppRoute;

/// Result of a confirm-then-delete interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Deleted,
    Failed,
}

/// Result of pressing a form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed or the form was not ready; nothing was sent.
    Invalid,
    /// Saved; the page should move to the given route.
    Saved(AppRoute),
    Failed,
}

/// Client-side validation message attached to one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Look up the message for `field`, if validation flagged it.
pub fn field_message(errors: &[FieldError], field: &str) -> Option<&'static str> {
    errors
        .iter()
        .find(|error| error.field == field)
        .map(|error| error.message)
}
