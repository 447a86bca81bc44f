pub mod api;
pub mod confirm;
pub mod format;
pub mod state;
pub mod testkit;
pub mod types;
