//! The quote wizard as the site runs it: a strictly linear five-step flow
//! with per-step gates, an incrementally saved draft, and photo intake.
//! The backend half of the contract lives in `service::quote_service`; the
//! validation rules are the same `util::validation` functions on both sides.

pub mod draft;
pub mod images;
pub mod machine;
pub mod steps;
