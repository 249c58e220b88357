//! Weekly availability: time-of-day encoding, validation of the weekly
//! form, and the query/update operations over the store.

pub mod encoding;
pub mod form;
pub mod service;
pub mod validation;

pub use encoding::minutes_to_time_string;
pub use service::{get_availability, load_form, set_availability, UpdatedAvailability};
pub use validation::{validate_form_intervals, FormInterval, TimeInterval, ValidationFailure};
