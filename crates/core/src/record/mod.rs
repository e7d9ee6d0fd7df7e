//! Sales records and their validation.

pub mod error;
pub mod types;
pub mod validation;

pub use error::RecordError;
pub use types::{NewSalesRecord, SalesRecord, parse_calendar_date};
pub use validation::{MAX_AMOUNT, validate_new_record};
