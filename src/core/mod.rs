pub mod dates;
pub mod error;

pub use dates::{parse_iso_date, DateRange};
pub use error::{AppError, Result};
