//! Utility modules for the envelope codec.

pub mod clock;
pub mod datetime;

pub use clock::{Clock, FixedClock, SystemClock, UtcClock};
pub use datetime::{
    format_date_ccyymmdd, format_date_yymmdd, format_time_hhmm, parse_date_ccyymmdd,
    parse_date_yymmdd, parse_time,
};
