pub mod date;

pub use date::{format_date, format_date_time, format_duration_secs, format_relative, parse_date};
