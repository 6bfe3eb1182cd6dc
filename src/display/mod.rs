//! Display helpers shared with the presentation layer
//!
//! Currency formatting lives on [`crate::models::Money`]; this module covers
//! the date conversions forms need.

pub mod date;

pub use date::{
    format_date_for_input, format_month_year, format_month_year_of, month_name,
    parse_date_from_input, parse_iso_date,
};
