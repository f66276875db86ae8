pub mod auth;
pub mod calendar;
pub mod categories;
pub mod event;
pub mod events;
pub mod notes;
pub mod profile;
pub mod reset;

use ajanda_core::ValidationError;
use ajanda_core::model::wire;
use anyhow::Result;
use chrono::{Local, NaiveDate};

pub use crate::utils::tui::create_spinner;

/// `YYYY-MM-DD`, or `today`.
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }

    wire::parse_date(input).ok_or_else(|| ValidationError::InvalidDate(input.to_string()).into())
}

pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    input.map(parse_date_arg).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dates_and_today() {
        assert_eq!(
            parse_date_arg("2024-03-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(parse_date_arg(" Today ").unwrap(), Local::now().date_naive());
    }

    #[test]
    fn bad_dates_name_the_input() {
        let err = parse_date_arg("10/03/2024").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date '10/03/2024'. Expected YYYY-MM-DD");
    }

    #[test]
    fn missing_optional_date_is_none() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert!(parse_optional_date(Some("nope")).is_err());
    }
}
