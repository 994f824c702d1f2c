use chrono::{Datelike, Local};

// chrono formatting reference:
// https://docs.rs/chrono/0.4.19/chrono/format/strftime/index.html
// The comments file has always used plain ISO dates.
pub const DATE_FORMAT_ISO: &'static str = "%Y-%m-%d";

pub fn current_date_string() -> String {
  Local::now().format(DATE_FORMAT_ISO).to_string()
}

pub fn current_timestamp() -> i64 {
  Local::now().timestamp()
}

// For the copyright notice in the footer.
pub fn current_year() -> i32 {
  Local::now().year()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[test]
  fn current_date_is_iso_formatted() {
    let date = current_date_string();
    assert_eq!(10, date.len());
    assert!(NaiveDate::parse_from_str(&date, DATE_FORMAT_ISO).is_ok());
  }

  #[test]
  fn current_year_matches_current_date() {
    let year = current_year().to_string();
    assert!(current_date_string().starts_with(&year));
  }
}
