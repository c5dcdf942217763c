/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Utc};

/// Format a timestamp as DD.MM.YYYY HH:MM
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

/// Format a timestamp as DD.MM.YYYY
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let value = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&value), "15.03.2024 14:02");
        assert_eq!(format_date(&value), "15.03.2024");
    }
}
