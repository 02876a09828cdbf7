use chrono::{Datelike, NaiveDate, Timelike};

use super::Timestamp;

/// `2025.03.07`
pub fn dot_date(ts: &Timestamp) -> String {
    ts.format("%Y.%m.%d").to_string()
}

pub fn dot_naive_date(date: &NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

/// `2025년 3월 7일 9:05`
pub fn long_datetime(ts: &Timestamp) -> String {
    format!(
        "{}년 {}월 {}일 {}:{:02}",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute()
    )
}
