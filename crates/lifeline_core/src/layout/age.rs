//! Age-at-event arithmetic.

use chrono::{Datelike, NaiveDate};

/// Whole years from `first` to `date`, floored.
///
/// One year is only counted once the month/day anniversary of `first` has
/// been reached.
pub fn age_at(date: NaiveDate, first: NaiveDate) -> i32 {
    let age = date.year() - first.year();
    if (date.month(), date.day()) < (first.month(), first.day()) {
        return age - 1;
    }
    age
}
