//! Explicit calendar arithmetic used by the next-occurrence calculator.
use crate::field::FieldValueType;
use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: FieldValueType) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: FieldValueType, month: FieldValueType) -> FieldValueType {
    if month == 0 || month > 12 {
        panic!("Invalid month: {month}");
    }

    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!(),
    }
}

/// Calculates day of week for specified date, `0` is Sunday.
pub(crate) fn day_of_week(year: FieldValueType, month: FieldValueType, day: FieldValueType) -> FieldValueType {
    if day == 0 || month == 0 || month > 12 || day > days_in_month(year, month) {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }

    let month_offset: FieldValueType = if is_leap_year(year) {
        [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
    } else {
        [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
    }[(month - 1) as usize];

    let year = year - 1;

    (day + month_offset + 5 * (year % 4) + 4 * (year % 100) + 6 * (year % 400)) % 7
}

/// Mutable candidate timestamp of the calculator, minute granularity.
///
/// Components are kept as plain numbers so every stage can set or carry a single
/// unit without the normalization a rich date type would force on it. The `day`
/// component may temporarily exceed the length of the current month when a
/// configured day-of-month value doesn't exist in it; such a value rolls forward
/// into the following month on [`normalized`](Candidate::normalized).
///
/// Field declaration order matters: derived ordering compares year first,
/// minute last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Candidate {
    pub(crate) year: FieldValueType,
    pub(crate) month: FieldValueType,
    pub(crate) day: FieldValueType,
    pub(crate) hour: FieldValueType,
    pub(crate) minute: FieldValueType,
}

impl Candidate {
    /// Captures the minute-granularity components of `value`, truncating seconds.
    pub(crate) fn from_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        Self {
            year: value.year() as FieldValueType,
            month: value.month() as FieldValueType,
            day: value.day() as FieldValueType,
            hour: value.hour() as FieldValueType,
            minute: value.minute() as FieldValueType,
        }
    }

    /// Advances the candidate by one minute with full carry through coarser units.
    pub(crate) fn bump_minute(&mut self) {
        if self.minute < 59 {
            self.minute += 1;
        } else {
            self.minute = 0;
            self.bump_hour();
        }
    }

    /// Advances the candidate by one hour with full carry through coarser units.
    pub(crate) fn bump_hour(&mut self) {
        if self.hour < 23 {
            self.hour += 1;
        } else {
            self.hour = 0;
            self.bump_day();
        }
    }

    /// Advances the candidate by one day with full carry through coarser units.
    pub(crate) fn bump_day(&mut self) {
        if self.day < days_in_month(self.year, self.month) {
            self.day += 1;
        } else {
            self.day = 1;
            self.bump_month();
        }
    }

    /// Advances the candidate by one month, carrying into the year.
    pub(crate) fn bump_month(&mut self) {
        if self.month < 12 {
            self.month += 1;
        } else {
            self.month = 1;
            self.year += 1;
        }
    }

    /// Advances the candidate by the given number of whole days.
    pub(crate) fn advance_days(&mut self, days: FieldValueType) {
        *self = self.normalized();
        for _ in 0..days {
            self.bump_day();
        }
    }

    /// Day of week of the candidate's date, `0` is Sunday.
    pub(crate) fn weekday(&self) -> FieldValueType {
        let normalized = self.normalized();
        day_of_week(normalized.year, normalized.month, normalized.day)
    }

    /// Rolls a day value that doesn't exist in the current month forward into
    /// the following month.
    pub(crate) fn normalized(&self) -> Self {
        let mut candidate = *self;
        let mut month_days = days_in_month(candidate.year, candidate.month);

        while candidate.day > month_days {
            candidate.day -= month_days;
            candidate.bump_month();
            month_days = days_in_month(candidate.year, candidate.month);
        }

        candidate
    }

    /// Materializes the candidate in the given timezone, seconds set to zero.
    pub(crate) fn into_datetime<Tz: TimeZone>(self, tz: &Tz) -> DateTime<Tz> {
        let candidate = self.normalized();
        tz.with_ymd_and_hms(
            candidate.year as i32,
            candidate.month as u32,
            candidate.day as u32,
            candidate.hour as u32,
            candidate.minute as u32,
            0,
        )
        .unwrap()
    }
}
