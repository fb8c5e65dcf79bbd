use super::YMD_FMT;
use std::iter::successors;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Column of the weekday in a Monday-first week
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_monday().into()
    }
}

/// Iterate over `date` and every day after it, stopping at the end of time
pub(super) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

pub(super) fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

pub(super) fn last_of_month(date: Date) -> Date {
    date.replace_day(date.month().length(date.year()))
        .expect("the length of a month should be a valid day of it")
}

/// Move `date` one month forwards or backwards, clamping the day of the month
/// to the length of the target month.  Returns `None` at the ends of time.
pub(super) fn shift_month(date: Date, forwards: bool) -> Option<Date> {
    let (year, month) = match (forwards, date.month()) {
        (true, Month::December) => (date.year().checked_add(1)?, Month::January),
        (true, m) => (date.year(), m.next()),
        (false, Month::January) => (date.year().checked_sub(1)?, Month::December),
        (false, m) => (date.year(), m.previous()),
    };
    Date::from_calendar_date(year, month, date.day().min(month.length(year))).ok()
}

/// Format a date as `YYYY-MM-DD`, the form used for day markers and order
/// requests
pub(crate) fn iso_date(date: Date) -> String {
    date.format(&YMD_FMT)
        .expect("formatting a Date as YYYY-MM-DD should not fail")
}

/// Format a date as, e.g., "October 21, 2026"
pub(crate) fn long_date(date: Date) -> String {
    format!("{} {}, {}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_first_and_last_of_month() {
        assert_eq!(first_of_month(date!(2024 - 02 - 14)), date!(2024 - 02 - 01));
        assert_eq!(last_of_month(date!(2024 - 02 - 14)), date!(2024 - 02 - 29));
        assert_eq!(last_of_month(date!(2023 - 02 - 01)), date!(2023 - 02 - 28));
        assert_eq!(first_of_month(date!(2024 - 12 - 01)), date!(2024 - 12 - 01));
        assert_eq!(last_of_month(date!(2024 - 12 - 31)), date!(2024 - 12 - 31));
        assert_eq!(last_of_month(date!(1900 - 02 - 03)), date!(1900 - 02 - 28));
        assert_eq!(last_of_month(date!(2000 - 02 - 03)), date!(2000 - 02 - 29));
        assert_eq!(last_of_month(Date::MAX), Date::MAX);
        assert_eq!(first_of_month(Date::MIN), Date::MIN);
    }

    #[test]
    fn test_shift_month_clamps_day() {
        assert_eq!(
            shift_month(date!(2024 - 01 - 31), true),
            Some(date!(2024 - 02 - 29))
        );
        assert_eq!(
            shift_month(date!(2024 - 03 - 31), false),
            Some(date!(2024 - 02 - 29))
        );
        assert_eq!(
            shift_month(date!(2024 - 12 - 15), true),
            Some(date!(2025 - 01 - 15))
        );
        assert_eq!(
            shift_month(date!(2025 - 01 - 15), false),
            Some(date!(2024 - 12 - 15))
        );
    }

    #[test]
    fn test_shift_month_at_end_of_time() {
        assert_eq!(shift_month(Date::MAX, true), None);
        assert_eq!(shift_month(Date::MIN, false), None);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(iso_date(date!(2024 - 02 - 01)), "2024-02-01");
        assert_eq!(iso_date(date!(0987 - 11 - 30)), "0987-11-30");
        assert_eq!(long_date(date!(2026 - 10 - 21)), "October 21, 2026");
    }

    #[test]
    fn test_iso_date_parses_back() {
        for date in [date!(2024 - 02 - 29), date!(0987 - 11 - 30), Date::MAX] {
            assert_eq!(Date::parse(&iso_date(date), &YMD_FMT).unwrap(), date);
        }
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(Weekday::Monday.index0(), 0);
        assert_eq!(Weekday::Sunday.index0(), 6);
    }
}
