use super::util::{first_of_month, iso_date, iter_days_from, last_of_month, DAYS_IN_WEEK};
use crate::markers::MarkerSet;
use thiserror::Error;
use time::{Date, Duration};

/// A single classified day of a month grid
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    /// Day of the month, zero-padded to two digits
    pub(crate) day_label: String,
    pub(crate) iso_date: String,
    pub(crate) is_today: bool,
    pub(crate) has_offer: bool,
    pub(crate) has_order: bool,
    /// `false` for the lead-in and lead-out days of the adjacent months
    pub(crate) in_displayed_month: bool,
}

/// Seven consecutive days, Monday through Sunday
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Week([DayCell; DAYS_IN_WEEK]);

impl Week {
    pub(crate) fn days(&self) -> &[DayCell] {
        &self.0
    }
}

impl TryFrom<Vec<DayCell>> for Week {
    type Error = OutOfTimeError;

    fn try_from(days: Vec<DayCell>) -> Result<Week, OutOfTimeError> {
        // A short week can only come from running into the end of time
        days.try_into().map(Week).map_err(|_| OutOfTimeError)
    }
}

/// The full set of weeks covering one month, including the days of adjacent
/// months needed to fill out the first and last weeks
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month_start: Date,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub(crate) fn month_start(&self) -> Date {
        self.month_start
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(Week::days)
    }

    pub(crate) fn cell(&self, date: Date) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

/// Build the grid for the month containing `reference`.
///
/// The grid starts on the Monday on or before the first of the month and ends
/// on the Sunday on or after the last of the month.  Each day is classified
/// against `today` and `markers`.
pub(crate) fn build_month_grid(
    reference: Date,
    today: Date,
    markers: &MarkerSet,
) -> Result<MonthGrid, OutOfTimeError> {
    let month_start = first_of_month(reference);
    let month_end = last_of_month(reference);
    let lead_in = month_start.weekday().number_days_from_monday();
    let lead_out = 6 - month_end.weekday().number_days_from_monday();
    let grid_start = month_start
        .checked_sub(Duration::days(lead_in.into()))
        .ok_or(OutOfTimeError)?;
    let grid_end = month_end
        .checked_add(Duration::days(lead_out.into()))
        .ok_or(OutOfTimeError)?;
    let mut cells = iter_days_from(grid_start)
        .take_while(|&d| d <= grid_end)
        .map(|d| classify(d, month_start, today, markers));
    let mut weeks = Vec::new();
    loop {
        let days = cells.by_ref().take(DAYS_IN_WEEK).collect::<Vec<_>>();
        if days.is_empty() {
            break;
        }
        weeks.push(Week::try_from(days)?);
    }
    Ok(MonthGrid { month_start, weeks })
}

fn classify(date: Date, month_start: Date, today: Date, markers: &MarkerSet) -> DayCell {
    let iso_date = iso_date(date);
    DayCell {
        date,
        day_label: format!("{:02}", date.day()),
        is_today: date == today,
        has_offer: markers.has_offer(&iso_date),
        has_order: markers.has_order(&iso_date),
        in_displayed_month: (date.year(), date.month()) == (month_start.year(), month_start.month()),
        iso_date,
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::{Month, Weekday};

    fn grid(reference: Date) -> MonthGrid {
        build_month_grid(reference, date!(2024 - 02 - 14), &MarkerSet::default()).unwrap()
    }

    #[test]
    fn test_february_2024() {
        let g = grid(date!(2024 - 02 - 01));
        let days = g.days().collect::<Vec<_>>();
        assert_eq!(days.len(), 35);
        assert_eq!(days[0].date, date!(2024 - 01 - 29));
        assert_eq!(days[34].date, date!(2024 - 03 - 03));
        assert_eq!(g.weeks().len(), 5);
        assert_eq!(g.month_start(), date!(2024 - 02 - 01));
    }

    #[test]
    fn test_june_2024() {
        let g = grid(date!(2024 - 06 - 01));
        let days = g.days().collect::<Vec<_>>();
        assert_eq!(days.len(), 35);
        assert_eq!(days[0].date, date!(2024 - 05 - 27));
        assert_eq!(days[34].date, date!(2024 - 06 - 30));
    }

    #[test]
    fn test_month_starting_monday_and_ending_sunday() {
        // February 2021 is exactly four weeks
        let g = grid(date!(2021 - 02 - 10));
        let days = g.days().collect::<Vec<_>>();
        assert_eq!(days.len(), 28);
        assert_eq!(days[0].date, date!(2021 - 02 - 01));
        assert_eq!(days[27].date, date!(2021 - 02 - 28));
        assert!(days.iter().all(|c| c.in_displayed_month));
    }

    #[test]
    fn test_six_week_month() {
        // September 2024 starts on a Sunday and ends on a Monday
        let g = grid(date!(2024 - 09 - 30));
        let days = g.days().collect::<Vec<_>>();
        assert_eq!(days.len(), 42);
        assert_eq!(days[0].date, date!(2024 - 08 - 26));
        assert_eq!(days[41].date, date!(2024 - 10 - 06));
    }

    #[test]
    fn test_grid_shape_for_every_month() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for m in 1..=12u8 {
                let month = Month::try_from(m).unwrap();
                let reference = Date::from_calendar_date(year, month, 15).unwrap();
                let g = grid(reference);
                let days = g.days().collect::<Vec<_>>();
                assert_eq!(days.len() % 7, 0, "{year}-{m:02}");
                assert!((28..=42).contains(&days.len()), "{year}-{m:02}");
                assert_eq!(days[0].date.weekday(), Weekday::Monday);
                assert_eq!(days[days.len() - 1].date.weekday(), Weekday::Sunday);
                assert!(g.weeks().iter().all(|w| w.days().len() == 7));
                let in_month = days
                    .iter()
                    .filter(|c| c.in_displayed_month)
                    .map(|c| c.date)
                    .collect::<Vec<_>>();
                let month_end = last_of_month(g.month_start());
                let expected = iter_days_from(g.month_start())
                    .take_while(|&d| d <= month_end)
                    .collect::<Vec<_>>();
                assert_eq!(in_month, expected, "{year}-{m:02}");
                for c in days.iter().filter(|c| !c.in_displayed_month) {
                    assert_ne!(c.date.month(), month);
                }
            }
        }
    }

    #[test]
    fn test_days_are_consecutive() {
        let g = grid(date!(2024 - 03 - 01));
        let days = g.days().map(|c| c.date).collect::<Vec<_>>();
        for pair in days.windows(2) {
            assert_eq!(pair[0].next_day(), Some(pair[1]));
        }
    }

    #[test]
    fn test_classification() {
        let markers = MarkerSet::new(["2024-02-14", "2024-02-20", "2024-03-01"], ["2024-02-20"]);
        let g = build_month_grid(date!(2024 - 02 - 01), date!(2024 - 02 - 14), &markers).unwrap();

        let valentine = g.cell(date!(2024 - 02 - 14)).unwrap();
        assert_eq!(
            valentine,
            &DayCell {
                date: date!(2024 - 02 - 14),
                day_label: String::from("14"),
                iso_date: String::from("2024-02-14"),
                is_today: true,
                has_offer: true,
                has_order: false,
                in_displayed_month: true,
            }
        );

        let ordered = g.cell(date!(2024 - 02 - 20)).unwrap();
        assert!(ordered.has_offer);
        assert!(ordered.has_order);
        assert!(!ordered.is_today);

        let lead_out = g.cell(date!(2024 - 03 - 01)).unwrap();
        assert!(lead_out.has_offer);
        assert!(!lead_out.in_displayed_month);
        assert_eq!(lead_out.day_label, "01");

        let plain = g.cell(date!(2024 - 02 - 05)).unwrap();
        assert!(!plain.has_offer);
        assert!(!plain.has_order);
        assert_eq!(plain.day_label, "05");
        assert_eq!(plain.iso_date, "2024-02-05");

        assert_eq!(g.days().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_today_outside_grid() {
        let g = build_month_grid(
            date!(2024 - 02 - 01),
            date!(2030 - 01 - 01),
            &MarkerSet::default(),
        )
        .unwrap();
        assert!(g.days().all(|c| !c.is_today));
    }

    #[test]
    fn test_displayed_month_independent_of_reference_day() {
        let a = grid(date!(2024 - 02 - 01));
        let b = grid(date!(2024 - 02 - 29));
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let markers = MarkerSet::new(["2024-02-14"], ["2024-02-15"]);
        let a = build_month_grid(date!(2024 - 02 - 10), date!(2024 - 02 - 14), &markers).unwrap();
        let b = build_month_grid(date!(2024 - 02 - 10), date!(2024 - 02 - 14), &markers).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_year_boundary() {
        let g = grid(date!(2025 - 01 - 22));
        let days = g.days().collect::<Vec<_>>();
        assert_eq!(days[0].date, date!(2024 - 12 - 30));
        assert_eq!(days[0].iso_date, "2024-12-30");
        assert!(!days[0].in_displayed_month);
        assert_eq!(days[days.len() - 1].date, date!(2025 - 02 - 02));
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(
            build_month_grid(Date::MAX, Date::MAX, &MarkerSet::default()),
            Err(OutOfTimeError)
        );
    }
}
