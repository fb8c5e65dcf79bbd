use super::grid::{build_month_grid, DayCell, MonthGrid, OutOfTimeError};
use super::util::{iso_date, shift_month};
use crate::markers::MarkerSet;
use crate::order::{OrderError, OrderSubmitter};
use time::{Date, Duration};
use tracing::{debug, error, info};

/// Navigation and selection state of the month calendar
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    /// A date in the displayed month
    reference: Date,
    /// The keyboard cursor; always in the displayed month
    focused: Date,
    selected: Option<Date>,
}

impl MonthView {
    pub(crate) fn new(reference: Date) -> MonthView {
        MonthView {
            reference,
            focused: reference,
            selected: None,
        }
    }

    pub(crate) fn reference(&self) -> Date {
        self.reference
    }

    pub(crate) fn focused(&self) -> Date {
        self.focused
    }

    pub(crate) fn selected(&self) -> Option<Date> {
        self.selected
    }

    pub(crate) fn selected_iso(&self) -> Option<String> {
        self.selected.map(iso_date)
    }

    pub(crate) fn grid(
        &self,
        today: Date,
        markers: &MarkerSet,
    ) -> Result<MonthGrid, OutOfTimeError> {
        build_month_grid(self.reference, today, markers)
    }

    pub(crate) fn go_to_previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.shift_month(false)
    }

    pub(crate) fn go_to_next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.shift_month(true)
    }

    fn shift_month(&mut self, forwards: bool) -> Result<(), OutOfTimeError> {
        let reference = shift_month(self.reference, forwards).ok_or(OutOfTimeError)?;
        let focused = shift_month(self.focused, forwards).ok_or(OutOfTimeError)?;
        self.reference = reference;
        self.focused = focused;
        self.selected = None;
        debug!(month = %self.reference.month(), year = self.reference.year(), "changed month");
        Ok(())
    }

    pub(crate) fn go_to_month_of(&mut self, date: Date) {
        self.reference = date;
        self.focused = date;
        self.selected = None;
    }

    /// Move the cursor by `days`.  Returns `false` and leaves the cursor in
    /// place if the target day is not in the displayed month.
    pub(crate) fn move_focus(&mut self, days: i64) -> bool {
        match self.focused.checked_add(Duration::days(days)) {
            Some(d) if (d.year(), d.month()) == (self.reference.year(), self.reference.month()) => {
                self.focused = d;
                true
            }
            _ => false,
        }
    }

    /// Toggle the selection of `cell`.  Days without an offer and days outside
    /// the displayed month cannot be selected; for those, `false` is returned
    /// and nothing changes.
    pub(crate) fn select_day(&mut self, cell: &DayCell) -> bool {
        if !cell.has_offer || !cell.in_displayed_month {
            return false;
        }
        if self.selected == Some(cell.date) {
            self.selected = None;
            debug!(date = %cell.iso_date, "unselected day");
        } else {
            self.selected = Some(cell.date);
            debug!(date = %cell.iso_date, "selected day");
        }
        true
    }

    pub(crate) fn select_focused(&mut self, grid: &MonthGrid) -> bool {
        match grid.cell(self.focused) {
            Some(cell) => self.select_day(cell),
            None => false,
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Submit an order for the selected day.  Returns `None` if no day is
    /// selected.  On success the selection is cleared and the ordered date is
    /// returned; on failure the selection is kept so that the user can try
    /// again.
    pub(crate) fn submit_order<O: OrderSubmitter>(
        &mut self,
        submitter: &O,
    ) -> Option<Result<Date, OrderError>> {
        let date = self.selected?;
        let iso = self.selected_iso()?;
        info!(date = %iso, "submitting order");
        match submitter.submit(date) {
            Ok(()) => {
                info!(date = %iso, "order placed");
                self.clear_selection();
                Some(Ok(date))
            }
            Err(e) => {
                error!(date = %iso, error = ?e, "failed to place order");
                Some(Err(e))
            }
        }
    }
}
