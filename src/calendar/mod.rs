mod grid;
mod util;
mod view;
mod widget;
pub(crate) use self::util::{iso_date, long_date};
pub(crate) use self::view::MonthView;
pub(crate) use self::widget::MonthCalendar;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    UtcOffset,
};
use tracing::warn;

pub(crate) static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Source of the current date
pub(crate) trait Today {
    fn today(&self) -> Date;
}

impl Today for Date {
    fn today(&self) -> Date {
        *self
    }
}

/// Today's date in the local time zone
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalToday(UtcOffset);

impl LocalToday {
    /// Determine the local UTC offset.  This has to happen while the process
    /// is still single-threaded; if the offset cannot be determined, UTC is
    /// used instead.
    pub(crate) fn detect() -> LocalToday {
        match UtcOffset::current_local_offset() {
            Ok(offset) => LocalToday(offset),
            Err(e) => {
                warn!(error = %e, "could not determine local time zone; using UTC");
                LocalToday(UtcOffset::UTC)
            }
        }
    }
}

impl Today for LocalToday {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.0).date()
    }
}
