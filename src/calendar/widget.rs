use super::grid::{DayCell, MonthGrid};
use super::util::{long_date, WeekdayExt};
use super::view::MonthView;
use crate::theme::{
    BASE_STYLE, FOCUSED_MODIFIER, HEADER_STYLE, NO_OFFER_STYLE, OFFER_MARKER_STYLE,
    ORDER_MARKER_STYLE, OTHER_MONTH_STYLE, SELECTED_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use time::{Date, Weekday};

static WEEKDAY_INITIALS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

static LEGEND: &str = "+ offer  * ordered  [] today";

/// Number of columns per day of week: a four-column label plus a one-column
/// marker
const DAY_WIDTH: u16 = 5;

const GRID_WIDTH: u16 = DAY_WIDTH * 7;

const LONGEST_MONTH_NAME_LEN: u16 = 9; // September

/// Width of the selected-day footer for the longest month name:
/// "Selected: ", the month, " DD, YYYY", and "  [o] Order"
const FOOTER_WIDTH: u16 = 10 + LONGEST_MONTH_NAME_LEN + 9 + 11;

const TOTAL_WIDTH: u16 = if FOOTER_WIDTH > GRID_WIDTH {
    FOOTER_WIDTH
} else {
    GRID_WIDTH
};

/// Column at which the grid starts, centering it over the footer
const GRID_LEFT: u16 = (TOTAL_WIDTH - GRID_WIDTH) / 2;

/// Line on which the weekday initials are drawn
const WEEKDAYS_LINE: u16 = 2;

/// Line on which the first week is drawn
const WEEKS_TOP: u16 = 4;

const OFFER_MARKER: &str = "+";
const ORDER_MARKER: &str = "*";

const ACS_HLINE: char = '─';

/// Month grid widget: a title with the month and year, the weekday initials
/// (Monday first), one line per week, and a footer naming the selected day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthCalendar<'a> {
    grid: &'a MonthGrid,
    view: &'a MonthView,
}

impl<'a> MonthCalendar<'a> {
    pub(crate) fn new(grid: &'a MonthGrid, view: &'a MonthView) -> MonthCalendar<'a> {
        MonthCalendar { grid, view }
    }
}

impl Widget for MonthCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(TOTAL_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: area.width.min(TOTAL_WIDTH),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(self.grid.month_start());
        canvas.draw_weekdays();
        let mut footer = WEEKS_TOP;
        for (i, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for cell in week.days() {
                let is_selected = self.view.selected() == Some(cell.date);
                let is_focused = self.view.focused() == cell.date;
                let [label, marker] = day_spans(cell, is_selected, is_focused);
                canvas.draw_day(i, cell.date.weekday(), label, marker);
            }
            footer = WEEKS_TOP + i + 2;
        }
        if let Some(date) = self.view.selected() {
            canvas.mvprint(
                footer,
                0,
                format!("Selected: {}  [o] Order", long_date(date)),
                HEADER_STYLE,
            );
        }
        canvas.mvprint(footer + 1, 0, LEGEND, OTHER_MONTH_STYLE);
    }
}

/// Render one day as its label and its status marker.  Days outside the
/// displayed month render as blanks.
pub(crate) fn day_spans(
    cell: &DayCell,
    is_selected: bool,
    is_focused: bool,
) -> [Span<'static>; 2] {
    if !cell.in_displayed_month {
        return [
            Span::styled("    ", OTHER_MONTH_STYLE),
            Span::styled(" ", OTHER_MONTH_STYLE),
        ];
    }
    let text = if cell.is_today {
        format!("[{}]", cell.day_label)
    } else {
        format!(" {} ", cell.day_label)
    };
    let mut style = if is_selected {
        SELECTED_STYLE
    } else if cell.is_today {
        TODAY_STYLE
    } else if cell.has_offer {
        BASE_STYLE
    } else {
        NO_OFFER_STYLE
    };
    if is_focused {
        style = style.add_modifier(FOCUSED_MODIFIER);
    }
    let marker = if cell.has_order {
        Span::styled(ORDER_MARKER, ORDER_MARKER_STYLE)
    } else if cell.has_offer {
        Span::styled(OFFER_MARKER, OFFER_MARKER_STYLE)
    } else {
        Span::styled(" ", BASE_STYLE)
    };
    [Span::styled(text, style), marker]
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, month_start: Date) {
        let title = format!("‹ {} {} ›", month_start.month(), month_start.year());
        let width = u16::try_from(Line::raw(title.as_str()).width()).unwrap_or(u16::MAX);
        let x = GRID_LEFT + GRID_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, HEADER_STYLE);
    }

    fn draw_weekdays(&mut self) {
        let header = WEEKDAY_INITIALS
            .iter()
            .map(|d| format!("  {d}  "))
            .collect::<String>();
        self.mvprint(WEEKDAYS_LINE, GRID_LEFT, header, WEEKDAY_STYLE);
        self.hline(WEEKDAYS_LINE + 1, GRID_LEFT, ACS_HLINE, GRID_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, label: Span<'_>, marker: Span<'_>) {
        let y = WEEKS_TOP + week_no;
        let x = GRID_LEFT + DAY_WIDTH * wd.index0();
        self.mvprint(y, x, label.content, label.style);
        self.mvprint(y, x + DAY_WIDTH - 1, marker.content, marker.style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}
