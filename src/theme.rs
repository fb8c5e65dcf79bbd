use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const NO_OFFER_STYLE: Style = BASE_STYLE.fg(Color::Gray).add_modifier(Modifier::DIM);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED.union(Modifier::BOLD));

pub(crate) const FOCUSED_MODIFIER: Modifier = Modifier::UNDERLINED;

pub(crate) const OFFER_MARKER_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub(crate) const ORDER_MARKER_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub(crate) mod notice {
    use super::*;

    pub(crate) const SUCCESS_TITLE_STYLE: Style = BASE_STYLE
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    pub(crate) const ERROR_TITLE_STYLE: Style = BASE_STYLE
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD);
}
