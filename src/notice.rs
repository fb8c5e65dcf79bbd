use crate::calendar::long_date;
use crate::order::OrderError;
use crate::theme::{
    notice::{ERROR_TITLE_STYLE, SUCCESS_TITLE_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use time::Date;

const MAX_WIDTH: u16 = 44;

static DISMISS: &str = "Press the Any Key to dismiss.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

/// A modal message shown after an order attempt
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Notice {
    kind: NoticeKind,
    message: String,
}

impl Notice {
    pub(crate) fn order_placed(date: Date) -> Notice {
        Notice {
            kind: NoticeKind::Success,
            message: format!("Order placed for {}", long_date(date)),
        }
    }

    pub(crate) fn order_failed(e: &OrderError) -> Notice {
        Notice {
            kind: NoticeKind::Error,
            message: e.user_message().to_owned(),
        }
    }

    pub(crate) fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    fn title(&self) -> Span<'static> {
        match self.kind() {
            NoticeKind::Success => Span::styled(" Success ", SUCCESS_TITLE_STYLE),
            NoticeKind::Error => Span::styled(" Error ", ERROR_TITLE_STYLE),
        }
    }
}

impl Widget for &Notice {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::raw(self.message()),
            Line::raw(""),
            Line::raw(DISMISS),
        ])
        .centered();
        let inner_width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(MAX_WIDTH);
        let width = inner_width.saturating_add(4).min(area.width);
        let height = 7u16.min(area.height);
        let [outer_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [outer_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(self.title())
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(block_area, buf);
    }
}
