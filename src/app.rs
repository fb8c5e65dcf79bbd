use crate::calendar::{MonthCalendar, MonthView, Today};
use crate::help::Help;
use crate::markers::MarkerSet;
use crate::notice::Notice;
use crate::order::OrderSubmitter;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io::{self, Write};
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) struct App<O, C> {
    view: MonthView,
    markers: MarkerSet,
    submitter: O,
    clock: C,
    state: AppState,
}

impl<O: OrderSubmitter, C: Today> App<O, C> {
    pub(crate) fn new(view: MonthView, markers: MarkerSet, submitter: O, clock: C) -> App<O, C> {
        App {
            view,
            markers,
            submitter,
            clock,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or asked for
    // something that cannot be done
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.view.move_focus(-1),
                KeyCode::Char('l') | KeyCode::Right => self.view.move_focus(1),
                KeyCode::Char('k') | KeyCode::Up => self.view.move_focus(-7),
                KeyCode::Char('j') | KeyCode::Down => self.view.move_focus(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.view.go_to_previous_month().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => self.view.go_to_next_month().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.view.go_to_month_of(self.clock.today());
                    true
                }
                KeyCode::Char(' ') | KeyCode::Enter => self.select_focused(),
                KeyCode::Char('o') => self.submit_order(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping | AppState::Notifying(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn select_focused(&mut self) -> bool {
        match self.view.grid(self.clock.today(), &self.markers) {
            Ok(grid) => self.view.select_focused(&grid),
            Err(e) => {
                warn!(error = %e, reference = %self.view.reference(), "cannot build month grid");
                false
            }
        }
    }

    fn submit_order(&mut self) -> bool {
        match self.view.submit_order(&self.submitter) {
            Some(Ok(date)) => {
                self.state = AppState::Notifying(Notice::order_placed(date));
                true
            }
            Some(Err(e)) => {
                self.state = AppState::Notifying(Notice::order_failed(&e));
                true
            }
            None => {
                debug!("no day selected to order");
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<O: OrderSubmitter, C: Today> Widget for &App<O, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        match self.view.grid(self.clock.today(), &self.markers) {
            Ok(grid) => MonthCalendar::new(&grid, &self.view).render(area, buf),
            Err(e) => Paragraph::new(Line::raw(e.to_string()))
                .centered()
                .render(area, buf),
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Notifying(ref notice) = self.state {
            notice.render(area, buf);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Notifying(Notice),
    Quitting,
}
