use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::metrics::Figure;

use super::{
    components::{help::render_help, Component, Logs, Plots},
    tui::Tui,
    util::event_keycode,
};

const TABS: [&str; 2] = ["Plots", "Logs"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum State {
    #[default]
    Browse,
    Quit,
}

/// Root component holding the preview state
pub struct App {
    state: State,
    selected_tab: usize,
    show_help: bool,
    plots: Plots,
    logs: Logs,
}

impl App {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            state: State::default(),
            selected_tab: 0,
            show_help: false,
            plots: Plots::new(figures),
            logs: Logs::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    /// Take over the terminal and draw until the user quits
    ///
    /// The terminal is restored on return, including on errors
    pub fn run(&mut self) -> io::Result<()> {
        let mut tui = Tui::enter()?;

        while self.state != State::Quit {
            tui.draw(&*self)?;
            if event::poll(Duration::from_millis(50))? {
                self.handle_event(&event::read()?);
            }
        }
        Ok(())
    }

    /// Apply one terminal event; keys the app does not bind go to the selected tab
    pub fn handle_event(&mut self, event: &Event) {
        let Some(key) = event_keycode(event) else {
            return;
        };
        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Tab => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {
                match self.selected_tab {
                    0 => self.plots.handle_ui_event(event),
                    _ => self.logs.handle_ui_event(event),
                };
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.plots.render_ref(main_area, buf),
            _ => self.logs.render_ref(main_area, buf),
        }

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
