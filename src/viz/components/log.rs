use crossterm::event::{Event, KeyCode};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::WidgetRef};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::viz::util::event_keycode;

use super::Component;

/// Level shown for every target until changed with the arrow keys
const DISPLAY_LEVEL: LevelFilter = LevelFilter::Info;

/// The log widget action bound to `key` in the Logs tab
fn widget_event(key: KeyCode) -> Option<TuiWidgetEvent> {
    let event = match key {
        KeyCode::Up => TuiWidgetEvent::UpKey,
        KeyCode::Down => TuiWidgetEvent::DownKey,
        KeyCode::Left => TuiWidgetEvent::LeftKey,
        KeyCode::Right => TuiWidgetEvent::RightKey,
        KeyCode::Char('+' | '=') => TuiWidgetEvent::PlusKey,
        KeyCode::Char('-') => TuiWidgetEvent::MinusKey,
        KeyCode::Char('s') => TuiWidgetEvent::HideKey,
        KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
        KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
        KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
        KeyCode::Esc => TuiWidgetEvent::EscapeKey,
        _ => return None,
    };
    Some(event)
}

/// Records of the export pipeline, captured by `tui_logger`
pub struct Logs {
    state: TuiWidgetState,
}

impl Default for Logs {
    fn default() -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(DISPLAY_LEVEL),
        }
    }
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        TuiLoggerSmartWidget::default()
            .style(Style::default().gray())
            .style_error(Style::default().red().bold())
            .style_warn(Style::default().yellow())
            .style_info(Style::default().white())
            .style_debug(Style::default().dark_gray())
            .output_separator('|')
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match event_keycode(event).and_then(widget_event) {
            Some(widget_event) => {
                self.state.transition(widget_event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert!(matches!(widget_event(KeyCode::Up), Some(TuiWidgetEvent::UpKey)));
        assert!(matches!(widget_event(KeyCode::Char('=')), Some(TuiWidgetEvent::PlusKey)));
        assert!(matches!(widget_event(KeyCode::PageUp), Some(TuiWidgetEvent::PrevPageKey)));
        assert!(widget_event(KeyCode::Char(' ')).is_none(), "Space is unbound");
        assert!(widget_event(KeyCode::Char('q')).is_none(), "Quit is left to the app");
        assert!(widget_event(KeyCode::Tab).is_none(), "Tab is left to the app");
    }
}
