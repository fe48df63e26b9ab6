use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::{metrics::Figure, viz::util::event_keycode};

use super::Component;

fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format!("{v:.2}").bold())
        .collect()
}

/// One exported figure drawn as a braille line chart
pub struct Plot {
    figure: Figure,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl From<Figure> for Plot {
    fn from(figure: Figure) -> Self {
        let x = figure.x_range();
        let y = figure.y_range();
        Self {
            figure,
            x_bounds: [x.start, x.end],
            y_bounds: [y.start, y.end],
        }
    }
}

impl Plot {
    /// Tab title, the figure's file name without extension
    pub fn title(&self) -> String {
        format!("{}_per_{}", self.figure.y_label, self.figure.x_label)
    }
}

impl WidgetRef for Plot {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .cyan()
            .data(&self.figure.points);

        let x_axis = Axis::default()
            .title(self.figure.x_label.as_str())
            .dark_gray()
            .labels(labels(self.x_bounds))
            .bounds(self.x_bounds);

        let y_axis = Axis::default()
            .title(self.figure.y_label.as_str())
            .dark_gray()
            .labels(labels(self.y_bounds))
            .bounds(self.y_bounds);

        Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .padding(Padding::uniform(1)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// Every figure of a run, one shown at a time
pub struct Plots {
    plots: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            plots: figures.into_iter().map(Plot::from).collect(),
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next_plot(&mut self) {
        if !self.is_empty() {
            self.selected = (self.selected + 1) % self.len();
        }
    }

    pub fn prev_plot(&mut self) {
        if !self.is_empty() {
            let len = self.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let [tabs_area, chart_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        Tabs::new(self.plots.iter().map(Plot::title))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected)
            .render(tabs_area, buf);

        match self.plots.get(self.selected) {
            Some(plot) => plot.render_ref(chart_area, buf),
            None => Paragraph::new("No figures to show")
                .alignment(Alignment::Center)
                .render(chart_area, buf),
        }
    }
}

impl Component for Plots {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match event_keycode(event) {
            Some(KeyCode::Left) => self.prev_plot(),
            Some(KeyCode::Right) => self.next_plot(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    use super::*;

    fn figure(x: &str, y: &str) -> Figure {
        Figure {
            x_label: x.into(),
            y_label: y.into(),
            points: vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)],
        }
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_cycle_plots() {
        let mut plots = Plots::new(vec![figure("a", "b"), figure("a", "c")]);
        assert!(plots.handle_ui_event(&press(KeyCode::Right)));
        assert_eq!(plots.selected(), 1);
        assert!(plots.handle_ui_event(&press(KeyCode::Right)));
        assert_eq!(plots.selected(), 0);
        assert!(plots.handle_ui_event(&press(KeyCode::Left)));
        assert_eq!(plots.selected(), 1);
        assert!(!plots.handle_ui_event(&press(KeyCode::Up)));
    }

    #[test]
    fn empty_plots_do_not_panic() {
        let mut plots = Plots::new(vec![]);
        plots.next_plot();
        plots.prev_plot();
        assert_eq!(plots.selected(), 0);

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| plots.render_ref(frame.size(), frame.buffer_mut()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No figures to show"));
    }

    #[test]
    fn renders_titles_and_axes() {
        let plots = Plots::new(vec![figure("Self_played_steps", "Total_reward")]);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| plots.render_ref(frame.size(), frame.buffer_mut()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Total_reward_per_Self_played_steps"));
        assert!(text.contains("3.00"), "y upper bound label missing");
    }
}
