use ratatui::{prelude::*, widgets::*};

fn key_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(action),
    ])
}

/// Draw the key bindings of `selected_tab` in a centered popup
pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let mut lines = vec![
        key_line("  q  ", "Exit the preview"),
        key_line("  h  ", "Toggle help popup"),
        key_line(" Tab ", "Switch tabs"),
    ];
    match selected_tab {
        0 => lines.push(key_line("⬅ / ➡", "Previous/next figure")),
        1 => lines.extend([
            key_line("  s  ", "Show/hide the target selector"),
            key_line("  f  ", "Focus on the selected target only"),
            key_line("⬆ / ⬇", "Switch log target"),
            key_line("⬅ / ➡", "Show one level less/more"),
            key_line("- / +", "Capture one level less/more"),
            key_line("PgUp ", "Page mode, scroll half a page up"),
            key_line("PgDn ", "Page mode, scroll down"),
            key_line(" Esc ", "Leave page mode"),
        ]),
        _ => {}
    }

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16 + 4),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(60),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);
    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
