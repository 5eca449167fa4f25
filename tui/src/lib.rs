//! TUI rendering for modguide using ratatui.

mod input;
mod render;
mod theme;

pub use input::{InputPump, apply_key, handle_events};
pub use render::{RenderedView, render_view, to_plain};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
};

use modguide_engine::{App, sanitize_catalog_text};

use self::render::wrap_words;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette);
    draw_body(frame, app, chunks[1], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette);
}

fn draw_header(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette) {
    let count = app.catalog().len();
    let noun = if count == 1 { "module" } else { "modules" };
    let count_text = format!("{count} {noun} ");
    let title = sanitize_catalog_text(&app.view().title).into_owned();

    let cols = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(count_text.len()).unwrap_or(u16::MAX)),
    ])
    .split(area);
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {title}"), styles::title(palette))),
        cols[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            count_text,
            Style::default().fg(palette.text_muted),
        )),
        cols[1],
    );
}

fn draw_body(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);

    // One column is reserved for the scrollbar.
    let width = inner.width.saturating_sub(1);
    let focus = app.focus_index();
    let rendered = render_view(app.view(), width, palette, glyphs, focus);

    let total_rows = rendered.lines.len();
    app.clamp_scroll(total_rows, inner.height);
    if app.take_focus_moved()
        && let Some(row) = focus.and_then(|index| rendered.toggle_row(index))
    {
        app.follow_row(row, inner.height);
    }

    let max_scroll = total_rows.saturating_sub(usize::from(inner.height));
    let scroll_offset = app.scroll_offset();
    let body = Paragraph::new(rendered.lines)
        .block(block)
        .scroll((scroll_offset, 0));
    frame.render_widget(body, area);

    // Only render scrollbar when content exceeds viewport
    if max_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some(glyphs.arrow_up))
            .end_symbol(Some(glyphs.arrow_down))
            .track_symbol(Some(glyphs.track))
            .thumb_symbol(glyphs.thumb)
            .style(Style::default().fg(palette.text_muted));

        let mut scrollbar_state =
            ScrollbarState::new(max_scroll).position(usize::from(scroll_offset));

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let key = styles::key_highlight(palette);
    let hint = styles::key_hint(palette);
    let mut spans = vec![
        Span::styled(" j/k", key),
        Span::styled(" move  ", hint),
        Span::styled("enter", key),
        Span::styled(" toggle  ", hint),
        Span::styled("pgup/pgdn", key),
        Span::styled(" scroll  ", hint),
        Span::styled("q", key),
        Span::styled(" quit", hint),
    ];
    if let Some(focused) = app.focused_key() {
        spans.push(Span::styled("  │ ", hint));
        spans.push(Span::styled(
            sanitize_catalog_text(&focused.to_string()).into_owned(),
            Style::default()
                .fg(palette.text_secondary)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the whole view as plain text at `width` columns, title included.
///
/// Used for non-interactive output; styling is dropped.
pub fn print_view(app: &mut App, width: u16) -> String {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let view = app.view();
    let mut out = String::new();
    let title = sanitize_catalog_text(&view.title);
    for row in wrap_words(&title, usize::from(width)) {
        out.push_str(&row);
        out.push('\n');
    }
    out.push_str(&glyphs.rule.repeat(usize::from(width)));
    out.push_str("\n\n");

    let rendered = render_view(view, width, &palette, &glyphs, None);
    out.push_str(&to_plain(&rendered.lines));
    out
}
