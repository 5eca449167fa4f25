//! View tree to ratatui lines.
//!
//! Text is wrapped here at the target width, so every output line occupies
//! exactly one terminal row and the recorded toggle rows stay exact.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use modguide_engine::{
    CapabilityScore, EntryStyle, Inline, Tone, View, ViewNode, sanitize_catalog_text,
};

use crate::theme::{Glyphs, Palette, styles};

const INDENT: &str = "  ";
const SCORE_BAR_CELLS: usize = 16;
/// Text never wraps narrower than this, however deep the nesting.
const MIN_TEXT_WIDTH: usize = 8;

#[derive(Debug, Default)]
pub struct RenderedView {
    pub lines: Vec<Line<'static>>,
    /// Row of every toggle affordance, in display order.
    pub toggles: Vec<usize>,
}

impl RenderedView {
    #[must_use]
    pub fn toggle_row(&self, toggle: usize) -> Option<usize> {
        self.toggles.get(toggle).copied()
    }
}

/// Render the view body (everything but the title) at `width` columns.
///
/// `focus` indexes the toggle affordances in display order; the focused
/// toggle's line is marked and highlighted.
#[must_use]
pub fn render_view(
    view: &View,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
    focus: Option<usize>,
) -> RenderedView {
    let mut renderer = ViewRenderer::new(width, palette, glyphs, focus);
    for (index, section) in view.sections.iter().enumerate() {
        if index > 0 {
            renderer.blank();
        }
        renderer.node(section);
    }
    renderer.finish()
}

/// Flatten styled lines to text, one row per line, trailing spaces trimmed.
#[must_use]
pub fn to_plain(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

fn clean(text: &str) -> String {
    sanitize_catalog_text(text).into_owned()
}

struct ViewRenderer<'a> {
    width: usize,
    palette: &'a Palette,
    glyphs: &'a Glyphs,
    focus: Option<usize>,
    /// Spans repeated at the start of every line: entry gutters and nesting.
    prefix: Vec<Span<'static>>,
    lines: Vec<Line<'static>>,
    toggles: Vec<usize>,
}

impl<'a> ViewRenderer<'a> {
    fn new(width: u16, palette: &'a Palette, glyphs: &'a Glyphs, focus: Option<usize>) -> Self {
        Self {
            width: usize::from(width),
            palette,
            glyphs,
            focus,
            prefix: Vec::new(),
            lines: Vec::new(),
            toggles: Vec::new(),
        }
    }

    fn finish(self) -> RenderedView {
        RenderedView {
            lines: self.lines,
            toggles: self.toggles,
        }
    }

    fn available(&self) -> usize {
        let used: usize = self.prefix.iter().map(Span::width).sum();
        self.width.saturating_sub(used).max(MIN_TEXT_WIDTH)
    }

    fn push_line(&mut self, spans: Vec<Span<'static>>) {
        let mut all = self.prefix.clone();
        all.extend(spans);
        self.lines.push(Line::from(all));
    }

    fn blank(&mut self) {
        self.push_line(Vec::new());
    }

    fn nested(&mut self, segment: Span<'static>, children: &[ViewNode]) {
        self.prefix.push(segment);
        for child in children {
            self.node(child);
        }
        self.prefix.pop();
    }

    fn tone(&self, tone: Tone) -> Style {
        Style::default().fg(self.palette.tone(tone))
    }

    fn node(&mut self, node: &ViewNode) {
        match node {
            ViewNode::Section {
                title,
                tone,
                children,
                ..
            } => self.section(title, *tone, children),
            ViewNode::Entry {
                highlighted,
                children,
                ..
            } => {
                let segment = if *highlighted {
                    Span::styled(
                        format!("{} ", self.glyphs.gutter),
                        self.tone(Tone::Caution),
                    )
                } else {
                    Span::raw(INDENT)
                };
                self.nested(segment, children);
            }
            ViewNode::Line(inlines) => self.inline_line(inlines),
            ViewNode::Paragraph { text, tone } => {
                let style = self.tone(*tone);
                self.wrapped(&clean(text), style);
            }
            ViewNode::Bullets { items, tone } => self.bullets(items, *tone),
            ViewNode::Tags { tags, tone } => self.tags(tags, *tone),
            ViewNode::Field { label, children } => {
                let style = Style::default()
                    .fg(self.palette.text_secondary)
                    .add_modifier(Modifier::BOLD);
                self.wrapped(&clean(label), style);
                self.nested(Span::raw(INDENT), children);
            }
            ViewNode::Code(text) => self.code(&clean(text)),
            ViewNode::Link { label, url } => self.link(&clean(label), &clean(url)),
            ViewNode::Placeholder(text) => {
                let style = self.tone(Tone::Muted).add_modifier(Modifier::ITALIC);
                self.wrapped(&clean(text), style);
            }
            ViewNode::Score(score) => self.score(*score),
            ViewNode::Detail(children) => self.nested(Span::raw(INDENT), children),
        }
    }

    fn section(&mut self, title: &str, tone: Tone, children: &[ViewNode]) {
        let style = self.tone(tone).add_modifier(Modifier::BOLD);
        self.wrapped(&clean(title), style);
        let rule = self.glyphs.rule.repeat(self.available());
        self.push_line(vec![Span::styled(rule, styles::border(self.palette))]);

        for child in children {
            if matches!(
                child,
                ViewNode::Entry {
                    style: EntryStyle::Card,
                    ..
                }
            ) {
                self.blank();
            }
            self.node(child);
        }
    }

    /// Lay inline items out left to right, two spaces apart. Items that do
    /// not fit move to continuation rows indented one step further; an item
    /// wider than a whole row is word-wrapped.
    fn inline_line(&mut self, inlines: &[Inline]) {
        let first_row = self.lines.len();
        let width = self.available();
        let hang_width = width.saturating_sub(INDENT.len()).max(MIN_TEXT_WIDTH);
        let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
        let mut used = 0;
        let mut focused = false;

        for inline in inlines {
            let (text, style, is_toggle) = self.inline_item(inline);
            let text_width = text.width();
            let limit = if rows.len() == 1 { width } else { hang_width };
            let item_row;

            if used > 0 && used + INDENT.len() + text_width <= limit {
                item_row = rows.len() - 1;
                if let Some(row) = rows.last_mut() {
                    row.push(Span::raw(INDENT));
                    row.push(Span::styled(text, style));
                }
                used += INDENT.len() + text_width;
            } else {
                if used > 0 {
                    rows.push(Vec::new());
                }
                item_row = rows.len() - 1;
                let limit = if rows.len() == 1 { width } else { hang_width };
                let pieces = if text_width <= limit {
                    vec![text]
                } else {
                    wrap_words(&text, hang_width)
                };
                for (index, piece) in pieces.into_iter().enumerate() {
                    if index > 0 {
                        rows.push(Vec::new());
                    }
                    used = piece.width();
                    if let Some(row) = rows.last_mut() {
                        row.push(Span::styled(piece, style));
                    }
                }
            }

            if is_toggle {
                focused |= self.focus == Some(self.toggles.len());
                self.toggles.push(first_row + item_row);
            }
        }

        for (index, spans) in rows.into_iter().enumerate() {
            let mut all = self.prefix.clone();
            if index > 0 {
                all.push(Span::raw(INDENT));
            }
            if focused && index == 0 {
                let marker = Span::styled(
                    format!("{} ", self.glyphs.selected),
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD),
                );
                match all.first_mut() {
                    Some(first) => *first = marker,
                    None => all.push(marker),
                }
            }
            all.extend(spans);
            let line = Line::from(all);
            self.lines.push(if focused {
                line.style(styles::focused(self.palette))
            } else {
                line
            });
        }
    }

    /// Text, style and whether the item is a toggle affordance.
    fn inline_item(&self, inline: &Inline) -> (String, Style, bool) {
        match inline {
            Inline::Text { text, tone, strong } => {
                let mut style = self.tone(*tone);
                if *strong {
                    style = style.add_modifier(Modifier::BOLD);
                }
                (clean(text), style, false)
            }
            Inline::Badge { label, enabled } => {
                let (mark, color) = if *enabled {
                    (self.glyphs.supported, self.palette.green)
                } else {
                    (self.glyphs.unsupported, self.palette.text_muted)
                };
                (format!("{} {mark}", clean(label)), Style::default().fg(color), false)
            }
            Inline::Toggle {
                expanded, label, ..
            } => {
                let glyph = if *expanded {
                    self.glyphs.collapse
                } else {
                    self.glyphs.expand
                };
                let text = match label {
                    Some(label) => format!("[{glyph}] {}", clean(label)),
                    None => format!("[{glyph}]"),
                };
                let style = Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD);
                (text, style, true)
            }
        }
    }

    fn wrapped(&mut self, text: &str, style: Style) {
        let width = self.available();
        for paragraph in text.split('\n') {
            for row in wrap_words(paragraph, width) {
                self.push_line(vec![Span::styled(row, style)]);
            }
        }
    }

    fn bullets(&mut self, items: &[String], tone: Tone) {
        let marker = format!("{} ", self.glyphs.bullet);
        let hang = " ".repeat(marker.width());
        let width = self.available().saturating_sub(marker.width()).max(1);
        let text_style = Style::default().fg(self.palette.text_primary);

        for item in items {
            for (index, row) in wrap_words(&clean(item), width).into_iter().enumerate() {
                let lead = if index == 0 {
                    Span::styled(marker.clone(), self.tone(tone))
                } else {
                    Span::raw(hang.clone())
                };
                self.push_line(vec![lead, Span::styled(row, text_style)]);
            }
        }
    }

    /// Tag chips packed greedily; only a chip wider than a row is split.
    fn tags(&mut self, tags: &[String], tone: Tone) {
        let width = self.available();
        let style = self.tone(tone);
        let mut row = String::new();
        for tag in tags {
            let chip = format!("[{}]", clean(tag));
            if !row.is_empty() && row.width() + 1 + chip.width() > width {
                self.push_line(vec![Span::styled(std::mem::take(&mut row), style)]);
            }
            if chip.width() > width {
                let mut chunks = split_chunks(&chip, width);
                let last = chunks.pop().unwrap_or_default();
                for chunk in chunks {
                    self.push_line(vec![Span::styled(chunk.to_string(), style)]);
                }
                row = last.to_string();
                continue;
            }
            if !row.is_empty() {
                row.push(' ');
            }
            row.push_str(&chip);
        }
        if !row.is_empty() {
            self.push_line(vec![Span::styled(row, style)]);
        }
    }

    /// Verbatim lines, broken at the width without reflowing words.
    fn code(&mut self, text: &str) {
        let width = self.available();
        let style = styles::code(self.palette);
        for line in text.lines() {
            for chunk in split_chunks(line, width) {
                self.push_line(vec![Span::styled(chunk.to_string(), style)]);
            }
        }
    }

    fn link(&mut self, label: &str, url: &str) {
        let lead = format!("{label} {} ", self.glyphs.link);
        let width = self.available();
        let link_style = styles::link(self.palette);
        let url_style = self.tone(Tone::Muted);

        if lead.width() + url.width() <= width {
            self.push_line(vec![
                Span::styled(label.to_string(), link_style),
                Span::raw(format!(" {} ", self.glyphs.link)),
                Span::styled(url.to_string(), url_style),
            ]);
            return;
        }

        for row in wrap_words(&format!("{label} {}", self.glyphs.link), width) {
            self.push_line(vec![Span::styled(row, link_style)]);
        }
        let url_width = width.saturating_sub(INDENT.len()).max(1);
        for chunk in split_chunks(url, url_width) {
            self.push_line(vec![
                Span::raw(INDENT),
                Span::styled(chunk.to_string(), url_style),
            ]);
        }
    }

    fn score(&mut self, score: CapabilityScore) {
        let cells = SCORE_BAR_CELLS.min(self.available());
        let filled = ((score.fraction() * cells as f64).round() as usize).min(cells);
        self.push_line(vec![
            Span::styled(
                self.glyphs.bar_fill.repeat(filled),
                Style::default().fg(self.palette.tier(score.tier())),
            ),
            Span::styled(
                self.glyphs.bar_empty.repeat(cells - filled),
                Style::default().fg(self.palette.text_muted),
            ),
        ]);
    }
}

/// Greedy word wrap by display width. Words wider than `width` are broken.
/// Always returns at least one (possibly empty) row.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_width = word.width();

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        if current_width > 0 {
            rows.push(std::mem::take(&mut current));
        }
        while word_width > width {
            let (head, tail) = split_at_width(word, width);
            if tail.is_empty() {
                break;
            }
            rows.push(head.to_string());
            word = tail;
            word_width = word.width();
        }
        current.push_str(word);
        current_width = word_width;
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Split so the head fits in `width` columns. The head always holds at least
/// one character.
fn split_at_width(text: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if index > 0 && used + ch_width > width {
            return text.split_at(index);
        }
        used += ch_width;
    }
    (text, "")
}

fn split_chunks(text: &str, width: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    loop {
        let (head, tail) = split_at_width(rest, width.max(1));
        chunks.push(head);
        if tail.is_empty() {
            return chunks;
        }
        rest = tail;
    }
}
