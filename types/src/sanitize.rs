//! Terminal-safe rendering of catalog text.
//!
//! Catalog files are user supplied. Their strings end up verbatim in the
//! terminal, so escape sequences (OSC 52 clipboard writes, OSC 8 links,
//! cursor movement) and stray control characters are removed before display.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

const ESC: char = '\x1b';
const BEL: char = '\x07';
const DEL: char = '\x7f';
const C1_CSI: char = '\u{009b}';
const TAB_WIDTH: usize = 4;

/// Strip escape sequences and control characters from catalog text.
///
/// Newlines are kept. Tabs become four spaces and carriage returns are
/// dropped so that column math in the renderer stays exact.
///
/// Returns `Cow::Borrowed` when the input is already clean.
#[must_use]
pub fn sanitize_catalog_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(needs_rewrite) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESC => skip_escape(&mut chars),
            C1_CSI => skip_csi(&mut chars),
            '\n' => out.push('\n'),
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            c if is_control(c) => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn needs_rewrite(c: char) -> bool {
    c != '\n' && is_control(c)
}

fn is_control(c: char) -> bool {
    c <= '\x1f' || c == DEL || ('\u{0080}'..='\u{009f}').contains(&c)
}

fn skip_escape(chars: &mut Peekable<Chars<'_>>) {
    match chars.peek().copied() {
        Some('[') => {
            chars.next();
            skip_csi(chars);
        }
        Some(']' | 'P' | '^' | '_') => {
            chars.next();
            skip_string(chars);
        }
        Some('(' | ')' | '*' | '+' | '#' | ' ') => {
            chars.next();
            chars.next();
        }
        Some(c) if c.is_ascii_graphic() => {
            chars.next();
        }
        _ => {}
    }
}

/// CSI: parameter and intermediate bytes up to a final byte in `@..=~`.
fn skip_csi(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        if ('\x20'..='\x3f').contains(&c) {
            chars.next();
        } else {
            if ('\x40'..='\x7e').contains(&c) {
                chars.next();
            }
            return;
        }
    }
}

/// OSC/DCS/PM/APC bodies run until BEL or ST (`ESC \`).
fn skip_string(chars: &mut Peekable<Chars<'_>>) {
    while let Some(c) = chars.next() {
        if c == BEL {
            return;
        }
        if c == ESC && chars.peek() == Some(&'\\') {
            chars.next();
            return;
        }
    }
}
