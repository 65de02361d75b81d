//! Inline markup for message text.
//!
//! Recognises `**run**` and `*run*` as emphasis. Scanning is left to right;
//! at each position the double-asterisk form is tried before the single
//! one, the closing marker is the nearest one (non-greedy), and a run never
//! spans a newline. There is no escaping and no nesting.
//!
//! The output has split semantics: plain and emphasis segments alternate,
//! starting and ending with a plain segment that may be empty.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Emphasis(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(s) | Segment::Emphasis(s) => s,
        }
    }

    pub fn is_emphasis(&self) -> bool {
        matches!(self, Segment::Emphasis(_))
    }
}

pub fn format_markup(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        match match_run(bytes, i) {
            Some((inner_start, inner_end, end)) => {
                segments.push(Segment::Plain(&text[plain_start..i]));
                segments.push(Segment::Emphasis(&text[inner_start..inner_end]));
                plain_start = end;
                i = end;
            }
            None => i += 1,
        }
    }

    segments.push(Segment::Plain(&text[plain_start..]));
    segments
}

/// Try to match a run opening at `start` (which holds `*`).
/// Returns (inner start, inner end, end of run).
fn match_run(bytes: &[u8], start: usize) -> Option<(usize, usize, usize)> {
    if bytes.get(start + 1) == Some(&b'*') {
        if let Some(close) = find_on_line(bytes, start + 2, b"**") {
            return Some((start + 2, close, close + 2));
        }
    }
    find_on_line(bytes, start + 1, b"*").map(|close| (start + 1, close, close + 1))
}

/// First occurrence of `needle` at or after `from`, before the next newline.
fn find_on_line(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    let mut j = from;
    while j + needle.len() <= bytes.len() {
        if matches!(bytes[j], b'\n' | b'\r') {
            return None;
        }
        if &bytes[j..j + needle.len()] == needle {
            return Some(j);
        }
        j += 1;
    }
    None
}
