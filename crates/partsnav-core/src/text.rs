use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Escape(&'a str),
    Glyph(char),
}

struct Pieces<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        let ch = rest.chars().next()?;
        if ch != '\x1b' {
            self.pos += ch.len_utf8();
            return Some(Piece::Glyph(ch));
        }

        let len = escape_len(rest);
        self.pos += len;
        Some(Piece::Escape(&rest[..len]))
    }
}

fn pieces(src: &str) -> Pieces<'_> {
    Pieces { src, pos: 0 }
}

/// Byte length of the escape sequence at the start of `s` (which begins with ESC).
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        None => 1,
        Some(b'[') => bytes
            .iter()
            .enumerate()
            .skip(2)
            .find(|(_, b)| (0x40..=0x7e).contains(*b))
            .map_or(bytes.len(), |(i, _)| i + 1),
        // OSC, APC, DCS and PM run until BEL or ST.
        Some(b']' | b'_' | b'P' | b'^') => {
            let mut i = 2;
            while i < bytes.len() {
                match bytes[i] {
                    0x07 => return i + 1,
                    0x1b if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
                    _ => i += 1,
                }
            }
            bytes.len()
        }
        Some(b) if b.is_ascii() => 2,
        Some(_) => 1,
    }
}

/// Printable width in terminal columns, ignoring escape sequences.
pub fn display_width(s: &str) -> usize {
    pieces(s)
        .map(|piece| match piece {
            Piece::Escape(_) => 0,
            Piece::Glyph(ch) => ch.width().unwrap_or(0),
        })
        .sum()
}

pub fn strip_ansi(s: &str) -> String {
    pieces(s)
        .filter_map(|piece| match piece {
            Piece::Escape(_) => None,
            Piece::Glyph(ch) => Some(ch),
        })
        .collect()
}

/// Pads with trailing spaces up to `width` printable columns. Wider input is returned as is.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - current))
}

/// Cuts `s` down to `width` printable columns, keeping every escape sequence so
/// styling state stays balanced; a reset is appended when styled text was cut.
pub fn truncate_to_width(s: &str, width: usize) -> Cow<'_, str> {
    if display_width(s) <= width {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut used = 0usize;
    let mut styled = false;
    let mut full = false;

    for piece in pieces(s) {
        match piece {
            Piece::Escape(seq) => {
                styled = true;
                out.push_str(seq);
            }
            Piece::Glyph(ch) if !full => {
                let w = ch.width().unwrap_or(0);
                if used + w > width {
                    full = true;
                    continue;
                }
                used += w;
                out.push(ch);
            }
            Piece::Glyph(_) => {}
        }
    }

    if styled {
        out.push_str(RESET);
    }
    Cow::Owned(out)
}

/// Forces `content` to exactly `height` lines, dropping trailing lines or padding with blanks.
pub fn fit_height(content: &str, height: usize) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    lines.resize(height, "");
    lines.join("\n")
}

pub fn align_right(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        return s.to_string();
    }
    format!("{}{s}", " ".repeat(width - current))
}
