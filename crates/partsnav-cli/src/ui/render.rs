use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use partsnav_core::text::strip_ansi;

/// Paints a frame from the top-left corner. Each row erases whatever the
/// previous frame left to its right.
pub fn write_frame<W: Write>(out: &mut W, frame: &str, clear: bool) -> io::Result<()> {
    out.queue(MoveTo(0, 0))?;
    if clear {
        out.queue(Clear(ClearType::All))?;
    }
    for (i, line) in frame.split('\n').enumerate() {
        if i > 0 {
            out.write_all(b"\r\n")?;
        }
        out.write_all(line.as_bytes())?;
        out.queue(Clear(ClearType::UntilNewLine))?;
    }
    out.flush()
}

/// Prints a frame for a pipe: plain text, no cursor control.
pub fn print_frame<W: Write>(frame: &str, mut out: W) -> io::Result<()> {
    out.write_all(strip_ansi(frame).as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}
