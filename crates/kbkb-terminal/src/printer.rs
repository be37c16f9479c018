//! In-place frame redraw.

use crate::error::TuiError;
use crossterm::{
    cursor, queue,
    terminal::{self, ClearType},
};
use std::io::Write;

/// Writes frames over the previous one instead of scrolling.
///
/// The printer remembers how many lines it has printed. Before each new
/// frame it moves the cursor back up over them and clears to the end of the
/// screen. A frame shorter than the last is padded with blank lines above
/// it, so the board's floor stays on the same terminal line.
#[derive(Debug)]
pub struct OverwritePrinter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> OverwritePrinter<W> {
    /// Printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    /// Lines currently occupied on screen.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Replace the previous frame with `frame`.
    pub fn print(&mut self, frame: &str) -> Result<(), TuiError> {
        let rows = frame.matches('\n').count();

        if self.rows > 0 {
            let up = u16::try_from(self.rows).unwrap_or(u16::MAX);
            queue!(
                self.out,
                cursor::MoveToColumn(0),
                cursor::MoveUp(up),
                terminal::Clear(ClearType::FromCursorDown)
            )?;
        }

        if self.rows > rows {
            for _ in rows..self.rows {
                self.out.write_all(b"\n")?;
            }
        } else {
            self.rows = rows;
        }

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
