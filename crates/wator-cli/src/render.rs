//! Text renderer for terminals and log files.

use std::io::Write;
use wator_core::{Error, Result};
use wator_world::{CellKind, Renderer, Snapshot};

/// Draws one character per cell: `.` water, `f` fish, `S` shark.
pub struct AsciiRenderer<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => '.',
        CellKind::Fish => 'f',
        CellKind::Shark => 'S',
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let width = snapshot.width() as usize;
        let mut frame = String::with_capacity((width + 1) * snapshot.height() as usize + 1);
        for (pos, kind) in snapshot.iter() {
            frame.push(glyph(kind));
            if pos.x as usize == width - 1 {
                frame.push('\n');
            }
        }
        frame.push('\n');

        self.out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(Error::Io)?;
        self.frames += 1;
        Ok(())
    }
}
