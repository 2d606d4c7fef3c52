//! One console plus the stream its scrollback is echoed to.

use std::io::Write;
use std::time::Duration;

use dterm::{Console, Event};
use web_time::Instant;

use crate::error::Result;

#[derive(Debug)]
pub struct Session<W: Write> {
    console: Console,
    out: W,
    /// Scrollback records already written to `out`.
    printed: usize,
    show_frame: bool,
}

impl<W: Write> Session<W> {
    pub fn new(console: Console, out: W, show_frame: bool) -> Self {
        Self {
            console,
            out,
            printed: 0,
            show_frame,
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Submit one line. Returns `false` once the overlay has been closed
    /// (by `exit`), which ends the session.
    pub fn submit(&mut self, line: &str) -> Result<bool> {
        tracing::trace!(target: "dterm.cli", line, "submit");
        self.console.execute(line);
        self.flush()?;
        if let Some(page) = self.console.last_page() {
            writeln!(self.out, "{}", page.notice())?;
        }
        if self.show_frame {
            self.write_frame()?;
        }
        Ok(self.console.terminal().is_open())
    }

    /// Caret blink, settled loads, and autosave.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        self.console.handle_event(&Event::Tick(now));
        self.flush()
    }

    /// Let outstanding loads settle, print their notices, and save.
    pub fn finish(&mut self, timeout: Duration) -> Result<()> {
        if self.console.pending_tasks() > 0 {
            self.console.wait_for_tasks(timeout);
        }
        self.flush()?;
        self.console.autosave()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let records = self.console.terminal().scrollback().records();
        for record in &records[self.printed.min(records.len())..] {
            writeln!(self.out, "{record}")?;
        }
        self.printed = records.len();
        self.out.flush()?;
        Ok(())
    }

    fn write_frame(&mut self) -> Result<()> {
        let frame = self.console.frame();
        writeln!(self.out, "+{}", "-".repeat(40))?;
        for line in frame.visible_output_lines.iter().chain(&frame.visible_input_lines) {
            writeln!(self.out, "| {line}")?;
        }
        writeln!(self.out, "+{}", "-".repeat(40))?;
        Ok(())
    }
}
