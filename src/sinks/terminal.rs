//! Terminal panel sink

use anyhow::Result;
use cyber_monitor_core::{align_value, DisplaySink};
use cyber_monitor_types::{Metric, Palette, Severity};
use std::io::Write;

const TITLE: &str = "⬢ MONITOR";
const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
/// Caption column width, colon included
const CAPTION_WIDTH: usize = 6;

/// Draws the panel as plain lines, optionally colored and redrawn in place
pub struct TerminalSink<W: Write + Send> {
    out: W,
    palette: Palette,
    color: bool,
    redraw: bool,
    lines: Vec<String>,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, color: bool, redraw: bool) -> Self {
        Self {
            out,
            palette: Palette::default(),
            color,
            redraw,
            lines: Vec::with_capacity(6),
        }
    }

    fn paint(&self, text: &str, severity: Severity) -> String {
        if self.color {
            format!("{}{}{}", self.palette.severity(severity).ansi_fg(), text, RESET)
        } else {
            text.to_string()
        }
    }
}

impl<W: Write + Send> DisplaySink for TerminalSink<W> {
    fn begin_tick(&mut self) -> Result<()> {
        self.lines.clear();
        Ok(())
    }

    fn show(&mut self, metric: &Metric, text: &str, severity: Severity) -> Result<()> {
        let caption = format!("{}:", metric.kind.caption());
        let value = self.paint(&align_value(text), severity);
        let line = format!("{:<width$}{}", caption, value, width = CAPTION_WIDTH);
        self.lines.push(line);
        Ok(())
    }

    fn end_tick(&mut self) -> Result<()> {
        if self.redraw {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }

        let clock = chrono::Local::now().format("%H:%M:%S");
        if self.color {
            writeln!(self.out, "{}{}{}  {}", self.palette.accent.ansi_fg(), TITLE, RESET, clock)?;
        } else {
            writeln!(self.out, "{}  {}", TITLE, clock)?;
        }

        for line in &self.lines {
            writeln!(self.out, "{}", line)?;
        }
        if !self.redraw {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
