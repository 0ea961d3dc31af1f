// ABOUTME: Terminal rendering of streamed log lines
// ABOUTME: One line per message, optionally prefixed with the server timestamp

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat};
use colored::Colorize;
use yb_logtail::LogSink;
use yb_proto::{Log, Timestamp};

/// Writes log lines to a terminal (or any writer).
pub struct TerminalSink<W> {
    out: W,
    timestamps: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(timestamps: bool) -> Self {
        Self::new(io::stdout(), timestamps)
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, timestamps: bool) -> Self {
        Self { out, timestamps }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> LogSink for TerminalSink<W> {
    fn write_line(&mut self, line: &Log) -> io::Result<()> {
        if self.timestamps {
            if let Some(time) = line.time.as_ref().and_then(format_time) {
                write!(self.out, "{} ", time.dimmed())?;
            }
        }
        writeln!(self.out, "{}", line.message.trim_end_matches(['\r', '\n']))?;
        self.out.flush()
    }
}

/// RFC 3339 rendering of a server timestamp, in UTC with whole seconds.
pub fn format_time(time: &Timestamp) -> Option<String> {
    let nanos = u32::try_from(time.nanos).ok()?;
    DateTime::from_timestamp(time.seconds, nanos)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}
