//! Event Logger
//!
//! Append-only JSONL log of interaction steps.

use axelrod_core::{StepObserver, StepOutcome};
use axelrod_events::{generate_event_id, InteractionEvent};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes one [`InteractionEvent`] per observed step
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    next_event_id: u64,
    /// Step number stamped on the next observed outcome
    step: u64,
    /// First write failure seen while observing
    error: Option<io::Error>,
}

impl EventLogger {
    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            next_event_id: 1,
            step: 0,
            error: None,
        })
    }

    /// Create a logger that discards events (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            next_event_id: 1,
            step: 0,
            error: None,
        }
    }

    /// Generate the next event ID
    pub fn next_id(&mut self) -> String {
        let id = generate_event_id(self.next_event_id);
        self.next_event_id += 1;
        id
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn set_step(&mut self, step: u64) {
        self.step = step;
    }

    /// Log an event to the file
    pub fn log(&mut self, event: &InteractionEvent) -> io::Result<()> {
        self.event_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(event)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Returns the first write failure since the last call, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl StepObserver for EventLogger {
    fn observe(&mut self, outcome: &StepOutcome) {
        let event = outcome.to_event(self.next_id(), self.step);
        if let Err(e) = self.log(&event) {
            self.error.get_or_insert(e);
        }
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("failed to flush event logger: {}", e);
        }
    }
}
