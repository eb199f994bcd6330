//! Diagnostics sink for the enrichment pipeline.
//!
//! The core never prints. Every stage reports through a [`Reporter`], which the
//! binary backs with the `log` facade and tests back with a [`Recorder`].

use std::cell::RefCell;

/// A hash reference that did not resolve through the [`HashIndex`](crate::textmap::HashIndex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// Table the record came from, e.g. `"GridFightBackEquipment"`
    pub table: &'static str,
    /// Position of the record in its input array
    pub index: usize,
    /// Output field the text would have landed in
    pub field: &'static str,
    /// String form of the hash, or `None` when the reference was absent
    pub key: Option<String>,
}

pub trait Reporter {
    /// Stage progress ("Loading files...").
    fn progress(&self, message: &str);

    /// Recoverable oddity in the input.
    fn warn(&self, message: &str);

    /// A failed file operation. The stage is skipped, the run may continue.
    fn error(&self, message: &str);

    /// A hash reference fell back to the sentinel text.
    fn unresolved(&self, miss: &Unresolved) {
        let _ = miss;
    }
}

/// Forwards everything to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn progress(&self, message: &str) {
        log::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
    }

    fn unresolved(&self, miss: &Unresolved) {
        match &miss.key {
            Some(key) => log::debug!(
                "{}[{}].{}: hash {} not in textmap",
                miss.table, miss.index, miss.field, key
            ),
            None => log::debug!("{}[{}].{}: no hash", miss.table, miss.index, miss.field),
        }
    }
}

/// Event captured by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Progress(String),
    Warn(String),
    Error(String),
    Unresolved(Unresolved),
}

/// Keeps every reported event in memory, in order.
#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Error(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn progress_messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Progress(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl Reporter for Recorder {
    fn progress(&self, message: &str) {
        self.push(Event::Progress(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.push(Event::Warn(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }

    fn unresolved(&self, miss: &Unresolved) {
        self.push(Event::Unresolved(miss.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let rec = Recorder::new();
        rec.progress("one");
        rec.error("two");
        rec.warn("three");

        assert_eq!(
            rec.events(),
            vec![
                Event::Progress("one".to_string()),
                Event::Error("two".to_string()),
                Event::Warn("three".to_string()),
            ]
        );
        assert_eq!(rec.errors(), vec!["two".to_string()]);
        assert_eq!(rec.progress_messages(), vec!["one".to_string()]);
    }
}
