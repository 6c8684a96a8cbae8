//! Append-only audit event sink.
//!
//! The engine appends exactly one [`AuditEvent`] per successful settlement
//! and never reads the sink back. [`MemoryEventLog`] is the in-process
//! implementation; deployments with durable audit requirements plug in
//! their own sink.

use openrelay_types::AuditEvent;

/// Append-only sink for settlement audit records.
pub trait EventSink {
    fn append(&mut self, event: AuditEvent);
}

/// In-memory audit log.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Vec<AuditEvent>,
}

impl MemoryEventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most recently appended event.
    #[must_use]
    pub fn last(&self) -> Option<&AuditEvent> {
        self.events.last()
    }

    /// Iterate events in append order.
    pub fn iter(&self) -> impl Iterator<Item = &AuditEvent> {
        self.events.iter()
    }
}

impl EventSink for MemoryEventLog {
    fn append(&mut self, event: AuditEvent) {
        self.events.push(event);
    }
}
