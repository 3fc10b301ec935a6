//! Trace span lifecycle management.
//!
//! # Responsibilities
//! - Represent one hop of relay work as a scoped span
//! - Derive child spans mirroring the forward/escalate hop structure
//! - Guarantee each span is finished exactly once on every exit path
//! - Emit W3C `traceparent` context for outbound requests
//!
//! # Design Decisions
//! - Finishing is guarded; a second finish is a no-op
//! - Deriving a child from a finished span is rejected synchronously,
//!   before any network call is attempted
//! - Span closure is reported through structured log events

use std::time::Instant;

use uuid::Uuid;

use crate::relay::error::{RelayError, RelayResult};

/// A unit of distributed-tracing context covering one relay hop.
///
/// A span is owned exclusively by the operation that created it and must be
/// finished by that operation before returning control.
#[derive(Debug)]
pub struct Span {
    name: String,
    trace_id: Uuid,
    span_id: u64,
    parent_id: Option<u64>,
    started: Instant,
    finished: bool,
    error: Option<String>,
}

impl Span {
    /// Start a new root span.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trace_id: Uuid::new_v4(),
            span_id: new_span_id(),
            parent_id: None,
            started: Instant::now(),
            finished: false,
            error: None,
        }
    }

    /// Derive a child span for one forwarding or escalation attempt.
    ///
    /// Fails if this span has already been finished: a closed span cannot
    /// accept further tagging, so attaching work to it would corrupt the
    /// trace.
    pub fn child(&self, name: impl Into<String>) -> RelayResult<Span> {
        let name = name.into();
        if self.finished {
            return Err(RelayError::Validation(format!(
                "span '{}' is already finished and cannot create child span '{}'",
                self.name, name
            )));
        }
        Ok(Span {
            name,
            trace_id: self.trace_id,
            span_id: new_span_id(),
            parent_id: Some(self.span_id),
            started: Instant::now(),
            finished: false,
            error: None,
        })
    }

    /// Finish the span successfully. A second call is a no-op.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        tracing::debug!(
            span = %self.name,
            trace_id = %self.trace_id.simple(),
            span_id = self.span_id,
            parent_id = self.parent_id,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "span finished"
        );
    }

    /// Finish the span with error status. A second call is a no-op.
    pub fn finish_with_error(&mut self, err: &RelayError) {
        if self.finished {
            return;
        }
        self.error = Some(err.to_string());
        self.finished = true;
        tracing::warn!(
            span = %self.name,
            trace_id = %self.trace_id.simple(),
            span_id = self.span_id,
            parent_id = self.parent_id,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            error = %err,
            "span finished with error"
        );
    }

    /// Whether this span has been finished.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Span name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Error recorded at finish time, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// W3C Trace Context header value for outbound propagation.
    pub fn traceparent(&self) -> String {
        format!("00-{}-{:016x}-01", self.trace_id.simple(), self.span_id)
    }
}

fn new_span_id() -> u64 {
    // Low 64 bits of a v4 UUID are random.
    Uuid::new_v4().as_u128() as u64
}
