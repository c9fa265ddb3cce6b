//! Error tracking.
//!
//! The emitter reports failures as values. Forwarding them to a tracker is
//! done by the caller layer (see [`crate::Generator`]) with [`report_failures`].

use std::fmt;

use crate::emit::EmitReport;

/// Coarse category of a tracked failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Io,
    Config,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Io => write!(f, "I/O"),
            FailureCategory::Config => write!(f, "config"),
        }
    }
}

/// Receives failures. Fire-and-forget.
pub trait ErrorTracker {
    fn track(&self, category: FailureCategory, message: &str);
}

/// Logs tracked failures with `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorTracker;

impl ErrorTracker for TracingErrorTracker {
    fn track(&self, category: FailureCategory, message: &str) {
        tracing::error!(%category, "generation failed: {}", message);
    }
}

/// Sends one I/O notification per failed descriptor. Returns how many were sent.
pub fn report_failures(report: &EmitReport, tracker: &dyn ErrorTracker) -> usize {
    let mut count = 0;
    for failure in report.failures() {
        tracker.track(FailureCategory::Io, &failure.to_string());
        count += 1;
    }
    count
}
