//! Per-descriptor emission outcomes.

use std::path::{Path, PathBuf};

use crate::diagnostic::IoFailure;

/// What happened to one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorOutcome {
    pub name: String,
    pub result: Result<PathBuf, IoFailure>,
}

/// Outcomes of one emission call, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub outcomes: Vec<DescriptorOutcome>,
}

impl EmitReport {
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
    }

    pub fn failures(&self) -> impl Iterator<Item = &IoFailure> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
