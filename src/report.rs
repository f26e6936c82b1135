//! Diagnostics sink for failed or ignored updates.
//!
//! The model never panics or aborts on bad input. Instead it hands a
//! [`Diagnostic`] to its [`Reporter`] and keeps the last good state.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, warn};

use crate::domain::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl From<&TableError> for Diagnostic {
    fn from(err: &TableError) -> Self {
        match err {
            TableError::UnknownSortColumn(_)
            | TableError::UnknownHeader(_)
            | TableError::HeaderIndexOutOfRange(_) => Diagnostic::warning(err.to_string()),
            _ => Diagnostic::error(err.to_string()),
        }
    }
}

pub trait Reporter {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => warn!("{}", diagnostic.message),
            Severity::Error => error!("{}", diagnostic.message),
        }
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer, so a host
/// can hand one clone to the model and read from another.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries.borrow_mut().push(diagnostic.clone());
    }
}
