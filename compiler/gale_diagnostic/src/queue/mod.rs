//! Diagnostic queue for collecting diagnostics under an error limit.
//!
//! Features:
//! - Error limit (default 10) that turns into [`FatalError::TooManyErrors`]
//! - "Report all" mode that disables the limit
//! - Hard/soft classification of errors
//! - Insertion order is reporting order
//! - `ErrorGuaranteed` proof that errors were emitted

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed, FatalError};

/// Severity level for a queued error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Hard error: the program is wrong.
    Hard,
    /// Soft error: the program needs an explicit annotation (such as a type
    /// assertion) to be accepted.
    Soft,
}

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Number of errors that aborts compilation.
    pub error_limit: usize,
    /// Record every error and never abort on the limit.
    pub report_all: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            report_all: false,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limit (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            report_all: true,
        }
    }
}

/// Queued diagnostic with its error classification.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct QueuedDiagnostic {
    pub(crate) diagnostic: Diagnostic,
    pub(crate) soft: bool,
}

/// Queue for collecting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.emit_error(diagnostic)?;
/// // ... more errors; the 10th returns Err(FatalError::TooManyErrors)
/// let all = queue.flush();
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    /// Collected diagnostics, in insertion order.
    diagnostics: Vec<QueuedDiagnostic>,
    /// Count of errors (not warnings/notes).
    error_count: usize,
    /// Count of warnings.
    warning_count: usize,
    /// Whether we've seen a hard error.
    has_hard_error: bool,
    /// Configuration.
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            has_hard_error: false,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Add a diagnostic with a severity level.
    ///
    /// Returns `Err` once the error limit is reached: the error that reaches
    /// the limit is recorded, every later one is refused.
    pub fn add_with_severity(
        &mut self,
        diag: Diagnostic,
        severity: DiagnosticSeverity,
    ) -> Result<ErrorGuaranteed, FatalError> {
        let soft = matches!(severity, DiagnosticSeverity::Soft);
        self.add_internal(diag, soft)
    }

    fn add_internal(
        &mut self,
        diag: Diagnostic,
        soft: bool,
    ) -> Result<ErrorGuaranteed, FatalError> {
        if self.limit_reached() {
            return Err(FatalError::TooManyErrors {
                count: self.error_count,
            });
        }

        let is_error = diag.is_error();
        tracing::debug!(code = %diag.code, line = diag.line, soft, "diagnostic");

        if is_error && !soft {
            self.has_hard_error = true;
        }
        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            soft,
        });

        if !is_error {
            self.warning_count += 1;
            return Ok(ErrorGuaranteed::new());
        }

        self.error_count += 1;
        if self.limit_reached() {
            tracing::error!(count = self.error_count, "error limit reached");
            return Err(FatalError::TooManyErrors {
                count: self.error_count,
            });
        }
        Ok(ErrorGuaranteed::new())
    }

    /// Emit a hard error and get proof it was emitted.
    pub fn emit_error(&mut self, diag: Diagnostic) -> Result<ErrorGuaranteed, FatalError> {
        self.add_internal(diag, false)
    }

    /// Emit a soft error (one that an explicit annotation would silence).
    pub fn emit_soft_error(&mut self, diag: Diagnostic) -> Result<ErrorGuaranteed, FatalError> {
        self.add_internal(diag, true)
    }

    /// Record a warning. Warnings never count toward the error limit.
    pub fn warn(&mut self, diag: Diagnostic) {
        self.warning_count += 1;
        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            soft: false,
        });
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        !self.config.report_all && self.error_count >= self.config.error_limit
    }

    /// Get the number of errors collected.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the number of warnings collected.
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Check if any hard errors have been recorded.
    pub fn has_hard_error(&self) -> bool {
        self.has_hard_error
    }

    /// Check if any errors were emitted and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Number of soft errors recorded.
    pub fn soft_error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.soft && d.diagnostic.is_error())
            .count()
    }

    /// Return all diagnostics in insertion order and clear the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let result: Vec<Diagnostic> = self.diagnostics.drain(..).map(|d| d.diagnostic).collect();

        self.error_count = 0;
        self.warning_count = 0;
        self.has_hard_error = false;

        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }

    /// Number of queued diagnostics (errors and warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message("too many errors")
        .at_line(line)
}

#[cfg(test)]
mod tests;
