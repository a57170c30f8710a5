//! Diagnostic system for the Gale front end.
//!
//! Two tiers of failure are modelled here:
//!
//! - **User errors** are [`Diagnostic`] values pushed into a
//!   [`DiagnosticQueue`]. Compilation keeps going and gathers more of them
//!   until the configured error limit is reached, at which point the queue
//!   hands back [`FatalError::TooManyErrors`] and the caller unwinds with `?`.
//! - **Internal invariant violations** go through [`ice`], which logs and
//!   panics. They describe a defect in the compiler, never in the program
//!   being compiled.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! recorded. It can only be obtained from the queue.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic)?;
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
mod fatal;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use fatal::{ice, FatalError};
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue, DiagnosticSeverity};
