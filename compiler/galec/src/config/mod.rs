//! Compiler configuration.
//!
//! [`CompilerConfig`] holds every setting of a compilation unit. The
//! limits handed to the diagnostic queue, the arena and the type context
//! are derived from it.

use std::path::PathBuf;

use gale_diagnostic::DiagnosticConfig;
use gale_ir::ArenaConfig;
use gale_types::CtxOptions;

/// Invalid command line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("option '{flag}' needs a value")]
    MissingValue { flag: String },
    #[error("option '{flag}' expects a number, got '{value}'")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

/// Settings of one compilation unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Package being compiled (--package=<name>).
    pub package: String,
    /// Source file name, used in diagnostics and the export form (--file=<name>).
    pub filename: String,
    /// Artifact removed when compilation fails (-o <path>).
    pub output: Option<PathBuf>,
    /// Record every error instead of stopping at the limit (-e).
    pub report_all_errors: bool,
    /// Errors after which compilation stops (--error-limit=<n>).
    pub error_limit: usize,
    /// Log generated trampolines (-r).
    pub trace_trampolines: bool,
    pub arena: ArenaConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        let diagnostics = DiagnosticConfig::default();
        Self {
            package: "main".to_string(),
            filename: String::new(),
            output: None,
            report_all_errors: diagnostics.report_all,
            error_limit: diagnostics.error_limit,
            trace_trampolines: false,
            arena: ArenaConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Parse command line flags, starting from the defaults.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            if arg == "-e" {
                config.report_all_errors = true;
            } else if arg == "-r" {
                config.trace_trampolines = true;
            } else if arg == "-o" {
                let Some(path) = args.next() else {
                    return Err(ConfigError::MissingValue {
                        flag: arg.clone(),
                    });
                };
                config.output = Some(PathBuf::from(path));
            } else if let Some(path) = arg.strip_prefix("-o=") {
                config.output = Some(PathBuf::from(path));
            } else if let Some(package) = arg.strip_prefix("--package=") {
                config.package = package.to_string();
            } else if let Some(file) = arg.strip_prefix("--file=") {
                config.filename = file.to_string();
            } else if let Some(limit) = arg.strip_prefix("--error-limit=") {
                config.error_limit = limit.parse().map_err(|_| ConfigError::InvalidNumber {
                    flag: "--error-limit".to_string(),
                    value: limit.to_string(),
                })?;
            } else {
                return Err(ConfigError::UnknownOption(arg.clone()));
            }
        }
        tracing::debug!(?config, "configuration");
        Ok(config)
    }

    pub fn diagnostic_config(&self) -> DiagnosticConfig {
        DiagnosticConfig {
            error_limit: self.error_limit,
            report_all: self.report_all_errors,
        }
    }

    pub fn ctx_options(&self) -> CtxOptions {
        CtxOptions {
            filename: self.filename.clone(),
            trace_trampolines: self.trace_trampolines,
        }
    }
}

#[cfg(test)]
mod tests;
