//! One compilation unit, from analysis to reporting.
//!
//! The caller drives analysis against [`Session::ctx_mut`]. [`Session::finish`]
//! then runs the deferred interface checks, hands every diagnostic to an
//! emitter and, when the unit failed, removes the output artifact so no
//! partial build is left behind.

use std::io;

use gale_diagnostic::emitter::DiagnosticEmitter;
use gale_diagnostic::queue::too_many_errors;
use gale_diagnostic::FatalError;
use gale_types::TypeCtx;

use crate::config::CompilerConfig;
use crate::tracing_setup::init_tracing;

/// Why a compilation unit failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Compilation was cut short.
    #[error(transparent)]
    Fatal(#[from] FatalError),
    /// Compilation ran to the end but reported errors.
    #[error("{count} error(s) reported")]
    Errors { count: usize },
}

pub struct Session {
    config: CompilerConfig,
    ctx: TypeCtx,
}

impl Session {
    pub fn new(config: CompilerConfig) -> Self {
        init_tracing();
        let ctx = TypeCtx::with_config(
            &config.package,
            config.arena,
            config.diagnostic_config(),
            config.ctx_options(),
        );
        tracing::debug!(package = %config.package, "session started");
        Session { config, ctx }
    }

    /// Run `analyze` in a fresh session and finish it.
    pub fn compile<E, F>(config: CompilerConfig, emitter: &mut E, analyze: F) -> Result<(), SessionError>
    where
        E: DiagnosticEmitter,
        F: FnOnce(&mut TypeCtx) -> Result<(), FatalError>,
    {
        let mut session = Session::new(config);
        let analysis = analyze(session.ctx_mut());
        session.finish(analysis, emitter)
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn ctx(&self) -> &TypeCtx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut TypeCtx {
        &mut self.ctx
    }

    /// Close the unit.
    ///
    /// The interface checks run only when `analysis` completed. Diagnostics
    /// are emitted in the order they were recorded, followed by "too many
    /// errors" on a fatal stop and then the summary.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn finish(
        mut self,
        analysis: Result<(), FatalError>,
        emitter: &mut impl DiagnosticEmitter,
    ) -> Result<(), SessionError> {
        let outcome = analysis.and_then(|()| self.ctx.run_all_checks());

        let errors = self.ctx.diagnostics.error_count();
        let warnings = self.ctx.diagnostics.warning_count();
        let mut diagnostics = self.ctx.diagnostics.flush();
        if outcome.is_err() {
            let line = diagnostics.last().map_or_else(|| self.ctx.line(), |d| d.line);
            diagnostics.push(too_many_errors(line));
        }
        emitter.emit_all(&diagnostics);
        emitter.emit_summary(errors, warnings);
        emitter.flush();

        if let Err(fatal) = outcome {
            self.remove_output();
            return Err(fatal.into());
        }
        if errors > 0 {
            self.remove_output();
            return Err(SessionError::Errors { count: errors });
        }
        Ok(())
    }

    fn remove_output(&self) {
        let Some(path) = &self.config.output else {
            return;
        };
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed output"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "cannot remove output"),
        }
    }
}
