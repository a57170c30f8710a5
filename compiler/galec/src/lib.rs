//! Gale compiler driver.
//!
//! Wires the front end core to the outside world:
//! - [`CompilerConfig`]: every knob, parsed from command line flags
//! - [`init_tracing`]: the `tracing` subscriber, driven by `GALE_LOG`
//! - [`Session`]: one compilation unit, from analysis through the
//!   end-of-unit interface checks to reporting
//!
//! # Debugging
//!
//! - `GALE_LOG=gale_types=debug`: phase entry points (checks, trampolines)
//! - `GALE_LOG=gale_types::promote=trace`: promotion searches
//! - `GALE_LOG_TREE=1`: hierarchical span output
//!
//! `RUST_LOG` is read when `GALE_LOG` is unset.

mod config;
mod session;
mod tracing_setup;

pub use config::{CompilerConfig, ConfigError};
pub use session::{Session, SessionError};
pub use tracing_setup::init_tracing;
