//! `tracing` bootstrap shared by `krb-runtime` and the demo programs.
//!
//! Mirrors the original C runtime's heavy `eprintln!` parse/render tracing
//! (see `examples/other_examples/..._kryon-core-src-krb.rs.rs`) but routed
//! through leveled, structured `tracing` events instead of raw prints, so a
//! host embedding the runtime can filter or redirect it.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global `tracing` subscriber reading `RUST_LOG` (default
/// `info`). Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
