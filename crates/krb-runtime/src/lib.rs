//! Ties parsing, building, layout, and interaction together behind one
//! frame loop (spec §4.8). `Runtime<B>` is generic over
//! [`krb_backend::GraphicsBackend`] — this crate never names a concrete
//! window or rendering library, only the trait a host program's backend
//! must satisfy.
//!
//! Host programs call [`Runtime::new`] with a parsed [`krb_format::Document`],
//! register handlers and component hooks, then either call
//! [`Runtime::run`] to block on a real window or drive [`Runtime::step`]
//! and [`Runtime::draw_frame`] one call at a time — the seam tests use
//! to assert on a frame's outcome deterministically.

mod config;
mod error;
mod frame;
mod metrics;
mod runtime;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use frame::{FrameInput, FrameOutcome};
pub use runtime::Runtime;
