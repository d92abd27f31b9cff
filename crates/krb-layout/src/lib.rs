//! Two-pass flow layout for KRB render trees.
//!
//! Recomputes every root's subtree in full on every call rather than
//! tracking dirty subtrees incrementally: there is no incremental
//! re-layout in this runtime, and `RenderContext` is a single owned arena
//! rather than a tree behind generic trait bounds, so there is no
//! multi-implementation abstraction to preserve across calls.

mod flow;
mod intrinsic;
mod measure;

pub use flow::layout_frame;
pub use intrinsic::intrinsic_size;
pub use measure::{Metrics, NullMetrics};
