//! Render element arena for the KRB UI runtime.
//!
//! `krb-format` produces a flat, parsed document; `krb-build` turns that
//! into the tree this crate's [`RenderContext`] owns. Elements live in a
//! single `Vec` and are addressed by [`ElementId`] rather than by pointer
//! or `Rc`, so the whole tree can be dropped in one place and no element
//! can outlive its arena.

mod component;
mod context;
mod element;
mod error;
mod id;

pub use component::ComponentInstance;
pub use context::RenderContext;
pub use element::{
    Alignment, ComponentInstanceRef, ElementKind, LayoutDirection, PositionMode, RenderElement,
    TextAlignment,
};
pub use error::{ModelError, Result};
pub use id::ElementId;
