//! Host integration traits for the KRB runtime (spec §4.1 component I):
//! the Graphics Backend, Handler Registry, and Custom Component Registry.
//! `krb-runtime` is generic over [`GraphicsBackend`] and owns one of each
//! registry; nothing in this crate names a concrete window or rendering
//! library.

mod component_registry;
mod graphics;
mod handler;

pub use component_registry::CustomComponentRegistry;
pub use graphics::{GraphicsBackend, TextureHandle};
pub use handler::HandlerRegistry;
