//! Binary parser for the KRB UI description format.
//!
//! This crate turns a `.krb` byte slice into a flat, validated
//! [`Document`]: a header plus the element, style, component-definition,
//! script, string, and resource tables it points to. It does not build a
//! tree, resolve styles, or expand components — those are `krb-build`'s
//! job, working on top of the records this crate produces.

mod component;
mod document;
mod element;
mod error;
mod header;
mod reader;
mod resource;
mod script;
mod strings;
mod style;

pub use component::{ComponentDefinition, ParameterDef};
pub use document::{parse, Document};
pub use element::{
    Alignment, CustomProperty, ElementHeader, ElementKind, ElementRecord, EventEntry, EventType,
    LayoutDirection, PositionMode, Property, PropertyId, PropertyValue, StatePropertySet,
};
pub use error::{KrbError, Result, Section};
pub use header::{Header, HeaderFlags, SectionCounts, SectionOffsets};
pub use reader::ByteReader;
pub use resource::{Resource, ResourceKind};
pub use script::{Script, ScriptStorage};
pub use strings::StringTable;
pub use style::Style;
