use std::collections::HashMap;

use krb_types::{Color, Rect};

use crate::id::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    App,
    Container,
    Text,
    Image,
    Button,
    Input,
    List,
    Grid,
    Scrollable,
    Unknown(u8),
}

impl From<krb_format::ElementKind> for ElementKind {
    fn from(value: krb_format::ElementKind) -> Self {
        match value {
            krb_format::ElementKind::App => Self::App,
            krb_format::ElementKind::Container => Self::Container,
            krb_format::ElementKind::Text => Self::Text,
            krb_format::ElementKind::Image => Self::Image,
            krb_format::ElementKind::Button => Self::Button,
            krb_format::ElementKind::Input => Self::Input,
            krb_format::ElementKind::List => Self::List,
            krb_format::ElementKind::Grid => Self::Grid,
            krb_format::ElementKind::Scrollable => Self::Scrollable,
            krb_format::ElementKind::Unknown(b) => Self::Unknown(b),
        }
    }
}

/// Text alignment (spec §4.3 property table: `0=start,1=center,2=end,
/// 3=space-between`). `0` is not a distinct alignment so much as "unset" —
/// callers track that separately (see [`RenderElement::text_alignment`])
/// and only call [`TextAlignment::from_byte`] for an explicit non-zero
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Start,
    Center,
    End,
    SpaceBetween,
}

impl TextAlignment {
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Self::Center,
            2 => Self::End,
            3 => Self::SpaceBetween,
            _ => Self::Start,
        }
    }
}

pub use krb_format::{Alignment, LayoutDirection, PositionMode};

/// A back-pointer from a generated element to the component instance it
/// belongs to, so hit testing and handler dispatch can identify which
/// instance produced a given subtree (spec §4.5).
#[derive(Debug, Clone, Copy)]
pub struct ComponentInstanceRef {
    pub definition_index: u16,
    pub placeholder: ElementId,
}

/// A single node in the render tree (spec §3 "Render element").
///
/// Colors are `Option<Color>` during and immediately after style
/// resolution: `None` means "unset", not "transparent". Collapsing that
/// to an alpha-zero sentinel was a bug in the format this runtime is
/// built from; keeping it as `Option` through build and into layout
/// avoids resurrecting it (spec §9 Design Notes).
#[derive(Debug, Clone)]
pub struct RenderElement {
    pub kind: ElementKind,
    /// Position in the original flat element table, stable across
    /// expansion and linking; used for diagnostics and handler lookups
    /// by declaration order.
    pub original_index: u32,

    pub background_color: Option<Color>,
    pub foreground_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_widths: [f32; 4],

    pub text: Option<String>,
    /// `None` until a style/direct property or an inherited ancestor value
    /// sets it (spec §4.4 step 5: `text_alignment == 0` inherits, and a
    /// text element with no ancestor override defaults to `Center`).
    pub text_alignment: Option<TextAlignment>,
    pub font_size: f32,

    pub image_resource: Option<u16>,

    pub is_visible: bool,
    pub is_interactive: bool,
    /// Resolved handler name for this element's first `click` event entry
    /// (spec §4.8 step 4), if any. Looked up by name in the Handler
    /// Registry at dispatch time; `None` means no click handler.
    pub click_handler: Option<String>,
    /// True for a component's placeholder element: present in the flat
    /// table purely to mark expansion point and parameter overrides, but
    /// removed from the tree once its instance root is linked in (spec
    /// §4.5).
    pub is_placeholder: bool,
    pub component_instance: Option<ComponentInstanceRef>,

    pub layout_direction: LayoutDirection,
    pub alignment: Alignment,
    /// Layout byte's grow bit (spec §6.1, §4.7 step 1): container/app
    /// elements with this set inherit the parent's content dimensions
    /// instead of falling back to a fixed minimum even when they have no
    /// parent-derived size otherwise.
    pub grow: bool,
    pub position_mode: PositionMode,
    pub declared_position: (i16, i16),
    pub declared_size: (u16, u16),

    pub custom_properties: HashMap<String, String>,

    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,

    /// Final computed screen-space box, written by the layout pass.
    /// `Rect::ZERO` until layout runs.
    pub render_rect: Rect,
    /// Set by a custom-component hook (spec §4.9) that has already chosen
    /// this element's `render_rect`. Layout honors it as-is instead of
    /// recomputing intrinsic size and position from the element's
    /// declared properties, every frame, until the hook clears it.
    pub render_preset: bool,
}

impl RenderElement {
    #[must_use]
    pub fn new(kind: ElementKind, original_index: u32) -> Self {
        Self {
            kind,
            original_index,
            background_color: None,
            foreground_color: None,
            border_color: None,
            border_widths: [0.0; 4],
            text: None,
            text_alignment: None,
            font_size: 0.0,
            image_resource: None,
            is_visible: true,
            is_interactive: false,
            click_handler: None,
            is_placeholder: false,
            component_instance: None,
            layout_direction: LayoutDirection::Row,
            alignment: Alignment::Start,
            grow: false,
            position_mode: PositionMode::Flow,
            declared_position: (0, 0),
            declared_size: (0, 0),
            custom_properties: HashMap::new(),
            parent: None,
            children: Vec::new(),
            render_rect: Rect::ZERO,
            render_preset: false,
        }
    }

    #[must_use]
    pub fn is_component_instance_root(&self) -> bool {
        self.component_instance.is_some() && !self.is_placeholder
    }
}
