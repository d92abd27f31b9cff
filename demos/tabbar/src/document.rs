//! Hand-assembles the document this demo renders: a content area plus a
//! `TabBar` component placeholder, expanded and positioned entirely by
//! the custom-component hook registered in `main.rs`. See
//! `demos/button/src/document.rs` for why this is built byte-by-byte
//! instead of loaded from a `.krb` asset.

pub const WINDOW_WIDTH: u16 = 480;
pub const WINDOW_HEIGHT: u16 = 360;
pub const TABBAR_HEIGHT: f32 = 50.0;
/// The tab bar's absolute top-left y, given the App's column layout
/// stacks a `WINDOW_HEIGHT - TABBAR_HEIGHT`-tall content area above it.
/// The component hook needs this in screen-space terms because it runs
/// once, before the first layout pass has positioned anything.
pub const TABBAR_Y: f32 = WINDOW_HEIGHT as f32 - TABBAR_HEIGHT;

const HEADER_SIZE: u32 = 48;

const KIND_APP: u8 = 0x00;
const KIND_CONTAINER: u8 = 0x01;
const KIND_TEXT: u8 = 0x02;

const PROP_WINDOW_TITLE: u8 = 0x22;
const PROP_TEXT_CONTENT: u8 = 0x05;
const PROP_BACKGROUND_COLOR: u8 = 0x01;

const TYPE_STRING_REF: u8 = 0x05;
const TYPE_COLOR: u8 = 0x03;

#[derive(Default, Clone)]
struct Element {
    kind: u8,
    size: (u16, u16),
    layout_byte: u8,
    properties: Vec<u8>,
    property_count: u8,
    custom_properties: Vec<u8>,
    custom_property_count: u8,
    child_count: u8,
}

impl Element {
    fn property(mut self, id: u8, value_type: u8, data: &[u8]) -> Self {
        self.properties.push(id);
        self.properties.push(value_type);
        self.properties.push(data.len() as u8);
        self.properties.extend_from_slice(data);
        self.property_count += 1;
        self
    }

    fn custom_property(mut self, key_index: u8, value_type: u8, data: &[u8]) -> Self {
        self.custom_properties.push(key_index);
        self.custom_properties.push(value_type);
        self.custom_properties.push(data.len() as u8);
        self.custom_properties.extend_from_slice(data);
        self.custom_property_count += 1;
        self
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![self.kind, 0];
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&self.size.0.to_le_bytes());
        buf.extend_from_slice(&self.size.1.to_le_bytes());
        buf.push(self.layout_byte);
        buf.push(0); // style_id
        buf.push(self.property_count);
        buf.push(self.custom_property_count);
        buf.push(0); // event_count
        buf.push(0); // animation_count
        buf.push(self.child_count);
        buf.extend_from_slice(&self.properties);
        buf.extend_from_slice(&self.custom_properties);
        buf
    }
}

fn component_definition(name_index: u8, template: &[Element]) -> Vec<u8> {
    let mut buf = vec![name_index, 0]; // no declared parameters
    for element in template {
        buf.extend_from_slice(&element.encode());
    }
    buf
}

fn string_table(strings: &[&str]) -> Vec<u8> {
    let mut buf = Vec::new();
    for s in strings {
        buf.push(s.len() as u8);
        buf.extend_from_slice(s.as_bytes());
    }
    buf
}

#[allow(clippy::too_many_arguments)]
fn header(
    element_count: u16,
    component_def_count: u16,
    string_count: u16,
    elements_offset: u32,
    component_defs_offset: u32,
    strings_offset: u32,
    total_size: u32,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"KRB1");
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // flags: HAS_APP
    buf.extend_from_slice(&element_count.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // styles
    buf.extend_from_slice(&component_def_count.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // animations
    buf.extend_from_slice(&string_count.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // resources
    buf.extend_from_slice(&elements_offset.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // style offset
    buf.extend_from_slice(&component_defs_offset.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // animation offset
    buf.extend_from_slice(&strings_offset.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // resource offset
    buf.extend_from_slice(&total_size.to_le_bytes());
    buf
}

/// A content area and a bottom `TabBar` with three tabs, the tabbar
/// positioned and sized entirely by the registered component hook rather
/// than by any declared position/size on the placeholder.
pub fn document_bytes() -> Vec<u8> {
    // String table indices: 0="KRB TabBar Demo", 1="Content area",
    // 2="_componentName", 3="TabBar", 4="position", 5="bottom",
    // 6="orientation", 7="row", 8="Home", 9="Search", 10="Settings".
    let strings = [
        "KRB TabBar Demo",
        "Content area",
        "_componentName",
        "TabBar",
        "position",
        "bottom",
        "orientation",
        "row",
        "Home",
        "Search",
        "Settings",
    ];

    let app = Element {
        kind: KIND_APP,
        size: (WINDOW_WIDTH, WINDOW_HEIGHT),
        layout_byte: 0b0000_0001, // column direction, start alignment
        child_count: 2,
        ..Default::default()
    }
    .property(PROP_WINDOW_TITLE, TYPE_STRING_REF, &[0]);

    let content = Element {
        kind: KIND_TEXT,
        size: (WINDOW_WIDTH, WINDOW_HEIGHT - TABBAR_HEIGHT as u16),
        ..Default::default()
    }
    .property(PROP_TEXT_CONTENT, TYPE_STRING_REF, &[1]);

    let tabbar_placeholder = Element {
        kind: KIND_CONTAINER,
        ..Default::default()
    }
    .custom_property(2, TYPE_STRING_REF, &[3]) // _componentName -> "TabBar"
    .custom_property(4, TYPE_STRING_REF, &[5]) // position -> "bottom"
    .custom_property(6, TYPE_STRING_REF, &[7]); // orientation -> "row"

    let tab_button = |label_index: u8, background: [u8; 4]| {
        Element {
            kind: KIND_TEXT,
            size: (WINDOW_WIDTH / 3, TABBAR_HEIGHT as u16),
            ..Default::default()
        }
        .property(PROP_TEXT_CONTENT, TYPE_STRING_REF, &[label_index])
        .property(PROP_BACKGROUND_COLOR, TYPE_COLOR, &background)
    };

    let tabbar_template_root = Element {
        kind: KIND_CONTAINER,
        size: (WINDOW_WIDTH, TABBAR_HEIGHT as u16),
        layout_byte: 0b0000_0000, // row direction, start alignment
        child_count: 3,
        ..Default::default()
    };
    let tabbar_definition = component_definition(
        3, // name_index -> "TabBar"
        &[
            tabbar_template_root,
            tab_button(8, [230, 230, 230, 255]),
            tab_button(9, [230, 230, 230, 255]),
            tab_button(10, [230, 230, 230, 255]),
        ],
    );

    let elements_bytes: Vec<u8> = [app.encode(), content.encode(), tabbar_placeholder.encode()].concat();
    let strings_bytes = string_table(&strings);

    let elements_offset = HEADER_SIZE;
    let component_defs_offset = elements_offset + elements_bytes.len() as u32;
    let strings_offset = component_defs_offset + tabbar_definition.len() as u32;
    let total_size = strings_offset + strings_bytes.len() as u32;

    let mut bytes = header(
        3,
        1,
        strings.len() as u16,
        elements_offset,
        component_defs_offset,
        strings_offset,
        total_size,
    );
    bytes.extend_from_slice(&elements_bytes);
    bytes.extend_from_slice(&tabbar_definition);
    bytes.extend_from_slice(&strings_bytes);
    bytes
}
