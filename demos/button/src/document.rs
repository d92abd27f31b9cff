//! Hand-assembles the tiny document this demo renders.
//!
//! There's no `.krb` asset on disk and no compiler crate in this
//! workspace to produce one from a textual source, so the bytes this
//! demo feeds to [`krb_format::parse`] are built directly — the same
//! legacy 48-byte header and flat element table the format crate's own
//! tests construct by hand.

const HEADER_SIZE: u32 = 48;

const KIND_APP: u8 = 0x00;
const KIND_BUTTON: u8 = 0x04;

const PROP_WINDOW_TITLE: u8 = 0x22;
const PROP_TEXT_CONTENT: u8 = 0x05;
const PROP_BACKGROUND_COLOR: u8 = 0x01;
const PROP_FOREGROUND_COLOR: u8 = 0x02;

const TYPE_COLOR: u8 = 0x03;
const TYPE_STRING_REF: u8 = 0x05;

const EVENT_CLICK: u8 = 0x01;

#[derive(Default)]
struct Element {
    kind: u8,
    size: (u16, u16),
    layout_byte: u8,
    properties: Vec<u8>,
    property_count: u8,
    event: Option<u8>,
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

    fn click(mut self, handler_name_index: u8) -> Self {
        self.event = Some(handler_name_index);
        self
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![self.kind, 0];
        buf.extend_from_slice(&0i16.to_le_bytes()); // pos_x
        buf.extend_from_slice(&0i16.to_le_bytes()); // pos_y
        buf.extend_from_slice(&self.size.0.to_le_bytes());
        buf.extend_from_slice(&self.size.1.to_le_bytes());
        buf.push(self.layout_byte);
        buf.push(0); // style_id
        buf.push(self.property_count);
        buf.push(0); // custom_property_count
        buf.push(u8::from(self.event.is_some()));
        buf.push(0); // animation_count
        buf.push(self.child_count);
        buf.extend_from_slice(&self.properties);
        if let Some(handler_index) = self.event {
            buf.push(EVENT_CLICK);
            buf.push(handler_index);
        }
        buf
    }
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
fn header(element_count: u16, string_count: u16, elements_offset: u32, strings_offset: u32, total_size: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"KRB1");
    buf.extend_from_slice(&0u16.to_le_bytes()); // version 0.0 -> legacy header
    buf.extend_from_slice(&1u16.to_le_bytes()); // flags: HAS_APP
    buf.extend_from_slice(&element_count.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // styles
    buf.extend_from_slice(&0u16.to_le_bytes()); // component defs
    buf.extend_from_slice(&0u16.to_le_bytes()); // animations
    buf.extend_from_slice(&string_count.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // resources
    buf.extend_from_slice(&elements_offset.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // style offset
    buf.extend_from_slice(&0u32.to_le_bytes()); // component def offset
    buf.extend_from_slice(&0u32.to_le_bytes()); // animation offset
    buf.extend_from_slice(&strings_offset.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // resource offset
    buf.extend_from_slice(&total_size.to_le_bytes());
    buf
}

/// A 400x300 window holding one centered button with a click handler.
pub fn document_bytes() -> Vec<u8> {
    let strings = ["KRB Button Demo", "Click me", "handleButtonClick"];

    let app = Element {
        kind: KIND_APP,
        size: (400, 300),
        layout_byte: 0b0000_0101, // column direction, center alignment
        child_count: 1,
        ..Default::default()
    }
    .property(PROP_WINDOW_TITLE, TYPE_STRING_REF, &[0])
    .property(PROP_FOREGROUND_COLOR, TYPE_COLOR, &[20, 20, 20, 255]);

    let button = Element {
        kind: KIND_BUTTON,
        size: (160, 48),
        ..Default::default()
    }
    .property(PROP_TEXT_CONTENT, TYPE_STRING_REF, &[1])
    .property(PROP_BACKGROUND_COLOR, TYPE_COLOR, &[70, 120, 200, 255])
    .click(2);

    let elements_bytes: Vec<u8> = [app.encode(), button.encode()].concat();
    let strings_bytes = string_table(&strings);

    let elements_offset = HEADER_SIZE;
    let strings_offset = elements_offset + elements_bytes.len() as u32;
    let total_size = strings_offset + strings_bytes.len() as u32;

    let mut bytes = header(2, strings.len() as u16, elements_offset, strings_offset, total_size);
    bytes.extend_from_slice(&elements_bytes);
    bytes.extend_from_slice(&strings_bytes);
    bytes
}
