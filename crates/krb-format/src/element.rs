use crate::error::{KrbError, Result, Section};
use crate::reader::ByteReader;

/// Element type tags (spec §3 "Element types"). Unknown byte values parse
/// as [`ElementKind::Unknown`] rather than failing the whole document,
/// mirroring the "unknown property id is silently ignored" tolerance the
/// format applies elsewhere.
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

impl ElementKind {
    fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::App,
            0x01 => Self::Container,
            0x02 => Self::Text,
            0x03 => Self::Image,
            0x04 => Self::Button,
            0x05 => Self::Input,
            0x06 => Self::List,
            0x07 => Self::Grid,
            0x08 => Self::Scrollable,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn is_app(self) -> bool {
        matches!(self, Self::App)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Center,
    End,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    #[default]
    Flow,
    Absolute,
}

/// Fixed-layout element header fields (spec §6.1: 17 bytes without a
/// state-property-set count, 18 bytes with one).
#[derive(Debug, Clone, Copy)]
pub struct ElementHeader {
    pub kind: ElementKind,
    pub id_index: u8,
    pub pos_x: i16,
    pub pos_y: i16,
    pub width: u16,
    pub height: u16,
    pub layout_direction: LayoutDirection,
    pub alignment: Alignment,
    pub grow: bool,
    pub position_mode: PositionMode,
    pub style_id: u8,
    pub property_count: u8,
    pub custom_property_count: u8,
    pub state_property_set_count: u8,
    pub event_count: u8,
    pub animation_count: u8,
    pub child_count: u8,
}

/// Direction/alignment/grow/absolute packed into one byte (spec §6.1
/// "Layout byte"): bits 0-1 direction, bits 2-3 alignment, bit 4 wrap
/// (reserved, unused by this runtime), bit 5 grow, bit 6 absolute, bit 7
/// reserved.
fn decode_layout_byte(byte: u8) -> (LayoutDirection, Alignment, bool, PositionMode) {
    let direction = match byte & 0x03 {
        0 => LayoutDirection::Row,
        1 => LayoutDirection::Column,
        2 => LayoutDirection::RowReverse,
        _ => LayoutDirection::ColumnReverse,
    };
    let alignment = match (byte >> 2) & 0x03 {
        0 => Alignment::Start,
        1 => Alignment::Center,
        2 => Alignment::End,
        _ => Alignment::SpaceBetween,
    };
    let grow = byte & 0x20 != 0;
    let position_mode = if byte & 0x40 != 0 {
        PositionMode::Absolute
    } else {
        PositionMode::Flow
    };
    (direction, alignment, grow, position_mode)
}

/// Reads one element header, advancing `r` past it. `has_state_sets`
/// selects the 17- vs 18-byte layout (spec §6.1).
pub fn read_element_header(r: &mut ByteReader<'_>, has_state_sets: bool) -> Result<ElementHeader> {
    let kind = ElementKind::from_byte(r.read_u8()?);
    let id_index = r.read_u8()?;
    let pos_x = r.read_u16_le()? as i16;
    let pos_y = r.read_u16_le()? as i16;
    let width = r.read_u16_le()?;
    let height = r.read_u16_le()?;
    let (layout_direction, alignment, grow, position_mode) = decode_layout_byte(r.read_u8()?);
    let style_id = r.read_u8()?;
    let property_count = r.read_u8()?;
    let custom_property_count = r.read_u8()?;
    let state_property_set_count = if has_state_sets { r.read_u8()? } else { 0 };
    let event_count = r.read_u8()?;
    let animation_count = r.read_u8()?;
    let child_count = r.read_u8()?;

    Ok(ElementHeader {
        kind,
        id_index,
        pos_x,
        pos_y,
        width,
        height,
        layout_direction,
        alignment,
        grow,
        position_mode,
        style_id,
        property_count,
        custom_property_count,
        state_property_set_count,
        event_count,
        animation_count,
        child_count,
    })
}

/// Standard property identifiers (spec §4.3 "Property semantics"). Values
/// outside this set are preserved as [`PropertyId::Unknown`] and skipped
/// using the property's own declared size, never causing a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyId {
    BackgroundColor,
    ForegroundColor,
    BorderColor,
    BorderWidth,
    TextContent,
    TextAlignment,
    ImageSource,
    Visibility,
    FontSize,
    WindowWidth,
    WindowHeight,
    WindowTitle,
    Resizable,
    ScaleFactor,
    Unknown(u8),
}

impl PropertyId {
    fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::BackgroundColor,
            0x02 => Self::ForegroundColor,
            0x03 => Self::BorderColor,
            0x04 => Self::BorderWidth,
            0x05 => Self::TextContent,
            0x06 => Self::TextAlignment,
            0x07 => Self::ImageSource,
            0x08 => Self::Visibility,
            0x09 => Self::FontSize,
            0x20 => Self::WindowWidth,
            0x21 => Self::WindowHeight,
            0x22 => Self::WindowTitle,
            0x23 => Self::Resizable,
            0x24 => Self::ScaleFactor,
            other => Self::Unknown(other),
        }
    }
}

/// A property's raw wire value, still in its source encoding. [`crate`]
/// callers interpret this according to [`PropertyId`]; resolution into
/// typed render-element fields happens one layer up, outside this crate.
///
/// String and resource references are single-byte indices (spec §6.1
/// "Value types": `string(1 index)`, `resource(1 index)`) — this format
/// limits any one record to referencing the first 256 entries of those
/// tables, unlike the table's own `u16` entry count.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Byte(u8),
    Short(u16),
    Color([u8; 4]),
    EdgeInsets([u8; 4]),
    StringRef(u8),
    ResourceRef(u8),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct Property {
    pub id: PropertyId,
    pub value: PropertyValue,
}

/// Interprets a value-type tag plus its already-read bytes (spec §6.1
/// "Value types"). Shared by property records, custom property records, and
/// component parameter default values — every place the wire format stores
/// a `(type, size, bytes)` triple. Falls back to [`PropertyValue::Raw`] for
/// any combination this runtime doesn't recognize, so parsing never fails
/// on a forward-looking value type.
///
/// `percentage` and `enum` have no dedicated `PropertyValue` variant: on
/// the wire they're just a 2-byte LE fixed-point value and a 1-byte tag
/// respectively, the same shapes `short` and `byte` already use, so they
/// decode straight into those variants and resolvers match on them the
/// same way.
pub(crate) fn decode_value(value_type: u8, data: &[u8]) -> PropertyValue {
    match (value_type, data.len()) {
        (0x01, 1) => PropertyValue::Byte(data[0]),
        (0x02, 2) => PropertyValue::Short(u16::from_le_bytes([data[0], data[1]])),
        (0x03, 4) => PropertyValue::Color([data[0], data[1], data[2], data[3]]),
        (0x04, 4) => PropertyValue::EdgeInsets([data[0], data[1], data[2], data[3]]),
        (0x05, 1) => PropertyValue::StringRef(data[0]),
        (0x06, 1) => PropertyValue::ResourceRef(data[0]),
        (0x07, 2) => PropertyValue::Short(u16::from_le_bytes([data[0], data[1]])),
        (0x08, 1) => PropertyValue::Byte(data[0]),
        _ => PropertyValue::Raw(data.to_vec()),
    }
}

/// Reads one property record: `id (u8) | value_type (u8) | size (u8) | data[size]`
/// (spec §6.1).
pub fn read_property(r: &mut ByteReader<'_>) -> Result<Property> {
    let id_byte = r.read_u8()?;
    let value_type = r.read_u8()?;
    let size = r.read_u8()? as usize;
    let data = r.read_bytes(size)?;
    let id = PropertyId::from_byte(id_byte);
    Ok(Property {
        id,
        value: decode_value(value_type, data),
    })
}

#[derive(Debug, Clone)]
pub struct CustomProperty {
    pub key_index: u8,
    pub value: PropertyValue,
}

pub fn read_custom_property(r: &mut ByteReader<'_>) -> Result<CustomProperty> {
    let key_index = r.read_u8()?;
    let value_type = r.read_u8()?;
    let size = r.read_u8()? as usize;
    let data = r.read_bytes(size)?;
    Ok(CustomProperty {
        key_index,
        value: decode_value(value_type, data),
    })
}

/// `event_type (u8) | callback_id (u8)` (spec §6.1).
#[derive(Debug, Clone, Copy)]
pub struct EventEntry {
    pub event_type: EventType,
    pub handler_name_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Click,
    Hover,
    Unknown(u8),
}

impl EventType {
    fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::Click,
            0x02 => Self::Hover,
            other => Self::Unknown(other),
        }
    }
}

pub fn read_event_entry(r: &mut ByteReader<'_>) -> Result<EventEntry> {
    let event_type = EventType::from_byte(r.read_u8()?);
    let handler_name_index = r.read_u8()?;
    Ok(EventEntry {
        event_type,
        handler_name_index,
    })
}

/// A per-state override block (`:hover`, `:active`, ... — spec §4.3's
/// "state property sets"), present only under the 18-byte element header.
#[derive(Debug, Clone)]
pub struct StatePropertySet {
    pub state_flags: u8,
    pub properties: Vec<Property>,
}

pub fn read_state_property_set(r: &mut ByteReader<'_>) -> Result<StatePropertySet> {
    let state_flags = r.read_u8()?;
    let count = r.read_u8()?;
    let mut properties = Vec::with_capacity(count as usize);
    for _ in 0..count {
        properties.push(read_property(r)?);
    }
    Ok(StatePropertySet {
        state_flags,
        properties,
    })
}

/// One fully-parsed element record: header, properties, custom
/// properties, event bindings, and state overrides, plus the number of
/// immediate children still to be read from the flat array (spec §4.6
/// consumes `child_count` to drive the tree-linking stack).
#[derive(Debug, Clone)]
pub struct ElementRecord {
    pub header: ElementHeader,
    pub properties: Vec<Property>,
    pub custom_properties: Vec<CustomProperty>,
    pub events: Vec<EventEntry>,
    pub state_property_sets: Vec<StatePropertySet>,
}

/// Reads one element's variable-length body, in the fixed order the
/// format requires (spec §4.2 step 4): standard properties, custom
/// properties, state property sets, events, animation refs, child refs.
/// Animation and child refs are two bytes apiece and carry no data this
/// runtime acts on — animations aren't evaluated (Non-goal) and the
/// parent/child tree is rebuilt from `child_count` in §4.6, not from the
/// ref table — so both are read only to keep the cursor aligned for the
/// next element.
pub fn read_element_record(r: &mut ByteReader<'_>, has_state_sets: bool) -> Result<ElementRecord> {
    let header = read_element_header(r, has_state_sets)?;

    let mut properties = Vec::with_capacity(header.property_count as usize);
    for _ in 0..header.property_count {
        properties.push(read_property(r)?);
    }

    let mut custom_properties = Vec::with_capacity(header.custom_property_count as usize);
    for _ in 0..header.custom_property_count {
        custom_properties.push(read_custom_property(r)?);
    }

    let mut state_property_sets = Vec::with_capacity(header.state_property_set_count as usize);
    for _ in 0..header.state_property_set_count {
        state_property_sets.push(read_state_property_set(r)?);
    }

    let mut events = Vec::with_capacity(header.event_count as usize);
    for _ in 0..header.event_count {
        events.push(read_event_entry(r)?);
    }

    r.skip(header.animation_count as usize * 2)?;
    r.skip(header.child_count as usize * 2)?;

    Ok(ElementRecord {
        header,
        properties,
        custom_properties,
        events,
        state_property_sets,
    })
}

pub(crate) fn require_app_first(records: &[ElementRecord]) -> Result<()> {
    match records.first() {
        Some(first) if first.header.kind.is_app() => Ok(()),
        Some(_) => Err(KrbError::MissingApp),
        None => Err(KrbError::MalformedDocument {
            section: Section::Elements,
            offset: 0,
            reason: "has_app set but element table is empty".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_header17(kind: u8, child_count: u8) -> Vec<u8> {
        vec![
            kind, // kind
            0,    // id_index
            0, 0, // pos_x
            0, 0, // pos_y
            0, 0, // width
            0, 0, // height
            0b0000_0000, // layout byte
            0,    // style_id
            0,    // property_count
            0,    // custom_property_count
            0,    // event_count
            0,    // animation_count
            child_count,
        ]
    }

    #[test]
    fn decodes_layout_byte_bits() {
        let (dir, align, grow, mode) = decode_layout_byte(0b0110_1111);
        assert_eq!(dir, LayoutDirection::ColumnReverse);
        assert_eq!(align, Alignment::SpaceBetween);
        assert!(grow);
        assert_eq!(mode, PositionMode::Absolute);
    }

    #[test]
    fn reads_element_header_without_state_sets() {
        let bytes = encode_header17(0x04, 2);
        let mut r = ByteReader::new(&bytes, Section::Elements);
        let header = read_element_header(&mut r, false).unwrap();
        assert_eq!(header.kind, ElementKind::Button);
        assert_eq!(header.child_count, 2);
        assert_eq!(header.state_property_set_count, 0);
        assert_eq!(r.position(), 17);
    }

    #[test]
    fn unknown_property_value_falls_back_to_raw() {
        let bytes = [0x05, 0xFF, 3, 1, 2, 3];
        let mut r = ByteReader::new(&bytes, Section::Elements);
        let prop = read_property(&mut r).unwrap();
        assert_eq!(prop.id, PropertyId::TextContent);
        assert!(matches!(prop.value, PropertyValue::Raw(ref v) if v == &[1, 2, 3]));
    }

    #[test]
    fn missing_app_element_is_an_error() {
        let bytes = encode_header17(0x01, 0);
        let mut r = ByteReader::new(&bytes, Section::Elements);
        let record = read_element_record(&mut r, false).unwrap();
        let err = require_app_first(&[record]).unwrap_err();
        assert!(matches!(err, KrbError::MissingApp));
    }
}
