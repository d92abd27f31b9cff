use crate::component::{read_component_definitions, ComponentDefinition};
use crate::element::{read_element_record, require_app_first, ElementRecord};
use crate::error::{KrbError, Result, Section};
use crate::header::{parse_header, Header};
use crate::reader::ByteReader;
use crate::resource::{read_resources, Resource};
use crate::script::{read_scripts, Script};
use crate::strings::{read_string_table, StringTable};
use crate::style::{read_styles, Style};

/// The fully parsed, still-flat document (spec §4.2): a header plus every
/// section's records, indexed by position rather than linked into a tree
/// yet. Tree linking (parent/child structure) and component expansion
/// happen one layer up, in the model-building crate — this crate's job
/// ends at "every byte accounted for, every section decoded".
#[derive(Debug, Clone)]
pub struct Document {
    pub header: Header,
    pub elements: Vec<ElementRecord>,
    pub styles: Vec<Style>,
    pub component_definitions: Vec<ComponentDefinition>,
    pub scripts: Vec<Script>,
    pub strings: StringTable,
    pub resources: Vec<Resource>,
}

/// Parses a complete `.krb` document (spec §4.2 steps 1-9).
///
/// Sections are read by seeking to their declared offset rather than by
/// sequential cursor position, so the section order on disk is
/// unconstrained. Any failure at any step aborts the whole parse: there
/// is no partial `Document`.
pub fn parse(data: &[u8]) -> Result<Document> {
    let header = parse_header(data)?;

    if (header.total_size as usize) > data.len() {
        return Err(KrbError::Truncated {
            offset: 0,
            needed: header.total_size as usize,
            available: data.len(),
        });
    }

    let strings = if header.counts.strings > 0 {
        let mut r = section_reader(data, header.offsets.strings as usize, Section::Strings)?;
        read_string_table(&mut r, header.counts.strings)?
    } else {
        StringTable::default()
    };

    let elements = if header.counts.elements > 0 {
        let mut r = section_reader(data, header.offsets.elements as usize, Section::Elements)?;
        let mut elements = Vec::with_capacity(header.counts.elements as usize);
        for _ in 0..header.counts.elements {
            elements.push(read_element_record(&mut r, header.has_scripts_section)?);
        }
        elements
    } else {
        Vec::new()
    };

    if header.has_app() {
        require_app_first(&elements)?;
    }

    let styles = if header.counts.styles > 0 {
        let mut r = section_reader(data, header.offsets.styles as usize, Section::Styles)?;
        read_styles(&mut r, header.counts.styles)?
    } else {
        Vec::new()
    };

    let component_definitions = if header.counts.component_defs > 0 {
        let mut r = section_reader(
            data,
            header.offsets.component_defs as usize,
            Section::ComponentDefinitions,
        )?;
        read_component_definitions(&mut r, header.counts.component_defs, header.has_scripts_section)?
    } else {
        Vec::new()
    };

    let scripts = if header.has_scripts_section && header.counts.scripts > 0 {
        let mut r = section_reader(data, header.offsets.scripts as usize, Section::Scripts)?;
        read_scripts(&mut r, header.counts.scripts)?
    } else {
        Vec::new()
    };

    let resources = if header.counts.resources > 0 {
        let mut r = section_reader(data, header.offsets.resources as usize, Section::Resources)?;
        read_resources(&mut r, header.counts.resources)?
    } else {
        Vec::new()
    };

    Ok(Document {
        header,
        elements,
        styles,
        component_definitions,
        scripts,
        strings,
        resources,
    })
}

fn section_reader(data: &[u8], offset: usize, section: Section) -> Result<ByteReader<'_>> {
    if offset > data.len() {
        return Err(KrbError::Truncated {
            offset,
            needed: 0,
            available: data.len(),
        });
    }
    Ok(ByteReader::at(data, offset, section))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_document() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"KRB1");
        buf.extend_from_slice(&0u16.to_le_bytes()); // version 0.0 -> legacy header
        buf.extend_from_slice(&1u16.to_le_bytes()); // flags: has_app
        buf.extend_from_slice(&1u16.to_le_bytes()); // element count
        buf.extend_from_slice(&0u16.to_le_bytes()); // styles
        buf.extend_from_slice(&0u16.to_le_bytes()); // component defs
        buf.extend_from_slice(&0u16.to_le_bytes()); // animations
        buf.extend_from_slice(&0u16.to_le_bytes()); // strings
        buf.extend_from_slice(&0u16.to_le_bytes()); // resources
        buf.extend_from_slice(&48u32.to_le_bytes()); // element_offset
        buf.extend_from_slice(&0u32.to_le_bytes()); // style_offset
        buf.extend_from_slice(&0u32.to_le_bytes()); // component_def_offset
        buf.extend_from_slice(&0u32.to_le_bytes()); // animation_offset
        buf.extend_from_slice(&0u32.to_le_bytes()); // string_offset
        buf.extend_from_slice(&0u32.to_le_bytes()); // resource_offset
        let element_bytes: [u8; 17] = [
            0x00, // App
            0,    // id_index
            0, 0, // pos_x
            0, 0, // pos_y
            0, 0, // width
            0, 0, // height
            0,    // layout byte
            0,    // style_id
            0,    // property_count
            0,    // custom_property_count
            0,    // event_count
            0,    // animation_count
            0,    // child_count
        ];
        let total_size = 48 + element_bytes.len() as u32;
        buf.extend_from_slice(&total_size.to_le_bytes());
        buf.extend_from_slice(&element_bytes);
        buf
    }

    #[test]
    fn parses_minimal_app_only_document() {
        let bytes = minimal_document();
        let doc = parse(&bytes).unwrap();
        assert_eq!(doc.elements.len(), 1);
        assert!(doc.elements[0].header.kind.is_app());
        assert!(doc.styles.is_empty());
    }

    #[test]
    fn has_app_flag_without_app_element_is_rejected() {
        let mut bytes = minimal_document();
        // Flip the element kind byte (first byte of the element record).
        bytes[48] = 0x01; // Container, not App
        let err = parse(&bytes).unwrap_err();
        assert!(matches!(err, KrbError::MissingApp));
    }
}
