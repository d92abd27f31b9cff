use crate::element::{read_property, Property};
use crate::error::Result;
use crate::reader::ByteReader;

/// A named bundle of default property values (spec §4.3 "Style
/// resolution"). Style ids are 1-based in the wire format; id `0` means
/// "no style" and is never emitted into this table.
#[derive(Debug, Clone)]
pub struct Style {
    pub id: u8,
    pub name_index: u8,
    pub properties: Vec<Property>,
}

/// `id (u8) | name_index (u8) | property_count (u8) | properties[...]`.
pub fn read_style(r: &mut ByteReader<'_>) -> Result<Style> {
    let id = r.read_u8()?;
    let name_index = r.read_u8()?;
    let property_count = r.read_u8()?;
    let mut properties = Vec::with_capacity(property_count as usize);
    for _ in 0..property_count {
        properties.push(read_property(r)?);
    }
    Ok(Style {
        id,
        name_index,
        properties,
    })
}

pub fn read_styles(r: &mut ByteReader<'_>, count: u16) -> Result<Vec<Style>> {
    let mut styles = Vec::with_capacity(count as usize);
    for _ in 0..count {
        styles.push(read_style(r)?);
    }
    Ok(styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Section;

    #[test]
    fn reads_style_with_no_properties() {
        let bytes = [7u8, 3, 0];
        let mut r = ByteReader::new(&bytes, Section::Styles);
        let style = read_style(&mut r).unwrap();
        assert_eq!(style.id, 7);
        assert_eq!(style.name_index, 3);
        assert!(style.properties.is_empty());
    }
}
