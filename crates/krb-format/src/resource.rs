use crate::error::{KrbError, Result, Section};
use crate::reader::ByteReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Font,
    Unknown(u8),
}

impl ResourceKind {
    fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::Image,
            0x02 => Self::Font,
            other => Self::Unknown(other),
        }
    }
}

/// Only external resources are supported: the format allows an inline
/// storage tag but embedding binary assets in the document body is out of
/// scope for this runtime (spec §4.9 Non-goals), so that tag parses as
/// [`KrbError::UnsupportedFormat`] rather than silently producing empty
/// data.
#[derive(Debug, Clone)]
pub struct Resource {
    pub kind: ResourceKind,
    pub name_index: u8,
    /// String-table index of the resource's path, valid only when the
    /// record's format tag was `0x01` (external).
    pub path_index: u8,
}

/// `type (u8) | name_index (u8) | format (u8) | data (u8)` (spec §6.1
/// "Resource table"). `format == 0x01` means `data` is the path's string
/// index (external); `0x02` means inline data, which this runtime never
/// embeds assets for and rejects.
pub fn read_resource(r: &mut ByteReader<'_>) -> Result<Resource> {
    let kind = ResourceKind::from_byte(r.read_u8()?);
    let name_index = r.read_u8()?;
    let format = r.read_u8()?;
    let data = r.read_u8()?;

    if format != 0x01 {
        return Err(KrbError::UnsupportedFormat {
            section: Section::Resources,
            reason: "only external resource storage is supported".into(),
        });
    }

    Ok(Resource {
        kind,
        name_index,
        path_index: data,
    })
}

pub fn read_resources(r: &mut ByteReader<'_>, count: u16) -> Result<Vec<Resource>> {
    let mut resources = Vec::with_capacity(count as usize);
    for _ in 0..count {
        resources.push(read_resource(r)?);
    }
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_external_image_resource() {
        let bytes = [0x01, 3, 0x01, 4];
        let mut r = ByteReader::new(&bytes, Section::Resources);
        let res = read_resource(&mut r).unwrap();
        assert_eq!(res.kind, ResourceKind::Image);
        assert_eq!(res.name_index, 3);
        assert_eq!(res.path_index, 4);
    }

    #[test]
    fn rejects_inline_storage() {
        let bytes = [0x01, 0, 0x02, 0];
        let mut r = ByteReader::new(&bytes, Section::Resources);
        let err = read_resource(&mut r).unwrap_err();
        assert!(matches!(err, KrbError::UnsupportedFormat { .. }));
    }
}
