use crate::error::{KrbError, Result, Section};
use crate::reader::ByteReader;

/// Where a script's source bytes live (spec §4.8 "Scripts", Non-goal:
/// execution — the runtime only needs to locate the bytes, never run
/// them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStorage {
    Inline,
    External,
}

#[derive(Debug, Clone)]
pub struct Script {
    pub language: u8,
    pub name_index: u8,
    pub storage: ScriptStorage,
    pub entry_points: Vec<u8>,
    /// Inline source bytes, or empty when [`ScriptStorage::External`].
    pub inline_source: Vec<u8>,
    /// Resource table index when [`ScriptStorage::External`].
    pub resource_index: u16,
}

/// `language (1) | name_index (1) | storage (1) | entry_point_count (1) |
///  data_size (2) | entry_points[u8...] | payload` (spec §4.2 step 7).
///
/// `data_size` is read once, ahead of the entry-point names, and reused as
/// either the inline payload's length or — for external storage — *as* the
/// resource index itself, with no further bytes consumed.
pub fn read_script(r: &mut ByteReader<'_>) -> Result<Script> {
    let language = r.read_u8()?;
    let name_index = r.read_u8()?;
    let storage_byte = r.read_u8()?;
    let entry_point_count = r.read_u8()?;
    let data_size = r.read_u16_le()?;

    let mut entry_points = Vec::with_capacity(entry_point_count as usize);
    for _ in 0..entry_point_count {
        entry_points.push(r.read_u8()?);
    }

    match storage_byte {
        0x01 => Ok(Script {
            language,
            name_index,
            storage: ScriptStorage::External,
            entry_points,
            inline_source: Vec::new(),
            resource_index: data_size,
        }),
        0x02 => {
            let bytes = r.read_bytes(data_size as usize)?;
            Ok(Script {
                language,
                name_index,
                storage: ScriptStorage::Inline,
                entry_points,
                inline_source: bytes.to_vec(),
                resource_index: 0,
            })
        }
        other => Err(KrbError::UnsupportedFormat {
            section: Section::Scripts,
            reason: format!("unknown script storage tag {other}"),
        }),
    }
}

pub fn read_scripts(r: &mut ByteReader<'_>, count: u16) -> Result<Vec<Script>> {
    let mut scripts = Vec::with_capacity(count as usize);
    for _ in 0..count {
        scripts.push(read_script(r)?);
    }
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_external_script() {
        let bytes = [1, 0, 0x01, 0, 5, 0];
        let mut r = ByteReader::new(&bytes, Section::Scripts);
        let script = read_script(&mut r).unwrap();
        assert_eq!(script.storage, ScriptStorage::External);
        assert_eq!(script.resource_index, 5);
    }

    #[test]
    fn rejects_unknown_storage_tag() {
        let bytes = [1, 0, 9, 0, 0, 0];
        let mut r = ByteReader::new(&bytes, Section::Scripts);
        let err = read_script(&mut r).unwrap_err();
        assert!(matches!(err, KrbError::UnsupportedFormat { .. }));
    }
}
