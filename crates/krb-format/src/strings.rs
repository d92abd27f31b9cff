use crate::error::Result;
use crate::reader::ByteReader;

/// The string table: every string elsewhere in the document is a `u16`
/// index into this table, indices start at `0` (spec §6.1). An index of
/// `0xFFFF` conventionally means "absent" and is never resolved here —
/// callers check for it before indexing.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: Vec<String>,
}

impl StringTable {
    /// Builds a table directly from owned strings, for callers assembling
    /// a document in memory (tests, fixtures) rather than parsing bytes.
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, index: u16) -> Option<&str> {
        self.entries.get(index as usize).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn read_string_table(r: &mut ByteReader<'_>, count: u16) -> Result<StringTable> {
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        entries.push(r.read_short_string()?);
    }
    Ok(StringTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Section;

    #[test]
    fn reads_two_entries_in_order() {
        let bytes = [2u8, b'h', b'i', 5, b'w', b'o', b'r', b'l', b'd'];
        let mut r = ByteReader::new(&bytes, Section::Strings);
        let table = read_string_table(&mut r, 2).unwrap();
        assert_eq!(table.get(0), Some("hi"));
        assert_eq!(table.get(1), Some("world"));
        assert_eq!(table.get(2), None);
    }
}
