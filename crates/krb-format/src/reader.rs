use crate::error::{KrbError, Section};

/// A bounds-checked little-endian cursor over an immutable byte slice.
///
/// Every primitive read advances the cursor and fails with
/// [`KrbError::Truncated`] rather than panicking when it would run past the
/// end of the slice (spec §4.1).
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
    section: Section,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], section: Section) -> Self {
        Self {
            data,
            position: 0,
            section,
        }
    }

    #[must_use]
    pub fn at(data: &'a [u8], position: usize, section: Section) -> Self {
        Self {
            data,
            position,
            section,
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    fn require(&self, len: usize) -> crate::error::Result<()> {
        if self.position + len > self.data.len() {
            return Err(KrbError::Truncated {
                offset: self.position,
                needed: len,
                available: self.data.len().saturating_sub(self.position),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> crate::error::Result<u8> {
        self.require(1)?;
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    pub fn read_u16_le(&mut self) -> crate::error::Result<u16> {
        self.require(2)?;
        let value = u16::from_le_bytes([self.data[self.position], self.data[self.position + 1]]);
        self.position += 2;
        Ok(value)
    }

    pub fn read_u32_le(&mut self) -> crate::error::Result<u32> {
        self.require(4)?;
        let bytes = [
            self.data[self.position],
            self.data[self.position + 1],
            self.data[self.position + 2],
            self.data[self.position + 3],
        ];
        self.position += 4;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_bytes(&mut self, len: usize) -> crate::error::Result<&'a [u8]> {
        self.require(len)?;
        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Reads a length-prefixed (u8 length) string, per the string and
    /// resource table format (spec §6.1).
    pub fn read_short_string(&mut self) -> crate::error::Result<String> {
        let len = self.read_u8()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Skips `count` bytes without interpreting them, for fields the core
    /// reads but does not act on (animation refs, child refs — spec §4.2
    /// step 4).
    pub fn skip(&mut self, count: usize) -> crate::error::Result<()> {
        self.require(count)?;
        self.position += count;
        Ok(())
    }

    pub fn peek_u8(&self) -> crate::error::Result<u8> {
        self.require(1)?;
        Ok(self.data[self.position])
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    pub fn malformed(&self, reason: impl Into<String>) -> KrbError {
        KrbError::MalformedDocument {
            section: self.section,
            offset: self.position,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_primitives() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut r = ByteReader::new(&data, Section::Header);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16_le().unwrap(), 0x0302);
        assert_eq!(r.read_u32_le().unwrap(), 0x0807_0605);
    }

    #[test]
    fn truncated_read_is_an_error() {
        let data = [0x01];
        let mut r = ByteReader::new(&data, Section::Header);
        assert!(r.read_u16_le().is_err());
    }

    #[test]
    fn short_string_round_trips() {
        let data = [3, b'h', b'i', b'!'];
        let mut r = ByteReader::new(&data, Section::Strings);
        assert_eq!(r.read_short_string().unwrap(), "hi!");
    }
}
