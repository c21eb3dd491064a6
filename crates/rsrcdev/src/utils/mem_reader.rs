//! A bounded cursor over an in-memory byte buffer.

use bytes::Buf;

#[derive(Debug, thiserror::Error)]
pub enum MemReaderError {
    #[error(
        "Not enough data at position {position:#x}. Needed {required}, but only {available} available."
    )]
    NotEnoughData {
        position: usize,
        required: usize,
        available: usize,
    },
    #[error("Cannot seek to {offset:#x} in a buffer of {size} bytes")]
    SeekOutOfRange { offset: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, MemReaderError>;

macro_rules! impl_read_int {
    ($name:ident, $ty:ty, $get:ident) => {
        pub fn $name(&mut self) -> Result<$ty> {
            let mut buf = self.take_buf(std::mem::size_of::<$ty>())?;
            Ok(buf.$get())
        }
    };
}

/// Reads big-endian values from a byte slice, tracking the current position.
#[derive(Debug, Clone)]
pub struct MemReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> MemReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        MemReader { data, position: 0 }
    }

    pub fn seek_to(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(MemReaderError::SeekOutOfRange {
                offset,
                size: self.data.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    #[must_use]
    pub fn tell(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rest().remaining()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.rest().has_remaining()
    }

    fn rest(&self) -> &'a [u8] {
        let data: &'a [u8] = self.data;
        &data[self.position..]
    }

    /// Checks that `len` bytes are available, then advances past them and
    /// returns them as a [`Buf`].
    fn take_buf(&mut self, len: usize) -> Result<&'a [u8]> {
        let rest = self.rest();
        if rest.remaining() < len {
            return Err(MemReaderError::NotEnoughData {
                position: self.position,
                required: len,
                available: rest.remaining(),
            });
        }
        self.position += len;
        Ok(&rest[..len])
    }

    /// Returns the next `len` bytes without copying, advancing past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take_buf(len)
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.take_buf(buf.len())?.copy_to_slice(buf);
        Ok(())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    impl_read_int!(read_u8, u8, get_u8);
    impl_read_int!(read_u16_be, u16, get_u16);
    impl_read_int!(read_u32_be, u32, get_u32);
    impl_read_int!(read_u64_be, u64, get_u64);
}

/// A fixed-layout record that can be read from a [`MemReader`].
pub trait Parse: Sized {
    fn parse(reader: &mut MemReader<'_>) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use datalit::datalit;

    #[test]
    fn reads_big_endian_values() {
        let data = datalit!(0x12, 0x3456, 0x789ABCDE);
        let mut reader = MemReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 0x12);
        assert_eq!(reader.read_u16_be().unwrap(), 0x3456);
        assert_eq!(reader.read_u32_be().unwrap(), 0x789A_BCDE);
        assert!(reader.is_empty());
    }

    #[test]
    fn short_read_reports_position() {
        let data = datalit!(0x0102, 0x03);
        let mut reader = MemReader::new(&data);
        reader.seek_to(1).unwrap();
        let err = reader.read_u32_be().unwrap_err();
        assert!(matches!(
            err,
            MemReaderError::NotEnoughData {
                position: 1,
                required: 4,
                available: 2,
            }
        ));
        // A failed read does not move the cursor.
        assert_eq!(reader.tell(), 1);
    }

    #[test]
    fn seek_is_bounded() {
        let data = [0u8; 4];
        let mut reader = MemReader::new(&data);
        assert!(reader.seek_to(4).is_ok());
        assert!(reader.is_empty());
        assert!(matches!(
            reader.seek_to(5),
            Err(MemReaderError::SeekOutOfRange { offset: 5, size: 4 })
        ));
    }
}
