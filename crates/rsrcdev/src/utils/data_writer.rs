use std::io;

macro_rules! prim_write_be_fn {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self, value: $ty) -> io::Result<()> {
            self.write_all(&value.to_be_bytes())
        }
    };
}

/// Big-endian primitive writes, as used by every multi-byte field in a
/// resource file.
///
/// Writing into a `&mut [u8]` fails with [`io::ErrorKind::WriteZero`] once
/// the slice is exhausted, which callers use as a bounds check when patching
/// fields in place.
pub trait DataWriterExt: io::Write {
    prim_write_be_fn!(write_u8, u8);
    prim_write_be_fn!(write_u16_be, u16);
    prim_write_be_fn!(write_u32_be, u32);
    prim_write_be_fn!(write_u64_be, u64);
}

impl<W: io::Write> DataWriterExt for W {}
