//! Fixed positions and sizes of the resource file layout.

use std::ops::Range;

/// Preamble bytes holding the absolute position of the header table. The
/// header table begins with a copy of the preamble, so the same field also
/// sits at this range relative to the header offset.
pub(crate) const HEADER_OFFSET_FIELD: Range<usize> = 0x04..0x08;

/// Follows the header offset field; holds the header offset minus
/// [`DATA_SECTION_START`].
pub(crate) const DATA_LENGTH_FIELD: Range<usize> = 0x08..0x0C;

/// Follows the data length field; holds the length of the header table.
pub(crate) const MAP_LENGTH_FIELD: Range<usize> = 0x0C..0x10;

pub(crate) const DATA_SECTION_START: u32 = 0x100;

/// Bytes between the header offset and the first type code.
pub(crate) const TRAILER_PREAMBLE_LEN: usize = 0x1E;

/// Big-endian payload length stored in front of each payload.
pub(crate) const LENGTH_PREFIX_LEN: usize = 4;

/// Distance from a resource's start offset to its first payload byte.
pub(crate) const DATA_SKIP: usize = 0x104;

/// Bytes separating one payload from the next, excluded from lengths.
pub(crate) const PADDING_LEN: usize = 4;

pub(crate) const TYPE_CODE_LEN: usize = 4;
pub(crate) const ID_LEN: usize = 2;
pub(crate) const MARKER: [u8; 2] = [0xFF, 0xFF];
pub(crate) const OFFSET_FIELD_LEN: usize = 8;

/// ID, marker, and offset field.
pub(crate) const RECORD_LEN: usize = ID_LEN + MARKER.len() + OFFSET_FIELD_LEN;
