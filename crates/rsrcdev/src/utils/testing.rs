//! Builders for well-formed resource files, shared by the crate's tests and
//! by downstream test suites through the `testing` feature.

use crate::{
    resources::{Resource, ResourceTable, ResourceType, file::layout},
    utils::{
        convert::{to_offset, to_position},
        data_writer::DataWriterExt as _,
    },
};

/// A resource file produced by [`RsrcBuilder`], together with what a parser
/// is expected to make of it.
#[derive(Debug, Clone)]
pub struct BuiltRsrc {
    pub bytes: Vec<u8>,
    pub header_offset: u32,
    pub table: ResourceTable,
}

/// Lays out resources the way the format expects them.
///
/// Each payload is preceded by a 4-byte big-endian length, the data section
/// is closed by 4 zero bytes, and the header table lists every type in the
/// order it was first added.
#[derive(Debug, Default)]
pub struct RsrcBuilder {
    entries: Vec<(ResourceType, u16, Vec<u8>)>,
}

impl RsrcBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resource(mut self, res_type: ResourceType, id: u16, data: impl Into<Vec<u8>>) -> Self {
        self.entries.push((res_type, id, data.into()));
        self
    }

    /// Produces the file bytes.
    ///
    /// # Panics
    ///
    /// Panics if the file does not fit in 32-bit offsets.
    #[must_use]
    pub fn build(self) -> BuiltRsrc {
        let section_start = to_position(layout::DATA_SECTION_START);
        let mut out = vec![0u8; section_start];
        let mut table = ResourceTable::new();

        for (res_type, id, data) in &self.entries {
            let start = to_offset(out.len() - section_start).unwrap();
            out.write_u32_be(to_offset(data.len()).unwrap()).unwrap();
            out.extend_from_slice(data);
            table.push(Resource::new(*id, *res_type, start));
        }
        out.extend_from_slice(&[0; layout::PADDING_LEN]);

        let header_offset = to_offset(out.len()).unwrap();
        let data_length = header_offset - layout::DATA_SECTION_START;

        // The header table opens with a copy of the preamble. Both copies get
        // their offset and length fields filled in below.
        out.write_u32_be(layout::DATA_SECTION_START).unwrap();
        out.resize(to_position(header_offset) + layout::TRAILER_PREAMBLE_LEN, 0);

        for res_type in table.types() {
            let resources = table.resources(res_type);
            out.extend_from_slice(&res_type.code());
            out.write_u16_be(u16::try_from(resources.len() - 1).unwrap())
                .unwrap();
            out.write_u16_be(0).unwrap();
            out.write_u32_be(0).unwrap();
            for res in resources {
                out.write_u16_be(res.id()).unwrap();
                out.extend_from_slice(&layout::MARKER);
                out.extend_from_slice(&res.offset_bytes());
            }
        }

        let map_length = to_offset(out.len()).unwrap() - header_offset;
        for base in [0, to_position(header_offset)] {
            let mut slot =
                &mut out[base + layout::HEADER_OFFSET_FIELD.start..base + layout::MAP_LENGTH_FIELD.end];
            slot.write_u32_be(header_offset).unwrap();
            slot.write_u32_be(data_length).unwrap();
            slot.write_u32_be(map_length).unwrap();
        }
        out[..4].copy_from_slice(&layout::DATA_SECTION_START.to_be_bytes());

        BuiltRsrc {
            bytes: out,
            header_offset,
            table,
        }
    }
}
