use crate::{
    resources::{ResourceType, file::layout},
    utils::convert::to_position,
};

/// One entry of a resource file's header table.
///
/// An entry records where a resource is anchored, not how long it is. The
/// payload starts a fixed distance after the anchor (see
/// [`Resource::data_offset`]) and runs up to the next entry of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resource {
    id: u16,
    res_type: ResourceType,
    start_offset: u32,
}

impl Resource {
    #[must_use]
    pub fn new(id: u16, res_type: ResourceType, start_offset: u32) -> Self {
        Resource {
            id,
            res_type,
            start_offset,
        }
    }

    #[must_use]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[must_use]
    pub fn res_type(&self) -> ResourceType {
        self.res_type
    }

    #[must_use]
    pub fn start_offset(&self) -> u32 {
        self.start_offset
    }

    pub(crate) fn set_start_offset(&mut self, start_offset: u32) {
        self.start_offset = start_offset;
    }

    /// The absolute position where this resource's payload begins.
    ///
    /// Always derived from the start offset, so it follows any shift.
    #[must_use]
    pub fn data_offset(&self) -> usize {
        to_position(self.start_offset) + layout::DATA_SKIP
    }

    /// The ID as it appears in the header table.
    #[must_use]
    pub fn id_bytes(&self) -> [u8; 2] {
        self.id.to_be_bytes()
    }

    /// The byte sequence that locates this entry in the header table: the ID
    /// followed by the `FF FF` marker.
    #[must_use]
    pub fn id_marker_bytes(&self) -> [u8; 4] {
        let [hi, lo] = self.id_bytes();
        let [m0, m1] = layout::MARKER;
        [hi, lo, m0, m1]
    }

    /// The 8-byte offset field as written to the header table.
    ///
    /// Only the first four bytes carry the offset; the rest are reserved and
    /// written as zero.
    #[must_use]
    pub fn offset_bytes(&self) -> [u8; layout::OFFSET_FIELD_LEN] {
        let mut field = [0u8; layout::OFFSET_FIELD_LEN];
        field[..4].copy_from_slice(&self.start_offset.to_be_bytes());
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datalit::datalit;

    #[test]
    fn data_offset_tracks_start_offset() {
        let mut res = Resource::new(128, ResourceType::Pict, 0x0034_2D96);
        assert_eq!(res.data_offset(), 0x0034_2E9A);
        res.set_start_offset(0x200);
        assert_eq!(res.data_offset(), 0x304);
    }

    #[test]
    fn encodes_table_bytes() {
        let res = Resource::new(0x3A99, ResourceType::Pict, 0x0034_2D96);
        assert_eq!(res.id_marker_bytes().to_vec(), datalit!(0x3A99, 0xFFFF).to_vec());
        assert_eq!(
            res.offset_bytes().to_vec(),
            datalit!(0x00342D96, 0x00000000).to_vec()
        );
    }
}
