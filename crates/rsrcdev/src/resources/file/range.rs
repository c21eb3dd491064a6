use std::ops::Range;

use crate::{
    resources::{
        ResourceTable, ResourceType,
        file::{LookupError, layout},
    },
    utils::convert::to_position,
};

/// The byte range of one resource's payload.
///
/// `data_stop` is where the next payload of the same type starts (or the
/// header table, for the last one); the `length` excludes the padding that
/// precedes `data_stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    data_start: usize,
    data_stop: usize,
    length: usize,
}

impl OffsetRange {
    #[must_use]
    pub fn data_start(&self) -> usize {
        self.data_start
    }

    #[must_use]
    pub fn data_stop(&self) -> usize {
        self.data_stop
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// The payload bytes, without the trailing padding.
    #[must_use]
    pub fn payload(&self) -> Range<usize> {
        self.data_start..self.data_start + self.length
    }
}

/// Computes the payload range of a resource from its neighbour in the table.
///
/// This is the only place a resource's extent is derived; everything that
/// reads or replaces payload bytes goes through it.
pub(crate) fn resolve(
    table: &ResourceTable,
    header_offset: u32,
    id: u16,
    res_type: ResourceType,
) -> Result<OffsetRange, LookupError> {
    let not_found = LookupError::NotFound { id, res_type };
    let index = table.index_of(res_type, id).ok_or(not_found.clone())?;
    let resource = table.get_index(res_type, index).ok_or(not_found)?;

    let data_start = resource.data_offset();
    let data_stop = table
        .get_index(res_type, index + 1)
        .map_or(to_position(header_offset), |next| next.data_offset());
    let length = data_stop
        .checked_sub(data_start)
        .and_then(|span| span.checked_sub(layout::PADDING_LEN))
        .ok_or(LookupError::InvalidRange {
            id,
            res_type,
            data_start,
            data_stop,
        })?;

    Ok(OffsetRange {
        data_start,
        data_stop,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Resource;

    fn pict_table() -> ResourceTable {
        [
            Resource::new(128, ResourceType::Pict, 0x000),
            Resource::new(129, ResourceType::Pict, 0x010),
            Resource::new(130, ResourceType::Pict, 0x100),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn range_ends_at_next_entry() {
        let range = resolve(&pict_table(), 0x300, 128, ResourceType::Pict).unwrap();
        assert_eq!(range.data_start(), 0x104);
        assert_eq!(range.data_stop(), 0x114);
        assert_eq!(range.length(), 0x0C);
        assert_eq!(range.payload(), 0x104..0x110);
    }

    #[test]
    fn last_range_ends_at_header() {
        let range = resolve(&pict_table(), 0x300, 130, ResourceType::Pict).unwrap();
        assert_eq!(range.data_start(), 0x204);
        assert_eq!(range.data_stop(), 0x300);
        assert_eq!(range.length(), 0xF8);
    }

    #[test]
    fn ranges_are_contiguous() {
        let table = pict_table();
        let ranges: Vec<OffsetRange> = table
            .resources(ResourceType::Pict)
            .iter()
            .map(|res| resolve(&table, 0x300, res.id(), ResourceType::Pict).unwrap())
            .collect();
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].data_stop(), pair[1].data_start());
        }
        for range in &ranges {
            assert_eq!(range.length(), range.data_stop() - range.data_start() - 4);
        }
    }

    #[test]
    fn missing_resource_is_not_found() {
        assert_eq!(
            resolve(&pict_table(), 0x300, 7, ResourceType::Pict),
            Err(LookupError::NotFound {
                id: 7,
                res_type: ResourceType::Pict
            })
        );
        assert!(matches!(
            resolve(&pict_table(), 0x300, 128, ResourceType::Snd),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn overlapping_range_is_invalid() {
        assert!(matches!(
            resolve(&pict_table(), 0x200, 130, ResourceType::Pict),
            Err(LookupError::InvalidRange { .. })
        ));
    }
}
