//! Reading the header table at the end of a resource file.

use crate::{
    resources::{
        Resource, ResourceTable, ResourceType,
        file::{ParseError, layout},
    },
    utils::{
        convert::to_position,
        matcher::ByteMatcher,
        mem_reader::{self, MemReader, Parse},
    },
};

/// The result of reading a file's header table.
#[derive(Debug)]
pub(crate) struct ParsedHeader {
    pub(crate) header_offset: u32,
    pub(crate) table: ResourceTable,
}

/// One 12-byte entry of a type's resource list.
#[derive(Debug, Clone, Copy)]
struct RawRecord {
    id: u16,
    marker: [u8; 2],
    start_offset: u32,
    reserved: u32,
}

impl Parse for RawRecord {
    fn parse(reader: &mut MemReader<'_>) -> mem_reader::Result<Self> {
        let id = reader.read_u16_be()?;
        let marker = reader.read_array()?;
        let start_offset = reader.read_u32_be()?;
        let reserved = reader.read_u32_be()?;
        Ok(RawRecord {
            id,
            marker,
            start_offset,
            reserved,
        })
    }
}

pub(crate) fn read_header_offset(data: &[u8]) -> Result<u32, ParseError> {
    let mut reader = MemReader::new(data);
    reader.seek_to(layout::HEADER_OFFSET_FIELD.start)?;
    Ok(reader.read_u32_be()?)
}

/// The position just past the trailer preamble, where the first type block
/// begins.
pub(crate) fn entries_start(data: &[u8], header_offset: u32) -> Result<usize, ParseError> {
    to_position(header_offset)
        .checked_add(layout::TRAILER_PREAMBLE_LEN)
        .filter(|&pos| pos <= data.len())
        .ok_or(ParseError::HeaderOffsetOutOfRange {
            header_offset,
            file_size: data.len(),
        })
}

/// Builds the resource table of a file.
///
/// The header offset is read from the preamble, the trailer preamble is
/// skipped, and each type code is followed by its list of fixed-size
/// entries. Entries run to the end of the file: an entry whose marker bytes
/// are not `FF FF` (such as a second type block) is reported as
/// [`ParseError::UnsupportedLayout`] rather than misread.
pub(crate) fn parse_header(data: &[u8]) -> Result<ParsedHeader, ParseError> {
    let header_offset = read_header_offset(data)?;
    let mut cursor = entries_start(data, header_offset)?;

    let marker_matcher = ByteMatcher::new(&layout::MARKER);
    let mut reader = MemReader::new(data);
    let mut table = ResourceTable::new();

    while cursor < data.len() {
        reader.seek_to(cursor)?;
        let res_type = ResourceType::from_code(reader.read_array()?)
            .map_err(|source| ParseError::UnknownType {
                offset: cursor,
                source,
            })?;

        // Type codes are ASCII, so the first marker lies past the code and
        // the entry's ID sits just before it.
        let marker = marker_matcher
            .find_in(data, cursor + layout::TYPE_CODE_LEN)
            .ok_or(ParseError::MissingMarker {
                offset: cursor,
                res_type,
            })?;
        cursor = marker - layout::ID_LEN;

        let mut count = 0usize;
        while cursor < data.len() {
            reader.seek_to(cursor)?;
            let record = RawRecord::parse(&mut reader)?;
            if record.marker != layout::MARKER {
                return Err(ParseError::UnsupportedLayout {
                    offset: cursor,
                    found: record.marker,
                });
            }
            if table.get(res_type, record.id).is_some() {
                return Err(ParseError::DuplicateId {
                    res_type,
                    id: record.id,
                });
            }
            if record.reserved != 0 {
                log::warn!(
                    "Ignoring reserved offset bytes {:#010x} of {res_type}:{} at {cursor:#x}",
                    record.reserved,
                    record.id,
                );
            }
            table.push(Resource::new(record.id, res_type, record.start_offset));
            cursor += layout::RECORD_LEN;
            count += 1;
        }
        log::debug!("Read {count} {res_type} resources from header at {header_offset:#x}");
    }

    validate_table(&table, header_offset)?;
    Ok(ParsedHeader {
        header_offset,
        table,
    })
}

/// Checks the invariants the offset-range rule depends on: unique IDs per
/// type, start offsets within a type ascending by at least the padding
/// width, and every payload
/// (plus its trailing padding) starting before the header table.
pub(crate) fn validate_table(table: &ResourceTable, header_offset: u32) -> Result<(), ParseError> {
    for res_type in table.types() {
        let resources = table.resources(res_type);
        for (index, res) in resources.iter().enumerate() {
            if resources[..index].iter().any(|prev| prev.id() == res.id()) {
                return Err(ParseError::DuplicateId {
                    res_type,
                    id: res.id(),
                });
            }
            // Each payload needs room for its padding before the next one.
            let follows_previous = index == 0
                || resources[index - 1]
                    .data_offset()
                    .checked_add(layout::PADDING_LEN)
                    .is_some_and(|min_next| min_next <= res.data_offset());
            if !follows_previous {
                return Err(ParseError::UnorderedOffsets {
                    res_type,
                    id: res.id(),
                    start_offset: res.start_offset(),
                });
            }
            if res.data_offset() + layout::PADDING_LEN > to_position(header_offset) {
                return Err(ParseError::OffsetOutOfRange {
                    res_type,
                    id: res.id(),
                    data_offset: res.data_offset(),
                    header_offset,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::RsrcBuilder;
    use datalit::datalit;

    #[test]
    fn parses_raw_record() {
        let data = datalit!(0x3A99, 0xFFFF, 0x00342D96, 0x00000000);
        let record = RawRecord::parse(&mut MemReader::new(&data)).unwrap();
        assert_eq!(record.id, 0x3A99);
        assert_eq!(record.marker, layout::MARKER);
        assert_eq!(record.start_offset, 0x0034_2D96);
        assert_eq!(record.reserved, 0);
    }

    #[test]
    fn reads_header_offset_from_preamble() {
        let data = datalit!(0x00000100, 0x00000312, 0x00000212, 0x0000003A);
        assert_eq!(read_header_offset(&data).unwrap(), 0x312);
    }

    #[test]
    fn parses_built_file() {
        let built = RsrcBuilder::new()
            .resource(ResourceType::Text, 128, b"hello".to_vec())
            .resource(ResourceType::Text, 129, b"resource".to_vec())
            .resource(ResourceType::Text, 200, Vec::new())
            .build();
        let parsed = parse_header(&built.bytes).unwrap();
        assert_eq!(parsed.header_offset, built.header_offset);
        assert_eq!(parsed.table, built.table);
        let ids: Vec<u16> = parsed.table.iter().map(Resource::id).collect();
        assert_eq!(ids, vec![128, 129, 200]);
    }

    #[test]
    fn empty_table_is_allowed() {
        let built = RsrcBuilder::new().build();
        let parsed = parse_header(&built.bytes).unwrap();
        assert!(parsed.table.is_empty());
    }

    #[test]
    fn rejects_header_offset_past_end() {
        let mut data = RsrcBuilder::new()
            .resource(ResourceType::Pict, 1, vec![0; 4])
            .build()
            .bytes;
        let bogus = u32::try_from(data.len()).unwrap();
        data[4..8].copy_from_slice(&bogus.to_be_bytes());
        assert!(matches!(
            parse_header(&data),
            Err(ParseError::HeaderOffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_short_preamble() {
        let data = datalit!(0x00000100, 0x0000);
        assert!(matches!(parse_header(&data), Err(ParseError::Truncated(_))));
    }

    #[test]
    fn rejects_unknown_type() {
        let built = RsrcBuilder::new()
            .resource(ResourceType::Pict, 1, vec![0; 4])
            .build();
        let mut data = built.bytes;
        let type_pos = built.header_offset as usize + layout::TRAILER_PREAMBLE_LEN;
        data[type_pos..type_pos + 4].copy_from_slice(b"ZZZZ");
        assert!(matches!(
            parse_header(&data),
            Err(ParseError::UnknownType { offset, .. }) if offset == type_pos
        ));
    }

    #[test]
    fn rejects_truncated_record() {
        let mut data = RsrcBuilder::new()
            .resource(ResourceType::Pict, 1, vec![0; 4])
            .resource(ResourceType::Pict, 2, vec![0; 4])
            .build()
            .bytes;
        data.truncate(data.len() - 3);
        assert!(matches!(parse_header(&data), Err(ParseError::Truncated(_))));
    }

    #[test]
    fn rejects_missing_marker() {
        let built = RsrcBuilder::new()
            .resource(ResourceType::Pict, 1, vec![0; 4])
            .build();
        let mut data = built.bytes;
        // Drop the only entry, leaving a type code with no list.
        data.truncate(data.len() - layout::RECORD_LEN);
        assert!(matches!(
            parse_header(&data),
            Err(ParseError::MissingMarker {
                res_type: ResourceType::Pict,
                ..
            })
        ));
    }

    #[test]
    fn second_type_block_is_unsupported() {
        let built = RsrcBuilder::new()
            .resource(ResourceType::Pict, 1, vec![0; 4])
            .resource(ResourceType::Snd, 1, vec![0; 4])
            .build();
        assert!(matches!(
            parse_header(&built.bytes),
            Err(ParseError::UnsupportedLayout { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let built = RsrcBuilder::new()
            .resource(ResourceType::Pict, 1, vec![0; 4])
            .resource(ResourceType::Pict, 2, vec![0; 4])
            .build();
        let mut data = built.bytes;
        let last_id = data.len() - layout::RECORD_LEN;
        data[last_id..last_id + 2].copy_from_slice(&1u16.to_be_bytes());
        assert!(matches!(
            parse_header(&data),
            Err(ParseError::DuplicateId { id: 1, .. })
        ));
    }

    #[test]
    fn validation_rejects_unordered_offsets() {
        let table: ResourceTable = [
            Resource::new(1, ResourceType::Pict, 0x20),
            Resource::new(2, ResourceType::Pict, 0x10),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            validate_table(&table, 0x400),
            Err(ParseError::UnorderedOffsets { id: 2, .. })
        ));
    }

    #[test]
    fn validation_rejects_offsets_closer_than_padding() {
        let table: ResourceTable = [
            Resource::new(1, ResourceType::Pict, 0x10),
            Resource::new(2, ResourceType::Pict, 0x13),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            validate_table(&table, 0x400),
            Err(ParseError::UnorderedOffsets { id: 2, .. })
        ));

        let spaced: ResourceTable = [
            Resource::new(1, ResourceType::Pict, 0x10),
            Resource::new(2, ResourceType::Pict, 0x14),
        ]
        .into_iter()
        .collect();
        assert!(validate_table(&spaced, 0x400).is_ok());
    }

    #[test]
    fn rejects_parsed_offsets_closer_than_padding() {
        let built = RsrcBuilder::new()
            .resource(ResourceType::Text, 1, Vec::new())
            .resource(ResourceType::Text, 2, b"abc".to_vec())
            .build();
        let mut data = built.bytes;
        // The second entry's offset field is the last eight bytes.
        let offset_field = data.len() - layout::OFFSET_FIELD_LEN;
        data[offset_field..offset_field + 4].copy_from_slice(&1u32.to_be_bytes());
        assert!(matches!(
            parse_header(&data),
            Err(ParseError::UnorderedOffsets { id: 2, start_offset: 1, .. })
        ));
    }

    #[test]
    fn validation_rejects_data_past_header() {
        let table: ResourceTable = [Resource::new(1, ResourceType::Pict, 0x200)]
            .into_iter()
            .collect();
        assert!(matches!(
            validate_table(&table, 0x300),
            Err(ParseError::OffsetOutOfRange { id: 1, .. })
        ));
        assert!(validate_table(&table, 0x308).is_ok());
    }
}
