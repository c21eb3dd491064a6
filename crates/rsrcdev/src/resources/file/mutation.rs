//! Replacing a resource's payload and re-deriving every affected offset.

use std::io::{self, Write as _};

use crate::{
    resources::{
        ResourceTable, ResourceType,
        file::{MutationError, layout, range::resolve},
    },
    utils::{
        convert::{apply_delta, size_delta, to_offset, to_position},
        data_writer::DataWriterExt as _,
        matcher::ByteMatcher,
    },
};

/// The complete state of a file after a replacement. Nothing is applied to
/// the original file until this has been fully built.
#[derive(Debug)]
pub(crate) struct Replacement {
    pub(crate) data: Vec<u8>,
    pub(crate) header_offset: u32,
    pub(crate) table: ResourceTable,
    pub(crate) delta: i64,
}

/// Builds the file that results from replacing the payload of
/// `res_type:id` with `new_data`.
///
/// The buffer is rebuilt around the new payload, the header offset is moved
/// by the size change, and every entry in the table is rewritten in the
/// header table so the trailer bytes match the returned table.
pub(crate) fn replace(
    data: &[u8],
    header_offset: u32,
    table: &ResourceTable,
    id: u16,
    res_type: ResourceType,
    new_data: &[u8],
) -> Result<Replacement, MutationError> {
    let range = resolve(table, header_offset, id, res_type)?;
    // Only lengths beyond `i64::MAX` fail here.
    let delta = size_delta(new_data.len(), range.length())
        .ok_or(MutationError::OffsetOverflow { delta: i64::MAX })?;
    let new_length = to_offset(new_data.len()).ok_or(MutationError::OffsetOverflow { delta })?;

    // The padding in front of the next payload (or the header) is kept.
    let head = data.get(..range.data_start());
    let tail = data.get(range.data_stop() - layout::PADDING_LEN..);
    let (Some(head), Some(tail)) = (head, tail) else {
        return Err(MutationError::HeaderOutOfRange { header_offset });
    };
    let mut spliced = Vec::with_capacity(head.len() + new_data.len() + tail.len());
    spliced.extend_from_slice(head);
    spliced.extend_from_slice(new_data);
    spliced.extend_from_slice(tail);
    // The payload's own length prefix sits inside the copied head.
    let prefix = range.data_start() - layout::LENGTH_PREFIX_LEN..range.data_start();
    spliced[prefix].copy_from_slice(&new_length.to_be_bytes());

    let new_header_offset =
        apply_delta(header_offset, delta).ok_or(MutationError::OffsetOverflow { delta })?;
    write_header_fields(&mut spliced, new_header_offset)?;

    let mut table = table.clone();
    shift_entries(&mut table, range.data_start(), delta)?;
    rewrite_entries(&mut spliced, new_header_offset, &table)?;

    Ok(Replacement {
        data: spliced,
        header_offset: new_header_offset,
        table,
        delta,
    })
}

/// Writes the header offset, and the data length derived from it, to the
/// file preamble and to its copy at the start of the header table.
fn write_header_fields(data: &mut [u8], header_offset: u32) -> Result<(), MutationError> {
    let data_length = header_offset.saturating_sub(layout::DATA_SECTION_START);
    for base in [0, to_position(header_offset)] {
        let slot: &mut [u8] = data
            .get_mut(base + layout::HEADER_OFFSET_FIELD.start..base + layout::DATA_LENGTH_FIELD.end)
            .unwrap_or_default();
        write_header_echo(slot, header_offset, data_length)
            .map_err(|_| MutationError::HeaderOutOfRange { header_offset })?;
    }
    Ok(())
}

fn write_header_echo<W: io::Write>(
    mut out: W,
    header_offset: u32,
    data_length: u32,
) -> io::Result<()> {
    out.write_u32_be(header_offset)?;
    out.write_u32_be(data_length)
}

/// Moves every resource whose payload starts after `replaced_start`.
fn shift_entries(
    table: &mut ResourceTable,
    replaced_start: usize,
    delta: i64,
) -> Result<(), MutationError> {
    if delta == 0 {
        return Ok(());
    }
    for resource in table.iter_mut() {
        if resource.data_offset() > replaced_start {
            let shifted = apply_delta(resource.start_offset(), delta)
                .ok_or(MutationError::OffsetOverflow { delta })?;
            resource.set_start_offset(shifted);
        }
    }
    Ok(())
}

/// Re-locates each entry's ID and marker in the header table, in table
/// order, and overwrites the offset field that follows it.
fn rewrite_entries(
    data: &mut [u8],
    header_offset: u32,
    table: &ResourceTable,
) -> Result<(), MutationError> {
    let mut cursor = to_position(header_offset);
    for resource in table {
        let pattern = resource.id_marker_bytes();
        let inconsistent = MutationError::Inconsistent {
            id: resource.id(),
            res_type: resource.res_type(),
            search_start: cursor,
        };
        let Some(found) = ByteMatcher::new(&pattern).find_in(data, cursor) else {
            return Err(inconsistent);
        };

        let field_start = found + pattern.len();
        let mut field: &mut [u8] = data.get_mut(field_start..).unwrap_or_default();
        if field.write_all(&resource.offset_bytes()).is_err() {
            return Err(inconsistent);
        }
        log::trace!(
            "Wrote offset {:#x} for {}:{} at {field_start:#x}",
            resource.start_offset(),
            resource.res_type(),
            resource.id(),
        );
        cursor = field_start + layout::OFFSET_FIELD_LEN;
    }
    Ok(())
}
