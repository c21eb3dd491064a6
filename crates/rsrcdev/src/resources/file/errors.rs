use std::{io, path::PathBuf};

use crate::{
    resources::{ConversionError, ResourceType},
    utils::mem_reader::MemReaderError,
};

/// A failure to build a resource table from raw bytes. No partial table is
/// ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(
        "Header offset {header_offset:#x} does not leave room for the header table in a {file_size} byte file"
    )]
    HeaderOffsetOutOfRange { header_offset: u32, file_size: usize },
    #[error("Truncated data: {0}")]
    Truncated(#[from] MemReaderError),
    #[error("Unrecognized resource type at {offset:#x}: {source}")]
    UnknownType {
        offset: usize,
        #[source]
        source: ConversionError,
    },
    #[error("No ID marker follows resource type {res_type} at {offset:#x}")]
    MissingMarker { offset: usize, res_type: ResourceType },
    #[error(
        "Unsupported header layout: entry at {offset:#x} has marker {found:02X?} instead of FF FF"
    )]
    UnsupportedLayout { offset: usize, found: [u8; 2] },
    #[error("Duplicate resource {res_type}:{id}")]
    DuplicateId { res_type: ResourceType, id: u16 },
    #[error(
        "Resource {res_type}:{id} at {start_offset:#x} does not follow the previous entry of its type"
    )]
    UnorderedOffsets {
        res_type: ResourceType,
        id: u16,
        start_offset: u32,
    },
    #[error(
        "Resource {res_type}:{id} data at {data_offset:#x} runs past the header table at {header_offset:#x}"
    )]
    OffsetOutOfRange {
        res_type: ResourceType,
        id: u16,
        data_offset: usize,
        header_offset: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Resource {res_type}:{id} not found")]
    NotFound { id: u16, res_type: ResourceType },
    #[error("Resource {res_type}:{id} has an invalid range {data_start:#x}..{data_stop:#x}")]
    InvalidRange {
        id: u16,
        res_type: ResourceType,
        data_start: usize,
        data_stop: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("Resource {res_type}:{id} not found")]
    NotFound { id: u16, res_type: ResourceType },
    #[error(transparent)]
    Lookup(LookupError),
    #[error(
        "Header table entry for {res_type}:{id} not found after {search_start:#x}; the file must be reloaded"
    )]
    Inconsistent {
        id: u16,
        res_type: ResourceType,
        search_start: usize,
    },
    #[error("Resizing by {delta} bytes moves an offset outside the 32-bit range")]
    OffsetOverflow { delta: i64 },
    #[error("Header offset {header_offset:#x} lies outside the rebuilt file")]
    HeaderOutOfRange { header_offset: u32 },
    #[error("The file was invalidated by an earlier failed replacement and must be reloaded")]
    Invalidated,
}

impl From<LookupError> for MutationError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { id, res_type } => MutationError::NotFound { id, res_type },
            err @ LookupError::InvalidRange { .. } => MutationError::Lookup(err),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("I/O error while reading resource file: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed resource file: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to create backup {}: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while writing resource file: {0}")]
    Io(#[from] io::Error),
}
