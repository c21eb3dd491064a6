//! The in-memory resource file.

mod disk;
mod errors;
mod header;
pub(crate) mod layout;
mod mutation;
mod range;

pub use self::{
    disk::backup_path,
    errors::{LookupError, MutationError, OpenError, ParseError, SaveError},
    range::OffsetRange,
};

use crate::resources::{Resource, ResourceTable, ResourceType};

/// A resource file held entirely in memory.
///
/// The raw bytes are the single source of truth. The header offset and the
/// table are derived from them at load time and kept in step with them by
/// [`RsrcFile::replace_data`]. Payloads handed out are copies, so they stay
/// valid across later replacements.
#[derive(Debug, Clone)]
pub struct RsrcFile {
    data: Vec<u8>,
    header_offset: u32,
    table: ResourceTable,
    invalidated: bool,
}

impl RsrcFile {
    /// Parses a resource file from its raw bytes.
    pub fn load(data: Vec<u8>) -> Result<Self, ParseError> {
        let header::ParsedHeader {
            header_offset,
            table,
        } = header::parse_header(&data)?;
        Ok(RsrcFile {
            data,
            header_offset,
            table,
            invalidated: false,
        })
    }

    /// Builds a file from raw bytes and an explicitly supplied table, for
    /// layouts the parser cannot read on its own.
    ///
    /// The table is checked the same way a parsed one is, and the header
    /// offset is taken from the preamble.
    pub fn from_parts(data: Vec<u8>, table: ResourceTable) -> Result<Self, ParseError> {
        let header_offset = header::read_header_offset(&data)?;
        header::entries_start(&data, header_offset)?;
        header::validate_table(&table, header_offset)?;
        Ok(RsrcFile {
            data,
            header_offset,
            table,
            invalidated: false,
        })
    }

    /// Substitutes the whole resource table.
    pub fn replace_table(&mut self, table: ResourceTable) -> Result<(), ParseError> {
        header::validate_table(&table, self.header_offset)?;
        self.table = table;
        Ok(())
    }

    #[must_use]
    pub fn get_resource(&self, id: u16, res_type: ResourceType) -> Option<Resource> {
        self.table.get(res_type, id).copied()
    }

    /// The resource types present, in table order.
    #[must_use]
    pub fn list_types(&self) -> Vec<ResourceType> {
        self.table.types().collect()
    }

    /// The resources of one type, in table order. Empty if the type is
    /// absent.
    #[must_use]
    pub fn list_resources(&self, res_type: ResourceType) -> Vec<Resource> {
        self.table.resources(res_type).to_vec()
    }

    pub fn offset_range(
        &self,
        id: u16,
        res_type: ResourceType,
    ) -> Result<OffsetRange, LookupError> {
        range::resolve(&self.table, self.header_offset, id, res_type)
    }

    /// Copies out the payload of a resource.
    pub fn read_data(&self, id: u16, res_type: ResourceType) -> Result<Vec<u8>, LookupError> {
        let range = self.offset_range(id, res_type)?;
        self.data
            .get(range.payload())
            .map(<[u8]>::to_vec)
            .ok_or(LookupError::InvalidRange {
                id,
                res_type,
                data_start: range.data_start(),
                data_stop: range.data_stop(),
            })
    }

    /// Replaces the payload of a resource, resizing the file as needed.
    ///
    /// Either the whole replacement is applied or the file is left as it
    /// was. If the header table cannot be brought back in line with the
    /// resource table ([`MutationError::Inconsistent`]), the file is marked
    /// invalid and refuses further replacements until it is reloaded.
    pub fn replace_data(
        &mut self,
        id: u16,
        res_type: ResourceType,
        new_data: &[u8],
    ) -> Result<(), MutationError> {
        if self.invalidated {
            return Err(MutationError::Invalidated);
        }
        match mutation::replace(
            &self.data,
            self.header_offset,
            &self.table,
            id,
            res_type,
            new_data,
        ) {
            Ok(replacement) => {
                log::debug!(
                    "Replaced {res_type}:{id} ({:+} bytes), header now at {:#x}",
                    replacement.delta,
                    replacement.header_offset,
                );
                self.data = replacement.data;
                self.header_offset = replacement.header_offset;
                self.table = replacement.table;
                Ok(())
            }
            Err(err @ MutationError::Inconsistent { .. }) => {
                log::warn!("Invalidating resource file: {err}");
                self.invalidated = true;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// A copy of the current file contents.
    #[must_use]
    pub fn export_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub fn file_size(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn header_offset(&self) -> u32 {
        self.header_offset
    }

    #[must_use]
    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}
