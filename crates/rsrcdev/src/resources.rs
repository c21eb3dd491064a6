//! The resource model: type codes, header-table entries, and the table that
//! groups them by type.

pub mod file;
mod resource;
mod resource_type;
mod table;

pub use self::{
    resource::Resource,
    resource_type::{ConversionError, ResourceType},
    table::ResourceTable,
};
