//! Provides tools for reading and editing classic Mac resource files.
//!
//! A resource file packs typed, numbered data blobs in front of a trailing
//! header table. The table records only where each resource starts, so
//! every resource's extent is derived from its neighbour, and replacing a
//! resource with data of a different size requires every later offset in
//! the table to be rewritten. [`resources::file::RsrcFile`] owns the raw
//! bytes and keeps the in-memory table and the on-disk trailer in sync.

pub mod resources;
pub mod utils;
