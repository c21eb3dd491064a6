pub mod convert;
pub mod data_writer;
pub mod debug;
pub mod matcher;
pub mod mem_reader;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
