pub mod memory;

#[cfg(feature = "sql")]
pub mod sql;
