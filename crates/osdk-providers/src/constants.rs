//! Provider constants

/// Backend type name of the in-process remote store emulation
pub const MEMORY_BACKEND_TYPE: &str = "memory";
