// Service exports
pub mod registry;

pub use registry::{Registry, RegistryError, RegistryStats};
