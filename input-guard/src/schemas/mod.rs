//! Data contracts for payloads crossing from the UI or from plugins.

pub mod document;
pub mod plugin;

pub use document::{ContentType, DocumentContent};
pub use plugin::{is_semver, FileSystemAccess, PluginManifest, SandboxDescriptor};
