//! Localized message lookup
//!
//! Catalogs are flat TOML tables (`"key" = "template"`) compiled into the
//! binary. Templates may contain `{name}` placeholders.

pub mod catalog;

pub use catalog::{MessageCatalog, SharedMessages};
