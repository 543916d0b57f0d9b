pub mod i18n;
pub mod shutdown;
pub mod types;

pub use types::*;
