//! Data models

pub mod figure;
pub mod record;

pub use figure::*;
pub use record::*;
