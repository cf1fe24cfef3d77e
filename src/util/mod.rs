pub mod bits;
pub mod error;
pub mod format;
