use thiserror::Error;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Error)]
pub enum BitError {
    #[error("bit width {width} is invalid; widths must lie in 1..=64")]
    InvalidWidth { width: i64 },

    #[error("value {value} cannot be represented in {width} bits")]
    OutOfRange { value: i128, width: u32 },

    #[error("rounding {n} up to a multiple of {multiple} overflows a `u32`")]
    Overflow { n: u32, multiple: u32 },
}
