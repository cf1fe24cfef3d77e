//! Fixed-width bitmask operations on signed and unsigned integers.
//!
//! Everything in [`util::bits`] is pure: widths are either derived from the operands with
//! [`util::bits::count_bits`] or passed explicitly as a [`util::bits::BitWidth`].

pub mod config;
pub mod util;
