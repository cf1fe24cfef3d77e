use std::fmt;

use super::{error::BitError, format::FmtIter};

// === BitValue === //

/// An integer whose bit pattern can be inspected independently of its signedness.
pub trait BitValue: Copy + fmt::Debug {
    const SIGNED: bool;
    const BITS: u32;

    /// The value's bit pattern, sign-extended to 64 bits for signed types.
    fn to_raw(self) -> u64;

    /// The absolute value of the integer.
    fn magnitude(self) -> u64;

    /// Reads the bit at `index`. Positions past the 64th bit repeat the sign bit for signed types
    /// and read as zero for unsigned ones.
    fn bit(self, index: usize) -> bool {
        let raw = self.to_raw();

        if index < u64::BITS as usize {
            (raw >> index) & 1 == 1
        } else {
            Self::SIGNED && (raw as i64) < 0
        }
    }
}

macro_rules! impl_bit_value {
    (signed: $($ty:ty),* $(,)?) => {$(
        impl BitValue for $ty {
            const SIGNED: bool = true;
            const BITS: u32 = <$ty>::BITS;

            fn to_raw(self) -> u64 {
                self as i64 as u64
            }

            fn magnitude(self) -> u64 {
                self.unsigned_abs() as u64
            }
        }
    )*};
    (unsigned: $($ty:ty),* $(,)?) => {$(
        impl BitValue for $ty {
            const SIGNED: bool = false;
            const BITS: u32 = <$ty>::BITS;

            fn to_raw(self) -> u64 {
                self as u64
            }

            fn magnitude(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_bit_value!(signed: i8, i16, i32, i64, isize);
impl_bit_value!(unsigned: u8, u16, u32, u64, usize);

// === BitWidth === //

/// A bit width in `1..=64`.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BitWidth(u32);

impl BitWidth {
    pub const BYTE: Self = Self(8);
    pub const MAX: Self = Self(u64::BITS);

    pub const fn new(bits: u32) -> Result<Self, BitError> {
        if bits == 0 || bits > u64::BITS {
            return Err(BitError::InvalidWidth { width: bits as i64 });
        }

        Ok(Self(bits))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = BitError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl TryFrom<i64> for BitWidth {
    type Error = BitError;

    fn try_from(bits: i64) -> Result<Self, Self::Error> {
        match u32::try_from(bits) {
            Ok(bits) => Self::new(bits),
            Err(_) => Err(BitError::InvalidWidth { width: bits }),
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The mask with the low `width` bits set.
pub const fn low_mask(width: BitWidth) -> u64 {
    u64::MAX >> (u64::BITS - width.get())
}

// === Bit counting === //

/// The minimum number of bits needed to represent `value`, including a sign bit if `T` is signed.
///
/// Zero always takes a single bit.
pub fn count_bits<T: BitValue>(value: T) -> u32 {
    let magnitude = value.magnitude();

    if magnitude == 0 {
        return 1;
    }

    u64::BITS - magnitude.leading_zeros() + T::SIGNED as u32
}

/// The width the mask operations act on: the wider of the two operands, capped at the width of
/// `T` itself.
pub fn operand_width<T: BitValue>(data: T, mask: T) -> BitWidth {
    // `count_bits` is never zero and no `BitValue` is wider than 64 bits.
    BitWidth(count_bits(data).max(count_bits(mask)).min(T::BITS))
}

// === Mask operations === //

/// One of the three ways a mask can rewrite the bits of a value.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum MaskOp {
    Set,
    Clear,
    Toggle,
}

impl MaskOp {
    /// Every operation, in set, clear, toggle order.
    pub const ALL: [Self; 3] = [Self::Set, Self::Clear, Self::Toggle];

    /// Applies the operation to full 64-bit patterns without truncating to any width.
    pub const fn apply_raw(self, data: u64, mask: u64) -> u64 {
        match self {
            MaskOp::Set => data | mask,
            MaskOp::Clear => data & !mask,
            MaskOp::Toggle => data ^ mask,
        }
    }
}

/// Applies `op` to the low `width` bits of `data`. Every bit at or above `width` in the result is
/// zero.
pub fn apply_mask<T: BitValue>(op: MaskOp, data: T, mask: T, width: BitWidth) -> u64 {
    op.apply_raw(data.to_raw(), mask.to_raw()) & low_mask(width)
}

pub fn set_bits<T: BitValue>(data: T, mask: T) -> u64 {
    apply_mask(MaskOp::Set, data, mask, operand_width(data, mask))
}

pub fn clear_bits<T: BitValue>(data: T, mask: T) -> u64 {
    apply_mask(MaskOp::Clear, data, mask, operand_width(data, mask))
}

pub fn toggle_bits<T: BitValue>(data: T, mask: T) -> u64 {
    apply_mask(MaskOp::Toggle, data, mask, operand_width(data, mask))
}

// === Rendering === //

/// Lazily renders `value` as a binary string, least-significant bit first, zero-padded to at least
/// `min_length` characters.
pub fn fmt_bits<T: BitValue>(
    value: T,
    min_length: usize,
) -> FmtIter<impl Clone + Iterator<Item = char>> {
    let len = (count_bits(value) as usize).max(min_length);

    FmtIter::new((0..len).map(move |i| if value.bit(i) { '1' } else { '0' }))
}

pub fn bits_to_string<T: BitValue>(value: T, min_length: usize) -> String {
    fmt_bits(value, min_length).to_string()
}

// === Arithmetic helpers === //

/// Rounds `n` up to the nearest multiple of `multiple`. A `multiple` of zero leaves `n` untouched.
pub fn round_up(n: u32, multiple: u32) -> Result<u32, BitError> {
    if multiple == 0 {
        return Ok(n);
    }

    match n % multiple {
        0 => Ok(n),
        rem => n
            .checked_add(multiple - rem)
            .ok_or(BitError::Overflow { n, multiple }),
    }
}

pub const fn min_unsigned(_width: BitWidth) -> u64 {
    0
}

pub const fn max_unsigned(width: BitWidth) -> u64 {
    low_mask(width)
}

pub const fn max_signed(width: BitWidth) -> i64 {
    (low_mask(width) >> 1) as i64
}

pub const fn min_signed(width: BitWidth) -> i64 {
    !max_signed(width)
}

/// Produces the `width`-bit two's-complement pattern of `value`.
pub fn signed_to_unsigned(value: i64, width: BitWidth) -> Result<u64, BitError> {
    if value < min_signed(width) || value > max_signed(width) {
        return Err(BitError::OutOfRange {
            value: value.into(),
            width: width.get(),
        });
    }

    Ok(value as u64 & low_mask(width))
}

/// Sign-extends a `width`-bit two's-complement pattern.
pub fn unsigned_to_signed(pattern: u64, width: BitWidth) -> Result<i64, BitError> {
    if pattern > max_unsigned(width) {
        return Err(BitError::OutOfRange {
            value: pattern.into(),
            width: width.get(),
        });
    }

    let shift = u64::BITS - width.get();
    Ok(((pattern << shift) as i64) >> shift)
}
