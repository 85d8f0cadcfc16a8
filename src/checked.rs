//! Overflow-safe `usize` arithmetic. Nothing here wraps; overflow is `Status::Overflow`.

use crate::status::{Result, Status};

#[inline(always)]
pub fn checked_add(a: usize, b: usize) -> Result<usize> {
    a.checked_add(b).ok_or(Status::Overflow)
}

#[inline(always)]
pub fn checked_mul(a: usize, b: usize) -> Result<usize> {
    a.checked_mul(b).ok_or(Status::Overflow)
}

/// Zero is not a power of two.
#[inline(always)]
pub const fn is_pow2(x: usize) -> bool {
    x != 0 && (x & (x - 1)) == 0
}

/// Rounds `x` up to the next multiple of `align`.
#[inline]
pub fn align_up(x: usize, align: usize) -> Result<usize> {
    if !is_pow2(align) {
        return Err(Status::Invalid);
    }
    let mask = align - 1;
    Ok(checked_add(x, mask)? & !mask)
}

/// Padding needed to bring `x` up to a multiple of `align`.
#[inline]
pub fn padding_for(x: usize, align: usize) -> Result<usize> {
    Ok(align_up(x, align)? - x)
}
