/*!

Endian loads and stores over byte slices, plus bit rotations.

Loads and stores never require alignment: values are assembled from bytes.
A slice shorter than the value is `Status::Range`; extra bytes are ignored.

*/

use crate::status::{Result, Status};

#[inline(always)]
fn head<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes.get(..N).ok_or(Status::Range)?);
    Ok(out)
}

#[inline(always)]
fn head_mut(bytes: &mut [u8], n: usize) -> Result<&mut [u8]> {
    bytes.get_mut(..n).ok_or(Status::Range)
}

macro_rules! endian_codec {
    ($ty:ty, $load_le:ident, $load_be:ident, $store_le:ident, $store_be:ident) => {
        #[inline]
        pub fn $load_le(bytes: &[u8]) -> Result<$ty> {
            Ok(<$ty>::from_le_bytes(head(bytes)?))
        }

        #[inline]
        pub fn $load_be(bytes: &[u8]) -> Result<$ty> {
            Ok(<$ty>::from_be_bytes(head(bytes)?))
        }

        #[inline]
        pub fn $store_le(bytes: &mut [u8], value: $ty) -> Result<()> {
            head_mut(bytes, core::mem::size_of::<$ty>())?.copy_from_slice(&value.to_le_bytes());
            Ok(())
        }

        #[inline]
        pub fn $store_be(bytes: &mut [u8], value: $ty) -> Result<()> {
            head_mut(bytes, core::mem::size_of::<$ty>())?.copy_from_slice(&value.to_be_bytes());
            Ok(())
        }
    };
}

endian_codec!(u16, load_u16_le, load_u16_be, store_u16_le, store_u16_be);
endian_codec!(u32, load_u32_le, load_u32_be, store_u32_le, store_u32_be);
endian_codec!(u64, load_u64_le, load_u64_be, store_u64_le, store_u64_be);

/// Rotation count is taken modulo 32.
#[inline(always)]
pub const fn rotl32(x: u32, r: u32) -> u32 {
    x.rotate_left(r & 31)
}

#[inline(always)]
pub const fn rotr32(x: u32, r: u32) -> u32 {
    x.rotate_right(r & 31)
}

/// Rotation count is taken modulo 64.
#[inline(always)]
pub const fn rotl64(x: u64, r: u32) -> u64 {
    x.rotate_left(r & 63)
}

#[inline(always)]
pub const fn rotr64(x: u64, r: u32) -> u64 {
    x.rotate_right(r & 63)
}
