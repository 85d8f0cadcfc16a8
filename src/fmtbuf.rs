//! Bounded text formatting into a caller-owned byte buffer.
//!
//! [`FmtBuf`] appends text without ever writing past its buffer. Output that
//! does not fit is dropped and the buffer is marked truncated. One byte is
//! reserved for a trailing NUL, so the contents can also be handed to C as a
//! string. Integer formatting is done by hand to keep `core::fmt` machinery
//! out of the hot path; `core::fmt::Write` is implemented for everything else.

use core::fmt;
use core::mem;
use core::str;

const LOWER_HEX: &[u8; 16] = b"0123456789abcdef";
const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Truncating string builder over a borrowed buffer.
///
/// The buffer may come from anywhere, including an
/// [`Arena`](crate::Arena) region.
pub struct FmtBuf<'a> {
    dst: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> FmtBuf<'a> {
    pub fn new(dst: &'a mut [u8]) -> FmtBuf<'a> {
        if let Some(first) = dst.first_mut() {
            *first = 0;
        }
        FmtBuf {
            dst,
            len: 0,
            truncated: false,
        }
    }

    /// Size of the underlying buffer, terminator included.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.dst.len()
    }

    /// Bytes written, terminator excluded.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes that can still be appended before truncation starts.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(1) - self.len
    }

    /// True once any appended byte has been dropped. Stays set until `clear`.
    #[inline(always)]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.dst[..self.len]
    }

    /// The written text.
    ///
    /// If truncation split a multi-byte character, or raw non-UTF-8 bytes
    /// were appended, this is the longest valid prefix.
    pub fn as_str(&self) -> &str {
        match str::from_utf8(self.as_bytes()) {
            Ok(s) => s,
            Err(e) => str::from_utf8(&self.dst[..e.valid_up_to()]).unwrap_or_default(),
        }
    }

    /// Forgets the written text and the truncation flag.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        self.terminate();
    }

    /// Appends as much of `data` as fits.
    pub fn append_bytes(&mut self, data: &[u8]) {
        let n = data.len().min(self.remaining());
        self.dst[self.len..self.len + n].copy_from_slice(&data[..n]);
        self.len += n;
        if n != data.len() {
            self.truncated = true;
        }
        self.terminate();
        invariant!(
            self.capacity() == 0 || self.len < self.capacity(),
            "fmt length {} leaves no room for the terminator in {}", self.len, self.capacity()
        );
    }

    #[inline]
    pub fn append_str(&mut self, s: &str) {
        self.append_bytes(s.as_bytes())
    }

    /// Appends `c` UTF-8 encoded. A character that does not fit whole is
    /// still cut at the byte level, like any other append.
    pub fn append_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.append_bytes(c.encode_utf8(&mut utf8).as_bytes())
    }

    #[inline]
    pub fn append_u32(&mut self, v: u32) {
        self.append_u64(u64::from(v))
    }

    pub fn append_u64(&mut self, mut v: u64) {
        let mut digits = [0u8; 20];
        let mut start = digits.len();
        loop {
            start -= 1;
            digits[start] = b'0' + (v % 10) as u8;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        self.append_bytes(&digits[start..])
    }

    #[inline]
    pub fn append_i32(&mut self, v: i32) {
        self.append_i64(i64::from(v))
    }

    pub fn append_i64(&mut self, v: i64) {
        if v < 0 {
            self.append_bytes(b"-");
        }
        // `unsigned_abs` keeps i64::MIN intact.
        self.append_u64(v.unsigned_abs())
    }

    /// Appends `v` as exactly 8 hex digits.
    #[inline]
    pub fn append_hex_u32(&mut self, v: u32, uppercase: bool) {
        self.append_hex(u64::from(v), 8, uppercase)
    }

    /// Appends `v` as exactly 16 hex digits.
    #[inline]
    pub fn append_hex_u64(&mut self, v: u64, uppercase: bool) {
        self.append_hex(v, 16, uppercase)
    }

    /// Appends `0x` followed by the address in lowercase hex, padded to
    /// the pointer width of the target.
    pub fn append_ptr<T: ?Sized>(&mut self, p: *const T) {
        self.append_bytes(b"0x");
        let nibbles = mem::size_of::<usize>() * 2;
        self.append_hex(p as *const u8 as usize as u64, nibbles, false)
    }

    fn append_hex(&mut self, v: u64, nibbles: usize, uppercase: bool) {
        invariant!(nibbles > 0 && nibbles <= 16, "hex width {} out of range", nibbles);
        let table = if uppercase { UPPER_HEX } else { LOWER_HEX };
        let mut digits = [0u8; 16];
        for (i, digit) in digits[..nibbles].iter_mut().enumerate() {
            let shift = (nibbles - 1 - i) * 4;
            *digit = table[((v >> shift) & 0xF) as usize];
        }
        self.append_bytes(&digits[..nibbles])
    }

    #[inline(always)]
    fn terminate(&mut self) {
        if let Some(end) = self.dst.get_mut(self.len) {
            *end = 0;
        }
    }
}

/// Writing never fails; output that does not fit is dropped and recorded
/// in [`FmtBuf::is_truncated`].
impl<'a> fmt::Write for FmtBuf<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_char(c);
        Ok(())
    }
}

impl<'a> fmt::Debug for FmtBuf<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmtBuf")
            .field("text", &self.as_str())
            .field("capacity", &self.capacity())
            .field("truncated", &self.truncated)
            .finish()
    }
}
