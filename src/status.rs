use core::fmt::{self, Display};

/// Failure kinds reported by every fallible operation in this crate.
///
/// Success is `Ok(..)`; the numeric code of success is `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Unclassified failure.
    Unknown,
    /// Malformed call, e.g. an alignment that is not a power of two.
    Invalid,
    /// Structural misuse, e.g. pushing into a zero-capacity ring,
    /// or a byte slice too short for the requested load/store.
    Range,
    /// The arena has no room left for the request.
    NoMem,
    /// An index or size computation would wrap.
    Overflow,
    /// Pop asked for more bytes than are buffered.
    Empty,
    /// Push offered more bytes than there is free space.
    Full,
    /// Reserved for I/O collaborators.
    Io,
    /// Reserved for unsupported operations.
    Unsupported,
}

pub type Result<T> = core::result::Result<T, Status>;

impl Status {
    /// Numeric status code shared with non-Rust consumers.
    pub const fn code(self) -> i32 {
        match self {
            Status::Unknown => -1,
            Status::Invalid => -2,
            Status::Range => -3,
            Status::NoMem => -4,
            Status::Overflow => -5,
            Status::Empty => -6,
            Status::Full => -7,
            Status::Io => -8,
            Status::Unsupported => -9,
        }
    }

    /// Decodes a numeric code. `0` decodes to `Ok(())`, unknown codes to `Unknown`.
    pub fn from_code(code: i32) -> Result<()> {
        Err(match code {
            0 => return Ok(()),
            -2 => Status::Invalid,
            -3 => Status::Range,
            -4 => Status::NoMem,
            -5 => Status::Overflow,
            -6 => Status::Empty,
            -7 => Status::Full,
            -8 => Status::Io,
            -9 => Status::Unsupported,
            _ => Status::Unknown,
        })
    }

    /// Collapses a result into its numeric code.
    pub fn code_of<T>(result: &Result<T>) -> i32 {
        match result {
            Ok(_) => 0,
            Err(status) => status.code(),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unknown => Display::fmt("unknown error", f),
            Status::Invalid => Display::fmt("invalid argument", f),
            Status::Range => Display::fmt("value out of range", f),
            Status::NoMem => Display::fmt("out of memory", f),
            Status::Overflow => Display::fmt("arithmetic overflow", f),
            Status::Empty => Display::fmt("buffer empty", f),
            Status::Full => Display::fmt("buffer full", f),
            Status::Io => Display::fmt("i/o error", f),
            Status::Unsupported => Display::fmt("unsupported operation", f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Status {}
