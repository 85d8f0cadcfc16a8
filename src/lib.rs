//! Bounded memory primitives over caller-owned blocks.
//!
//! - [`Arena`]: bump allocator with aligned allocation and bulk reset.
//! - [`RingBuffer`]: fixed-capacity byte FIFO with all-or-nothing push and pop.
//! - [`FmtBuf`]: truncating text builder, handy on arena scratch memory.
//!
//! Nothing here allocates or needs an operating system. Runtime failures are
//! returned as [`Status`]; only broken internal invariants panic, and only
//! when assertions are enabled (debug builds or the `assertions` feature).
//!
//! ```
//! use boundmem::{Arena, RingBuffer, Status};
//!
//! let mut block = [0u8; 16];
//! let arena = Arena::new(&mut block);
//! assert!(arena.alloc(10, 1).unwrap().is_some());
//! assert_eq!(Err(Status::NoMem), arena.alloc(10, 1));
//!
//! let mut storage = [0u8; 4];
//! let mut ring = RingBuffer::new(&mut storage);
//! ring.push(b"abc").unwrap();
//! let mut out = [0u8; 2];
//! ring.pop(&mut out).unwrap();
//! assert_eq!(b"ab", &out);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod logging;
#[macro_use]
mod assert;

mod arena;
mod fmtbuf;
mod ring;
mod status;

pub mod bytes;
pub mod checked;

pub use arena::Arena;
pub use assert::ASSERTIONS_ENABLED;
pub use fmtbuf::FmtBuf;
pub use ring::RingBuffer;
pub use status::{Result, Status};
