//! Invariant checks for programmer errors.
//!
//! Runtime conditions (full, empty, out of memory) are reported through
//! [`Status`](crate::Status). Broken internal invariants are not; they go
//! through `invariant!`, which panics when assertions are enabled and
//! compiles to a type-check otherwise. Assertions are enabled in debug
//! builds, and in release builds with the `assertions` feature.
//!
//! The panic itself is routed by the platform: `#[panic_handler]` on bare
//! metal, the standard runtime on hosted targets.

/// True when `invariant!` checks are compiled in.
pub const ASSERTIONS_ENABLED: bool = cfg!(any(debug_assertions, feature = "assertions"));

macro_rules! invariant {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(any(debug_assertions, feature = "assertions"))]
        {
            if !$cond {
                panic!($($arg)+);
            }
        }
        #[cfg(not(any(debug_assertions, feature = "assertions")))]
        {
            let _ = || $cond;
        }
    };
}
