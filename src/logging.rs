#![allow(unused_macros)]

// Log macros compile to nothing unless the `logging` feature pulls in `log`.
// Arguments are not evaluated in that case, so keep them free of side effects.

macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: "boundmem", $($arg)+);
    )
}

macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: "boundmem", $($arg)+);
    )
}

macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::warn!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::warn!(target: "boundmem", $($arg)+);
    )
}
