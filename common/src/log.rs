//! Status macros shared by every crate of the workspace.
//!
//! They forward to `tracing` under dedicated targets so a front-end formatter
//! can pick a symbol per kind of message.

pub const TARGET_SUCCESS: &str = "cineos::success";
pub const TARGET_STATUS: &str = "cineos::status";
pub const TARGET_PRINT: &str = "cineos::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::log::TARGET_SUCCESS, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::log::TARGET_STATUS, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: $crate::log::TARGET_STATUS, $($arg)*)
    };
}
