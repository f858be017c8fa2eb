#![allow(unused_macros)]
//! Diagnostics for the log-analytics crates themselves.
//!
//! **Note**: `analytics_info!`, `analytics_warn!`, `analytics_debug!` and `analytics_error!` are
//! meant for code inside the log-analytics crates and for custom sinks or appenders. They are not
//! an application logging API.
//!
//! They are only called while building routers, reading configuration and installing bridges.
//! Nothing that runs while a record is being routed may call them, because the appenders sit
//! behind the same façade these macros log through.
//!
//! With the `internal-logs` feature the events go to `tracing` under the emitting crate's
//! package name. Under `cfg(test)` they are printed to stdout, so `--nocapture` shows them.

#[doc(hidden)]
#[macro_export]
macro_rules! __analytics_internal_log {
    ($macro:ident, $label:literal, $name:expr $(, $key:ident = $value:expr)*) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::$macro!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name $(, $key = $value)*);
        }

        #[cfg(test)]
        {
            print!("{}: name={}", $label, $name);
            $(
                print!(", {}={}", stringify!($key), $value);
            )*
            print!("\n");
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name $(, $value)*); // Compiler will optimize this out as it's unused.
        }
    };
}

/// Logs an informational diagnostic.
///
/// # Example:
/// ```rust
/// use log_analytics::analytics_info;
/// analytics_info!(name: "router_built", min_level = "info");
/// ```
#[macro_export]
macro_rules! analytics_info {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__analytics_internal_log!(info, "analytics_info", $name $(, $key = $value)*)
    };
}

/// Logs a warning diagnostic, e.g. an ignored configuration value.
///
/// # Example:
/// ```rust
/// use log_analytics::analytics_warn;
/// analytics_warn!(name: "config_invalid_level", value = "loud");
/// ```
#[macro_export]
macro_rules! analytics_warn {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__analytics_internal_log!(warn, "analytics_warn", $name $(, $key = $value)*)
    };
}

/// Logs a debug diagnostic.
///
/// # Example:
/// ```rust
/// use log_analytics::analytics_debug;
/// analytics_debug!(name: "bridge_created", min_level = "debug");
/// ```
#[macro_export]
macro_rules! analytics_debug {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__analytics_internal_log!(debug, "analytics_debug", $name $(, $key = $value)*)
    };
}

/// Logs an error diagnostic.
///
/// # Example:
/// ```rust
/// use log_analytics::analytics_error;
/// analytics_error!(name: "global_logger_install_failed", reason = "already set");
/// ```
#[macro_export]
macro_rules! analytics_error {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__analytics_internal_log!(error, "analytics_error", $name $(, $key = $value)*)
    };
}

/// Target prefix shared by every diagnostic the macros above emit.
pub const INTERNAL_TARGET_PREFIX: &str = "log-analytics";

/// Returns true for records emitted by these macros. Appenders skip them so
/// diagnostics never reach a sink.
pub fn is_internal_target(target: &str) -> bool {
    target.starts_with(INTERNAL_TARGET_PREFIX)
}
