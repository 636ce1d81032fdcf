//! Diagnostic events
//!
//! Thin wrappers over `tracing` that compile to nothing unless the `tracing`
//! feature is enabled. Arguments are still type-checked in both builds.

macro_rules! debug_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(target: "flowmetrics", $($arg)+);
        }
        #[cfg(not(feature = "tracing"))]
        {
            if false {
                let _ = core::format_args!($($arg)+);
            }
        }
    }};
}

macro_rules! trace_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(target: "flowmetrics", $($arg)+);
        }
        #[cfg(not(feature = "tracing"))]
        {
            if false {
                let _ = core::format_args!($($arg)+);
            }
        }
    }};
}

pub(crate) use debug_event;
pub(crate) use trace_event;
