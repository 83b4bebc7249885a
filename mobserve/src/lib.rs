//! Tracing- and metrics-based implementations of the workspace hook traits.

mod metrics_hooks;
mod tracing_hooks;

#[cfg(test)]
mod tests;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use tracing_hooks::TracingObservabilityHooks;
