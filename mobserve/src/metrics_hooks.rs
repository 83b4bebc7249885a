//! Metrics-based observability hooks for provider, tool, and turn phases.
//!
//! ```rust
//! use mobserve::MetricsObservabilityHooks;
//! use mprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use mchat::{ChatTurnHooks, TurnId, TurnOutcome, TurnStage};
use mflows::FlowError;
use mprovider::{ProviderError, ProviderId, ProviderOperationHooks};
use mtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        metrics::counter!(
            "mindscape_provider_call_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_call_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "mindscape_provider_call_success_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "mindscape_provider_call_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "mindscape_provider_call_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "mindscape_provider_call_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &mprovider::ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "mindscape_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &mprovider::ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "mindscape_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "mindscape_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &mprovider::ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "mindscape_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "mindscape_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ChatTurnHooks for MetricsObservabilityHooks {
    fn on_turn_start(&self, _turn: TurnId) {
        metrics::counter!("mindscape_turn_start_total").increment(1);
    }

    fn on_classification(&self, _turn: TurnId, emergency_detected: bool) {
        metrics::counter!(
            "mindscape_turn_classified_total",
            "emergency_detected" => emergency_detected.to_string()
        )
        .increment(1);
    }

    fn on_turn_complete(&self, _turn: TurnId, outcome: TurnOutcome, elapsed: Duration) {
        metrics::counter!(
            "mindscape_turn_complete_total",
            "outcome" => format!("{outcome:?}")
        )
        .increment(1);
        metrics::histogram!(
            "mindscape_turn_duration_seconds",
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_turn_failure(
        &self,
        _turn: TurnId,
        stage: TurnStage,
        error: &FlowError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "mindscape_turn_failure_total",
            "stage" => format!("{stage:?}"),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "mindscape_turn_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
