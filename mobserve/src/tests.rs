use std::time::Duration;

use mchat::{ChatTurnHooks, TurnId, TurnOutcome, TurnStage};
use mflows::FlowError;
use mprovider::{ProviderError, ProviderId, ProviderOperationHooks, ToolCall};
use mtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

fn sample_tool_call() -> ToolCall {
    ToolCall {
        id: "call-1".to_string(),
        name: "detect_emergency".to_string(),
        arguments: "{}".to_string(),
    }
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::new("session-1").with_trace_id("trace-1")
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingObservabilityHooks;
    let provider_error = ProviderError::timeout("provider timeout");
    let tool_error = ToolError::execution("tool failed");
    let flow_error = FlowError::upstream("flow failed");

    hooks.on_call_start(ProviderId::Gemini, "chat_support");
    hooks.on_call_success(ProviderId::Gemini, "chat_support", Duration::from_millis(10));
    hooks.on_call_failure(
        ProviderId::Gemini,
        "chat_support",
        Duration::from_millis(10),
        &provider_error,
    );

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", "true"),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );

    hooks.on_turn_start(TurnId(1));
    hooks.on_classification(TurnId(1), true);
    hooks.on_turn_complete(
        TurnId(1),
        TurnOutcome::EmergencyReassurance,
        Duration::from_millis(30),
    );
    hooks.on_turn_failure(
        TurnId(2),
        TurnStage::Response,
        &flow_error,
        Duration::from_millis(30),
    );
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsObservabilityHooks;
    let provider_error = ProviderError::timeout("provider timeout");
    let tool_error = ToolError::execution("tool failed");
    let flow_error = FlowError::upstream("flow failed");

    hooks.on_call_start(ProviderId::Gemini, "emergency_detection");
    hooks.on_call_success(
        ProviderId::Gemini,
        "emergency_detection",
        Duration::from_millis(10),
    );
    hooks.on_call_failure(
        ProviderId::Gemini,
        "emergency_detection",
        Duration::from_millis(10),
        &provider_error,
    );

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", "false"),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );

    hooks.on_turn_start(TurnId(1));
    hooks.on_classification(TurnId(1), false);
    hooks.on_turn_complete(TurnId(1), TurnOutcome::Answered, Duration::from_millis(30));
    hooks.on_turn_failure(
        TurnId(2),
        TurnStage::Classification,
        &flow_error,
        Duration::from_millis(30),
    );
}
