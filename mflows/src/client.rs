//! Generic structured-model invocation shared by every flow.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use mprovider::{
    Message, ModelProvider, ModelRequest, NoopOperationHooks, ProviderOperationHooks, Role,
    ToolResult, observe_call,
};
use mtooling::{ToolExecutionContext, ToolRuntime};

use crate::{FlowError, PromptSpec};

/// Renders a [`PromptSpec`], drives the bounded tool loop, and parses the
/// model's JSON output into a typed value. Every flow goes through here; none
/// of them talk to the provider directly.
#[derive(Clone)]
pub struct StructuredModelClient {
    provider: Arc<dyn ModelProvider>,
    model: String,
    hooks: Arc<dyn ProviderOperationHooks>,
    max_tool_rounds: usize,
}

impl StructuredModelClient {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            hooks: Arc::new(NoopOperationHooks),
            max_tool_rounds: 2,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn invoke<O>(&self, spec: &PromptSpec, vars: &[(&str, &str)]) -> Result<O, FlowError>
    where
        O: DeserializeOwned,
    {
        self.run(spec, vars, None).await
    }

    pub async fn invoke_with_tools<O>(
        &self,
        spec: &PromptSpec,
        vars: &[(&str, &str)],
        runtime: &dyn ToolRuntime,
        context: &ToolExecutionContext,
    ) -> Result<O, FlowError>
    where
        O: DeserializeOwned,
    {
        self.run(spec, vars, Some((runtime, context))).await
    }

    async fn run<O>(
        &self,
        spec: &PromptSpec,
        vars: &[(&str, &str)],
        tooling: Option<(&dyn ToolRuntime, &ToolExecutionContext)>,
    ) -> Result<O, FlowError>
    where
        O: DeserializeOwned,
    {
        let rendered = spec.render(vars)?;
        let mut tool_results: Vec<ToolResult> = Vec::new();

        for _round in 0..=self.max_tool_rounds {
            let request = self.build_request(spec, &rendered, tool_results.clone());
            let response = observe_call(
                self.provider.id(),
                spec.name,
                self.hooks.as_ref(),
                self.provider.complete(request),
            )
            .await?;

            let calls = response.tool_calls();
            if calls.is_empty() {
                return parse_structured_output(spec, &response.assistant_text());
            }

            let (runtime, context) = tooling.ok_or_else(|| {
                FlowError::tooling(format!(
                    "flow '{}' received a tool call but has no tool runtime",
                    spec.name
                ))
            })?;

            for call in calls {
                let execution = runtime.execute(call.clone(), context.clone()).await?;
                tool_results.push(execution.into_tool_result(&call));
            }
        }

        Err(FlowError::tooling(format!(
            "flow '{}' exceeded the tool round limit",
            spec.name
        )))
    }

    fn build_request(
        &self,
        spec: &PromptSpec,
        rendered: &str,
        tool_results: Vec<ToolResult>,
    ) -> ModelRequest {
        let mut request = ModelRequest::new(
            self.model.clone(),
            vec![Message::new(Role::User, rendered)],
        )
        .with_tools(spec.tools.clone())
        .with_tool_results(tool_results)
        .with_metadata("flow", spec.name);

        if let Some(schema) = &spec.response_schema {
            request = request.with_response_schema(schema.clone());
        }

        for setting in &spec.safety_settings {
            request = request.with_safety_setting(*setting);
        }

        if let Some(temperature) = spec.options.temperature {
            request = request.with_temperature(temperature);
        }

        if let Some(max_output_tokens) = spec.options.max_output_tokens {
            request = request.with_max_output_tokens(max_output_tokens);
        }

        request
    }
}

fn parse_structured_output<O>(spec: &PromptSpec, text: &str) -> Result<O, FlowError>
where
    O: DeserializeOwned,
{
    if text.trim().is_empty() {
        return Err(FlowError::malformed_output(format!(
            "flow '{}' produced no output text",
            spec.name
        )));
    }

    serde_json::from_str(text).map_err(|err| {
        FlowError::malformed_output(format!(
            "flow '{}' output did not match its schema: {err}",
            spec.name
        ))
    })
}
