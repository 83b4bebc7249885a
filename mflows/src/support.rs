//! Empathetic support reply flow.

use std::sync::Arc;

use serde::Deserialize;
use mcommon::{BoxFuture, UserId};
use mprovider::{SafetySetting, ToolDefinition};
use mtooling::{
    DefaultToolRuntime, FunctionTool, ToolError, ToolExecutionContext, ToolRegistry,
    parse_json_object, required_string,
};

use crate::{EmergencyDetector, FlowError, PromptSpec, StructuredModelClient};

pub const DETECT_EMERGENCY_TOOL: &str = "detect_emergency";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

pub type ResponderFuture<'a, T> = BoxFuture<'a, T>;

pub trait SupportResponder: Send + Sync {
    fn respond<'a>(
        &'a self,
        message: &'a str,
        user_id: Option<&'a UserId>,
    ) -> ResponderFuture<'a, Result<ChatReply, FlowError>>;
}

const SUPPORT_TEMPLATE: &str = "\
You are an empathetic AI assistant designed to provide support and guidance \
to users.

If the user mentions self-harm, panic, or danger, use the detect_emergency \
tool. If the tool returns true, then immediately display the following \
helplines:

Tele Mental Health: 14416 / 1-800-891-4416
AASRA: 9152987821

and encourage them to seek immediate help.

Respond to the user message with empathy and understanding.

User Message: {{message}}
";

const SUPPORT_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "response": { "type": "string" }
  },
  "required": ["response"]
}"#;

const DETECT_EMERGENCY_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "message": { "type": "string" }
  },
  "required": ["message"]
}"#;

fn detect_emergency_definition() -> ToolDefinition {
    ToolDefinition {
        name: DETECT_EMERGENCY_TOOL.to_string(),
        description: "Detects if the user is in an emergency situation and needs immediate help."
            .to_string(),
        input_schema: DETECT_EMERGENCY_SCHEMA.to_string(),
    }
}

/// The responder's tool delegates to the shared detector rather than keeping
/// its own matcher, so both detection call sites agree on a single source.
fn detect_emergency_tool(detector: Arc<dyn EmergencyDetector>) -> FunctionTool {
    FunctionTool::new(detect_emergency_definition(), move |args_json, _context| {
        let detector = Arc::clone(&detector);
        async move {
            let args = parse_json_object(&args_json)?;
            let message = required_string(&args, "message")?;
            let classification = detector
                .classify(&message)
                .await
                .map_err(|err| ToolError::execution(err.to_string()))?;

            Ok(classification.emergency_detected.to_string())
        }
    })
}

pub(crate) fn support_spec() -> PromptSpec {
    PromptSpec::new("chat_support", SUPPORT_TEMPLATE)
        .with_response_schema(SUPPORT_SCHEMA)
        .with_tools(vec![detect_emergency_definition()])
        // Distress wording in the user's message must reach the model intact
        // for the reply to be able to acknowledge it.
        .with_safety_setting(SafetySetting::allow_dangerous_content())
}

#[derive(Clone)]
pub struct ModelSupportResponder {
    client: Arc<StructuredModelClient>,
    runtime: DefaultToolRuntime,
    spec: PromptSpec,
}

impl ModelSupportResponder {
    pub fn new(client: Arc<StructuredModelClient>, detector: Arc<dyn EmergencyDetector>) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(detect_emergency_tool(detector));

        Self {
            client,
            runtime: DefaultToolRuntime::new(Arc::new(registry)),
            spec: support_spec(),
        }
    }

    pub fn with_tool_hooks(mut self, hooks: Arc<dyn mtooling::ToolRuntimeHooks>) -> Self {
        self.runtime = self.runtime.with_hooks(hooks);
        self
    }
}

impl SupportResponder for ModelSupportResponder {
    fn respond<'a>(
        &'a self,
        message: &'a str,
        user_id: Option<&'a UserId>,
    ) -> ResponderFuture<'a, Result<ChatReply, FlowError>> {
        Box::pin(async move {
            let mut context = ToolExecutionContext::new(
                user_id.map(UserId::as_str).unwrap_or("anonymous"),
            );
            if let Some(user_id) = user_id {
                context = context.with_metadata("user_id", user_id.as_str());
            }

            self.client
                .invoke_with_tools(&self.spec, &[("message", message)], &self.runtime, &context)
                .await
        })
    }
}
