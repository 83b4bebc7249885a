//! Declarative prompt specifications consumed by the structured client.
//!
//! A `PromptSpec` bundles everything one model call needs: the instruction
//! template, the JSON schema the output must conform to, the tools the model
//! may invoke, and per-flow safety and generation settings. Flows differ only
//! in the spec they hand to [`crate::StructuredModelClient`].

use mcommon::GenerationOptions;
use mprovider::{SafetySetting, ToolDefinition};

use crate::FlowError;

#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub name: &'static str,
    pub template: String,
    pub response_schema: Option<String>,
    pub tools: Vec<ToolDefinition>,
    pub safety_settings: Vec<SafetySetting>,
    pub options: GenerationOptions,
}

impl PromptSpec {
    pub fn new(name: &'static str, template: impl Into<String>) -> Self {
        Self {
            name,
            template: template.into(),
            response_schema: None,
            tools: Vec::new(),
            safety_settings: Vec::new(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_response_schema(mut self, response_schema: impl Into<String>) -> Self {
        self.response_schema = Some(response_schema.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_safety_setting(mut self, setting: SafetySetting) -> Self {
        self.safety_settings.push(setting);
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Substitutes `{{name}}` placeholders. Every placeholder in the template
    /// must be supplied; unresolved ones are an input error, not a model call.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String, FlowError> {
        let mut rendered = self.template.clone();
        for (name, value) in vars {
            rendered = rendered.replace(&format!("{{{{{name}}}}}"), value);
        }

        if let Some(start) = rendered.find("{{") {
            let tail = &rendered[start..];
            let placeholder = tail
                .find("}}")
                .map(|end| &tail[..end + 2])
                .unwrap_or("{{...");
            return Err(FlowError::invalid_input(format!(
                "unresolved template placeholder: {placeholder}"
            )));
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlowErrorKind;

    #[test]
    fn render_substitutes_named_placeholders() {
        let spec = PromptSpec::new("greeting", "Hello {{name}}, welcome to {{place}}.");
        let rendered = spec
            .render(&[("name", "Priya"), ("place", "Mindscape")])
            .expect("render should work");

        assert_eq!(rendered, "Hello Priya, welcome to Mindscape.");
    }

    #[test]
    fn render_rejects_unresolved_placeholders() {
        let spec = PromptSpec::new("broken", "User Input: {{user_input}}");
        let error = spec.render(&[]).expect_err("render should fail");

        assert_eq!(error.kind, FlowErrorKind::InvalidInput);
        assert!(error.message.contains("{{user_input}}"));
    }

    #[test]
    fn builders_accumulate_spec_fields() {
        let spec = PromptSpec::new("spec", "text")
            .with_response_schema("{\"type\":\"object\"}")
            .with_safety_setting(SafetySetting::allow_dangerous_content())
            .with_options(GenerationOptions::default().with_temperature(0.7));

        assert!(spec.response_schema.is_some());
        assert_eq!(spec.safety_settings.len(), 1);
        assert_eq!(spec.options.temperature, Some(0.7));
    }
}
