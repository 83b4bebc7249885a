//! Shared emergency-detection capability.
//!
//! One `EmergencyDetector` instance backs both call sites that need crisis
//! detection — the pre-reply classification and the responder's
//! `detect_emergency` tool — so a turn cannot consult two disagreeing
//! detection sources.

use std::sync::Arc;

use serde::Deserialize;
use mcommon::BoxFuture;

use crate::{FlowError, PromptSpec, StructuredModelClient};

pub const TELE_MENTAL_HEALTH_HELPLINE: &str = "Tele Mental Health: 14416 / 1-800-891-4416";
pub const AASRA_HELPLINE: &str = "AASRA: 9152987821";

/// The helpline list is a fixed reference constant, never model-generated.
pub fn emergency_helplines() -> Vec<String> {
    vec![
        TELE_MENTAL_HEALTH_HELPLINE.to_string(),
        AASRA_HELPLINE.to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyClassification {
    pub emergency_detected: bool,
    pub helplines: Vec<String>,
}

impl EmergencyClassification {
    pub fn detected() -> Self {
        Self {
            emergency_detected: true,
            helplines: emergency_helplines(),
        }
    }

    pub fn clear() -> Self {
        Self {
            emergency_detected: false,
            helplines: Vec::new(),
        }
    }
}

pub type DetectorFuture<'a, T> = BoxFuture<'a, T>;

pub trait EmergencyDetector: Send + Sync {
    fn classify<'a>(
        &'a self,
        user_input: &'a str,
    ) -> DetectorFuture<'a, Result<EmergencyClassification, FlowError>>;
}

/// Offline detector matching the distress terms the support prompt names.
/// Matching is a case-insensitive substring check.
#[derive(Debug, Clone)]
pub struct KeywordEmergencyDetector {
    keywords: Vec<String>,
}

impl Default for KeywordEmergencyDetector {
    fn default() -> Self {
        Self {
            keywords: vec![
                "self-harm".to_string(),
                "panic".to_string(),
                "danger".to_string(),
            ],
        }
    }
}

impl KeywordEmergencyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(keywords: Vec<String>) -> Self {
        Self { keywords }
    }
}

impl EmergencyDetector for KeywordEmergencyDetector {
    fn classify<'a>(
        &'a self,
        user_input: &'a str,
    ) -> DetectorFuture<'a, Result<EmergencyClassification, FlowError>> {
        Box::pin(async move {
            let lowered = user_input.to_lowercase();
            let detected = self
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str()));

            Ok(if detected {
                EmergencyClassification::detected()
            } else {
                EmergencyClassification::clear()
            })
        })
    }
}

const EMERGENCY_DETECTION_TEMPLATE: &str = "\
You are a mental health support AI. Your task is to analyze user input to \
detect potential emergency situations, specifically self-harm or immediate \
danger.

Respond in JSON format.

Here's how you should respond:

- emergencyDetected: true if the user expresses thoughts of self-harm, \
suicide, or indicates they are in immediate danger. Otherwise, false.
- helplines: An array of emergency helpline numbers to display to the user \
if emergencyDetected is true. Include these helplines:
  - Tele Mental Health: 14416 / 1-800-891-4416
  - AASRA: 9152987821

If emergencyDetected is false, the helplines array should be empty.

User Input: {{user_input}}
";

const EMERGENCY_DETECTION_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "emergencyDetected": { "type": "boolean" },
    "helplines": { "type": "array", "items": { "type": "string" } }
  },
  "required": ["emergencyDetected", "helplines"]
}"#;

pub(crate) fn emergency_detection_spec() -> PromptSpec {
    PromptSpec::new("emergency_detection", EMERGENCY_DETECTION_TEMPLATE)
        .with_response_schema(EMERGENCY_DETECTION_SCHEMA)
}

/// Only the decision is read back; the model's helpline array is ignored in
/// favor of the pinned constants.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmergencyDetectionOutput {
    emergency_detected: bool,
}

/// Model-backed detector used for the pre-reply classification stage.
#[derive(Clone)]
pub struct ModelEmergencyDetector {
    client: Arc<StructuredModelClient>,
    spec: PromptSpec,
}

impl ModelEmergencyDetector {
    pub fn new(client: Arc<StructuredModelClient>) -> Self {
        Self {
            client,
            spec: emergency_detection_spec(),
        }
    }
}

impl EmergencyDetector for ModelEmergencyDetector {
    fn classify<'a>(
        &'a self,
        user_input: &'a str,
    ) -> DetectorFuture<'a, Result<EmergencyClassification, FlowError>> {
        Box::pin(async move {
            let output: EmergencyDetectionOutput = self
                .client
                .invoke(&self.spec, &[("user_input", user_input)])
                .await?;

            // Only the boolean decision is trusted; the helpline list is
            // pinned to the reference constants either way.
            Ok(if output.emergency_detected {
                EmergencyClassification::detected()
            } else {
                EmergencyClassification::clear()
            })
        })
    }
}
