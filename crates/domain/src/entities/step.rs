//! Workflow steps and their variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::StepTemplateId;

/// The channel or action a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    InApp,
    Email,
    Sms,
    Chat,
    Push,
    Digest,
    Delay,
    Trigger,
    Custom,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InApp => "in_app",
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Chat => "chat",
            Self::Push => "push",
            Self::Digest => "digest",
            Self::Delay => "delay",
            Self::Trigger => "trigger",
            Self::Custom => "custom",
        }
    }

    /// Channel steps deliver a message; the rest are flow-control actions.
    pub fn is_channel(&self) -> bool {
        matches!(
            self,
            Self::InApp | Self::Email | Self::Sms | Self::Chat | Self::Push
        )
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_app" => Ok(Self::InApp),
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "chat" => Ok(Self::Chat),
            "push" => Ok(Self::Push),
            "digest" => Ok(Self::Digest),
            "delay" => Ok(Self::Delay),
            "trigger" => Ok(Self::Trigger),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::parse(format!("Unknown step type: {}", other))),
        }
    }
}

/// A JSON schema describing the inputs a step (or workflow) accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepControl {
    pub schema: serde_json::Value,
}

/// Condition evaluated before a step runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFilter {
    #[serde(default)]
    pub is_negated: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    /// Group operator joining the children (`AND` / `OR`).
    pub value: String,
    #[serde(default)]
    pub children: Vec<serde_json::Value>,
}

/// A conditional alternative of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepVariant {
    pub template_id: StepTemplateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub step_type: StepType,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub should_stop_on_fail: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<StepControl>,
    #[serde(default)]
    pub filters: Vec<MessageFilter>,
}

/// One stage of a workflow.
///
/// `template_id` is the key control values are stored under; `step_id` is the
/// human-facing identifier used in code-first workflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub template_id: StepTemplateId,
    pub step_id: String,
    pub name: String,
    pub step_type: StepType,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub should_stop_on_fail: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<StepControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<StepControl>,
    #[serde(default)]
    pub filters: Vec<MessageFilter>,
    #[serde(default)]
    pub variants: Vec<StepVariant>,
}

impl WorkflowStep {
    pub fn new(name: impl Into<String>, step_type: StepType) -> Self {
        let name = name.into();
        Self {
            template_id: StepTemplateId::new(),
            step_id: crate::slugify(&name),
            name,
            step_type,
            active: true,
            should_stop_on_fail: false,
            controls: None,
            output: None,
            filters: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn with_template_id(mut self, template_id: StepTemplateId) -> Self {
        self.template_id = template_id;
        self
    }

    pub fn with_step_id(mut self, step_id: impl Into<String>) -> Self {
        self.step_id = step_id.into();
        self
    }

    pub fn with_controls(mut self, schema: serde_json::Value) -> Self {
        self.controls = Some(StepControl { schema });
        self
    }

    pub fn with_variant(mut self, variant: StepVariant) -> Self {
        self.variants.push(variant);
        self
    }
}

fn default_true() -> bool {
    true
}
