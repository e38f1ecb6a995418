//! Per-step control values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ControlValuesId, EnvironmentId, OrganizationId, StepTemplateId, WorkflowId};

/// Scope level a control-values record applies at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlValuesLevel {
    StepControls,
    WorkflowControls,
}

impl ControlValuesLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StepControls => "step_controls",
            Self::WorkflowControls => "workflow_controls",
        }
    }
}

impl fmt::Display for ControlValuesLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlValuesLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "step_controls" => Ok(Self::StepControls),
            "workflow_controls" => Ok(Self::WorkflowControls),
            other => Err(DomainError::parse(format!(
                "Unknown control values level: {}",
                other
            ))),
        }
    }
}

/// Configuration payload overriding a step's template defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlValues {
    pub id: ControlValuesId,
    pub environment_id: EnvironmentId,
    pub organization_id: OrganizationId,
    pub workflow_id: WorkflowId,
    pub step_id: StepTemplateId,
    pub level: ControlValuesLevel,
    pub values: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl ControlValues {
    /// Create a step-level record.
    pub fn for_step(
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        workflow_id: WorkflowId,
        step_id: StepTemplateId,
        values: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ControlValuesId::new(),
            environment_id,
            organization_id,
            workflow_id,
            step_id,
            level: ControlValuesLevel::StepControls,
            values,
            updated_at: now,
        }
    }

    pub fn with_level(mut self, level: ControlValuesLevel) -> Self {
        self.level = level;
        self
    }
}
