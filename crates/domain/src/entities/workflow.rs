//! Workflow entity - a named, multi-step notification definition.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::step::{StepControl, WorkflowStep};
use crate::error::DomainError;
use crate::ids::{EnvironmentId, NotificationGroupId, OrganizationId, StepTemplateId, WorkflowId};
use crate::value_objects::{Description, WorkflowName};

/// How the workflow is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    #[default]
    Regular,
    Echo,
    Bridge,
}

impl WorkflowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Echo => "echo",
            Self::Bridge => "bridge",
        }
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Self::Regular),
            "echo" => Ok(Self::Echo),
            "bridge" => Ok(Self::Bridge),
            other => Err(DomainError::parse(format!("Unknown workflow type: {}", other))),
        }
    }
}

/// Where the workflow definition was authored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowOrigin {
    #[default]
    NovuCloud,
    NovuCloudV1,
    External,
}

impl WorkflowOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NovuCloud => "novu-cloud",
            Self::NovuCloudV1 => "novu-cloud-v1",
            Self::External => "external",
        }
    }
}

impl fmt::Display for WorkflowOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowOrigin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novu-cloud" => Ok(Self::NovuCloud),
            "novu-cloud-v1" => Ok(Self::NovuCloudV1),
            "external" => Ok(Self::External),
            other => Err(DomainError::parse(format!("Unknown workflow origin: {}", other))),
        }
    }
}

/// A workflow definition owned by one environment of one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: WorkflowId,
    pub environment_id: EnvironmentId,
    pub organization_id: OrganizationId,
    pub name: WorkflowName,
    #[serde(default)]
    pub description: Description,
    /// Identifier used by API callers to trigger the workflow.
    pub trigger_identifier: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub active: bool,
    #[serde(default)]
    pub draft: bool,
    pub critical: bool,
    pub workflow_type: WorkflowType,
    pub origin: WorkflowOrigin,
    pub notification_group_id: NotificationGroupId,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<StepControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    pub fn new(
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        name: WorkflowName,
        notification_group_id: NotificationGroupId,
        now: DateTime<Utc>,
    ) -> Self {
        let trigger_identifier = crate::slugify(name.as_str());
        Self {
            id: WorkflowId::new(),
            environment_id,
            organization_id,
            name,
            description: Description::empty(),
            trigger_identifier,
            tags: Vec::new(),
            active: false,
            draft: false,
            critical: false,
            workflow_type: WorkflowType::default(),
            origin: WorkflowOrigin::default(),
            notification_group_id,
            steps: Vec::new(),
            controls: None,
            payload_schema: None,
            data: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: WorkflowId) -> Self {
        self.id = id;
        self
    }

    pub fn with_steps(mut self, steps: Vec<WorkflowStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_trigger_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.trigger_identifier = identifier.into();
        self
    }

    /// True when the workflow is visible to callers in `environment_id`.
    pub fn belongs_to(&self, environment_id: EnvironmentId) -> bool {
        self.environment_id == environment_id
    }

    pub fn step_template_ids(&self) -> impl Iterator<Item = StepTemplateId> + '_ {
        self.steps.iter().map(|s| s.template_id)
    }

    pub fn find_step(&self, template_id: StepTemplateId) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.template_id == template_id)
    }

    /// Mark the workflow as modified.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
