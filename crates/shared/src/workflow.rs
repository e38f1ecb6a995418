//! Workflow DTOs for the `/v2/workflows` endpoints.

use notiflow_domain::{
    MessageFilter, PreferencesSource, StepType, WorkflowOrigin, WorkflowPreferences, WorkflowType,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Responses
// =============================================================================

/// Full workflow as returned by `GET /v2/workflows/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResponseDto {
    pub id: Uuid,
    /// Trigger identifier callers use to fire the workflow.
    pub workflow_id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub active: bool,
    pub draft: bool,
    pub critical: bool,
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    pub origin: WorkflowOrigin,
    pub notification_group_id: Uuid,
    pub steps: Vec<StepResponseDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub preferences: PreferencesResponseDto,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponseDto {
    /// Step template id; the key control values are stored under.
    pub id: Uuid,
    pub step_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub active: bool,
    pub should_stop_on_fail: bool,
    pub controls: StepControlsDto,
    pub variant_count: usize,
}

/// Controls of a step: the schema it declares and the values saved for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepControlsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesResponseDto {
    pub source: PreferencesSource,
    pub preferences: WorkflowPreferences,
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /v2/workflows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_group_id: Option<Uuid>,
    #[serde(default)]
    pub steps: Vec<StepRequest>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(default)]
    pub critical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<WorkflowOrigin>,
}

/// Body of `PUT /v2/workflows/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkflowRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<WorkflowType>,
}

/// A step as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    /// Existing template id to keep; omitted for new steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_stop_on_fail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
    #[serde(default)]
    pub filters: Vec<MessageFilter>,
    #[serde(default)]
    pub variants: Vec<StepVariantRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepVariantRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_stop_on_fail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_schema: Option<serde_json::Value>,
    #[serde(default)]
    pub filters: Vec<MessageFilter>,
}
