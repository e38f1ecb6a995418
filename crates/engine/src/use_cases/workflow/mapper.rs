//! Assemble the workflow response document.

use std::collections::HashMap;

use notiflow_domain::{ControlValues, PreferencesSnapshot, StepTemplateId, Workflow, WorkflowStep};
use notiflow_shared::{PreferencesResponseDto, StepControlsDto, StepResponseDto, WorkflowResponseDto};

/// Build the response for `workflow`.
///
/// A step carries `controls.values` only when `step_controls` holds a record
/// for its template id.
pub fn to_response_workflow_dto(
    workflow: &Workflow,
    step_controls: &HashMap<StepTemplateId, ControlValues>,
    preferences: &PreferencesSnapshot,
) -> WorkflowResponseDto {
    WorkflowResponseDto {
        id: workflow.id.to_uuid(),
        workflow_id: workflow.trigger_identifier.clone(),
        name: workflow.name.to_string(),
        description: workflow.description.to_string(),
        tags: workflow.tags.clone(),
        active: workflow.active,
        draft: workflow.draft,
        critical: workflow.critical,
        workflow_type: workflow.workflow_type,
        origin: workflow.origin,
        notification_group_id: workflow.notification_group_id.to_uuid(),
        steps: workflow
            .steps
            .iter()
            .map(|step| to_step_dto(step, step_controls.get(&step.template_id)))
            .collect(),
        controls_schema: workflow.controls.as_ref().map(|c| c.schema.clone()),
        payload_schema: workflow.payload_schema.clone(),
        data: workflow.data.clone(),
        preferences: PreferencesResponseDto {
            source: preferences.source,
            preferences: preferences.preferences,
        },
        created_at: workflow.created_at.to_rfc3339(),
        updated_at: workflow.updated_at.to_rfc3339(),
    }
}

fn to_step_dto(step: &WorkflowStep, values: Option<&ControlValues>) -> StepResponseDto {
    StepResponseDto {
        id: step.template_id.to_uuid(),
        step_id: step.step_id.clone(),
        name: step.name.clone(),
        step_type: step.step_type,
        active: step.active,
        should_stop_on_fail: step.should_stop_on_fail,
        controls: StepControlsDto {
            schema: step.controls.as_ref().map(|c| c.schema.clone()),
            values: values.map(|v| v.values.clone()),
        },
        variant_count: step.variants.len(),
    }
}
