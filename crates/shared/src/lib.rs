//! Notiflow Shared - wire types for Engine and Player communication
//!
//! This crate contains the types both sides of the HTTP boundary agree on:
//! - Workflow request/response DTOs
//! - Billing checkout payloads
//! - Response envelopes and error bodies
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde, serde_json, uuid and the domain vocabulary
//! 2. **No business logic** - pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod billing;
pub mod responses;
pub mod workflow;

pub use billing::{CheckoutRequest, CheckoutResponse};
pub use responses::{DataEnvelope, ErrorBody, ErrorCode};
pub use workflow::{
    CreateWorkflowRequest, PreferencesResponseDto, StepControlsDto, StepRequest,
    StepResponseDto, StepVariantRequest, UpdateWorkflowRequest, WorkflowResponseDto,
};
