//! Closed tool allow-list with static dispatch.
//!
//! Capabilities are a fixed enumeration; an unknown tool name is rejected
//! when parsed, not when called.

use crate::drafts::{Draft, DraftLedger};
use crate::forms::{self, FormSchema};
use crate::services::{self, ServiceRecord};
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("허용되지 않은 툴: {0}")]
pub struct ToolNotAllowed(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    SearchServices,
    GetServiceDetail,
    GetFormSchema,
    CreateApplicationDraft,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SearchServices => "search_services",
            ToolName::GetServiceDetail => "get_service_detail",
            ToolName::GetFormSchema => "get_form_schema",
            ToolName::CreateApplicationDraft => "create_application_draft",
        }
    }
}

impl FromStr for ToolName {
    type Err = ToolNotAllowed;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "search_services" => Ok(ToolName::SearchServices),
            "get_service_detail" => Ok(ToolName::GetServiceDetail),
            "get_form_schema" => Ok(ToolName::GetFormSchema),
            "create_application_draft" => Ok(ToolName::CreateApplicationDraft),
            other => Err(ToolNotAllowed(other.to_string())),
        }
    }
}

/// A fully-typed invocation of one allow-listed capability.
pub enum ToolCall {
    SearchServices {
        query: String,
        region: String,
        tags: Vec<String>,
    },
    GetServiceDetail {
        service_id: String,
    },
    GetFormSchema {
        service_id: String,
    },
    CreateApplicationDraft {
        service_id: String,
        payload: Map<String, Value>,
        sensitive: Vec<String>,
    },
}

impl ToolCall {
    pub fn name(&self) -> ToolName {
        match self {
            ToolCall::SearchServices { .. } => ToolName::SearchServices,
            ToolCall::GetServiceDetail { .. } => ToolName::GetServiceDetail,
            ToolCall::GetFormSchema { .. } => ToolName::GetFormSchema,
            ToolCall::CreateApplicationDraft { .. } => ToolName::CreateApplicationDraft,
        }
    }
}

pub enum ToolOutput {
    Services(Vec<ServiceRecord>),
    ServiceDetail(Option<ServiceRecord>),
    FormSchema(Option<FormSchema>),
    Draft(Draft),
}

/// Executes a tool call. Every variant maps to exactly one capability.
pub fn dispatch(call: ToolCall, ledger: &DraftLedger) -> anyhow::Result<ToolOutput> {
    match call {
        ToolCall::SearchServices {
            query,
            region,
            tags,
        } => Ok(ToolOutput::Services(services::search_services(
            &query, &region, &tags,
        ))),
        ToolCall::GetServiceDetail { service_id } => Ok(ToolOutput::ServiceDetail(
            services::get_service_detail(&service_id),
        )),
        ToolCall::GetFormSchema { service_id } => {
            Ok(ToolOutput::FormSchema(forms::get_form_schema(&service_id)))
        }
        ToolCall::CreateApplicationDraft {
            service_id,
            payload,
            sensitive,
        } => {
            let draft = ledger.create(&service_id, &payload, &sensitive)?;
            Ok(ToolOutput::Draft(draft))
        }
    }
}
