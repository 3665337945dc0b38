//! Core data structures for analysis requests and reports
//!
//! This module defines the request sent to the analysis service and the
//! report it returns. A `ReportModel` is a read-only snapshot: views and
//! the exporter borrow it, only the query controller replaces it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// COREP template the service should populate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// CR1 - Own Funds
    #[default]
    #[value(name = "own_funds_cr1")]
    OwnFundsCr1,
    /// CR2 - Capital Requirements
    #[value(name = "capital_requirements_cr2")]
    CapitalRequirementsCr2,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::OwnFundsCr1 => "own_funds_cr1",
            TemplateType::CapitalRequirementsCr2 => "capital_requirements_cr2",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "own_funds_cr1" => Ok(TemplateType::OwnFundsCr1),
            "capital_requirements_cr2" => Ok(TemplateType::CapitalRequirementsCr2),
            other => Err(format!(
                "Unknown template type '{}' (expected own_funds_cr1 or capital_requirements_cr2)",
                other
            )),
        }
    }
}

/// Body of `POST /api/query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    /// Serialized as `null` when absent
    pub scenario: Option<String>,
    pub template_type: TemplateType,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>, scenario: Option<String>, template_type: TemplateType) -> Self {
        Self { question: question.into(), scenario, template_type }
    }

    /// A question made only of whitespace counts as empty
    pub fn has_question(&self) -> bool {
        !self.question.trim().is_empty()
    }
}

/// The complete result of one successful analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
    /// Question as echoed back by the service
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub regulatory_references: Vec<Reference>,
    pub template_output: TemplateOutput,
    pub processing_time_seconds: f64,
    pub llm_model: String,
}

/// Populated template plus validation results and audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<TemplateType>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub validation_issues: Vec<Issue>,
    #[serde(default)]
    pub audit_log: Vec<AuditEntry>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// One populated template cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub field_id: String,
    pub field_name: String,
    /// Arbitrary JSON; `null` when the service could not determine a value
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub regulatory_references: Vec<String>,
    pub confidence_score: f64,
}

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    #[serde(default)]
    pub field_id: Option<String>,
    pub message: String,
    pub rule: String,
}

/// Free-form report metadata produced alongside the template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_considerations: Vec<String>,
    #[serde(default)]
    pub validation_summary: ValidationSummary,
}

impl Metadata {
    /// Summary text, treating an empty string as absent
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Server-computed totals over `validation_issues`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_issues: Option<usize>,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub is_valid: bool,
}

/// Links a populated field to the regulation that justified it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// ISO-8601, kept exactly as received
    pub timestamp: String,
    pub field_id: String,
    pub regulatory_reference: String,
    #[serde(default)]
    pub justification: String,
}

/// A retrieved regulatory source passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub document: String,
    pub section: String,
    #[serde(default)]
    pub paragraph: String,
    pub content: String,
    pub relevance_score: f64,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub services: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub document_count: u64,
}

/// Response of `GET /api/documents/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total_documents: u64,
    #[serde(default)]
    pub collection_name: String,
}

/// Response of `GET /api/templates/{template_type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSchema {
    pub template_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<SchemaSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSection {
    pub section_id: String,
    pub section_name: String,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub field_id: String,
    pub field_name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub validation_rules: Vec<String>,
}
