//! Query lifecycle state machine
//!
//! The controller owns the only `ReportModel` slot. A submission moves
//! `Idle | Success | Failed` to `Submitting`, and the service outcome moves
//! `Submitting` to `Success` or `Failed`. While `Submitting`, further
//! submissions are refused, which is the whole concurrency story: one
//! request at a time, no queue, no cancellation.

use crate::api::{AnalysisClient, HttpTransport};
use crate::error::{ServiceError, SubmitRejected};
use crate::report::summary_consistent;
use crate::types::{QueryRequest, ReportModel};
use crate::view::ViewSelector;
use log::{debug, info, warn};

/// Where the current query stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState {
    #[default]
    Idle,
    Submitting,
    Success(Box<ReportModel>),
    Failed(String),
}

impl QueryState {
    pub fn label(&self) -> &'static str {
        match self {
            QueryState::Idle => "idle",
            QueryState::Submitting => "submitting",
            QueryState::Success(_) => "success",
            QueryState::Failed(_) => "failed",
        }
    }
}

/// Drives submissions through an [`AnalysisClient`]
pub struct QueryController<T> {
    client: AnalysisClient<T>,
    state: QueryState,
}

impl<T: HttpTransport> QueryController<T> {
    pub fn new(client: AnalysisClient<T>) -> Self {
        Self { client, state: QueryState::Idle }
    }

    pub fn client(&self) -> &AnalysisClient<T> {
        &self.client
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// The report currently on display, if the last query succeeded
    pub fn report(&self) -> Option<&ReportModel> {
        match &self.state {
            QueryState::Success(report) => Some(report.as_ref()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            QueryState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, QueryState::Submitting)
    }

    /// Whether the submit control is enabled for `question`
    pub fn can_submit(&self, question: &str) -> bool {
        !question.trim().is_empty() && !self.is_submitting()
    }

    /// Accept a submission and enter `Submitting`
    ///
    /// A rejected submission leaves the state untouched.
    pub fn begin(&mut self, request: &QueryRequest) -> Result<(), SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InFlight);
        }
        if !request.has_question() {
            return Err(SubmitRejected::EmptyQuestion);
        }

        debug!("{} -> submitting ({})", self.state.label(), request.template_type);
        // Dropping the old state clears any previous report or error
        self.state = QueryState::Submitting;
        Ok(())
    }

    /// Apply the outcome of the in-flight request
    ///
    /// On success the view selector goes back to its default view.
    pub fn complete(&mut self, outcome: Result<ReportModel, ServiceError>, views: &mut ViewSelector) {
        if !self.is_submitting() {
            warn!("ignoring query outcome while {}", self.state.label());
            return;
        }

        match outcome {
            Ok(report) => {
                info!(
                    "received report: {} fields, {} issues, {} references in {:.2}s",
                    report.template_output.fields.len(),
                    report.template_output.validation_issues.len(),
                    report.regulatory_references.len(),
                    report.processing_time_seconds
                );
                if !summary_consistent(&report.template_output) {
                    warn!("validation summary counts disagree with the returned issues");
                }
                self.state = QueryState::Success(Box::new(report));
                views.reset();
            }
            Err(err) => {
                warn!("query failed: {}", err);
                self.state = QueryState::Failed(err.user_message());
            }
        }
    }

    /// Validate, send, and apply the result of one query
    pub fn submit(&mut self, request: &QueryRequest, views: &mut ViewSelector) -> Result<&QueryState, SubmitRejected> {
        self.begin(request)?;
        let outcome = self.client.query(request);
        self.complete(outcome, views);
        Ok(&self.state)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
