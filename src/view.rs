//! Which of the four report views is on screen.

use std::fmt;
use std::str::FromStr;

/// One tab of the report display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum View {
    #[default]
    Template,
    References,
    Validation,
    Audit,
}

impl View {
    /// All views in display order
    pub const ALL: [View; 4] = [View::Template, View::References, View::Validation, View::Audit];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Template => "template",
            View::References => "references",
            View::Validation => "validation",
            View::Audit => "audit",
        }
    }

    /// Tab heading
    pub fn title(&self) -> &'static str {
        match self {
            View::Template => "Template Output",
            View::References => "Regulatory References",
            View::Validation => "Validation",
            View::Audit => "Audit Log",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown view '{}' (expected template, references, validation or audit)", s.trim()))
    }
}

/// Single-value selector over [`View`]
///
/// Changed by explicit user selection, or reset by the query controller
/// when a new report arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelector {
    current: View,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn select(&mut self, view: View) {
        self.current = view;
    }

    /// Back to the default view
    pub fn reset(&mut self) {
        self.current = View::default();
    }
}
