//! Session module - one-shot runs and the interactive loop
//!
//! A `Session` owns the query controller and the view selector and writes
//! everything it shows through a single `TableWriter`, so the same code
//! drives stdout in production and a byte buffer in tests.

use crate::api::{AnalysisClient, HttpTransport};
use crate::config::Settings;
use crate::console_format::TableWriter;
use crate::controller::{QueryController, QueryState};
use crate::report::{self, EXPORT_FILE_NAME};
use crate::types::{QueryRequest, TemplateType};
use crate::view::{View, ViewSelector};
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

const PROMPT: &str = "corep> ";

const HELP: &str = "\
Commands:
  ask <question>        Submit a question to the analysis service
  scenario <text>       Set the scenario sent with the next question
  scenario clear        Remove the scenario
  template <type>       own_funds_cr1 or capital_requirements_cr2
  view <name>           template, references, validation or audit
  show                  Show the selected view again
  export                Write the current report to corep-report.json
  status                Show the query state and pending settings
  help                  Show this help
  quit                  Leave the session";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ask(String),
    Scenario(Option<String>),
    Template(TemplateType),
    View(View),
    Show,
    Export,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "ask" => Ok(Command::Ask(rest.to_string())),
            "scenario" if rest.is_empty() => Err("Usage: scenario <text> | scenario clear".to_string()),
            "scenario" if rest.eq_ignore_ascii_case("clear") => Ok(Command::Scenario(None)),
            "scenario" => Ok(Command::Scenario(Some(rest.to_string()))),
            "template" => rest.parse().map(Command::Template),
            "view" => rest.parse().map(Command::View),
            "show" => Ok(Command::Show),
            "export" => Ok(Command::Export),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}' (type 'help' for a list)", other)),
        }
    }
}

pub struct Session<T, W: Write> {
    controller: QueryController<T>,
    views: ViewSelector,
    scenario: Option<String>,
    template_type: TemplateType,
    output_dir: PathBuf,
    width: usize,
    out: TableWriter<W>,
}

impl<T: HttpTransport, W: Write> Session<T, W> {
    pub fn new(client: AnalysisClient<T>, settings: &Settings, width: usize, writer: W) -> Self {
        Self {
            controller: QueryController::new(client),
            views: ViewSelector::new(),
            scenario: settings.scenario.clone(),
            template_type: settings.template_type,
            output_dir: settings.output_dir.clone(),
            width,
            out: TableWriter::new(writer, settings.use_colors),
        }
    }

    pub fn controller(&self) -> &QueryController<T> {
        &self.controller
    }

    pub fn views(&self) -> &ViewSelector {
        &self.views
    }

    pub fn into_writer(self) -> W {
        self.out.into_inner()
    }

    fn request(&self, question: &str) -> QueryRequest {
        QueryRequest::new(question.trim(), self.scenario.clone(), self.template_type)
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.out.write_colored_line(&format!("error: {}", message), term::color::BRIGHT_RED)
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.out.write_colored_line(message, term::color::BRIGHT_YELLOW)
    }

    /// Submit `question` and report the outcome
    ///
    /// Returns whether the query succeeded. Rejected submissions and
    /// service failures are written out and leave the session usable.
    pub fn ask(&mut self, question: &str) -> io::Result<bool> {
        if !self.controller.can_submit(question) {
            self.error("Please enter a question")?;
            return Ok(false);
        }

        let request = self.request(question);
        match self.controller.submit(&request, &mut self.views) {
            Ok(QueryState::Success(_)) => Ok(true),
            Ok(QueryState::Failed(message)) => {
                let message = message.clone();
                self.error(&message)?;
                Ok(false)
            }
            Ok(other) => {
                debug!("submit finished in unexpected state {}", other.label());
                Ok(false)
            }
            Err(rejected) => {
                self.error(&rejected.to_string())?;
                Ok(false)
            }
        }
    }

    /// Write `view` of the current report, or a notice when there is none
    pub fn show(&mut self, view: View) -> io::Result<()> {
        match self.controller.report() {
            Some(report) => report::write_view(&mut self.out, report, view, self.width),
            None => self.notice("No report yet. Use 'ask <question>' first."),
        }
    }

    /// Export the current report
    ///
    /// Without a report this only prints a notice and returns `None`.
    pub fn export(&mut self) -> io::Result<Option<PathBuf>> {
        let Some(report) = self.controller.report() else {
            self.notice("Nothing to export yet.")?;
            return Ok(None);
        };

        let path = report::export_report(report, &self.output_dir)?;
        self.out.write_line(&format!("Report exported to {}", path.display()))?;
        Ok(Some(path))
    }

    /// Run one question, print the chosen views, and optionally export
    pub fn run_once(&mut self, question: &str, views: &[View], export: bool) -> io::Result<bool> {
        if !self.ask(question)? {
            return Ok(false);
        }

        if let Some(report) = self.controller.report() {
            report::write_report_banner(&mut self.out, report)?;
            for view in views {
                report::write_view(&mut self.out, report, *view, self.width)?;
            }
        }

        if export {
            self.out.writeln()?;
            self.export()?;
        }
        Ok(true)
    }

    fn status(&mut self) -> io::Result<()> {
        let state = self.controller.state().label();
        let scenario = self.scenario.as_deref().unwrap_or("(none)").to_string();
        let base_url = self.controller.client().base_url().to_string();

        self.out.write_line(&format!("State:    {}", state))?;
        if let Some(message) = self.controller.error_message() {
            let message = message.to_string();
            self.out.write_line(&format!("Error:    {}", message))?;
        }
        self.out.write_line(&format!("Service:  {}", base_url))?;
        self.out.write_line(&format!("Template: {}", self.template_type))?;
        self.out.write_line(&format!("Scenario: {}", scenario))?;
        self.out.write_line(&format!("View:     {}", self.views.current()))?;
        self.out.write_line(&format!("Export:   {}", self.output_dir.join(EXPORT_FILE_NAME).display()))
    }

    /// Apply one command; returns `false` when the session should end
    pub fn execute(&mut self, command: Command) -> io::Result<bool> {
        debug!("command: {:?}", command);
        match command {
            Command::Ask(question) => {
                if self.ask(&question)? {
                    if let Some(report) = self.controller.report() {
                        report::write_report_banner(&mut self.out, report)?;
                    }
                    self.show(self.views.current())?;
                }
            }
            Command::Scenario(scenario) => {
                self.out.write_line(if scenario.is_some() { "Scenario set." } else { "Scenario cleared." })?;
                self.scenario = scenario;
            }
            Command::Template(template_type) => {
                self.template_type = template_type;
                self.out.write_line(&format!("Template set to {}.", template_type))?;
            }
            Command::View(view) => {
                self.views.select(view);
                self.show(view)?;
            }
            Command::Show => self.show(self.views.current())?,
            Command::Export => {
                if let Err(e) = self.export() {
                    self.error(&format!("Export failed: {}", e))?;
                }
            }
            Command::Status => self.status()?,
            Command::Help => self.out.write_line(HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Read commands from `input` until `quit` or end of input
    pub fn run_interactive<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.out.write_line("COREP reporting assistant. Type 'help' for commands.")?;
        let mut lines = input.lines();
        loop {
            self.out.write_prompt(PROMPT)?;
            let Some(line) = lines.next() else {
                self.out.writeln()?;
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.execute(command)? {
                        break;
                    }
                }
                Err(message) => self.error(&message)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
