/// Tests for one-shot and interactive sessions
#[cfg(test)]
mod tests {
    use crate::api::{AnalysisClient, HttpTransport};
    use crate::config::Settings;
    use crate::error::ServiceError;
    use crate::report::EXPORT_FILE_NAME;
    use crate::session::{Command, Session};
    use crate::test_fixtures::{CET1_QUESTION, sample_report_json};
    use crate::types::TemplateType;
    use crate::view::View;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::Path;

    #[derive(Default)]
    struct FakeService {
        replies: RefCell<VecDeque<Result<Value, ServiceError>>>,
        bodies: RefCell<Vec<Value>>,
    }

    impl FakeService {
        fn with(replies: Vec<Result<Value, ServiceError>>) -> Self {
            Self { replies: RefCell::new(replies.into()), bodies: RefCell::default() }
        }
    }

    impl HttpTransport for FakeService {
        fn post_json(&self, _url: &str, body: &Value) -> Result<Value, ServiceError> {
            self.bodies.borrow_mut().push(body.clone());
            self.replies.borrow_mut().pop_front().expect("unexpected request")
        }

        fn get_json(&self, _url: &str) -> Result<Value, ServiceError> {
            panic!("session queries only POST");
        }
    }

    fn settings(output_dir: &Path) -> Settings {
        Settings {
            base_url: "http://localhost:8000".to_string(),
            template_type: TemplateType::OwnFundsCr1,
            scenario: None,
            output_dir: output_dir.to_path_buf(),
            use_colors: false,
        }
    }

    fn session<'a>(
        service: &'a FakeService,
        output_dir: &Path,
    ) -> Session<&'a FakeService, Vec<u8>> {
        Session::new(AnalysisClient::new(service, "http://localhost:8000"), &settings(output_dir), 110, Vec::new())
    }

    fn output(session: Session<&FakeService, Vec<u8>>) -> String {
        String::from_utf8(session.into_writer()).unwrap()
    }

    fn timeout() -> ServiceError {
        ServiceError::Status { status: 500, detail: Some("timeout".to_string()) }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("ask What is CET1?".parse::<Command>(), Ok(Command::Ask("What is CET1?".to_string())));
        assert_eq!("ask".parse::<Command>(), Ok(Command::Ask(String::new())));
        assert_eq!("scenario clear".parse::<Command>(), Ok(Command::Scenario(None)));
        assert_eq!("scenario  Bank with £5m AT1 ".parse::<Command>(), Ok(Command::Scenario(Some("Bank with £5m AT1".to_string()))));
        assert_eq!("template capital_requirements_cr2".parse::<Command>(), Ok(Command::Template(TemplateType::CapitalRequirementsCr2)));
        assert_eq!("VIEW Audit".parse::<Command>(), Ok(Command::View(View::Audit)));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert!("scenario".parse::<Command>().is_err());
        assert!("view tabs".parse::<Command>().is_err());
        assert!("frobnicate".parse::<Command>().is_err());
    }

    #[test]
    fn test_run_once_renders_selected_views_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![Ok(sample_report_json())]);
        let mut s = session(&service, dir.path());

        assert!(s.run_once(CET1_QUESTION, &[View::Validation, View::Audit], false).unwrap());
        let text = output(s);
        assert!(text.contains("Model: llama-3.1-70b-versatile"));
        let validation = text.find("Errors (1)").unwrap();
        let audit = text.find("Audit Log").unwrap();
        assert!(validation < audit);
        assert!(!text.contains("Template Output"));
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
    }

    #[test]
    fn test_run_once_exports_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![Ok(sample_report_json())]);
        let mut s = session(&service, dir.path());

        assert!(s.run_once(CET1_QUESTION, &[View::Template], true).unwrap());
        let exported = std::fs::read_to_string(dir.path().join(EXPORT_FILE_NAME)).unwrap();
        let value: Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(value["llm_model"], "llama-3.1-70b-versatile");
        assert!(output(s).contains("Report exported to"));
    }

    #[test]
    fn test_run_once_failure_prints_detail() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![Err(timeout())]);
        let mut s = session(&service, dir.path());

        assert!(!s.run_once(CET1_QUESTION, &View::ALL, true).unwrap());
        assert!(s.controller().report().is_none());
        let text = output(s);
        assert!(text.contains("error: timeout"));
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
    }

    #[test]
    fn test_empty_question_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![]);
        let mut s = session(&service, dir.path());

        assert!(!s.ask("   ").unwrap());
        assert_eq!(s.controller().state().label(), "idle");
        assert!(service.bodies.borrow().is_empty());
        assert!(output(s).contains("Please enter a question"));
    }

    #[test]
    fn test_export_without_report_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![]);
        let mut s = session(&service, dir.path());

        assert_eq!(s.export().unwrap(), None);
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
        assert!(output(s).contains("Nothing to export yet."));
    }

    #[test]
    fn test_interactive_session_flow() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![Err(timeout()), Ok(sample_report_json())]);
        let mut s = session(&service, dir.path());

        let script = "\
scenario A bank with £10m ordinary shares
template capital_requirements_cr2
view validation
ask What is CET1?
status
ask What is CET1?
view audit
export
quit
ask never sent
";
        s.run_interactive(script.as_bytes()).unwrap();

        // The failure did not end the session; the second ask went through
        let bodies = service.bodies.borrow();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0]["scenario"], "A bank with £10m ordinary shares");
        assert_eq!(bodies[0]["template_type"], "capital_requirements_cr2");

        assert_eq!(s.views().current(), View::Audit);
        assert!(dir.path().join(EXPORT_FILE_NAME).exists());

        let text = output(s);
        assert!(text.contains("error: timeout"));
        assert!(text.contains("State:    failed"));
        assert!(text.contains("Error:    timeout"));
        // Success resets to the template view
        assert!(text.contains("Template Output"));
        assert!(text.contains("Audit Log"));
    }

    #[test]
    fn test_view_before_any_report_shows_notice() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![]);
        let mut s = session(&service, dir.path());

        s.run_interactive("view references\nshow\n".as_bytes()).unwrap();
        assert_eq!(s.views().current(), View::References);
        let text = output(s);
        assert_eq!(text.matches("No report yet.").count(), 2);
    }

    #[test]
    fn test_unknown_command_keeps_session_alive() {
        let dir = tempfile::tempdir().unwrap();
        let service = FakeService::with(vec![]);
        let mut s = session(&service, dir.path());

        s.run_interactive("dance\nhelp\n".as_bytes()).unwrap();
        let text = output(s);
        assert!(text.contains("error: Unknown command 'dance'"));
        assert!(text.contains("Commands:"));
    }
}
