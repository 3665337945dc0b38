//! Shared fixtures for unit tests: a realistic report and a one-shot HTTP server.

use crate::types::ReportModel;
use serde_json::{Value, json};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

pub const CET1_QUESTION: &str = "What items should be included in Common Equity Tier 1 capital?";

/// Report shaped like a real `/api/query` answer for a CR1 question
pub fn sample_report_json() -> Value {
    json!({
        "query": CET1_QUESTION,
        "scenario": null,
        "regulatory_references": [
            {
                "document": "PRA Rulebook - Own Funds",
                "section": "Article 26",
                "paragraph": "1",
                "content": "Common Equity Tier 1 items of institutions consist of capital instruments...",
                "relevance_score": 0.91
            },
            {
                "document": "CRR",
                "section": "Article 36",
                "paragraph": "1(b)",
                "content": "Intangible assets shall be deducted from CET1 items.",
                "relevance_score": 0.5
            }
        ],
        "template_output": {
            "template_type": "own_funds_cr1",
            "fields": [
                {
                    "field_id": "CR1_010_010",
                    "field_name": "Capital instruments and related share premium accounts",
                    "value": 1500000,
                    "justification": "Paid up ordinary shares qualify under Article 28.",
                    "regulatory_references": ["CRR Article 26(1)(a)"],
                    "confidence_score": 0.85
                },
                {
                    "field_id": "CR1_020_010",
                    "field_name": "Retained earnings",
                    "value": null,
                    "justification": "Not provided in the scenario.",
                    "regulatory_references": [],
                    "confidence_score": 0.3
                },
                {
                    "field_id": "CR1_110_010",
                    "field_name": "Intangible assets (net of tax)",
                    "value": "-25000",
                    "justification": "Goodwill deducted per Article 36(1)(b).",
                    "regulatory_references": ["CRR Article 36(1)(b)"],
                    "confidence_score": 0.5
                }
            ],
            "validation_issues": [
                {
                    "severity": "error",
                    "field_id": "CR1_020_010",
                    "message": "Required field 'Retained earnings' is missing",
                    "rule": "required_field"
                },
                {
                    "severity": "info",
                    "field_id": null,
                    "message": "Template contains 3 populated fields",
                    "rule": "completeness"
                },
                {
                    "severity": "warning",
                    "field_id": "CR1_110_010",
                    "message": "Deduction should be negative",
                    "rule": "must_be_negative_or_zero"
                }
            ],
            "audit_log": [
                {
                    "timestamp": "2024-03-01T09:15:30.123456",
                    "field_id": "CR1_010_010",
                    "regulatory_reference": "CRR Article 26(1)(a)",
                    "justification": "Paid up ordinary shares qualify under Article 28."
                },
                {
                    "timestamp": "2024-03-01T09:15:31+00:00",
                    "field_id": "CR1_110_010",
                    "regulatory_reference": "CRR Article 36(1)(b)",
                    "justification": "Goodwill deducted per Article 36(1)(b)."
                }
            ],
            "metadata": {
                "summary": "CET1 consists of paid-up instruments and reserves less deductions.",
                "key_considerations": [
                    "Instruments must meet Article 28 conditions",
                    "Intangibles are deducted in full"
                ],
                "validation_summary": {
                    "total_issues": 3,
                    "errors": 1,
                    "warnings": 1,
                    "info": 1,
                    "is_valid": false
                }
            }
        },
        "processing_time_seconds": 2.5,
        "llm_model": "llama-3.1-70b-versatile"
    })
}

pub fn sample_report() -> ReportModel {
    serde_json::from_value(sample_report_json()).expect("sample report should deserialize")
}

/// Serve exactly one HTTP request on an ephemeral port
///
/// Returns the base URL and a handle yielding the raw request text.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);

        let reason = match status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Status",
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().ok();
        request
    });

    (base_url, handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = stream.read(&mut buf).expect("read request");
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim().eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&data).into_owned()
}
