use convclass::config::BackendConfig;
use convclass::prompt::build_prompt;
use convclass::provider::{ChatBackend, OllamaClient};
use convclass::{ClassifyError, ErrorKind};
use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct CapturedRequest {
    request_line: String,
    body: String,
}

fn spawn_chat_server(
    status_line: &str,
    response_body: &str,
) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let status_line = status_line.to_string();
    let response_body = response_body.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .expect("read request line");

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content length");
                }
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).expect("read body");
        let _ = tx.send(CapturedRequest {
            request_line,
            body: String::from_utf8_lossy(&body).to_string(),
        });

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response_body.len(),
            response_body
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
    });

    (format!("http://{}", addr), rx)
}

fn spawn_silent_server(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let (_stream, _) = listener.accept().expect("accept");
        thread::sleep(hold);
    });
    format!("http://{}", addr)
}

fn closed_port_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

fn client(endpoint: &str, model: Option<&str>) -> OllamaClient {
    OllamaClient::new(BackendConfig {
        endpoint: endpoint.to_string(),
        model: model.map(str::to_string),
        ..BackendConfig::default()
    })
}

#[test]
fn sends_chat_request_and_reads_message_content() {
    let (endpoint, captured) = spawn_chat_server(
        "200 OK",
        r#"{"model":"llama3","message":{"role":"assistant","content":"  {\"intent\":\"x\"}\n"},"done":true}"#,
    );
    let prompt = build_prompt("1001", "Where is my order?").expect("prompt");

    let content = client(&endpoint, Some("llama3"))
        .chat(prompt.turns(), None)
        .expect("chat");
    assert_eq!(content, r#"{"intent":"x"}"#);

    let request = captured.recv().expect("captured request");
    assert!(
        request.request_line.starts_with("POST /api/chat "),
        "unexpected request line: {}",
        request.request_line
    );
    let body: Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["stream"], false);
    assert_eq!(body["options"]["num_predict"], 700);
    let messages = body["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), prompt.len());
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(
        messages[9]["content"],
        "Customer Query:\nWhere is my order?\nReturn ONLY JSON:"
    );
}

#[test]
fn reads_first_entry_of_messages_envelope() {
    let (endpoint, _captured) = spawn_chat_server(
        "200 OK",
        r#"{"messages":[{"content":"first"},{"content":"second"}]}"#,
    );
    let content = client(&endpoint, Some("llama3"))
        .chat(&[], None)
        .expect("chat");
    assert_eq!(content, "first");
}

#[test]
fn blank_content_is_an_output_failure() {
    let (endpoint, _captured) = spawn_chat_server("200 OK", r#"{"message":{"content":"   "}}"#);
    let err = client(&endpoint, Some("llama3"))
        .chat(&[], None)
        .expect_err("empty");
    assert_eq!(err.to_string(), "Empty LLM response content");
    assert_eq!(err.kind(), ErrorKind::BackendOutput);
}

#[test]
fn envelope_without_content_is_an_output_failure() {
    let (endpoint, _captured) = spawn_chat_server("200 OK", r#"{"done":true}"#);
    let err = client(&endpoint, Some("llama3"))
        .chat(&[], None)
        .expect_err("no content");
    assert_eq!(err, ClassifyError::EmptyContent);
}

#[test]
fn missing_model_fails_before_any_network_call() {
    let err = client(&closed_port_endpoint(), None)
        .chat(&[], None)
        .expect_err("no model");
    assert_eq!(err, ClassifyError::ModelNotConfigured);
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn refused_connection_is_a_connectivity_failure() {
    let err = client(&closed_port_endpoint(), Some("llama3"))
        .chat(&[], None)
        .expect_err("refused");
    assert_eq!(err.to_string(), "LLM connectivity error");
    assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
    assert!(err.detail().is_some());
}

#[test]
fn error_status_is_a_connectivity_failure() {
    let (endpoint, _captured) =
        spawn_chat_server("500 Internal Server Error", r#"{"error":"model crashed"}"#);
    let err = client(&endpoint, Some("llama3"))
        .chat(&[], None)
        .expect_err("status");
    assert!(matches!(err, ClassifyError::Connectivity { .. }));
    assert!(err.detail().unwrap_or_default().contains("500"));
}

#[test]
fn non_json_body_is_unclassified() {
    let (endpoint, _captured) = spawn_chat_server("200 OK", "<html>gateway</html>");
    let err = client(&endpoint, Some("llama3"))
        .chat(&[], None)
        .expect_err("not json");
    assert_eq!(err.to_string(), "LLM error");
}

#[test]
fn configured_timeout_bounds_the_call() {
    let endpoint = spawn_silent_server(Duration::from_secs(3));
    let client = OllamaClient::new(BackendConfig {
        endpoint,
        model: Some("llama3".to_string()),
        timeout: Some(Duration::from_millis(200)),
        ..BackendConfig::default()
    });
    let err = client.chat(&[], None).expect_err("timed out");
    assert_eq!(err.to_string(), "LLM request timed out");
    assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
}

#[test]
fn caller_deadline_bounds_the_call() {
    let endpoint = spawn_silent_server(Duration::from_secs(3));
    let started = Instant::now();
    let err = client(&endpoint, Some("llama3"))
        .chat(&[], Some(Instant::now() + Duration::from_millis(200)))
        .expect_err("timed out");
    assert_eq!(err, ClassifyError::Timeout);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn expired_deadline_skips_the_call() {
    let err = client(&closed_port_endpoint(), Some("llama3"))
        .chat(&[], Some(Instant::now()))
        .expect_err("expired");
    assert_eq!(err, ClassifyError::Timeout);
}
