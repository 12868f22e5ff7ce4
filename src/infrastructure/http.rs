use crate::application::RegistrationGateway;
use crate::domain::{REGISTRATION_FAILED_MESSAGE, RegistrationDraft, SubmissionError, SubmissionResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Registration call over HTTP: POSTs the draft as JSON to the endpoint.
pub struct HttpRegistrationClient {
    client: Client,
    endpoint: String,
}

impl HttpRegistrationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RegistrationGateway for HttpRegistrationClient {
    fn register(&self, draft: &RegistrationDraft) -> SubmissionResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(draft)
            .send()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(rejection(status.as_u16(), &body))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Builds the error for a non-2xx response, preferring the body's `message`.
pub fn rejection(status: u16, body: &str) -> SubmissionError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| REGISTRATION_FAILED_MESSAGE.to_string());

    SubmissionError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one request with the given raw response and returns the request body.
    ///
    /// Test scaffolding only: accepts a single connection and reads a body
    /// framed by `Content-Length`. Chunked or keep-alive requests are not handled.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/register", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            String::from_utf8(body).unwrap()
        });

        (url, handle)
    }

    fn sample_draft() -> RegistrationDraft {
        RegistrationDraft {
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: "Abcdef12".to_string(),
            confirm_password: "Abcdef12".to_string(),
        }
    }

    #[test]
    fn test_rejection_uses_body_message() {
        let error = rejection(409, r#"{"message":"Email already registered"}"#);
        assert_eq!(
            error,
            SubmissionError::Rejected { status: 409, message: "Email already registered".to_string() }
        );
    }

    #[test]
    fn test_rejection_without_message_falls_back() {
        for body in ["", "not json", r#"{"error":"x"}"#, r#"{"message":""}"#] {
            assert_eq!(
                rejection(500, body),
                SubmissionError::Rejected { status: 500, message: REGISTRATION_FAILED_MESSAGE.to_string() }
            );
        }
    }

    #[test]
    fn test_register_posts_payload() {
        let (url, server) = serve_once("HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let client = HttpRegistrationClient::new(url, Duration::from_secs(5)).unwrap();

        assert_eq!(client.register(&sample_draft()), Ok(()));

        let body: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(body["email"], "jo@example.com");
        assert_eq!(body["confirmPassword"], "Abcdef12");
    }

    #[test]
    fn test_register_maps_error_status() {
        let (url, server) = serve_once(
            "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 28\r\nConnection: close\r\n\r\n{\"message\":\"Email is taken\"}",
        );
        let client = HttpRegistrationClient::new(url, Duration::from_secs(5)).unwrap();

        let result = client.register(&sample_draft());
        server.join().unwrap();
        assert_eq!(
            result,
            Err(SubmissionError::Rejected { status: 400, message: "Email is taken".to_string() })
        );
    }

    #[test]
    fn test_register_connection_failure_is_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/register", listener.local_addr().unwrap());
        drop(listener);

        let client = HttpRegistrationClient::new(url, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.register(&sample_draft()),
            Err(SubmissionError::Transport(_))
        ));
    }
}
