use std::fmt;

use super::*;

/// The deployed prediction service.
pub const PREDICT_ENDPOINT: &str =
    "https://carpricenew-anfnhhe6cph9e9dv.southeastasia-01.azurewebsites.net/predict";

/// Shown when the service rejects a request without giving a `detail`.
pub const SERVER_ERROR_MESSAGE: &str = "Server failed to process request.";

/// Shown for any failure where the service never gave a usable answer.
pub const CONNECTIVITY_MESSAGE: &str =
    "Failed to connect to the server. Please check the URL or your internet connection.";

/// What went wrong with a prediction request.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The service answered with a non-success status. The payload is the
    /// message to show the user.
    Server(String),
    /// The request never completed or the response could not be parsed. The
    /// payload is diagnostic only and never shown to the user.
    Transport(String),
}

impl PredictError {
    /// The message to render in the error banner.
    pub fn user_message(&self) -> &str {
        match self {
            PredictError::Server(message) => message,
            PredictError::Transport(_) => CONNECTIVITY_MESSAGE,
        }
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::Server(message) => write!(f, "server error: {}", message),
            PredictError::Transport(cause) => write!(f, "transport error: {}", cause),
        }
    }
}

/// Client for the remote prediction endpoint.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Send one prediction request and extract the estimate.
    ///
    /// The body is parsed as JSON regardless of the HTTP status; a failure
    /// status yields the body's `detail` when present. No retries and no
    /// timeout beyond the transport default.
    pub fn predict(&self, request: &PredictionRequest) -> Result<f64, PredictError> {
        let body = serde_json::to_string(request)
            .map_err(|e| PredictError::Transport(format!("could not encode request: {}", e)))?;
        log::debug!("Sending payload: {}", body);

        let response = ureq::post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body);

        if let Some(error) = response.synthetic_error() {
            return Err(PredictError::Transport(format!(
                "request did not complete: {}",
                error
            )));
        }

        let ok = response.ok();
        let status = response.status();
        let text = response.into_string().map_err(|e| {
            PredictError::Transport(format!("could not read the response body: {}", e))
        })?;
        let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            PredictError::Transport(format!("response was not valid JSON: {}", e))
        })?;

        if !ok {
            let detail = json
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(SERVER_ERROR_MESSAGE);
            log::warn!(
                "Prediction request was rejected with status {}. Reason:\r\n{}",
                status,
                detail
            );
            return Err(PredictError::Server(detail.to_string()));
        }

        let response: PredictionResponse = serde_json::from_value(json).map_err(|e| {
            PredictError::Transport(format!("response did not carry a prediction: {}", e))
        })?;
        Ok(response.predicted_car_purchase_amount)
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::spawn;

    /// Serve exactly one canned HTTP response on an ephemeral port and return
    /// the endpoint URL to aim the client at.
    pub fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind test listener.");
        let address = listener.local_addr().expect("Test listener has no address.");
        spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                read_request(&mut stream);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/predict", address)
    }

    /// Drain the request head plus its Content-Length body so the client is
    /// never answered mid-write.
    fn read_request(stream: &mut std::net::TcpStream) {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            match stream.read(&mut chunk) {
                Ok(0) => return,
                Ok(n) => {
                    raw.extend_from_slice(&chunk[..n]);
                    if let Some(i) = find_header_end(&raw) {
                        break i;
                    }
                }
                Err(_) => return,
            }
        };
        let head = String::from_utf8_lossy(&raw[..header_end]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let mut remaining = content_length.saturating_sub(raw.len() - header_end - 4);
        while remaining > 0 {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => return,
                Ok(n) => remaining = remaining.saturating_sub(n),
            }
        }
    }

    fn find_header_end(raw: &[u8]) -> Option<usize> {
        raw.windows(4).position(|window| window == b"\r\n\r\n")
    }
}

#[cfg(test)]
fn sample_request() -> PredictionRequest {
    FormState::default().request()
}

#[test]
fn test_successful_prediction() {
    let url = fixture::serve_once("200 OK", r#"{"predicted_car_purchase_amount": 25000.5}"#);
    let client = PredictionClient::new(url);
    assert_eq!(client.predict(&sample_request()), Ok(25000.5));
}

#[test]
fn test_rejection_uses_detail_message() {
    let url = fixture::serve_once("422 Unprocessable Entity", r#"{"detail": "invalid age"}"#);
    let client = PredictionClient::new(url);
    assert_eq!(
        client.predict(&sample_request()),
        Err(PredictError::Server("invalid age".to_string()))
    );
}

#[test]
fn test_rejection_without_detail_is_generic() {
    let url = fixture::serve_once("500 Internal Server Error", r#"{}"#);
    let client = PredictionClient::new(url);
    assert_eq!(
        client.predict(&sample_request()),
        Err(PredictError::Server(SERVER_ERROR_MESSAGE.to_string()))
    );
}

#[test]
fn test_non_json_body_is_a_transport_error() {
    let url = fixture::serve_once("200 OK", "<html>gateway</html>");
    let client = PredictionClient::new(url);
    let error = client.predict(&sample_request()).unwrap_err();
    assert!(matches!(error, PredictError::Transport(_)));
    assert_eq!(error.user_message(), CONNECTIVITY_MESSAGE);
}

#[test]
fn test_refused_connection_is_a_transport_error() {
    // Bind and immediately drop a listener so the port is known to be closed.
    let address = {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Could not bind test listener.");
        listener.local_addr().expect("Test listener has no address.")
    };
    let client = PredictionClient::new(format!("http://{}/predict", address));
    let error = client.predict(&sample_request()).unwrap_err();
    assert!(matches!(error, PredictError::Transport(_)));
    assert_eq!(error.user_message(), CONNECTIVITY_MESSAGE);
}
