use std::time::Duration;

use serde_json::Value;

use crate::io::credentials::Credentials;

/// Error type for remote fetches
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("GET {path} failed with HTTP {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },
    #[error("GET {path} failed: {message}")]
    Transport { path: String, message: String },
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        source: std::io::Error,
    },
}

/// Authenticated read access to the task-board API.
///
/// `path` is a resource path relative to the API root, such as
/// `/members/me/boards`.
pub trait Gateway {
    fn get_json(&self, path: &str) -> Result<Value, GatewayError>;
}

/// Gateway over HTTPS, authenticating with an API key and token passed as
/// query parameters.
pub struct HttpGateway {
    agent: ureq::Agent,
    base_url: String,
    credentials: Credentials,
}

impl HttpGateway {
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("boardview/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpGateway {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Gateway for HttpGateway {
    fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        let url = self.url_for(path);
        tracing::debug!(%path, "GET");
        let response = self
            .agent
            .get(&url)
            .query("key", &self.credentials.api_key)
            .query("token", &self.credentials.token)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => GatewayError::Status {
                    path: path.to_string(),
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(t) => GatewayError::Transport {
                    path: path.to_string(),
                    message: t.to_string(),
                },
            })?;

        response
            .into_json::<Value>()
            .map_err(|source| GatewayError::Decode {
                path: path.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve one canned HTTP response on a local port. The handle yields
    /// the request line the client sent.
    fn serve_once(status: &str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let status = status.to_string();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
            request_line.trim_end().to_string()
        });
        (format!("http://127.0.0.1:{}/1", port), handle)
    }

    fn gateway(base_url: &str) -> HttpGateway {
        HttpGateway::new(
            base_url,
            Credentials {
                api_key: "key".into(),
                token: "token".into(),
            },
            Duration::from_secs(5),
        )
    }

    #[test]
    fn url_joins_base_and_path() {
        let gw = gateway("https://api.trello.com/1");
        assert_eq!(
            gw.url_for("/members/me/boards"),
            "https://api.trello.com/1/members/me/boards"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let gw = gateway("https://api.trello.com/1/");
        assert_eq!(
            gw.url_for("/boards/b1/lists"),
            "https://api.trello.com/1/boards/b1/lists"
        );
    }

    #[test]
    fn status_error_mentions_path_and_code() {
        let err = GatewayError::Status {
            path: "/lists/l1/cards".into(),
            status: 401,
            body: "invalid token".into(),
        };
        assert_eq!(
            err.to_string(),
            "GET /lists/l1/cards failed with HTTP 401: invalid token"
        );
    }

    #[test]
    fn ok_response_is_parsed_and_credentials_sent() {
        let (base, server) = serve_once("200 OK", r#"[{"id":"b1","name":"Alpha"}]"#);
        let value = gateway(&base).get_json("/members/me/boards").unwrap();
        assert_eq!(value, json!([{ "id": "b1", "name": "Alpha" }]));

        let request_line = server.join().unwrap();
        assert!(
            request_line.starts_with("GET /1/members/me/boards?"),
            "{}",
            request_line
        );
        assert!(request_line.contains("key=key"), "{}", request_line);
        assert!(request_line.contains("token=token"), "{}", request_line);
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (base, server) = serve_once("401 Unauthorized", "invalid token");
        let err = gateway(&base).get_json("/boards/b1/lists").unwrap_err();
        server.join().unwrap();
        match err {
            GatewayError::Status { path, status, body } => {
                assert_eq!(path, "/boards/b1/lists");
                assert_eq!(status, 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn undecodable_body_is_an_error() {
        let (base, server) = serve_once("200 OK", "<html>maintenance</html>");
        let err = gateway(&base).get_json("/lists/l1/cards").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, GatewayError::Decode { ref path, .. } if path == "/lists/l1/cards"));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = gateway(&format!("http://127.0.0.1:{}/1", port))
            .get_json("/members/me/boards")
            .unwrap_err();
        assert!(matches!(err, GatewayError::Transport { .. }));
    }
}
