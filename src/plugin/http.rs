//! HTTP transport to the plugin's loopback listener

use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use super::protocol::{Method, PluginRequest, PluginResponse};
use super::{PluginTarget, Transport};
use crate::error::ConnectionError;

/// Blocking, single-attempt HTTP transport
pub struct HttpTransport {
    target: PluginTarget,
    client: Client,
}

impl HttpTransport {
    pub fn new(target: PluginTarget) -> Result<Self, ConnectionError> {
        let client = Client::builder()
            .timeout(target.timeout())
            .connect_timeout(target.timeout())
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .map_err(|e| ConnectionError::Setup(e.to_string()))?;

        Ok(Self { target, client })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> ConnectionError {
        if err.is_timeout() {
            ConnectionError::Timeout {
                url: self.target.base_url(),
                timeout: self.target.timeout(),
            }
        } else if err.is_connect() {
            ConnectionError::Refused {
                url: self.target.base_url(),
            }
        } else {
            ConnectionError::Failed {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &PluginRequest) -> Result<PluginResponse, ConnectionError> {
        let url = self.target.url(request.path);

        let builder = match request.method {
            Method::Get => self.client.get(&url).query(&request.query_pairs()),
            Method::Post => self.client.post(&url).json(&request.params),
        };

        let started = Instant::now();
        let response = builder
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| self.classify(&url, e))?.to_vec();

        tracing::debug!(
            "{} {} -> {} in {:?}",
            request.method,
            request.path,
            status,
            started.elapsed()
        );

        Ok(PluginResponse { status, body })
    }

    fn base_url(&self) -> String {
        self.target.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::routes;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Accept one connection, capture the raw request, answer with `status`/`body`
    fn one_shot_server(status: &'static str, body: &'static [u8]) -> (u16, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                head.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            head.push_str(&String::from_utf8(payload).unwrap());

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
            head
        });

        (port, handle)
    }

    fn transport(port: u16, timeout: Duration) -> HttpTransport {
        HttpTransport::new(PluginTarget::new(port, timeout)).unwrap()
    }

    #[test]
    fn test_get_sends_query_params() {
        let (port, server) = one_shot_server("200 OK", br#"{"symbols":[]}"#);
        let http = transport(port, Duration::from_secs(5));

        let request = PluginRequest::get(routes::FIND)
            .param("name", "UserService")
            .param("depth", 1u32);
        let response = http.send(&request).unwrap();

        assert_eq!(response, PluginResponse::new(200, br#"{"symbols":[]}"#.to_vec()));
        let raw = server.join().unwrap();
        assert!(raw.starts_with("GET /find?depth=1&name=UserService HTTP/1.1"), "{raw}");
        assert!(raw.to_ascii_lowercase().contains("accept: application/json"));
    }

    #[test]
    fn test_post_sends_json_body() {
        let (port, server) = one_shot_server("200 OK", b"{}");
        let http = transport(port, Duration::from_secs(5));

        let request = PluginRequest::post(routes::RENAME)
            .param("old", "OldClass")
            .param("new", "NewClass");
        http.send(&request).unwrap();

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /rename HTTP/1.1"), "{raw}");
        assert!(raw.ends_with(r#"{"new":"NewClass","old":"OldClass"}"#), "{raw}");
    }

    #[test]
    fn test_error_status_is_returned_not_raised() {
        let (port, server) = one_shot_server("404 Not Found", br#"{"error":"Symbol not found"}"#);
        let http = transport(port, Duration::from_secs(5));

        let response = http.send(&PluginRequest::get(routes::REFS)).unwrap();
        server.join().unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.body, br#"{"error":"Symbol not found"}"#);
    }

    #[test]
    fn test_body_bytes_not_transcoded() {
        let raw: &'static [u8] = b"{\"name\":\"caf\xe9\"}";
        let (port, server) = one_shot_server("200 OK", raw);
        let http = transport(port, Duration::from_secs(5));

        let response = http.send(&PluginRequest::get(routes::FIND)).unwrap();
        server.join().unwrap();

        assert_eq!(response.body, raw);
    }

    #[test]
    fn test_refused_connection() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let http = transport(port, Duration::from_secs(2));

        let err = http.send(&PluginRequest::get(routes::STATUS)).unwrap_err();
        assert!(matches!(err, ConnectionError::Refused { .. }), "{err:?}");
        assert!(err.to_string().contains("IDE is running"));
    }

    #[test]
    fn test_silent_listener_times_out() {
        // Kernel completes the handshake; nobody ever answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let http = transport(port, Duration::from_millis(300));

        let err = http.send(&PluginRequest::get(routes::STATUS)).unwrap_err();
        assert!(matches!(err, ConnectionError::Timeout { .. }), "{err:?}");
        drop(listener);
    }
}
