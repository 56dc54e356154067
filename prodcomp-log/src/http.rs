use crate::sink::LogSink;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Path the endpoint accepts entries on.
pub const LOG_PATH: &str = "/api/log";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Longest a drop waits for queued entries before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start log worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// POSTs each entry as JSON from a background worker.
///
/// Entries are queued on a channel so `submit` returns immediately. Dropping
/// the sink closes the queue and gives the worker at most the shutdown grace
/// period to deliver what is left. Once shutting down, the first failed post
/// discards everything still queued.
pub struct HttpLogSink {
    endpoint: String,
    tx: Option<Sender<Value>>,
    worker: Option<JoinHandle<()>>,
    closing: Arc<AtomicBool>,
    done: Receiver<()>,
    shutdown_grace: Duration,
}

impl HttpLogSink {
    pub fn spawn(base_url: &str) -> Result<Self, LogError> {
        Self::spawn_with(base_url, REQUEST_TIMEOUT, SHUTDOWN_GRACE)
    }

    pub fn spawn_with(
        base_url: &str,
        request_timeout: Duration,
        shutdown_grace: Duration,
    ) -> Result<Self, LogError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), LOG_PATH);
        let client = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .build()?;

        let (tx, rx) = mpsc::channel::<Value>();
        let (done_tx, done) = mpsc::channel::<()>();
        let closing = Arc::new(AtomicBool::new(false));
        let worker_closing = Arc::clone(&closing);
        let target = endpoint.clone();
        let worker = thread::Builder::new()
            .name("log-sink".into())
            .spawn(move || {
                for entry in rx.iter() {
                    if !post_entry(&client, &target, &entry)
                        && worker_closing.load(Ordering::SeqCst)
                    {
                        let dropped = rx.try_iter().count();
                        warn!(dropped, "endpoint failing at shutdown, discarding queued entries");
                        break;
                    }
                }
                let _ = done_tx.send(());
            })?;

        info!(endpoint = %endpoint, "logging responses to endpoint");
        Ok(Self {
            endpoint,
            tx: Some(tx),
            worker: Some(worker),
            closing,
            done,
            shutdown_grace,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Returns whether the endpoint answered.
fn post_entry(client: &reqwest::blocking::Client, endpoint: &str, entry: &Value) -> bool {
    let result = client
        .post(endpoint)
        .json(entry)
        .send()
        .and_then(|response| response.text());
    match result {
        Ok(body) => {
            debug!(%body, "log entry accepted");
            true
        }
        Err(e) => {
            warn!(error = %e, endpoint, "error logging entry, dropping it");
            false
        }
    }
}

impl LogSink for HttpLogSink {
    fn submit(&self, entry: Value) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(entry).is_err() {
            warn!(endpoint = %self.endpoint, "log worker gone, dropping entry");
        }
    }
}

impl Drop for HttpLogSink {
    fn drop(&mut self) {
        self.closing.store(true, Ordering::SeqCst);
        // closing the channel ends the worker loop once the queue is empty
        self.tx.take();
        match self.done.recv_timeout(self.shutdown_grace) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(worker) = self.worker.take() {
                    if worker.join().is_err() {
                        warn!("log worker panicked");
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                // the worker is detached and dies with the process
                warn!(
                    endpoint = %self.endpoint,
                    grace_ms = self.shutdown_grace.as_millis() as u64,
                    "log worker still busy at shutdown, abandoning queued entries"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::time::Instant;

    /// Accepts one request and returns (request line, body).
    fn serve_once(listener: TcpListener) -> thread::JoinHandle<(String, String)> {
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = stream;
            stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok")
                .unwrap();

            (
                request_line.trim_end().to_string(),
                String::from_utf8(body).unwrap(),
            )
        })
    }

    #[test]
    fn posts_entries_to_log_path() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = serve_once(listener);

        let sink = HttpLogSink::spawn(&format!("http://{addr}/")).unwrap();
        assert_eq!(sink.endpoint(), format!("http://{addr}/api/log"));
        sink.submit(json!({"label": "cat", "correct": true}));
        drop(sink);

        let (request_line, body) = server.join().unwrap();
        assert_eq!(request_line, "POST /api/log HTTP/1.1");
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!({"label": "cat", "correct": true}));
    }

    #[test]
    fn silent_endpoint_does_not_hold_up_shutdown() {
        // accepts connections into the backlog but never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let sink = HttpLogSink::spawn_with(
            &format!("http://{addr}"),
            Duration::from_secs(30),
            Duration::from_millis(200),
        )
        .unwrap();
        for n in 0..3 {
            sink.submit(json!({ "n": n }));
        }

        let started = Instant::now();
        drop(sink);
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn unreachable_endpoint_is_not_an_error() {
        // bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let sink = HttpLogSink::spawn(&format!("http://{addr}")).unwrap();
        sink.submit(json!({"n": 1}));
        sink.submit(json!({"n": 2}));
        drop(sink);
    }
}
