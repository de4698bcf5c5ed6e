//! Minimal HTTP collector bound to localhost.
//!
//! Accepts connections on a background thread, answers every request with a
//! fixed status and keeps the request bodies. Only understands requests that
//! carry a `Content-Length`, which is what the HTTP transport sends.

use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

pub struct LocalCollector {
    addr: SocketAddr,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl LocalCollector {
    /// Start a collector that answers every request with `status`.
    pub fn start(status: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&bodies);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = handle(stream, status, &sink);
            }
        });

        Ok(Self { addr, bodies })
    }

    /// Endpoint URL to hand to the transport.
    pub fn endpoint(&self) -> String {
        format!("http://{}/v1/cli", self.addr)
    }

    pub fn request_count(&self) -> usize {
        self.bodies.lock().expect("collector lock poisoned").len()
    }

    /// Request bodies parsed as JSON, in arrival order.
    pub fn events(&self) -> Vec<Value> {
        self.bodies
            .lock()
            .expect("collector lock poisoned")
            .iter()
            .filter_map(|body| serde_json::from_str(body).ok())
            .collect()
    }

    /// Poll until `count` requests arrived or `timeout` passed.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.request_count() >= count {
                return true;
            }
            thread::sleep(Duration::from_millis(20));
        }
        self.request_count() >= count
    }
}

/// Closed address: nothing listens there once the probe socket is dropped.
pub fn unreachable_endpoint() -> std::io::Result<String> {
    let probe = TcpListener::bind("127.0.0.1:0")?;
    let addr = probe.local_addr()?;
    drop(probe);
    Ok(format!("http://{}/v1/cli", addr))
}

/// Bodies are recorded before the response goes out, so a client that saw
/// the response can rely on the body being visible.
fn handle(stream: TcpStream, status: u16, sink: &Mutex<Vec<String>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    sink.lock()
        .expect("collector lock poisoned")
        .push(String::from_utf8_lossy(&body).into_owned());

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Collector\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status
    )?;
    stream.flush()
}
