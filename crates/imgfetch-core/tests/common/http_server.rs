//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes (query strings ignored), answers HEAD with
//! headers only, and counts requests per method and path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_disposition: Option<String>,
    /// If false, HEAD returns 405 (simulates servers that block HEAD).
    pub head_allowed: bool,
    /// Content-Length to announce; defaults to the body length. A larger value
    /// simulates a connection closed mid-body.
    pub declared_len: Option<usize>,
    /// If set, the GET body is sent in `chunk`-byte pieces with `delay` between them.
    pub trickle: Option<(usize, Duration)>,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            content_disposition: None,
            head_allowed: true,
            declared_len: None,
            trickle: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"error page".to_vec(),
            ..Self::ok(b"")
        }
    }

    pub fn named(mut self, content_disposition: &str) -> Self {
        self.content_disposition = Some(content_disposition.to_string());
        self
    }

    pub fn no_head(mut self) -> Self {
        self.head_allowed = false;
        self
    }

    pub fn declare_len(mut self, len: usize) -> Self {
        self.declared_len = Some(len);
        self
    }

    pub fn trickle(mut self, chunk: usize, delay: Duration) -> Self {
        self.trickle = Some((chunk, delay));
        self
    }
}

pub struct TestServer {
    base: String,
    hits: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestServer {
    /// Full URL for `path_and_query` (e.g. "/img/a.jpg?x=1").
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base, path_and_query)
    }

    /// Number of requests seen with `method` for `path` (query ignored).
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.hits
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p)| m.eq_ignore_ascii_case(method) && p == path)
            .count()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: &[(&str, Route)]) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .iter()
            .map(|(p, r)| (p.to_string(), r.clone()))
            .collect(),
    );
    let hits = Arc::new(Mutex::new(Vec::new()));
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<Vec<(String, String)>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut first = request.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let target = first.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/").to_string();
    hits.lock().unwrap().push((method.clone(), path.clone()));

    let Some(route) = routes.get(&path) else {
        let _ = stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    };

    let is_head = method.eq_ignore_ascii_case("HEAD");
    if is_head && !route.head_allowed {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    let disposition = route
        .content_disposition
        .as_ref()
        .map(|cd| format!("Content-Disposition: {}\r\n", cd))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        route.declared_len.unwrap_or(route.body.len()),
        disposition
    );
    let _ = stream.write_all(response.as_bytes());
    if is_head {
        return;
    }
    match route.trickle {
        Some((chunk, delay)) => {
            for piece in route.body.chunks(chunk.max(1)) {
                if stream.write_all(piece).is_err() || stream.flush().is_err() {
                    return;
                }
                thread::sleep(delay);
            }
        }
        None => {
            let _ = stream.write_all(&route.body);
        }
    }
}
