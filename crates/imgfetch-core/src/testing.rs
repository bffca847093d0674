//! In-memory fakes for the HTTP, filesystem and metadata-tool collaborators.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::annotate::{AnnotateError, MetadataTool};
use crate::control::CancelToken;
use crate::http::{HeadResult, HttpClient, HttpError};
use crate::storage::{FileStore, PendingFile};

/// CURLE_COULDNT_CONNECT. The literal takes the platform's `CURLcode` type.
fn couldnt_connect() -> HttpError {
    HttpError::Curl(curl::Error::new(7))
}

#[derive(Debug, Clone)]
struct Route {
    content_disposition: Option<String>,
    head_ok: bool,
    get: Result<Vec<u8>, u32>,
}

#[derive(Debug, Default)]
struct HttpState {
    routes: HashMap<String, Route>,
    heads: Vec<String>,
    gets: Vec<String>,
    get_delay: Option<Duration>,
}

/// Scripted HTTP client. Unknown URLs fail like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct FakeHttp {
    state: Arc<Mutex<HttpState>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// HEAD 200 without Content-Disposition, GET 200 with `body`.
    pub fn serve(&self, url: &str, body: &[u8]) -> &Self {
        self.insert(url, None, Ok(body.to_vec()))
    }

    /// HEAD 200 with the given Content-Disposition, GET 200 with `body`.
    pub fn serve_named(&self, url: &str, content_disposition: &str, body: &[u8]) -> &Self {
        self.insert(url, Some(content_disposition.to_string()), Ok(body.to_vec()))
    }

    /// HEAD 200, GET answers with `status`.
    pub fn fail_get(&self, url: &str, status: u32) -> &Self {
        self.insert(url, None, Err(status))
    }

    /// Make HEAD for `url` fail at the connection level.
    pub fn fail_head(&self, url: &str) -> &Self {
        if let Some(route) = self.state.lock().unwrap().routes.get_mut(url) {
            route.head_ok = false;
        }
        self
    }

    fn insert(&self, url: &str, cd: Option<String>, get: Result<Vec<u8>, u32>) -> &Self {
        self.state.lock().unwrap().routes.insert(
            url.to_string(),
            Route {
                content_disposition: cd,
                head_ok: true,
                get,
            },
        );
        self
    }

    /// Every GET sleeps for `delay` before writing its body.
    pub fn slow_gets(&self, delay: Duration) -> &Self {
        self.state.lock().unwrap().get_delay = Some(delay);
        self
    }

    pub fn get_count(&self, url: &str) -> usize {
        self.state.lock().unwrap().gets.iter().filter(|u| *u == url).count()
    }

    pub fn total_gets(&self) -> usize {
        self.state.lock().unwrap().gets.len()
    }

    pub fn total_heads(&self) -> usize {
        self.state.lock().unwrap().heads.len()
    }
}

impl HttpClient for FakeHttp {
    fn head(&self, url: &str) -> Result<HeadResult, HttpError> {
        let mut state = self.state.lock().unwrap();
        state.heads.push(url.to_string());
        match state.routes.get(url) {
            Some(route) if route.head_ok => Ok(HeadResult {
                content_disposition: route.content_disposition.clone(),
            }),
            _ => Err(couldnt_connect()),
        }
    }

    fn get(&self, url: &str, sink: &mut dyn Write, cancel: &CancelToken) -> Result<u64, HttpError> {
        let (route, delay) = {
            let mut state = self.state.lock().unwrap();
            state.gets.push(url.to_string());
            (state.routes.get(url).cloned(), state.get_delay)
        };
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        if cancel.is_cancelled() {
            return Err(HttpError::Cancelled);
        }
        match route {
            None => Err(couldnt_connect()),
            Some(Route { get: Err(status), .. }) => Err(HttpError::Status(status)),
            Some(Route { get: Ok(body), .. }) => {
                sink.write_all(&body).map_err(HttpError::Sink)?;
                Ok(body.len() as u64)
            }
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    dirs: HashSet<PathBuf>,
    files: HashMap<PathBuf, Vec<u8>>,
    denied: HashSet<PathBuf>,
}

/// In-memory file store.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, path: impl Into<PathBuf>, data: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.into(), data.to_vec());
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }

    /// Directory creation at or below `path` fails with PermissionDenied.
    pub fn deny_dir(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().denied.insert(path.into());
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

impl FileStore for MemStore {
    fn exists(&self, path: &Path) -> bool {
        self.state.lock().unwrap().files.contains_key(path)
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.denied.iter().any(|d| dir.starts_with(d)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        for ancestor in dir.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn begin_write(&self, final_path: &Path) -> io::Result<Box<dyn PendingFile>> {
        Ok(Box::new(MemPending {
            store: self.clone(),
            path: final_path.to_path_buf(),
            buf: Vec::new(),
        }))
    }
}

struct MemPending {
    store: MemStore,
    path: PathBuf,
    buf: Vec<u8>,
}

impl Write for MemPending {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl PendingFile for MemPending {
    fn commit(self: Box<Self>) -> io::Result<()> {
        let MemPending { store, path, buf } = *self;
        store.put(path, &buf);
        Ok(())
    }

    fn discard(self: Box<Self>) {}
}

#[derive(Debug, Default)]
struct ToolState {
    available: bool,
    failing: HashSet<PathBuf>,
    calls: Vec<(PathBuf, BTreeMap<String, String>)>,
}

/// Metadata tool that records invocations.
#[derive(Debug, Clone, Default)]
pub struct FakeTool {
    state: Arc<Mutex<ToolState>>,
}

impl FakeTool {
    pub fn available() -> Self {
        let tool = Self::default();
        tool.state.lock().unwrap().available = true;
        tool
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Invocations for `path` exit with status 1.
    pub fn fail_for(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().failing.insert(path.into());
    }

    pub fn calls(&self) -> Vec<(PathBuf, BTreeMap<String, String>)> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl MetadataTool for FakeTool {
    fn name(&self) -> &str {
        "fake-tool"
    }

    fn is_available(&self) -> bool {
        self.state.lock().unwrap().available
    }

    fn annotate(&self, path: &Path, tags: &BTreeMap<String, String>) -> Result<(), AnnotateError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((path.to_path_buf(), tags.clone()));
        if state.failing.contains(path) {
            return Err(AnnotateError::InvocationFailed {
                path: path.to_path_buf(),
                status: Some(1),
                stderr: "Error: file not writable".to_string(),
            });
        }
        Ok(())
    }
}
