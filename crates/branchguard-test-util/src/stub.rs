use reqwest::Url;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// One canned response, matched on path and a subset of query pairs.
#[derive(Clone, Debug)]
pub struct StubRoute {
    path: String,
    query: Vec<(String, String)>,
    status: u16,
    body: Vec<u8>,
}

impl StubRoute {
    /// Match `GET {path}`. `path` is written unencoded (e.g. `/acme/Core Platform/_apis`) and
    /// compared in the encoded form the client sends.
    pub fn get(path: &str) -> Self {
        Self {
            path: encode_path(path),
            query: Vec::new(),
            status: 200,
            body: b"{\"count\":0,\"value\":[]}".to_vec(),
        }
    }

    /// Additionally require `key=value` in the decoded query string.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn respond(mut self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.status = status;
        self.body = body.into();
        self
    }

    /// 200 with `body` prefixed by a UTF-8 byte-order mark.
    pub fn respond_with_bom(self, body: &str) -> Self {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(body.as_bytes());
        self.respond(200, bytes)
    }

    fn matches(&self, path: &str, query: &[(String, String)]) -> bool {
        self.path == path && self.query.iter().all(|pair| query.contains(pair))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw request target as sent (`/path?query`).
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Loopback HTTP/1.1 server that answers every connection once and closes it.
///
/// Requests that match no route get a 404. The server stops when dropped.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start(routes: Vec<StubRoute>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = {
            let requests = Arc::clone(&requests);
            let shutdown = Arc::clone(&shutdown);
            std::thread::spawn(move || {
                for stream in listener.incoming() {
                    if shutdown.load(Ordering::SeqCst) {
                        break;
                    }
                    let Ok(stream) = stream else { continue };
                    // A client hanging up mid-request only affects that request.
                    let _ = serve(stream, &routes, &requests);
                }
            })
        };

        Ok(Self {
            addr,
            requests,
            shutdown,
            handle: Some(handle),
        })
    }

    /// `http://127.0.0.1:{port}`, suitable as the client base URL.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop so it observes the flag.
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(
    stream: TcpStream,
    routes: &[StubRoute],
    requests: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_ascii_lowercase(), v.trim().to_string()));
        }
    }

    if let Ok(mut log) = requests.lock() {
        log.push(RecordedRequest {
            method: method.clone(),
            target: target.clone(),
            headers,
        });
    }

    let (status, body) = match Url::parse(&format!("http://stub{target}")) {
        Ok(url) if method == "GET" => {
            let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            routes
                .iter()
                .find(|r| r.matches(url.path(), &query))
                .map(|r| (r.status, r.body.clone()))
                .unwrap_or_else(|| (404, b"{\"message\":\"no stub route\"}".to_vec()))
        }
        _ => (400, b"{\"message\":\"bad request\"}".to_vec()),
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reason(status),
        body.len()
    )?;
    stream.write_all(&body)?;
    stream.flush()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Percent-encode `path` the way `Url` encodes a path; unparseable input is kept as is.
fn encode_path(path: &str) -> String {
    Url::parse("http://stub")
        .and_then(|base| base.join(path))
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| path.to_string())
}
