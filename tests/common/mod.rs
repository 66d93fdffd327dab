use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

/// Isolated config home and save directory for one binary invocation.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Used as `XDG_CONFIG_HOME` for the binary
    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn save_dir(&self) -> PathBuf {
        self.path().join("walls")
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        let dir = self.config_home().join("wpchg");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("config.toml"), contents)?;
        Ok(())
    }

    /// Point the binary at `server` instead of the real Unsplash API
    pub fn use_server(&self, server: &StubServer) -> Result<()> {
        self.write_config(&format!("api_url = \"{}\"\n", server.base_url()))
    }
}

/// Minimal HTTP responder: fixed responses keyed by request path.
pub struct StubServer {
    addr: SocketAddr,
}

impl StubServer {
    /// Routes are `(path, status, body)`; the query string is ignored when matching.
    /// Mirrors the unit-test stub in `src/testing.rs`, minus request recording and custom headers.
    pub fn start(routes: Vec<(String, u16, Vec<u8>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let routes: HashMap<String, (u16, Vec<u8>)> = routes
            .into_iter()
            .map(|(path, status, body)| (path, (status, body)))
            .collect();

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = respond(stream, &routes);
            }
        });

        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

fn respond(mut stream: TcpStream, routes: &HashMap<String, (u16, Vec<u8>)>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line.trim_end().is_empty() {
            break;
        }
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target);
    let (status, body) = routes
        .get(path)
        .cloned()
        .unwrap_or((404, b"not found".to_vec()));

    write!(
        stream,
        "HTTP/1.1 {} Stub\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    )?;
    stream.write_all(&body)?;
    stream.flush()
}

/// Search results body for the given `(id, width, height)` photos, served from `server`.
pub fn photos_body(server: &StubServer, photos: &[(&str, u32, u32)]) -> Vec<u8> {
    let photos: Vec<_> = photos
        .iter()
        .map(|(id, width, height)| {
            serde_json::json!({
                "id": id,
                "width": width,
                "height": height,
                "urls": { "raw": server.url(&format!("/raw/{id}")) },
            })
        })
        .collect();
    serde_json::to_vec(&photos).expect("serialize photos")
}
