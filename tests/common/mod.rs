#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use reqwest::blocking::Client;
use stratagems::{Config, Wiki};

/// Status, body, and the `Content-Length` to announce (may exceed the body).
type Routes = Arc<Mutex<HashMap<String, (u16, Vec<u8>, usize)>>>;

/// Loopback HTTP/1.1 server answering fixed routes, one connection at a time.
pub struct Server {
    pub base: String,
    routes: Routes,
    hits: Arc<Mutex<Vec<String>>>,
    count: Arc<AtomicUsize>,
}
impl Server {
    pub fn start() -> Server {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes: Routes = Arc::default();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let count = Arc::new(AtomicUsize::new(0));
        let (r, h, c) = (routes.clone(), hits.clone(), count.clone());
        thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = match stream {
                    Ok(stream) => stream,
                    Err(_) => continue,
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let text = String::from_utf8_lossy(&request);
                let path = text.split_whitespace().nth(1).unwrap_or("/").to_owned();
                let (status, body, length) = r
                    .lock()
                    .unwrap()
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, b"not found".to_vec(), 9));
                h.lock().unwrap().push(path);
                c.fetch_add(1, Ordering::SeqCst);
                let head = format!(
                    "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status, length
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(&body);
                let _ = stream.flush();
            }
        });
        Server { base, routes, hits, count }
    }
    pub fn route(&self, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        let body = body.into();
        let length = body.len();
        self.routes.lock().unwrap().insert(path.to_owned(), (status, body, length));
    }
    /// Announce `length` bytes but send only `body`, then hang up.
    pub fn route_truncated(&self, path: &str, length: usize, body: impl Into<Vec<u8>>) {
        self.routes.lock().unwrap().insert(path.to_owned(), (200, body.into(), length));
    }
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
    pub fn requests(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

pub fn wiki(server: &Server, root: &Path) -> Wiki {
    let config = Config {
        page_url: server.url("/wiki/Stratagem_Codes"),
        images_dir: root.join("data").join("images"),
        csv_path: root.join("data").join("Stratagems.csv"),
        chunk_size: 7,
        ..Config::default()
    };
    let client = Client::builder().no_proxy().build().unwrap();
    Wiki::with_client(config, client)
}
