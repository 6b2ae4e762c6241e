//! Test doubles for the remote services and image fixtures.

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::error::PipelineError;
use crate::generate::{GenerationRequest, ImageGenerator};
use crate::llm::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider};
use crate::pipeline::ImageFetcher;
use crate::types::ImageDescriptor;

/// Deterministic RGB test pattern where every pixel encodes its position.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 256 + y / 256) % 256) as u8])
    })
}

/// PNG-encoded [`gradient`].
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

type CompletionFn = dyn Fn(u32) -> Result<CompletionResponse, PipelineError> + Send + Sync;

/// A configurable mock completion provider.
///
/// Each call to `complete()` invokes the response factory with the current
/// call index.
pub struct MockLlm {
    response_fn: Box<CompletionFn>,
    call_count: Arc<AtomicU32>,
    last_request: Arc<Mutex<Option<Vec<ChatMessage>>>>,
}

impl MockLlm {
    fn from_fn(
        f: impl Fn(u32) -> Result<CompletionResponse, PipelineError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            response_fn: Box::new(f),
            call_count: Arc::new(AtomicU32::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn response(text: &str) -> CompletionResponse {
        CompletionResponse {
            text: text.to_string(),
            model: "mock-v1".to_string(),
            latency_ms: 5,
        }
    }

    pub fn success(text: &str) -> Self {
        let text = text.to_string();
        Self::from_fn(move |_| Ok(Self::response(&text)))
    }

    /// Returns the given texts in order, repeating the last one.
    pub fn sequence(texts: &[&str]) -> Self {
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        Self::from_fn(move |idx| {
            let i = (idx as usize).min(texts.len() - 1);
            Ok(Self::response(&texts[i]))
        })
    }

    pub fn failing(error: impl Fn() -> PipelineError + Send + Sync + 'static) -> Self {
        Self::from_fn(move |_| Err(error()))
    }

    pub fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    pub fn last_request_handle(&self) -> Arc<Mutex<Option<Vec<ChatMessage>>>> {
        self.last_request.clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, PipelineError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.messages.clone());
        (self.response_fn)(idx)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }
}

type GenerationFn = dyn Fn(u32) -> Result<Vec<ImageDescriptor>, PipelineError> + Send + Sync;

/// A mock image generator returning a fixed URL list or a fixed error.
pub struct MockGenerator {
    response_fn: Box<GenerationFn>,
    call_count: Arc<AtomicU32>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockGenerator {
    fn from_fn(
        f: impl Fn(u32) -> Result<Vec<ImageDescriptor>, PipelineError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            response_fn: Box::new(f),
            call_count: Arc::new(AtomicU32::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn returning(urls: &[&str]) -> Self {
        Self::sequence(&[urls])
    }

    /// Returns the given batches in order, repeating the last one.
    pub fn sequence(batches: &[&[&str]]) -> Self {
        let batches: Vec<Vec<ImageDescriptor>> = batches
            .iter()
            .map(|urls| urls.iter().map(|u| ImageDescriptor::new(*u)).collect())
            .collect();
        Self::from_fn(move |idx| {
            let i = (idx as usize).min(batches.len() - 1);
            Ok(batches[i].clone())
        })
    }

    pub fn failing(error: impl Fn() -> PipelineError + Send + Sync + 'static) -> Self {
        Self::from_fn(move |_| Err(error()))
    }

    pub fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    pub fn last_request_handle(&self) -> Arc<Mutex<Option<GenerationRequest>>> {
        self.last_request.clone()
    }
}

#[async_trait]
impl ImageGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<ImageDescriptor>, PipelineError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        (self.response_fn)(idx)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }
}

/// A mock fetcher serving canned bodies per URL.
///
/// Unknown URLs fail like a 404.
pub struct MockFetcher {
    bodies: HashMap<String, Result<Vec<u8>, String>>,
    delay: Option<Duration>,
    call_count: Arc<AtomicU32>,
    in_flight: Arc<AtomicU32>,
    max_in_flight: Arc<AtomicU32>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            delay: None,
            call_count: Arc::new(AtomicU32::new(0)),
            in_flight: Arc::new(AtomicU32::new(0)),
            max_in_flight: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.bodies
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    pub fn max_in_flight_handle(&self) -> Arc<AtomicU32> {
        self.max_in_flight.clone()
    }
}

#[async_trait]
impl ImageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.bodies.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(PipelineError::ImageLoadFailed {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Err(PipelineError::ImageLoadFailed {
                url: url.to_string(),
                message: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

/// One HTTP request as seen by [`serve_once`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request line and headers, CRLF separated
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn bind_local() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending a full request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut request = CapturedRequest {
        head,
        body: String::new(),
    };
    let body_len: usize = request
        .header("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < head_end + body_len {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed mid-body");
        buf.extend_from_slice(&chunk[..n]);
    }
    request.body = String::from_utf8_lossy(&buf[head_end..head_end + body_len]).into_owned();
    request
}

/// Answer exactly one request on a loopback port with `status` and a JSON
/// `body`. The handle resolves to the request the client sent.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let (listener, url) = bind_local().await;
    let body = body.to_string();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        request
    });
    (url, handle)
}

/// Stream a chunked body of up to `total` bytes without a Content-Length,
/// stopping once the client hangs up. The handle resolves to the number of
/// body bytes the server managed to write.
pub async fn serve_chunked(chunk_size: usize, total: usize) -> (String, JoinHandle<usize>) {
    let (listener, url) = bind_local().await;
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        let head = "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\n\
                    Transfer-Encoding: chunked\r\n\r\n";
        if stream.write_all(head.as_bytes()).await.is_err() {
            return 0;
        }

        let mut frame = format!("{chunk_size:x}\r\n").into_bytes();
        frame.extend(std::iter::repeat(0xAB).take(chunk_size));
        frame.extend_from_slice(b"\r\n");

        let mut written = 0;
        while written < total {
            if stream.write_all(&frame).await.is_err() {
                return written;
            }
            written += chunk_size;
        }
        let _ = stream.write_all(b"0\r\n\r\n").await;
        written
    });
    (url, handle)
}
