//! One-shot HTTP responder for exercising the reqwest transport.
//!
//! The stub accepts a single connection, captures the raw request head, and
//! replies with a canned response before closing the socket.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned response written back to the client.
pub struct StubResponse {
    pub status_line: &'static str,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl StubResponse {
    pub fn json(status_line: &'static str, body: &serde_json::Value) -> Self {
        Self {
            status_line,
            content_type: Some("application/json"),
            body: body.to_string(),
        }
    }

    pub fn text(status_line: &'static str, body: &str) -> Self {
        Self {
            status_line,
            content_type: Some("text/plain"),
            body: body.to_owned(),
        }
    }

    fn render(&self) -> String {
        let mut head = format!(
            "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n",
            self.status_line,
            self.body.len()
        );
        if let Some(content_type) = self.content_type {
            head.push_str(&format!("content-type: {content_type}\r\n"));
        }
        format!("{head}\r\n{}", self.body)
    }
}

/// Running stub bound to an ephemeral local port.
pub struct HttpStub {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl HttpStub {
    /// Bind and serve `response` to the first connection.
    pub async fn serve(response: StubResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept connection");
            let request = read_request(&mut socket).await;
            socket
                .write_all(response.render().as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.expect("close stub socket");
            request
        });
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Raw request text received by the stub.
    pub async fn received(self) -> String {
        self.handle.await.expect("stub task completes")
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut received = Vec::new();
    let mut buffer = [0_u8; 1024];
    loop {
        let read = socket.read(&mut buffer).await.expect("read request");
        if read == 0 {
            break;
        }
        received.extend_from_slice(buffer.get(..read).expect("read within buffer"));
        if let Some(head_end) = find_head_end(&received) {
            let head = received.get(..head_end).unwrap_or_default();
            let expected = head_end + content_length(head);
            if received.len() >= expected {
                break;
            }
        }
    }
    String::from_utf8_lossy(&received).into_owned()
}

fn find_head_end(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|position| position + 4)
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0)
}

/// Address of a port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}")
}
