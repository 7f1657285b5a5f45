//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a programmable mock backend on an ephemeral port.
///
/// The handler receives the raw request head and returns status and body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();

                let (status, body) = f(request).await;
                let status_text = match status {
                    200 => "200 OK".to_string(),
                    401 => "401 Unauthorized".to_string(),
                    404 => "404 Not Found".to_string(),
                    500 => "500 Internal Server Error".to_string(),
                    503 => "503 Service Unavailable".to_string(),
                    other => format!("{} Unknown", other),
                };

                let response_str = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Mock backend that answers 200 only when the expected anon key is presented.
pub async fn start_keyed_backend(expected_key: &'static str) -> SocketAddr {
    start_programmable_backend(move |request| async move {
        let lower = request.to_lowercase();
        let has_key = lower.contains(&format!("apikey: {}", expected_key.to_lowercase()));
        let has_bearer =
            lower.contains(&format!("authorization: bearer {}", expected_key.to_lowercase()));
        if has_key && has_bearer {
            (200, r#"{"status":"ok"}"#.to_string())
        } else {
            (401, r#"{"message":"invalid api key"}"#.to_string())
        }
    })
    .await
}

/// Mock backend that writes a fixed raw HTTP response and closes the socket.
pub async fn start_raw_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
