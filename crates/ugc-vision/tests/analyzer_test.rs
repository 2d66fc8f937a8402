//! Upload validation on disk and the HTTP analyzer against a local stub server

use std::time::Duration;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use ugc_types::{Error, ValidationError};
use ugc_vision::{HttpAnalyzer, ImageAnalyzer, ImageUpload, MAX_UPLOAD_BYTES};

fn write_png(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(4, 4).save(&path).unwrap();
    path
}

#[test]
fn test_png_file_is_encoded() {
    let dir = tempdir().unwrap();
    let path = write_png(dir.path(), "shoe.png");
    let upload = ImageUpload::from_path(&path).unwrap();
    assert_eq!(upload.file_name, "shoe.png");
    assert_eq!(upload.mime, "image/png");
    assert!(upload.data_uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn test_oversized_file_rejected_before_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.png");
    let file = std::fs::File::create(&path).unwrap();
    // Sparse 20 MB file; the content is never read
    file.set_len(20 * 1024 * 1024).unwrap();
    assert!(20 * 1024 * 1024 > MAX_UPLOAD_BYTES);

    let err = ImageUpload::from_path(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::FileTooLarge { .. })
    ));
}

#[test]
fn test_text_file_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not an image").unwrap();
    assert!(matches!(
        ImageUpload::from_path(&path),
        Err(Error::Validation(ValidationError::NotAnImage(_)))
    ));

    let disguised = dir.path().join("notes.jpg");
    std::fs::write(&disguised, "not an image").unwrap();
    assert!(matches!(
        ImageUpload::from_path(&disguised),
        Err(Error::Validation(ValidationError::NotAnImage(_)))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        ImageUpload::from_path(std::path::Path::new("/definitely/not/here.png")),
        Err(Error::FileNotFound(_))
    ));
}

/// Serve one canned HTTP response and return the request line that was received
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });
    (format!("http://{}", addr), handle)
}

fn sample_upload() -> ImageUpload {
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    ImageUpload::from_bytes("shoe.png", &png).unwrap()
}

#[tokio::test]
async fn test_product_analysis_success() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"success": true, "analysis": {"product_name": "Air Runner", "product_type": "Sneaker", "detailed_description": "Black leather sneaker", "key_features": ["leather"], "suggested_setting": "unboxing", "emotional_appeal": "confidence"}}"#,
    )
    .await;
    let analyzer = HttpAnalyzer::new(&url, Duration::from_secs(5)).unwrap();
    let analysis = analyzer.analyze_product(&sample_upload()).await.unwrap();
    assert_eq!(analysis.product_name, "Air Runner");
    assert_eq!(analysis.detailed_description, "Black leather sneaker");

    let request_line = server.await.unwrap();
    assert_eq!(request_line, "POST /analyze HTTP/1.1");
}

#[tokio::test]
async fn test_remote_error_message_is_surfaced() {
    let (url, server) = serve_once(
        "500 Internal Server Error",
        r#"{"error": "Failed to analyze scene: quota"}"#,
    )
    .await;
    let analyzer = HttpAnalyzer::new(&url, Duration::from_secs(5)).unwrap();
    let err = analyzer.analyze_scene(&sample_upload()).await.unwrap_err();
    match err {
        Error::Remote(message) => assert_eq!(message, "Failed to analyze scene: quota"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.await.unwrap(), "POST /analyze-scene HTTP/1.1");
}

#[tokio::test]
async fn test_success_false_is_remote_error() {
    let (url, _server) = serve_once("200 OK", r#"{"success": false}"#).await;
    let analyzer = HttpAnalyzer::new(&url, Duration::from_secs(5)).unwrap();
    let err = analyzer.analyze_actor(&sample_upload()).await.unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let analyzer = HttpAnalyzer::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let err = analyzer.analyze_product(&sample_upload()).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
