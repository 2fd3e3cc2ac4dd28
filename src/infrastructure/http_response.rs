// HTTP response utilities for the rendered dashboard page
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Whether the client advertised Brotli in `Accept-Encoding`
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

/// Build an HTML response, optionally Brotli-compressed
pub async fn html_response(html: String, compress: bool) -> Result<Response<Body>, StatusCode> {
    let html_bytes = html.into_bytes();

    let (body_bytes, content_encoding) = if compress {
        let original_len = html_bytes.len();
        let mut encoder = BrotliEncoder::new(html_bytes.as_slice());
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed page: {} -> {} bytes", original_len, compressed.len());
        (compressed, Some("br"))
    } else {
        (html_bytes, None)
    };

    let content_length = HeaderValue::from_str(&body_bytes.len().to_string())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, content_length);

    if let Some(encoding) = content_encoding {
        response_builder = response_builder
            .header(header::CONTENT_ENCODING, encoding)
            .header(header::VARY, "accept-encoding");
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br"));
        assert!(accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_plain_html_response() {
        let response = html_response("<p>hi</p>".to_string(), false).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>hi</p>");
    }

    #[tokio::test]
    async fn test_brotli_html_response() {
        let html = "<div class=\"card\">".repeat(64);
        let response = html_response(html.clone(), true).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.len() < html.len());

        let mut decoder = BrotliDecoder::new(&body[..]);
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).await.unwrap();
        assert_eq!(decoded, html);
    }
}
