//! Tiered content fetching
//!
//! One bounded GET per article. Servers that understand the markdown
//! content negotiation return ready-to-use text on the cheap path; everyone
//! else gets the streaming HTML extractor. Every failure mode is folded
//! into a [`FetchOutcome`], so a single bad URL can never abort a batch.

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::domains;
use crate::error::EnrichError;
use crate::extract::extract_readable_text;
use crate::types::{FetchMethod, FetchOutcome};
use crate::DEFAULT_USER_AGENT;

/// Content negotiation preferring the structured markdown representation.
const ACCEPT_MARKDOWN: &str = "text/markdown, text/html;q=0.9";

/// Response header carrying the server-declared markdown token count.
const TOKEN_COUNT_HEADER: &str = "x-markdown-tokens";

/// Total per-request timeout (connect and read).
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Extractions shorter than this are treated as paywalled or JS-rendered
/// shells rather than article text.
const MIN_EXTRACT_CHARS: usize = 100;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Build the shared HTTP client used for a whole enrichment run.
pub fn http_client() -> Result<Client, EnrichError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MARKDOWN));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

    Client::builder()
        .default_headers(headers)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(EnrichError::ClientBuild)
}

/// Fetch full text for one URL, bounded to `max_chars` characters.
///
/// Never fails: deny-listed hosts, transport errors, non-2xx statuses and
/// undersized extractions all come back as outcomes with empty text.
pub async fn fetch_full_text(client: &Client, url: &str, max_chars: usize) -> FetchOutcome {
    let host = domains::host_for_url(url);
    if domains::is_denied(&host) {
        debug!(url, host, "deny-listed host, skipping fetch");
        return FetchOutcome::skipped(format!("domain {host} in deny list"));
    }

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => return FetchOutcome::error(describe_transport_error(&err)),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::error(format!("HTTP {}", status.as_u16()));
    }

    let headers = response.headers().clone();
    let raw = match response.bytes().await {
        Ok(raw) => raw,
        Err(err) => return FetchOutcome::error(describe_transport_error(&err)),
    };

    let text = match decode_body(&raw) {
        Ok(text) => text,
        Err(err) => return FetchOutcome::error(format!("gzip decode failed: {err}")),
    };

    if header_str(&headers, CONTENT_TYPE.as_str()).contains("text/markdown") {
        let tokens = declared_tokens(header_str(&headers, TOKEN_COUNT_HEADER), &text);
        return FetchOutcome {
            text: truncate_chars(&text, max_chars),
            method: FetchMethod::CfMarkdown,
            tokens,
            error: None,
        };
    }

    let extracted = extract_readable_text(&text);
    if extracted.chars().count() < MIN_EXTRACT_CHARS {
        return FetchOutcome {
            text: String::new(),
            method: FetchMethod::HtmlTooShort,
            tokens: 0,
            error: Some("extracted text too short".to_string()),
        };
    }

    let text = truncate_chars(&extracted, max_chars);
    let tokens = (text.chars().count() / 4) as u64;
    FetchOutcome {
        text,
        method: FetchMethod::HtmlExtract,
        tokens,
        error: None,
    }
}

/// Gunzip bodies that arrive compressed without a transport
/// `Content-Encoding`, then decode as UTF-8 with lossy replacement.
fn decode_body(raw: &[u8]) -> std::io::Result<String> {
    if raw.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        GzDecoder::new(raw).read_to_end(&mut inflated)?;
        return Ok(String::from_utf8_lossy(&inflated).into_owned());
    }
    Ok(String::from_utf8_lossy(raw).into_owned())
}

/// Server-declared token count when the header is plain decimal digits,
/// otherwise a chars/4 estimate over the full decoded text.
fn declared_tokens(header: &str, text: &str) -> u64 {
    if !header.is_empty() && header.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(tokens) = header.parse() {
            return tokens;
        }
    }
    (text.chars().count() / 4) as u64
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Keep at most `max_chars` characters, never splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Compact reason for a transport failure, taken from the deepest cause.
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }
    let mut cause: &dyn std::error::Error = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
