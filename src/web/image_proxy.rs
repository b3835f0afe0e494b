//! Image proxy - relays remote images through the site origin.
//!
//! Lets the front-end embed external images without mixed-content or
//! hotlinking issues. Only `image/*` responses within the upload size
//! limit are relayed, and the response carries long-lived cache headers
//! so browsers and the CDN keep the bytes.

use actix_web::http::header;
use actix_web::{error, get, web, Error, HttpResponse};
use serde::Deserialize;
use std::time::Duration;

use crate::constants::MAX_UPLOAD_SIZE;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(proxy_image);
}

/// Maximum time to wait for the remote fetch.
const FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
pub struct ProxyQuery {
    url: String,
}

#[get("/api/image-proxy")]
async fn proxy_image(query: web::Query<ProxyQuery>) -> Result<HttpResponse, Error> {
    let parsed_url =
        url::Url::parse(&query.url).map_err(|_| error::ErrorBadRequest("Invalid URL"))?;
    match parsed_url.scheme() {
        "http" | "https" => {}
        _ => return Err(error::ErrorBadRequest("Only HTTP/HTTPS URLs are supported")),
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .user_agent("Mozilla/5.0 (compatible; BouwcmsBot/1.0)")
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| {
            log::error!("Failed to create HTTP client: {}", e);
            error::ErrorInternalServerError("Proxy error")
        })?;

    let response = client.get(parsed_url).send().await.map_err(|e| {
        log::debug!("Image fetch failed for {}: {}", query.url, e);
        error::ErrorBadGateway("Failed to fetch image")
    })?;
    if !response.status().is_success() {
        return Err(error::ErrorBadGateway("Failed to fetch image"));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();
    if !content_type.starts_with("image/") {
        return Err(error::ErrorBadRequest("URL does not return an image"));
    }

    // The declared length rejects oversized bodies before download;
    // the actual length catches servers that lie.
    if let Some(length) = response.content_length() {
        if length > MAX_UPLOAD_SIZE as u64 {
            return Err(error::ErrorBadRequest("Image exceeds the 10 MB limit"));
        }
    }
    let body = response.bytes().await.map_err(|e| {
        log::debug!("Image read failed for {}: {}", query.url, e);
        error::ErrorBadGateway("Failed to fetch image")
    })?;
    if body.len() > MAX_UPLOAD_SIZE {
        return Err(error::ErrorBadRequest("Image exceeds the 10 MB limit"));
    }

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            header::CACHE_CONTROL,
            "public, max-age=31536000, immutable",
        ))
        .body(body))
}
