//! HTTP server for the localized site.
//!
//! Built on `tiny_http` with the following features:
//!
//! - Static files from `content.public`, served before routing
//! - Language routing with `302` redirects for `/` and unsupported prefixes
//! - Server-rendered views with `404` for unknown routes and missing content
//! - Content and translation reload on change (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!   Site::render(url)        Site::reload()
//!   (tokio block_on)     (index + translator swap)
//!          │                       │
//!          └──────── Arc<Site> ────┘
//! ```

use crate::{
    config::SiteConfig,
    i18n::Lang,
    log,
    site::{Rendered, Site},
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result};
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};
use tokio::runtime::Runtime;

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the server with optional file watching.
///
/// This function:
/// 1. Opens the site (content index and translations)
/// 2. Binds to the configured interface and port (with auto-retry on port conflict)
/// 3. Sets up Ctrl+C handler for graceful shutdown
/// 4. Spawns file watcher thread (if enabled)
/// 5. Enters the main request handling loop
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site(config: SiteConfig) -> Result<()> {
    let interface: IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;
    let watch = config.serve.watch;

    let site = Arc::new(Site::open(config)?);
    let assets = site.resolver().index().len();
    log!("content"; "indexed {assets} assets");

    let runtime = Runtime::new().context("Failed to start async runtime")?;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if watch {
        let site = Arc::clone(&site);
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(&*site) {
                log!("watch"; "{err}");
            }
        });
    }

    // Handle requests in main thread (blocks until Ctrl+C)
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &site, &runtime) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Request resolution order:
/// 1. File under `content.public` → serve file
/// 2. Everything else → route and render
fn handle_request(request: Request, site: &Site, runtime: &Runtime) -> Result<()> {
    let url = request.url().to_owned();

    if let Some(path) = public_file(&site.config().content.public, &url) {
        return serve_file(request, &path);
    }

    let locale = header_value(&request, "Accept-Language")
        .as_deref()
        .and_then(Lang::primary_tag)
        .map(str::to_owned);

    match runtime.block_on(site.render(&url, locale.as_deref())) {
        Rendered::Redirect { to } => serve_redirect(request, &to),
        Rendered::Page { status, html } => serve_html(request, status, html),
    }
}

/// Map a request URL onto a file under `public`, if one exists.
///
/// Rejects any path that would leave `public`.
fn public_file(public: &Path, url: &str) -> Option<PathBuf> {
    // Decode URL-encoded characters (e.g., %20 → space)
    let decoded = urlencoding::decode(url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| url.to_owned());

    // Strip query string and fragment before resolving path
    let path = decoded.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_start_matches('/'));

    if relative.as_os_str().is_empty()
        || !relative.components().all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let local = public.join(relative);
    local.is_file().then_some(local)
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_owned())
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content).with_header(header("Content-Type", guess_content_type(path))?);

    request.respond(response)?;
    Ok(())
}

/// Serve rendered HTML with `status`.
fn serve_html(request: Request, status: u16, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", "text/html; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

/// Serve `302 Found` pointing at `to`.
fn serve_redirect(request: Request, to: &str) -> Result<()> {
    let response = Response::empty(StatusCode(302)).with_header(header("Location", to)?);
    request.respond(response)?;
    Ok(())
}

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field, value).map_err(|()| anyhow::anyhow!("invalid header `{field}: {value}`"))
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("webmanifest") => "application/manifest+json",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}
