//! Embedded keypad pages.
//!
//! The two page variants are compiled into the binary; there is nothing to
//! deploy next to it.

use axum::response::Html;

/// The standard calculator page (sign toggle and percentage keys).
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// The dashboard variant (backspace key instead of sign/percent).
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/dashboard.html"))
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
