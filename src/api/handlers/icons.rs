//! Token icon handler

use axum::extract::Path;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::response::IntoResponse;
use axum::response::Response;
use tracing::debug;

use super::job_helpers::bad_request;
use super::job_helpers::parse_network_id;
use super::AppState;
use crate::api::metrics;
use crate::icons::content_type::ICON_EXTENSIONS;
use crate::icons::normalize_address;

const ICON_CACHE_CONTROL: &str = "public, max-age=3600";

/// Serve a token icon (GET /icons/:network_id/:address)
///
/// `address` may carry an image extension (`0xabc.png`); it is ignored.
pub async fn get_icon(
    State(state): State<AppState>,
    Path((raw_network, raw_address)): Path<(String, String)>,
) -> Response {
    let network_id = match parse_network_id(&raw_network) {
        Ok(id) => id,
        Err(e) => return bad_request(&e),
    };
    let address = match normalize_address(strip_image_extension(&raw_address)) {
        Ok(address) => address,
        Err(e) => return bad_request(&e),
    };

    let icon = state.icon_resolver.resolve(network_id, &address).await;
    debug!(
        "Icon {}/{} served from {}",
        network_id,
        address,
        icon.source.as_str()
    );

    if let Some(m) = metrics::get_metrics() {
        m.icon_requests
            .with_label_values(&[icon.source.as_str()])
            .inc();
    }

    (
        [
            (header::CONTENT_TYPE, icon.content_type),
            (header::CACHE_CONTROL, ICON_CACHE_CONTROL.to_string()),
            (
                HeaderName::from_static("x-icon-source"),
                icon.source.as_str().to_string(),
            ),
        ],
        icon.bytes,
    )
        .into_response()
}

fn strip_image_extension(address: &str) -> &str {
    match address.rsplit_once('.') {
        Some((stem, ext)) if ICON_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => stem,
        _ => address,
    }
}
