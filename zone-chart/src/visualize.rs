use crate::chart::ZoneChart;
use crate::error::ZoneError;
use crate::page;
use crate::render::ChartRenderer;
use crate::state::AppState;
use crate::store::ZoneStore;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Deserialize)]
pub struct VisualizeForm {
    pub activity_id: String,
}

/// Chart data together with its base64 PNG rendering.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub chart: ZoneChart,
    pub plot_image: String,
}

/// Fetch the zones of `activity_id` and render them.
///
/// `Ok(None)` when the activity has no zone record or an empty one; the
/// renderer is not invoked in that case.
pub fn visualize_activity(
    store: &ZoneStore,
    renderer: &ChartRenderer,
    activity_id: &str,
) -> Result<Option<RenderedChart>, ZoneError> {
    let zones = match store.fetch_zones(activity_id)? {
        Some(z) if !z.is_empty() => z,
        _ => return Ok(None),
    };

    let chart = ZoneChart::from_zones(activity_id, &zones);
    let plot_image = renderer.render_base64(&chart)?;
    debug!(
        activity_id,
        bars = chart.categories.len(),
        bytes = plot_image.len(),
        "Rendered zone chart"
    );
    Ok(Some(RenderedChart { chart, plot_image }))
}

pub async fn visualize_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VisualizeForm>,
) -> Response {
    let activity_id = form.activity_id;
    debug!("Received visualize request for activity {}", activity_id);

    // SQLite access and rasterization are blocking
    let task_state = state.clone();
    let task_id = activity_id.clone();
    let result = tokio::task::spawn_blocking(move || {
        visualize_activity(&task_state.store, &task_state.renderer, &task_id)
    })
    .await
    .map_err(ZoneError::from)
    .and_then(|r| r);

    match result {
        Ok(Some(rendered)) => {
            info!(
                "Rendered {} zone(s) for activity {}",
                rendered.chart.categories.len(),
                activity_id
            );
            Html(page::visualize_page(&activity_id, &rendered.plot_image)).into_response()
        }
        Ok(None) => {
            warn!("No zone data found for activity {}", activity_id);
            (
                StatusCode::BAD_REQUEST,
                format!("Error: No zone data found for activity ID {}", activity_id),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to visualize activity {}: {}", activity_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: failed to visualize zones for activity ID {}", activity_id),
            )
                .into_response()
        }
    }
}
