use crate::config::Config;
use crate::render::ChartRenderer;
use crate::store::ZoneStore;
use tracing::{debug, info};

pub struct AppState {
    pub store: ZoneStore,
    pub renderer: ChartRenderer,
    pub max_request_body_bytes: usize,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let db_path = cfg
            .database_path
            .clone()
            .unwrap_or_else(|| "strava_data.db".into());
        let store = ZoneStore::new(db_path);
        info!("Zone store: '{}'", store.db_path().display());

        let renderer = ChartRenderer::from_config(cfg)?;

        // Form posts carry a single short field
        const DEFAULT_MAX_BODY_BYTES: usize = 16_384;
        let max_request_body_bytes = cfg.max_request_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        debug!("Maximum request body size: {} bytes", max_request_body_bytes);

        Ok(AppState {
            store,
            renderer,
            max_request_body_bytes,
        })
    }
}
