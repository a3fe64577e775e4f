use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub listen: Option<String>,
    // SQLite file holding the `activity_zones` table.
    // Defaults to `strava_data.db` in the working directory.
    pub database_path: Option<String>,
    // TrueType/OpenType font used for chart text.
    // If not set, a few common system locations are tried; without any font
    // the chart is rendered without labels.
    pub font_path: Option<String>,
    // Size of the rendered PNG in pixels. Defaults to 700x500.
    pub chart_width: Option<u32>,
    pub chart_height: Option<u32>,
    // Maximum form body size in bytes. Larger requests get 413 Payload Too Large.
    // If not set, defaults to 16 KB.
    pub max_request_body_bytes: Option<usize>,
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let cfg_str = fs::read_to_string(path)?;
        Ok(toml::from_str(&cfg_str)?)
    }
}
