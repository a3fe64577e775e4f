use crate::chart::ZoneChart;
use crate::config::Config;
use crate::error::ZoneError;
use ab_glyph::{FontVec, PxScale};
use base64::Engine;
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::io::Cursor;
use tracing::{debug, info, warn};

pub const DEFAULT_WIDTH: u32 = 700;
pub const DEFAULT_HEIGHT: u32 = 500;
const MIN_WIDTH: u32 = 200;
const MIN_HEIGHT: u32 = 150;

// Plot area margins in pixels
const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 70;

const TARGET_TICKS: f64 = 5.0;
const MAX_TICKS: usize = 20;
const BAR_FILL: f32 = 0.7;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);
const GRID_COLOR: Rgba<u8> = Rgba([225, 229, 237, 255]);
pub const BAR_COLOR: Rgba<u8> = Rgba([99, 110, 250, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([42, 63, 95, 255]);

const TITLE_SCALE: f32 = 20.0;
const AXIS_TITLE_SCALE: f32 = 15.0;
const LABEL_SCALE: f32 = 13.0;

// Tried in order when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Rasterizes a [`ZoneChart`] into a fixed-size PNG.
pub struct ChartRenderer {
    width: u32,
    height: u32,
    font: Option<FontVec>,
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32, font: Option<FontVec>) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            font,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let font = load_font(cfg.font_path.as_deref())?;
        if font.is_none() {
            warn!("No usable font found, charts will be rendered without text");
        }
        let renderer = Self::new(
            cfg.chart_width.unwrap_or(DEFAULT_WIDTH),
            cfg.chart_height.unwrap_or(DEFAULT_HEIGHT),
            font,
        );
        let (width, height) = renderer.dimensions();
        debug!(
            "Chart renderer: {}x{} px, text {}",
            width,
            height,
            if renderer.has_font() { "enabled" } else { "disabled" }
        );
        Ok(renderer)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn render_png(&self, chart: &ZoneChart) -> Result<Vec<u8>, ZoneError> {
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);

        let x0 = MARGIN_LEFT as f32;
        let x1 = (self.width - MARGIN_RIGHT) as f32;
        let y0 = MARGIN_TOP as f32;
        let y1 = (self.height - MARGIN_BOTTOM) as f32;
        let plot_h = y1 - y0;

        let (axis_max, step) = value_axis(&chart.values);
        let ticks = ((axis_max / step).round() as usize).min(MAX_TICKS);

        // Grid and tick labels
        for i in 0..=ticks {
            let v = step * i as f64;
            let y = y1 - (v / axis_max) as f32 * plot_h;
            draw_line_segment_mut(&mut canvas, (x0, y), (x1, y), GRID_COLOR);
            self.draw_label(&mut canvas, &format_tick(v, step), Anchor::Right(x0 - 8.0, y));
        }

        // Bars
        let n = chart.values.len().max(1);
        let slot = (x1 - x0) / n as f32;
        let bar_w = ((slot * BAR_FILL).round() as u32).max(1);
        for (i, (category, value)) in chart.categories.iter().zip(&chart.values).enumerate() {
            let center = x0 + slot * (i as f32 + 0.5);
            let h = bar_height(*value, axis_max, plot_h);
            if h > 0 {
                let left = (center - bar_w as f32 / 2.0).round() as i32;
                let rect = Rect::at(left, y1 as i32 - h as i32).of_size(bar_w, h);
                draw_filled_rect_mut(&mut canvas, rect, BAR_COLOR);
            }
            self.draw_label(&mut canvas, category, Anchor::Top(center, y1 + 8.0));
        }

        // Axes on top of grid and bars
        draw_line_segment_mut(&mut canvas, (x0, y0), (x0, y1), AXIS_COLOR);
        draw_line_segment_mut(&mut canvas, (x0, y1), (x1, y1), AXIS_COLOR);

        self.draw_titles(&mut canvas, chart, (x0, x1), (y0, y1));

        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    /// PNG of `chart` as standard base64, ready for a `data:image/png;base64,` URI.
    pub fn render_base64(&self, chart: &ZoneChart) -> Result<String, ZoneError> {
        let png = self.render_png(chart)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(png))
    }

    fn draw_titles(&self, canvas: &mut RgbaImage, chart: &ZoneChart, xs: (f32, f32), ys: (f32, f32)) {
        let Some(font) = &self.font else {
            return;
        };
        let (x0, x1) = xs;
        let (y0, y1) = ys;

        let (tw, th) = text_size(PxScale::from(TITLE_SCALE), font, &chart.title);
        let tx = (self.width as f32 - tw as f32) / 2.0;
        let ty = (y0 - th as f32) / 2.0;
        draw_text_mut(
            canvas,
            TEXT_COLOR,
            tx as i32,
            ty as i32,
            PxScale::from(TITLE_SCALE),
            font,
            &chart.title,
        );

        let (xw, xh) = text_size(PxScale::from(AXIS_TITLE_SCALE), font, &chart.x_title);
        let xt = (x0 + x1 - xw as f32) / 2.0;
        let yt = self.height as f32 - xh as f32 - 12.0;
        draw_text_mut(
            canvas,
            TEXT_COLOR,
            xt as i32,
            yt as i32,
            PxScale::from(AXIS_TITLE_SCALE),
            font,
            &chart.x_title,
        );

        // Vertical title: draw horizontally, then rotate to read bottom-up.
        let (yw, yh) = text_size(PxScale::from(AXIS_TITLE_SCALE), font, &chart.y_title);
        let mut label = RgbaImage::from_pixel(yw + 4, yh + 4, BACKGROUND);
        draw_text_mut(
            &mut label,
            TEXT_COLOR,
            2,
            2,
            PxScale::from(AXIS_TITLE_SCALE),
            font,
            &chart.y_title,
        );
        let rotated = imageops::rotate270(&label);
        let lx = 12_i64;
        let ly = ((y0 + y1) / 2.0 - rotated.height() as f32 / 2.0) as i64;
        imageops::overlay(canvas, &rotated, lx, ly);
    }

    fn draw_label(&self, canvas: &mut RgbaImage, text: &str, anchor: Anchor) {
        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(LABEL_SCALE);
        let (w, h) = text_size(scale, font, text);
        let (x, y) = match anchor {
            Anchor::Right(x, y) => (x - w as f32, y - h as f32 / 2.0),
            Anchor::Top(x, y) => (x - w as f32 / 2.0, y),
        };
        draw_text_mut(canvas, TEXT_COLOR, x as i32, y as i32, scale, font, text);
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    // Text ends at x, vertically centered on y
    Right(f32, f32),
    // Text centered on x, starting at y
    Top(f32, f32),
}

/// Load the configured font, or the first system font that parses.
pub fn load_font(path: Option<&str>) -> anyhow::Result<Option<FontVec>> {
    if let Some(path) = path {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Cannot read font '{}': {}", path, e))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| anyhow::anyhow!("Invalid font '{}': {}", path, e))?;
        info!("Loaded chart font from '{}'", path);
        return Ok(Some(font));
    }

    for candidate in FONT_CANDIDATES {
        if let Ok(bytes) = std::fs::read(candidate) {
            if let Ok(font) = FontVec::try_from_vec(bytes) {
                info!("Loaded chart font from '{}'", candidate);
                return Ok(Some(font));
            }
            debug!("Skipping unparsable font '{}'", candidate);
        }
    }
    Ok(None)
}

/// Axis maximum and tick step for the value axis. The axis always starts at zero.
fn value_axis(values: &[f64]) -> (f64, f64) {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };
    let step = nice_step(max / TARGET_TICKS);
    let axis_max = (max / step).ceil() * step;
    if axis_max.is_finite() {
        (axis_max, step)
    } else {
        // Rounding up overflowed near f64::MAX
        (max, max / TARGET_TICKS)
    }
}

/// Round `raw` up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10_f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn bar_height(value: f64, axis_max: f64, plot_h: f32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / axis_max) as f32 * plot_h).round() as u32
}

fn format_tick(v: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", v)
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{:.*}", decimals, v)
    }
}
