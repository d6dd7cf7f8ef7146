// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline using Skia CPU raster surfaces.

use std::rc::Rc;

use anyhow::Result;
use skia_safe as skia;

use crate::axis::Axis;
use crate::dataset::Dataset;
use crate::entity::{ChartEntity, EntityCollection, EntityKind, RenderInfo};
use crate::geometry::Shape;
use crate::grid::{linspace, ticks};
use crate::plot::Plot;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Axis labels, title and item labels. Off gives font-independent pixels.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default(), theme: Theme::default(), draw_labels: true }
    }
}

/// Tightly packed RGBA8888 pixels plus the render results of that frame.
pub struct RgbaFrame {
    pub pixels: Vec<u8>,
    pub width: i32,
    pub height: i32,
    pub stride: usize,
    pub info: RenderInfo,
}

impl RgbaFrame {
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride + x as usize * 4;
        self.pixels.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

pub struct Chart {
    pub title: Option<String>,
    pub plot: Plot,
}

impl Chart {
    pub fn new(plot: Plot) -> Self { Self { title: None, plot } }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn dataset(&self) -> Rc<dyn Dataset> { self.plot.dataset() }

    /// Draw the chart onto `canvas` in logical pixels and return the entities
    /// recorded along the way.
    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) -> RenderInfo {
        let theme = &opts.theme;
        let chart_area = skia::Rect::from_iwh(opts.width, opts.height);
        let data_area = opts.insets.data_area(opts.width, opts.height);

        canvas.clear(theme.background);
        let mut bg = skia::Paint::default();
        bg.set_color(theme.plot_background);
        canvas.draw_rect(data_area, &bg);

        let axes = self.plot.axes();
        if axes.is_some() {
            draw_grid(canvas, data_area, theme);
        }

        let mut entities = EntityCollection::new();
        entities.add(ChartEntity::new(Shape::Rect(data_area), EntityKind::PlotArea));
        self.plot.draw(canvas, data_area, &mut entities, opts.draw_labels);

        if let Some((x, y)) = &axes {
            draw_axes(canvas, data_area, x, y, theme, opts.draw_labels);
        }
        if let (Some(title), true) = (&self.title, opts.draw_labels) {
            draw_title(canvas, title, chart_area, theme);
        }

        log::trace!("chart drawn with {} entities", entities.len());
        let mut info = RenderInfo::new(chart_area, data_area);
        info.entities = entities;
        info
    }

    /// Render into a tightly packed RGBA8888 (unpremultiplied) buffer.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<RgbaFrame> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let info = self.draw(surface.canvas(), opts);

        let image_info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&image_info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read_pixels failed");
        }
        Ok(RgbaFrame { pixels, width: opts.width, height: opts.height, stride, info })
    }

    /// Render to an in-memory PNG.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, area: skia::Rect, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for x in linspace(area.left as f64, area.right as f64, 10) {
        canvas.draw_line((x as f32, area.top), (x as f32, area.bottom), &paint);
    }
    for y in linspace(area.top as f64, area.bottom as f64, 6) {
        canvas.draw_line((area.left, y as f32), (area.right, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, area: skia::Rect, x: &Axis, y: &Axis, theme: &Theme, labels: bool) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    let (l, t, r, b) = (area.left, area.top, area.right, area.bottom);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);

    if !labels {
        return;
    }
    let mut paint_text = skia::Paint::default();
    paint_text.set_anti_alias(true);
    paint_text.set_color(theme.axis_label);
    let mut font = skia::Font::default();
    font.set_size(12.0);

    for v in ticks(y.min, y.max, 5) {
        let py = y.to_px(v, b, t);
        canvas.draw_str(format!("{v}"), (l - 48.0, py + 4.0), &font, &paint_text);
    }
    font.set_size(14.0);
    canvas.draw_str(&x.label, (r - 80.0, b + 36.0), &font, &paint_text);
    canvas.draw_str(&y.label, (l - 56.0, t - 6.0), &font, &paint_text);
}

fn draw_title(canvas: &skia::Canvas, title: &str, chart_area: skia::Rect, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.axis_label);
    let mut font = skia::Font::default();
    font.set_size(16.0);
    let (w, _) = font.measure_str(title, Some(&paint));
    canvas.draw_str(title, (chart_area.center_x() - w * 0.5, 18.0), &font, &paint);
}
