// File: crates/chart-core/src/panel.rs
// Summary: Chart panel: owns render results, routes pointer events to gesture handlers and paints the overlay.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use skia_safe as skia;

use crate::chart::{Chart, RenderOptions, RgbaFrame};
use crate::entity::{shared_render_info, SharedRenderInfo};
use crate::extension::{DatasetExtensionManager, ExtensionChangeEvent, ListenerId};
use crate::geometry;
use crate::interaction::{MouseHandler, PointerEvent, SelectionHost, SelectionOverlay};
use crate::renderer::draw_shape;
use crate::selection::EntitySelectionManager;

/// Hosts one chart and its gesture handlers.
///
/// Event coordinates are device pixels; the chart is drawn in logical pixels
/// scaled by `scale`.
pub struct ChartPanel {
    chart: Chart,
    opts: RenderOptions,
    scale: f32,
    render_info: SharedRenderInfo,
    selection: Option<EntitySelectionManager>,
    selection_listener: Option<ListenerId>,
    handlers: Vec<Box<dyn MouseHandler>>,
    live: Option<usize>,
    overlay: Option<SelectionOverlay>,
    redraw: Rc<Cell<bool>>,
}

impl ChartPanel {
    pub fn new(chart: Chart, opts: RenderOptions) -> Self {
        Self {
            chart,
            opts,
            scale: 1.0,
            render_info: shared_render_info(),
            selection: None,
            selection_listener: None,
            handlers: Vec::new(),
            live: None,
            overlay: None,
            redraw: Rc::new(Cell::new(true)),
        }
    }

    /// Device pixels per logical pixel (HiDPI).
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        self.redraw.set(true);
    }

    pub fn scale(&self) -> f32 { self.scale }

    pub fn chart(&self) -> &Chart { &self.chart }

    pub fn chart_mut(&mut self) -> &mut Chart {
        self.redraw.set(true);
        &mut self.chart
    }

    pub fn options(&self) -> &RenderOptions { &self.opts }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        self.redraw.set(true);
        &mut self.opts
    }

    /// Replace the chart; the selection manager, if any, follows the new dataset.
    pub fn set_chart(&mut self, chart: Chart) {
        let extensions = self.selection.as_ref().map(|m| m.extension_manager().cloned());
        self.disable_selection();
        self.chart = chart;
        *self.render_info.borrow_mut() = None;
        self.overlay = None;
        self.live = None;
        if let Some(extensions) = extensions {
            if let Some(manager) = &extensions {
                manager.prune();
            }
            self.enable_selection(extensions);
        }
        self.redraw.set(true);
    }

    pub fn render_info(&self) -> SharedRenderInfo { self.render_info.clone() }

    /// Govern the chart's dataset with a selection manager sharing this
    /// panel's render results. Selection changes request a redraw.
    pub fn enable_selection(&mut self, extensions: Option<Rc<DatasetExtensionManager>>) {
        self.disable_selection();
        let dataset = self.chart.dataset();
        let mut manager = EntitySelectionManager::new(self.render_info.clone(), vec![dataset.clone()]);
        if let Some(extensions) = extensions {
            manager = manager.with_extension_manager(extensions);
        }
        if let Some(ext) = manager.selection_extension(dataset.as_ref()) {
            let flag = self.redraw.clone();
            let id = ext.add_change_listener(Rc::new(move |_: &ExtensionChangeEvent| flag.set(true)));
            self.selection_listener = Some(id);
        } else {
            log::warn!("dataset {} has no selection support", dataset.id().get());
        }
        self.selection = Some(manager);
    }

    pub fn disable_selection(&mut self) {
        if let (Some(manager), Some(id)) = (self.selection.take(), self.selection_listener.take()) {
            if let Some(ext) = manager.selection_extension(self.chart.dataset().as_ref()) {
                ext.remove_change_listener(id);
            }
        }
    }

    pub fn selection_manager_mut(&mut self) -> Option<&mut EntitySelectionManager> { self.selection.as_mut() }

    pub fn add_handler(&mut self, handler: Box<dyn MouseHandler>) { self.handlers.push(handler); }

    pub fn remove_handler(&mut self, id: &str) -> bool {
        let Some(pos) = self.handlers.iter().position(|h| h.id() == id) else { return false };
        self.handlers.remove(pos);
        self.live = match self.live {
            Some(l) if l == pos => None,
            Some(l) if l > pos => Some(l - 1),
            other => other,
        };
        true
    }

    pub fn handler_ids(&self) -> Vec<&'static str> { self.handlers.iter().map(|h| h.id()).collect() }

    pub fn live_handler(&self) -> Option<&'static str> { self.live.and_then(|i| self.handlers.get(i)).map(|h| h.id()) }

    pub fn overlay(&self) -> Option<&SelectionOverlay> { self.overlay.as_ref() }

    /// Whether a redraw was requested since the last call; resets the flag.
    pub fn take_redraw_request(&self) -> bool { self.redraw.replace(false) }

    /// Device-space size of the panel.
    pub fn device_size(&self) -> (i32, i32) {
        ((self.opts.width as f32 * self.scale).round() as i32, (self.opts.height as f32 * self.scale).round() as i32)
    }

    /// Draw the chart and the live overlay onto a device-sized canvas, and
    /// publish the render results.
    pub fn paint(&self, canvas: &skia::Canvas) {
        canvas.save();
        canvas.scale((self.scale, self.scale));
        let mut info = self.chart.draw(canvas, &self.opts);
        canvas.restore();

        info.scale_x = self.scale;
        info.scale_y = self.scale;
        *self.render_info.borrow_mut() = Some(info);

        if let Some(overlay) = &self.overlay {
            let mut fill = skia::Paint::default();
            fill.set_anti_alias(true);
            fill.set_color(overlay.fill);
            draw_shape(canvas, &overlay.shape, &fill);
            let mut outline = skia::Paint::default();
            outline.set_anti_alias(true);
            outline.set_style(skia::paint::Style::Stroke);
            outline.set_stroke_width(1.0);
            outline.set_color(overlay.outline);
            draw_shape(canvas, &overlay.shape, &outline);
        }
    }

    /// Paint into a device-sized RGBA8888 buffer.
    pub fn render_to_rgba8(&self) -> Result<RgbaFrame> {
        let (w, h) = self.device_size();
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.paint(surface.canvas());

        let image_info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&image_info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read_pixels failed");
        }
        let info = self
            .render_info
            .borrow()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("render results missing after paint"))?;
        Ok(RgbaFrame { pixels, width: w, height: h, stride, info })
    }

    /// Tooltip of the topmost entity under a device-space point.
    pub fn tooltip_at(&self, x: f32, y: f32) -> Option<String> {
        let guard = self.render_info.borrow();
        let info = guard.as_ref()?;
        let (x, y) = (x / info.scale_x, y / info.scale_y);
        info.entities.entity_at(x, y).and_then(|e| e.tooltip.clone())
    }

    // ---- pointer dispatch ---------------------------------------------------

    /// On press without a live handler, the first live-capable handler whose
    /// required modifier is held wins; otherwise the first unrestricted one.
    pub fn mouse_pressed(&mut self, event: &PointerEvent) {
        if self.live.is_none() {
            self.live = pick(&self.handlers, event, |h| h.is_live_handler());
            if let Some(id) = self.live_handler() {
                log::debug!("live handler: {id}");
            }
        }
        if let Some(i) = self.live {
            self.dispatch(i, |h, host| h.mouse_pressed(host, event));
        }
    }

    pub fn mouse_dragged(&mut self, event: &PointerEvent) {
        if let Some(i) = self.live {
            self.dispatch(i, |h, host| h.mouse_dragged(host, event));
        }
    }

    pub fn mouse_released(&mut self, event: &PointerEvent) {
        if let Some(i) = self.live {
            self.dispatch(i, |h, host| h.mouse_released(host, event));
        }
    }

    /// Clicks go to every accepting click handler; handlers requiring a held
    /// modifier shadow unrestricted ones.
    pub fn mouse_clicked(&mut self, event: &PointerEvent) {
        let clickable = |h: &dyn MouseHandler| !h.is_live_handler() && h.accepts(&event.modifiers);
        let restricted = self.handlers.iter().any(|h| clickable(h.as_ref()) && h.required_modifier().is_some());
        let targets: Vec<usize> = self
            .handlers
            .iter()
            .enumerate()
            .filter(|(_, h)| clickable(h.as_ref()) && h.required_modifier().is_some() == restricted)
            .map(|(i, _)| i)
            .collect();
        for i in targets {
            self.dispatch(i, |h, host| h.mouse_clicked(host, event));
        }
    }

    fn dispatch(&mut self, index: usize, f: impl FnOnce(&mut dyn MouseHandler, &mut dyn SelectionHost)) {
        let mut handlers = std::mem::take(&mut self.handlers);
        if let Some(h) = handlers.get_mut(index) {
            f(h.as_mut(), self);
        }
        self.handlers = handlers;
    }
}

fn pick(handlers: &[Box<dyn MouseHandler>], event: &PointerEvent, eligible: impl Fn(&dyn MouseHandler) -> bool) -> Option<usize> {
    let held = handlers.iter().position(|h| {
        eligible(h.as_ref()) && h.required_modifier().is_some_and(|key| event.modifiers.has(key))
    });
    held.or_else(|| handlers.iter().position(|h| eligible(h.as_ref()) && h.required_modifier().is_none()))
}

impl SelectionHost for ChartPanel {
    fn selection_manager(&self) -> Option<&EntitySelectionManager> { self.selection.as_ref() }

    fn data_area(&self) -> Option<skia::Rect> {
        let guard = self.render_info.borrow();
        let info = guard.as_ref()?;
        Some(geometry::scale_rect(&info.data_area, info.scale_x, info.scale_y))
    }

    fn set_overlay(&mut self, overlay: Option<SelectionOverlay>) {
        self.overlay = overlay;
        self.redraw.set(true);
    }

    fn request_redraw(&mut self) { self.redraw.set(true); }

    fn clear_live_handler(&mut self) { self.live = None; }
}
