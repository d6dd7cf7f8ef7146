// File: crates/window-demo/src/main.rs
// Summary: Windowed selection demo: chart-core panel blitted via softbuffer, pointer gestures fed from winit.

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use chart_core::{
    Chart, ChartPanel, CircularSelectionHandler, ClickSelectionHandler, DatasetExtensionManager,
    DefaultCategoryDataset, DefaultPieDataset, ModifierKey, Modifiers, Plot, PointerEvent, RegionSelectionHandler,
    RenderOptions, SelectionAwarePaintIrs, SelectionExtension, SelectionMode, Theme, XySeries, XySeriesCollection,
};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Event, KeyboardInput, ModifiersState, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Pointer travel (device px) below which a press/release pair is a click.
const CLICK_SLOP: f64 = 3.0;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().filter_level(log::LevelFilter::Info).init();

    let theme = std::env::args().nth(1).map(|name| chart_core::theme::find(&name)).unwrap_or_default();
    let extensions = Rc::new(DatasetExtensionManager::new());
    let builders: [fn(&Theme, &Rc<DatasetExtensionManager>) -> Result<Chart>; 3] = [xy_chart, bar_chart, pie_chart];
    let mut idx = 0usize;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Constellation Select")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let scale = window.scale_factor() as f32;
    let mut panel = ChartPanel::new(builders[idx](&theme, &extensions)?, options(window.inner_size(), scale, theme))
        .with_scale(scale);
    panel.enable_selection(Some(extensions.clone()));
    panel.add_handler(Box::new(RegionSelectionHandler::new()));
    panel.add_handler(Box::new(CircularSelectionHandler::new().requiring(ModifierKey::Ctrl)));
    panel.add_handler(Box::new(ClickSelectionHandler::new()));

    let mut modifiers = Modifiers::NONE;
    let mut cursor = PhysicalPosition::new(0.0, 0.0);
    let mut pressed_at: Option<PhysicalPosition<f64>> = None;
    let mut dragged = false;

    log::info!("drag: rectangle, ctrl+drag: circle, shift: add; tab: next chart, i: toggle intersection, c: clear");

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        let pointer = |p: PhysicalPosition<f64>, m: Modifiers| PointerEvent { x: p.x as f32, y: p.y as f32, modifiers: m };
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    let scale = panel.scale();
                    *panel.options_mut() = options(size, scale, theme);
                }
                WindowEvent::ScaleFactorChanged { scale_factor, new_inner_size } => {
                    panel.set_scale(scale_factor as f32);
                    *panel.options_mut() = options(*new_inner_size, scale_factor as f32, theme);
                }
                WindowEvent::ModifiersChanged(state) => modifiers = to_modifiers(state),
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = position;
                    if let Some(start) = pressed_at {
                        let (dx, dy) = (position.x - start.x, position.y - start.y);
                        if dragged || dx.hypot(dy) > CLICK_SLOP {
                            dragged = true;
                            panel.mouse_dragged(&pointer(position, modifiers));
                        }
                    } else {
                        let tip = panel.tooltip_at(position.x as f32, position.y as f32);
                        window.set_title(tip.as_deref().unwrap_or("Constellation Select"));
                    }
                }
                WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                    ElementState::Pressed => {
                        pressed_at = Some(cursor);
                        dragged = false;
                        panel.mouse_pressed(&pointer(cursor, modifiers));
                    }
                    ElementState::Released => {
                        panel.mouse_released(&pointer(cursor, modifiers));
                        if pressed_at.take().is_some() && !dragged {
                            panel.mouse_clicked(&pointer(cursor, modifiers));
                        }
                    }
                },
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => *cf = ControlFlow::Exit,
                    VirtualKeyCode::Tab => {
                        idx = (idx + 1) % builders.len();
                        match builders[idx](&theme, &extensions) {
                            Ok(chart) => panel.set_chart(chart),
                            Err(e) => log::error!("chart build failed: {e:#}"),
                        }
                    }
                    VirtualKeyCode::I => {
                        if let Some(manager) = panel.selection_manager_mut() {
                            let next = match manager.mode() {
                                SelectionMode::Containment => SelectionMode::Intersection,
                                SelectionMode::Intersection => SelectionMode::Containment,
                            };
                            manager.set_mode(next);
                            log::info!("selection mode: {next:?}");
                        }
                    }
                    VirtualKeyCode::C => {
                        if let Some(manager) = panel.selection_manager_mut() {
                            manager.clear_selection();
                        }
                    }
                    _ => {}
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                if panel.take_redraw_request() {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&panel, &mut surface) {
                    log::error!("present failed: {e:#}");
                }
            }
            _ => {}
        }
    })
}

fn options(size: winit::dpi::PhysicalSize<u32>, scale: f32, theme: Theme) -> RenderOptions {
    let scale = scale.max(0.1);
    RenderOptions {
        width: ((size.width.max(1) as f32) / scale).round().max(1.0) as i32,
        height: ((size.height.max(1) as f32) / scale).round().max(1.0) as i32,
        theme,
        ..Default::default()
    }
}

fn to_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers { shift: state.shift(), ctrl: state.ctrl(), alt: state.alt(), meta: state.logo() }
}

/// Render the panel and blit it as 0RGB words.
fn present(panel: &ChartPanel, surface: &mut softbuffer::Surface) -> Result<()> {
    let frame = panel.render_to_rgba8()?;
    let (w, h) = (frame.width.max(1) as u32, frame.height.max(1) as u32);
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else { return Ok(()) };
    surface.resize(nw, nh).map_err(|e| anyhow::anyhow!("resize: {e}"))?;

    let mut buffer = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;
    for (dst, px) in buffer.iter_mut().zip(frame.pixels.chunks_exact(4)) {
        *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
    }
    buffer.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}

fn highlighted(mut plot: Plot, theme: &Theme, extensions: &Rc<DatasetExtensionManager>) -> Plot {
    let (fill, outline) = (theme.selection, theme.axis_label);
    let extensions = extensions.clone();
    plot.renderer_mut().decorate_paint_irs(move |inner| {
        Box::new(
            SelectionAwarePaintIrs::new(inner)
                .with_extension_manager(extensions)
                .with_fill_highlight(fill)
                .with_outline_highlight(outline),
        )
    });
    plot
}

fn xy_chart(theme: &Theme, extensions: &Rc<DatasetExtensionManager>) -> Result<Chart> {
    let series = (0..3)
        .map(|s| {
            let data = (0..120)
                .map(|i| {
                    let x = i as f64 * 0.1;
                    let y = (x * (1.0 + s as f64 * 0.3)).sin() * (2.0 + s as f64) + s as f64 * 2.0;
                    (x, y)
                })
                .collect();
            XySeries::with_data(format!("Series {}", s + 1), data)
        })
        .collect();
    let ds = Rc::new(XySeriesCollection::from_series(series)?);
    ds.enable_selection();
    let mut plot = Plot::xy(ds, theme);
    if let Plot::Xy(xy) = &mut plot {
        xy.renderer.base.styles.default_shape = chart_core::ItemShape::Circle { radius: 3.5 };
    }
    Ok(Chart::new(highlighted(plot, theme, extensions)).with_title("XY series"))
}

fn bar_chart(theme: &Theme, extensions: &Rc<DatasetExtensionManager>) -> Result<Chart> {
    let ds = Rc::new(DefaultCategoryDataset::new());
    for (r, row) in ["North", "South", "East"].into_iter().enumerate() {
        for (c, col) in ["Jan", "Feb", "Mar", "Apr", "May", "Jun"].into_iter().enumerate() {
            ds.set_value(3.0 + ((r * 7 + c * 3) % 9) as f64, row, col);
        }
    }
    extensions.register_selection(SelectionExtension::attach(&ds));
    Ok(Chart::new(highlighted(Plot::category(ds, theme), theme, extensions)).with_title("Monthly sales"))
}

fn pie_chart(theme: &Theme, extensions: &Rc<DatasetExtensionManager>) -> Result<Chart> {
    let ds = Rc::new(DefaultPieDataset::new());
    for (k, v) in [("Parsing", 30.0), ("Codegen", 25.0), ("Linking", 15.0), ("Tests", 20.0), ("Docs", 10.0)] {
        ds.set_value(k, v);
    }
    extensions.register_selection(SelectionExtension::attach(&ds));
    Ok(Chart::new(highlighted(Plot::pie(ds, theme), theme, extensions)).with_title("Build time"))
}
