// Interactive picker window.
//
// The eframe app is only a host: it turns egui input into `InputEvent`s for
// the controller and draws whatever the controller pushed to its
// `ViewerSurface`. When the `viewer` feature is disabled (or `cli_only` is
// enabled), `run` returns an error instead of opening a window.

use crate::im::{F32Im, RGBAIm};

/// Colour-maps `raster` with `overlay` on top into `out`.
///
/// Values inside `range` are gray (min black, max white), values above it use
/// `over_color`. Overlay `NaN` cells are transparent and show the raster;
/// raster `NaN` cells are fully transparent.
pub fn colorize(raster: &F32Im, overlay: &F32Im, range: (f32, f32), over_color: [u8; 3], out: &mut RGBAIm) {
    assert_eq!(raster.w, overlay.w, "width mismatch");
    assert_eq!(raster.h, overlay.h, "height mismatch");
    assert_eq!(raster.w, out.w, "width mismatch");
    assert_eq!(raster.h, out.h, "height mismatch");

    let (lo, hi) = range;
    let span = (hi - lo).max(f32::EPSILON);

    for y in 0..raster.h {
        for x in 0..raster.w {
            let o = overlay.arr[y * overlay.s + x];
            let v = if o.is_nan() { raster.arr[y * raster.s + x] } else { o };

            let rgba = if v.is_nan() {
                [0, 0, 0, 0]
            } else if v > hi {
                [over_color[0], over_color[1], over_color[2], 255]
            } else {
                let g = (((v - lo) / span) * 255.0).clamp(0.0, 255.0) as u8;
                [g, g, g, 255]
            };

            let base = y * out.s + x * 4;
            out.arr[base..base + 4].copy_from_slice(&rgba);
        }
    }
}

/// Maps a pointer position over the image rect to data coordinates.
///
/// Fractions are clamped to `[0, 0.999_999]` so a click on the rect's far
/// edge still lands in the last column or row.
pub fn pointer_to_data(pos: [f32; 2], rect_min: [f32; 2], rect_size: [f32; 2], cols: usize, rows: usize) -> (f64, f64) {
    let fx = ((pos[0] - rect_min[0]) / rect_size[0]).clamp(0.0, 0.999_999) as f64;
    let fy = ((pos[1] - rect_min[1]) / rect_size[1]).clamp(0.0, 0.999_999) as f64;
    (fx * cols as f64, fy * rows as f64)
}

#[cfg(all(feature = "viewer", not(feature = "cli_only")))]
mod imp {
    use super::{colorize, pointer_to_data};
    use crate::config::PickerConfig;
    use crate::controller::InputController;
    use crate::display::{ConnectionId, DisplaySurface, PolylineHandle};
    use crate::error::{Result, TransectError};
    use crate::event::{InputEvent, MouseButton};
    use crate::history::Transect;
    use crate::im::{F32Im, RGBAIm, RasterSource};
    use crate::rasterize::Waypoint;
    use eframe::egui;
    use std::sync::{Arc, Mutex};
    use tracing::info;

    /// What the controller has asked the window to show.
    struct ViewerSurface {
        overlay: F32Im,
        polylines: Vec<Vec<Waypoint>>,
        connection: Option<ConnectionId>,
        dirty: bool,
        close_requested: bool,
    }

    impl ViewerSurface {
        fn new(w: usize, h: usize) -> Self {
            Self {
                overlay: F32Im::filled(w, h, f32::NAN),
                polylines: Vec::new(),
                connection: None,
                dirty: true,
                close_requested: false,
            }
        }

        fn listening(&self) -> bool {
            self.connection.is_some()
        }
    }

    impl DisplaySurface for ViewerSurface {
        fn connect_input(&mut self) -> ConnectionId {
            let id = ConnectionId(0);
            self.connection = Some(id);
            id
        }

        fn disconnect_input(&mut self, id: ConnectionId) {
            if self.connection == Some(id) {
                self.connection = None;
            }
        }

        fn set_overlay(&mut self, overlay: &F32Im) {
            self.overlay.clone_from(overlay);
        }

        fn add_polyline(&mut self, points: &[Waypoint]) -> PolylineHandle {
            self.polylines.push(points.to_vec());
            PolylineHandle(self.polylines.len() - 1)
        }

        fn update_polyline(&mut self, handle: PolylineHandle, points: &[Waypoint]) {
            if let Some(line) = self.polylines.get_mut(handle.0) {
                line.clear();
                line.extend_from_slice(points);
            }
        }

        fn request_redraw(&mut self) {
            self.dirty = true;
        }

        fn close(&mut self) {
            self.close_requested = true;
        }
    }

    fn data_coords(rect: egui::Rect, pos: egui::Pos2, cols: usize, rows: usize) -> (f64, f64) {
        pointer_to_data([pos.x, pos.y], [rect.left(), rect.top()], [rect.width(), rect.height()], cols, rows)
    }

    struct PickerApp {
        raster: F32Im,
        range: (f32, f32),
        cfg: PickerConfig,
        controller: InputController<ViewerSurface>,
        rgba: RGBAIm,
        texture: Option<egui::TextureHandle>,
        hover_text: String,
        result: Arc<Mutex<Option<Transect>>>,
    }

    impl PickerApp {
        fn render_if_needed(&mut self, ctx: &egui::Context) {
            let surface = self.controller.surface();
            if !surface.dirty && self.texture.is_some() {
                return;
            }

            colorize(&self.raster, &surface.overlay, self.range, self.cfg.over_color, &mut self.rgba);

            let img = egui::ColorImage::from_rgba_unmultiplied([self.rgba.w, self.rgba.h], &self.rgba.arr);
            match &mut self.texture {
                Some(tex) => tex.set(img, egui::TextureOptions::NEAREST),
                None => self.texture = Some(ctx.load_texture("transect_picker", img, egui::TextureOptions::NEAREST)),
            }

            self.controller.surface_mut().dirty = false;
        }

        /// Pulls this frame's clicks and key presses, in arrival order.
        fn collect_events(&self, ctx: &egui::Context, rect: egui::Rect) -> Vec<InputEvent> {
            let (cols, rows) = (self.raster.w, self.raster.h);
            let keyboard_free = !ctx.wants_keyboard_input();

            ctx.input(|i| {
                i.events
                    .iter()
                    .filter_map(|ev| match ev {
                        egui::Event::PointerButton { pos, button, pressed: true, .. } => {
                            if !rect.contains(*pos) {
                                return Some(InputEvent::ClickOutside);
                            }
                            let button = match button {
                                egui::PointerButton::Primary => MouseButton::Primary,
                                egui::PointerButton::Secondary => MouseButton::Secondary,
                                _ => MouseButton::Middle,
                            };
                            let (x, y) = data_coords(rect, *pos, cols, rows);
                            Some(InputEvent::Click { x, y, button })
                        }
                        egui::Event::Key { key, pressed: true, repeat: false, .. } if keyboard_free => {
                            Some(InputEvent::key(key.name()))
                        }
                        _ => None,
                    })
                    .collect()
            })
        }

        fn paint_polylines(&self, ui: &egui::Ui, rect: egui::Rect) {
            let painter = ui.painter_at(rect);
            let sx = rect.width() / self.raster.w as f32;
            let sy = rect.height() / self.raster.h as f32;
            let [r, g, b] = self.cfg.polyline_color;
            let color = egui::Color32::from_rgb(r, g, b);

            for line in &self.controller.surface().polylines {
                let pts: Vec<egui::Pos2> = line
                    .iter()
                    .map(|p| egui::pos2(rect.left() + p.x as f32 * sx, rect.top() + p.y as f32 * sy))
                    .collect();
                if pts.len() >= 2 {
                    painter.add(egui::Shape::line(pts.clone(), egui::Stroke::new(1.5, color)));
                }
                for p in pts {
                    painter.circle_filled(p, 3.0, color);
                }
            }
        }

        fn hover(&mut self, rect: egui::Rect, pos: egui::Pos2) {
            let (x, y) = data_coords(rect, pos, self.raster.w, self.raster.h);
            let (x, y) = (x as usize, y as usize);
            let v = self.raster.arr[y * self.raster.s + x];
            self.hover_text = format!("x={x} y={y} value={v:.4}");
        }
    }

    impl eframe::App for PickerApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            self.render_if_needed(ctx);

            egui::TopBottomPanel::top("top").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.monospace(format!(
                        "points={} cells={}",
                        self.controller.history().len(),
                        self.controller.history().transect_len()
                    ));
                    if !self.hover_text.is_empty() {
                        ui.separator();
                        ui.monospace(&self.hover_text);
                    }
                });
            });

            egui::TopBottomPanel::bottom("bottom").show(ctx, |ui| {
                ui.monospace(format!(
                    "left: select | right: undo | {}: reset | {}: exit",
                    self.cfg.keys.reset_key, self.cfg.keys.finalize_key
                ));
            });

            let mut image_rect = None;
            egui::CentralPanel::default().show(ctx, |ui| {
                let Some(tex) = &self.texture else { return };
                let scale = self.cfg.cell_scale;
                let size = egui::vec2(self.raster.w as f32 * scale, self.raster.h as f32 * scale);
                let response = ui.add(egui::Image::new((tex.id(), size)));
                let rect = response.rect;

                self.paint_polylines(ui, rect);
                if let Some(pos) = response.hover_pos() {
                    self.hover(rect, pos);
                }
                image_rect = Some(rect);
            });

            if let Some(rect) = image_rect {
                if self.controller.surface().listening() {
                    for event in self.collect_events(ctx, rect) {
                        // Stop as soon as finalize disconnects us.
                        if !self.controller.surface().listening() {
                            break;
                        }
                        if let Some(transect) = self.controller.handle_event(event) {
                            if let Ok(mut out) = self.result.lock() {
                                *out = Some(transect);
                            }
                        }
                    }
                }
            }

            if self.controller.surface().close_requested {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            } else if self.controller.surface().dirty {
                ctx.request_repaint();
            }
        }
    }

    /// Opens the picker over `raster` and blocks until the window closes.
    ///
    /// Returns `None` if the window was closed without pressing the finalize key.
    pub fn run(raster: F32Im, cfg: PickerConfig) -> Result<Option<Transect>> {
        let (rows, cols) = raster.shape();
        let range = raster
            .value_range()
            .ok_or(TransectError::EmptyRaster { rows, cols })?;

        let controller = InputController::new(&raster, ViewerSurface::new(cols, rows), cfg.keys.clone())?;
        let result: Arc<Mutex<Option<Transect>>> = Arc::new(Mutex::new(None));

        let app = PickerApp {
            rgba: RGBAIm::new(cols, rows),
            raster,
            range,
            cfg: cfg.clone(),
            controller,
            texture: None,
            hover_text: String::new(),
            result: Arc::clone(&result),
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1])),
            ..Default::default()
        };

        eframe::run_native(
            "Transect picker",
            options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| TransectError::Viewer(e.to_string()))?;

        let transect = result
            .lock()
            .map_err(|_| TransectError::Viewer("result lock poisoned".to_owned()))?
            .take();
        if transect.is_none() {
            info!("window closed before finalize");
        }
        Ok(transect)
    }
}

/// Stand-in when the window is compiled out.
#[cfg(not(all(feature = "viewer", not(feature = "cli_only"))))]
mod imp {
    use crate::config::PickerConfig;
    use crate::error::{Result, TransectError};
    use crate::history::Transect;
    use crate::im::F32Im;

    pub fn run(_raster: F32Im, _cfg: PickerConfig) -> Result<Option<Transect>> {
        Err(TransectError::Viewer("built without the `viewer` feature".to_owned()))
    }
}

pub use imp::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_on_far_edge_stays_inside_raster() {
        let (min, size) = ([20.0, 40.0], [100.0, 50.0]);

        let (x, y) = pointer_to_data([120.0, 90.0], min, size, 10, 5);
        assert_eq!(crate::Waypoint::snapped(x, y).cell(), (9, 4));

        let (x, y) = pointer_to_data([20.0, 40.0], min, size, 10, 5);
        assert_eq!((x, y), (0.0, 0.0));

        let (x, y) = pointer_to_data([45.0, 65.0], min, size, 10, 5);
        assert_eq!(crate::Waypoint::snapped(x, y).cell(), (2, 2));
    }

    #[test]
    fn colorize_maps_gray_and_over_range() {
        let raster = F32Im::from_fn(3, 1, |x, _| x as f32 * 0.5);
        let mut overlay = F32Im::filled(3, 1, f32::NAN);
        overlay.arr[1] = 2.0;
        let mut out = RGBAIm::new(3, 1);

        colorize(&raster, &overlay, (0.0, 1.0), [255, 0, 0], &mut out);

        assert_eq!(&out.arr[0..4], &[0, 0, 0, 255]);
        assert_eq!(&out.arr[4..8], &[255, 0, 0, 255]);
        assert_eq!(&out.arr[8..12], &[255, 255, 255, 255]);
    }

    #[test]
    fn colorize_leaves_nan_raster_transparent() {
        let raster = F32Im::filled(2, 2, f32::NAN);
        let overlay = F32Im::filled(2, 2, f32::NAN);
        let mut out = RGBAIm::new(2, 2);
        out.fill(7);

        colorize(&raster, &overlay, (0.0, 1.0), [255, 0, 0], &mut out);
        assert!(out.arr.iter().all(|&v| v == 0));
    }

    #[test]
    fn colorize_flat_raster_does_not_divide_by_zero() {
        let raster = F32Im::filled(1, 1, 3.0);
        let overlay = F32Im::filled(1, 1, f32::NAN);
        let mut out = RGBAIm::new(1, 1);

        colorize(&raster, &overlay, (3.0, 3.0), [255, 0, 0], &mut out);
        assert_eq!(out.arr, vec![0, 0, 0, 255]);
    }
}
