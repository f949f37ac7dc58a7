use crate::display::{DisplaySurface, PolylineHandle};
use crate::history::{SelectionHistory, Transect};
use crate::im::F32Im;
use tracing::warn;

/// Owns the highlight layer drawn over the raster.
///
/// The overlay has the raster's shape and holds `NaN` ("no data") except on
/// transect cells, which hold a value above the raster's maximum so the
/// colour map renders them in its over-range colour.
#[derive(Debug)]
pub struct OverlayRenderer {
    overlay: F32Im,
    over_value: f32,
    polyline: Option<PolylineHandle>,
}

impl OverlayRenderer {
    /// `shape` is `(rows, cols)` of the raster.
    pub fn new(shape: (usize, usize), over_value: f32) -> Self {
        let (rows, cols) = shape;
        Self {
            overlay: F32Im::filled(cols, rows, f32::NAN),
            over_value,
            polyline: None,
        }
    }

    /// Sentinel for a raster whose values span `range`.
    pub fn over_value_for(range: (f32, f32)) -> f32 {
        range.1 + 1.0
    }

    pub fn overlay(&self) -> &F32Im {
        &self.overlay
    }

    pub fn over_value(&self) -> f32 {
        self.over_value
    }

    /// Redraws polyline and overlay from the current history.
    pub fn render<D: DisplaySurface>(&mut self, history: &SelectionHistory, surface: &mut D) {
        let waypoints = history.waypoints();
        match self.polyline {
            Some(handle) => surface.update_polyline(handle, waypoints),
            None => self.polyline = Some(surface.add_polyline(waypoints)),
        }

        let transect = history.finalize();
        self.rebuild(&transect);

        surface.set_overlay(&self.overlay);
        surface.request_redraw();
    }

    fn rebuild(&mut self, transect: &Transect) {
        self.overlay.fill(f32::NAN);
        let mut skipped = 0_usize;
        for (x, y) in transect.iter() {
            match self.overlay.get_mut(x, y, 0) {
                Some(v) => *v = self.over_value,
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(skipped, "transect cells outside the raster were not highlighted");
        }
    }
}
