use crate::config::KeyBindings;
use crate::display::{ConnectionId, DisplaySurface};
use crate::error::{Result, TransectError};
use crate::event::{InputEvent, MouseButton};
use crate::history::{SelectionHistory, Transect};
use crate::im::RasterSource;
use crate::overlay::OverlayRenderer;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Active,
    Finalized,
}

/// Turns input events into history edits and keeps the display in step.
///
/// Active from construction until the finalize key is pressed; after that it
/// is disconnected from the surface and only holds the published transect.
pub struct InputController<D: DisplaySurface> {
    history: SelectionHistory,
    renderer: OverlayRenderer,
    surface: D,
    keys: KeyBindings,
    shape: (usize, usize),
    connection: Option<ConnectionId>,
    state: ControllerState,
    transect: Option<Transect>,
}

impl<D: DisplaySurface> InputController<D> {
    /// Connects to `surface` input right away.
    ///
    /// Fails if the raster has no cells or no finite values, since there
    /// would be no range to place the highlight value above.
    pub fn new<R: RasterSource>(raster: &R, mut surface: D, keys: KeyBindings) -> Result<Self> {
        let (rows, cols) = raster.shape();
        let range = match raster.value_range() {
            Some(range) if rows > 0 && cols > 0 => range,
            _ => return Err(TransectError::EmptyRaster { rows, cols }),
        };

        let renderer = OverlayRenderer::new((rows, cols), OverlayRenderer::over_value_for(range));
        let connection = Some(surface.connect_input());
        log_usage(&keys);

        Ok(Self {
            history: SelectionHistory::new(),
            renderer,
            surface,
            keys,
            shape: (rows, cols),
            connection,
            state: ControllerState::Active,
            transect: None,
        })
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Published result, set once the picker is finalized.
    pub fn transect(&self) -> Option<&Transect> {
        self.transect.as_ref()
    }

    /// Handles one event. Returns the transect on the finalize transition, `None` otherwise.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Transect> {
        if self.state == ControllerState::Finalized {
            warn!(?event, "event after finalize ignored");
            return None;
        }

        match event {
            InputEvent::ClickOutside => {
                info!("cursor not in axes");
            }
            InputEvent::Click { x, y, .. } if !self.in_bounds(x, y) => {
                info!(x, y, "cursor not in axes");
            }
            InputEvent::Click { x, y, button: MouseButton::Primary } => {
                self.history.append(x, y);
                self.redraw();
            }
            InputEvent::Click { button: MouseButton::Secondary, .. } => {
                if self.history.undo().is_some() {
                    self.redraw();
                }
            }
            InputEvent::Click { button: MouseButton::Middle, .. } => {
                debug!("middle click ignored");
            }
            InputEvent::Key(key) if key == self.keys.reset_key => {
                if self.history.reset() {
                    self.redraw();
                }
            }
            InputEvent::Key(key) if key == self.keys.finalize_key => {
                return Some(self.finalize());
            }
            InputEvent::Key(key) => {
                debug!(%key, "unbound key ignored");
            }
        }
        None
    }

    /// Pointer coordinates map to cells by floor, so the raster covers
    /// `[0, cols) x [0, rows)`. NaN fails every comparison and lands outside.
    fn in_bounds(&self, x: f64, y: f64) -> bool {
        let (rows, cols) = self.shape;
        (0.0..cols as f64).contains(&x) && (0.0..rows as f64).contains(&y)
    }

    fn redraw(&mut self) {
        self.renderer.render(&self.history, &mut self.surface);
    }

    fn finalize(&mut self) -> Transect {
        let transect = self.history.finalize();
        info!(cells = transect.len(), "exiting");

        if let Some(id) = self.connection.take() {
            self.surface.disconnect_input(id);
        }
        self.surface.close();

        self.state = ControllerState::Finalized;
        self.transect = Some(transect.clone());
        transect
    }
}

fn log_usage(keys: &KeyBindings) {
    info!("Welcome to the transect picker");
    info!("Usage:     left mouse button  - select points");
    info!("           right mouse button - undo");
    info!("           {:<18} - reset", keys.reset_key);
    info!("           {:<18} - exit", keys.finalize_key);
}
