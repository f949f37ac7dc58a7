use crate::im::F32Im;
use crate::rasterize::Waypoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolylineHandle(pub usize);

/// The redrawable surface the picker draws on, which is also where its
/// input comes from.
pub trait DisplaySurface {
    /// Starts delivering input events to the picker.
    fn connect_input(&mut self) -> ConnectionId;

    /// Stops delivering input for `id`. Called once, on finalize.
    fn disconnect_input(&mut self, id: ConnectionId);

    /// Replaces the overlay drawn on top of the raster.
    fn set_overlay(&mut self, overlay: &F32Im);

    fn add_polyline(&mut self, points: &[Waypoint]) -> PolylineHandle;

    fn update_polyline(&mut self, handle: PolylineHandle, points: &[Waypoint]);

    fn request_redraw(&mut self);

    fn close(&mut self);
}

/// Keeps every command in memory. Used by tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub overlay: Option<F32Im>,
    pub polylines: Vec<Vec<Waypoint>>,
    pub connections: Vec<ConnectionId>,
    pub disconnects: usize,
    pub redraws: usize,
    pub closed: bool,
    next_connection: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }
}

impl DisplaySurface for RecordingSurface {
    fn connect_input(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        self.connections.push(id);
        id
    }

    fn disconnect_input(&mut self, id: ConnectionId) {
        self.connections.retain(|c| *c != id);
        self.disconnects += 1;
    }

    fn set_overlay(&mut self, overlay: &F32Im) {
        match &mut self.overlay {
            Some(dst) => dst.clone_from(overlay),
            None => self.overlay = Some(overlay.clone()),
        }
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
        self.redraws += 1;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
