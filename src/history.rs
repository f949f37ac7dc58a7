use crate::rasterize::{rasterize_section, Section, Waypoint};
use tracing::{debug, info};

/// Final ordered sequence of grid indices along the whole picked path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transect {
    pub xinds: Vec<i64>,
    pub yinds: Vec<i64>,
}

impl Transect {
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.xinds.len(), self.yinds.len());
        self.xinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xinds.is_empty()
    }

    pub fn first(&self) -> Option<(i64, i64)> {
        Some((*self.xinds.first()?, *self.yinds.first()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.xinds.iter().copied().zip(self.yinds.iter().copied())
    }
}

/// Ordered, undoable list of waypoints and the sections between them.
///
/// `sections.len() == max(0, waypoints.len() - 1)` after every operation, and
/// `sections[i]` connects `waypoints[i]` and `waypoints[i + 1]`.
#[derive(Debug, Clone, Default)]
pub struct SelectionHistory {
    waypoints: Vec<Waypoint>,
    sections: Vec<Section>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Snaps `(x, y)` to its cell centre and appends it, rasterizing the
    /// section from the previous waypoint if there is one.
    pub fn append(&mut self, x: f64, y: f64) -> Waypoint {
        let p1 = Waypoint::snapped(x, y);
        if let Some(&p0) = self.waypoints.last() {
            self.sections.push(rasterize_section(p0, p1));
        }
        self.waypoints.push(p1);
        self.log_points();
        p1
    }

    /// Removes the last waypoint and its section. `None` when there was nothing to undo.
    pub fn undo(&mut self) -> Option<Waypoint> {
        let Some(p) = self.waypoints.pop() else {
            info!("nothing to undo");
            return None;
        };
        info!("undo");

        // Sections lag waypoints by one, so the first waypoint has none to pop.
        if self.sections.pop().is_some() {
            debug!("popped section");
        }
        self.log_points();
        Some(p)
    }

    /// Clears everything. `false` when the history was already empty.
    pub fn reset(&mut self) -> bool {
        if self.waypoints.is_empty() {
            info!("nothing to reset");
            return false;
        }
        info!("reset");
        self.waypoints.clear();
        self.sections.clear();
        true
    }

    /// Length `finalize` would return, without building the transect.
    pub fn transect_len(&self) -> usize {
        if self.waypoints.len() < 2 {
            return 0;
        }
        1 + self.sections.iter().map(|s| s.len().saturating_sub(1)).sum::<usize>()
    }

    /// Concatenates the sections into one transect.
    ///
    /// Seeded with the first waypoint's cell, then every section minus its
    /// first index (shared with the previous section's last). Empty with
    /// fewer than two waypoints. Pure: recomputed on every call.
    pub fn finalize(&self) -> Transect {
        if self.waypoints.len() < 2 {
            return Transect::default();
        }

        let n = self.transect_len();
        let mut out = Transect {
            xinds: Vec::with_capacity(n),
            yinds: Vec::with_capacity(n),
        };

        let p0 = self.waypoints[0];
        out.xinds.push(p0.x as i64);
        out.yinds.push(p0.y as i64);

        for section in &self.sections {
            out.xinds.extend_from_slice(section.xinds.get(1..).unwrap_or_default());
            out.yinds.extend_from_slice(section.yinds.get(1..).unwrap_or_default());
        }
        out
    }

    fn log_points(&self) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let mut table = String::from("points:");
        for p in &self.waypoints {
            let (x, y) = p.cell();
            table.push_str(&format!("\n{x:4} {y:4}"));
        }
        debug!("{table}");
    }
}
