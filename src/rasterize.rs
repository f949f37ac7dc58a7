/// A picked point in continuous display coordinates.
///
/// Stored values are always cell centres, see [`Waypoint::snapped`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    /// Moves `(x, y)` to the centre of the cell that contains it.
    pub fn snapped(x: f64, y: f64) -> Self {
        Self {
            x: x.floor() + 0.5,
            y: y.floor() + 0.5,
        }
    }

    /// `(col, row)` of the cell this waypoint sits in.
    pub fn cell(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// Rasterized straight path between two consecutive waypoints, both ends included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub xinds: Vec<i64>,
    pub yinds: Vec<i64>,
}

impl Section {
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.xinds.len(), self.yinds.len());
        self.xinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.xinds.iter().copied().zip(self.yinds.iter().copied())
    }
}

/// `n` evenly spaced samples from `a` to `b`, both ends included.
///
/// Same sampling as numpy's `linspace`: `a + i * step` for every sample but
/// the last, which is exactly `b`.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { b } else { a + i as f64 * step })
                .collect()
        }
    }
}

/// Grid indices approximating the straight line from `p0` to `p1`.
///
/// Produces `floor(max(|dx|, |dy|)) + 1` samples, so consecutive indices
/// differ by at most one cell on either axis (8-connected). This is not
/// Bresenham: shallow slopes can repeat an index on the minor axis, and the
/// sample count always equals the Chebyshev distance plus one.
pub fn rasterize_section(p0: Waypoint, p1: Waypoint) -> Section {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let length = dx.abs().max(dy.abs()).floor() as usize + 1;

    // `as i64` truncates toward zero.
    let xinds = linspace(p0.x, p1.x, length).into_iter().map(|v| v as i64).collect();
    let yinds = linspace(p0.y, p1.y, length).into_iter().map(|v| v as i64).collect();

    Section { xinds, yinds }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapped_moves_to_cell_centre() {
        assert_eq!(Waypoint::snapped(1.2, 1.7), Waypoint { x: 1.5, y: 1.5 });
        assert_eq!(Waypoint::snapped(4.0, 0.999), Waypoint { x: 4.5, y: 0.5 });
        assert_eq!(Waypoint::snapped(4.2, 4.9).cell(), (4, 4));
    }

    #[test]
    fn horizontal_section() {
        let s = rasterize_section(Waypoint { x: 2.5, y: 2.5 }, Waypoint { x: 5.5, y: 2.5 });
        assert_eq!(s.len(), 4);
        assert_eq!(s.xinds, vec![2, 3, 4, 5]);
        assert_eq!(s.yinds, vec![2, 2, 2, 2]);
    }

    #[test]
    fn identical_points_give_single_cell() {
        let p = Waypoint { x: 0.5, y: 0.5 };
        let s = rasterize_section(p, p);
        assert_eq!(s.len(), 1);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn reversed_direction_walks_backwards() {
        let s = rasterize_section(Waypoint { x: 5.5, y: 7.5 }, Waypoint { x: 5.5, y: 4.5 });
        assert_eq!(s.xinds, vec![5, 5, 5, 5]);
        assert_eq!(s.yinds, vec![7, 6, 5, 4]);
    }

    #[test]
    fn shallow_slope_repeats_minor_axis() {
        // Chebyshev distance 4 => 5 samples; y only moves one cell.
        let s = rasterize_section(Waypoint { x: 0.5, y: 0.5 }, Waypoint { x: 4.5, y: 1.5 });
        assert_eq!(s.xinds, vec![0, 1, 2, 3, 4]);
        assert_eq!(s.yinds, vec![0, 0, 1, 1, 1]);
    }

    #[test]
    fn steps_are_eight_connected() {
        let s = rasterize_section(Waypoint { x: 1.5, y: 9.5 }, Waypoint { x: 13.5, y: 2.5 });
        assert_eq!(s.len(), 13);
        assert_eq!((s.xinds[0], s.yinds[0]), (1, 9));
        assert_eq!((s.xinds[12], s.yinds[12]), (13, 2));
        for i in 1..s.len() {
            assert!((s.xinds[i] - s.xinds[i - 1]).abs() <= 1);
            assert!((s.yinds[i] - s.yinds[i - 1]).abs() <= 1);
        }
    }

    #[test]
    fn linspace_hits_both_ends() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert!(linspace(3.0, 7.0, 0).is_empty());
    }
}
