#[derive(Debug, Clone)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

// Constructors
// -----------------------------------------------------------------------------
impl<T: Copy + Default, const N_CH: usize> Im<T, N_CH> {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * N_CH;
        let arr = vec![T::default(); s * h];
        Self { w, h, s, arr }
    }
}

impl<T: Copy, const N_CH: usize> Im<T, N_CH> {
    pub fn filled(w: usize, h: usize, v: T) -> Self {
        let s = w * N_CH;
        Self { w, h, s, arr: vec![v; s * h] }
    }

    pub fn fill(&mut self, v: T) {
        self.arr.fill(v);
    }
}

impl<T, const N_CH: usize> Im<T, N_CH> {
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> &T {
        unsafe { self.arr.get_unchecked(y * self.s + x * N_CH + ch) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, x: usize, y: usize, ch: usize) -> &mut T {
        unsafe { self.arr.get_unchecked_mut(y * self.s + x * N_CH + ch) }
    }

    /// Bounds-checked access. Signed coordinates so callers can pass raw
    /// transect indices without pre-filtering negatives.
    pub fn get(&self, x: i64, y: i64, ch: usize) -> Option<&T> {
        let (x, y) = self.index_of(x, y, ch)?;
        Some(unsafe { self.get_unchecked(x, y, ch) })
    }

    pub fn get_mut(&mut self, x: i64, y: i64, ch: usize) -> Option<&mut T> {
        let (x, y) = self.index_of(x, y, ch)?;
        Some(unsafe { self.get_unchecked_mut(x, y, ch) })
    }

    #[inline]
    fn index_of(&self, x: i64, y: i64, ch: usize) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || ch >= N_CH {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.w || y >= self.h {
            return None;
        }
        Some((x, y))
    }
}

impl Im<f32, 1> {
    /// Builds a raster by evaluating `f(x, y)` for every cell.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut im = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                im.arr[y * im.s + x] = f(x, y);
            }
        }
        im
    }
}

pub type RGBAIm = Im<u8, 4>;
pub type F32Im = Im<f32, 1>;

// Raster source
// -----------------------------------------------------------------------------

/// What the picker needs to know about the raster it is drawn over.
///
/// Pointer coordinates and array indices share one floor-based mapping:
/// the cell `(col, row)` covers `[col, col + 1) x [row, row + 1)`.
pub trait RasterSource {
    /// `(rows, cols)`
    fn shape(&self) -> (usize, usize);

    /// `(min, max)` over finite cells, `None` if there are none.
    fn value_range(&self) -> Option<(f32, f32)>;
}

impl RasterSource for F32Im {
    fn shape(&self) -> (usize, usize) {
        (self.h, self.w)
    }

    fn value_range(&self) -> Option<(f32, f32)> {
        let mut range: Option<(f32, f32)> = None;
        for y in 0..self.h {
            let row = &self.arr[y * self.s..y * self.s + self.w];
            for &v in row.iter().filter(|v| v.is_finite()) {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        range
    }
}
