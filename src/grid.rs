use crate::{LifeError, Result};

/// Fixed-size field of cells whose edges are stitched together.
///
/// Cell `(x, y)` lives in column `x` and row `y`; storage is row-major.
/// Any `i64` coordinate is accepted and reduced modulo the side lengths.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a field with all cells dead.
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        let size = Self::checked_size(width, height)?;
        Ok(Self {
            cells: vec![false; size],
            width,
            height,
        })
    }

    /// Create a field from a row-major vector of `width * height` cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        let expected = Self::checked_size(width, height)?;
        if cells.len() != expected {
            return Err(LifeError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Create a field with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random(width: usize, height: usize, seed: Option<u64>, fill_rate: f64) -> Result<Self> {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        if !(0.0..=1.0).contains(&fill_rate) {
            return Err(LifeError::Pattern(format!(
                "fill rate {fill_rate} is outside [0, 1]"
            )));
        }
        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let size = Self::checked_size(width, height)?;
        let cells = (0..size).map(|_| rng.gen_bool(fill_rate)).collect();
        Self::from_cells(width, height, cells)
    }

    fn checked_size(width: usize, height: usize) -> Result<usize> {
        let invalid = LifeError::InvalidDimension { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        // coordinates are reduced in i64 space
        if i64::try_from(width).is_err() || i64::try_from(height).is_err() {
            return Err(invalid);
        }
        width.checked_mul(height).ok_or(invalid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reduces any coordinate into `0..width` x `0..height`.
    #[inline]
    pub fn wrap(&self, x: i64, y: i64) -> (i64, i64) {
        (
            x.rem_euclid(self.width as i64),
            y.rem_euclid(self.height as i64),
        )
    }

    /// Maps any coordinate onto its storage index.
    #[inline]
    pub(crate) fn index(&self, x: i64, y: i64) -> usize {
        let (x, y) = self.wrap(x, y);
        x as usize + y as usize * self.width
    }

    /// Get cell state at (x, y), wrapping around both edges.
    #[inline]
    pub fn alive(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Set cell state at (x, y), wrapping around both edges.
    pub fn set(&mut self, x: i64, y: i64, state: bool) {
        let i = self.index(x, y);
        self.cells[i] = state;
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Total number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of alive cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| (i % w, i / w))
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("population", &self.population())
            .finish()
    }
}
