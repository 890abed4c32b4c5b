use super::AreaError;

/// `(row, col)` coordinate inside an [`AreaShape`] grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

impl GridCell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Rectangular boolean grid with one anchor cell.
///
/// The anchor is the cell that lands on the aimed-at world location. Every
/// non-empty shape keeps its anchor inside the grid, and every transform
/// carries the anchor along geometrically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaShape {
    rows: u32,
    cols: u32,
    cells: Vec<bool>,
    anchor: GridCell,
}

/// Concentric rings used by [`AreaShape::circle`]; `1` marks the anchor.
const RING_TABLE: [[u8; 13]; 13] = [
    [0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 8, 8, 7, 8, 8, 0, 0, 0, 0],
    [0, 0, 0, 8, 7, 6, 6, 6, 7, 8, 0, 0, 0],
    [0, 0, 8, 7, 6, 5, 5, 5, 6, 7, 8, 0, 0],
    [0, 8, 7, 6, 5, 4, 4, 4, 5, 6, 7, 8, 0],
    [0, 8, 6, 5, 4, 3, 2, 3, 4, 5, 6, 8, 0],
    [8, 7, 6, 5, 4, 2, 1, 2, 4, 5, 6, 7, 8],
    [0, 8, 6, 5, 4, 3, 2, 3, 4, 5, 6, 8, 0],
    [0, 8, 7, 6, 5, 4, 4, 4, 5, 6, 7, 8, 0],
    [0, 0, 8, 7, 6, 5, 5, 5, 6, 7, 8, 0, 0],
    [0, 0, 0, 8, 7, 6, 6, 6, 7, 8, 0, 0, 0],
    [0, 0, 0, 0, 8, 8, 7, 8, 8, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0],
];

impl AreaShape {
    pub const MAX_CIRCLE_RADIUS: u32 = 8;

    pub const EMPTY: AreaShape = AreaShape {
        rows: 0,
        cols: 0,
        cells: Vec::new(),
        anchor: GridCell { row: 0, col: 0 },
    };

    /// Builds a shape from row-major cell codes.
    ///
    /// Codes: `0` empty, `1` affected, `2` anchor only, `3` affected anchor.
    /// Zero rows yield the empty shape.
    pub fn from_codes(codes: &[u32], rows: u32) -> Result<Self, AreaError> {
        if rows == 0 {
            return Ok(Self::EMPTY);
        }
        if codes.len() % rows as usize != 0 {
            return Err(AreaError::RaggedGrid {
                len: codes.len(),
                rows,
            });
        }

        let cols = (codes.len() / rows as usize) as u32;
        let mut cells = Vec::with_capacity(codes.len());
        let mut anchor = None;
        for (index, &code) in codes.iter().enumerate() {
            if code > 3 {
                return Err(AreaError::InvalidCode { index, code });
            }
            if code & 2 != 0 {
                if anchor.is_some() {
                    return Err(AreaError::MultipleAnchors);
                }
                anchor = Some(GridCell::new(index as u32 / cols, index as u32 % cols));
            }
            cells.push(code & 1 != 0);
        }

        let anchor = anchor.ok_or(AreaError::MissingAnchor)?;
        Ok(Self {
            rows,
            cols,
            cells,
            anchor,
        })
    }

    /// Cone facing north: `length` rows deep, widening by one column on each
    /// side every `spread` rows. `spread == 0` gives a straight beam.
    ///
    /// The anchor sits on the last row, in the centre column, so the cone
    /// opens away from the caster.
    pub fn wave(length: u32, spread: u32) -> Result<Self, AreaError> {
        if length == 0 {
            return Err(AreaError::ZeroLength);
        }

        let rows = length;
        let cols = if spread == 0 {
            1
        } else {
            ((length - length % spread) / spread) * 2 + 1
        };
        let anchor = GridCell::new(rows - 1, (cols - cols % 2) / 2);

        let mut cells = Vec::with_capacity((rows * cols) as usize);
        let mut col_spread = cols;
        for row in 1..=rows {
            let min_col = cols - col_spread + 1;
            let max_col = col_spread;
            for col in 1..=cols {
                cells.push(col >= min_col && col <= max_col);
            }
            if spread > 0 && row % spread == 0 {
                col_spread -= 1;
            }
        }
        // anchor row is always marked affected
        cells[(anchor.row * cols + anchor.col) as usize] = true;

        Ok(Self {
            rows,
            cols,
            cells,
            anchor,
        })
    }

    /// Filled disc of the given ring radius around a centred anchor.
    ///
    /// Radii past [`Self::MAX_CIRCLE_RADIUS`] cover the whole ring table.
    pub fn circle(radius: u32) -> Result<Self, AreaError> {
        if radius == 0 {
            return Err(AreaError::RadiusOutOfRange(radius));
        }
        let radius = radius.min(Self::MAX_CIRCLE_RADIUS);

        let cells = RING_TABLE
            .iter()
            .flat_map(|row| row.iter())
            .map(|&ring| ring != 0 && u32::from(ring) <= radius)
            .collect();
        Ok(Self {
            rows: 13,
            cols: 13,
            cells,
            anchor: GridCell::new(6, 6),
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn anchor(&self) -> GridCell {
        self.anchor
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn is_affected(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols && self.cells[(row * self.cols + col) as usize]
    }

    /// Affected cells in row-major order.
    pub fn affected_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, affected)| **affected)
            .map(move |(index, _)| GridCell::new(index as u32 / cols, index as u32 % cols))
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Quarter turn clockwise.
    pub fn rotate90(&self) -> Self {
        let rows = self.rows;
        self.remap(self.cols, self.rows, |r, c| (c, rows - r - 1))
    }

    pub fn rotate180(&self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        self.remap(rows, cols, |r, c| (rows - r - 1, cols - c - 1))
    }

    /// Three quarter turns clockwise.
    pub fn rotate270(&self) -> Self {
        let cols = self.cols;
        self.remap(self.cols, self.rows, |r, c| (cols - c - 1, r))
    }

    /// Left-right reflection.
    pub fn mirror(&self) -> Self {
        let cols = self.cols;
        self.remap(self.rows, cols, |r, c| (r, cols - c - 1))
    }

    /// Top-bottom reflection.
    pub fn flip(&self) -> Self {
        let rows = self.rows;
        self.remap(rows, self.cols, |r, c| (rows - r - 1, c))
    }

    /// Reflection across the main diagonal.
    pub fn transpose(&self) -> Self {
        self.remap(self.cols, self.rows, |r, c| (c, r))
    }

    /// Moves every cell (and the anchor) through `map` into a
    /// `rows x cols` grid.
    fn remap(&self, rows: u32, cols: u32, map: impl Fn(u32, u32) -> (u32, u32)) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }

        let mut cells = vec![false; (rows * cols) as usize];
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.cells[(r * self.cols + c) as usize] {
                    let (nr, nc) = map(r, c);
                    cells[(nr * cols + nc) as usize] = true;
                }
            }
        }
        let (row, col) = map(self.anchor.row, self.anchor.col);
        Self {
            rows,
            cols,
            cells,
            anchor: GridCell::new(row, col),
        }
    }
}
