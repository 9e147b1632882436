use crate::snake::Position;

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Snake,
    Food,
    Wall,
}

/// Fixed-size grid of cell kinds.
///
/// Out-of-bounds coordinates read as [`CellKind::Wall`] and are never stored.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    walls: bool,
    cells: Vec<CellKind>,
}

impl Board {
    /// Creates a board whose outer ring is walled off. Dimensions below one
    /// are raised to one.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_walls(width, height, true)
    }

    /// Creates a board without the wall ring; every cell starts empty.
    #[must_use]
    pub fn without_walls(width: i32, height: i32) -> Self {
        Self::with_walls(width, height, false)
    }

    fn with_walls(width: i32, height: i32, walls: bool) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut board = Self {
            width,
            height,
            walls,
            cells: vec![CellKind::Empty; cell_count(width, height)],
        };
        board.reset();
        board
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns true when `reset` paints the outer ring as walls.
    #[must_use]
    pub fn has_walls(&self) -> bool {
        self.walls
    }

    #[must_use]
    pub fn is_within_bounds(&self, position: Position) -> bool {
        position.is_within_bounds(self.width, self.height)
    }

    /// Returns the stored kind, or `Wall` for any out-of-bounds position.
    #[must_use]
    pub fn cell_kind(&self, position: Position) -> CellKind {
        self.index_of(position)
            .map_or(CellKind::Wall, |index| self.cells[index])
    }

    /// Stores `kind` at `position`. Returns false without effect when out of
    /// bounds.
    pub fn set_cell_kind(&mut self, position: Position, kind: CellKind) -> bool {
        let Some(index) = self.index_of(position) else {
            return false;
        };

        self.cells[index] = kind;
        true
    }

    /// Clears every cell, then walls off the outer ring when walls are on.
    pub fn reset(&mut self) {
        self.cells.fill(CellKind::Empty);

        if !self.walls {
            return;
        }

        for x in 0..self.width {
            self.set_cell_kind(Position::new(x, 0), CellKind::Wall);
            self.set_cell_kind(Position::new(x, self.height - 1), CellKind::Wall);
        }
        for y in 0..self.height {
            self.set_cell_kind(Position::new(0, y), CellKind::Wall);
            self.set_cell_kind(Position::new(self.width - 1, y), CellKind::Wall);
        }
    }

    /// Iterates every in-bounds position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Returns true when `position` lies on the outer ring.
    #[must_use]
    pub fn is_on_ring(&self, position: Position) -> bool {
        self.is_within_bounds(position)
            && (position.x == 0
                || position.y == 0
                || position.x == self.width - 1
                || position.y == self.height - 1)
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if !self.is_within_bounds(position) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(y * width + x)
    }
}

fn cell_count(width: i32, height: i32) -> usize {
    let width = usize::try_from(width).unwrap_or(0);
    let height = usize::try_from(height).unwrap_or(0);
    width * height
}
