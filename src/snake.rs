use std::collections::VecDeque;
use std::ops::Add;

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside a `width × height` grid.
    #[must_use]
    pub fn is_within_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    /// Returns the neighbouring position one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_offset();
        self + Self::new(dx, dy)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Ordered snake body (front is head) with deferred growth.
///
/// The construction parameters are kept so [`Snake::reset`] can rebuild the
/// original layout.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    grow_pending: bool,
    initial_position: Position,
    initial_length: usize,
    initial_direction: Direction,
}

impl Snake {
    /// Creates a snake with its head at `start` and `length` segments trailing
    /// opposite to `direction`. A zero length still yields a one-cell snake.
    #[must_use]
    pub fn new(start: Position, length: usize, direction: Direction) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            direction,
            grow_pending: false,
            initial_position: start,
            initial_length: length.max(1),
            initial_direction: direction,
        };
        snake.reset();
        snake
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// `reset` on such a snake rebuilds a straight snake of the same length
    /// from the given head.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let head = segments.first().copied().unwrap_or_default();
        let mut body = VecDeque::from(segments);
        if body.is_empty() {
            body.push_back(head);
        }

        Self {
            initial_length: body.len(),
            body,
            direction,
            grow_pending: false,
            initial_position: head,
            initial_direction: direction,
        }
    }

    /// Advances one cell in the current direction and returns the new head.
    ///
    /// Pending growth is consumed here: the tail is kept once, then the flag
    /// is cleared. No bounds checking happens at this level.
    pub fn move_forward(&mut self) -> Position {
        let next_head = self.head().step(self.direction);

        self.body.push_front(next_head);
        if !self.grow_pending && self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
        self.grow_pending = false;

        next_head
    }

    /// Replaces the head with `position`. Used by wrap-around boards.
    pub fn relocate_head(&mut self, position: Position) {
        if let Some(head) = self.body.front_mut() {
            *head = position;
        }
    }

    /// Queues growth on the next movement tick.
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Returns true while a growth is waiting for the next move.
    #[must_use]
    pub fn is_growth_pending(&self) -> bool {
        self.grow_pending
    }

    /// Changes heading unless `direction` would reverse into the neck.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or_default()
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn contains_position(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Rebuilds the body from the construction parameters.
    pub fn reset(&mut self) {
        let trail = self.initial_direction.opposite();

        self.body.clear();
        let mut segment = self.initial_position;
        self.body.push_back(segment);
        for _ in 1..self.initial_length {
            segment = segment.step(trail);
            self.body.push_back(segment);
        }

        self.direction = self.initial_direction;
        self.grow_pending = false;
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> {
        self.body.iter()
    }
}
