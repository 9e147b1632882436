use rand::Rng;

use crate::board::{Board, CellKind};
use crate::config::FOOD_VALUE;
use crate::snake::{Position, Snake};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Position,
    value: u32,
}

impl Default for Food {
    fn default() -> Self {
        Self::new(FOOD_VALUE)
    }
}

impl Food {
    /// Creates food worth `value` points at the origin; place it with
    /// [`Food::generate_position`].
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self {
            position: Position::default(),
            value,
        }
    }

    /// Creates food worth `value` points at a fixed position.
    #[must_use]
    pub fn at(position: Position, value: u32) -> Self {
        Self { position, value }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Moves the food to a uniformly chosen eligible cell.
    ///
    /// Returns false and keeps the current position when the board has no
    /// eligible cell left.
    pub fn generate_position<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &Board,
        snake: &Snake,
    ) -> bool {
        let candidates = eligible_positions(board, snake);
        if candidates.is_empty() {
            return false;
        }

        let index = rng.gen_range(0..candidates.len());
        self.position = candidates[index];
        true
    }
}

/// Returns every empty board cell not covered by the snake.
#[must_use]
pub fn eligible_positions(board: &Board, snake: &Snake) -> Vec<Position> {
    board
        .positions()
        .filter(|position| {
            board.cell_kind(*position) == CellKind::Empty && !snake.contains_position(*position)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::board::{Board, CellKind};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Food, eligible_positions};

    #[test]
    fn food_spawn_never_overlaps_snake_or_wall() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::new(8, 6);
        let snake = Snake::new(Position::new(4, 3), 3, Direction::Right);
        let mut food = Food::default();

        for _ in 0..200 {
            assert!(food.generate_position(&mut rng, &board, &snake));
            assert!(!snake.contains_position(food.position()));
            assert_eq!(board.cell_kind(food.position()), CellKind::Empty);
        }
    }

    #[test]
    fn single_eligible_cell_is_chosen_deterministically() {
        let mut board = Board::new(5, 5);
        let snake = Snake::new(Position::new(2, 2), 1, Direction::Right);
        for position in board.positions().collect::<Vec<_>>() {
            if board.cell_kind(position) == CellKind::Empty && position != Position::new(1, 3) {
                board.set_cell_kind(position, CellKind::Wall);
            }
        }
        board.set_cell_kind(Position::new(2, 2), CellKind::Empty);

        let mut food = Food::default();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(food.generate_position(&mut rng, &board, &snake));
            assert_eq!(food.position(), Position::new(1, 3));
        }
    }

    #[test]
    fn full_board_reports_no_space_and_keeps_position() {
        let mut board = Board::new(4, 4);
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::Up,
        );
        for position in board.positions().collect::<Vec<_>>() {
            if !snake.contains_position(position) {
                board.set_cell_kind(position, CellKind::Wall);
            }
        }

        let mut food = Food::at(Position::new(9, 9), 1);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(eligible_positions(&board, &snake).is_empty());
        assert!(!food.generate_position(&mut rng, &board, &snake));
        assert_eq!(food.position(), Position::new(9, 9));
    }

    #[test]
    fn same_seed_gives_same_placement() {
        let board = Board::new(12, 12);
        let snake = Snake::new(Position::new(6, 6), 3, Direction::Right);
        let mut first = Food::default();
        let mut second = Food::default();

        first.generate_position(&mut StdRng::seed_from_u64(99), &board, &snake);
        second.generate_position(&mut StdRng::seed_from_u64(99), &board, &snake);

        assert_eq!(first, second);
    }

    #[test]
    fn default_food_is_worth_one_point() {
        assert_eq!(Food::default().value(), 1);
        assert_eq!(Food::new(5).value(), 5);
    }
}
