use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::board::{Board, CellKind};
use crate::config::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_GAME_SPEED, FOOD_VALUE, INITIAL_SNAKE_LENGTH,
};
use crate::food::Food;
use crate::input::{Direction, KeyState, keys};
use crate::renderer::GameSnapshot;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Constructed but not yet initialized.
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    /// No eligible cell was left for the next food. This is the win.
    BoardFilled,
}

/// Construction parameters for [`Game`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub initial_length: usize,
    pub walls: bool,
    /// Ticks per second.
    pub speed: i32,
    /// Fixed seed for food placement; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            initial_length: INITIAL_SNAKE_LENGTH,
            walls: true,
            speed: DEFAULT_GAME_SPEED,
            seed: None,
        }
    }
}

/// One game session: the sole mutator of its board, snake and food.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    snake: Snake,
    food: Food,
    keys: KeyState,
    status: GameStatus,
    cause: Option<GameOverCause>,
    score: u32,
    speed: i32,
    rng: StdRng,
}

impl Game {
    /// Creates a walled game with default speed and an entropy-seeded RNG.
    #[must_use]
    pub fn new(width: i32, height: i32, initial_length: usize) -> Self {
        Self::from_config(GameConfig {
            width,
            height,
            initial_length,
            ..GameConfig::default()
        })
    }

    /// Creates a deterministic game for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(width: i32, height: i32, initial_length: usize, seed: u64) -> Self {
        Self::from_config(GameConfig {
            width,
            height,
            initial_length,
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    #[must_use]
    pub fn from_config(config: GameConfig) -> Self {
        let board = if config.walls {
            Board::new(config.width, config.height)
        } else {
            Board::without_walls(config.width, config.height)
        };
        let start = Position::new(board.width() / 2, board.height() / 2);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            board,
            snake: Snake::new(start, config.initial_length, Direction::Right),
            food: Food::new(FOOD_VALUE),
            keys: KeyState::default(),
            status: GameStatus::Ready,
            cause: None,
            score: 0,
            speed: config.speed.max(1),
            rng,
        }
    }

    /// Returns the game to a fresh, running state.
    pub fn initialize(&mut self) {
        self.board.reset();
        self.snake.reset();
        self.keys.reset();
        self.paint_snake();

        if !self.generate_food() {
            debug!("no room for initial food");
        }

        self.status = GameStatus::Running;
        self.cause = None;
        self.score = 0;
    }

    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Advances the simulation by one tick. Returns false once the game is
    /// over.
    ///
    /// Pausing is the caller's concern: this method does not look at it.
    pub fn update(&mut self) -> bool {
        if self.status == GameStatus::GameOver {
            return false;
        }

        let tail = self.snake.tail();
        let growing = self.snake.is_growth_pending();

        self.snake.move_forward();
        if !self.board.has_walls() {
            let wrapped = self
                .snake
                .head()
                .wrapped(self.board.width(), self.board.height());
            self.snake.relocate_head(wrapped);
        }

        if !growing
            && !self.snake.contains_position(tail)
            && self.board.cell_kind(tail) == CellKind::Snake
        {
            self.board.set_cell_kind(tail, CellKind::Empty);
        }

        self.check_collisions();
        self.paint_snake();

        self.status != GameStatus::GameOver
    }

    /// Evaluates the head against walls, the body and the food, in that
    /// order.
    pub fn check_collisions(&mut self) {
        let head = self.snake.head();

        if self.board.cell_kind(head) == CellKind::Wall {
            self.end(GameOverCause::Wall);
            return;
        }

        if self.snake.check_self_collision() {
            self.end(GameOverCause::SelfCollision);
            return;
        }

        if head == self.food.position() {
            self.snake.grow();
            self.score += self.food.value();
            debug!(score = self.score, "food eaten");

            if !self.generate_food() {
                self.end(GameOverCause::BoardFilled);
            }
        }
    }

    /// Re-rolls the food position. Returns false when the board is full.
    pub fn generate_food(&mut self) -> bool {
        self.food.generate_position(&mut self.rng, &self.board, &self.snake)
    }

    /// Applies one legacy key code: steering keys turn the snake at once,
    /// `p` toggles pause, `r` restarts a finished game and `q` raises the
    /// quit request.
    pub fn process_key_press(&mut self, key: char) {
        self.keys.process_key(key);

        match key {
            keys::UP | keys::DOWN | keys::LEFT | keys::RIGHT => {
                let _ = self.snake.change_direction(self.keys.direction());
            }
            keys::PAUSE => {
                if self.is_paused() {
                    self.resume();
                } else {
                    self.pause();
                }
            }
            keys::RESET if self.is_game_over() => self.reset(),
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Running;
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// True between `initialize` and the end of the session.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.status, GameStatus::Running | GameStatus::Paused)
    }

    #[must_use]
    pub fn is_quit_requested(&self) -> bool {
        self.keys.is_quit_requested()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.cause
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks per second.
    #[must_use]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Wall-clock time between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.speed))
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Replaces the snake for scenario setup. Board cells are not repainted.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[must_use]
    pub fn food(&self) -> &Food {
        &self.food
    }

    /// Replaces the food for scenario setup.
    pub fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    /// Read-only view handed to renderers.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            board: &self.board,
            snake: &self.snake,
            food: &self.food,
            score: self.score,
            speed: self.speed,
            status: self.status,
            cause: self.cause,
        }
    }

    fn end(&mut self, cause: GameOverCause) {
        self.status = GameStatus::GameOver;
        self.cause = Some(cause);
        info!(?cause, score = self.score, length = self.snake.len(), "game over");
    }

    // Walls stay walls even when the head ends up inside one.
    fn paint_snake(&mut self) {
        for segment in self.snake.segments() {
            if self.board.cell_kind(*segment) != CellKind::Wall {
                self.board.set_cell_kind(*segment, CellKind::Snake);
            }
        }
    }
}
