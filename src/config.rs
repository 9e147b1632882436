use std::time::Duration;

use ratatui::style::Color;

/// Default board width in cells.
pub const DEFAULT_BOARD_WIDTH: i32 = 20;

/// Default board height in cells.
pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

/// Default game speed in ticks per second.
pub const DEFAULT_GAME_SPEED: i32 = 5;

/// Initial snake length for every new game.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points granted by one food item.
pub const FOOD_VALUE: u32 = 1;

/// Inclusive game speed range.
pub const GAME_SPEED_RANGE: (i32, i32) = (1, 10);

/// Inclusive board dimension range, shared by width and height.
pub const BOARD_SIZE_RANGE: (i32, i32) = (10, 100);

/// Voluntary sleep at the end of every frame of the outer loop.
pub const FRAME_SLEEP: Duration = Duration::from_millis(10);

/// Input poll timeout; keeps the frame loop responsive without spinning.
pub const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(5);

/// Terminal columns per board cell; two columns keep cells roughly square.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_WALL: &str = "▒▒";
pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_MENU_MARKER: &str = ">";

/// Colors used by the terminal renderer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub wall: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub hud: Color,
    pub menu_title: Color,
    pub menu_selected: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    wall: Color::Blue,
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    hud: Color::White,
    menu_title: Color::Green,
    menu_selected: Color::Yellow,
    menu_footer: Color::DarkGray,
};
