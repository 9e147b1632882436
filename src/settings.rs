use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{
    BOARD_SIZE_RANGE, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_GAME_SPEED,
    GAME_SPEED_RANGE,
};

const APP_DIR_NAME: &str = "greedy-snake";
const SETTINGS_FILE_NAME: &str = "settings.ini";

const KEY_GAME_SPEED: &str = "gameSpeed";
const KEY_BOARD_WIDTH: &str = "boardWidth";
const KEY_BOARD_HEIGHT: &str = "boardHeight";
const KEY_WALLS: &str = "borders";
const KEY_SOUND: &str = "soundEnabled";

/// Failure to read or write the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write settings to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    /// Returns true when the file simply does not exist yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
        }
    }
}

/// User-tunable game settings. Setters clamp into the supported ranges.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSettings {
    game_speed: i32,
    board_width: i32,
    board_height: i32,
    walls_enabled: bool,
    sound_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_speed: DEFAULT_GAME_SPEED,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            walls_enabled: true,
            sound_enabled: true,
        }
    }
}

impl GameSettings {
    /// Ticks per second.
    #[must_use]
    pub fn game_speed(&self) -> i32 {
        self.game_speed
    }

    pub fn set_game_speed(&mut self, speed: i32) {
        self.game_speed = speed.clamp(GAME_SPEED_RANGE.0, GAME_SPEED_RANGE.1);
    }

    #[must_use]
    pub fn board_width(&self) -> i32 {
        self.board_width
    }

    pub fn set_board_width(&mut self, width: i32) {
        self.board_width = width.clamp(BOARD_SIZE_RANGE.0, BOARD_SIZE_RANGE.1);
    }

    #[must_use]
    pub fn board_height(&self) -> i32 {
        self.board_height
    }

    pub fn set_board_height(&mut self, height: i32) {
        self.board_height = height.clamp(BOARD_SIZE_RANGE.0, BOARD_SIZE_RANGE.1);
    }

    #[must_use]
    pub fn walls_enabled(&self) -> bool {
        self.walls_enabled
    }

    pub fn set_walls_enabled(&mut self, enabled: bool) {
        self.walls_enabled = enabled;
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Loads `key=value` lines from `path` over the current values.
    ///
    /// Unknown keys, lines without `=` and unparsable numbers are skipped one
    /// by one; only an unreadable file fails the load.
    pub fn load_from_path(&mut self, path: &Path) -> Result<(), SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.apply_str(&raw);
        Ok(())
    }

    /// Writes all settings to `path`, creating parent directories when needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        let write_error = |source: io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, self.to_file_string()).map_err(write_error)?;

        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Applies every recognised line of a settings document.
    pub fn apply_str(&mut self, raw: &str) {
        for line in raw.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            self.apply_entry(key.trim(), value.trim());
        }
    }

    /// Renders the settings document.
    #[must_use]
    pub fn to_file_string(&self) -> String {
        format!(
            "{KEY_GAME_SPEED}={}\n{KEY_BOARD_WIDTH}={}\n{KEY_BOARD_HEIGHT}={}\n{KEY_WALLS}={}\n{KEY_SOUND}={}\n",
            self.game_speed,
            self.board_width,
            self.board_height,
            self.walls_enabled,
            self.sound_enabled,
        )
    }

    fn apply_entry(&mut self, key: &str, value: &str) {
        match key {
            KEY_GAME_SPEED => apply_number(value, key, |speed| self.set_game_speed(speed)),
            KEY_BOARD_WIDTH => apply_number(value, key, |width| self.set_board_width(width)),
            KEY_BOARD_HEIGHT => apply_number(value, key, |height| self.set_board_height(height)),
            KEY_WALLS => self.set_walls_enabled(value == "true"),
            KEY_SOUND => self.set_sound_enabled(value == "true"),
            _ => debug!(key, "ignoring unknown settings key"),
        }
    }
}

fn apply_number(value: &str, key: &str, apply: impl FnOnce(i32)) {
    match value.parse::<i32>() {
        Ok(number) => apply(number),
        Err(error) => debug!(key, value, %error, "ignoring malformed settings value"),
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Shared settings capability handed to every screen at construction.
///
/// Screens read a copy with [`SettingsHandle::get`] and publish edits with
/// [`SettingsHandle::commit`], which also persists them when the handle was
/// created with a store path.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    shared: Rc<RefCell<GameSettings>>,
    store: Option<Rc<Path>>,
    seed: Option<u64>,
}

impl SettingsHandle {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            shared: Rc::new(RefCell::new(settings)),
            store: None,
            seed: None,
        }
    }

    /// Persists every commit to `path`.
    #[must_use]
    pub fn with_store(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        self.store = Some(Rc::from(path));
        self
    }

    /// Seeds food placement of every game started through this handle.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy of the current settings.
    #[must_use]
    pub fn get(&self) -> GameSettings {
        *self.shared.borrow()
    }

    /// Replaces the shared settings and saves them to the store, if any.
    /// A failed save is logged; the in-memory commit stands.
    pub fn commit(&self, settings: GameSettings) {
        *self.shared.borrow_mut() = settings;

        if let Some(path) = &self.store {
            if let Err(error) = settings.save_to_path(path) {
                warn!(%error, "settings not persisted");
            }
        }
    }

    #[must_use]
    pub fn store_path(&self) -> Option<&Path> {
        self.store.as_deref()
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{GameSettings, SettingsHandle};

    #[test]
    fn defaults_match_documented_values() {
        let settings = GameSettings::default();

        assert_eq!(settings.game_speed(), 5);
        assert_eq!(settings.board_width(), 20);
        assert_eq!(settings.board_height(), 20);
        assert!(settings.walls_enabled());
        assert!(settings.sound_enabled());
    }

    #[test]
    fn setters_clamp_into_range() {
        let mut settings = GameSettings::default();

        settings.set_game_speed(0);
        assert_eq!(settings.game_speed(), 1);
        settings.set_game_speed(11);
        assert_eq!(settings.game_speed(), 10);

        settings.set_board_width(5);
        assert_eq!(settings.board_width(), 10);
        settings.set_board_height(500);
        assert_eq!(settings.board_height(), 100);
    }

    #[test]
    fn malformed_lines_and_values_are_skipped() {
        let mut settings = GameSettings::default();

        settings.apply_str(
            "gameSpeed=8\nboardWidth=wide\nnot a setting\nfoo=bar\nboardHeight=200\nborders=false\nsoundEnabled=nope\n",
        );

        assert_eq!(settings.game_speed(), 8);
        assert_eq!(settings.board_width(), 20);
        assert_eq!(settings.board_height(), 100);
        assert!(!settings.walls_enabled());
        assert!(!settings.sound_enabled());
    }

    #[test]
    fn file_round_trip_preserves_every_field() {
        let path = unique_test_path("round_trip");
        let mut settings = GameSettings::default();
        settings.set_game_speed(9);
        settings.set_board_width(33);
        settings.set_board_height(12);
        settings.set_walls_enabled(false);
        settings.set_sound_enabled(false);

        settings.save_to_path(&path).expect("save should succeed");
        let raw = fs::read_to_string(&path).expect("file should exist");
        assert!(raw.contains("borders=false"));

        let mut loaded = GameSettings::default();
        loaded.load_from_path(&path).expect("load should succeed");
        assert_eq!(loaded, settings);

        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_fails_and_keeps_values() {
        let path = unique_test_path("missing");
        let mut settings = GameSettings::default();
        settings.set_game_speed(3);

        let error = settings
            .load_from_path(&path)
            .expect_err("missing file should fail");

        assert!(error.is_not_found());
        assert_eq!(settings.game_speed(), 3);
    }

    #[test]
    fn handle_commit_is_visible_through_clones_and_persisted() {
        let path = unique_test_path("handle");
        let handle = SettingsHandle::new(GameSettings::default()).with_store(&path);
        let other = handle.clone();

        let mut edited = handle.get();
        edited.set_board_width(40);
        handle.commit(edited);

        assert_eq!(other.get().board_width(), 40);
        assert_eq!(other.store_path(), Some(path.as_path()));

        let mut loaded = GameSettings::default();
        loaded.load_from_path(&path).expect("commit should persist");
        assert_eq!(loaded.board_width(), 40);

        cleanup_test_path(&path);
    }

    #[test]
    fn failed_save_keeps_the_in_memory_commit() {
        let path = unique_test_path("blocked");
        let dir = path.parent().expect("test path has a parent").to_path_buf();
        fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "").expect("blocker file should be writable");

        let store = blocker.join("settings.ini");
        let handle = SettingsHandle::default().with_store(&store);
        let mut edited = handle.get();
        edited.set_game_speed(9);
        edited.set_walls_enabled(false);
        handle.commit(edited);

        assert_eq!(handle.get(), edited);
        assert!(!store.exists());

        let _ = fs::remove_file(&blocker);
        let _ = fs::remove_dir(&dir);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join(format!("greedy-snake-settings-{label}-{nanos}"))
            .join("settings.ini")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
