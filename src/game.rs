use eframe::{Storage, egui};

use crate::direction::Direction;
use crate::grid::{Grid, Position};
use crate::level::{Level, LevelObserver, Tile, Update};
use crate::modals::{LevelSolvedModal, LevelSolvedModalEvent, PauseModal, PauseModalEvent};

const KEY_BINDINGS: [(egui::Key, Command); 7] = [
    (egui::Key::ArrowLeft, Command::Move(Direction::Left)),
    (egui::Key::ArrowRight, Command::Move(Direction::Right)),
    (egui::Key::ArrowUp, Command::Move(Direction::Up)),
    (egui::Key::ArrowDown, Command::Move(Direction::Down)),
    (egui::Key::U, Command::Undo),
    (egui::Key::R, Command::Reset),
    (egui::Key::Escape, Command::Pause),
];

pub struct Game {
    level: Level,
    level_index: usize,
    board: Board,
    state: GameState,
    timer: Timer,
    settings: Settings,
}

impl Game {
    const INNER_MARGIN: f32 = 10.;

    /// Create a new game for the level at `level_index` of the loaded collection.
    pub fn new(level: Level, level_index: usize, settings: Settings) -> Self {
        let board = Board::new(&level);
        let state = if level.solved() {
            GameState::Ended
        } else {
            GameState::BeforeStart
        };

        Self {
            level,
            level_index,
            board,
            state,
            timer: Timer::default(),
            settings,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Restart the level.
    pub fn restart(&mut self) {
        let update = self.level.reset();
        self.apply(update);
        self.state = if self.level.solved() {
            GameState::Ended
        } else {
            GameState::BeforeStart
        };
        self.timer = Timer::default();
    }

    /// Run a single player command. Commands are ignored while the game is paused or over.
    pub fn handle(&mut self, command: Command) {
        if !matches!(self.state, GameState::BeforeStart | GameState::Running) {
            return;
        }

        match command {
            Command::Move(direction) => {
                let update = self.level.try_move(direction);
                if update.is_empty() {
                    return;
                }
                if self.state == GameState::BeforeStart {
                    self.timer.start();
                    self.state = GameState::Running;
                }
                self.apply(update);
            }
            Command::Undo => {
                let update = self.level.undo();
                self.apply(update);
            }
            Command::Reset => self.restart(),
            Command::Pause => {
                self.state = GameState::Paused {
                    game_was_started: self.state != GameState::BeforeStart,
                };
                self.timer.stop();
            }
        }
    }

    /// Forward an update of the level to the board and end the game once the level is solved.
    fn apply(&mut self, update: Update) {
        update.notify(&mut self.board);
        if self.board.take_solved() {
            log::info!(
                "level {} solved with {} moves in {}",
                self.level_index + 1,
                self.level.score(),
                self.timer
            );
            self.timer.stop();
            self.state = GameState::Ended;
        }
    }

    pub fn update(&mut self, ui: &mut egui::Ui) -> Vec<GameEvent> {
        if self.state == GameState::Running {
            self.timer.update(ui.input(|i| i.time));
            ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
        }

        let mut events = vec![];
        let mut commands = read_commands(ui);

        ui.vertical_centered(|ui| {
            self.draw_board(ui);
            ui.add_space(15.);
            commands.extend(self.update_status_bar(ui, &mut events));
        });

        for command in commands {
            self.handle(command);
        }

        if let GameState::Paused { game_was_started } = self.state {
            match PauseModal::new().update(ui) {
                None => {}
                Some(PauseModalEvent::Continue) => {
                    if game_was_started {
                        self.state = GameState::Running;
                        self.timer.start();
                    } else {
                        self.state = GameState::BeforeStart;
                    }
                }
                Some(PauseModalEvent::ChooseLevel) => events.push(GameEvent::ChooseLevel),
                Some(PauseModalEvent::Restart) => self.restart(),
            }
        } else if self.state == GameState::Ended {
            let response =
                LevelSolvedModal::new(self.timer.duration(), self.level.score()).update(ui);
            match response {
                None => {}
                Some(LevelSolvedModalEvent::NextLevel) => events.push(GameEvent::NextLevel),
                Some(LevelSolvedModalEvent::ChooseLevel) => events.push(GameEvent::ChooseLevel),
                Some(LevelSolvedModalEvent::PlayAgain) => self.restart(),
            }
        }

        events
    }

    fn draw_board(&self, ui: &mut egui::Ui) {
        let tile_size = self.settings.tile_size as f32;
        let tiles = &self.board.tiles;
        let desired_size = egui::vec2(
            tiles.cols() as f32 * tile_size,
            tiles.rows() as f32 * tile_size,
        ) + egui::Vec2::splat(Self::INNER_MARGIN);
        let (response, painter) = ui.allocate_painter(desired_size, egui::Sense::hover());

        // Keep the tiles on whole pixels, the outlines get blurry otherwise.
        let top_left = response.rect.min + egui::Vec2::splat(Self::INNER_MARGIN / 2.);
        let top_left = egui::pos2(top_left.x.floor(), top_left.y.floor());

        let outline = egui::Stroke::new(1.0, egui::Color32::BLACK);
        for (pos, color) in tiles.indexed_iter() {
            let min = top_left + egui::vec2(pos.x as f32 * tile_size, pos.y as f32 * tile_size);
            let rect = egui::Rect::from_min_size(min, egui::Vec2::splat(tile_size));
            painter.rect_filled(rect, egui::CornerRadius::ZERO, *color);
            painter.rect_stroke(rect, egui::CornerRadius::ZERO, outline, egui::StrokeKind::Inside);
        }
    }

    fn update_status_bar(&mut self, ui: &mut egui::Ui, events: &mut Vec<GameEvent>) -> Vec<Command> {
        let mut commands = vec![];

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 10.;
            if icon_button(ui, egui_phosphor::regular::DOTS_THREE_VERTICAL).clicked() {
                commands.push(Command::Pause);
            }
            if icon_button(ui, egui_phosphor::regular::ARROW_U_UP_LEFT)
                .on_hover_text("Undo (U)")
                .clicked()
            {
                commands.push(Command::Undo);
            }
            if icon_button(ui, egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE)
                .on_hover_text("Reset (R)")
                .clicked()
            {
                commands.push(Command::Reset);
            }
            ui.label(format!("Level {}", self.level_index + 1));
            ui.label(format!("Moves {}", self.level.score()));
            ui.label(format!("Crates left {}", self.level.crates_left()));
            ui.label(format!("{}", self.timer));
        });

        let slider = egui::Slider::new(
            &mut self.settings.tile_size,
            Settings::MIN_TILE_SIZE..=Settings::MAX_TILE_SIZE,
        )
        .text("Tile size");
        if ui.add(slider).changed() {
            events.push(GameEvent::SettingsChanged(self.settings));
        }

        commands
    }
}

fn icon_button(ui: &mut egui::Ui, icon: &str) -> egui::Response {
    ui.button(egui::RichText::new(icon).size(12.))
}

fn read_commands(ui: &egui::Ui) -> Vec<Command> {
    ui.input(|input| {
        KEY_BINDINGS
            .iter()
            .filter(|(key, _)| input.key_pressed(*key))
            .map(|(_, command)| *command)
            .collect()
    })
}

/// The colour a tile is painted with.
pub fn color_for(tile: Tile) -> egui::Color32 {
    match tile {
        Tile::Man => egui::Color32::WHITE,
        Tile::Crate => egui::Color32::GRAY,
        Tile::Wall => egui::Color32::from_rgb(91, 59, 17),
        Tile::Storage => egui::Color32::YELLOW,
        Tile::CrateOnStorage => egui::Color32::GREEN,
        Tile::ManOnStorage => egui::Color32::RED,
        Tile::Empty => egui::Color32::BLACK,
    }
}

/// The painted state of the level, kept up to date through the level's updates.
struct Board {
    tiles: Grid<egui::Color32>,
    solved: bool,
}

impl Board {
    fn new(level: &Level) -> Self {
        let mut tiles = Grid::default();
        for (pos, &tile) in level.grid().indexed_iter() {
            tiles.set(pos, color_for(tile));
        }
        Board {
            tiles,
            solved: false,
        }
    }

    /// Return true once after the level was solved.
    fn take_solved(&mut self) -> bool {
        std::mem::take(&mut self.solved)
    }
}

impl LevelObserver for Board {
    fn tile_changed(&mut self, position: Position, tile: Tile) {
        self.tiles.set(position, color_for(tile));
    }

    fn level_solved(&mut self) {
        self.solved = true;
    }
}

/// Something the player asked for, by key or by button.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Move(Direction),
    Undo,
    Reset,
    Pause,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Edge length of a painted tile in points.
    pub tile_size: u8,
    /// Index of the level played last.
    pub last_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: 32,
            last_level: 0,
        }
    }
}

impl Settings {
    pub const MIN_TILE_SIZE: u8 = 16;
    pub const MAX_TILE_SIZE: u8 = 64;

    pub fn read(storage: &dyn Storage) -> Self {
        let mut settings = Self::default();

        if let Some(value) = storage
            .get_string("tile_size")
            .and_then(|s| s.parse::<u8>().ok())
        {
            settings.tile_size = value.clamp(Self::MIN_TILE_SIZE, Self::MAX_TILE_SIZE);
        }
        if let Some(value) = storage
            .get_string("last_level")
            .and_then(|s| s.parse::<usize>().ok())
        {
            settings.last_level = value;
        }

        settings
    }

    pub fn write(&self, storage: &mut dyn Storage) {
        storage.set_string("tile_size", self.tile_size.to_string());
        storage.set_string("last_level", self.last_level.to_string());
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum GameState {
    BeforeStart,
    Running,
    Paused { game_was_started: bool },
    Ended,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameEvent {
    ChooseLevel,
    NextLevel,
    SettingsChanged(Settings),
}

#[derive(Default)]
struct Timer {
    total: std::time::Duration,
    last_value: Option<f64>,
    running: bool,
}

impl Timer {
    fn duration(&self) -> std::time::Duration {
        self.total
    }

    /// Does nothing if the timer is already running.
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.last_value = None;
    }

    /// Advance by the time passed since the previous call, given egui's clock in seconds.
    fn update(&mut self, now: f64) {
        if self.running {
            if let Some(last_value) = self.last_value {
                self.total += std::time::Duration::from_secs_f64((now - last_value).max(0.));
            }
            self.last_value = Some(now);
        }
    }
}

impl std::fmt::Display for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seconds = self.total.as_secs();
        write!(f, "{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const LEVEL: &str = "######\n#@ o.#\n######";

    fn game() -> Game {
        Game::new(Level::from_text(LEVEL).unwrap(), 0, Settings::default())
    }

    fn assert_board_matches(game: &Game) {
        for (pos, &tile) in game.level.grid().indexed_iter() {
            assert_eq!(game.board.tiles.get(pos), Some(&color_for(tile)), "at {pos}");
        }
    }

    #[test]
    fn first_move_starts_the_game() {
        let mut game = game();
        assert_eq!(game.state, GameState::BeforeStart);

        game.handle(Command::Move(Direction::Left));
        assert_eq!(game.state, GameState::BeforeStart);

        game.handle(Command::Move(Direction::Right));
        assert_eq!(game.state, GameState::Running);
        assert!(game.timer.running);
        assert_board_matches(&game);
    }

    #[test]
    fn solving_ends_the_game() {
        let mut game = game();
        game.handle(Command::Move(Direction::Right));
        game.handle(Command::Move(Direction::Right));
        assert_eq!(game.state, GameState::Ended);
        assert!(!game.timer.running);
        assert_board_matches(&game);

        // Input is ignored once the level is solved.
        game.handle(Command::Undo);
        game.handle(Command::Move(Direction::Left));
        assert_eq!(game.level.score(), 2);
        assert!(game.level.solved());
    }

    #[test]
    fn undo_and_reset_repaint_the_board() {
        let mut game = game();
        game.handle(Command::Move(Direction::Right));
        game.handle(Command::Undo);
        assert_eq!(game.level.score(), 0);
        assert_board_matches(&game);

        game.handle(Command::Move(Direction::Right));
        game.handle(Command::Reset);
        assert_eq!(game.state, GameState::BeforeStart);
        assert_eq!(game.level.score(), 0);
        assert_board_matches(&game);
    }

    #[test]
    fn pause_blocks_input() {
        let mut game = game();
        game.handle(Command::Move(Direction::Right));
        game.handle(Command::Pause);
        assert_eq!(game.state, GameState::Paused { game_was_started: true });

        game.handle(Command::Move(Direction::Right));
        assert_eq!(game.level.score(), 1);
    }

    #[test]
    fn solved_level_starts_ended() {
        let level = Level::from_text("#####\n#@ .#\n#####").unwrap();
        let game = Game::new(level, 3, Settings::default());
        assert_eq!(game.state, GameState::Ended);
        assert_eq!(game.level_index(), 3);
    }

    #[test]
    fn palette() {
        assert_eq!(color_for(Tile::Wall), egui::Color32::from_rgb(91, 59, 17));
        assert_eq!(color_for(Tile::CrateOnStorage), egui::Color32::GREEN);
        assert_eq!(color_for(Tile::ManOnStorage), egui::Color32::RED);
    }

    #[test]
    fn timer() {
        let mut timer = Timer::default();
        timer.update(1.0);
        assert_eq!(timer.duration(), std::time::Duration::ZERO);

        timer.start();
        timer.update(1.0);
        timer.update(63.5);
        assert_eq!(timer.duration().as_secs(), 62);
        assert_eq!(timer.to_string(), "01:02");

        timer.stop();
        timer.update(100.0);
        assert_eq!(timer.duration().as_secs(), 62);
    }

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
    }

    impl Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_owned(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn settings_persistence() {
        let mut storage = MemoryStorage::default();
        assert_eq!(Settings::read(&storage), Settings::default());

        let settings = Settings {
            tile_size: 48,
            last_level: 2,
        };
        settings.write(&mut storage);
        assert_eq!(Settings::read(&storage), settings);

        storage.set_string("tile_size", "200".to_owned());
        storage.set_string("last_level", "two".to_owned());
        let settings = Settings::read(&storage);
        assert_eq!(settings.tile_size, Settings::MAX_TILE_SIZE);
        assert_eq!(settings.last_level, 0);
    }
}
