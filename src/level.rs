mod parser;
mod tile;

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::direction::Direction;
use crate::grid::{Grid, Position};

pub use tile::Tile;

/// A Sokoban level being played.
///
/// The level owns the grid of tiles, the position of the character, the history of moves (for
/// undo) and whether the level is solved. Every mutating operation returns an [`Update`] listing
/// the tiles it changed, which a view can use to repaint incrementally.
#[derive(Clone, Debug)]
pub struct Level {
    source: String,
    initial: Grid<Tile>,
    initial_character: Position,
    tiles: Grid<Tile>,
    character: Position,
    moves: Vec<Move>,
    solved: bool,
    changes: Vec<TileChange>, // collected while an operation runs, handed out with its Update
}

impl Level {
    /// Parse a level from its text representation.
    ///
    /// The text must contain exactly one character (`@` or `+`).
    pub fn from_text(source: impl Into<String>) -> Result<Self, LevelError> {
        let source = source.into();
        let (tiles, character) = parser::parse(&source)?;

        let mut level = Level {
            source,
            initial: tiles.clone(),
            initial_character: character,
            tiles,
            character,
            moves: Vec::new(),
            solved: false,
            changes: Vec::new(),
        };
        level.solved = level.crates_left() == 0;
        Ok(level)
    }

    /// Read a level from a stream, e.g. an open file.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, LevelError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Self::from_text(source)
    }

    /// Read a level from the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_text(source)
    }

    /// The text the level was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Immutable access to the grid of tiles.
    pub fn grid(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// The tile at `pos`. Positions outside the grid are empty.
    pub fn get(&self, pos: Position) -> Tile {
        self.tiles.get_or_default(pos)
    }

    pub fn character_position(&self) -> Position {
        self.character
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The number of moves made so far. Undoing a move decreases the score.
    pub fn score(&self) -> usize {
        self.moves.len()
    }

    /// Return true if no crate is left outside a storage cell.
    pub fn solved(&self) -> bool {
        self.solved
    }

    /// The number of crates not yet on a storage cell.
    pub fn crates_left(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == Tile::Crate).count()
    }

    /// Return true if the character can walk in `direction`, pushing at most one crate.
    pub fn can_move(&self, direction: Direction) -> bool {
        let ahead = self.character.step(direction, 1);
        let beyond = self.character.step(direction, 2);
        if !ahead.is_non_negative() {
            return false;
        }

        match self.get(ahead) {
            Tile::Empty | Tile::Storage => true,
            Tile::Wall | Tile::Man | Tile::ManOnStorage => false,
            Tile::Crate | Tile::CrateOnStorage => {
                beyond.is_non_negative() && self.get(beyond).is_free()
            }
        }
    }

    /// Walk in `direction` if possible. An illegal move leaves the level untouched and returns an
    /// empty update.
    pub fn try_move(&mut self, direction: Direction) -> Update {
        if !self.can_move(direction) {
            log::debug!("move {direction} from {} is blocked", self.character);
            return Update::default();
        }
        let solved = self.make_move(direction, true, true);
        self.finish(solved)
    }

    /// Take back the last move, including a crate it pushed. Does nothing if no move was made.
    pub fn undo(&mut self) -> Update {
        let Some(&last) = self.moves.last() else {
            return Update::default();
        };

        let from = self.character;
        let crate_pos = from.step(last.direction, 1);
        let crate_tile = self.get(crate_pos);
        let restored = if self.get(from) == Tile::ManOnStorage {
            Tile::CrateOnStorage
        } else {
            Tile::Crate
        };

        self.make_move(-last.direction, false, false);

        if last.moved_crate {
            let cleared = match crate_tile {
                Tile::CrateOnStorage => Tile::Storage,
                _ => Tile::Empty,
            };
            self.set(crate_pos, cleared);
            self.set(from, restored);
        }

        self.moves.pop();
        log::debug!("undid move {}, {} moves left", last.direction, self.moves.len());

        let solved = self.check_solved();
        self.finish(solved)
    }

    /// Restore the level to the state it was parsed in and forget all moves.
    ///
    /// Every cell is reported as changed.
    pub fn reset(&mut self) -> Update {
        let stale: Vec<Position> = self
            .tiles
            .indexed_iter()
            .map(|(pos, _)| pos)
            .filter(|pos| !self.initial.contains(*pos))
            .collect();

        self.tiles = self.initial.clone();
        self.character = self.initial_character;
        self.moves.clear();
        self.solved = self.crates_left() == 0;

        self.changes.extend(stale.into_iter().map(|position| TileChange {
            position,
            tile: Tile::Empty,
        }));
        self.changes.extend(
            self.tiles
                .indexed_iter()
                .map(|(position, &tile)| TileChange { position, tile }),
        );
        log::debug!("level reset");

        self.finish(false)
    }

    /// Move the character one step, pushing a crate if there is one.
    ///
    /// `undo` replays moves backwards with both flags unset, so the replay is neither recorded
    /// nor checked for a solution. Returns true if the level became solved.
    fn make_move(&mut self, direction: Direction, check_for_solve: bool, count_move: bool) -> bool {
        let from = self.character;
        let ahead = from.step(direction, 1);
        let beyond = from.step(direction, 2);

        let vacated = if self.get(from) == Tile::ManOnStorage {
            Tile::Storage
        } else {
            Tile::Empty
        };

        let (character, pushed) = match (self.get(ahead), self.get(beyond)) {
            (Tile::Empty, _) => (Tile::Man, None),
            (Tile::Storage, _) => (Tile::ManOnStorage, None),
            (Tile::Crate, Tile::Empty) => (Tile::Man, Some(Tile::Crate)),
            (Tile::Crate, Tile::Storage) => (Tile::Man, Some(Tile::CrateOnStorage)),
            (Tile::CrateOnStorage, Tile::Empty) => (Tile::ManOnStorage, Some(Tile::Crate)),
            (Tile::CrateOnStorage, Tile::Storage) => {
                (Tile::ManOnStorage, Some(Tile::CrateOnStorage))
            }
            _ => return false,
        };

        if !ahead.is_non_negative() || (pushed.is_some() && !beyond.is_non_negative()) {
            return false;
        }

        if count_move {
            self.moves.push(Move {
                direction,
                moved_crate: pushed.is_some(),
            });
        }

        if let Some(crate_tile) = pushed {
            self.set(beyond, crate_tile);
        }
        self.set(ahead, character);
        self.set(from, vacated);
        self.character = ahead;

        if count_move {
            log::debug!("moved {direction} to {ahead}, pushed crate: {}", pushed.is_some());
        }

        check_for_solve && self.check_solved()
    }

    /// Store `tile` at `pos` and record the change.
    fn set(&mut self, pos: Position, tile: Tile) {
        if self.tiles.set(pos, tile) {
            self.changes.push(TileChange {
                position: pos,
                tile,
            });
        }
    }

    /// Recompute the solved flag. Returns true only if the level went from unsolved to solved.
    fn check_solved(&mut self) -> bool {
        let was_solved = self.solved;
        self.solved = self.crates_left() == 0;

        let became_solved = self.solved && !was_solved;
        if became_solved {
            log::info!("level solved with {} moves", self.score());
        }
        became_solved
    }

    fn finish(&mut self, solved: bool) -> Update {
        Update {
            changes: std::mem::take(&mut self.changes),
            solved,
        }
    }
}

impl std::str::FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_text(s)
    }
}

/// Renders the current state in the text format the level was parsed from.
impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.tiles.rows() {
            if y > 0 {
                writeln!(f)?;
            }
            for &tile in self.tiles.row(y).unwrap_or_default() {
                write!(f, "{}", char::from(tile))?;
            }
        }
        Ok(())
    }
}

/// One step of the character, as recorded in the undo history.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Move {
    pub direction: Direction,
    pub moved_crate: bool,
}

/// A single cell which received a new tile.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TileChange {
    pub position: Position,
    pub tile: Tile,
}

/// The outcome of a mutating operation on a [`Level`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Update {
    /// The changed cells in the order they were written. A cell may appear more than once.
    pub changes: Vec<TileChange>,
    /// True if the operation solved the level. A level which stays solved does not report again.
    pub solved: bool,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && !self.solved
    }

    /// Replay the update to an observer.
    pub fn notify<O: LevelObserver + ?Sized>(&self, observer: &mut O) {
        for change in &self.changes {
            observer.tile_changed(change.position, change.tile);
        }
        if self.solved {
            observer.level_solved();
        }
    }
}

/// Receives the notifications contained in an [`Update`].
pub trait LevelObserver {
    fn tile_changed(&mut self, _position: Position, _tile: Tile) {}

    fn level_solved(&mut self) {}
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("'{character}' isn't a valid level character (line {line}, column {column})")]
    InvalidLevelFormat {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("the level has no character ('@' or '+')")]
    MissingCharacter,
    #[error("the level has {0} characters, expected exactly one")]
    MultipleCharacters(usize),
    #[error("level {number}: {source}")]
    InvalidLevel {
        number: usize,
        source: Box<LevelError>,
    },
    #[error("could not read level: {0}")]
    Io(#[from] std::io::Error),
}
