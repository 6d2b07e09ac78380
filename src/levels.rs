use std::path::Path;

use crate::level::{Level, LevelError};

const BUILTIN: &str = include_str!("../levels/builtin.txt");

/// A collection of levels, e.g. all levels of a level file.
#[derive(Clone, Debug)]
pub struct Levels {
    levels: Vec<Level>,
}

impl Levels {
    /// Parse a text holding several levels.
    ///
    /// Lines starting with `;` (after optional blanks) are comments and end the current level,
    /// as do blank lines. Every level is validated; the first invalid level aborts parsing and is
    /// reported with its 1-based number.
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        let mut current = String::new();

        for line in contents.lines() {
            if line.trim_start().starts_with(';') || line.trim().is_empty() {
                push_level(&mut current, &mut levels)?;
                continue;
            }
            current.push_str(line);
            current.push('\n');
        }
        push_level(&mut current, &mut levels)?;

        log::debug!("parsed {} levels", levels.len());
        Ok(Levels { levels })
    }

    /// Read a level file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// The levels shipped with the game.
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_text(BUILTIN)
    }

    /// A fresh copy of the level at `index` (0-based).
    pub fn get(&self, index: usize) -> Option<Level> {
        self.levels.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Parse the accumulated lines of a level, if any, and append the level.
fn push_level(current: &mut String, levels: &mut Vec<Level>) -> Result<(), LevelError> {
    if current.is_empty() {
        return Ok(());
    }
    let number = levels.len() + 1;
    let level = Level::from_text(current.trim_end()).map_err(|err| LevelError::InvalidLevel {
        number,
        source: Box::new(err),
    })?;
    levels.push(level);
    current.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn from_text_with_comments() {
        let level1 = "####\n#@.#\n####";
        let level2 = "  #####\n###@$.#\n  #####";
        let contents = format!("; first\n\n{level1}\n\n; second\n{level2}\n");

        let levels = Levels::from_text(&contents).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels.get(0).unwrap().to_string(), level1);
        assert_eq!(levels.get(1).unwrap().to_string(), level2);
        assert!(levels.get(2).is_none());
    }

    #[test]
    fn blank_lines_separate_levels() {
        let contents = "#@.#\n   \n#.@#\n\n\n#+#";
        let levels = Levels::from_text(contents).unwrap();
        assert_eq!(levels.len(), 3);
        assert!(levels.get(2).unwrap().solved());
    }

    #[test]
    fn invalid_level_is_numbered() {
        let contents = "; 1\n#@.#\n; 2\n#@@#\n; 3\n#@x#\n";
        let err = Levels::from_text(contents).unwrap_err();
        match err {
            LevelError::InvalidLevel { number, source } => {
                assert_eq!(number, 2);
                assert!(matches!(*source, LevelError::MultipleCharacters(2)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_collection() {
        let levels = Levels::from_text("; nothing here\n\n").unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(Levels::from_file("nonexistent_levels.txt"), Err(LevelError::Io(_))));
    }

    #[test]
    fn levels_are_independent_copies() {
        let levels = Levels::builtin().unwrap();
        let mut level = levels.get(0).unwrap();
        level.try_move(Direction::Right);
        assert!(level.solved());
        assert!(!levels.get(0).unwrap().solved());
    }

    #[test]
    fn builtin_levels_are_solvable() {
        use Direction::*;
        let levels = Levels::builtin().unwrap();
        assert_eq!(levels.len(), 4);

        let solutions: [&[Direction]; 4] = [
            &[Right],
            &[Up, Up, Right, Down, Up, Right, Down],
            &[
                Right, Right, Down, Right, Right, Up, Up, Up, Left, Left, Left, Left, Down, Down,
                Right, Right, Right,
            ],
            &[Down, Down, Right, Right, Up, Up, Left, Right, Down, Down, Right],
        ];

        for (index, solution) in solutions.iter().enumerate() {
            let mut level = levels.get(index).unwrap();
            assert!(!level.solved());
            for &direction in solution.iter() {
                assert!(level.can_move(direction), "level {}: {direction} blocked", index + 1);
                level.try_move(direction);
            }
            assert!(level.solved(), "level {} not solved:\n{level}", index + 1);
        }
    }
}
