use crate::grid::{Grid, Position};

use super::{LevelError, Tile};

/// Turn the text of a level into a grid of tiles and locate the character.
///
/// One line per row and one character per cell. Line terminators and trailing whitespace are
/// dropped, leading blanks are kept since they position the row.
pub(super) fn parse(source: &str) -> Result<(Grid<Tile>, Position), LevelError> {
    let rows = source
        .lines()
        .enumerate()
        .map(|(index, line)| parse_line(index, line))
        .collect::<Result<Vec<_>, _>>()?;

    let tiles = Grid::from_rows(rows);
    let character = find_character(&tiles)?;
    Ok((tiles, character))
}

fn parse_line(index: usize, line: &str) -> Result<Vec<Tile>, LevelError> {
    line.trim_end()
        .chars()
        .enumerate()
        .map(|(column, c)| {
            Tile::try_from(c).map_err(|character| LevelError::InvalidLevelFormat {
                character,
                line: index + 1,
                column: column + 1,
            })
        })
        .collect()
}

fn find_character(tiles: &Grid<Tile>) -> Result<Position, LevelError> {
    let mut found = tiles
        .indexed_iter()
        .filter(|(_, tile)| tile.is_character())
        .map(|(pos, _)| pos);

    let first = found.next().ok_or(LevelError::MissingCharacter)?;
    let others = found.count();
    if others > 0 {
        return Err(LevelError::MultipleCharacters(others + 1));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_character() {
        let row = parse_line(0, "#@o$.*+ ").unwrap();
        assert_eq!(
            row,
            vec![
                Tile::Wall,
                Tile::Man,
                Tile::Crate,
                Tile::Crate,
                Tile::Storage,
                Tile::CrateOnStorage,
                Tile::ManOnStorage,
            ]
        );
    }

    #[test]
    fn ragged_rows_and_line_endings() {
        let (tiles, character) = parse("####\r\n# @\n#\n").unwrap();
        assert_eq!(tiles.rows(), 3);
        assert_eq!(tiles.cols(), 4);
        assert_eq!(tiles.get(Position::new(3, 1)), None);
        assert_eq!(tiles.get(Position::new(1, 2)), None);
        assert_eq!(character, Position::new(2, 1));
    }

    #[test]
    fn leading_blanks_are_cells() {
        let (tiles, character) = parse("  ###\n  #@#\n  ###").unwrap();
        assert_eq!(tiles.get(Position::new(0, 1)), Some(&Tile::Empty));
        assert_eq!(character, Position::new(3, 1));
    }

    #[test]
    fn invalid_character() {
        let result = parse("#####\n#@ x#\n#####");
        assert!(matches!(
            result,
            Err(LevelError::InvalidLevelFormat {
                character: 'x',
                line: 2,
                column: 4
            })
        ));
    }

    #[test]
    fn missing_character() {
        assert!(matches!(parse("#####\n# $.#\n#####"), Err(LevelError::MissingCharacter)));
        assert!(matches!(parse(""), Err(LevelError::MissingCharacter)));
    }

    #[test]
    fn multiple_characters() {
        assert!(matches!(
            parse("#####\n#@+@#\n#####"),
            Err(LevelError::MultipleCharacters(3))
        ));
    }

    #[test]
    fn deterministic() {
        let source = "#####\n#@$.#\n#####";
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }
}
