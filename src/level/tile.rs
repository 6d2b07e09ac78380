/// The contents of a single cell of a level.
///
/// Storage cells are goals for the crates. A crate or the character standing on a storage cell is
/// a variant of its own, so a single tile fully describes its cell.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, strum::Display, strum::EnumIter)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Storage,
    Crate,
    CrateOnStorage,
    Man,
    ManOnStorage,
}

impl Tile {
    /// True for tiles the character or a crate can be moved onto.
    pub fn is_free(self) -> bool {
        matches!(self, Tile::Empty | Tile::Storage)
    }

    pub fn is_crate(self) -> bool {
        matches!(self, Tile::Crate | Tile::CrateOnStorage)
    }

    pub fn is_character(self) -> bool {
        matches!(self, Tile::Man | Tile::ManOnStorage)
    }

    pub fn on_storage(self) -> bool {
        matches!(self, Tile::Storage | Tile::CrateOnStorage | Tile::ManOnStorage)
    }
}

impl TryFrom<char> for Tile {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '@' => Ok(Tile::Man),
            'o' | '$' => Ok(Tile::Crate),
            '#' => Ok(Tile::Wall),
            '.' => Ok(Tile::Storage),
            '*' => Ok(Tile::CrateOnStorage),
            '+' => Ok(Tile::ManOnStorage),
            ' ' => Ok(Tile::Empty),
            _ => Err(value),
        }
    }
}

impl From<Tile> for char {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Storage => '.',
            Tile::Crate => '$',
            Tile::CrateOnStorage => '*',
            Tile::Man => '@',
            Tile::ManOnStorage => '+',
        }
    }
}
