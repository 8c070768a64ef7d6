//! Kitchen layouts: terrain grids and player start positions.

use super::Position;
use crate::{OvercookedError, Result};

/// Static terrain occupying a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Floor,
    Counter,
    Pot,
    OnionDispenser,
    TomatoDispenser,
    DishDispenser,
    Serving,
}

impl Terrain {
    /// Parse a layout character. Player digits are handled by the layout parser.
    pub fn from_char(c: char) -> Option<Terrain> {
        match c {
            ' ' => Some(Terrain::Floor),
            'X' => Some(Terrain::Counter),
            'P' => Some(Terrain::Pot),
            'O' => Some(Terrain::OnionDispenser),
            'T' => Some(Terrain::TomatoDispenser),
            'D' => Some(Terrain::DishDispenser),
            'S' => Some(Terrain::Serving),
            _ => None,
        }
    }

    /// Layout character for this terrain
    pub const fn symbol(self) -> char {
        match self {
            Terrain::Floor => ' ',
            Terrain::Counter => 'X',
            Terrain::Pot => 'P',
            Terrain::OnionDispenser => 'O',
            Terrain::TomatoDispenser => 'T',
            Terrain::DishDispenser => 'D',
            Terrain::Serving => 'S',
        }
    }

    /// Players may only stand on floor
    pub const fn is_walkable(self) -> bool {
        matches!(self, Terrain::Floor)
    }
}

/// Names of the built-in layouts
pub const LAYOUT_NAMES: [&str; 5] = [
    "cramped_room",
    "asymmetric_advantages",
    "coordination_ring",
    "forced_coordination",
    "counter_circuit",
];

fn builtin_rows(name: &str) -> Option<&'static [&'static str]> {
    let rows: &'static [&'static str] = match name {
        "cramped_room" => &[
            "XXPXX",
            "O  2O",
            "X1  X",
            "XDXSX",
        ],
        "asymmetric_advantages" => &[
            "XXXXXXXXX",
            "O XSXOX S",
            "X   P   X",
            "X2  P  1X",
            "XXXDXDXXX",
        ],
        "coordination_ring" => &[
            "XXXPX",
            "X  1P",
            "D2X X",
            "O   X",
            "XOSXX",
        ],
        "forced_coordination" => &[
            "XXXPX",
            "O X1P",
            "O2X X",
            "D X X",
            "XXXSX",
        ],
        "counter_circuit" => &[
            "XXXPPXXX",
            "X      X",
            "D XXXX S",
            "X2    1X",
            "XXXOOXXX",
        ],
        _ => return None,
    };
    Some(rows)
}

/// A parsed kitchen: static terrain plus where each player starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    name: String,
    width: usize,
    height: usize,
    /// Row-major terrain, `terrain[y * width + x]`
    terrain: Vec<Terrain>,
    /// Start position of player `i` (from digit `i + 1`)
    start_positions: Vec<Position>,
}

impl Layout {
    /// Load one of the built-in layouts by name
    pub fn named(name: &str) -> Result<Self> {
        let rows = builtin_rows(name).ok_or_else(|| OvercookedError::UnknownLayout(name.to_string()))?;
        Self::from_rows(name, rows)
    }

    /// Parse a layout from a multi-line grid. Blank lines are ignored.
    pub fn parse(name: &str, grid: &str) -> Result<Self> {
        let rows: Vec<&str> = grid
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        Self::from_rows(name, &rows)
    }

    /// Build a layout from its rows.
    ///
    /// Rows must have equal length, the border must not be walkable, and player
    /// digits must be unique and contiguous starting at `1`.
    pub fn from_rows(name: &str, rows: &[&str]) -> Result<Self> {
        let invalid = |reason: String| OvercookedError::InvalidLayout {
            name: name.to_string(),
            reason,
        };

        if rows.is_empty() {
            return Err(invalid("layout has no rows".to_string()));
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut terrain = Vec::with_capacity(width * height);
        let mut players: Vec<(usize, Position)> = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(invalid(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                if let Some(digit) = c.to_digit(10).filter(|&d| d > 0) {
                    let idx = digit as usize - 1;
                    if players.iter().any(|&(i, _)| i == idx) {
                        return Err(invalid(format!("player {} appears twice", digit)));
                    }
                    players.push((idx, (x, y)));
                    terrain.push(Terrain::Floor);
                } else {
                    let t = Terrain::from_char(c)
                        .ok_or_else(|| invalid(format!("unknown character '{}' at ({}, {})", c, x, y)))?;
                    terrain.push(t);
                }
            }
        }

        if players.is_empty() {
            return Err(invalid("layout has no players".to_string()));
        }
        players.sort_by_key(|&(i, _)| i);
        if players.iter().enumerate().any(|(expected, &(i, _))| expected != i) {
            return Err(invalid("player numbers must be contiguous from 1".to_string()));
        }

        let layout = Self {
            name: name.to_string(),
            width,
            height,
            terrain,
            start_positions: players.into_iter().map(|(_, p)| p).collect(),
        };

        for y in 0..height {
            for x in 0..width {
                let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if on_border && layout.terrain[y * width + x].is_walkable() {
                    return Err(invalid(format!("border cell ({}, {}) is walkable", x, y)));
                }
            }
        }

        Ok(layout)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of players the layout places
    pub fn num_players(&self) -> usize {
        self.start_positions.len()
    }

    pub fn start_positions(&self) -> &[Position] {
        &self.start_positions
    }

    /// Terrain at `pos`, or `None` when out of bounds
    pub fn terrain(&self, pos: Position) -> Option<Terrain> {
        let (x, y) = pos;
        if x < self.width && y < self.height {
            Some(self.terrain[y * self.width + x])
        } else {
            None
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.terrain(pos).is_some_and(Terrain::is_walkable)
    }

    /// All cells of the given terrain type, in row-major order
    pub fn positions_of(&self, kind: Terrain) -> Vec<Position> {
        self.terrain
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == kind)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_layouts_parse() {
        for name in LAYOUT_NAMES {
            let layout = Layout::named(name).unwrap();
            assert_eq!(layout.name(), name);
            assert_eq!(layout.num_players(), 2, "{name} should have two players");
            assert!(!layout.positions_of(Terrain::Serving).is_empty());
            assert!(!layout.positions_of(Terrain::Pot).is_empty());
            for &p in layout.start_positions() {
                assert!(layout.is_walkable(p));
            }
        }
    }

    #[test]
    fn test_cramped_room_shape() {
        let layout = Layout::named("cramped_room").unwrap();
        assert_eq!((layout.width(), layout.height()), (5, 4));
        assert_eq!(layout.start_positions(), &[(1, 2), (3, 1)]);
        assert_eq!(layout.positions_of(Terrain::Pot), vec![(2, 0)]);
        assert_eq!(layout.terrain((3, 3)), Some(Terrain::Serving));
        assert_eq!(layout.terrain((5, 0)), None);
    }

    #[test]
    fn test_unknown_layout() {
        let err = Layout::named("nope").unwrap_err();
        assert!(matches!(err, OvercookedError::UnknownLayout(ref n) if n == "nope"));
    }

    #[test]
    fn test_parse_rejects_bad_grids() {
        let ragged = Layout::parse("ragged", "XXX\nX1XX\nXXX");
        assert!(matches!(ragged, Err(OvercookedError::InvalidLayout { .. })));

        let open_border = Layout::parse("open", "XXX\n 1X\nXXX");
        assert!(matches!(open_border, Err(OvercookedError::InvalidLayout { .. })));

        let no_players = Layout::parse("empty", "XXX\nX X\nXXX");
        assert!(matches!(no_players, Err(OvercookedError::InvalidLayout { .. })));

        let unknown = Layout::parse("weird", "XXXX\nX1QX\nXXXX");
        assert!(matches!(unknown, Err(OvercookedError::InvalidLayout { .. })));

        let gap = Layout::parse("gap", "XXXXX\nX1 3X\nXXXXX");
        assert!(matches!(gap, Err(OvercookedError::InvalidLayout { .. })));
    }

    #[test]
    fn test_parse_custom_layout() {
        let layout = Layout::parse("tiny", "\nXPXX\nO12S\nXDXX\n").unwrap();
        assert_eq!((layout.width(), layout.height()), (4, 3));
        assert_eq!(layout.start_positions(), &[(1, 1), (2, 1)]);
        assert_eq!(layout.terrain((3, 1)), Some(Terrain::Serving));
    }
}
