//! Level definitions and the ordered level registry
//!
//! A level is a grid of symbols. Grid line `world_offset_lines` is drawn at
//! the top of the screen when the level starts; the section is complete
//! once the viewport has scrolled up to line 0.

use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::consts::{BLOCK_SIZE, VISIBLE_LINES};
use crate::error::GameError;

/// Grid cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Water,
    Land,
    Bridge,
    FuelDepot,
    Ship,
    Helicopter,
    Jet,
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(Cell::Water),
            'L' => Some(Cell::Land),
            'B' => Some(Cell::Bridge),
            'F' => Some(Cell::FuelDepot),
            'S' => Some(Cell::Ship),
            'H' => Some(Cell::Helicopter),
            'J' => Some(Cell::Jet),
            _ => None,
        }
    }

    /// Neighbouring cells of this kind merge into one actor
    fn merges(&self) -> bool {
        matches!(self, Cell::Land | Cell::Bridge)
    }
}

/// A horizontal run of equal cells (length 1 for non-merging cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRun {
    pub line: usize,
    pub column: usize,
    pub len: usize,
    pub cell: Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    name: String,
    number: u32,
    world: Vec<String>,
    world_offset_columns: i32,
    world_offset_lines: i32,
}

impl Level {
    pub fn new(
        name: impl Into<String>,
        number: u32,
        world: Vec<String>,
        world_offset_columns: i32,
        world_offset_lines: i32,
    ) -> Result<Self, GameError> {
        let level = Self {
            name: name.into(),
            number,
            world,
            world_offset_columns,
            world_offset_lines,
        };
        level.validate()?;
        Ok(level)
    }

    fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: String| GameError::InvalidLevel {
            name: self.name.clone(),
            reason,
        };

        let Some(first) = self.world.first() else {
            return Err(invalid("world has no lines".to_string()));
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(invalid("world lines are empty".to_string()));
        }
        for (line, row) in self.world.iter().enumerate() {
            if row.chars().count() != width {
                return Err(invalid(format!(
                    "line {line} has {} columns, expected {width}",
                    row.chars().count()
                )));
            }
            if let Some((column, symbol)) = row
                .chars()
                .enumerate()
                .find(|(_, c)| Cell::from_symbol(*c).is_none())
            {
                return Err(invalid(format!(
                    "unknown symbol {symbol:?} at line {line}, column {column}"
                )));
            }
        }
        if self.world_offset_lines < 0 || (self.world_offset_lines as usize) > self.world.len() {
            return Err(invalid(format!(
                "line offset {} outside 0..={}",
                self.world_offset_lines,
                self.world.len()
            )));
        }
        if self.world_offset_columns < 0 {
            return Err(invalid(format!(
                "negative column offset {}",
                self.world_offset_columns
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn world(&self) -> &[String] {
        &self.world
    }

    pub fn world_offset_columns(&self) -> i32 {
        self.world_offset_columns
    }

    pub fn world_offset_lines(&self) -> i32 {
        self.world_offset_lines
    }

    /// Scroll distance at which the section is complete
    pub fn terminal_scroll(&self) -> f32 {
        self.world_offset_lines as f32 * BLOCK_SIZE
    }

    /// Screen position of a cell's top-left corner before any scrolling
    pub fn cell_origin(&self, column: usize, line: usize) -> Position {
        Position::new(
            (self.world_offset_columns as f32 + column as f32) * BLOCK_SIZE,
            (line as f32 - self.world_offset_lines as f32) * BLOCK_SIZE,
        )
    }

    /// Non-water cells as runs, top line first, left to right
    pub fn runs(&self) -> Vec<CellRun> {
        let mut runs = Vec::new();
        for (line, row) in self.world.iter().enumerate() {
            let mut current: Option<CellRun> = None;
            for (column, symbol) in row.chars().enumerate() {
                // Validated at construction
                let cell = Cell::from_symbol(symbol).unwrap_or(Cell::Water);
                if let Some(run) = current.as_mut() {
                    if run.cell == cell && cell.merges() {
                        run.len += 1;
                        continue;
                    }
                    runs.push(*run);
                    current = None;
                }
                if cell != Cell::Water {
                    current = Some(CellRun {
                        line,
                        column,
                        len: 1,
                        cell,
                    });
                }
            }
            runs.extend(current);
        }
        runs
    }
}

/// Result of moving the level cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAdvance {
    /// Cursor moved to this index
    Next(usize),
    /// Already on the last level; cursor unchanged
    AtEnd,
}

/// Ordered, non-empty list of levels with a current-level cursor
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    levels: Vec<Level>,
    current: usize,
}

impl LevelRegistry {
    pub fn new(levels: Vec<Level>) -> Result<Self, GameError> {
        if levels.is_empty() {
            return Err(GameError::EmptyLevelRegistry);
        }
        Ok(Self { levels, current: 0 })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        for level in &levels {
            level.validate()?;
        }
        log::info!("Loaded {} levels", levels.len());
        Self::new(levels)
    }

    /// The five levels shipped with the game
    pub fn built_in() -> Result<Self, GameError> {
        let grids: [(&str, &[&str]); 5] = [
            ("Delta", &LEVEL_1),
            ("Canyon", &LEVEL_2),
            ("Narrows", &LEVEL_3),
            ("Rapids", &LEVEL_4),
            ("Headwaters", &LEVEL_5),
        ];
        let levels = grids
            .iter()
            .enumerate()
            .map(|(i, (name, grid))| {
                let world: Vec<String> = grid.iter().map(|row| row.to_string()).collect();
                let offset_lines = (world.len() - VISIBLE_LINES) as i32;
                Level::new(*name, i as u32 + 1, world, 0, offset_lines)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels)
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn has_next_level(&self) -> bool {
        self.current + 1 < self.levels.len()
    }

    /// Move the cursor forward by exactly one
    pub fn advance(&mut self) -> LevelAdvance {
        if self.has_next_level() {
            self.current += 1;
            LevelAdvance::Next(self.current)
        } else {
            LevelAdvance::AtEnd
        }
    }

    /// Back to the first level
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Jump to a level by index
    pub fn select(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.levels.len() {
            return Err(GameError::LevelOutOfRange {
                index,
                len: self.levels.len(),
            });
        }
        self.current = index;
        Ok(())
    }
}

const LEVEL_1: [&str; 60] = [
    "LLL................LLLLL",
    "LLL................LLLLL",
    "LLLL...............LLLLL",
    "LLLL...............LLLLL",
    "LLLLL...............LLLL",
    "LLLLL...............LLLL",
    "LLLLL...............LLLL",
    "LLLLL................LLL",
    "LLLLL................LLL",
    "LLLLL................LLL",
    "LLLL..................LL",
    "LLLL..................LL",
    "LLLL..................LL",
    "LLLBBBBBBBBBBBBBBBBBBBBL",
    "LLL....................L",
    "LL.....................L",
    "LL....H................L",
    "LL.....................L",
    "L......................L",
    "L......................L",
    "L......................L",
    "L...H.................LL",
    "L.....................LL",
    "L.....................LL",
    "LL...................LLL",
    "LL...................LLL",
    "LL..............S....LLL",
    "LLL.................LLLL",
    "LLL.................LLLL",
    "LLLL................LLLL",
    "LLLL...........S...LLLLL",
    "LLLL...............LLLLL",
    "LLLLL..............LLLLL",
    "LLLLL..............LLLLL",
    "LLLLL...........H..LLLLL",
    "LLLLL..............LLLLL",
    "LLLLL..............LLLLL",
    "LLLLL...............LLLL",
    "LLLL................LLLL",
    "LLLL...........S....LLLL",
    "LLL.................LLLL",
    "LLL..................LLL",
    "LLL..................LLL",
    "LL...............S....LL",
    "LL....................LL",
    "L.....................LL",
    "L......................L",
    "L......................L",
    "L......................L",
    "L......................L",
    "L......................L",
    "LL.....................L",
    "LL.....................L",
    "LL.....................L",
    "LLL...................LL",
    "LLL...................LL",
    "LLLL..................LL",
    "LLLL.................LLL",
    "LLLL.................LLL",
    "LLLL.................LLL",
];

const LEVEL_2: [&str; 60] = [
    "LLLLL................LLL",
    "LLLLL.................LL",
    "LLLLLL................LL",
    "LLLLLL.................L",
    "LLLLL..................L",
    "LLLLL..................L",
    "LLLLL..................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLL....................L",
    "LLL....................L",
    "LL.....................L",
    "L......................L",
    "LBBBBBBBBBBBBBBBBBBBBBLL",
    "L.....................LL",
    "L....................LLL",
    "L.......S............LLL",
    "L...................LLLL",
    "L...................LLLL",
    "L............J......LLLL",
    "L..................LLLLL",
    "LL.................LLLLL",
    "LL.................LLLLL",
    "LLL............H..LLLLLL",
    "LLLL..............LLLLLL",
    "LLLL..............LLLLLL",
    "LLLLL..............LLLLL",
    "LLLLL..............LLJLL",
    "LLLLL..............LLLLL",
    "LLLLLL.............LLLLL",
    "LLLLLL..............LLLL",
    "LLLLLL..............LLLL",
    "LLLLL..J.............LLL",
    "LLLLL................LLL",
    "LLLL..................LL",
    "LLLL............S.....LL",
    "LLL....................L",
    "LLL....................L",
    "LL.....................L",
    "LL.....................L",
    "L....................F.L",
    "L......................L",
    "L......................L",
    "L......................L",
    "L......................L",
    "L......................L",
    "L.....................LL",
    "L.....................LL",
    "LL...................LLL",
    "LL...................LLL",
    "LLL.................LLLL",
    "LLL.................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
];

const LEVEL_3: [&str; 60] = [
    "LLLLLL.................L",
    "LLLLLL.................L",
    "LLLLL..................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLL...................LL",
    "LL....................LL",
    "LL...................LLL",
    "L...................LLLL",
    "L...................LLLL",
    "L..................LLLLL",
    "L..................LLLLL",
    "L.................LLLLLL",
    "LBBBBBBBBBBBBBBBBBLLLLLL",
    "L.................LLLLLL",
    "L.................LLLLLL",
    "L.................LLJLLL",
    "LL................LLLLLL",
    "LLL...............LLLLLL",
    "LLL................LLLLL",
    "LLLL...............LLLLL",
    "LLLLL...H...........LLLL",
    "LLLLL...............LLLL",
    "LLLLLL...............LLL",
    "LLLLLL...............LLL",
    "LLLLLL........H.......LL",
    "LLLLLL................LL",
    "LLLLLL.................L",
    "LLLLLL.................L",
    "LLLLL...F..............L",
    "LLLLL..................L",
    "LLLL...................L",
    "LLL....................L",
    "LL.....................L",
    "LLJ....................L",
    "L......................L",
    "L......................L",
    "L......................L",
    "L..H..................LL",
    "L.....................LL",
    "L....................LLL",
    "L...................LLLL",
    "L...................LLLL",
    "L..........S.......LLLLL",
    "LL..................LLLL",
    "LL..................LLLL",
    "LLL.................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL.................LLL",
    "LLLL.................LLL",
    "LLLL..................LL",
    "LLL...................LL",
];

const LEVEL_4: [&str; 60] = [
    "LLLLL...............LLLL",
    "LLLL...............LLLLL",
    "LLL...............LLLLLL",
    "L.................LLLLLL",
    "L.................LLLLLL",
    "L................LLLLLLL",
    "L................LLLLLLL",
    "L................LLLLLLL",
    "L................LLLLLLL",
    "L.................LLLLLL",
    "L.................LLLLLL",
    "L..................LLLLL",
    "L..................LLLLL",
    "LLBBBBBBBBBBBBBBBBBBLLLL",
    "LLL..................LLL",
    "LLLL.................LLL",
    "LLLL..............J...LL",
    "LLLLL..................L",
    "LLLLLLL................L",
    "LLLLLLL............H...L",
    "LLLLLLLL...............L",
    "LLLLLLL................L",
    "LLLLLLL................L",
    "LLLLLL............J....L",
    "LLLLLL.................L",
    "LLLLL..................L",
    "LLLLL..................L",
    "LJLLL..................L",
    "LLLL...................L",
    "LLL...................LL",
    "L................S....LL",
    "L....................LLL",
    "L...................LLLL",
    "L...................LLLL",
    "L..J...............LLLLL",
    "L.................LLLLLL",
    "L.................LLLLLL",
    "L..........H......LLLLLL",
    "L................LLLLLLL",
    "L....F...........LLLLLLL",
    "LL...............LLLLLLL",
    "LL....H..........LLLLLLL",
    "LLL...............LLLLLL",
    "LLLL.......H......LLLLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL................LLLL",
    "LLLL.................LLL",
    "LLLL.................LLL",
    "LLLL..................LL",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLL....................L",
    "LL.....................L",
    "L......................L",
    "L......................L",
];

const LEVEL_5: [&str; 60] = [
    "L................LLLLLLL",
    "L.................LLLLLL",
    "L.................LLLLLL",
    "L..................LLLLL",
    "L...................LLLL",
    "L....................LLL",
    "L....................LLL",
    "L.....................LL",
    "L......................L",
    "LLL....................L",
    "LLLL...................L",
    "LLLLL..................L",
    "LLLLL..................L",
    "LLLLLLBBBBBBBBBBBBBBBBBL",
    "LLLLLLL................L",
    "LLLLLLL................L",
    "LLLLJLL................L",
    "LLLLLLL................L",
    "LLLLLLLL...............L",
    "LLLLLLLL......H........L",
    "LLLLLLL................L",
    "LLLLL.............F...LL",
    "LLLLL................LLL",
    "LLLL................LLLL",
    "LLL.........J......LLLLL",
    "LL.................LLLLL",
    "L.......J.........LLLLLL",
    "L................LLLLLLL",
    "L............H...LLLLLLL",
    "L................LLLLLLL",
    "L...H............LLLLLLL",
    "L................LLLLLLL",
    "L..........J.....LLLLLLL",
    "L................LLLLLLL",
    "L.................LLLLLL",
    "L.................LLLLLL",
    "LLL.H..............LLLLL",
    "LLLL................LLLL",
    "LLLLJ...............LLLL",
    "LLLLL................LLL",
    "LLLLLL................LL",
    "LLLLLL.................L",
    "LLLLLLL.F..............L",
    "LLLLLLL................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLLL...................L",
    "LLL....................L",
    "LL.....................L",
    "L......................L",
    "L.....................LL",
    "L....................LLL",
    "L...................LLLL",
    "L...................LLLL",
    "L...................LLLL",
    "L...................LLLL",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SCREEN_WIDTH;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn water_level(number: u32) -> Level {
        Level::new(format!("L{number}"), number, rows(&["....", "...."]), 0, 1).unwrap()
    }

    #[test]
    fn test_rejects_ragged_grid() {
        let err = Level::new("Bad", 1, rows(&["LL..", "L."]), 0, 0).unwrap_err();
        assert!(matches!(err, GameError::InvalidLevel { .. }));
    }

    #[test]
    fn test_rejects_unknown_symbol() {
        let err = Level::new("Bad", 1, rows(&["LX.."]), 0, 0).unwrap_err();
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_rejects_offset_out_of_range() {
        assert!(Level::new("Bad", 1, rows(&["...."]), 0, 2).is_err());
        assert!(Level::new("Bad", 1, rows(&["...."]), 0, -1).is_err());
        assert!(Level::new("Bad", 1, rows(&["...."]), -1, 0).is_err());
        assert!(Level::new("Bad", 1, Vec::new(), 0, 0).is_err());
    }

    #[test]
    fn test_runs_merge_land_and_bridges_only() {
        let level = Level::new("Runs", 1, rows(&["LLL.SS.BB.L", "..........."]), 0, 0).unwrap();
        let runs = level.runs();
        let summary: Vec<_> = runs.iter().map(|r| (r.column, r.len, r.cell)).collect();
        assert_eq!(
            summary,
            vec![
                (0, 3, Cell::Land),
                (4, 1, Cell::Ship),
                (5, 1, Cell::Ship),
                (7, 2, Cell::Bridge),
                (10, 1, Cell::Land),
            ]
        );
    }

    #[test]
    fn test_cell_origin_and_terminal() {
        let level = Level::new("Offsets", 1, rows(&["....", "....", "...."]), 2, 2).unwrap();
        assert_eq!(level.cell_origin(0, 2), Position::new(2.0 * BLOCK_SIZE, 0.0));
        assert_eq!(level.cell_origin(1, 0), Position::new(3.0 * BLOCK_SIZE, -2.0 * BLOCK_SIZE));
        assert_eq!(level.terminal_scroll(), 2.0 * BLOCK_SIZE);
    }

    #[test]
    fn test_advance_moves_by_one_and_stops_at_end() {
        let mut registry =
            LevelRegistry::new(vec![water_level(1), water_level(2), water_level(3)]).unwrap();
        assert_eq!(registry.current_index(), 0);
        assert_eq!(registry.advance(), LevelAdvance::Next(1));
        assert_eq!(registry.advance(), LevelAdvance::Next(2));
        assert!(!registry.has_next_level());
        assert_eq!(registry.advance(), LevelAdvance::AtEnd);
        assert_eq!(registry.current_index(), 2);

        registry.reset();
        assert_eq!(registry.current().number(), 1);
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(
            LevelRegistry::new(Vec::new()),
            Err(GameError::EmptyLevelRegistry)
        ));
    }

    #[test]
    fn test_select_bounds() {
        let mut registry = LevelRegistry::new(vec![water_level(1), water_level(2)]).unwrap();
        registry.select(1).unwrap();
        assert_eq!(registry.current().number(), 2);
        assert!(matches!(
            registry.select(2),
            Err(GameError::LevelOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "One", "number": 1, "world": ["L..L", "L..L"],
             "world_offset_columns": 0, "world_offset_lines": 1},
            {"name": "Two", "number": 2, "world": ["...."],
             "world_offset_columns": 1, "world_offset_lines": 0}
        ]"#;
        let registry = LevelRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.current().name(), "One");

        let bad = r#"[{"name": "Bad", "number": 1, "world": ["LQ"],
            "world_offset_columns": 0, "world_offset_lines": 0}]"#;
        assert!(matches!(
            LevelRegistry::from_json(bad),
            Err(GameError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_built_in_levels() {
        let registry = LevelRegistry::built_in().unwrap();
        assert_eq!(registry.len(), 5);

        for index in 0..registry.len() {
            let mut registry = registry.clone();
            registry.select(index).unwrap();
            let level = registry.current();
            assert_eq!(level.number(), index as u32 + 1);
            assert_eq!(level.world()[0].chars().count() as f32 * BLOCK_SIZE, SCREEN_WIDTH);
            assert!(level.terminal_scroll() > 0.0);
            // Every level has a bridge to cross
            assert!(level.runs().iter().any(|r| r.cell == Cell::Bridge));
        }
    }
}
