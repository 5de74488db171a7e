use crate::monsters::{monster_at, Monster};
use super::{Coord, DungeonLayout, Level};

/// Plain-text dump of floors, for the command line and for debugging.
pub struct BoardRenderer {
    pub show_start: bool,
}

impl BoardRenderer {
    pub fn new(show_start: bool) -> Self {
        Self { show_start }
    }

    pub fn render_level(&self, level: &Level, monsters: &[Monster]) -> Vec<String> {
        let board = &level.board;
        let mut lines = Vec::with_capacity(board.height() as usize);

        for y in 0..board.height() {
            let mut line = String::with_capacity(board.width() as usize);
            for x in 0..board.width() {
                line.push_str(&self.get_tile_representation(level, monsters, Coord::new(x, y)));
            }
            lines.push(line);
        }

        lines
    }

    pub fn render_dungeon(&self, dungeon: &DungeonLayout) -> Vec<String> {
        let mut lines = Vec::new();

        for (i, level) in dungeon.levels.iter().enumerate() {
            let monsters = dungeon.spawns(i);
            lines.push(format!(
                "Level {} (start {}, stairs {}, {} monsters, {} attempts)",
                i + 1,
                level.start,
                level.stairs(),
                monsters.len(),
                level.attempts
            ));
            lines.extend(self.render_level(level, monsters));
            lines.push(String::new());
        }

        lines
    }

    fn get_tile_representation(&self, level: &Level, monsters: &[Monster], coord: Coord) -> String {
        if let Some(monster) = monster_at(coord, monsters) {
            return monster.glyph.clone();
        }
        // Stairs stay visible even under the player marker
        if self.show_start && coord == level.start && level.board.stairs() != Some(coord) {
            return "@".to_string();
        }
        level
            .board
            .get(coord)
            .map(|tile| tile.style.glyph.clone())
            .unwrap_or_else(|| " ".to_string())
    }
}
