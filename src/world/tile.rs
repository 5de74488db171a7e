use serde::{Deserialize, Serialize};
use rand::Rng;
use super::{Coord, ConstructionWarning};

/// Ammunition pickups that can lie on a floor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Ballistic,
    Explosive,
    Kinetic,
    Electromagnetic,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Ballistic,
        ResourceKind::Explosive,
        ResourceKind::Kinetic,
        ResourceKind::Electromagnetic,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            ResourceKind::Ballistic => "ballistic",
            ResourceKind::Explosive => "explosive",
            ResourceKind::Kinetic => "kinetic",
            ResourceKind::Electromagnetic => "electromagnetic",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ResourceKind::Ballistic => "☉",
            ResourceKind::Explosive => "☄",
            ResourceKind::Kinetic => "☀",
            ResourceKind::Electromagnetic => "☇",
        }
    }

    /// Color of an untouched deposit
    pub fn color_available(&self) -> &'static str {
        match self {
            ResourceKind::Ballistic => "crimson",
            ResourceKind::Explosive => "flame",
            ResourceKind::Kinetic => "amber",
            ResourceKind::Electromagnetic => "cyan",
        }
    }

    /// Color once the deposit has been collected
    pub fn color_drained(&self) -> &'static str {
        match self {
            ResourceKind::Ballistic => "darker crimson",
            ResourceKind::Explosive => "darker flame",
            ResourceKind::Kinetic => "darker amber",
            ResourceKind::Electromagnetic => "darker cyan",
        }
    }
}

/// Everything the renderer needs to draw a tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileStyle {
    pub glyph: String,
    pub name: String,
    pub color: String,
    pub color_dark: String,
}

impl TileStyle {
    pub fn new(glyph: &str, name: &str, color: &str, color_dark: &str) -> Self {
        Self {
            glyph: glyph.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            color_dark: color_dark.to_string(),
        }
    }

    pub fn wall() -> Self {
        Self::new("#", "wall", "dark gray", "darkest gray")
    }

    pub fn floor() -> Self {
        Self::new(".", "floor", "light gray", "dark gray")
    }

    pub fn stairs() -> Self {
        Self::new(">", "stairs", "white", "light gray")
    }

    fn resource(kind: ResourceKind) -> Self {
        Self::new(kind.icon(), kind.get_name(), kind.color_available(), kind.color_available())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub position: Coord,
    pub style: TileStyle,
    pub layer: i32,
    pub explored: bool,
    pub always_visible: bool,
    pub blocked: bool,
    pub blocks_sight: bool,
    pub resource: Option<ResourceKind>,
    pub drained: bool,
    stairs: bool,
}

impl Tile {
    /// Builds a tile and reports every construction check it fails.
    ///
    /// `bounds` is the (width, height) of the owning board. The tile is
    /// returned even when warnings are present.
    pub fn new(
        position: Coord,
        layer: i32,
        style: TileStyle,
        blocked: bool,
        blocks_sight: bool,
        bounds: (i32, i32),
    ) -> (Self, Vec<ConstructionWarning>) {
        let warnings = check_construction(position, layer, &style.glyph, bounds);

        // Every floor is explored and always visible from the start
        let tile = Tile {
            position,
            style,
            layer,
            explored: true,
            always_visible: true,
            blocked,
            blocks_sight,
            resource: None,
            drained: false,
            stairs: false,
        };

        (tile, warnings)
    }

    pub fn is_stairs(&self) -> bool {
        self.stairs
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// Opens a blocked tile into floor. Returns false if it was already open.
    pub fn dig(&mut self) -> bool {
        if !self.blocked {
            return false;
        }
        self.blocked = false;
        self.style = TileStyle::floor();
        true
    }

    // Only the board may flag stairs, so it can keep the coordinate in step.
    pub(crate) fn mark_stairs(&mut self) {
        self.blocked = false;
        self.blocks_sight = false;
        self.resource = None;
        self.drained = false;
        self.style = TileStyle::stairs();
        self.stairs = true;
    }

    pub(crate) fn place_resource(&mut self, kind: ResourceKind) {
        self.resource = Some(kind);
        self.drained = false;
        self.style = TileStyle::resource(kind);
    }

    /// Collects the deposit on this tile, if any is left.
    pub fn drain(&mut self) -> Option<ResourceKind> {
        let kind = self.resource?;
        if self.drained {
            return None;
        }
        self.drained = true;
        self.style.color = kind.color_drained().to_string();
        Some(kind)
    }
}

/// Checks shared by tiles and creatures: layer, coordinates and glyph.
pub(crate) fn check_construction(
    position: Coord,
    layer: i32,
    glyph: &str,
    bounds: (i32, i32),
) -> Vec<ConstructionWarning> {
    let mut warnings = Vec::new();
    let (width, height) = bounds;

    if layer < 0 {
        warnings.push(ConstructionWarning::NegativeLayer { layer });
    }
    if position.x < 0 || position.x >= width || position.y < 0 || position.y >= height {
        warnings.push(ConstructionWarning::OutOfBounds {
            x: position.x,
            y: position.y,
            width,
            height,
        });
    }
    let length = glyph.chars().count();
    if length != 1 {
        warnings.push(ConstructionWarning::GlyphLength {
            glyph: glyph.to_string(),
            length,
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::layers;

    fn wall_at(x: i32, y: i32) -> (Tile, Vec<ConstructionWarning>) {
        Tile::new(Coord::new(x, y), layers::BOARD, TileStyle::wall(), true, false, (12, 12))
    }

    #[test]
    fn test_valid_tile_has_no_warnings() {
        let (tile, warnings) = wall_at(3, 4);
        assert!(warnings.is_empty());
        assert!(tile.blocked);
        assert!(tile.explored && tile.always_visible);
        assert!(!tile.is_stairs());
    }

    #[test]
    fn test_negative_layer_is_reported_but_kept() {
        let (tile, warnings) =
            Tile::new(Coord::new(0, 0), -1, TileStyle::wall(), true, false, (12, 12));
        assert_eq!(warnings, vec![ConstructionWarning::NegativeLayer { layer: -1 }]);
        assert_eq!(tile.layer, -1);
    }

    #[test]
    fn test_out_of_bounds_is_reported() {
        let (_, warnings) = wall_at(12, 0);
        assert!(matches!(warnings[0], ConstructionWarning::OutOfBounds { x: 12, y: 0, .. }));
        let (_, warnings) = wall_at(0, -1);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_glyph_length_counts_code_points() {
        let style = TileStyle::new("☉", "ballistic", "crimson", "crimson");
        let (_, warnings) = Tile::new(Coord::new(1, 1), 2, style, false, false, (12, 12));
        assert!(warnings.is_empty());

        let style = TileStyle::new("##", "wall", "gray", "gray");
        let (tile, warnings) = Tile::new(Coord::new(1, 1), 2, style, true, false, (12, 12));
        assert_eq!(
            warnings,
            vec![ConstructionWarning::GlyphLength { glyph: "##".to_string(), length: 2 }]
        );
        assert_eq!(tile.style.glyph, "##");
    }

    #[test]
    fn test_all_warnings_are_collected() {
        let style = TileStyle::new("", "void", "black", "black");
        let (_, warnings) = Tile::new(Coord::new(-5, 40), -3, style, true, true, (12, 12));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_dig_only_once() {
        let (mut tile, _) = wall_at(2, 2);
        assert!(tile.dig());
        assert!(!tile.blocked);
        assert_eq!(tile.style, TileStyle::floor());
        assert!(!tile.dig());
    }

    #[test]
    fn test_stairs_clear_blocking_and_resources() {
        let (mut tile, _) = wall_at(2, 2);
        tile.dig();
        tile.place_resource(ResourceKind::Kinetic);
        tile.mark_stairs();
        assert!(tile.is_stairs());
        assert!(!tile.blocked);
        assert_eq!(tile.resource, None);
        assert_eq!(tile.style.glyph, ">");
    }

    #[test]
    fn test_drain_switches_color_once() {
        let (mut tile, _) = wall_at(2, 2);
        tile.dig();
        assert_eq!(tile.drain(), None);

        tile.place_resource(ResourceKind::Explosive);
        assert_eq!(tile.style.glyph, "☄");
        assert_eq!(tile.style.color, "flame");

        assert_eq!(tile.drain(), Some(ResourceKind::Explosive));
        assert!(tile.drained);
        assert_eq!(tile.style.color, "darker flame");
        assert_eq!(tile.drain(), None);
    }
}
