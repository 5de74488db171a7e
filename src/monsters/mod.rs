use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use rand::Rng;
use thiserror::Error;
use crate::world::{check_construction, layers, ConstructionWarning, Coord, ResourceKind};

pub mod spawn;

pub use spawn::*;

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("crawler.json", include_str!("../../data/monsters/crawler.json")),
    ("hunter.json", include_str!("../../data/monsters/hunter.json")),
    ("sentry.json", include_str!("../../data/monsters/sentry.json")),
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("could not read monster data '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid monster data '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no monster templates available")]
    NoTemplates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiType {
    NoAi,
    Player,
    MeleeDumb,
    MeleePather,
    RangedDumb,
    RangedPather,
}

/// Data description of one monster kind, as stored in `data/monsters/*.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub glyph: String,
    pub layer: i32,
    pub ai: AiType,
    pub hp_max: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default)]
    pub always_visible: bool,
    #[serde(default = "default_true")]
    pub blocked: bool,
    #[serde(default)]
    pub blocks_sight: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub glyph: String,
    pub color: String,
    pub color_dark: String,
    pub position: Coord,
    pub layer: i32,
    pub always_visible: bool,
    pub blocked: bool,
    pub blocks_sight: bool,
    pub ai: AiType,
    pub ai_triggered: bool,
    pub hp_max: i32,
    pub hp_current: i32,
    pub attack: i32,
    pub defense: i32,
    /// Ammunition kind the monster is weak to; it also decides its color
    pub affinity: ResourceKind,
}

impl Monster {
    /// Instantiates `template` at `position`, reporting suspicious values
    /// instead of refusing them.
    pub fn from_template<R: Rng + ?Sized>(
        template: &MonsterTemplate,
        position: Coord,
        bounds: (i32, i32),
        rng: &mut R,
    ) -> (Self, Vec<ConstructionWarning>) {
        let mut warnings = check_construction(position, template.layer, &template.glyph, bounds);
        if template.layer >= 0 && template.layer != layers::CREATURES {
            warnings.push(ConstructionWarning::UnexpectedLayer {
                layer: template.layer,
                expected: layers::CREATURES,
            });
        }
        for (stat, value) in [
            ("hp_max", template.hp_max),
            ("attack", template.attack),
            ("defense", template.defense),
        ] {
            if value < 0 {
                warnings.push(ConstructionWarning::NegativeStat { stat, value });
            }
        }

        let affinity = ResourceKind::random(rng);
        let monster = Monster {
            name: template.name.clone(),
            glyph: template.glyph.clone(),
            color: affinity.color_available().to_string(),
            color_dark: affinity.color_drained().to_string(),
            position,
            layer: template.layer,
            always_visible: template.always_visible,
            blocked: template.blocked,
            blocks_sight: template.blocks_sight,
            ai: template.ai,
            ai_triggered: false,
            hp_max: template.hp_max,
            hp_current: template.hp_max,
            attack: template.attack,
            defense: template.defense,
            affinity,
        };

        (monster, warnings)
    }
}

/// Turns a spawn coordinate into a monster. Placement only decides where.
pub trait CreatureLoader {
    fn create<R: Rng + ?Sized>(
        &self,
        position: Coord,
        bounds: (i32, i32),
        rng: &mut R,
    ) -> Result<(Monster, Vec<ConstructionWarning>), LoaderError>;
}

/// Monster templates picked uniformly at random for every spawn
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLibrary {
    templates: Vec<MonsterTemplate>,
}

impl TemplateLibrary {
    pub fn from_templates(templates: Vec<MonsterTemplate>) -> Result<Self, LoaderError> {
        if templates.is_empty() {
            return Err(LoaderError::NoTemplates);
        }
        Ok(Self { templates })
    }

    /// Templates shipped with the crate
    pub fn builtin() -> Result<Self, LoaderError> {
        let mut templates = Vec::new();
        for (name, data) in BUILTIN_TEMPLATES {
            let template: MonsterTemplate = serde_json::from_str(data).map_err(|source| LoaderError::Parse {
                path: PathBuf::from("data/monsters").join(name),
                source,
            })?;
            templates.push(template);
        }
        Self::from_templates(templates)
    }

    /// Reads every `*.json` file in `dir`, in file name order.
    pub fn load_dir(dir: &Path) -> Result<Self, LoaderError> {
        let entries = fs::read_dir(dir).map_err(|source| LoaderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoaderError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        // Sorted so the template order, and with it the seeded output, is stable
        paths.sort();

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            let data = fs::read_to_string(&path).map_err(|source| LoaderError::Io {
                path: path.clone(),
                source,
            })?;
            let template: MonsterTemplate = serde_json::from_str(&data).map_err(|source| LoaderError::Parse {
                path: path.clone(),
                source,
            })?;
            templates.push(template);
        }
        Self::from_templates(templates)
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }
}

impl CreatureLoader for TemplateLibrary {
    fn create<R: Rng + ?Sized>(
        &self,
        position: Coord,
        bounds: (i32, i32),
        rng: &mut R,
    ) -> Result<(Monster, Vec<ConstructionWarning>), LoaderError> {
        if self.templates.is_empty() {
            return Err(LoaderError::NoTemplates);
        }
        let template = &self.templates[rng.gen_range(0..self.templates.len())];
        Ok(Monster::from_template(template, position, bounds, rng))
    }
}

/// The monster standing on `coord`, if any
pub fn monster_at(coord: Coord, monsters: &[Monster]) -> Option<&Monster> {
    monsters.iter().find(|monster| monster.position == coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn template() -> MonsterTemplate {
        MonsterTemplate {
            name: "crawler".to_string(),
            glyph: "c".to_string(),
            layer: layers::CREATURES,
            ai: AiType::MeleeDumb,
            hp_max: 3,
            attack: 1,
            defense: 0,
            always_visible: false,
            blocked: true,
            blocks_sight: false,
        }
    }

    #[test]
    fn test_builtin_templates_parse() {
        let library = TemplateLibrary::builtin().unwrap();
        assert_eq!(library.templates().len(), 3);
        assert!(library.templates().iter().all(|t| t.layer == layers::CREATURES));
        assert!(library.templates().iter().all(|t| t.glyph.chars().count() == 1));
    }

    #[test]
    fn test_from_template_sets_position_and_color() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (monster, warnings) = Monster::from_template(&template(), Coord::new(3, 4), (12, 12), &mut rng);
        assert!(warnings.is_empty());
        assert_eq!(monster.position, Coord::new(3, 4));
        assert_eq!(monster.hp_current, monster.hp_max);
        assert_eq!(monster.color, monster.affinity.color_available());
    }

    #[test]
    fn test_suspicious_template_values_are_warnings() {
        let mut bad = template();
        bad.layer = layers::OBJECTS;
        bad.hp_max = -1;
        bad.glyph = "cc".to_string();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (monster, warnings) = Monster::from_template(&bad, Coord::new(20, 4), (12, 12), &mut rng);

        assert_eq!(monster.hp_max, -1);
        assert!(warnings.contains(&ConstructionWarning::UnexpectedLayer {
            layer: layers::OBJECTS,
            expected: layers::CREATURES,
        }));
        assert!(warnings.contains(&ConstructionWarning::NegativeStat { stat: "hp_max", value: -1 }));
        assert!(warnings.iter().any(|w| matches!(w, ConstructionWarning::OutOfBounds { .. })));
        assert!(warnings.iter().any(|w| matches!(w, ConstructionWarning::GlyphLength { .. })));
    }

    #[test]
    fn test_empty_library_is_rejected() {
        assert!(matches!(TemplateLibrary::from_templates(Vec::new()), Err(LoaderError::NoTemplates)));
    }

    #[test]
    fn test_load_dir_reads_json_files() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("monsters");
        let library = TemplateLibrary::load_dir(&dir).unwrap();
        assert_eq!(library, TemplateLibrary::builtin().unwrap());
    }

    #[test]
    fn test_monster_at() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (a, _) = Monster::from_template(&template(), Coord::new(1, 1), (12, 12), &mut rng);
        let (b, _) = Monster::from_template(&template(), Coord::new(2, 1), (12, 12), &mut rng);
        let monsters = vec![a, b];
        assert_eq!(monster_at(Coord::new(2, 1), &monsters).map(|m| m.position), Some(Coord::new(2, 1)));
        assert!(monster_at(Coord::new(5, 5), &monsters).is_none());
    }
}
