//! Static game data
//!
//! Attribute modifier charts and weapon templates, loaded once at startup
//! and immutable afterwards.

pub mod tables;
pub mod weapons;

pub use tables::{ConstitutionRow, DexterityRow, StrengthRow};
pub use weapons::{HandRequirement, WeaponTemplate};

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors from the static data layer
///
/// Any of these during startup is fatal: the combat math cannot run without
/// its tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unable to read {table}: {source}")]
    Io {
        table: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse {table}: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no {table} entry for score {score}")]
    MissingScore { table: &'static str, score: i32 },
    #[error("no weapon template named {0:?}")]
    MissingWeapon(String),
}

/// All loaded static data
#[derive(Debug, Clone)]
pub struct GameData {
    pub strength: Vec<StrengthRow>,
    pub dexterity: Vec<DexterityRow>,
    pub constitution: Vec<ConstitutionRow>,
    pub weapons: Vec<WeaponTemplate>,
}

impl GameData {
    /// Load all tables from `assets/data/`, falling back to the embedded
    /// defaults for files that are absent. A present-but-malformed file is
    /// a fatal error.
    pub fn load() -> Result<Self, DataError> {
        Self::load_from(Path::new("assets/data"))
    }

    pub fn load_from(base: &Path) -> Result<Self, DataError> {
        Ok(Self {
            strength: load_table(base, "strength.json", tables::default_strength)?,
            dexterity: load_table(base, "dexterity.json", tables::default_dexterity)?,
            constitution: load_table(base, "constitution.json", tables::default_constitution)?,
            weapons: load_table(base, "weapons.json", weapons::default_weapons)?,
        })
    }

    /// Embedded defaults only, no filesystem access (tests)
    pub fn defaults() -> Self {
        Self {
            strength: tables::default_strength(),
            dexterity: tables::default_dexterity(),
            constitution: tables::default_constitution(),
            weapons: weapons::default_weapons(),
        }
    }

    pub fn strength_row(&self, score: i32) -> Result<&StrengthRow, DataError> {
        self.strength
            .iter()
            .find(|r| r.score == score)
            .ok_or(DataError::MissingScore {
                table: "strength",
                score,
            })
    }

    pub fn dexterity_row(&self, score: i32) -> Result<&DexterityRow, DataError> {
        self.dexterity
            .iter()
            .find(|r| r.score == score)
            .ok_or(DataError::MissingScore {
                table: "dexterity",
                score,
            })
    }

    pub fn constitution_row(&self, score: i32) -> Result<&ConstitutionRow, DataError> {
        self.constitution
            .iter()
            .find(|r| r.score == score)
            .ok_or(DataError::MissingScore {
                table: "constitution",
                score,
            })
    }

    pub fn weapon(&self, name: &str) -> Result<&WeaponTemplate, DataError> {
        self.weapons
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| DataError::MissingWeapon(name.to_string()))
    }
}

fn load_table<T>(
    base: &Path,
    file: &'static str,
    defaults: fn() -> Vec<T>,
) -> Result<Vec<T>, DataError>
where
    T: serde::de::DeserializeOwned,
{
    let path = base.join(file);
    if !path.exists() {
        log::debug!("{} not found, using embedded defaults", path.display());
        return Ok(defaults());
    }
    let content = fs::read_to_string(&path).map_err(|source| DataError::Io {
        table: file,
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DataError::Parse {
        table: file,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_cover_playable_scores() {
        let data = GameData::defaults();
        for score in 3..=18 {
            assert!(data.strength_row(score).is_ok(), "strength {}", score);
            assert!(data.dexterity_row(score).is_ok(), "dexterity {}", score);
            assert!(data.constitution_row(score).is_ok(), "constitution {}", score);
        }
    }

    #[test]
    fn missing_score_names_the_table() {
        let data = GameData::defaults();
        let err = data.strength_row(99).unwrap_err();
        assert!(err.to_string().contains("strength"));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn malformed_table_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = fs::File::create(dir.path().join("strength.json")).unwrap();
        writeln!(f, "not json").unwrap();
        let err = GameData::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Parse { table, .. } if table == "strength.json"));
    }

    #[test]
    fn absent_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data = GameData::load_from(dir.path()).unwrap();
        assert!(!data.weapons.is_empty());
    }
}
