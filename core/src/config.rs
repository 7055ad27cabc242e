use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inclusive rating bounds enforced by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBounds {
    pub min: f64,
    pub max: f64,
}

impl RatingBounds {
    pub fn contains(self, rating: f64) -> bool {
        rating >= self.min && rating <= self.max
    }
}

impl Default for RatingBounds {
    /// Matches the `rating BETWEEN 1 AND 5` table constraint.
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub database_path: PathBuf,
    /// Defaults to `<stem>_backup.<ext>` next to the database file.
    pub backup_path:   Option<PathBuf>,
    pub rating:        RatingBounds,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("trailbook.db"),
            backup_path:   None,
            rating:        RatingBounds::default(),
        }
    }
}

impl BookConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: BookConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> anyhow::Result<()> {
        let RatingBounds { min, max } = self.rating;
        anyhow::ensure!(
            min.is_finite() && max.is_finite() && min <= max,
            "rating bounds must be finite with min <= max, got [{min}, {max}]"
        );
        Ok(())
    }

    pub fn resolved_backup_path(&self) -> PathBuf {
        self.backup_path
            .clone()
            .unwrap_or_else(|| default_backup_path(&self.database_path))
    }
}

/// `trailbook.db` → `trailbook_backup.db`, in the same directory.
pub fn default_backup_path(database: &Path) -> PathBuf {
    let stem = database
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trailbook".to_string());
    let file_name = match database.extension() {
        Some(ext) => format!("{stem}_backup.{}", ext.to_string_lossy()),
        None => format!("{stem}_backup"),
    };
    database.with_file_name(file_name)
}
