use fontdb::Database;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{DesignerError, DesignerResult};

/// Families every browser front end can render without loading a file.
pub const WEB_SAFE_FAMILIES: &[&str] = &[
    "Arial",
    "Courier New",
    "Georgia",
    "Helvetica",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

pub const SUPPORTED_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2"];

/// Fonts loaded by the user on top of the web-safe set.
pub struct FontManager {
    db: Database,
    loaded: BTreeSet<String>,
}

impl FontManager {
    pub fn new() -> Self {
        Self {
            db: Database::new(),
            loaded: BTreeSet::new(),
        }
    }

    /// Also registers the fonts installed on this machine.
    pub fn with_system_fonts() -> Self {
        let mut manager = Self::new();
        manager.db.load_system_fonts();
        manager
    }

    pub fn is_supported_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Loads a font file and returns the family names it added.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> DesignerResult<Vec<String>> {
        let path = path.as_ref();
        if !Self::is_supported_file(path) {
            let name = path.display().to_string();
            return Err(img2gcode_core::ValidationError::UnsupportedFileType(name).into());
        }
        let data = std::fs::read(path).map_err(|e| DesignerError::io(path, e))?;
        self.load_font_data(data)
            .map_err(|e| DesignerError::Font(format!("{}: {}", path.display(), e)))
    }

    pub fn load_font_data(&mut self, data: Vec<u8>) -> Result<Vec<String>, String> {
        let before = self.db.len();
        self.db.load_font_data(data);
        if self.db.len() == before {
            return Err("no font faces found".to_string());
        }

        let mut added = BTreeSet::new();
        for face in self.db.faces().skip(before) {
            for (name, _) in &face.families {
                added.insert(name.clone());
            }
        }
        self.loaded.extend(added.iter().cloned());
        tracing::info!("Loaded font families: {:?}", added);
        Ok(added.into_iter().collect())
    }

    /// Every family available for text objects, sorted.
    pub fn families(&self) -> Vec<String> {
        let mut set: BTreeSet<String> = WEB_SAFE_FAMILIES.iter().map(|s| s.to_string()).collect();
        for face in self.db.faces() {
            for (name, _) in &face.families {
                set.insert(name.clone());
            }
        }
        set.into_iter().collect()
    }

    /// Families loaded from user files.
    pub fn loaded_families(&self) -> impl Iterator<Item = &String> {
        self.loaded.iter()
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.families().iter().any(|f| f.eq_ignore_ascii_case(family))
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontManager")
            .field("faces", &self.db.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}
