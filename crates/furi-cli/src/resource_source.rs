//! Resource data files for the CLI.
//!
//! A resource file is TOML with two arrays of tables:
//!
//! ```toml
//! [[kanji]]
//! character = "一"
//! readings = ["ひと-", "イチ", "イツ"]
//!
//! [[kanji]]
//! character = "和"
//! readings = ["かず"]
//! name = true
//!
//! [[compound]]
//! text = "ヶ"
//! readings = ["ヶ", "か", "が"]
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use furigana_engine::character::{CharacterRecord, CompoundRecord};
use furigana_engine::{ResourceCache, ResourceError};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResourceFile {
    #[serde(default)]
    pub kanji: Vec<CharacterRecord>,
    #[serde(default)]
    pub compound: Vec<CompoundRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceFileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid resource data: {0}")]
    Resource(#[from] ResourceError),
}

impl ResourceFile {
    pub fn parse(text: &str) -> Result<Self, ResourceFileError> {
        Ok(toml::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self, ResourceFileError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn into_cache(self) -> Result<ResourceCache, ResourceFileError> {
        Ok(ResourceCache::from_records(&self.kanji, &self.compound)?)
    }
}

/// Read and build a resource cache in one step.
pub fn load_cache(path: &Path) -> Result<ResourceCache, ResourceFileError> {
    ResourceFile::read(path)?.into_cache()
}
