//! Runtime configuration loaded from environment variables.
//!
//! - `BLITZ_DATA_DIR` - directory holding the stored records
//!   (default: `<local data dir>/blitz45`)
//! - `BLITZ_EXPORT_DIR` - where CSV reports are written
//!   (default: the user's Downloads folder, else the data directory)
//! - `BLITZ_URGENCY_MODE` - `frozen` (default) or `live`

use crate::error::{BlitzError, Result};
use std::path::PathBuf;
use std::str::FromStr;

const APP_DIR_NAME: &str = "blitz45";

/// Which day count the report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrgencyMode {
    /// The count captured when the product was registered.
    #[default]
    Frozen,
    /// The count recomputed against today on every render.
    Live,
}

impl FromStr for UrgencyMode {
    type Err = BlitzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frozen" | "snapshot" => Ok(Self::Frozen),
            "live" => Ok(Self::Live),
            _ => Err(BlitzError::InvalidConfig {
                name: "BLITZ_URGENCY_MODE".into(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub urgency_mode: UrgencyMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = match non_empty("BLITZ_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .map(|d| d.join(APP_DIR_NAME))
                .ok_or(BlitzError::DataDirNotFound)?,
        };

        let export_dir = non_empty("BLITZ_EXPORT_DIR")
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| data_dir.clone());

        let urgency_mode = non_empty("BLITZ_URGENCY_MODE")
            .map(|v| v.parse::<UrgencyMode>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            export_dir,
            urgency_mode,
        })
    }
}
