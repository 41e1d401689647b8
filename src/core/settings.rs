use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::File,
    io::{BufReader, ErrorKind, Read},
    net::{Ipv4Addr, SocketAddr},
};
use tracing::{info, warn};

use crate::{core::record::RecordKind, error::SettingsError};

pub const SETTINGS_PATH: &str = "core/settings.json";
pub const SETTINGS_PATH_VAR: &str = "FOLIO_SETTINGS";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub ipv4_addr: Ipv4Setting,
    pub port: U16Setting,
    pub data_root: StrSetting,
    pub projects_file_name: StrSetting,
    pub achievements_file_name: StrSetting,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StrSetting {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct U16Setting {
    pub name: String,
    pub value: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Ipv4Setting {
    pub name: String,
    pub value: Ipv4Addr,
}

impl Settings {
    /// Reads `FOLIO_SETTINGS` or `core/settings.json`. A missing file means
    /// defaults; an unreadable or malformed one is an error.
    pub fn load() -> Result<Self, SettingsError> {
        let path = env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| SETTINGS_PATH.to_string());
        match Settings::load_from(&path) {
            Err(SettingsError::Read(error)) if error.kind() == ErrorKind::NotFound => {
                warn!("Settings file {} not found, using defaults", path);
                Ok(Settings::new())
            }
            result => result,
        }
    }

    pub fn load_from(path: &str) -> Result<Self, SettingsError> {
        let file = File::open(path)?;
        let mut buffer = Vec::new();
        let mut reader = BufReader::new(file);
        reader.read_to_end(&mut buffer)?;
        let settings = serde_json::from_slice::<Settings>(&buffer)?;
        info!("Loaded settings from {}", path);
        Ok(settings)
    }

    pub fn new() -> Self {
        Settings {
            ipv4_addr: Ipv4Setting {
                name: "Ipv4 Address".to_string(),
                value: Ipv4Addr::new(127, 0, 0, 1),
            },
            port: U16Setting {
                name: "Port".to_string(),
                value: 4010,
            },
            data_root: StrSetting {
                name: "data_root".to_string(),
                value: "assets/data".to_string(),
            },
            projects_file_name: StrSetting {
                name: "projects_file_name".to_string(),
                value: "projects".to_string(),
            },
            achievements_file_name: StrSetting {
                name: "achievements_file_name".to_string(),
                value: "achievements".to_string(),
            },
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.ipv4_addr.value, self.port.value))
    }

    /// File holding the records of `kind`, e.g. `projects.json`.
    pub fn file_for(&self, kind: RecordKind) -> String {
        let stem = match kind {
            RecordKind::Project => &self.projects_file_name.value,
            RecordKind::Achievement => &self.achievements_file_name.value,
        };
        format!("{}.json", stem)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}
