use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Read},
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::error::Result;

pub const SETTINGS_PATH: &str = "core/settings.json";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub ipv4_addr: Ipv4Setting,
    pub port: U16Setting,
    pub remote_url: StrSetting,
    pub local_projects_path: StrSetting,
    pub projects_file_name: StrSetting,
    pub public_path: StrSetting,
    pub contact_address: StrSetting,
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

impl StrSetting {
    fn new(name: &str, value: &str) -> Self {
        StrSetting {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// `None` for an empty or whitespace-only value.
    pub fn non_empty(&self) -> Option<&str> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut buffer = Vec::new();
        BufReader::new(file).read_to_end(&mut buffer)?;
        Ok(serde_json::from_slice::<Settings>(&buffer)?)
    }

    /// Reads `path`, falling back to [`Settings::new`] when the file is missing
    /// or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Settings::load(path) {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Settings unavailable; using defaults");
                Settings::new()
            }
        }
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
            remote_url: StrSetting::new("Remote URL", ""),
            local_projects_path: StrSetting::new("local_projects_path", "data"),
            projects_file_name: StrSetting::new("projects_file_name", ""),
            public_path: StrSetting::new("public_path", "public"),
            contact_address: StrSetting::new("contact_address", "contact@example.com"),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ipv4_addr.value.into(), self.port.value)
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.local_projects_path.value)
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.public_path.value)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}
