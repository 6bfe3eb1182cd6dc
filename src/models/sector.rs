//! Sector model
//!
//! A sector is a named grouping of operations (a field, a department). The
//! engine only reads sectors; colour and icon are carried through for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SectorId;

/// A named grouping of operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    /// Unique identifier
    pub id: SectorId,

    /// Sector name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Display colour, opaque to the engine
    #[serde(default)]
    pub color: String,

    /// Display icon, opaque to the engine
    #[serde(default)]
    pub icon: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// When the sector was created
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Sector {
    /// Create a new active sector
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SectorId::new(),
            name: name.into(),
            description: String::new(),
            color: String::new(),
            icon: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Create a sector with an id issued by the persistence layer
    pub fn with_id(id: impl Into<SectorId>, name: impl Into<String>) -> Self {
        let mut sector = Self::new(name);
        sector.id = id.into();
        sector
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sector() {
        let sector = Sector::new("Lavoura");
        assert_eq!(sector.name, "Lavoura");
        assert!(sector.is_active);
        assert_eq!(format!("{}", sector), "Lavoura");
    }

    #[test]
    fn test_deserialize_from_store_record() {
        let json = r##"{
            "id": "1",
            "name": "Pecuária",
            "description": "Gado de corte",
            "color": "#8B4513",
            "icon": "beef",
            "isActive": false,
            "createdAt": "2024-01-10T12:00:00.000Z"
        }"##;
        let sector: Sector = serde_json::from_str(json).unwrap();
        assert_eq!(sector.id.as_str(), "1");
        assert!(!sector.is_active);
        assert_eq!(sector.color, "#8B4513");
    }
}
