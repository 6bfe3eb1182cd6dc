//! Operation model
//!
//! An operation is a unit of work that expenses are attributed to. It holds a
//! weak back-reference to at most one sector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{OperationId, SectorId};

/// Category of work an operation represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Plantio,
    Colheita,
    Manejo,
    Preparo,
    Adubacao,
    Irrigacao,
    Transporte,
    Manutencao,
    Administrativo,
    #[default]
    Outro,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plantio => "plantio",
            Self::Colheita => "colheita",
            Self::Manejo => "manejo",
            Self::Preparo => "preparo",
            Self::Adubacao => "adubacao",
            Self::Irrigacao => "irrigacao",
            Self::Transporte => "transporte",
            Self::Manutencao => "manutencao",
            Self::Administrativo => "administrativo",
            Self::Outro => "outro",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Plantio => "Plantio",
            Self::Colheita => "Colheita",
            Self::Manejo => "Manejo",
            Self::Preparo => "Preparo de solo",
            Self::Adubacao => "Adubação",
            Self::Irrigacao => "Irrigação",
            Self::Transporte => "Transporte",
            Self::Manutencao => "Manutenção",
            Self::Administrativo => "Administrativo",
            Self::Outro => "Outro",
        };
        write!(f, "{}", label)
    }
}

/// A unit of work expenses are attributed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique identifier
    pub id: OperationId,

    /// Owning sector, if any. A blank id in the stored record means none.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sector_id: Option<SectorId>,

    /// Operation name
    pub name: String,

    #[serde(rename = "type", default)]
    pub operation_type: OperationType,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// When the operation was created
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Deserialize an optional id, mapping `""` and `null` to `None`
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(T::from))
}

impl Operation {
    /// Create a new operation
    pub fn new(name: impl Into<String>, operation_type: OperationType) -> Self {
        Self {
            id: OperationId::new(),
            sector_id: None,
            name: name.into(),
            operation_type,
            description: String::new(),
            color: String::new(),
            icon: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Create an operation with a known id inside a sector
    pub fn in_sector(
        id: impl Into<OperationId>,
        name: impl Into<String>,
        sector_id: impl Into<SectorId>,
    ) -> Self {
        let mut operation = Self::new(name, OperationType::default());
        operation.id = id.into();
        operation.sector_id = Some(sector_id.into());
        operation
    }

    /// Check whether this operation belongs to the given sector
    pub fn belongs_to(&self, sector_id: &SectorId) -> bool {
        self.sector_id.as_ref() == Some(sector_id)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.operation_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_operation_has_no_sector() {
        let op = Operation::new("Plantio de soja", OperationType::Plantio);
        assert!(op.sector_id.is_none());
        assert!(!op.belongs_to(&SectorId::from("1")));
        assert_eq!(format!("{}", op), "Plantio de soja (Plantio)");
    }

    #[test]
    fn test_in_sector() {
        let op = Operation::in_sector("10", "Colheita milho", "2");
        assert_eq!(op.id.as_str(), "10");
        assert!(op.belongs_to(&SectorId::from("2")));
    }

    #[test]
    fn test_deserialize_blank_sector_as_none() {
        let json = r#"{
            "id": "3",
            "sectorId": "",
            "name": "Frete",
            "type": "transporte",
            "createdAt": "2024-02-01T08:30:00Z"
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert_eq!(op.sector_id, None);
        assert_eq!(op.operation_type, OperationType::Transporte);
        assert!(op.is_active);
    }

    #[test]
    fn test_type_wire_names() {
        let json = serde_json::to_string(&OperationType::Adubacao).unwrap();
        assert_eq!(json, "\"adubacao\"");
        assert_eq!(OperationType::Irrigacao.as_str(), "irrigacao");
    }
}
