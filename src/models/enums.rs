//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// OccurrenceType
// ---------------------------------------------------------------------------

/// Catalog of stoppage types an operator can pick on a daily report.
///
/// Reports store the type as its label string, so classification works on
/// strings (see [`crate::metrics::OccurrenceClassifier`]); this enum is the
/// catalog offered to forms and the source of the default policy sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OccurrenceType {
    // Maintenance-caused
    #[serde(rename = "Mecânica")]
    MechanicalFailure,
    #[serde(rename = "Falta de Peça")]
    MissingPart,
    #[serde(rename = "Inspeção de Equipamento")]
    EquipmentInspection,
    #[serde(rename = "Falta de Item de Desgaste")]
    MissingWearItem,
    #[serde(rename = "Aguardando Limpeza")]
    AwaitingCleaning,
    // Scheduled stops
    #[serde(rename = "Refeição")]
    MealBreak,
    #[serde(rename = "DDS")]
    SafetyBriefing,
    #[serde(rename = "Detonação")]
    Blasting,
    #[serde(rename = "Troca de Turno")]
    ShiftChange,
    #[serde(rename = "Abastecimento")]
    Resupply,
    // Other operational
    #[serde(rename = "Chuva")]
    Rain,
    #[serde(rename = "Falta de Frente")]
    NoDrillingFace,
    #[serde(rename = "Deslocamento")]
    Relocation,
    #[serde(rename = "Aguardando Topografia")]
    AwaitingSurvey,
    #[serde(rename = "Falta de Operador")]
    MissingOperator,
    #[serde(rename = "Outros")]
    Other,
}

impl OccurrenceType {
    pub const ALL: [OccurrenceType; 16] = [
        OccurrenceType::MechanicalFailure,
        OccurrenceType::MissingPart,
        OccurrenceType::EquipmentInspection,
        OccurrenceType::MissingWearItem,
        OccurrenceType::AwaitingCleaning,
        OccurrenceType::MealBreak,
        OccurrenceType::SafetyBriefing,
        OccurrenceType::Blasting,
        OccurrenceType::ShiftChange,
        OccurrenceType::Resupply,
        OccurrenceType::Rain,
        OccurrenceType::NoDrillingFace,
        OccurrenceType::Relocation,
        OccurrenceType::AwaitingSurvey,
        OccurrenceType::MissingOperator,
        OccurrenceType::Other,
    ];

    pub const MAINTENANCE: [OccurrenceType; 5] = [
        OccurrenceType::MechanicalFailure,
        OccurrenceType::MissingPart,
        OccurrenceType::EquipmentInspection,
        OccurrenceType::MissingWearItem,
        OccurrenceType::AwaitingCleaning,
    ];

    pub const SCHEDULED_STOPS: [OccurrenceType; 5] = [
        OccurrenceType::MealBreak,
        OccurrenceType::SafetyBriefing,
        OccurrenceType::Blasting,
        OccurrenceType::ShiftChange,
        OccurrenceType::Resupply,
    ];

    /// Label stored on reports
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceType::MechanicalFailure => "Mecânica",
            OccurrenceType::MissingPart => "Falta de Peça",
            OccurrenceType::EquipmentInspection => "Inspeção de Equipamento",
            OccurrenceType::MissingWearItem => "Falta de Item de Desgaste",
            OccurrenceType::AwaitingCleaning => "Aguardando Limpeza",
            OccurrenceType::MealBreak => "Refeição",
            OccurrenceType::SafetyBriefing => "DDS",
            OccurrenceType::Blasting => "Detonação",
            OccurrenceType::ShiftChange => "Troca de Turno",
            OccurrenceType::Resupply => "Abastecimento",
            OccurrenceType::Rain => "Chuva",
            OccurrenceType::NoDrillingFace => "Falta de Frente",
            OccurrenceType::Relocation => "Deslocamento",
            OccurrenceType::AwaitingSurvey => "Aguardando Topografia",
            OccurrenceType::MissingOperator => "Falta de Operador",
            OccurrenceType::Other => "Outros",
        }
    }
}

impl std::fmt::Display for OccurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportStatus
// ---------------------------------------------------------------------------

/// Review status of a daily report (display filtering only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum ReportStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl From<i16> for ReportStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => ReportStatus::Approved,
            2 => ReportStatus::Rejected,
            _ => ReportStatus::Pending,
        }
    }
}

impl From<ReportStatus> for i16 {
    fn from(s: ReportStatus) -> Self {
        s as i16
    }
}

// ---------------------------------------------------------------------------
// InventoryCategory
// ---------------------------------------------------------------------------

/// Inventory item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum InventoryCategory {
    Consumable = 0,
    /// Personal protective equipment (EPI)
    Ppe = 1,
    SparePart = 2,
    Tool = 3,
}

impl From<i16> for InventoryCategory {
    fn from(v: i16) -> Self {
        match v {
            1 => InventoryCategory::Ppe,
            2 => InventoryCategory::SparePart,
            3 => InventoryCategory::Tool,
            _ => InventoryCategory::Consumable,
        }
    }
}

impl From<InventoryCategory> for i16 {
    fn from(c: InventoryCategory) -> Self {
        c as i16
    }
}

// ---------------------------------------------------------------------------
// MovementKind
// ---------------------------------------------------------------------------

/// Kind of stock movement recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum MovementKind {
    Entry = 0,
    StockOut = 1,
    TransferOut = 2,
    TransferIn = 3,
}

impl From<i16> for MovementKind {
    fn from(v: i16) -> Self {
        match v {
            1 => MovementKind::StockOut,
            2 => MovementKind::TransferOut,
            3 => MovementKind::TransferIn,
            _ => MovementKind::Entry,
        }
    }
}

impl From<MovementKind> for i16 {
    fn from(k: MovementKind) -> Self {
        k as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_type_labels_match_serde() {
        for t in OccurrenceType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_policy_sets_are_disjoint() {
        for t in OccurrenceType::MAINTENANCE {
            assert!(!OccurrenceType::SCHEDULED_STOPS.contains(&t));
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ReportStatus::from(1), ReportStatus::Approved);
        assert_eq!(ReportStatus::from(42), ReportStatus::Pending);
        assert_eq!(i16::from(MovementKind::TransferIn), 3);
        assert_eq!(InventoryCategory::from(1), InventoryCategory::Ppe);
    }
}
