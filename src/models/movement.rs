//! Movement (pointage) and presence DTOs.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::member::Member;

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "entrée", alias = "entree")]
    Entree,
    #[serde(rename = "sortie")]
    Sortie,
}

impl MovementType {
    /// Label used in the history table.
    pub fn label(self) -> &'static str {
        match self {
            MovementType::Entree => "Entrée",
            MovementType::Sortie => "Sortie",
        }
    }

    /// Coloured marker shown before the label.
    pub fn marker(self) -> &'static str {
        match self {
            MovementType::Entree => "🟢",
            MovementType::Sortie => "🔴",
        }
    }
}

/// A timestamped entry/exit record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movement {
    pub id: i64,
    #[serde(default)]
    pub membre_id: Option<i64>,
    pub nom: String,
    pub prenom: String,
    pub date_heure: String,
    #[serde(rename = "type")]
    pub kind: MovementType,
}

/// A member currently inside.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Present {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub heure_entree: String,
}

/// Body of a kiosk check-in/out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInRequest {
    #[serde(rename = "membreId")]
    pub membre_id: i64,
}

/// Result of a kiosk check-in/out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckInResponse {
    pub membre: Member,
    #[serde(rename = "type")]
    pub kind: MovementType,
}

impl CheckInResponse {
    /// Confirmation line shown on the kiosk.
    pub fn confirmation(&self) -> String {
        format!(
            "{} ({}) - {} enregistrée",
            self.membre.display_name(),
            self.membre.lien.as_str(),
            self.kind.label().to_uppercase()
        )
    }
}

/// Format a server timestamp as `dd/mm/yyyy HH:MM:SS` in local time.
///
/// Offset-less timestamps are taken as already local. Unparseable input is
/// returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format(DISPLAY).to_string();
        }
    }

    raw.to_string()
}
