//! Member DTOs.

use serde::{Deserialize, Serialize};

/// Relationship category of a member.
///
/// Unknown values sent by the server are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Lien {
    Papa,
    Maman,
    Enfant,
    Etudiant,
    Personnel,
    #[default]
    Membre,
    Other(String),
}

impl Lien {
    /// Categories offered when creating a member.
    pub const CHOICES: [Lien; 6] = [
        Lien::Membre,
        Lien::Papa,
        Lien::Maman,
        Lien::Enfant,
        Lien::Etudiant,
        Lien::Personnel,
    ];

    /// Wire and display name.
    pub fn as_str(&self) -> &str {
        match self {
            Lien::Papa => "Papa",
            Lien::Maman => "Maman",
            Lien::Enfant => "Enfant",
            Lien::Etudiant => "Étudiant",
            Lien::Personnel => "Personnel",
            Lien::Membre => "Membre",
            Lien::Other(s) => s,
        }
    }

    /// Kiosk icon for this category.
    pub fn icon(&self) -> &'static str {
        match self {
            Lien::Papa => "👨",
            Lien::Maman => "👩",
            Lien::Enfant => "👶",
            Lien::Etudiant => "🎓",
            Lien::Personnel => "👔",
            Lien::Membre | Lien::Other(_) => "👤",
        }
    }
}

impl From<String> for Lien {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Papa" => Lien::Papa,
            "Maman" => Lien::Maman,
            "Enfant" => Lien::Enfant,
            "Étudiant" | "Etudiant" => Lien::Etudiant,
            "Personnel" => Lien::Personnel,
            "Membre" | "" => Lien::Membre,
            _ => Lien::Other(s),
        }
    }
}

impl From<Lien> for String {
    fn from(lien: Lien) -> Self {
        lien.as_str().to_string()
    }
}

/// Member status. Deactivation is a soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Actif,
    Inactif,
}

impl MemberStatus {
    pub fn label(self) -> &'static str {
        match self {
            MemberStatus::Actif => "actif",
            MemberStatus::Inactif => "inactif",
        }
    }
}

/// A registered library patron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    #[serde(default)]
    pub lien: Lien,
    #[serde(default)]
    pub statut: MemberStatus,
}

impl Member {
    /// "Prénom Nom", as shown on the kiosk.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }

    /// Only active members can be deactivated.
    pub fn can_deactivate(&self) -> bool {
        self.statut == MemberStatus::Actif
    }
}

/// DTO for creating a member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub lien: Lien,
}

/// Server summary of a bulk import.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportSummary {
    pub message: String,
    #[serde(default)]
    pub erreurs: u64,
}

impl ImportSummary {
    /// True when at least one row was rejected.
    pub fn has_errors(&self) -> bool {
        self.erreurs > 0
    }
}
