//! Client model: one person listed in a company export.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic columns a client export may carry.
///
/// The declaration order is the canonical field order used by the positional layouts
/// and by [`ClientField::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClientField {
    No,
    Nom,
    Prenom,
    Actif,
    Fonction,
    Telephone,
    TelPortable,
    Email,
    AccesEasyMission,
    EditeurMutation,
    DateMutation,
}

impl ClientField {
    /// Number of semantic fields.
    pub const COUNT: usize = 11;

    /// Every field, in canonical order.
    pub const ALL: [ClientField; Self::COUNT] = [
        ClientField::No,
        ClientField::Nom,
        ClientField::Prenom,
        ClientField::Actif,
        ClientField::Fonction,
        ClientField::Telephone,
        ClientField::TelPortable,
        ClientField::Email,
        ClientField::AccesEasyMission,
        ClientField::EditeurMutation,
        ClientField::DateMutation,
    ];

    /// Fields concatenated into the text a client search runs against.
    pub const SEARCHABLE: [ClientField; 6] = [
        ClientField::Nom,
        ClientField::Prenom,
        ClientField::Fonction,
        ClientField::Email,
        ClientField::Telephone,
        ClientField::TelPortable,
    ];

    /// Fields a per-company client filter looks at, each tested on its own.
    pub const FILTERABLE: [ClientField; 4] = [
        ClientField::Nom,
        ClientField::Prenom,
        ClientField::Fonction,
        ClientField::Email,
    ];

    /// Position of this field in [`ClientField::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Serialized name of the field.
    pub fn name(self) -> &'static str {
        match self {
            ClientField::No => "no",
            ClientField::Nom => "nom",
            ClientField::Prenom => "prenom",
            ClientField::Actif => "actif",
            ClientField::Fonction => "fonction",
            ClientField::Telephone => "telephone",
            ClientField::TelPortable => "telPortable",
            ClientField::Email => "email",
            ClientField::AccesEasyMission => "accesEasyMission",
            ClientField::EditeurMutation => "editeurMutation",
            ClientField::DateMutation => "dateMutation",
        }
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `actif` value exported for an active client.
pub const ACTIVE_MARKER: &str = "1 - Oui";

/// A normalized client record.
///
/// Every field is plain text copied from the export; absent columns are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRecord {
    /// Client number
    pub no: String,

    /// Last name
    pub nom: String,

    /// First name
    pub prenom: String,

    /// Active flag as exported (e.g. "1 - Oui")
    pub actif: String,

    /// Job title
    pub fonction: String,

    /// Landline phone
    pub telephone: String,

    /// Mobile phone
    pub tel_portable: String,

    /// Email address
    pub email: String,

    /// EasyMission access flag
    pub acces_easy_mission: String,

    /// Editor of the last change
    pub editeur_mutation: String,

    /// Date of the last change
    pub date_mutation: String,
}

impl ClientRecord {
    /// Build a record by asking `value` for each field.
    pub fn from_fields<F>(mut value: F) -> Self
    where
        F: FnMut(ClientField) -> String,
    {
        let mut record = Self::default();
        for field in ClientField::ALL {
            *record.field_mut(field) = value(field);
        }
        record
    }

    /// Read a field by its semantic name.
    pub fn field(&self, field: ClientField) -> &str {
        match field {
            ClientField::No => &self.no,
            ClientField::Nom => &self.nom,
            ClientField::Prenom => &self.prenom,
            ClientField::Actif => &self.actif,
            ClientField::Fonction => &self.fonction,
            ClientField::Telephone => &self.telephone,
            ClientField::TelPortable => &self.tel_portable,
            ClientField::Email => &self.email,
            ClientField::AccesEasyMission => &self.acces_easy_mission,
            ClientField::EditeurMutation => &self.editeur_mutation,
            ClientField::DateMutation => &self.date_mutation,
        }
    }

    fn field_mut(&mut self, field: ClientField) -> &mut String {
        match field {
            ClientField::No => &mut self.no,
            ClientField::Nom => &mut self.nom,
            ClientField::Prenom => &mut self.prenom,
            ClientField::Actif => &mut self.actif,
            ClientField::Fonction => &mut self.fonction,
            ClientField::Telephone => &mut self.telephone,
            ClientField::TelPortable => &mut self.tel_portable,
            ClientField::Email => &mut self.email,
            ClientField::AccesEasyMission => &mut self.acces_easy_mission,
            ClientField::EditeurMutation => &mut self.editeur_mutation,
            ClientField::DateMutation => &mut self.date_mutation,
        }
    }

    /// Whether the record carries a first or last name.
    pub fn has_name(&self) -> bool {
        !self.nom.is_empty() || !self.prenom.is_empty()
    }

    /// Lower-cased, space-joined searchable fields with empty ones omitted.
    pub fn searchable_text(&self) -> String {
        ClientField::SEARCHABLE
            .iter()
            .map(|&field| self.field(field))
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Whether the export flags the client as active. Any other value is inactive.
    pub fn is_active(&self) -> bool {
        self.actif == ACTIVE_MARKER
    }
}
