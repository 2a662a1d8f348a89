//! Header-driven column detection with positional fallback layouts.
//!
//! Exports come in at least two column orders and never carry a schema tag. Headers
//! are reduced to a clean token (lower-case, `a-z` only) and classified by an ordered
//! rule table. When the two identifying columns (`no`, `nom`) cannot both be found,
//! the first raw header cell selects one of the fixed positional layouts instead.
//!
//! Accented headers degrade predictably once non-letters are dropped ("Téléphone"
//! becomes "tlphone", "Prénom" becomes "prnom"), so the rules are written against
//! those degraded spellings.

use crate::models::ClientField;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z]").expect("Failed to compile non-letter regex"));

/// Lower-case a header cell and strip every character outside `a-z`.
pub fn clean_token(header: &str) -> String {
    NON_LETTER_RE
        .replace_all(&header.to_lowercase(), "")
        .into_owned()
}

/// One header classification rule: the token must contain `needle` and must not
/// contain `unless`.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRule {
    pub field: ClientField,
    pub needle: &'static str,
    pub unless: Option<&'static str>,
}

impl HeaderRule {
    const fn new(field: ClientField, needle: &'static str, unless: Option<&'static str>) -> Self {
        Self {
            field,
            needle,
            unless,
        }
    }

    /// Whether a clean token satisfies this rule.
    pub fn matches(&self, token: &str) -> bool {
        token.contains(self.needle) && !self.unless.is_some_and(|excluded| token.contains(excluded))
    }
}

/// Classification rules, evaluated top to bottom. The first match wins.
///
/// The `date` rule also captures free-text columns that merely mention a date.
pub const HEADER_RULES: &[HeaderRule] = &[
    HeaderRule::new(ClientField::No, "no", Some("nom")),
    HeaderRule::new(ClientField::Nom, "nom", Some("prnom")),
    HeaderRule::new(ClientField::Prenom, "prnom", None),
    HeaderRule::new(ClientField::Actif, "actif", None),
    HeaderRule::new(ClientField::Fonction, "fonction", None),
    HeaderRule::new(ClientField::Telephone, "tlphone", Some("portable")),
    HeaderRule::new(ClientField::TelPortable, "portable", None),
    HeaderRule::new(ClientField::Email, "email", None),
    HeaderRule::new(ClientField::AccesEasyMission, "accseasy", None),
    HeaderRule::new(ClientField::EditeurMutation, "editeur", None),
    HeaderRule::new(ClientField::DateMutation, "date", None),
];

/// Classify a single header cell.
pub fn classify_header(header: &str) -> Option<ClientField> {
    let token = clean_token(header);
    HEADER_RULES
        .iter()
        .find(|rule| rule.matches(&token))
        .map(|rule| rule.field)
}

/// A hardcoded column order, selected when the raw first header contains `marker`.
#[derive(Debug, Clone, Copy)]
pub struct PositionalLayout {
    pub name: &'static str,
    pub marker: &'static str,
    /// Field stored at each column position
    pub order: [ClientField; ClientField::COUNT],
}

/// Fallback layouts, tried in order.
pub const POSITIONAL_LAYOUTS: &[PositionalLayout] = &[
    PositionalLayout {
        name: "number-first",
        marker: "No",
        order: [
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
        ],
    },
    PositionalLayout {
        name: "active-first",
        marker: "Actif",
        order: [
            ClientField::Actif,
            ClientField::No,
            ClientField::Nom,
            ClientField::Prenom,
            ClientField::Fonction,
            ClientField::Telephone,
            ClientField::TelPortable,
            ClientField::Email,
            ClientField::AccesEasyMission,
            ClientField::EditeurMutation,
            ClientField::DateMutation,
        ],
    },
];

/// Where a column map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Built from header rules
    Detected,
    /// Replaced by a named positional layout
    Positional(&'static str),
}

/// Mapping from semantic field to 0-based column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Option<usize>; ClientField::COUNT],
    source: ColumnSource,
}

impl ColumnMap {
    /// A map with no field assigned.
    pub fn empty() -> Self {
        Self {
            columns: [None; ClientField::COUNT],
            source: ColumnSource::Detected,
        }
    }

    /// Build the map for a header row, applying the positional fallback when the
    /// identifying columns are missing.
    pub fn from_header<S: AsRef<str>>(headers: &[S]) -> Self {
        let detected = Self::detect(headers);
        if detected.is_mapped(ClientField::No) && detected.is_mapped(ClientField::Nom) {
            return detected;
        }

        let first = headers.first().map(|h| h.as_ref()).unwrap_or("");
        POSITIONAL_LAYOUTS
            .iter()
            .find(|layout| first.contains(layout.marker))
            .map(Self::from_layout)
            .unwrap_or(detected)
    }

    /// Rule-based detection only. Later headers overwrite earlier ones for the same field.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut map = Self::empty();
        for (index, header) in headers.iter().enumerate() {
            if let Some(field) = classify_header(header.as_ref()) {
                map.set(field, index);
            }
        }
        map
    }

    /// Map taken verbatim from a positional layout.
    pub fn from_layout(layout: &PositionalLayout) -> Self {
        let mut map = Self::empty();
        for (index, field) in layout.order.iter().enumerate() {
            map.set(*field, index);
        }
        map.source = ColumnSource::Positional(layout.name);
        map
    }

    pub fn set(&mut self, field: ClientField, index: usize) {
        self.columns[field.index()] = Some(index);
    }

    pub fn get(&self, field: ClientField) -> Option<usize> {
        self.columns[field.index()]
    }

    pub fn is_mapped(&self, field: ClientField) -> bool {
        self.get(field).is_some()
    }

    pub fn source(&self) -> ColumnSource {
        self.source
    }

    /// Number of fields with a column.
    pub fn mapped_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    /// Cell for `field` in `row`; empty when unmapped or out of range.
    pub fn value<'a, S: AsRef<str>>(&self, field: ClientField, row: &'a [S]) -> &'a str {
        self.get(field)
            .and_then(|index| row.get(index))
            .map(|cell| cell.as_ref())
            .unwrap_or("")
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::empty()
    }
}
