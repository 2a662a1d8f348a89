//! Company names and identifiers derived from export file names.

use once_cell::sync::Lazy;
use regex::Regex;

/// Extension stripped from export file names.
pub const EXPORT_SUFFIX: &str = ".csv";

/// File-name fragments marking placeholder or known-bad exports.
pub const EXCLUDED_MARKERS: &[&str] = &["Clients-", "cllients Adecco-"];

static NON_ID_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("Failed to compile identifier regex"));
static DASH_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-+").expect("Failed to compile dash regex"));

/// Company display name for an export file, or `None` for excluded files.
///
/// Only the first occurrence of the suffix is removed. Exclusion markers are
/// case-sensitive.
pub fn company_name_from_file_name(file_name: &str) -> Option<String> {
    let name = file_name.replacen(EXPORT_SUFFIX, "", 1);

    if EXCLUDED_MARKERS.iter().any(|marker| name.contains(marker)) {
        return None;
    }
    if name.is_empty() {
        return None;
    }

    Some(name)
}

/// URL-safe identifier for a company name ("Société Générale" -> "soci-t-g-n-rale").
pub fn company_id(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = NON_ID_CHAR_RE.replace_all(&lowered, "-");
    let collapsed = DASH_RUN_RE.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}
