//! Integration tests for schema-tolerant export mapping.

use client_directory::mapping::{
    company_id, company_name_from_file_name, import_export, map_export, parse_clients,
    ColumnSource,
};
use client_directory::models::{ClientField, ClientRecord};

const DETECTED_EXPORT: &str = "\"Actif\";\"No\";\"Nom\";\"Prénom\";\"Fonction\";\"Téléphone\";\"Tél. portable\";\"E-mail\";\"Accès EasyMission\";\"Editeur mutation\";\"Date mutation\"\n\
\"1 - Oui\";\"42\";\"Dupont\";\"Jean\";\"Directeur\";\"01 23 45 67 89\";\"06 11 22 33 44\";\"jean.dupont@acme.fr\";\"Non\";\"admin\";\"01.02.2024\"\n\
\"0 - Non\";\"43\";\"Martin\";\"Claire\";\"Comptable\";\"\";\"\";\"claire.martin@acme.fr\";\"Oui\";\"admin\";\"03.04.2024\"\n";

#[test]
fn test_dupont_record_from_minimal_header() {
    let clients = parse_clients("\"No\";\"Nom\";\"Prénom\"\n\"1\";\"Dupont\";\"Jean\"\n");

    assert_eq!(
        clients,
        vec![ClientRecord {
            no: "1".to_string(),
            nom: "Dupont".to_string(),
            prenom: "Jean".to_string(),
            ..Default::default()
        }]
    );
}

#[test]
fn test_detected_header_maps_every_field() {
    let mapped = map_export(DETECTED_EXPORT);

    assert_eq!(mapped.columns.source(), ColumnSource::Detected);
    assert_eq!(mapped.columns.get(ClientField::Actif), Some(0));
    assert_eq!(mapped.columns.get(ClientField::No), Some(1));
    assert_eq!(mapped.columns.get(ClientField::Telephone), Some(5));
    assert_eq!(mapped.columns.get(ClientField::TelPortable), Some(6));
    assert_eq!(mapped.clients.len(), 2);

    let jean = &mapped.clients[0];
    assert_eq!(jean.actif, "1 - Oui");
    assert_eq!(jean.no, "42");
    assert_eq!(jean.telephone, "01 23 45 67 89");
    assert_eq!(jean.tel_portable, "06 11 22 33 44");
    assert_eq!(jean.email, "jean.dupont@acme.fr");
    assert_eq!(jean.acces_easy_mission, "Non");
    assert_eq!(jean.editeur_mutation, "admin");
    assert_eq!(jean.date_mutation, "01.02.2024");
}

#[test]
fn test_accented_phone_header_is_landline() {
    let clients = parse_clients("No;Nom;Téléphone\n7;Durand;0102030405\n");

    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].telephone, "0102030405");
    assert!(clients[0].tel_portable.is_empty());
}

#[test]
fn test_number_first_layout_fallback() {
    // "Name" matches no rule, so the map lacks `nom` and the raw "No" selects the layout
    let content = "No;Name;First;Active;Role;Phone;Mobile;Mail;Access;Editor;Changed\n\
                   5;Bernard;Luc;1 - Oui;Chef;0100;0600;luc@x.fr;Non;ops;2024\n";
    let mapped = map_export(content);

    assert_eq!(mapped.columns.source(), ColumnSource::Positional("number-first"));
    let luc = &mapped.clients[0];
    assert_eq!(luc.no, "5");
    assert_eq!(luc.nom, "Bernard");
    assert_eq!(luc.prenom, "Luc");
    assert_eq!(luc.actif, "1 - Oui");
    assert_eq!(luc.fonction, "Chef");
    assert_eq!(luc.telephone, "0100");
    assert_eq!(luc.tel_portable, "0600");
    assert_eq!(luc.email, "luc@x.fr");
    assert_eq!(luc.date_mutation, "2024");
}

#[test]
fn test_active_first_layout_fallback() {
    // "N°" cleans to "n", so `no` stays unmapped and the raw "Actif" selects the layout
    let content = "Actif;N°;Nom;Prénom;Fonction\n1 - Oui;9;Petit;Anne;RH\n";
    let mapped = map_export(content);

    assert_eq!(mapped.columns.source(), ColumnSource::Positional("active-first"));
    let anne = &mapped.clients[0];
    assert_eq!(anne.actif, "1 - Oui");
    assert_eq!(anne.no, "9");
    assert_eq!(anne.nom, "Petit");
    assert_eq!(anne.prenom, "Anne");
    assert_eq!(anne.fonction, "RH");
}

#[test]
fn test_unresolved_header_keeps_detected_map() {
    // Neither marker appears in the first header, so the partial map stays
    let content = "Prénom;Nom complet;Email\nJean;Dupont;jean@x.fr\n";
    let mapped = map_export(content);

    assert_eq!(mapped.columns.source(), ColumnSource::Detected);
    assert!(!mapped.columns.is_mapped(ClientField::No));
    assert_eq!(mapped.clients.len(), 1);
    assert_eq!(mapped.clients[0].email, "jean@x.fr");
}

#[test]
fn test_name_in_first_column_is_not_a_missing_column() {
    // Index 0 is a real position: detection stands even though "No" sits last
    let mapped = map_export("Nom;Prénom;No\nDupont;Jean;1\n");

    assert_eq!(mapped.columns.source(), ColumnSource::Detected);
    assert_eq!(mapped.columns.get(ClientField::Nom), Some(0));
    assert_eq!(mapped.columns.get(ClientField::No), Some(2));
    assert_eq!(mapped.clients[0].nom, "Dupont");
    assert_eq!(mapped.clients[0].no, "1");
}

#[test]
fn test_every_admitted_record_has_a_name() {
    let content = "No;Nom;Prénom;Fonction\n\
                   1;Dupont;Jean;Directeur\n\
                   2;;;Stagiaire\n\
                   3;;Paul;Technicien\n\
                   4;Roux\n\
                   \n\
                   5;Leroy;;Vendeur\n";
    let mapped = map_export(content);

    assert_eq!(mapped.clients.len(), 3);
    assert!(mapped.clients.iter().all(|c| !c.nom.is_empty() || !c.prenom.is_empty()));
    assert_eq!(mapped.skipped_rows, 2);
}

#[test]
fn test_header_only_and_empty_input() {
    assert!(parse_clients("").is_empty());
    assert!(parse_clients("No;Nom;Prénom\n").is_empty());
}

#[test]
fn test_short_rows_use_empty_strings_for_missing_cells() {
    let clients = parse_clients("No;Nom;Prénom;Fonction;Email\n1;Dupont;Jean\n");

    assert_eq!(clients.len(), 1);
    assert!(clients[0].fonction.is_empty());
    assert!(clients[0].email.is_empty());
}

#[test]
fn test_parsing_is_deterministic() {
    assert_eq!(parse_clients(DETECTED_EXPORT), parse_clients(DETECTED_EXPORT));
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let with_bom = format!("\u{feff}{}", DETECTED_EXPORT);
    assert_eq!(parse_clients(&with_bom), parse_clients(DETECTED_EXPORT));
}

#[test]
fn test_company_names_from_file_names() {
    assert_eq!(
        company_name_from_file_name("Acme SA.csv").as_deref(),
        Some("Acme SA")
    );
    assert_eq!(company_name_from_file_name("Clients-2024.csv"), None);
    assert_eq!(company_name_from_file_name("cllients Adecco-2023.csv"), None);
    assert_eq!(company_id("Café & Co.  Genève"), "caf-co-gen-ve");
}

#[test]
fn test_import_export_builds_company() {
    let company = import_export("Acme SA.csv", DETECTED_EXPORT).expect("company");

    assert_eq!(company.id, "acme-sa");
    assert_eq!(company.name, "Acme SA");
    assert_eq!(company.file_name.as_deref(), Some("Acme SA.csv"));
    assert_eq!(company.total_clients, 2);
    assert_eq!(company.clients.len(), company.total_clients);

    assert!(import_export("Clients-export.csv", DETECTED_EXPORT).is_none());
}
