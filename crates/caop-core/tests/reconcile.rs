// End-to-end reconciliation over in-memory documents: the same
// sequence the loader runs, minus the file I/O.

use serde_json::json;

use caop_core::hierarchy::{build_administrations, finalize};
use caop_core::merge::{enrich_municipalities, enrich_parishes};
use caop_core::region::{Feature, Region};
use caop_core::source;

fn feature(parish: &str, municipality: &str, code: &str) -> Feature {
    let mut props = serde_json::Map::new();
    props.insert("Freguesia".to_string(), json!(parish));
    props.insert("Concelho".to_string(), json!(municipality));
    props.insert("Dicofre".to_string(), json!(code));
    Feature {
        properties: Some(props),
        geometry: json!({ "type": "Polygon", "coordinates": [] }),
    }
}

#[test]
fn unmatched_primary_record_survives_the_merge_unchanged() {
    let doc = json!({
        "d": [{ "entidade": "Foo (Bar)", "codigoine": "0312" }]
    });
    let mut parishes = source::parse_parishes_2018(&doc).unwrap();

    let contacts_doc = json!({
        "Contatos_freguesias": [{
            "NOME": "Somewhere Else",
            "MUNICÍPIO": "Elsewhere",
            "EMAIL": "x@y"
        }]
    });
    let contacts = source::parse_parishes_2021(&contacts_doc).unwrap();
    enrich_parishes(&mut parishes, &contacts);

    assert_eq!(parishes[0].name, "Foo");
    assert_eq!(parishes[0].municipality, "Bar");
    assert_eq!(parishes[0].email, None);
}

#[test]
fn geometry_annotation_requires_a_matching_code() {
    let doc = json!({
        "d": [
            { "entidade": "Foo (Bar)", "codigoine": "0312" },
            { "entidade": "Baz (Bar)", "codigoine": "0555" }
        ]
    });
    let parishes = source::parse_parishes_2018(&doc).unwrap();

    let mut regions = Region::portugal();
    regions[0].features = vec![feature("Foo de Cima", "Bar", "312")];

    let admin = build_administrations(&regions, parishes, Vec::new()).unwrap();
    assert_eq!(
        admin.parishes_details[0].geometry_name.as_deref(),
        Some("Foo de Cima")
    );
    assert_eq!(admin.parishes_details[1].geometry_name, None);
}

#[test]
fn full_pipeline_produces_a_sorted_deduplicated_hierarchy() {
    let parish_doc = json!({
        "d": [
            { "entidade": "Anobra (CONDEIXA-A-NOVA)", "codigoine": "0604", "email": "old@anobra.pt" },
            { "entidade": "Ega (CONDEIXA-A-NOVA)", "codigoine": "0605" }
        ]
    });
    let mut parishes = source::parse_parishes_2018(&parish_doc).unwrap();

    let municipality_doc = json!({
        "d": [{ "entidade": "Condeixa-a-Nova", "codigoine": "0604" }]
    });
    let mut municipalities = source::parse_municipalities_2018(&municipality_doc).unwrap();

    let contacts_doc = json!({
        "municipios": [{
            "MUNICÍPIO": "CONDEIXA-A-NOVA",
            "Distrito": "Distrito Coimbra",
            "E-mail": "geral@cm-condeixa.pt",
            "Telefone ": "239949120"
        }]
    });
    let contacts = source::parse_municipalities_2021(&contacts_doc).unwrap();
    enrich_municipalities(&mut municipalities, &contacts);

    let parish_contacts_doc = json!({
        "Contatos_freguesias": [{
            "NOME": "Anobra (Condeixa-a-Nova)",
            "MUNICÍPIO": "Condeixa-a-Nova",
            "EMAIL": "",
            "TELEFONE": "239943183"
        }]
    });
    let parish_contacts = source::parse_parishes_2021(&parish_contacts_doc).unwrap();
    enrich_parishes(&mut parishes, &parish_contacts);

    // Two regions contribute features; one municipality spans both lists.
    let mut regions = Region::portugal();
    regions[0].features = vec![
        feature("Ega", "Condeixa-a-Nova", "0605"),
        feature("Anobra", "Condeixa-a-Nova", "0604"),
    ];
    regions[1].features = vec![feature("Anobra", "Condeixa-a-Nova", "0604")];

    let mut admin = build_administrations(&regions, parishes, municipalities).unwrap();
    finalize(&mut admin);

    // Municipality enrichment: district stripped, fallback respected.
    let m = &admin.municipalities_details[0];
    assert_eq!(m.district.as_deref(), Some("Coimbra"));
    assert_eq!(m.email.as_deref(), Some("geral@cm-condeixa.pt"));
    assert_eq!(m.phone.as_deref(), Some("239949120"));

    // Parish enrichment: empty email ignored, phone taken.
    let p = &admin.parishes_details[0];
    assert_eq!(p.email.as_deref(), Some("old@anobra.pt"));
    assert_eq!(p.phone.as_deref(), Some("239943183"));
    assert_eq!(p.geometry_name.as_deref(), Some("Anobra"));

    // Hierarchy: one entry, duplicates collapsed, ordinal sort.
    assert_eq!(admin.list_of_municipalities_names, vec!["Condeixa-a-Nova"]);
    assert_eq!(
        admin.list_of_parishes_names,
        vec![
            "Anobra (Condeixa-a-Nova)",
            "Ega (Condeixa-a-Nova)"
        ]
    );
    assert_eq!(admin.list_of_municipalities_with_parishes.len(), 1);
    let entry = &admin.list_of_municipalities_with_parishes[0];
    assert_eq!(entry.parishes, vec!["Anobra", "Ega"]);

    // The flat lists answer the convenience lookups too.
    assert!(admin.municipality_parishes("condeixa-a-nova").is_some());
    assert!(admin.municipality_detail("CONDEIXA-A-NOVA").is_some());
}
