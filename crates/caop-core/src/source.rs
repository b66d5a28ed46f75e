// crates/caop-core/src/source.rs
//
// Parses each decoded JSON document into a flat record sequence. The
// 2018 sources are lifted into the canonical shapes here; the 2021
// sources keep their own shapes and are reconciled later by the merge
// pass.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CaopError, Result};
use crate::model::{MunicipalityDetail, ParishDetail};
use crate::raw::{
    MunicipalityContactsRaw, MunicipalityDetailRaw, ParishContactsRaw, ParishDetailRaw,
};
use crate::text::split_entity_name;

/// Dataset labels used in error context.
pub const PARISHES_2018: &str = "parishes2018";
pub const PARISHES_2021: &str = "parishes2021";
pub const MUNICIPALITIES_2018: &str = "municipalities2018";
pub const MUNICIPALITIES_2021: &str = "municipalities2021";

/// The record array at a document's top-level path.
fn record_list<'a>(doc: &'a Value, dataset: &str, path: &str) -> Result<&'a [Value]> {
    doc.get(path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| CaopError::SourceFormat {
            dataset: dataset.to_string(),
            path: path.to_string(),
        })
}

/// Parse the 2018 parish export.
///
/// The compound `entidade` field is split into parish and municipality
/// names. A value that does not match the `"name (municipality)"` shape
/// is a structural violation and aborts the run.
pub fn parse_parishes_2018(doc: &Value) -> Result<Vec<ParishDetail>> {
    let items = record_list(doc, PARISHES_2018, "d")?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let raw = ParishDetailRaw::deserialize(item)?;
        let (name, municipality) =
            split_entity_name(&raw.entidade).ok_or_else(|| CaopError::Parse {
                dataset: PARISHES_2018.to_string(),
                value: raw.entidade.clone(),
            })?;
        out.push(ParishDetail {
            name,
            municipality,
            code: raw.codigoine,
            full_name: raw.nomecompleto,
            geometry_name: None,
            email: raw.email,
            phone: raw.telefone,
            fax: raw.fax,
            website: raw.sitio,
            postal_code: raw.codigopostal,
            postal_descr: raw.descrpostal,
        });
    }
    Ok(out)
}

/// Parse the 2018 municipality export. `entidade` is already a plain
/// name and maps straight onto the canonical name field.
pub fn parse_municipalities_2018(doc: &Value) -> Result<Vec<MunicipalityDetail>> {
    let items = record_list(doc, MUNICIPALITIES_2018, "d")?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let raw = MunicipalityDetailRaw::deserialize(item)?;
        out.push(MunicipalityDetail {
            name: raw.entidade,
            code: raw.codigoine,
            district: None,
            nif: raw.nif,
            email: raw.email,
            phone: raw.telefone,
            fax: raw.fax,
            website: raw.sitio,
            postal_code: raw.codigopostal,
            postal_descr: raw.descrpostal,
            mayor: raw.presidentecamara,
        });
    }
    Ok(out)
}

/// Parse the 2021 municipality contact export, keeping its own shape.
pub fn parse_municipalities_2021(doc: &Value) -> Result<Vec<MunicipalityContactsRaw>> {
    let items = record_list(doc, MUNICIPALITIES_2021, "municipios")?;
    items
        .iter()
        .map(|item| MunicipalityContactsRaw::deserialize(item).map_err(CaopError::Json))
        .collect()
}

/// Parse the 2021 parish contact export, keeping its own shape.
pub fn parse_parishes_2021(doc: &Value) -> Result<Vec<ParishContactsRaw>> {
    let items = record_list(doc, PARISHES_2021, "Contatos_freguesias")?;
    items
        .iter()
        .map(|item| ParishContactsRaw::deserialize(item).map_err(CaopError::Json))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parish_2018_is_split_and_stripped() {
        let doc = json!({
            "d": [{
                "PartitionKey": "freguesias",
                "RowKey": "1",
                "Timestamp": "2018-01-01T00:00:00Z",
                "entityid": "42",
                "tipoentidade": "FREGUESIA",
                "entidade": "Anobra (CONDEIXA-A-NOVA)",
                "codigoine": "0604",
                "nomecompleto": "Freguesia de Anobra",
                "email": "geral@anobra.pt"
            }]
        });
        let parishes = parse_parishes_2018(&doc).unwrap();
        assert_eq!(parishes.len(), 1);
        assert_eq!(parishes[0].name, "Anobra");
        assert_eq!(parishes[0].municipality, "CONDEIXA-A-NOVA");
        assert_eq!(parishes[0].code, "0604");
        assert_eq!(parishes[0].full_name.as_deref(), Some("Freguesia de Anobra"));
        assert_eq!(parishes[0].email.as_deref(), Some("geral@anobra.pt"));
        assert_eq!(parishes[0].geometry_name, None);
    }

    #[test]
    fn malformed_entity_name_aborts() {
        let doc = json!({
            "d": [{ "entidade": "NoParenHere", "codigoine": "0604" }]
        });
        let err = parse_parishes_2018(&doc).unwrap_err();
        match err {
            CaopError::Parse { dataset, value } => {
                assert_eq!(dataset, PARISHES_2018);
                assert_eq!(value, "NoParenHere");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn municipality_2018_renames_the_display_field() {
        let doc = json!({
            "d": [{
                "entidade": "Condeixa-a-Nova",
                "codigoine": "0604",
                "telefone": "239940140"
            }]
        });
        let municipalities = parse_municipalities_2018(&doc).unwrap();
        assert_eq!(municipalities[0].name, "Condeixa-a-Nova");
        assert_eq!(municipalities[0].phone.as_deref(), Some("239940140"));
        assert_eq!(municipalities[0].district, None);
    }

    #[test]
    fn missing_top_level_path_is_a_source_format_error() {
        let doc = json!({ "records": [] });
        match parse_parishes_2018(&doc).unwrap_err() {
            CaopError::SourceFormat { dataset, path } => {
                assert_eq!(dataset, PARISHES_2018);
                assert_eq!(path, "d");
            }
            other => panic!("expected SourceFormat, got {other:?}"),
        }

        // Present but not an array is the same violation.
        let doc = json!({ "municipios": {} });
        assert!(matches!(
            parse_municipalities_2021(&doc).unwrap_err(),
            CaopError::SourceFormat { .. }
        ));
    }

    #[test]
    fn contact_exports_keep_their_own_shape() {
        let doc = json!({
            "Contatos_freguesias": [{
                "NOME": "Anobra (Condeixa-a-Nova)",
                "MUNICÍPIO": "Condeixa-a-Nova",
                "EMAIL": "geral@anobra.pt",
                "TELEFONE": "239943183"
            }]
        });
        let contacts = parse_parishes_2021(&doc).unwrap();
        assert_eq!(contacts[0].nome, "Anobra (Condeixa-a-Nova)");
        assert_eq!(contacts[0].telefone.as_deref(), Some("239943183"));
    }
}
