// crates/caop-core/src/model.rs

use serde::{Deserialize, Serialize};

/// One parish's attribute set, merged from every source that mentions it.
///
/// Built from the 2018 full-detail export, enriched with 2021 contacts,
/// and back-annotated with `geometry_name` by the hierarchy builder when
/// a geometry feature with the same administrative code exists. The
/// geometry source and the attribute sources disagree on parish
/// spellings, and `geometry_name` records how the geometry source spells
/// this one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParishDetail {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "codigoine")]
    pub code: String,
    #[serde(rename = "nomecompleto")]
    pub full_name: Option<String>,
    #[serde(rename = "nomecompleto2")]
    pub geometry_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub fax: Option<String>,
    #[serde(rename = "sitio")]
    pub website: Option<String>,
    #[serde(rename = "codigopostal")]
    pub postal_code: Option<String>,
    #[serde(rename = "descrpostal")]
    pub postal_descr: Option<String>,
}

/// One municipality's attribute set.
///
/// `district` and `mayor` arrive with the 2021 enrichment pass; the rest
/// comes from the 2018 export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityDetail {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "codigoine")]
    pub code: String,
    #[serde(rename = "distrito")]
    pub district: Option<String>,
    pub nif: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub fax: Option<String>,
    #[serde(rename = "sitio")]
    pub website: Option<String>,
    #[serde(rename = "codigopostal")]
    pub postal_code: Option<String>,
    #[serde(rename = "descrpostal")]
    pub postal_descr: Option<String>,
    #[serde(rename = "presidentecamara")]
    pub mayor: Option<String>,
}

/// A municipality and the names of the parishes inside it, as recorded
/// by the geometry source. One entry per distinct municipality name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityParishes {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "freguesias")]
    pub parishes: Vec<String>,
}

/// The reconciled aggregate: the single owned output of the engine.
///
/// The flat name lists and the per-municipality parish sets are
/// deduplicated and sorted by the finalize step; the two detail vectors
/// carry every enriched and back-annotated field.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Administrations {
    #[serde(rename = "parishesDetails")]
    pub parishes_details: Vec<ParishDetail>,
    #[serde(rename = "municipalitiesDetails")]
    pub municipalities_details: Vec<MunicipalityDetail>,
    #[serde(rename = "listOfParishesNames")]
    pub list_of_parishes_names: Vec<String>,
    #[serde(rename = "listOfMunicipalitiesNames")]
    pub list_of_municipalities_names: Vec<String>,
    #[serde(rename = "listOfMunicipalitiesWithParishes")]
    pub list_of_municipalities_with_parishes: Vec<MunicipalityParishes>,
}

/// Simple aggregate statistics, counted over the materialized output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdminStats {
    pub municipalities: usize,
    pub parishes: usize,
}

impl Administrations {
    pub fn stats(&self) -> AdminStats {
        AdminStats {
            municipalities: self.list_of_municipalities_names.len(),
            parishes: self.list_of_parishes_names.len(),
        }
    }

    /// The hierarchy entry for a municipality, matched on the folded name.
    pub fn municipality_parishes(&self, name: &str) -> Option<&MunicipalityParishes> {
        self.list_of_municipalities_with_parishes
            .iter()
            .find(|entry| crate::text::equals_folded(&entry.name, name))
    }

    /// The detail record for a municipality, matched on the folded name.
    pub fn municipality_detail(&self, name: &str) -> Option<&MunicipalityDetail> {
        self.municipalities_details
            .iter()
            .find(|m| crate::text::equals_folded(&m.name, name))
    }
}
