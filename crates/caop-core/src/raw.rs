// crates/caop-core/src/raw.rs
//
// Per-source record shapes, exactly as published. Each dataset has its
// own spelling conventions; `#[serde(rename)]` keeps the oddities (the
// trailing space in `"Telefone "`, the double space in
// `"Nome  Presidente"`) out of the Rust identifiers. Source-internal
// bookkeeping fields (PartitionKey, RowKey, Timestamp, entityid,
// tipoentidade) are simply not modeled.

use serde::Deserialize;

/// Raw parish record from the 2018 full-detail export (top-level path `d`).
///
/// `entidade` is the compound `"<parish> (<MUNICIPALITY>)"` display name;
/// the loader splits it into the canonical name fields.
#[derive(Debug, Deserialize)]
pub struct ParishDetailRaw {
    pub entidade: String,
    pub codigoine: String,
    #[serde(default)]
    pub nomecompleto: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub sitio: Option<String>,
    #[serde(default)]
    pub codigopostal: Option<String>,
    #[serde(default)]
    pub descrpostal: Option<String>,
}

/// Raw municipality record from the 2018 full-detail export (path `d`).
///
/// Here `entidade` is a plain name, no splitting involved.
#[derive(Debug, Deserialize)]
pub struct MunicipalityDetailRaw {
    pub entidade: String,
    pub codigoine: String,
    #[serde(default)]
    pub nif: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub sitio: Option<String>,
    #[serde(default)]
    pub codigopostal: Option<String>,
    #[serde(default)]
    pub descrpostal: Option<String>,
    #[serde(default)]
    pub presidentecamara: Option<String>,
}

/// Raw municipality contact record from the 2021 enrichment export
/// (top-level path `municipios`).
///
/// The export carries the phone number under `"Telefone "` (trailing
/// space) in most rows and `"Telefone"` in a few; both are modeled and
/// the merge tries them in that order.
#[derive(Debug, Deserialize)]
pub struct MunicipalityContactsRaw {
    #[serde(rename = "MUNICÍPIO")]
    pub municipio: String,
    #[serde(rename = "Distrito")]
    pub distrito: String,
    #[serde(rename = "E-mail", default)]
    pub email: Option<String>,
    #[serde(rename = "Telefone ", default)]
    pub telefone_padded: Option<String>,
    #[serde(rename = "Telefone", default)]
    pub telefone: Option<String>,
    #[serde(rename = "Sitio", default)]
    pub sitio: Option<String>,
    #[serde(rename = "Nome  Presidente", default)]
    pub presidente: Option<String>,
}

/// Raw parish contact record from the 2021 enrichment export
/// (top-level path `Contatos_freguesias`).
#[derive(Debug, Deserialize)]
pub struct ParishContactsRaw {
    #[serde(rename = "NOME")]
    pub nome: String,
    #[serde(rename = "MUNICÍPIO")]
    pub municipio: String,
    #[serde(rename = "EMAIL", default)]
    pub email: Option<String>,
    #[serde(rename = "TELEFONE", default)]
    pub telefone: Option<String>,
}
