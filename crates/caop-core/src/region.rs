// crates/caop-core/src/region.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CaopError, Result};

/// Attribute key for the administrative code. The CAOP datasets spell it
/// both ways depending on the region; lookups are literal and
/// case-sensitive, trying [`CODE_KEY`] first.
pub const CODE_KEY: &str = "Dicofre";
pub const CODE_KEY_UPPER: &str = "DICOFRE";

const PARISH_KEY: &str = "Freguesia";
const MUNICIPALITY_KEY: &str = "Concelho";

/// One geographic unit of the country: the continent or one of the
/// archipelago groups. Enumerated statically by [`Region::portugal`],
/// populated once by the loader, read-only afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    /// Stable identifying key, e.g. `"cont"`.
    pub key: String,
    /// Display name, e.g. `"Arquipélago da Madeira"`.
    pub name: String,
    /// Dataset file stem shared by the decoded geometry and the
    /// projection file, e.g. `"Cont_AAD_CAOP2020"`.
    pub file_stem: String,
    /// Parish-level geometry features, in dataset order.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Raw contents of the region's `.prj` projection file.
    #[serde(default)]
    pub projection: Option<String>,
}

impl Region {
    fn new(key: &str, name: &str, file_stem: &str) -> Self {
        Region {
            key: key.to_string(),
            name: name.to_string(),
            file_stem: file_stem.to_string(),
            features: Vec::new(),
            projection: None,
        }
    }

    /// The five CAOP regions, in canonical order.
    pub fn portugal() -> Vec<Region> {
        vec![
            Region::new("cont", "Continente", "Cont_AAD_CAOP2020"),
            Region::new(
                "ArqMadeira",
                "Arquipélago da Madeira",
                "ArqMadeira_AAd_CAOP2020",
            ),
            Region::new(
                "ArqAcores_GOcidental",
                "Arquipélago dos Açores (Grupo Ocidental)",
                "ArqAcores_GOcidental_AAd_CAOP2020",
            ),
            Region::new(
                "ArqAcores_GCentral",
                "Arquipélago dos Açores (Grupo Central)",
                "ArqAcores_GCentral_AAd_CAOP2020",
            ),
            Region::new(
                "ArqAcores_GOriental",
                "Arquipélago dos Açores (Grupo Oriental)",
                "ArqAcores_GOriental_AAd_CAOP2020",
            ),
        ]
    }
}

/// A decoded feature collection, the output contract of the external
/// shapefile decoder.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One parish-level boundary record. The geometry itself is opaque to
/// the reconciliation engine: only the attribute map is read, and only
/// for the parish name, municipality name and administrative code.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Value,
}

impl Feature {
    /// The attribute map. A feature without one makes the whole dataset
    /// unusable, so this fails rather than skipping.
    pub fn attributes(&self) -> Result<&Map<String, Value>> {
        self.properties
            .as_ref()
            .ok_or_else(|| CaopError::Lookup("feature has no attribute map".to_string()))
    }

    /// The administrative code, under either accepted spelling.
    pub fn admin_code(&self) -> Result<&str> {
        let attrs = self.attributes()?;
        attrs
            .get(CODE_KEY)
            .or_else(|| attrs.get(CODE_KEY_UPPER))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CaopError::Lookup(format!(
                    "no {CODE_KEY:?} or {CODE_KEY_UPPER:?} attribute in {attrs:?}"
                ))
            })
    }

    pub fn parish_name(&self) -> Result<&str> {
        self.attr_str(PARISH_KEY)
    }

    pub fn municipality_name(&self) -> Result<&str> {
        self.attr_str(MUNICIPALITY_KEY)
    }

    fn attr_str(&self, key: &str) -> Result<&str> {
        self.attributes()?
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| CaopError::Lookup(format!("no string attribute {key:?}")))
    }
}
