use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed view of the `v1/countries` listing, which nests entries under
/// `results`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryList {
    #[serde(default)]
    pub results: Vec<Country>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    /// Fields not modelled here (codes, coordinates) are kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CountryList {
    pub fn first_name(&self) -> Option<&str> {
        self.results.first().map(|c| c.name.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.results.iter().map(|c| c.name.as_str()).collect()
    }
}
