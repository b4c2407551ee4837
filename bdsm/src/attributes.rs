//! Format-spec attributes stored alongside the matrix

use std::collections::BTreeMap;

use bdsm_core::format::spec::FORMAT_SPEC;

use crate::Result;

/// Store attributes: format-spec keys mapped to their values
pub type Attributes = BTreeMap<String, String>;

/// The attributes every newly created store carries
pub fn format_spec() -> Attributes {
    FORMAT_SPEC
        .iter()
        .map(|&(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub(crate) fn encode(attributes: &Attributes) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(attributes)?)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Attributes> {
    Ok(serde_json::from_slice(bytes)?)
}
