//! Parsing the result of `terraform output -json`

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named output reported by Terraform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Output name (the key it was reported under)
    #[serde(skip)]
    pub name: String,
    /// Terraform's type tag for the value
    #[serde(rename = "type")]
    pub data_type: serde_json::Value,
    /// The output value
    pub value: serde_json::Value,
    /// Whether Terraform marks the output as sensitive
    #[serde(default)]
    pub sensitive: bool,
}

impl OutputRecord {
    /// The value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Terraform outputs, keyed by name
pub type Outputs = BTreeMap<String, OutputRecord>;

/// Parse the JSON printed by `terraform output -json`
pub fn parse_outputs(json: &str) -> Result<Outputs> {
    let mut outputs: Outputs =
        serde_json::from_str(json).map_err(|source| Error::OutputParseFailed {
            source,
            output: json.to_string(),
        })?;

    for (name, record) in outputs.iter_mut() {
        record.name = name.clone();
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_single_string_output() {
        let outputs =
            parse_outputs(r#"{"ip":{"type":"string","value":"10.0.0.5","sensitive":false}}"#)
                .unwrap();

        assert_eq!(outputs.len(), 1);
        let ip = &outputs["ip"];
        assert_eq!(ip.name, "ip");
        assert_eq!(ip.data_type, json!("string"));
        assert_eq!(ip.as_str(), Some("10.0.0.5"));
        assert!(!ip.sensitive);
    }

    #[test]
    fn parses_structured_outputs() {
        let outputs = parse_outputs(
            r#"{
                "ports": {"type": ["list", "number"], "value": [22, 2376], "sensitive": false},
                "password": {"type": "string", "value": "hunter2", "sensitive": true}
            }"#,
        )
        .unwrap();

        assert_eq!(outputs["ports"].value, json!([22, 2376]));
        assert_eq!(outputs["ports"].as_str(), None);
        assert!(outputs["password"].sensitive);
    }

    #[test]
    fn empty_object_means_no_outputs() {
        assert!(parse_outputs("{}").unwrap().is_empty());
    }

    #[test]
    fn non_json_is_a_parse_failure() {
        let text = "The state file either has no outputs defined, or all the defined\n";
        let err = parse_outputs(text).unwrap_err();

        assert!(matches!(err, Error::OutputParseFailed { .. }));
        assert_eq!(err.captured_output(), Some(text));
    }
}
