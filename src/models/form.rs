use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply of the card form endpoint. Either field may be absent, and neither is
/// guaranteed to be a string.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct FormResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}
