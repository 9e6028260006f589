//! Result envelope returned to callers

use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform success/failure record for one report request.
///
/// Success carries `ra_report` and `custom_data_used`; failure carries
/// `error` and `details`. Unused fields are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ra_report: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResultEnvelope {
    /// Envelope for a generator run that produced a report
    pub fn success(ra_report: Value, user_data: impl Into<String>) -> Self {
        Self {
            success: true,
            ra_report: Some(ra_report),
            custom_data_used: Some(user_data.into()),
            error: None,
            details: None,
        }
    }

    /// Envelope for a failed request
    pub fn failure(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            ra_report: None,
            custom_data_used: None,
            error: Some(error.into()),
            details: Some(details.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Two-space indented JSON, as printed by the CLI
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<RequestError> for ResultEnvelope {
    fn from(err: RequestError) -> Self {
        Self::failure(err.category(), err.details())
    }
}
