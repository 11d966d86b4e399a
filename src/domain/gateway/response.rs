//! Result of a refund or cancellation, in the host's status convention.

use serde::{Deserialize, Serialize};

/// Host status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Success,
    Declined,
    Error,
}

/// Response returned to the host for refunds and cancellations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub status: GatewayStatus,

    /// Data recorded in the host's gateway log.
    pub rawdata: serde_json::Value,

    /// Provider reference of the refund transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transid: Option<String>,
}

impl GatewayResponse {
    pub fn new(status: GatewayStatus, rawdata: serde_json::Value) -> Self {
        Self {
            status,
            rawdata,
            transid: None,
        }
    }

    pub fn success(rawdata: serde_json::Value) -> Self {
        Self::new(GatewayStatus::Success, rawdata)
    }

    pub fn declined(rawdata: serde_json::Value) -> Self {
        Self::new(GatewayStatus::Declined, rawdata)
    }

    /// An error with a message as the logged data.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            GatewayStatus::Error,
            serde_json::Value::String(message.into()),
        )
    }

    pub fn with_transid(mut self, transid: impl Into<String>) -> Self {
        self.transid = Some(transid.into());
        self
    }
}
