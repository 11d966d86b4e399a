//! Host-facing gateway contract: metadata, settings schema and the status
//! convention used for refund and cancellation results.

mod metadata;
mod response;

pub use metadata::{
    gateway_metadata, settings_schema, GatewayMetadata, SettingField, SettingType, SettingsSchema,
};
pub use response::{GatewayResponse, GatewayStatus};
