//! Gateway metadata and the settings schema shown to host administrators.

use serde::Serialize;

/// Capabilities advertised to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayMetadata {
    pub display_name: &'static str,

    #[serde(rename = "APIVersion")]
    pub api_version: &'static str,

    /// Card details are entered on the provider's page, never locally.
    // The host spells this key without the "i".
    #[serde(rename = "DisableLocalCredtCardInput")]
    pub disable_local_credit_card_input: bool,

    pub tokenised_storage: bool,
}

pub fn gateway_metadata() -> GatewayMetadata {
    GatewayMetadata {
        display_name: "Payzen Payment Gateway Module",
        api_version: "1.1",
        disable_local_credit_card_input: true,
        tokenised_storage: false,
    }
}

/// Input widget of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettingType {
    System,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "yesno")]
    YesNo,
    #[serde(rename = "dropdown")]
    Dropdown,
}

/// One administrator-facing setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingField {
    /// Key under which the host passes the value back.
    #[serde(skip)]
    pub key: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<&'static str>,

    #[serde(rename = "Type")]
    pub setting_type: SettingType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,

    /// Dropdown options as (submitted value, label).
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_options"
    )]
    pub options: Vec<(&'static str, &'static str)>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl SettingField {
    fn new(key: &'static str, setting_type: SettingType) -> Self {
        Self {
            key,
            friendly_name: None,
            setting_type,
            value: None,
            size: None,
            default: None,
            options: Vec::new(),
            description: None,
        }
    }

    fn named(mut self, name: &'static str) -> Self {
        self.friendly_name = Some(name);
        self
    }

    fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn text_input(mut self) -> Self {
        self.size = Some("25");
        self.default = Some("");
        self
    }
}

fn serialize_options<S>(options: &[(&'static str, &'static str)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(options.len()))?;
    for (value, label) in options {
        map.serialize_entry(value, label)?;
    }
    map.end()
}

/// Settings in display order.
pub fn settings_schema() -> Vec<SettingField> {
    let mut friendly_name = SettingField::new("FriendlyName", SettingType::System);
    friendly_name.value = Some("Payzen Third Party Payment Gateway Module");

    let mut signature_algo = SettingField::new("signatureAlgo", SettingType::Dropdown)
        .named("Algorithme de signature")
        .described("Choose one");
    signature_algo.options = vec![("SHA-1", "SHA-1"), ("HMAC_SHA_256", "HMAC_SHA_256")];

    let mut payment_type = SettingField::new("paymentType", SettingType::Dropdown)
        .named("Type de paiement")
        .described("Choose one");
    payment_type.options = vec![("SINGLE", "1 fois"), ("MULTI", "plusieurs fois")];

    vec![
        friendly_name,
        SettingField::new("accountID", SettingType::Text)
            .named("Account ID")
            .text_input()
            .described("Enter your account ID here"),
        SettingField::new("secretKey", SettingType::Password)
            .named("Secret Key")
            .text_input()
            .described("Enter secret key here"),
        SettingField::new("restPassword", SettingType::Password)
            .named("REST API Password")
            .text_input()
            .described("Required for refunds and subscription cancellation"),
        SettingField::new("testMode", SettingType::YesNo)
            .named("Test Mode")
            .described("Tick to enable test mode"),
        signature_algo,
        payment_type,
    ]
}

/// Settings serialized as the host expects them: one entry per key, in
/// display order.
pub struct SettingsSchema<'a>(pub &'a [SettingField]);

impl Serialize for SettingsSchema<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in self.0 {
            map.serialize_entry(field.key, field)?;
        }
        map.end()
    }
}
