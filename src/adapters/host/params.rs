//! Typed view of the host parameter bag.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use super::errors::HostParamsError;
use crate::domain::payment::{
    Amount, ContextMode, Currency, CustomerContext, InvoiceContext, MerchantConfig,
    PaymentFieldSet, SystemContext,
};
use crate::domain::signing::SignatureAlgorithm;

/// Separator between payment method token and subscription id in the
/// subscription reference stored by the host.
const SUBSCRIPTION_REF_SEPARATOR: char = ':';

/// Parameters passed by the host to every gateway call.
///
/// Scalar values may arrive as strings or numbers; both are read as strings.
/// Absent keys read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostParameters {
    // Gateway settings
    #[serde(rename = "accountID", default, deserialize_with = "scalar")]
    pub account_id: String,

    #[serde(rename = "secretKey", default, deserialize_with = "scalar")]
    pub secret_key: String,

    #[serde(rename = "restPassword", default, deserialize_with = "scalar")]
    pub rest_password: String,

    #[serde(rename = "testMode", default, deserialize_with = "truthy")]
    pub test_mode: bool,

    #[serde(rename = "signatureAlgo", default, deserialize_with = "scalar")]
    pub signature_algo: String,

    #[serde(rename = "paymentType", default, deserialize_with = "scalar")]
    pub payment_type: String,

    // Invoice
    #[serde(rename = "invoiceid", default, deserialize_with = "scalar")]
    pub invoice_id: String,

    #[serde(default, deserialize_with = "scalar")]
    pub description: String,

    #[serde(default, deserialize_with = "scalar")]
    pub amount: String,

    #[serde(default, deserialize_with = "scalar")]
    pub currency: String,

    // Customer
    #[serde(rename = "clientdetails", default)]
    pub client_details: ClientDetails,

    // System
    #[serde(rename = "companyname", default, deserialize_with = "scalar")]
    pub company_name: String,

    #[serde(rename = "systemurl", default, deserialize_with = "scalar")]
    pub system_url: String,

    #[serde(rename = "returnurl", default, deserialize_with = "scalar")]
    pub return_url: String,

    #[serde(rename = "langpaynow", default, deserialize_with = "scalar")]
    pub lang_pay_now: String,

    #[serde(rename = "name", default, deserialize_with = "scalar")]
    pub module_display_name: String,

    #[serde(rename = "paymentmethod", default, deserialize_with = "scalar")]
    pub module_name: String,

    #[serde(rename = "whmcsVersion", default, deserialize_with = "scalar")]
    pub host_version: String,

    // Refund / cancellation
    #[serde(rename = "transid", default, deserialize_with = "scalar")]
    pub transaction_id: String,

    #[serde(rename = "subscriptionID", default, deserialize_with = "scalar")]
    pub subscription_id: String,

    /// Raw POST body received by the callback script.
    #[serde(rename = "postfields", default, deserialize_with = "scalar_map")]
    pub post_fields: Vec<(String, String)>,
}

/// Customer block of the parameter bag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientDetails {
    #[serde(default, deserialize_with = "scalar")]
    pub username: String,
    #[serde(default, deserialize_with = "scalar")]
    pub firstname: String,
    #[serde(default, deserialize_with = "scalar")]
    pub lastname: String,
    #[serde(default, deserialize_with = "scalar")]
    pub email: String,
    #[serde(default, deserialize_with = "scalar")]
    pub address1: String,
    #[serde(default, deserialize_with = "scalar")]
    pub address2: String,
    #[serde(default, deserialize_with = "scalar")]
    pub city: String,
    #[serde(default, deserialize_with = "scalar")]
    pub state: String,
    #[serde(default, deserialize_with = "scalar")]
    pub postcode: String,
    #[serde(default, deserialize_with = "scalar")]
    pub country: String,
    #[serde(default, deserialize_with = "scalar")]
    pub phonenumber: String,
}

impl HostParameters {
    /// Parse the parameter bag from JSON.
    pub fn from_json(json: &str) -> Result<Self, HostParamsError> {
        serde_json::from_str(json).map_err(|e| HostParamsError::InvalidParameter {
            name: "params",
            reason: e.to_string(),
        })
    }

    /// Merchant settings. The signature algorithm must be one of the
    /// supported names; there is no fallback.
    pub fn merchant_config(&self) -> Result<MerchantConfig, HostParamsError> {
        let signature_algorithm: SignatureAlgorithm = self.signature_algo.parse()?;

        let mut merchant = MerchantConfig::new(self.account_id.trim(), self.secret_key.as_str())
            .with_context_mode(ContextMode::from_test_flag(self.test_mode))
            .with_signature_algorithm(signature_algorithm);

        // An unset dropdown falls back to a single payment.
        if !self.payment_type.is_empty() {
            merchant = merchant.with_payment_type(self.payment_type.parse()?);
        }
        if !self.rest_password.is_empty() {
            merchant = merchant.with_rest_password(self.rest_password.as_str());
        }

        merchant.validate()?;
        Ok(merchant)
    }

    pub fn currency(&self) -> Result<Currency, HostParamsError> {
        if self.currency.trim().is_empty() {
            return Err(HostParamsError::MissingParameter("currency"));
        }
        Ok(Currency::from_code(&self.currency)?)
    }

    /// Amount in minor units of the parameter currency.
    pub fn amount(&self) -> Result<Amount, HostParamsError> {
        Ok(Amount::parse_decimal(&self.amount, &self.currency()?)?)
    }

    pub fn invoice_context(&self) -> Result<InvoiceContext, HostParamsError> {
        if self.invoice_id.trim().is_empty() {
            return Err(HostParamsError::MissingParameter("invoiceid"));
        }

        Ok(InvoiceContext::new(
            self.invoice_id.trim(),
            self.description.as_str(),
            self.amount()?,
            self.currency()?,
        ))
    }

    pub fn customer_context(&self) -> CustomerContext {
        let client = &self.client_details;
        CustomerContext {
            username: client.username.clone(),
            first_name: client.firstname.clone(),
            last_name: client.lastname.clone(),
            email: client.email.clone(),
            address1: client.address1.clone(),
            address2: client.address2.clone(),
            city: client.city.clone(),
            state: client.state.clone(),
            postcode: client.postcode.clone(),
            country: client.country.clone(),
            phone: client.phonenumber.clone(),
        }
    }

    pub fn system_context(&self) -> SystemContext {
        SystemContext {
            company_name: self.company_name.clone(),
            system_url: self.system_url.clone(),
            return_url: self.return_url.clone(),
            pay_now_label: self.lang_pay_now.clone(),
            module_name: self.module_name.clone(),
            host_version: self.host_version.clone(),
        }
    }

    /// Provider transaction to refund.
    pub fn refund_transaction_id(&self) -> Result<&str, HostParamsError> {
        let id = self.transaction_id.trim();
        if id.is_empty() {
            return Err(HostParamsError::MissingParameter("transid"));
        }
        Ok(id)
    }

    /// Split the stored subscription reference into
    /// `(payment method token, subscription id)`.
    pub fn subscription_reference(&self) -> Result<(&str, &str), HostParamsError> {
        let reference = self.subscription_id.trim();
        if reference.is_empty() {
            return Err(HostParamsError::MissingParameter("subscriptionID"));
        }

        match reference.split_once(SUBSCRIPTION_REF_SEPARATOR) {
            Some((token, id)) if !token.is_empty() && !id.is_empty() => Ok((token, id)),
            _ => Err(HostParamsError::InvalidParameter {
                name: "subscriptionID",
                reason: "expected <paymentMethodToken>:<subscriptionId>".to_string(),
            }),
        }
    }

    /// Fields posted to the callback script.
    pub fn notification_fields(&self) -> PaymentFieldSet {
        self.post_fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Deserialization helpers
// ════════════════════════════════════════════════════════════════════════════════

fn scalar_to_string<E: de::Error>(value: serde_json::Value) -> Result<String, E> {
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(if b { "1".to_string() } else { String::new() }),
        other => Err(E::custom(format!("expected a scalar, got {}", other))),
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(serde_json::Value::deserialize(deserializer)?)
}

/// Host checkbox semantics: empty, `"0"`, `0`, `false` and null are off.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        other => {
            let s = scalar_to_string::<D::Error>(other)?;
            !(s.is_empty() || s == "0")
        }
    })
}

fn scalar_map<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| Ok((k, scalar_to_string::<D::Error>(v)?)))
            .collect(),
        other => Err(de::Error::custom(format!("expected an object, got {}", other))),
    }
}
