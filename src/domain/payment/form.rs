//! Signed redirect form for the hosted payment page.

use chrono::{DateTime, Utc};

use super::customer::CustomerContext;
use super::errors::PaymentFormError;
use super::fields::PaymentFieldSet;
use super::invoice::InvoiceContext;
use super::merchant::MerchantConfig;
use super::system::SystemContext;
use crate::domain::signing::SIGNATURE_FIELD;

/// Payment page endpoint.
pub const DEFAULT_FORM_URL: &str = "https://secure.payzen.eu/vads-payment/";

/// `vads_trans_date` layout, always UTC.
const TRANS_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

const ACTION_MODE: &str = "INTERACTIVE";
const PROTOCOL_VERSION: &str = "V2";
const PAGE_ACTION: &str = "PAYMENT";

/// Assembles and signs the outgoing payment form.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use payzen_gateway::domain::payment::{
///     Amount, Currency, CustomerContext, InvoiceContext, MerchantConfig, PaymentFormBuilder,
///     SystemContext,
/// };
///
/// let merchant = MerchantConfig::new("12345678", "testkey");
/// let eur = Currency::from_code("EUR").unwrap();
/// let invoice = InvoiceContext::new("42", "Invoice #42", Amount::from_minor_units(1000), eur);
/// let customer = CustomerContext::default();
/// let system = SystemContext::default();
///
/// let form = PaymentFormBuilder::new(&merchant, &invoice, &customer, &system)
///     .at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(form.fields().get("vads_trans_date"), Some("20240102030405"));
/// assert!(form.signature().is_some());
/// ```
pub struct PaymentFormBuilder<'a> {
    merchant: &'a MerchantConfig,
    invoice: &'a InvoiceContext,
    customer: &'a CustomerContext,
    system: &'a SystemContext,
    action_url: String,
    trans_date: DateTime<Utc>,
}

impl<'a> PaymentFormBuilder<'a> {
    pub fn new(
        merchant: &'a MerchantConfig,
        invoice: &'a InvoiceContext,
        customer: &'a CustomerContext,
        system: &'a SystemContext,
    ) -> Self {
        Self {
            merchant,
            invoice,
            customer,
            system,
            action_url: DEFAULT_FORM_URL.to_string(),
            trans_date: Utc::now(),
        }
    }

    /// Override the payment page endpoint.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = url.into();
        self
    }

    /// Fix the transaction date (defaults to now).
    pub fn at(mut self, trans_date: DateTime<Utc>) -> Self {
        self.trans_date = trans_date;
        self
    }

    /// Collect the unsigned form fields.
    pub fn fields(&self) -> Result<PaymentFieldSet, PaymentFormError> {
        let merchant = self.merchant;
        let invoice = self.invoice;
        let customer = self.customer;

        let mut fields = PaymentFieldSet::new();
        fields.insert("vads_action_mode", ACTION_MODE);
        fields.insert("vads_ctx_mode", merchant.context_mode.as_str());
        fields.insert("vads_amount", invoice.amount.to_string());
        fields.insert("vads_currency", invoice.currency.numeric_code());
        fields.insert("vads_trans_id", invoice.transaction_id()?);
        fields.insert("vads_order_id", invoice.invoice_id.as_str());
        fields.insert("vads_site_id", merchant.account_id.as_str());
        fields.insert("callback_url", self.system.callback_url());
        fields.insert("return_url", self.system.return_url.as_str());
        fields.insert("vads_payment_config", merchant.payment_type.as_str());
        fields.insert("vads_version", PROTOCOL_VERSION);
        fields.insert("vads_page_action", PAGE_ACTION);
        fields.insert(
            "vads_trans_date",
            self.trans_date.format(TRANS_DATE_FORMAT).to_string(),
        );
        fields.insert("vads_order_info", invoice.description.as_str());
        fields.insert("vads_cust_id", customer.username.as_str());
        fields.insert("vads_cust_first_name", customer.first_name.as_str());
        fields.insert("vads_cust_last_name", customer.last_name.as_str());
        fields.insert("vads_cust_email", customer.email.as_str());
        fields.insert("vads_cust_address", customer.address1.as_str());
        fields.insert("vads_cust_city", customer.city.as_str());
        fields.insert("vads_cust_state", customer.state.as_str());
        fields.insert("vads_cust_zip", customer.postcode.as_str());
        fields.insert("vads_cust_country", customer.country.as_str());
        fields.insert("vads_cust_phone", customer.phone.as_str());

        Ok(fields)
    }

    /// Collect, sign and wrap the fields into a form.
    pub fn build(self) -> Result<PaymentForm, PaymentFormError> {
        self.merchant.validate()?;

        let mut fields = self.fields()?;
        let signature = fields.sign(
            self.merchant.signing_key(),
            self.merchant.signature_algorithm,
        );
        fields.insert(SIGNATURE_FIELD, signature);

        tracing::debug!(
            invoice_id = %self.invoice.invoice_id,
            ctx_mode = %self.merchant.context_mode,
            algorithm = %self.merchant.signature_algorithm,
            field_count = fields.len(),
            "Built signed payment form"
        );

        Ok(PaymentForm {
            action_url: self.action_url,
            fields,
            submit_label: self.system.pay_now_label.clone(),
        })
    }
}

/// A signed form ready to be rendered on the invoice page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    action_url: String,
    fields: PaymentFieldSet,
    submit_label: String,
}

impl PaymentForm {
    pub fn action_url(&self) -> &str {
        &self.action_url
    }

    /// All fields, including `signature` last.
    pub fn fields(&self) -> &PaymentFieldSet {
        &self.fields
    }

    pub fn signature(&self) -> Option<&str> {
        self.fields.get(SIGNATURE_FIELD)
    }

    /// Render the POST form.
    ///
    /// Hidden input values are URL-encoded; names, the action and the
    /// submit label are HTML-escaped.
    pub fn render_html(&self) -> String {
        let mut html = format!(
            r#"<form method="post" action="{}">"#,
            escape_html(&self.action_url)
        );
        for (name, value) in self.fields.iter() {
            html.push_str(&format!(
                r#"<input type="hidden" name="{}" value="{}" />"#,
                escape_html(name),
                urlencoding::encode(value)
            ));
        }
        html.push_str(&format!(
            r#"<input type="submit" value="{}" />"#,
            escape_html(&self.submit_label)
        ));
        html.push_str("</form>");
        html
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Amount, ContextMode, Currency, PaymentType};
    use crate::domain::signing::{compute_signature, SignatureAlgorithm};
    use chrono::TimeZone;

    fn merchant() -> MerchantConfig {
        MerchantConfig::new("12345678", "testkey")
    }

    fn invoice() -> InvoiceContext {
        InvoiceContext::new(
            "42",
            "Invoice #42",
            Amount::from_minor_units(1000),
            Currency::from_code("EUR").unwrap(),
        )
    }

    fn customer() -> CustomerContext {
        CustomerContext {
            username: "jdupont".to_string(),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            email: "jean@example.com".to_string(),
            address1: "1 rue de la Paix".to_string(),
            city: "Paris".to_string(),
            postcode: "75002".to_string(),
            country: "FR".to_string(),
            phone: "+33100000000".to_string(),
            ..Default::default()
        }
    }

    fn system() -> SystemContext {
        SystemContext {
            system_url: "https://billing.example.com".to_string(),
            return_url: "https://billing.example.com/viewinvoice.php?id=42".to_string(),
            pay_now_label: "Pay Now".to_string(),
            module_name: "payzengateway".to_string(),
            ..Default::default()
        }
    }

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn build(merchant: &MerchantConfig) -> PaymentForm {
        let (invoice, customer, system) = (invoice(), customer(), system());
        PaymentFormBuilder::new(merchant, &invoice, &customer, &system)
            .at(fixed_date())
            .build()
            .unwrap()
    }

    #[test]
    fn collects_protocol_fields() {
        let form = build(&merchant());
        let fields = form.fields();

        assert_eq!(fields.get("vads_action_mode"), Some("INTERACTIVE"));
        assert_eq!(fields.get("vads_ctx_mode"), Some("TEST"));
        assert_eq!(fields.get("vads_amount"), Some("1000"));
        assert_eq!(fields.get("vads_currency"), Some("978"));
        assert_eq!(fields.get("vads_trans_id"), Some("000042"));
        assert_eq!(fields.get("vads_order_id"), Some("42"));
        assert_eq!(fields.get("vads_site_id"), Some("12345678"));
        assert_eq!(fields.get("vads_payment_config"), Some("SINGLE"));
        assert_eq!(fields.get("vads_version"), Some("V2"));
        assert_eq!(fields.get("vads_page_action"), Some("PAYMENT"));
        assert_eq!(fields.get("vads_trans_date"), Some("20240309140507"));
        assert_eq!(
            fields.get("callback_url"),
            Some("https://billing.example.com/modules/gateways/callback/payzengateway.php")
        );
    }

    #[test]
    fn collects_customer_fields() {
        let form = build(&merchant());
        let fields = form.fields();

        assert_eq!(fields.get("vads_cust_id"), Some("jdupont"));
        assert_eq!(fields.get("vads_cust_first_name"), Some("Jean"));
        assert_eq!(fields.get("vads_cust_zip"), Some("75002"));
        assert_eq!(fields.get("vads_cust_state"), Some(""));
    }

    #[test]
    fn signature_is_last_and_covers_vads_fields() {
        let form = build(&merchant());
        let (last_name, last_value) = form.fields().iter().last().unwrap();
        assert_eq!(last_name, SIGNATURE_FIELD);

        let unsigned: Vec<_> = form
            .fields()
            .iter()
            .filter(|(name, _)| *name != SIGNATURE_FIELD)
            .collect();
        let expected = compute_signature(unsigned, "testkey", SignatureAlgorithm::Sha1);
        assert_eq!(last_value, expected);
    }

    #[test]
    fn uses_merchant_settings() {
        let merchant = merchant()
            .with_context_mode(ContextMode::Production)
            .with_payment_type(PaymentType::Multi)
            .with_signature_algorithm(SignatureAlgorithm::HmacSha256);
        let form = build(&merchant);

        assert_eq!(form.fields().get("vads_ctx_mode"), Some("PRODUCTION"));
        assert_eq!(form.fields().get("vads_payment_config"), Some("MULTI"));
        // base64 output for HMAC
        assert!(form.signature().unwrap().ends_with('='));
    }

    #[test]
    fn rejects_invalid_merchant() {
        let merchant = MerchantConfig::new("12345678", "");
        let (invoice, customer, system) = (invoice(), customer(), system());
        let result = PaymentFormBuilder::new(&merchant, &invoice, &customer, &system).build();
        assert_eq!(result, Err(PaymentFormError::MissingField("secretKey")));
    }

    #[test]
    fn render_html_posts_to_endpoint() {
        let html = build(&merchant()).render_html();
        assert!(html.starts_with(r#"<form method="post" action="https://secure.payzen.eu/vads-payment/">"#));
        assert!(html.ends_with(r#"<input type="submit" value="Pay Now" /></form>"#));
        assert!(html.contains(r#"<input type="hidden" name="vads_amount" value="1000" />"#));
    }

    #[test]
    fn render_html_url_encodes_values() {
        let html = build(&merchant()).render_html();
        assert!(html.contains(r#"name="vads_order_info" value="Invoice%20%2342""#));
        assert!(html.contains(r#"name="vads_cust_phone" value="%2B33100000000""#));
    }

    #[test]
    fn render_html_escapes_label() {
        let (merchant, invoice, customer) = (merchant(), invoice(), customer());
        let system = SystemContext {
            pay_now_label: r#"Pay "now" <b>"#.to_string(),
            ..system()
        };
        let html = PaymentFormBuilder::new(&merchant, &invoice, &customer, &system)
            .build()
            .unwrap()
            .render_html();
        assert!(html.contains(r#"value="Pay &quot;now&quot; &lt;b&gt;""#));
    }

    #[test]
    fn custom_action_url() {
        let (merchant, invoice, customer, system) = (merchant(), invoice(), customer(), system());
        let form = PaymentFormBuilder::new(&merchant, &invoice, &customer, &system)
            .with_action_url("https://sandbox.example/pay")
            .build()
            .unwrap();
        assert_eq!(form.action_url(), "https://sandbox.example/pay");
    }
}
