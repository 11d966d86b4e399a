//! BuildPaymentLinkHandler - Renders the signed payment form for an invoice.

use chrono::{DateTime, Utc};

use crate::adapters::host::{HostParameters, HostParamsError};
use crate::domain::payment::{PaymentForm, PaymentFormBuilder, DEFAULT_FORM_URL};

/// Command to build the payment link of an invoice.
#[derive(Debug, Clone)]
pub struct BuildPaymentLinkCommand {
    pub params: HostParameters,

    /// Transaction date written into the form.
    pub requested_at: DateTime<Utc>,
}

impl BuildPaymentLinkCommand {
    pub fn new(params: HostParameters) -> Self {
        Self {
            params,
            requested_at: Utc::now(),
        }
    }

    pub fn at(mut self, requested_at: DateTime<Utc>) -> Self {
        self.requested_at = requested_at;
        self
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildPaymentLinkResult {
    pub form: PaymentForm,

    /// Rendered form, ready to embed in the invoice page.
    pub html: String,
}

/// Handler for building payment links.
pub struct BuildPaymentLinkHandler {
    form_url: String,
}

impl BuildPaymentLinkHandler {
    pub fn new(form_url: impl Into<String>) -> Self {
        Self {
            form_url: form_url.into(),
        }
    }

    pub fn handle(
        &self,
        cmd: BuildPaymentLinkCommand,
    ) -> Result<BuildPaymentLinkResult, HostParamsError> {
        let params = &cmd.params;

        // 1. Typed contexts from the parameter bag
        let merchant = params.merchant_config().map_err(|e| {
            tracing::error!(error = %e, "Gateway settings are unusable");
            e
        })?;
        let invoice = params.invoice_context()?;
        let customer = params.customer_context();
        let system = params.system_context();

        // 2. Collect and sign
        let form = PaymentFormBuilder::new(&merchant, &invoice, &customer, &system)
            .with_action_url(self.form_url.as_str())
            .at(cmd.requested_at)
            .build()?;

        tracing::info!(
            invoice_id = %invoice.invoice_id,
            amount = invoice.amount.minor_units(),
            currency = %invoice.currency,
            "Payment link generated"
        );

        // 3. Render
        let html = form.render_html();
        Ok(BuildPaymentLinkResult { form, html })
    }
}

impl Default for BuildPaymentLinkHandler {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_URL)
    }
}
