//! Invoice being paid.

use super::amount::Amount;
use super::currency::Currency;
use super::errors::PaymentFormError;

/// Transaction ids are six digits in `000000..=899999`.
const TRANS_ID_MODULUS: u64 = 900_000;

/// The invoice a payment form is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceContext {
    /// Host invoice number.
    pub invoice_id: String,

    pub description: String,

    pub amount: Amount,

    pub currency: Currency,
}

impl InvoiceContext {
    pub fn new(
        invoice_id: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
        currency: Currency,
    ) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            description: description.into(),
            amount,
            currency,
        }
    }

    /// Six digit `vads_trans_id` derived from the invoice number.
    ///
    /// The provider only accepts six digits, so large invoice numbers wrap.
    /// `vads_order_id` carries the full invoice number.
    ///
    /// Invoice numbers congruent modulo 900000 share a transaction id. The
    /// provider rejects a reused id within the same day for a shop.
    pub fn transaction_id(&self) -> Result<String, PaymentFormError> {
        let number: u64 = self
            .invoice_id
            .trim()
            .parse()
            .map_err(|_| PaymentFormError::InvalidInvoiceId(self.invoice_id.clone()))?;

        Ok(format!("{:06}", number % TRANS_ID_MODULUS))
    }
}
