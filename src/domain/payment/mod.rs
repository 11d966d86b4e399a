//! Payment domain - hosted payment page request and provider notifications.
//!
//! Typed records replace the host's untyped parameter bag:
//! - `MerchantConfig` - account credentials and gateway settings
//! - `InvoiceContext` - what is being paid
//! - `CustomerContext` - who is paying
//! - `SystemContext` - host URLs and display strings
//!
//! `PaymentFormBuilder` turns them into a signed `PaymentForm`, and
//! `PaymentNotification` verifies the provider's server-to-server callback.

mod amount;
mod currency;
mod customer;
mod errors;
mod fields;
mod form;
mod invoice;
mod merchant;
mod notification;
mod system;

pub use amount::Amount;
pub use currency::Currency;
pub use customer::CustomerContext;
pub use errors::{NotificationError, PaymentFormError};
pub use fields::PaymentFieldSet;
pub use form::{PaymentForm, PaymentFormBuilder, DEFAULT_FORM_URL};
pub use invoice::InvoiceContext;
pub use merchant::{ContextMode, MerchantConfig, PaymentType};
pub use notification::{NotificationOutcome, PaymentNotification};
pub use system::SystemContext;
