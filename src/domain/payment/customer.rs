//! Paying customer details.

/// Customer details forwarded to the payment page.
///
/// Every field is optional on the host side; missing values are sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerContext {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub phone: String,
}
