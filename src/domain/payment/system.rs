//! Host system context.

/// Host-side URLs and display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemContext {
    pub company_name: String,

    /// Base URL of the host installation.
    pub system_url: String,

    /// Where the customer lands after paying.
    pub return_url: String,

    /// Label of the submit button.
    pub pay_now_label: String,

    /// Gateway module name, used to locate the callback script.
    pub module_name: String,

    pub host_version: String,
}

impl SystemContext {
    /// URL of this module's callback script on the host.
    pub fn callback_url(&self) -> String {
        format!(
            "{}/modules/gateways/callback/{}.php",
            self.system_url.trim_end_matches('/'),
            self.module_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_url_joins_system_url_and_module() {
        let system = SystemContext {
            system_url: "https://billing.example.com/".to_string(),
            module_name: "payzengateway".to_string(),
            ..Default::default()
        };
        assert_eq!(
            system.callback_url(),
            "https://billing.example.com/modules/gateways/callback/payzengateway.php"
        );
    }
}
