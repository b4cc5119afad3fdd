use serde::Deserialize;

const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
const LIVE_BASE_URL: &str = "https://api-m.paypal.com";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub access_token: String,
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Config {
    pub fn new(access_token: String, sandbox: bool) -> Self {
        Self {
            access_token,
            sandbox,
            request_timeout: default_request_timeout(),
        }
    }

    pub fn base_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_BASE_URL
        } else {
            LIVE_BASE_URL
        }
    }
}

fn default_sandbox() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_flag_selects_base_url() {
        let sandbox = Config::new("token".to_string(), true);
        assert_eq!(sandbox.base_url(), "https://api-m.sandbox.paypal.com");

        let live = Config::new("token".to_string(), false);
        assert_eq!(live.base_url(), "https://api-m.paypal.com");
    }
}
