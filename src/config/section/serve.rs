//! `[serve]` section configuration.
//!
//! Settings for the live-reload proxy and hot module replacement. The
//! descriptor only declares them; the executor owns the server process.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! host = "localhost"
//! port = 3000                        # live-reload proxy port
//! proxy = "http://localhost:8080/"   # dev server being proxied
//! hot = true
//! content_base = "./dist"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Development server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    /// Upstream dev server URL.
    pub proxy: String,
    /// Enable hot module replacement.
    pub hot: bool,
    /// Directory served as static content.
    pub content_base: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3000,
            proxy: "http://localhost:8080/".into(),
            hot: true,
            content_base: "./dist".into(),
        }
    }
}

impl ServeConfig {
    pub const HOST: FieldPath = FieldPath::new("serve.host");
    pub const PORT: FieldPath = FieldPath::new("serve.port");
    pub const PROXY: FieldPath = FieldPath::new("serve.proxy");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.host.trim().is_empty() {
            diag.error(Self::HOST, "host must not be empty");
        }

        if self.port == 0 {
            diag.error(Self::PORT, "port must not be 0");
        }

        match url::Url::parse(&self.proxy) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                if url.port_or_known_default() == Some(self.port)
                    && url.host_str() == Some(self.host.as_str())
                {
                    diag.warn(Self::PROXY, "proxy points at the live-reload port itself");
                }
            }
            Ok(url) => diag.error(
                Self::PROXY,
                format!("unsupported scheme `{}`", url.scheme()),
            ),
            Err(e) => diag.error_with_hint(
                Self::PROXY,
                format!("`{}` is not a valid URL: {e}", self.proxy),
                "e.g. http://localhost:8080/",
            ),
        }
    }
}
