//! Build mode for production/development pipelines.

use std::fmt;
use std::str::FromStr;

use super::Environment;

/// Environment variable selecting the build mode.
pub const MODE_VAR: &str = "NODE_ENV";

/// Build mode configuration.
///
/// Every mode-sensitive switch in the descriptor reads one of these flags,
/// so the mode table lives here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether to emit inline source maps and ask style steps for them.
    pub source_maps: bool,

    /// Whether the image optimization step runs (otherwise pass-through).
    pub optimize_images: bool,
}

impl BuildMode {
    /// Production mode: optimized output without debug metadata.
    pub const PRODUCTION: Self = Self {
        source_maps: false,
        optimize_images: true,
    };

    /// Development mode: source maps, no image optimization.
    pub const DEVELOPMENT: Self = Self {
        source_maps: true,
        optimize_images: false,
    };

    /// Select the mode from `NODE_ENV`.
    ///
    /// Only the exact value `production` selects production; anything else,
    /// including an absent variable, is development.
    pub fn from_env(env: &Environment) -> Self {
        match env.var(MODE_VAR) {
            Some("production") => Self::PRODUCTION,
            _ => Self::DEVELOPMENT,
        }
    }

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        self.source_maps
    }

    pub const fn name(&self) -> &'static str {
        if self.is_dev() { "development" } else { "production" }
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::DEVELOPMENT
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Self::DEVELOPMENT),
            "production" | "prod" => Ok(Self::PRODUCTION),
            _ => Err(format!("invalid mode `{s}` (expected development or production)")),
        }
    }
}
