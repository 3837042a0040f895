use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostics::CompileError;

/// What a zero divisor produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionByZero {
    /// Log a warning and return `INF`, `-INF` or `NAN`.
    #[default]
    Sentinel,
    /// Fail the operation with `OperatorError::DivisionByZero`.
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArithmeticConfig {
    pub division_by_zero: DivisionByZero,
}

/// Evaluation settings, read from a `lyra.toml`-style file:
///
/// ```toml
/// [arithmetic]
/// division_by_zero = "error"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub arithmetic: ArithmeticConfig,
}

impl RuntimeConfig {
    /// Zero divisors are hard errors.
    pub fn strict() -> Self {
        Self { arithmetic: ArithmeticConfig { division_by_zero: DivisionByZero::Error } }
    }

    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CompileError::config(format!("failed to read {}: {e}", path.display()), path.to_path_buf()))?;
        let config = Self::parse(&content, path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded runtime config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CompileError> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, CompileError> {
        toml::from_str(content).map_err(|e| CompileError::config(format!("invalid config: {e}"), PathBuf::from(path)))
    }
}
