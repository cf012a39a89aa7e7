//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Contract address must parse and must not be the zero address
//! - Provider URL must parse when set; timeouts and chain ID must be non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use alloy::primitives::Address;
use std::fmt;

use crate::config::schema::ClientConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic constraint and report all failures.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.contract.address.trim().parse::<Address>() {
        Ok(address) if address == Address::ZERO => {
            errors.push(ValidationError::new("contract.address", "must not be the zero address"));
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::new(
                "contract.address",
                format!("'{}' is not an address: {}", config.contract.address, e),
            ));
        }
    }

    if let Some(path) = &config.contract.artifact_path {
        if path.trim().is_empty() {
            errors.push(ValidationError::new("contract.artifact_path", "must not be empty"));
        }
    }

    let rpc_url = config.provider.rpc_url.trim();
    if !rpc_url.is_empty() {
        if let Err(e) = rpc_url.parse::<url::Url>() {
            errors.push(ValidationError::new(
                "provider.rpc_url",
                format!("'{}' is not a URL: {}", rpc_url, e),
            ));
        }
    }

    if config.provider.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("provider.rpc_timeout_secs", "must be greater than zero"));
    }

    if config.provider.chain_id == 0 {
        errors.push(ValidationError::new("provider.chain_id", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.contract.address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_contract_address() {
        let errors = validate_config(&ClientConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "contract.address");
    }

    #[test]
    fn test_zero_contract_address() {
        let mut config = valid_config();
        config.contract.address = Address::ZERO.to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].message.contains("zero address"));
    }

    #[test]
    fn test_empty_rpc_url_is_allowed() {
        let mut config = valid_config();
        config.provider.rpc_url = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = valid_config();
        config.contract.address = "not-an-address".to_string();
        config.provider.rpc_url = "::".to_string();
        config.provider.rpc_timeout_secs = 0;
        config.provider.chain_id = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "contract.address",
                "provider.rpc_url",
                "provider.rpc_timeout_secs",
                "provider.chain_id"
            ]
        );
    }
}
