//! User-visible notices.

use alloy::primitives::Address;
use std::fmt;

pub const NO_WALLET: &str = "no wallet available, install a wallet provider";
pub const PURCHASE_SUCCEEDED: &str = "purchase succeeded";
pub const PURCHASE_FAILED: &str = "purchase failed: check your balance or network connection";
pub const MINT_SUCCEEDED: &str = "mint succeeded";
pub const MINT_FAILED: &str = "mint failed: confirm the account has admin permission";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Failure => "failure",
            NoticeLevel::Info => "info",
        }
    }
}

/// One discrete message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}

/// `0x1234...abcd` form of an address for display.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_short_address() {
        let addr = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(short_address(&addr), "0xf39F...2266");
    }

    #[test]
    fn test_display() {
        assert_eq!(Notice::success(PURCHASE_SUCCEEDED).to_string(), "[success] purchase succeeded");
        assert_eq!(Notice::failure("x").level, NoticeLevel::Failure);
    }
}
