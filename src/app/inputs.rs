//! Amount input fields.
//!
//! Requests are built from whatever the field holds at submission time. A
//! field is cleared only after its transaction is confirmed.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct InputFields {
    buy_amount: Mutex<String>,
    mint_amount: Mutex<String>,
}

impl InputFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_buy_amount(&self, value: impl Into<String>) {
        *self.buy_amount.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }

    pub fn buy_amount(&self) -> String {
        self.buy_amount.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear_buy_amount(&self) {
        self.buy_amount.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn set_mint_amount(&self, value: impl Into<String>) {
        *self.mint_amount.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }

    pub fn mint_amount(&self) -> String {
        self.mint_amount.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear_mint_amount(&self) {
        self.mint_amount.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
