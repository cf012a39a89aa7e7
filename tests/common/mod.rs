//! Shared mocks for integration testing.
//!
//! `MockBackend` stands in for the deployed token contract and counts every
//! call; `MockGateway` stands in for the wallet provider.

#![allow(dead_code)]

use alloy::primitives::{address, utils::parse_ether, Address, TxHash, B256, U256};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use token_client::blockchain::abi::ContractInterface;
use token_client::blockchain::contract::{PendingTransaction, TokenBackend};
use token_client::blockchain::gateway::ProviderGateway;
use token_client::blockchain::types::{CallFailure, ClientError, ClientResult, TxConfirmation};
use token_client::session::SessionManager;

pub const CONTRACT: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Base units for a decimal token amount.
pub fn units(amount: &str) -> U256 {
    parse_ether(amount).unwrap()
}

/// A transaction that confirms (or fails) once its gate opens.
struct MockPending {
    hash: TxHash,
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<TxConfirmation, CallFailure>,
}

#[async_trait]
impl PendingTransaction for MockPending {
    fn tx_hash(&self) -> TxHash {
        self.hash
    }

    async fn confirm(self: Box<Self>) -> Result<TxConfirmation, CallFailure> {
        let MockPending { gate, outcome, .. } = *self;
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        outcome
    }
}

/// In-memory token contract with call counters and programmable failures.
#[derive(Default)]
pub struct MockBackend {
    balance: Mutex<U256>,
    price: Mutex<U256>,
    fail_reads: AtomicBool,
    submit_failure: Mutex<Option<CallFailure>>,
    confirm_failure: Mutex<Option<CallFailure>>,
    read_gate: Mutex<Option<oneshot::Receiver<()>>>,
    confirm_gate: Mutex<Option<oneshot::Receiver<()>>>,

    balance_calls: AtomicUsize,
    price_calls: AtomicUsize,
    buy_values: Mutex<Vec<U256>>,
    mints: Mutex<Vec<(Address, U256)>>,
}

impl MockBackend {
    pub fn new(balance: &str, price: &str) -> Arc<Self> {
        let backend = Self::default();
        *backend.balance.lock().unwrap() = units(balance);
        *backend.price.lock().unwrap() = units(price);
        Arc::new(backend)
    }

    pub fn set_balance(&self, balance: &str) {
        *self.balance.lock().unwrap() = units(balance);
    }

    pub fn set_price(&self, price: &str) {
        *self.price.lock().unwrap() = units(price);
    }

    pub fn set_price_base_units(&self, price: U256) {
        *self.price.lock().unwrap() = price;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Next write fails at submission.
    pub fn fail_next_submit(&self, failure: CallFailure) {
        *self.submit_failure.lock().unwrap() = Some(failure);
    }

    /// Next write is broadcast but fails at confirmation.
    pub fn fail_next_confirmation(&self, failure: CallFailure) {
        *self.confirm_failure.lock().unwrap() = Some(failure);
    }

    /// The next `balanceOf` blocks until the returned sender fires.
    pub fn hold_next_balance_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.read_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// The next write's confirmation blocks until the returned sender fires.
    pub fn hold_next_confirmation(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.confirm_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Each refresh reads the balance exactly once.
    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    pub fn buy_values(&self) -> Vec<U256> {
        self.buy_values.lock().unwrap().clone()
    }

    pub fn mints(&self) -> Vec<(Address, U256)> {
        self.mints.lock().unwrap().clone()
    }

    /// Calls of any kind made against the contract.
    pub fn total_calls(&self) -> usize {
        self.balance_calls() + self.price_calls() + self.buy_values().len() + self.mints().len()
    }

    fn pending(&self, tag: u8) -> Result<Box<dyn PendingTransaction>, CallFailure> {
        if let Some(failure) = self.submit_failure.lock().unwrap().take() {
            return Err(failure);
        }
        let hash = B256::repeat_byte(tag);
        let outcome = match self.confirm_failure.lock().unwrap().take() {
            Some(failure) => Err(failure),
            None => Ok(TxConfirmation {
                tx_hash: hash,
                block_number: Some(1),
            }),
        };
        Ok(Box::new(MockPending {
            hash,
            gate: self.confirm_gate.lock().unwrap().take(),
            outcome,
        }))
    }
}

#[async_trait]
impl TokenBackend for MockBackend {
    async fn balance_of(&self, _owner: Address) -> Result<U256, CallFailure> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.read_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CallFailure::Transport("connection refused".into()));
        }
        Ok(*self.balance.lock().unwrap())
    }

    async fn token_price(&self) -> Result<U256, CallFailure> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CallFailure::Transport("connection refused".into()));
        }
        Ok(*self.price.lock().unwrap())
    }

    async fn buy_tokens(&self, value: U256) -> Result<Box<dyn PendingTransaction>, CallFailure> {
        self.buy_values.lock().unwrap().push(value);
        self.pending(0xb0)
    }

    async fn mint(
        &self,
        to: Address,
        amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, CallFailure> {
        self.mints.lock().unwrap().push((to, amount));
        self.pending(0xa0)
    }
}

/// Wallet provider whose answer to the account request can be changed.
pub struct MockGateway {
    accounts: Mutex<ClientResult<Vec<Address>>>,
    backend: Arc<MockBackend>,
    bound: Mutex<Vec<Address>>,
}

impl MockGateway {
    pub fn new(accounts: Vec<Address>, backend: Arc<MockBackend>) -> Arc<Self> {
        Arc::new(Self {
            accounts: Mutex::new(Ok(accounts)),
            backend,
            bound: Mutex::new(Vec::new()),
        })
    }

    pub fn grant(&self, accounts: Vec<Address>) {
        *self.accounts.lock().unwrap() = Ok(accounts);
    }

    /// The user declines the next account requests.
    pub fn decline(&self) {
        *self.accounts.lock().unwrap() =
            Err(ClientError::UserRejected("account access request declined".into()));
    }

    /// The provider errors out on the next account requests.
    pub fn fail(&self, reason: &str) {
        *self.accounts.lock().unwrap() = Err(ClientError::ProviderFailed(reason.into()));
    }

    /// Accounts a signer was bound for, in order.
    pub fn bound(&self) -> Vec<Address> {
        self.bound.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderGateway for MockGateway {
    async fn request_accounts(&self) -> ClientResult<Vec<Address>> {
        self.accounts.lock().unwrap().clone()
    }

    fn bind_signer(&self, _contract: Address, account: Address) -> ClientResult<Arc<dyn TokenBackend>> {
        self.bound.lock().unwrap().push(account);
        Ok(self.backend.clone())
    }
}

pub fn manager_with(gateway: Option<Arc<MockGateway>>) -> Arc<SessionManager> {
    let gateway = gateway.map(|g| g as Arc<dyn ProviderGateway>);
    Arc::new(SessionManager::new(
        gateway,
        CONTRACT,
        ContractInterface::builtin().unwrap(),
    ))
}

/// Alice's wallet against a contract holding 10 tokens for her at 0.01 each.
pub fn setup() -> (Arc<MockBackend>, Arc<MockGateway>, Arc<SessionManager>) {
    let backend = MockBackend::new("10", "0.01");
    let gateway = MockGateway::new(vec![ALICE], backend.clone());
    let sessions = manager_with(Some(gateway.clone()));
    (backend, gateway, sessions)
}
