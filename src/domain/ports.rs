use crate::domain::order::{Order, PaymentFailure};
use crate::domain::payment::{ChargeRequest, PaymentReceipt, ProviderError};
use async_trait::async_trait;
use std::io;

/// A third-party payment integration. Both providers receive the same
/// derived inputs and resolve to the same two outcomes.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn charge(&self, request: ChargeRequest) -> Result<PaymentReceipt, ProviderError>;
}

pub type PaymentProviderBox = Box<dyn PaymentProvider>;

/// The transient hand-off store: one read-once slot per record kind,
/// passing an `Order` or `PaymentFailure` from the checkout flow to the
/// next-rendered view. Taking a slot empties it.
#[async_trait]
pub trait HandoffStore: Send + Sync {
    async fn put_order(&self, order: Order) -> io::Result<()>;
    async fn take_order(&self) -> io::Result<Option<Order>>;
    async fn put_failure(&self, failure: PaymentFailure) -> io::Result<()>;
    async fn take_failure(&self) -> io::Result<Option<PaymentFailure>>;
}

pub type HandoffStoreBox = Box<dyn HandoffStore>;

/// Whether the backend accepted a lead-form POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Accepted,
    Rejected,
}

/// Best-effort transport for the lead-form stubs.
#[async_trait]
pub trait FormPoster: Send + Sync {
    async fn post(&self, path: &str, body: &serde_json::Value) -> io::Result<PostStatus>;
}

pub type FormPosterBox = Box<dyn FormPoster>;
