use crate::domain::order::{Order, PaymentFailure};
use crate::domain::ports::HandoffStore;
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory transient hand-off store.
///
/// One slot per record kind; writing overwrites, taking empties. `Clone`
/// shares the underlying slots, so the flow that writes and the view that
/// reads can hold the same store.
#[derive(Default, Clone)]
pub struct InMemoryHandoff {
    order: Arc<RwLock<Option<Order>>>,
    failure: Arc<RwLock<Option<PaymentFailure>>>,
}

impl InMemoryHandoff {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HandoffStore for InMemoryHandoff {
    async fn put_order(&self, order: Order) -> io::Result<()> {
        *self.order.write().await = Some(order);
        Ok(())
    }

    async fn take_order(&self) -> io::Result<Option<Order>> {
        Ok(self.order.write().await.take())
    }

    async fn put_failure(&self, failure: PaymentFailure) -> io::Result<()> {
        *self.failure.write().await = Some(failure);
        Ok(())
    }

    async fn take_failure(&self) -> io::Result<Option<PaymentFailure>> {
        Ok(self.failure.write().await.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::currency::Currency;
    use crate::domain::customer::CustomerInfo;
    use crate::domain::order::order_reference;
    use crate::domain::payment::PaymentReceipt;
    use crate::domain::plan::{Plan, PlanId};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        Order {
            order_id: order_reference(),
            plan: Plan::get(PlanId::Advanced),
            customer: CustomerInfo::default(),
            payment: PaymentReceipt::NoCharge {
                currency: Currency::Usd,
            },
            total: dec!(9.99),
            discount: dec!(0),
            coupon: None,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_take_destroys_the_record() {
        let store = InMemoryHandoff::new();
        store.put_order(sample_order()).await.unwrap();

        assert!(store.take_order().await.unwrap().is_some());
        assert!(store.take_order().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let store = InMemoryHandoff::new();
        store.put_order(sample_order()).await.unwrap();
        store
            .put_failure(PaymentFailure::now("Payment failed"))
            .await
            .unwrap();

        assert!(store.take_failure().await.unwrap().is_some());
        assert!(store.take_order().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_writes_overwrite() {
        let store = InMemoryHandoff::new();
        let first = sample_order();
        let mut second = sample_order();
        second.total = dec!(7.99);

        store.put_order(first).await.unwrap();
        store.put_order(second.clone()).await.unwrap();

        let taken = store.take_order().await.unwrap().unwrap();
        assert_eq!(taken.total, second.total);
    }
}
