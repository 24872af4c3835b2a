use crate::domain::order::{Order, PaymentFailure};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One outcome row per batch request.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OrderRow {
    pub status: String,
    pub order_id: String,
    pub plan: String,
    pub method: String,
    pub total: String,
    pub discount: String,
    pub coupon: String,
    pub message: String,
}

impl OrderRow {
    pub fn confirmed(order: &Order) -> Self {
        Self {
            status: "confirmed".to_string(),
            order_id: order.order_id.clone(),
            plan: order.plan.id.to_string(),
            method: order.payment.method_label().to_string(),
            total: format!("{:.2}", order.total),
            discount: format!("{:.2}", order.discount),
            coupon: order.coupon.clone().unwrap_or_default(),
            message: String::new(),
        }
    }

    pub fn failed(plan: &str, failure: &PaymentFailure) -> Self {
        Self {
            status: "failed".to_string(),
            order_id: failure.reference.clone(),
            plan: plan.to_string(),
            method: String::new(),
            total: String::new(),
            discount: String::new(),
            coupon: String::new(),
            message: failure.message.clone(),
        }
    }

    /// A row that never reached payment: unknown plan or billing
    /// validation failure.
    pub fn rejected(plan: &str, message: impl Into<String>) -> Self {
        Self {
            status: "rejected".to_string(),
            order_id: String::new(),
            plan: plan.to_string(),
            method: String::new(),
            total: String::new(),
            discount: String::new(),
            coupon: String::new(),
            message: message.into(),
        }
    }
}

/// Writes outcome rows as CSV to any `Write` sink (typically stdout).
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_row(&mut self, row: &OrderRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
