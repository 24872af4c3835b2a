pub mod order_writer;
pub mod request_reader;

pub use order_writer::{OrderRow, OrderWriter};
pub use request_reader::{CheckoutRequest, RequestReader};
