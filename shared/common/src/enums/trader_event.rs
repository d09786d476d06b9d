use crate::structs::{CycleReport, Order};

/// Progress notifications emitted by the trading loop for whoever renders them.
#[derive(Debug, Clone, PartialEq)]
pub enum TraderEvent {
    OrderSubmitted(CycleReport),
    /// The active order was polled and is still open.
    AwaitingFill { uuid: String, polls: u32 },
    OrderClosed(Order),
    /// The loop stopped on request; `open_order` is left live on the exchange.
    Shutdown { open_order: Option<String> },
}
