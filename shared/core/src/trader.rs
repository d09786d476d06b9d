use crate::{
    ledger::OrderLedger,
    pricing::{calculate_limit_price, calculate_order_quantity, get_reference_price},
    statistics::MarketStatistics,
};
use autotrader_error::{assert_or_error, AutotraderError};
use common::{
    enums::{side::Side, trader_event::TraderEvent},
    structs::{CycleReport, Order, TradingSettings},
    traits::exchange::TraderExchange,
};
use log::{debug, info, warn};
use std::future::pending;
use tokio::{
    select,
    sync::{mpsc::UnboundedSender, watch::Receiver},
    time::sleep,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraderState {
    NoActiveOrder,
    AwaitingFill,
}

/// What the loop should do after a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Take the next step right away.
    Continue,
    /// The active order is still open; wait one poll interval first.
    Wait,
}

/// Alternates BUY and SELL limit orders on one market, never holding more
/// than one open order at a time.
pub struct Trader<E: TraderExchange> {
    event_emitter: Option<UnboundedSender<TraderEvent>>,
    exchange: E,
    last_side: Side,
    ledger: OrderLedger,
    polls: u32,
    shutdown_listener: Receiver<bool>,
    state: TraderState,
    trading_settings: TradingSettings,
}

impl<E: TraderExchange> Trader<E> {
    pub fn new(
        exchange: E,
        trading_settings: TradingSettings,
        shutdown_listener: Receiver<bool>,
        event_emitter: Option<UnboundedSender<TraderEvent>>,
    ) -> Self {
        Trader {
            event_emitter,
            exchange,
            // seeded so the first submitted order is a BUY
            last_side: Side::Sell,
            ledger: OrderLedger::new(),
            polls: 0,
            shutdown_listener,
            state: TraderState::NoActiveOrder,
            trading_settings,
        }
    }

    pub fn get_state(&self) -> TraderState {
        self.state
    }

    pub fn get_ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    fn emit(&self, event: TraderEvent) {
        if let Some(emitter) = &self.event_emitter {
            // a closed receiver only means nobody is rendering anymore
            let _ = emitter.send(event);
        }
    }

    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_listener.borrow()
    }

    /// Runs until shutdown is requested (`Ok`) or any step fails (`Err`).
    pub async fn run(&mut self) -> Result<(), AutotraderError> {
        info!(
            "Trading {} with {} shares, spread {}",
            self.trading_settings.market,
            self.trading_settings.shares,
            self.trading_settings.spread
        );

        loop {
            if self.is_shutdown_requested() {
                break;
            }

            match self.step().await? {
                StepOutcome::Continue => continue,
                StepOutcome::Wait => {
                    if !self.wait_poll_interval().await {
                        break;
                    }
                }
            }
        }

        let open_order = match self.state {
            TraderState::AwaitingFill => self.ledger.get_active_order().map(|order| order.uuid.clone()),
            TraderState::NoActiveOrder => None,
        };
        if let Some(uuid) = &open_order {
            warn!("Shutting down with order {} still open on the exchange", uuid);
        } else {
            info!("Shutting down with no open order");
        }
        self.emit(TraderEvent::Shutdown { open_order });
        Ok(())
    }

    /// One transition of the state machine.
    pub async fn step(&mut self) -> Result<StepOutcome, AutotraderError> {
        match self.state {
            TraderState::NoActiveOrder => {
                let side = self.last_side.get_opposite_side();
                self.submit_order(side).await?;
                Ok(StepOutcome::Continue)
            }
            TraderState::AwaitingFill => {
                let uuid = match self.ledger.get_active_order() {
                    Some(order) => order.uuid.clone(),
                    None => {
                        self.state = TraderState::NoActiveOrder;
                        return Ok(StepOutcome::Continue);
                    }
                };

                let order = self.exchange.fetch_order(&uuid).await?;
                if order.is_open {
                    self.polls += 1;
                    debug!("Order {} still open after {} polls", uuid, self.polls);
                    self.emit(TraderEvent::AwaitingFill {
                        uuid,
                        polls: self.polls,
                    });
                    return Ok(StepOutcome::Wait);
                }

                info!(
                    "Order {} closed, {} of {} filled",
                    order.uuid,
                    order.get_filled_quantity(),
                    order.quantity
                );
                self.polls = 0;
                self.state = TraderState::NoActiveOrder;
                self.emit(TraderEvent::OrderClosed(order));
                Ok(StepOutcome::Continue)
            }
        }
    }

    /// Returns `false` when shutdown was requested during the wait.
    async fn wait_poll_interval(&mut self) -> bool {
        let poll_interval = self.trading_settings.get_poll_interval();
        let shutdown_listener = &mut self.shutdown_listener;
        let shutdown = async move {
            if shutdown_listener.wait_for(|stop| *stop).await.is_err() {
                // sender dropped; nothing can request a shutdown anymore
                pending::<()>().await;
            }
        };

        select! {
            _ = sleep(poll_interval) => true,
            _ = shutdown => false,
        }
    }

    /// Prices and places one limit order of `side`, then records the
    /// exchange's view of it in the ledger.
    pub async fn submit_order(&mut self, side: Side) -> Result<CycleReport, AutotraderError> {
        let market = self.trading_settings.market.clone();

        let history = self.exchange.fetch_market_history(&market).await?;
        let statistics = MarketStatistics::compute(&history, side).map_err(|mut error| {
            error.description = format!("{} on {}", error.description, market);
            error
        })?;

        let ticker = self.exchange.fetch_ticker(&market).await?;
        let quantity = calculate_order_quantity(self.trading_settings.shares, &ticker)?;
        let limit_price = calculate_limit_price(side, &ticker, &self.trading_settings.spread);

        info!(
            "Placing {} {} {} @ {} ({})",
            side, quantity, market.base, limit_price, statistics
        );
        let uuid = self
            .exchange
            .open_limit_order(&market, side, quantity, limit_price)
            .await?;

        let order: Order = self.exchange.fetch_order(&uuid).await?;
        assert_or_error!(order.uuid == uuid);
        self.ledger.push(order);
        self.last_side = side;
        self.state = TraderState::AwaitingFill;
        self.polls = 0;

        let report = CycleReport {
            side,
            market,
            statistics,
            reference_price: get_reference_price(side, &ticker),
            limit_price,
            quantity,
            order_uuid: uuid,
        };
        self.emit(TraderEvent::OrderSubmitted(report.clone()));
        Ok(report)
    }
}
