use autotrader_error::AutotraderError;
use clap::Parser;
use cli::{listen_for_interrupts, spawn_event_printer, Args, FORCED_EXIT_CODE};
use dotenv::dotenv;
use env_logger::Env;
use exchanges::bittrex::BittrexExchange;
use log::info;
use std::process::{exit, ExitCode};
use tokio::{
    signal::ctrl_c,
    spawn,
    sync::{mpsc::unbounded_channel, watch},
};
use trader_core::trader::Trader;

async fn run(args: Args) -> Result<(), AutotraderError> {
    let config = args.into_raw_settings()?.validate()?;
    let exchange = BittrexExchange::new(config.exchange_config)?;
    info!(
        "Connected to {} at {}",
        exchange.name,
        exchange.get_base_url()
    );

    let (shutdown_emitter, shutdown_listener) = watch::channel(false);
    spawn(async move {
        if listen_for_interrupts(ctrl_c, shutdown_emitter).await {
            eprintln!("autotrader: interrupted twice, exiting without waiting");
            exit(FORCED_EXIT_CODE);
        }
    });

    let (event_emitter, event_listener) = unbounded_channel();
    let printer = spawn_event_printer(event_listener);

    let mut trader = Trader::new(
        exchange,
        config.trading_settings,
        shutdown_listener,
        Some(event_emitter),
    );
    let result = trader.run().await;

    drop(trader);
    let _ = printer.await;
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) if !error.use_stderr() => error.exit(),
        Err(error) => {
            let _ = error.print();
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("autotrader: {}", error);
            ExitCode::FAILURE
        }
    }
}
