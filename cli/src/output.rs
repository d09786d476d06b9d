use common::{
    enums::{side::Side, trader_event::TraderEvent},
    functions::format_price,
    structs::CycleReport,
};
use crossterm::{
    cursor::MoveToColumn,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};
use log::warn;
use std::{
    io::{stdout, Result as IoResult, Write},
    time::{Duration, Instant},
};
use tokio::{select, spawn, sync::mpsc::UnboundedReceiver, task::JoinHandle, time::interval};

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Row label and value pairs for one cycle. For a BUY the ticker bid is
/// what sellers are asking us to beat, hence the `Ask` label, and the
/// computed price is our `Bid`; labels swap for a SELL.
pub fn cycle_rows(report: &CycleReport) -> Vec<(&'static str, String)> {
    let (reference_label, limit_label) = match report.side {
        Side::Buy => ("Ask", "Bid"),
        Side::Sell => ("Bid", "Ask"),
    };

    vec![
        ("Avg", format_price(report.statistics.mean)),
        ("Max", format_price(report.statistics.max)),
        (reference_label, format_price(report.reference_price)),
        (limit_label, format_price(report.limit_price)),
        ("Quantity", format_price(report.quantity)),
    ]
}

/// Renders the two-column cycle table headed by `[SIDE, base currency]`.
pub fn format_cycle_table(report: &CycleReport) -> String {
    let header = (report.side.as_str(), report.market.base.as_str());
    let rows = cycle_rows(report);

    let label_width = rows
        .iter()
        .map(|(label, _)| label.len())
        .chain([header.0.len()])
        .max()
        .unwrap_or_default();
    let value_width = rows
        .iter()
        .map(|(_, value)| value.len())
        .chain([header.1.len()])
        .max()
        .unwrap_or_default();

    let border = format!(
        "+{}+{}+",
        "-".repeat(label_width + 2),
        "-".repeat(value_width + 2)
    );

    let mut lines = vec![
        border.clone(),
        format!(
            "| {:<lw$} | {:<vw$} |",
            header.0,
            header.1,
            lw = label_width,
            vw = value_width
        ),
        border.clone(),
    ];
    for (label, value) in rows {
        lines.push(format!(
            "| {:<lw$} | {:>vw$} |",
            label,
            value,
            lw = label_width,
            vw = value_width
        ));
    }
    lines.push(border);
    lines.join("\n")
}

/// `mm:ss`, or `h:mm:ss` past the hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    let (hours, minutes, seconds) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Single-line spinner redrawn in place while an order stays open.
pub struct WaitingIndicator {
    uuid: String,
    started_at: Instant,
    frame: usize,
    polls: u32,
}

impl WaitingIndicator {
    pub fn new(uuid: String) -> Self {
        Self {
            uuid,
            started_at: Instant::now(),
            frame: 0,
            polls: 0,
        }
    }

    pub fn set_polls(&mut self, polls: u32) {
        self.polls = polls;
    }

    pub fn line(&self, elapsed: Duration) -> String {
        format!(
            "{} Waiting for {} to fill ({}, {} polls)",
            SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()],
            self.uuid,
            format_elapsed(elapsed),
            self.polls
        )
    }

    pub fn draw<W: Write>(&mut self, out: &mut W) -> IoResult<()> {
        let line = self.line(self.started_at.elapsed());
        self.frame = self.frame.wrapping_add(1);
        execute!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )
    }
}

fn clear_line<W: Write>(out: &mut W) -> IoResult<()> {
    execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))
}

fn print_event(indicator: &mut Option<WaitingIndicator>, event: TraderEvent) -> IoResult<bool> {
    let mut out = stdout();
    match event {
        TraderEvent::OrderSubmitted(report) => {
            clear_line(&mut out)?;
            writeln!(out, "{}", format_cycle_table(&report))?;
            *indicator = Some(WaitingIndicator::new(report.order_uuid));
        }
        TraderEvent::AwaitingFill { uuid, polls } => {
            let waiting = indicator.get_or_insert_with(|| WaitingIndicator::new(uuid));
            waiting.set_polls(polls);
            waiting.draw(&mut out)?;
        }
        TraderEvent::OrderClosed(order) => {
            clear_line(&mut out)?;
            writeln!(
                out,
                "{} order {} closed, filled {} of {}",
                order.side,
                order.uuid,
                format_price(order.get_filled_quantity()),
                format_price(order.quantity)
            )?;
            *indicator = None;
        }
        TraderEvent::Shutdown { open_order } => {
            clear_line(&mut out)?;
            match open_order {
                Some(uuid) => writeln!(out, "Stopped; order {} is still open", uuid)?,
                None => writeln!(out, "Stopped")?,
            }
            return Ok(false);
        }
    }
    out.flush()?;
    Ok(true)
}

/// Renders trader events until the channel closes or a shutdown event
/// arrives. The spinner is redrawn every second between events.
pub fn spawn_event_printer(mut events: UnboundedReceiver<TraderEvent>) -> JoinHandle<()> {
    spawn(async move {
        let mut indicator: Option<WaitingIndicator> = None;
        let mut redraw = interval(Duration::from_secs(1));

        loop {
            select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    match print_event(&mut indicator, event) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(error) => warn!("Unable to render trader event: {}", error),
                    }
                }
                _ = redraw.tick(), if indicator.is_some() => {
                    if let Some(waiting) = indicator.as_mut() {
                        if let Err(error) = waiting.draw(&mut stdout()) {
                            warn!("Unable to draw waiting indicator: {}", error);
                        }
                    }
                }
            }
        }

        let _ = clear_line(&mut stdout());
    })
}
