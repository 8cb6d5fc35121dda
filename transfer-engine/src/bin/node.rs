//! Transfer Node Binary
//!
//! Reads newline-delimited JSON commands from a file (first argument) or
//! stdin and writes one JSON result per command to stdout:
//!
//! ```text
//! {"op":"create","clientId":"C002","amount":"10","destinationCurrency":"COP","destination":"acme","transactionId":"T1","timestamp":"2024-01-01T00:00:00Z"}
//! {"op":"get","transactionId":"T1"}
//! ```

use anyhow::Context;
use chrono::{DateTime, Utc};
use ledger_core::{open_store, CurrencyCode, LedgerMetrics, MeteredStore};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use transfer_engine::{
    Config, Invocation, Metrics, TransactionProcessor, TransferRecord, TransferRequest,
};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Command {
    Create(CreateCommand),
    Get(GetCommand),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommand {
    client_id: String,
    amount: Decimal,
    destination_currency: CurrencyCode,
    destination: String,
    transaction_id: String,
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetCommand {
    transaction_id: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting DelTran transfer node");

    let config = Config::load().context("loading configuration")?;
    info!(
        "Service: {}, ledger backend: {:?}",
        config.service_name, config.ledger.backend
    );

    let metrics = Arc::new(Metrics::new()?);
    let store = open_store(&config.ledger)?;
    let ledger = MeteredStore::new(store, LedgerMetrics::new(metrics.registry())?);

    let processor = TransactionProcessor::from_config(&config)?.with_metrics(metrics.clone());

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading commands from {}", path);
            let file = std::fs::File::open(&path).with_context(|| format!("opening {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut processed = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Command>(&line) {
            Ok(command) => execute(&processor, &ledger, command),
            Err(e) => {
                warn!("Skipping malformed command on line {}: {}", index + 1, e);
                json!({ "ok": false, "error": "malformed_command", "message": e.to_string() })
            }
        };

        serde_json::to_writer(&mut out, &response)?;
        out.write_all(b"\n")?;
        processed += 1;
    }
    out.flush()?;

    info!("Processed {} commands", processed);

    if std::env::var("TRANSFER_METRICS").map(|v| v == "1").unwrap_or(false) {
        eprint!("{}", metrics.render());
    }

    Ok(())
}

fn execute(
    processor: &TransactionProcessor,
    ledger: &dyn ledger_core::LedgerStore,
    command: Command,
) -> Value {
    match command {
        Command::Create(cmd) => {
            // The node is the caller, so it is the one place allowed to read the clock
            let timestamp = cmd.timestamp.unwrap_or_else(Utc::now);
            let ctx = Invocation::new(ledger, timestamp);
            let request = TransferRequest::new(
                cmd.client_id,
                cmd.amount,
                cmd.destination_currency,
                cmd.destination,
                cmd.transaction_id,
            );
            respond(processor.create_transaction(&ctx, &request))
        }
        Command::Get(cmd) => {
            let ctx = Invocation::new(ledger, Utc::now());
            respond(processor.get_transaction(&ctx, &cmd.transaction_id))
        }
    }
}

fn respond(result: transfer_engine::Result<TransferRecord>) -> Value {
    match result {
        Ok(record) => json!({ "ok": true, "record": record }),
        Err(e) => json!({
            "ok": false,
            "error": e.code(),
            "message": e.to_string(),
            "retryable": e.is_retryable(),
        }),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_output = std::env::var("TRANSFER_LOG_JSON").map(|v| v == "1").unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
