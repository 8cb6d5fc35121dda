//! Transfer pipeline
//!
//! Validates a request against the client directory, the sanctions list and
//! the anomaly policy, converts the amount into the destination currency and
//! commits the record under its transaction id. Any rejection happens before
//! the ledger is written; nothing is ever partially committed.

use crate::{
    config::Config,
    context::TransactionContext,
    metrics::Metrics,
    registry::ClientRegistry,
    types::TransferRequest,
    Error, Result,
};
use compliance_service::SanctionsList;
use ledger_core::{codec, TransferRecord};
use risk_engine::{AnomalyPolicy, CurrencyConverter, RateTable};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Transfer processor
///
/// Holds only immutable reference data, so one instance can serve any
/// number of concurrent invocations.
#[derive(Debug, Clone)]
pub struct TransactionProcessor {
    /// Client directory
    registry: ClientRegistry,

    /// Blocked destinations
    sanctions: SanctionsList,

    /// Rate table
    converter: CurrencyConverter,

    /// Amount heuristic
    anomaly: AnomalyPolicy,

    /// Optional metrics sink
    metrics: Option<Arc<Metrics>>,
}

impl TransactionProcessor {
    /// Create processor
    pub fn new(
        registry: ClientRegistry,
        sanctions: SanctionsList,
        converter: CurrencyConverter,
        anomaly: AnomalyPolicy,
    ) -> Self {
        Self {
            registry,
            sanctions,
            converter,
            anomaly,
            metrics: None,
        }
    }

    /// Build every collaborator from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = ClientRegistry::from_clients(config.clients.iter().cloned())?;

        let sanctions = match &config.sanctions_csv {
            Some(path) => SanctionsList::from_csv_path(path)?,
            None => SanctionsList::from_entries(config.sanctions.iter().cloned())?,
        };

        let table = RateTable::from_entries(config.rates.iter().cloned())?;
        let anomaly = AnomalyPolicy::new(config.anomaly_multiplier)?;

        info!(
            "Transfer processor ready: {} clients, {} sanctioned identifiers, {} rate pairs, anomaly multiplier {}",
            registry.len(),
            sanctions.len(),
            table.len(),
            anomaly.multiplier()
        );

        Ok(Self::new(
            registry,
            sanctions,
            CurrencyConverter::new(table),
            anomaly,
        ))
    }

    /// Attach metrics
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate, convert and commit a transfer
    ///
    /// Calling twice with the same `transaction_id` always fails the second
    /// time with `DuplicateTransactionId`, whatever the other arguments.
    pub fn create_transaction<C>(&self, ctx: &C, request: &TransferRequest) -> Result<TransferRecord>
    where
        C: TransactionContext + ?Sized,
    {
        let start = Instant::now();
        let result = self.run_pipeline(ctx, request);

        match &result {
            Ok(record) => {
                info!(
                    transaction_id = %record.transaction_id,
                    client_id = %record.client_id,
                    amount = %record.amount,
                    currency = %record.destination_currency,
                    "Transfer committed"
                );
            }
            Err(e) => {
                warn!(
                    transaction_id = %request.transaction_id,
                    client_id = %request.client_id,
                    reason = e.code(),
                    "Transfer rejected: {}",
                    e
                );
            }
        }

        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(_) => metrics.record_commit(),
                Err(e) => metrics.record_rejection(e.code()),
            }
            metrics.record_duration(start.elapsed().as_secs_f64());
        }

        result
    }

    fn run_pipeline<C>(&self, ctx: &C, request: &TransferRequest) -> Result<TransferRecord>
    where
        C: TransactionContext + ?Sized,
    {
        let ledger = ctx.ledger();

        // Step 0: The id is the ledger key
        if request.transaction_id.is_empty() {
            return Err(Error::InvalidRequest(
                "transaction id must not be empty".to_string(),
            ));
        }

        // Step 1: Idempotency
        if ledger.get(&request.transaction_id).map_err(Error::ledger)?.is_some() {
            return Err(Error::DuplicateTransactionId(request.transaction_id.clone()));
        }
        debug!(transaction_id = %request.transaction_id, "Transaction id is free");

        if request.amount <= Decimal::ZERO {
            return Err(Error::InvalidRequest(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }

        // Step 2: Client
        let client = self.registry.lookup(&request.client_id)?;

        // Step 3: Funds
        if request.amount > client.balance {
            return Err(Error::InsufficientFunds {
                requested: request.amount,
                available: client.balance,
            });
        }

        // Step 4: Sanctions
        if let Some(entry) = self.sanctions.matched_entry(&request.destination) {
            debug!(
                destination = %request.destination,
                list = entry.list.as_deref().unwrap_or("-"),
                "Sanctions match"
            );
            return Err(Error::SanctionedDestination(request.destination.clone()));
        }

        // Step 5: Anomaly
        self.anomaly
            .check(request.amount, client.average_transaction_value)?;

        // Step 6: Conversion
        let amount = self.converter.convert(
            request.amount,
            client.home_currency,
            request.destination_currency,
        )?;

        let record = TransferRecord {
            client_id: client.id.clone(),
            amount,
            destination: request.destination.clone(),
            destination_currency: request.destination_currency,
            transaction_id: request.transaction_id.clone(),
            timestamp: ctx.timestamp(),
        };

        // Step 7: Commit
        let bytes = codec::encode(&record).map_err(|e| Error::CorruptRecord {
            transaction_id: record.transaction_id.clone(),
            reason: e.to_string(),
        })?;

        // A concurrent invocation may have committed since step 1
        if !ledger
            .put_if_absent(&record.transaction_id, &bytes)
            .map_err(Error::ledger)?
        {
            return Err(Error::DuplicateTransactionId(record.transaction_id));
        }

        Ok(record)
    }

    /// Read back a committed transfer
    pub fn get_transaction<C>(&self, ctx: &C, transaction_id: &str) -> Result<TransferRecord>
    where
        C: TransactionContext + ?Sized,
    {
        let bytes = ctx
            .ledger()
            .get(transaction_id)
            .map_err(Error::ledger)?
            .ok_or_else(|| Error::TransactionNotFound(transaction_id.to_string()))?;
        debug!(transaction_id, bytes = bytes.len(), "Ledger read");

        let record = codec::decode(&bytes).map_err(|e| Error::CorruptRecord {
            transaction_id: transaction_id.to_string(),
            reason: e.to_string(),
        })?;

        if record.transaction_id != transaction_id {
            return Err(Error::CorruptRecord {
                transaction_id: transaction_id.to_string(),
                reason: format!("record is stored under a foreign id {}", record.transaction_id),
            });
        }

        Ok(record)
    }
}
