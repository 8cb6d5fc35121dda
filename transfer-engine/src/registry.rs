//! Client registry
//!
//! A small fixed directory built once from configuration. Lookups never
//! fabricate a client: an unknown id is `ClientNotFound`, distinct from a
//! client whose balance is zero.

use crate::{types::Client, Error, Result};
use ledger_core::CurrencyCode;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Directory of registered clients
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Client>,
}

impl ClientRegistry {
    /// Build from clients, rejecting duplicate ids and negative amounts
    pub fn from_clients(clients: impl IntoIterator<Item = Client>) -> Result<Self> {
        let mut map = HashMap::new();

        for client in clients {
            if client.id.is_empty() {
                return Err(Error::Config("client id must not be empty".to_string()));
            }
            if client.balance < Decimal::ZERO || client.average_transaction_value < Decimal::ZERO {
                return Err(Error::Config(format!(
                    "client {} has a negative balance or average",
                    client.id
                )));
            }
            if map.contains_key(&client.id) {
                return Err(Error::Config(format!("duplicate client id: {}", client.id)));
            }
            map.insert(client.id.clone(), client);
        }

        tracing::info!("Client registry loaded with {} clients", map.len());
        Ok(Self { clients: map })
    }

    /// Sample directory used by the demo configuration
    pub fn demo_clients() -> Vec<Client> {
        vec![
            Client {
                id: "C001".to_string(),
                full_name: "Lucia Fernandez".to_string(),
                balance: Decimal::from(1000),
                average_transaction_value: Decimal::from(200),
                home_currency: CurrencyCode::EUR,
            },
            Client {
                id: "C002".to_string(),
                full_name: "Daniel Ortiz".to_string(),
                balance: Decimal::from(1000),
                average_transaction_value: Decimal::from(200),
                home_currency: CurrencyCode::USD,
            },
            Client {
                id: "C003".to_string(),
                full_name: "Camila Rojas".to_string(),
                balance: Decimal::from(4_000_000),
                average_transaction_value: Decimal::from(800_000),
                home_currency: CurrencyCode::COP,
            },
        ]
    }

    /// Look up a client
    pub fn lookup(&self, client_id: &str) -> Result<&Client> {
        self.clients
            .get(client_id)
            .ok_or_else(|| Error::ClientNotFound(client_id.to_string()))
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// True when no client is registered
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, balance: i64) -> Client {
        Client {
            id: id.to_string(),
            full_name: format!("Client {}", id),
            balance: Decimal::from(balance),
            average_transaction_value: Decimal::from(100),
            home_currency: CurrencyCode::USD,
        }
    }

    #[test]
    fn test_lookup() {
        let registry = ClientRegistry::from_clients(vec![client("A", 10)]).unwrap();
        assert_eq!(registry.lookup("A").unwrap().balance, Decimal::from(10));
    }

    #[test]
    fn test_unknown_client_is_not_zero_balance() {
        let registry =
            ClientRegistry::from_clients(vec![client("ZERO", 0)]).unwrap();

        assert_eq!(registry.lookup("ZERO").unwrap().balance, Decimal::ZERO);
        assert!(matches!(registry.lookup("MISSING"), Err(Error::ClientNotFound(id)) if id == "MISSING"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = ClientRegistry::from_clients(vec![client("abc", 1)]).unwrap();
        assert!(registry.lookup("ABC").is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ClientRegistry::from_clients(vec![client("A", 1), client("A", 2)]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_negative_balance_rejected() {
        let result = ClientRegistry::from_clients(vec![client("A", -1)]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_demo_clients() {
        let registry = ClientRegistry::from_clients(ClientRegistry::demo_clients()).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("C002").unwrap().home_currency, CurrencyCode::USD);
    }
}
