//! Command execution: one registry call per command, rendered as JSON.

use serde_json::{json, Value};

use carledger_ledger_store::LedgerStore;
use carledger_registry::{starter_catalog, CarRegistry};

use crate::config::Command;
use crate::error::CliError;

pub fn execute(command: &Command, store: &mut dyn LedgerStore) -> Result<Value, CliError> {
    let registry = CarRegistry::new();

    let output = match command {
        Command::Seed => {
            registry.seed(store)?;
            json!({ "seeded": starter_catalog().len() })
        }
        Command::List => serde_json::to_value(registry.list(store)?)?,
        Command::Owner { name } => serde_json::to_value(registry.list_by_owner(store, name)?)?,
        Command::Get { id } => serde_json::to_value(registry.get(store, id)?)?,
        Command::Exists { id } => {
            json!({ "id": id, "exists": registry.exists(store, id)? })
        }
        Command::Create { id, brand, owner } => {
            serde_json::to_value(registry.create(store, id, brand, owner)?)?
        }
        Command::Transfer { id, new_owner } => {
            serde_json::to_value(registry.transfer(store, id, new_owner)?)?
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carledger_json_ledger::InMemoryLedger;
    use carledger_registry::RegistryError;

    fn transfer(id: &str, new_owner: &str) -> Command {
        Command::Transfer {
            id: id.to_string(),
            new_owner: new_owner.to_string(),
        }
    }

    #[test]
    fn seed_then_list() {
        let mut ledger = InMemoryLedger::new();

        assert_eq!(
            execute(&Command::Seed, &mut ledger).unwrap(),
            json!({ "seeded": 2 })
        );
        assert_eq!(
            execute(&Command::List, &mut ledger).unwrap(),
            json!([
                {"id": "12", "brand": "Toyota", "owner": "Juan", "transfersCount": 0},
                {"id": "22", "brand": "Honda", "owner": "Marcos", "transfersCount": 0},
            ])
        );
    }

    #[test]
    fn transfer_renders_updated_car() {
        let mut ledger = InMemoryLedger::new();
        execute(&Command::Seed, &mut ledger).unwrap();

        assert_eq!(
            execute(&transfer("12", "Marcos"), &mut ledger).unwrap(),
            json!({"id": "12", "brand": "Toyota", "owner": "Marcos", "transfersCount": 1})
        );
        assert_eq!(
            execute(
                &Command::Owner {
                    name: "Marcos".to_string()
                },
                &mut ledger
            )
            .unwrap()
            .as_array()
            .map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn exists_reports_presence() {
        let mut ledger = InMemoryLedger::new();

        assert_eq!(
            execute(
                &Command::Exists {
                    id: "12".to_string()
                },
                &mut ledger
            )
            .unwrap(),
            json!({ "id": "12", "exists": false })
        );
    }

    #[test]
    fn registry_errors_pass_through() {
        let mut ledger = InMemoryLedger::new();

        let err = execute(&transfer("12", "Marcos"), &mut ledger).unwrap_err();
        assert!(matches!(
            err,
            CliError::Registry(RegistryError::NotFound { .. })
        ));
        assert_eq!(err.to_string(), "car does not exist ID: 12");
    }
}
