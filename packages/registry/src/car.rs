//! The car record stored in the ledger.

use serde::{Deserialize, Serialize};

/// One registered car, keyed in the ledger by its `id`.
///
/// Serializes as a flat JSON object:
///
/// ```json
/// {"id": "12", "brand": "Toyota", "owner": "Juan", "transfersCount": 0}
/// ```
///
/// This is a plain data shape. Blank fields and counter bounds are enforced by
/// [`CarRegistry`](crate::CarRegistry), not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub brand: String,
    pub owner: String,
    pub transfers_count: u32,
}

impl Car {
    /// A freshly registered car that has never changed hands.
    pub fn new(id: impl Into<String>, brand: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            owner: owner.into(),
            transfers_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_counter() {
        let car = Car {
            id: "12".to_string(),
            brand: "Toyota".to_string(),
            owner: "Juan".to_string(),
            transfers_count: 2,
        };

        assert_eq!(
            serde_json::to_value(&car).unwrap(),
            json!({"id": "12", "brand": "Toyota", "owner": "Juan", "transfersCount": 2})
        );
    }

    #[test]
    fn field_order_is_irrelevant() {
        let car: Car = serde_json::from_str(
            r#"{"transfersCount": 1, "owner": "Marcos", "id": "22", "brand": "Honda"}"#,
        )
        .unwrap();

        assert_eq!(car.id, "22");
        assert_eq!(car.owner, "Marcos");
        assert_eq!(car.transfers_count, 1);
    }

    #[test]
    fn counter_survives_large_values() {
        let car = Car {
            transfers_count: u32::MAX,
            ..Car::new("x", "y", "z")
        };
        let bytes = serde_json::to_vec(&car).unwrap();
        let decoded: Car = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, car);
    }

    #[test]
    fn missing_field_is_rejected() {
        let result: Result<Car, _> =
            serde_json::from_str(r#"{"id": "12", "brand": "Toyota", "owner": "Juan"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn negative_counter_is_rejected() {
        let result: Result<Car, _> = serde_json::from_str(
            r#"{"id": "12", "brand": "Toyota", "owner": "Juan", "transfersCount": -1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_starts_at_zero_transfers() {
        assert_eq!(Car::new("12", "Toyota", "Juan").transfers_count, 0);
    }
}
