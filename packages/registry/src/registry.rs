//! The car registry service.

use bytes::Bytes;

use carledger_ledger_store::{LedgerStore, ScopedCursor};

use crate::car::Car;
use crate::eligibility::check_transfer;
use crate::error::RegistryError;

/// The cars installed by [`CarRegistry::seed`].
pub fn starter_catalog() -> Vec<Car> {
    vec![
        Car::new("12", "Toyota", "Juan"),
        Car::new("22", "Honda", "Marcos"),
    ]
}

/// Registry operations over a ledger store.
///
/// The registry holds no state of its own. Every operation takes the store
/// it works against and re-reads whatever it needs, so a single registry
/// value can be shared freely and each call sees the ledger as it is now.
///
/// Read-modify-write operations (`transfer`) are not atomic on their own;
/// a ledger that allows concurrent writers must serialize calls per key.
///
/// # Example
///
/// ```rust
/// use carledger_registry::{CarRegistry, RegistryError};
/// use carledger_json_ledger::InMemoryLedger;
///
/// let registry = CarRegistry::new();
/// let mut ledger = InMemoryLedger::new();
///
/// registry.create(&mut ledger, "7", "Fiat", "Ana").unwrap();
/// let car = registry.transfer(&mut ledger, "7", "Luis").unwrap();
/// assert_eq!(car.transfers_count, 1);
///
/// let err = registry.transfer(&mut ledger, "7", "Luis").unwrap_err();
/// assert!(matches!(err, RegistryError::SameOwner { .. }));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CarRegistry;

impl CarRegistry {
    pub fn new() -> Self {
        CarRegistry
    }

    /// Install the starter catalog.
    ///
    /// Stops at the first failed write. Cars written before the failure stay
    /// written.
    pub fn seed<S: LedgerStore + ?Sized>(&self, store: &mut S) -> Result<(), RegistryError> {
        let catalog = starter_catalog();
        for car in &catalog {
            Self::put_car(store, &car.id, car)?;
        }
        tracing::info!(cars = catalog.len(), "seeded ledger with starter catalog");
        Ok(())
    }

    /// Every car in the ledger, in ledger key order.
    ///
    /// The whole ledger is scanned. If any entry fails to decode the call
    /// fails as a whole; no partial listing is returned.
    pub fn list<S: LedgerStore + ?Sized>(&self, store: &mut S) -> Result<Vec<Car>, RegistryError> {
        let cursor = store.scan_all().map_err(Self::scan_failed)?;
        let mut cursor = ScopedCursor::new(cursor);

        let mut cars = Vec::new();
        for entry in cursor.by_ref() {
            let entry = entry.map_err(Self::scan_failed)?;
            cars.push(Self::decode(&entry.key, &entry.value)?);
        }
        cursor.finish().map_err(Self::scan_failed)?;

        tracing::debug!(cars = cars.len(), "listed cars");
        Ok(cars)
    }

    /// Cars whose owner is exactly `owner` (case-sensitive).
    pub fn list_by_owner<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        owner: &str,
    ) -> Result<Vec<Car>, RegistryError> {
        let cars = self.list(store)?;
        Ok(cars.into_iter().filter(|car| car.owner == owner).collect())
    }

    /// The car stored under `id`.
    pub fn get<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
    ) -> Result<Car, RegistryError> {
        let bytes = store
            .get(id)
            .map_err(|source| Self::read_failed(id, source))?
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })?;
        Self::decode(id, &bytes)
    }

    /// Whether anything is stored under `id`. The value is not decoded.
    pub fn exists<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
    ) -> Result<bool, RegistryError> {
        let value = store
            .get(id)
            .map_err(|source| Self::read_failed(id, source))?;
        Ok(value.is_some())
    }

    /// Register a new car with no transfers.
    ///
    /// An occupied `id` is reported before blank fields are, matching the
    /// order the checks run in.
    pub fn create<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
        brand: &str,
        owner: &str,
    ) -> Result<Car, RegistryError> {
        if self.exists(store, id)? {
            return Err(RegistryError::AlreadyExists { id: id.to_string() });
        }

        if [id, brand, owner].iter().any(|field| field.trim().is_empty()) {
            return Err(RegistryError::Validation {
                message: "All fields are required".to_string(),
            });
        }

        let car = Car::new(id, brand, owner);
        Self::put_car(store, id, &car)?;

        tracing::info!(id, brand, owner, "car created");
        Ok(car)
    }

    /// Hand the car stored under `id` to `new_owner`.
    ///
    /// Returns the updated car. Refused transfers leave the ledger untouched.
    pub fn transfer<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
        new_owner: &str,
    ) -> Result<Car, RegistryError> {
        let mut car = self.get(store, id)?;

        check_transfer(Some(&car), new_owner)
            .map_err(|refusal| RegistryError::refused(id, refusal))?;

        let previous_owner = std::mem::replace(&mut car.owner, new_owner.to_string());
        car.transfers_count += 1;
        Self::put_car(store, id, &car)?;

        tracing::info!(
            id,
            from = %previous_owner,
            to = new_owner,
            transfers = car.transfers_count,
            "car transferred"
        );
        Ok(car)
    }

    fn put_car<S: LedgerStore + ?Sized>(
        store: &mut S,
        key: &str,
        car: &Car,
    ) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec(car).map_err(|source| RegistryError::Encode {
            id: car.id.clone(),
            source,
        })?;
        store
            .put(key, Bytes::from(bytes))
            .map_err(|source| RegistryError::StoreWrite {
                id: key.to_string(),
                source,
            })
    }

    fn decode(key: &str, bytes: &[u8]) -> Result<Car, RegistryError> {
        serde_json::from_slice(bytes).map_err(|source| RegistryError::Decode {
            key: key.to_string(),
            source,
        })
    }

    fn read_failed(id: &str, source: carledger_ledger_store::LedgerError) -> RegistryError {
        RegistryError::StoreRead {
            id: Some(id.to_string()),
            source,
        }
    }

    fn scan_failed(source: carledger_ledger_store::LedgerError) -> RegistryError {
        RegistryError::StoreRead { id: None, source }
    }
}
