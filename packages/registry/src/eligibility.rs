//! Transfer eligibility: whether a car may change hands.
//!
//! Pure decision, no I/O. Checks run in a fixed order and the first failure
//! wins:
//!
//! 1. the car must exist
//! 2. the new owner must differ from the current one
//! 3. the car must have changed hands fewer than [`MAX_TRANSFERS`] times

use crate::car::Car;

/// How many times a car may change hands. Once reached, the car is frozen.
pub const MAX_TRANSFERS: u32 = 3;

/// Why a transfer was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferRefusal {
    NoSuchAsset,
    SameOwner { owner: String },
    LimitExceeded { transfers: u32, limit: u32 },
}

/// Decide whether `car` may be transferred to `new_owner`.
pub fn check_transfer(car: Option<&Car>, new_owner: &str) -> Result<(), TransferRefusal> {
    let Some(car) = car else {
        return Err(TransferRefusal::NoSuchAsset);
    };

    if car.owner == new_owner {
        return Err(TransferRefusal::SameOwner {
            owner: car.owner.clone(),
        });
    }

    if car.transfers_count >= MAX_TRANSFERS {
        return Err(TransferRefusal::LimitExceeded {
            transfers: car.transfers_count,
            limit: MAX_TRANSFERS,
        });
    }

    Ok(())
}

pub fn is_eligible(car: Option<&Car>, new_owner: &str) -> bool {
    check_transfer(car, new_owner).is_ok()
}
