//! Domain layer: identifiers, registry entries and raw upstream documents.
//!
//! This module contains the registry-facing model (pool ids, asset names,
//! pool and contract entries), the raw documents published by the dex
//! backend, and the naming convention for derived registry keys.

pub mod asset;
pub mod contract;
pub mod naming;
pub mod pool_entry;
pub mod pool_id;
pub mod raw;

pub use asset::{AssetEntry, AssetName};
pub use contract::ContractEntry;
pub use pool_entry::{PoolAssets, PoolEntry, PoolType};
pub use pool_id::PoolId;
pub use raw::{RawPool, RawPoolList, RawVolumeEntry, RawVolumeList};
