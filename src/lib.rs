//! # dex-registry-scraper
//!
//! Ingests liquidity-pool metadata published by decentralized exchanges into
//! a network's canonical registries of assets, pools and contracts.
//!
//! Each exchange backend fetches its raw pool documents, ranks them, and
//! drives every pool through classification and asset resolution. Pools
//! whose assets are all known are committed; the rest are parked in the
//! pool registry's pending bucket until their assets are onboarded.
//!
//! ## Architecture
//!
//! ```text
//! Binary (main.rs)
//!     │
//!     ├── Exchange backends (exchange/)
//!     │       └── JsonSource (source/): HTTP or canned documents
//!     │
//!     ├── Pipeline (pipeline/)
//!     │       PoolRanker → classify → AssetResolver → PoolIngestor
//!     │
//!     └── NetworkContext (registry/)
//!             AssetRegistry, PoolRegistry, ContractRegistry
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod pipeline;
pub mod registry;
pub mod source;
