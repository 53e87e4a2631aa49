//! Ingestion pipeline: rank, classify, resolve, commit.
//!
//! The stages are independent of any particular dex. An [`crate::exchange`]
//! backend fetches its raw documents and drives them through
//! [`PoolRanker`] and [`PoolIngestor`].

pub mod classifier;
pub mod ingestor;
pub mod ranker;
pub mod report;
pub mod resolver;

pub use classifier::classify;
pub use ingestor::{ContractFailurePolicy, PoolIngestor};
pub use ranker::{PoolRanker, RankedPoolList, RankingStrategy, VolumeCap};
pub use report::{AssetRegistrationReport, IngestionReport, PoolOutcome};
pub use resolver::{AssetRegistration, AssetResolver, Resolution};
