//! Ingestion pipeline: extraction, aggregation, and run orchestration.
//!
//! Raw shopping results flow one way: the extractor narrows loosely-typed
//! listings into validated offers, the aggregator merges offers sharing an
//! external product identifier into grouped products, and the pipeline
//! replaces the persisted collection with the new snapshot.

mod aggregate;
mod extract;
mod pipeline;

pub use aggregate::aggregate;
pub use extract::{extract_offer, ProductSeed};
pub use pipeline::{run_ingest, PipelineError, RunSummary};
