pub mod classify_flow;
pub mod enrich_flow;

pub use classify_flow::classify_documents;
pub use enrich_flow::{EnrichFlow, EnrichStats, EnrichableRow};
