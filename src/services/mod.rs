pub mod aggregator;
pub mod output;
pub mod sync;

pub use aggregator::{
    aggregate, aggregate_detailed, build_game, Aggregation, AggregationOptions, SkippedEvent,
};
pub use output::{render_document, write_document};
pub use sync::{run_sync, SyncReport};
