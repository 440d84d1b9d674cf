pub mod batch;
pub mod candidates;
pub mod compaction;
pub mod lanefill_opt;
pub mod monitor;
pub mod score;
pub mod search;
pub mod sequence;
