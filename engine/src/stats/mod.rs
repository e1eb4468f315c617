mod stats_store;

pub use stats_store::{STATS_KEY, Stats, StatsStore};
