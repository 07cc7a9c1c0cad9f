//! Session history: bounded store plus trail/trend views

pub mod store;
pub mod trend;

pub use store::{
    HistoryIter, HistoryRecord, HistoryStats, HistoryStore, HistoryWindow, QueryOrder,
    DEFAULT_HISTORY_CAPACITY,
};
pub use trend::{trail, trend_series, TrendPoint};
