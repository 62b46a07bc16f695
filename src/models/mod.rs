mod drink;
mod snapshot;
mod stats;
mod tracker;
mod view;

pub use drink::DrinkEvent;
pub use snapshot::SyncSnapshot;
pub use stats::{daily_stats, DailyStat};
pub use tracker::{start_of_local_day, TrackerState, DEFAULT_DAILY_TARGET};
pub use view::View;
