pub mod aggregator;
pub mod config;
pub mod dedup;
pub mod history;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use aggregator::Aggregator;
pub use config::Config;
pub use dedup::{latest_per_slug, unique_slugs};
pub use history::{collect_accepted, first_available, PaginatedHistory, MAX_PAGES, PAGE_SIZE};
pub use traits::{GraphQlPager, HistoryProvider, LeetCodeRecent, RecentSource, RestPager, SubmissionPager};
pub use types::*;
