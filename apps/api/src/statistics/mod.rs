// Window statistics: sum distribution, parity ratio and frequency rankings,
// plus the prose rendering handed to the recommendation collaborator.

pub mod aggregator;
pub mod handlers;
pub mod narrative;

pub use aggregator::{aggregate, StatisticsSummary};
