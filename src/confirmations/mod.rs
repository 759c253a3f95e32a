mod fetch;
mod filter;
mod model;

pub use fetch::{fetch_confirmations, parse_confirmations};
pub use filter::{filter_relevant, RELEVANT_PLAN_TYPES};
pub use model::Confirmation;
