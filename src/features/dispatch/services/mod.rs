pub mod candidate_filter;
pub mod distance;
pub mod ranking;
mod resolver;

pub use resolver::DispatchResolver;
