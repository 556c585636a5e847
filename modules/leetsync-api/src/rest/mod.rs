pub mod solved;

pub use solved::{api_solved, SolvedRequest};
