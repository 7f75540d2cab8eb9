pub mod handler;
pub mod parse;
pub mod partition;
pub mod worker;

pub use handler::handle_batch;
