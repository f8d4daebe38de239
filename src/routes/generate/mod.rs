pub mod handler;
pub mod model;

pub use handler::generate;
