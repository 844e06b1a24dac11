pub mod api;
pub mod core;
pub mod errors;
pub mod model;
pub mod notify;
pub mod rooms;
pub mod session;
pub mod storage;

mod welcome;

pub use welcome::welcome;
