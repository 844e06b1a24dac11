mod card;
mod status_poller;

pub use card::*;
pub use status_poller::*;
