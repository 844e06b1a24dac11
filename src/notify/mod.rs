mod notice;
mod sender;

pub use notice::*;
pub use sender::*;
