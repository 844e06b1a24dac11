mod room;
mod user;

pub use room::*;
pub use user::*;
