mod local_store;
mod pinned;
mod util;

pub use local_store::*;
pub use pinned::*;
pub use util::*;
