//storage keys shared with the web client
pub const PINNED_ROOMS_KEY: &str = "pinnedRooms";
pub const USER_KEY: &str = "user";
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const TOKEN_KEY: &str = "token";
