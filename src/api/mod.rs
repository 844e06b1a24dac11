mod room_service;

pub use room_service::RoomServiceApi;
