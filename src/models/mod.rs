pub mod room;
pub mod weekdays;

pub use room::{CreatedResponse, MessageResponse, Room, RoomPayload, StatusPayload};
