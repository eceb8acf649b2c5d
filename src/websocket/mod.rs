pub mod connections;
pub mod handler;
pub mod msg_update_handler;
pub mod sessions;
