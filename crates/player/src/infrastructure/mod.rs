pub mod endpoint;
pub mod identity;
pub mod page;
pub mod websocket;
