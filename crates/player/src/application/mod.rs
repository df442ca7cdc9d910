//! Application logic: deciding what the client asks the lobby for.

pub mod request_builder;
