//! Inbound frame decoding and dispatch.
//!
//! Every text frame is decoded as JSON and handed to the handler registered
//! for its `type`. Frames that are not JSON are a protocol violation: they are
//! logged and dropped, and the listener keeps going.

use std::collections::HashMap;

use vimera_shared::{LobbyMessage, ServerMessage};

/// Downstream handler for one message `type`.
///
/// Not `Send`: handlers run on the page's event loop.
pub type MessageHandler = Box<dyn FnMut(&LobbyMessage) + 'static>;

#[derive(Debug, thiserror::Error)]
#[error("inbound frame is not valid JSON: {source}")]
pub struct DecodeError {
    #[from]
    source: serde_json::Error,
}

/// What the listener did with one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Handed to the handler for its `type` (or the fallback)
    Dispatched,
    /// Valid JSON but no handler registered
    Unhandled,
    /// Not JSON; dropped
    Discarded,
}

/// Handlers keyed by message `type`, with an optional fallback.
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<String, MessageHandler>,
    fallback: Option<MessageHandler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `message_type`, replacing any previous one.
    pub fn on(
        mut self,
        message_type: impl Into<String>,
        handler: impl FnMut(&LobbyMessage) + 'static,
    ) -> Self {
        self.handlers.insert(message_type.into(), Box::new(handler));
        self
    }

    /// Handler for messages whose `type` is missing or unregistered.
    pub fn fallback(mut self, handler: impl FnMut(&LobbyMessage) + 'static) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns true if some handler received the message.
    pub fn dispatch(&mut self, message: &LobbyMessage) -> bool {
        let handler = message
            .message_type()
            .and_then(|t| self.handlers.get_mut(t))
            .or(self.fallback.as_mut());

        match handler {
            Some(handler) => {
                handler(message);
                true
            }
            None => false,
        }
    }
}

pub struct MessageListener {
    handlers: HandlerTable,
}

impl MessageListener {
    pub fn new(handlers: HandlerTable) -> Self {
        Self { handlers }
    }

    pub fn decode(text: &str) -> Result<LobbyMessage, DecodeError> {
        Ok(LobbyMessage::parse(text)?)
    }

    /// Handle one inbound text frame. Never fails; never writes to the connection.
    pub fn on_text(&mut self, text: &str) -> ListenOutcome {
        let message = match Self::decode(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(frame = %text, "Discarding inbound frame: {}", e);
                return ListenOutcome::Discarded;
            }
        };

        tracing::debug!(message_type = ?message.message_type(), "received <<< {}", text);

        if self.handlers.dispatch(&message) {
            ListenOutcome::Dispatched
        } else {
            tracing::debug!(
                message_type = ?message.message_type(),
                "No handler registered for message"
            );
            ListenOutcome::Unhandled
        }
    }
}

/// Handlers that log responses, errors and notifications.
///
/// The binary's default table, until per-game rendering code registers its own.
pub fn logging_handlers() -> HandlerTable {
    HandlerTable::new()
        .on("response", |message| match message.to_server_message() {
            ServerMessage::Response { id, result } => {
                tracing::info!(id = ?id, %result, "Lobby response");
            }
            ServerMessage::Error { id, error } => {
                tracing::warn!(
                    id = ?id,
                    code = error.code.code(),
                    data = ?error.data,
                    "Lobby error: {} ({})",
                    error.message,
                    error.code
                );
            }
            _ => tracing::warn!("Malformed response message: {}", message.as_value()),
        })
        .on("notification", |message| {
            if let ServerMessage::Notification { scope, event, data } = message.to_server_message()
            {
                tracing::info!(scope = %scope, event = %event, %data, "Lobby notification");
            } else {
                tracing::warn!("Malformed notification message: {}", message.as_value());
            }
        })
        .fallback(|message| {
            tracing::debug!(message_type = ?message.message_type(), "Unhandled lobby message");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_table() -> (HandlerTable, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let responses = Rc::clone(&seen);
        let notifications = Rc::clone(&seen);
        let table = HandlerTable::new()
            .on("response", move |_| responses.borrow_mut().push("response".into()))
            .on("notification", move |_| {
                notifications.borrow_mut().push("notification".into())
            });
        (table, seen)
    }

    #[test]
    fn test_dispatch_by_type() {
        let (table, seen) = recording_table();
        let mut listener = MessageListener::new(table);

        assert_eq!(
            listener.on_text(r#"{"type": "notification", "scope": "match", "event": "start"}"#),
            ListenOutcome::Dispatched
        );
        assert_eq!(
            listener.on_text(r#"{"type": "response", "id": "x", "result": {}}"#),
            ListenOutcome::Dispatched
        );
        assert_eq!(*seen.borrow(), vec!["notification", "response"]);
    }

    #[test]
    fn test_malformed_frame_is_discarded() {
        let (table, seen) = recording_table();
        let mut listener = MessageListener::new(table);

        assert_eq!(listener.on_text("not-json"), ListenOutcome::Discarded);
        assert!(seen.borrow().is_empty());

        // the listener keeps working afterwards
        assert_eq!(
            listener.on_text(r#"{"type": "response", "result": {}}"#),
            ListenOutcome::Dispatched
        );
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unregistered_type_without_fallback() {
        let (table, seen) = recording_table();
        let mut listener = MessageListener::new(table);

        assert_eq!(listener.on_text(r#"{"type": "alert"}"#), ListenOutcome::Unhandled);
        assert_eq!(listener.on_text("[1, 2]"), ListenOutcome::Unhandled);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_fallback_receives_unregistered_types() {
        let (table, _seen) = recording_table();
        let fallback_count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fallback_count);
        let table = table.fallback(move |_| *counter.borrow_mut() += 1);
        let mut listener = MessageListener::new(table);

        assert_eq!(listener.on_text(r#"{"type": "alert"}"#), ListenOutcome::Dispatched);
        assert_eq!(listener.on_text(r#""just a string""#), ListenOutcome::Dispatched);
        assert_eq!(*fallback_count.borrow(), 2);
    }

    #[test]
    fn test_decode_error() {
        assert!(MessageListener::decode("{").is_err());
        assert!(MessageListener::decode("null").is_ok());
    }

    #[test]
    fn test_logging_handlers_accept_server_shapes() {
        let table = logging_handlers();
        assert_eq!(table.len(), 2);
        let mut listener = MessageListener::new(table);

        for frame in [
            r#"{"type": "response", "id": "c", "result": {"games": []}}"#,
            r#"{"type": "response", "id": "c", "error": {"code": -40100, "message": "Unknown game"}}"#,
            r#"{"type": "notification", "scope": "match", "event": "end", "data": {}}"#,
            r#"{"type": "response"}"#,
            r#"{"kind": "other"}"#,
        ] {
            assert_eq!(listener.on_text(frame), ListenOutcome::Dispatched);
        }
    }
}
