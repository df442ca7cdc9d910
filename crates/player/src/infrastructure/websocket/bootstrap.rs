//! Platform-agnostic connection bootstrap.
//!
//! Deliberately free of any runtime / platform dependencies (tokio, web-sys).
//! Platform clients own the actual socket and call `on_open` when the
//! transport reports the connection open.
//!
//! There is no reconnection: if the open signal never fires, nothing is sent.

use vimera_shared::LobbyRequest;

use crate::application::request_builder::{BootstrapStrategy, LobbyRequestBuilder, RequestError};
use crate::infrastructure::identity::IdentityGenerator;
use crate::infrastructure::page::PageLocation;
use crate::ports::outbound::LobbyTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Waiting for the transport's open signal
    Connecting,
    /// Open signal handled; terminal
    Open,
}

/// What handling an open signal did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The bootstrap request was written to the connection
    Sent(LobbyRequest),
    /// The page's intent was ambiguous; nothing was sent
    Skipped,
    /// Already open; a repeated open signal sends nothing
    AlreadyOpen,
}

pub struct ConnectionBootstrap {
    strategy: BootstrapStrategy,
    page: PageLocation,
    state: BootstrapState,
}

impl ConnectionBootstrap {
    pub fn new(strategy: BootstrapStrategy, page: PageLocation) -> Self {
        Self {
            strategy,
            page,
            state: BootstrapState::Connecting,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    pub fn strategy(&self) -> &BootstrapStrategy {
        &self.strategy
    }

    /// Handle the transport's open signal: Connecting → Open, sending at most
    /// one request.
    ///
    /// The transition happens even when the send fails, so a failed request is
    /// never retried on this connection.
    pub fn on_open(
        &mut self,
        transport: &dyn LobbyTransport,
    ) -> Result<BootstrapOutcome, RequestError> {
        if self.state == BootstrapState::Open {
            tracing::debug!("Ignoring repeated open signal");
            return Ok(BootstrapOutcome::AlreadyOpen);
        }
        self.state = BootstrapState::Open;

        let id = IdentityGenerator::for_page(&self.page);
        let intent = self.page.query_intent();

        match LobbyRequestBuilder::build(&self.strategy, &intent, id) {
            Ok(request) => {
                LobbyRequestBuilder::send(transport, &request)?;
                Ok(BootstrapOutcome::Sent(request))
            }
            Err(e @ RequestError::AmbiguousIntent { .. }) => {
                tracing::warn!("{}, not sending a request", e);
                Ok(BootstrapOutcome::Skipped)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::request_builder::MatchDefaults;
    use crate::ports::outbound::MockLobbyTransport;
    use std::sync::{Arc, Mutex};
    use vimera_shared::Operation;

    fn game_bootstrap(href: &str) -> ConnectionBootstrap {
        ConnectionBootstrap::new(
            BootstrapStrategy::LobbyIntent(MatchDefaults::default()),
            PageLocation::parse(href).unwrap(),
        )
    }

    /// Mock that records every frame written.
    fn recording_transport() -> (MockLobbyTransport, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sent_clone = Arc::clone(&sent);
        let mut transport = MockLobbyTransport::new();
        transport.expect_send_text().returning(move |text| {
            sent_clone.lock().unwrap().push(text.to_string());
            Ok(())
        });
        (transport, sent)
    }

    #[test]
    fn test_starts_connecting() {
        let bootstrap = game_bootstrap("http://localhost:8000/");
        assert_eq!(bootstrap.state(), BootstrapState::Connecting);
    }

    #[test]
    fn test_open_sends_exactly_one_request() {
        let mut bootstrap = game_bootstrap("http://localhost:8000/?join=M1");
        let (transport, sent) = recording_transport();

        let outcome = bootstrap.on_open(&transport).unwrap();
        assert_eq!(bootstrap.state(), BootstrapState::Open);
        match outcome {
            BootstrapOutcome::Sent(request) => {
                assert_eq!(request.operation(), Operation::JoinMatch);
                assert!(request.id().as_str().starts_with("localhost-8000-"));
            }
            other => panic!("Expected Sent, got {:?}", other),
        }

        assert_eq!(
            bootstrap.on_open(&transport).unwrap(),
            BootstrapOutcome::AlreadyOpen
        );

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(value["type"], "request");
        assert_eq!(value["params"]["match-id"], "M1");
    }

    #[test]
    fn test_ambiguous_intent_sends_nothing() {
        let mut bootstrap = game_bootstrap("http://localhost:8000/?join=M1&spectate=M2");
        let mut transport = MockLobbyTransport::new();
        transport.expect_send_text().times(0);

        assert_eq!(
            bootstrap.on_open(&transport).unwrap(),
            BootstrapOutcome::Skipped
        );
        assert_eq!(bootstrap.state(), BootstrapState::Open);
    }

    #[test]
    fn test_create_when_no_query() {
        let mut bootstrap = game_bootstrap("http://localhost:8000/");
        let (transport, sent) = recording_transport();

        bootstrap.on_open(&transport).unwrap();

        let sent = sent.lock().unwrap();
        let value: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(value["operation"], "create-match");
        assert_eq!(value["params"]["game"], "p1wins");
        assert_eq!(value["params"]["player-name"], "player1");
    }

    #[test]
    fn test_list_games_strategy() {
        let mut bootstrap = ConnectionBootstrap::new(
            BootstrapStrategy::ListGames,
            PageLocation::parse("https://fkbad.github.io/?join=M1").unwrap(),
        );
        let (transport, sent) = recording_transport();

        bootstrap.on_open(&transport).unwrap();

        let sent = sent.lock().unwrap();
        let value: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(value["operation"], "list-games");
        assert!(value.get("params").is_none());
        assert!(value["id"].as_str().unwrap().starts_with("fkbad.github.io--"));
    }

    #[test]
    fn test_send_failure_still_opens() {
        let mut bootstrap = game_bootstrap("http://localhost:8000/");
        let mut transport = MockLobbyTransport::new();
        transport
            .expect_send_text()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("socket closed")));

        let err = bootstrap.on_open(&transport).unwrap_err();
        assert!(matches!(err, RequestError::Send(_)));
        assert_eq!(bootstrap.state(), BootstrapState::Open);
        assert_eq!(
            bootstrap.on_open(&transport).unwrap(),
            BootstrapOutcome::AlreadyOpen
        );
    }
}
