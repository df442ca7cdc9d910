//! Game tags accepted by the lobby server's `create-match` operation.

/// Tag of the "player 1 wins" test game, the default for direct-game pages.
pub const P1WINS: &str = "p1wins";

/// Known game tags and their human-readable descriptions.
pub const GAME_CATALOGUE: &[(&str, &str)] = &[(P1WINS, "player 1 wins")];

/// Look up the description of a game tag.
///
/// Returns `None` for tags the server will reject with `Unknown game`.
pub fn game_description(tag: &str) -> Option<&'static str> {
    GAME_CATALOGUE
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, description)| *description)
}
