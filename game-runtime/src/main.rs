use std::sync::Arc;

use tracing::info;

use game_runtime::{Config, SessionManager};
use game_store::{InMemorySessionStore, PuzzleSet, WordList};
use game_types::{GameMode, Player};

/// Small built-in dictionary for the demo game. Real deployments load a
/// full word list via `WordList::from_file`.
const DEMO_WORDS: &str = "\
camp
fires
spire
grape
vine
even
stark
marble
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("starting demo session");

    let dictionary = match std::env::var("WORD_LIST_FILE") {
        Ok(path) => Arc::new(WordList::from_file(path)?),
        Err(_) => Arc::new(WordList::from_word_list(DEMO_WORDS)),
    };
    let puzzles = Arc::new(PuzzleSet::standard());
    let store = Arc::new(InMemorySessionStore::new());
    let manager = Arc::new(SessionManager::new(
        dictionary,
        puzzles,
        store,
        Config::new(),
    ));

    let players = [Player::new("Alice", "teal"), Player::new("Bob", "coral")];
    let state = manager
        .create_session(players, GameMode::Competitive)
        .await?;
    manager.start_session(state.id).await?;

    // Puzzle 4 is "campfires"; "spire" is formable from it.
    let letters = manager.select_number(state.id, 4).await?;
    info!(?letters, "puzzle 4 revealed");

    let outcome = manager.submit_word(state.id, "spire").await?;
    info!(?outcome, "word submitted");

    let final_state = manager.end_session(state.id).await?;
    for player in &final_state.players {
        info!(name = %player.name, score = player.score, "final score");
    }

    Ok(())
}
