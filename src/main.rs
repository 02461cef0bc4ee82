//! Score inspector
//!
//! Prints the locally stored score table and the current high score.
//! Usage: `breakout-scores [DATA_DIR]` (defaults to the local data directory).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout_core::ScoreStore;
    use breakout_core::session::remembered_username;
    use breakout_core::storage::FileStore;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let store = match std::env::args().nth(1) {
        Some(dir) => FileStore::new(dir),
        None => match FileStore::in_data_dir() {
            Ok(store) => store,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
    };
    let dir = store.dir().to_path_buf();

    let scores = ScoreStore::load(Box::new(store));
    println!("Scores in {}", dir.display());
    if let Some(name) = remembered_username(scores.backend()) {
        println!("Last player: {name}");
    }

    let table = scores.table();
    if table.is_empty() {
        println!("No scores recorded yet");
    } else {
        for (rank, (name, score)) in table.leaderboard().into_iter().enumerate() {
            println!("{:>3}. {:<20} {:>5}", rank + 1, name, score);
        }
    }
    println!("High Score: {}", scores.best_score());
}

// The browser build is driven through `breakout_core::web::WebGame`
#[cfg(target_arch = "wasm32")]
fn main() {}
