use std::sync::Arc;

use tokio::sync::RwLock;

use crate::storage::TournamentStore;

/// Shared handler state. Reads take the read lock; every mutation holds the
/// write lock so read-modify-write cycles on a table never interleave.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<TournamentStore>>,
}

impl AppState {
    pub fn new(store: TournamentStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
