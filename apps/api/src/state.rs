use kasir_db::Database;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: `Database` wraps a reference-counted pool.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle (repositories, checkout, reports).
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
