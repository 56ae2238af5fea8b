//! Application state

use std::sync::Arc;

use crate::auth::AuthorizedInstance;
use crate::directory::Directory;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Credentials allowed to query the directory
    pub instance: Arc<AuthorizedInstance>,

    /// The reloadable user list
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new(instance: AuthorizedInstance, directory: Directory) -> Self {
        Self {
            instance: Arc::new(instance),
            directory: Arc::new(directory),
        }
    }
}
