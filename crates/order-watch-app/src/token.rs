//! [`TokenStore`] implementations backed by the process environment or a file.
//!
//! Both re-read their source on every call, so rotating or removing the
//! token takes effect at the next poll.

use crate::config::TokenSource;
use order_watch::TokenStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::{env, fs};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EnvTokenStore {
    key: String,
}

impl EnvTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for EnvTokenStore {
    fn admin_token(&self) -> Option<String> {
        env::var(&self.key).ok().and_then(non_empty)
    }
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn admin_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => non_empty(contents),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Token file unreadable");
                None
            }
        }
    }
}

fn non_empty(raw: String) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}

pub fn token_store(source: &TokenSource) -> Arc<dyn TokenStore> {
    match source {
        TokenSource::Env(key) => Arc::new(EnvTokenStore::new(key.clone())),
        TokenSource::File(path) => Arc::new(FileTokenStore::new(path.clone())),
    }
}
