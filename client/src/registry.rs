//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Session registry
//!
//! Maps an external session key, such as a relay client id, to the [`TelnetClient`]
//! serving it: insert on connect, remove on disconnect.

use crate::TelnetClient;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, info};

/// Concurrent map of live sessions
#[derive(Debug)]
pub struct SessionRegistry<K: Eq + Hash> {
    sessions: DashMap<K, Arc<TelnetClient>>,
}

impl<K> SessionRegistry<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Track `client` under `key`, returning the client it replaced.
    ///
    /// A replaced client is not disposed.
    pub fn insert(&self, key: K, client: Arc<TelnetClient>) -> Option<Arc<TelnetClient>> {
        debug!(?key, "Session added");
        self.sessions.insert(key, client)
    }

    /// Look up a session
    pub fn get(&self, key: &K) -> Option<Arc<TelnetClient>> {
        self.sessions.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Stop tracking a session and hand it back, still connected, for disposal.
    pub fn remove(&self, key: &K) -> Option<Arc<TelnetClient>> {
        let removed = self.sessions.remove(key).map(|(_, client)| client);
        if removed.is_some() {
            debug!(?key, "Session removed");
        }
        removed
    }

    /// Returns true if `key` is tracked
    pub fn contains(&self, key: &K) -> bool {
        self.sessions.contains_key(key)
    }

    /// Number of tracked sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no sessions are tracked
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Keys of every tracked session
    pub fn keys(&self) -> Vec<K> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Remove and dispose every session.
    pub async fn dispose_all(&self) {
        let keys = self.keys();
        info!(count = keys.len(), "Disposing all sessions");
        for key in keys {
            if let Some(client) = self.remove(&key) {
                client.dispose().await;
            }
        }
    }
}

impl<K> Default for SessionRegistry<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
