//! Asset cache and audio cue queue.
//!
//! The cache is an explicitly owned object injected into whatever
//! presentation component needs it; the core (mirror, dispatch, interp,
//! frame) never touches assets. Sound cues from change records are
//! fire-and-forget: the dispatcher enqueues a cue key and moves on, and
//! the presentation layer drains the queue whenever it gets around to it.

use std::collections::HashMap;

/// Keyed cache for loaded presentation resources (textures, sounds).
#[derive(Default)]
pub struct AssetCache<T> {
    loaded: HashMap<String, T>,
}

impl<T> AssetCache<T> {
    pub fn new() -> Self {
        Self {
            loaded: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.loaded.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.loaded.insert(key.into(), value);
    }

    /// Returns the cached resource, loading it on a miss.
    pub fn get_or_load<E>(
        &mut self,
        key: &str,
        loader: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<&T, E> {
        if !self.loaded.contains_key(key) {
            let value = loader(key)?;
            self.loaded.insert(key.to_string(), value);
        }
        Ok(&self.loaded[key])
    }
}

/// Pending fire-and-forget audio cues.
#[derive(Debug, Default)]
pub struct SoundQueue {
    pending: Vec<String>,
}

impl SoundQueue {
    pub fn push(&mut self, cue: impl Into<String>) {
        self.pending.push(cue.into());
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
