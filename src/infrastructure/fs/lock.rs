//! Per-destination locks
//!
//! Every operation on a destination holds its guard for the duration of the
//! write. The guard releases on drop, so early returns and panics unlock too.

use std::collections::HashSet;
use std::sync::{Condvar, Mutex};

use crate::domain::value_objects::DestinationPath;

/// Set of destinations currently being written
#[derive(Debug, Default)]
pub struct PathLockSet {
    held: Mutex<HashSet<DestinationPath>>,
    released: Condvar,
}

impl PathLockSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `path` is free, then hold it until the guard drops
    pub fn acquire(&self, path: &DestinationPath) -> PathLockGuard<'_> {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        while held.contains(path) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(|e| e.into_inner());
        }
        held.insert(path.clone());
        PathLockGuard {
            set: self,
            path: path.clone(),
        }
    }

    /// Hold `path` only if nobody else does
    #[cfg(test)]
    pub fn try_acquire(&self, path: &DestinationPath) -> Option<PathLockGuard<'_>> {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(path.clone()) {
            return None;
        }
        Some(PathLockGuard {
            set: self,
            path: path.clone(),
        })
    }

    #[cfg(test)]
    pub fn is_locked(&self, path: &DestinationPath) -> bool {
        self.held
            .lock()
            .map(|held| held.contains(path))
            .unwrap_or(true)
    }
}

/// RAII guard for one destination
#[derive(Debug)]
pub struct PathLockGuard<'a> {
    set: &'a PathLockSet,
    path: DestinationPath,
}

impl PathLockGuard<'_> {
    #[cfg(test)]
    pub fn path(&self) -> &DestinationPath {
        &self.path
    }
}

impl Drop for PathLockGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.set.held.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(&self.path);
        self.set.released.notify_all();
    }
}
