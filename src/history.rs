//! Bounded conversation history.
//!
//! [`History`] keeps the most recent entries of a conversation, oldest first.
//! When an append pushes it past its bound, entries are evicted one at a time
//! from the front. Eviction works per entry, not per turn, so a full history
//! may begin with an assistant reply whose user message is already gone.

use std::collections::VecDeque;
use std::collections::vec_deque;
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::observability::{HISTORY_CLEARS, HISTORY_EVICTIONS};

/// Who produced an entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing at the prompt.
    User,

    /// The response generator.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One recorded message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The role of the author.
    pub role: Role,

    /// The message text, stored as given.
    pub content: String,
}

impl Entry {
    /// Create a new entry.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new user entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// An ordered, bounded sequence of [`Entry`] values.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Entry>,
    max_history: NonZeroUsize,
}

impl History {
    /// Creates an empty history that retains at most `max_history` entries.
    pub fn new(max_history: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_history.get().min(64) + 1),
            max_history,
        }
    }

    /// Appends an entry at the tail, evicting from the head until the bound
    /// holds again.
    ///
    /// Returns the number of entries evicted.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> usize {
        self.entries.push_back(Entry::new(role, content));
        let mut evicted = 0;
        while self.entries.len() > self.max_history.get() {
            self.entries.pop_front();
            HISTORY_EVICTIONS.click();
            evicted += 1;
        }
        evicted
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        HISTORY_CLEARS.click();
    }

    /// Iterates over the entries, oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Returns true if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the bound on the number of entries.
    pub fn max_history(&self) -> NonZeroUsize {
        self.max_history
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Entry;
    type IntoIter = vec_deque::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
