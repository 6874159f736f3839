//! Memoisation of token sources.
//!
//! Parsing is the only expensive step of a rendering pass. Re-rendering the
//! same text with a different selection must not parse it again, so results
//! are cached keyed by the exact text.
//!
//! ## Learning: Interior Mutability
//!
//! `TokenSource::tokenize` takes `&self`, yet the cache has to record new
//! entries. A `Mutex` gives us mutation behind a shared reference, and keeps
//! `CachedSource` usable from several threads through an `Arc`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use crate::{Token, TokenResult, TokenSource};

/// Default number of texts kept in the cache.
pub const DEFAULT_CAPACITY: usize = 64;

/// A token source wrapper with a bounded least-recently-used cache.
///
/// Cache keys are the full input text, so a hit always means byte-identical
/// text. Failed tokenizations are not cached.
pub struct CachedSource<S> {
    inner: S,
    capacity: usize,
    state: Mutex<CacheState>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Arc<Vec<Token>>>,
    /// Keys from least to most recently used
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

impl<S: TokenSource> CachedSource<S> {
    /// Wraps a source with the default capacity.
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// Wraps a source keeping at most `capacity` texts (at least one).
    pub fn with_capacity(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Returns the tokens for `text`, parsing only on a cache miss.
    pub fn tokens(&self, text: &str) -> TokenResult<Arc<Vec<Token>>> {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(tokens) = state.entries.get(text).cloned() {
                state.hits += 1;
                state.touch(text);
                tracing::debug!(len = text.len(), "token cache hit");
                return Ok(tokens);
            }
            state.misses += 1;
        }

        // Parse without holding the lock
        let tokens = Arc::new(self.inner.tokenize(text)?);

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.entries.contains_key(text) {
            while state.entries.len() >= self.capacity {
                let Some(oldest) = state.order.pop_front() else {
                    break;
                };
                state.entries.remove(&oldest);
                tracing::trace!(len = oldest.len(), "evicted cached analysis");
            }
            state.order.push_back(text.to_string());
        } else {
            state.touch(text);
        }
        state.entries.insert(text.to_string(), Arc::clone(&tokens));
        Ok(tokens)
    }

    /// Number of cached texts.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        (state.hits, state.misses)
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
        state.order.clear();
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TokenSource> TokenSource for CachedSource<S> {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
        self.tokens(text).map(|tokens| tokens.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TokenError, WordTokenizer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how often the wrapped tokenizer runs.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl TokenSource for CountingSource {
        fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text == "fail" {
                return Err(TokenError::NotAnalyzed(text.to_string()));
            }
            WordTokenizer::new().tokenize(text)
        }
    }

    #[test]
    fn test_repeated_text_parsed_once() {
        let cache = CachedSource::new(CountingSource::default());
        let first = cache.tokens("Das Jahr ist vergangen.").unwrap();
        let second = cache.tokens("Das Jahr ist vergangen.").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_keys_are_exact_text() {
        let cache = CachedSource::new(CountingSource::default());
        cache.tokens("Hand").unwrap();
        cache.tokens("Hand ").unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_least_recently_used_evicted() {
        let cache = CachedSource::with_capacity(CountingSource::default(), 2);
        cache.tokens("a").unwrap();
        cache.tokens("b").unwrap();
        cache.tokens("a").unwrap(); // "b" is now oldest
        cache.tokens("c").unwrap();
        assert_eq!(cache.len(), 2);

        cache.tokens("a").unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 3);
        cache.tokens("b").unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = CachedSource::new(CountingSource::default());
        assert!(cache.tokens("fail").is_err());
        assert!(cache.tokens("fail").is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear() {
        let cache = CachedSource::new(WordTokenizer::new());
        cache.tokenize("Wurst").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
