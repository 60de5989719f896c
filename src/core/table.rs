//! Transition table: origin -> destination -> action.

use super::state::State;
use std::collections::{HashMap, HashSet};

/// Result of looking up an edge.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, A> {
    /// An action is registered for the pair.
    Found(&'a A),
    /// Nothing at all is registered out of the origin.
    UndefinedOrigin,
    /// The origin has edges, but none to the destination.
    UndefinedDestination,
}

/// Edge storage with at most one action per (origin, destination) pair.
///
/// Insertion is all-or-nothing: a batch that would collide with an existing
/// edge, or with itself, leaves the table untouched.
#[derive(Debug)]
pub struct TransitionTable<S: State, A> {
    edges: HashMap<S, HashMap<S, A>>,
}

impl<S: State, A> TransitionTable<S, A> {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    pub fn lookup(&self, from: &S, to: &S) -> Lookup<'_, A> {
        match self.edges.get(from) {
            None => Lookup::UndefinedOrigin,
            Some(destinations) => match destinations.get(to) {
                Some(action) => Lookup::Found(action),
                None => Lookup::UndefinedDestination,
            },
        }
    }

    pub fn contains(&self, from: &S, to: &S) -> bool {
        matches!(self.lookup(from, to), Lookup::Found(_))
    }

    /// Total number of registered edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Store `action` under every pair, or nothing at all.
    ///
    /// Pairs are checked in order; the first one already present (in the table
    /// or earlier in `pairs`) is returned as the error.
    pub fn insert_all(&mut self, pairs: &[(S, S)], action: A) -> Result<(), (S, S)>
    where
        A: Clone,
    {
        let mut seen = HashSet::with_capacity(pairs.len());
        for (from, to) in pairs {
            if self.contains(from, to) || !seen.insert((from, to)) {
                return Err((from.clone(), to.clone()));
            }
        }

        for (from, to) in pairs {
            self.edges
                .entry(from.clone())
                .or_default()
                .insert(to.clone(), action.clone());
        }
        Ok(())
    }
}

impl<S: State, A> Default for TransitionTable<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
