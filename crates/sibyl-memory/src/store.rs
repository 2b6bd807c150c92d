// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session-scoped fact store and turn history.
//!
//! Facts are a flat name -> value mapping per session, mutated only by the
//! extraction stage via merge-update (last write wins). Turn history is an
//! append-only role+content log. Both live for the process lifetime.

use std::collections::HashMap;

use dashmap::DashMap;
use sibyl_core::types::{SessionId, Turn, TurnRole};

/// Process-wide store of user-disclosed facts, keyed by session.
///
/// Sessions are created implicitly on first reference and never destroyed.
/// Merges for the same session are serialized by the map's per-entry
/// locking; different sessions require no coordination.
#[derive(Debug, Default)]
pub struct FactStore {
    facts: DashMap<SessionId, HashMap<String, String>>,
    history: DashMap<SessionId, Vec<Turn>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current fact mapping for a session.
    ///
    /// Unknown sessions behave as having the empty mapping.
    pub fn get_all(&self, session: &SessionId) -> HashMap<String, String> {
        self.facts
            .get(session)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Merges a mapping of new facts into the session's existing one.
    ///
    /// Upsert semantics: new keys are added, existing keys overwritten.
    /// There is no removal operation.
    pub fn store(&self, session: &SessionId, facts: HashMap<String, String>) {
        if facts.is_empty() {
            return;
        }
        self.facts.entry(session.clone()).or_default().extend(facts);
    }

    /// Whether the session has any recorded facts.
    pub fn has_facts(&self, session: &SessionId) -> bool {
        self.facts
            .get(session)
            .is_some_and(|entry| !entry.value().is_empty())
    }

    /// Appends one turn to the session's history.
    pub fn add_turn(&self, session: &SessionId, role: TurnRole, content: impl Into<String>) {
        self.history.entry(session.clone()).or_default().push(Turn {
            role,
            content: content.into(),
        });
    }

    /// Returns the session's ordered turn history.
    pub fn history(&self, session: &SessionId) -> Vec<Turn> {
        self.history
            .get(session)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

/// Render a fact mapping as a `key: value` listing, sorted by key.
///
/// Sorting keeps the rendered context deterministic across runs.
pub fn render_facts(facts: &HashMap<String, String>) -> String {
    let mut pairs: Vec<(&String, &String)> = facts.iter().collect();
    pairs.sort_by_key(|(k, _)| k.as_str());
    pairs
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str) -> SessionId {
        SessionId(id.to_string())
    }

    fn facts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn unknown_session_is_empty() {
        let store = FactStore::new();
        assert!(store.get_all(&session("nobody")).is_empty());
        assert!(!store.has_facts(&session("nobody")));
    }

    #[test]
    fn store_and_get_all() {
        let store = FactStore::new();
        let s = session("s1");
        store.store(&s, facts(&[("name", "Asha"), ("location", "Pune")]));

        let all = store.get_all(&s);
        assert_eq!(all.len(), 2);
        assert_eq!(all["name"], "Asha");
        assert_eq!(all["location"], "Pune");
        assert!(store.has_facts(&s));
    }

    #[test]
    fn merge_is_upsert_last_write_wins() {
        let store = FactStore::new();
        let s = session("s1");
        store.store(&s, facts(&[("name", "Asha"), ("location", "Pune")]));
        store.store(&s, facts(&[("location", "Mumbai"), ("language", "Marathi")]));

        let all = store.get_all(&s);
        assert_eq!(all.len(), 3);
        assert_eq!(all["name"], "Asha");
        assert_eq!(all["location"], "Mumbai");
        assert_eq!(all["language"], "Marathi");
    }

    #[test]
    fn empty_merge_does_not_create_session() {
        let store = FactStore::new();
        let s = session("s1");
        store.store(&s, HashMap::new());
        assert!(!store.has_facts(&s));
    }

    #[test]
    fn sessions_are_isolated() {
        let store = FactStore::new();
        store.store(&session("a"), facts(&[("name", "Asha")]));
        store.store(&session("b"), facts(&[("name", "Ravi")]));

        assert_eq!(store.get_all(&session("a"))["name"], "Asha");
        assert_eq!(store.get_all(&session("b"))["name"], "Ravi");
    }

    #[test]
    fn concurrent_same_session_merges_are_not_lost() {
        let store = std::sync::Arc::new(FactStore::new());
        let s = session("shared");

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let s = s.clone();
                std::thread::spawn(move || {
                    store.store(&s, facts(&[(&format!("k{i}"), "v")]));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.get_all(&s).len(), 16, "no merge may be lost");
    }

    #[test]
    fn history_is_append_only_and_ordered() {
        let store = FactStore::new();
        let s = session("s1");
        store.add_turn(&s, TurnRole::User, "hello");
        store.add_turn(&s, TurnRole::Assistant, "hi there");

        let history = store.history(&s);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[1].role, TurnRole::Assistant);
    }

    #[test]
    fn render_facts_is_sorted_and_stable() {
        let rendered = render_facts(&facts(&[("name", "Asha"), ("location", "Pune")]));
        assert_eq!(rendered, "location: Pune\nname: Asha");
    }

    #[test]
    fn render_empty_facts() {
        assert_eq!(render_facts(&HashMap::new()), "");
    }
}
