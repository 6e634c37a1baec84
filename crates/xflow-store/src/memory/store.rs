//! In-memory sorted-set store using the dashmap crate.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use xflow_core::result::AppResult;
use xflow_core::traits::ordered_set::{OrderedSetStore, ScoredMember};

/// Ordering key inside a set: score first, then member.
#[derive(Debug, Clone)]
struct Entry {
    score: f64,
    member: String,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.member.cmp(&other.member))
    }
}

/// A single sorted set.
#[derive(Debug, Default)]
struct SortedSet {
    scores: HashMap<String, f64>,
    ordered: BTreeSet<Entry>,
}

impl SortedSet {
    fn insert(&mut self, member: &str, score: f64) -> bool {
        let is_new = match self.scores.insert(member.to_string(), score) {
            Some(old) => {
                self.ordered.remove(&Entry {
                    score: old,
                    member: member.to_string(),
                });
                false
            }
            None => true,
        };
        self.ordered.insert(Entry {
            score,
            member: member.to_string(),
        });
        is_new
    }

    fn rank(&self, member: &str) -> Option<i64> {
        let score = *self.scores.get(member)?;
        let probe = Entry {
            score,
            member: member.to_string(),
        };
        Some(self.ordered.range(..probe).count() as i64)
    }

    fn pop_first(&mut self) -> Option<Entry> {
        let entry = self.ordered.pop_first()?;
        self.scores.remove(&entry.member);
        Some(entry)
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }
}

/// In-memory sorted-set store.
///
/// Every method runs under the shard lock of the key it touches, so each
/// call is atomic with respect to other calls on the same key. Empty sets
/// are dropped, matching Redis, so key scans never report them.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderedSetStore {
    sets: Arc<DashMap<String, SortedSet>>,
}

impl MemoryOrderedSetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderedSetStore for MemoryOrderedSetStore {
    async fn add_if_absent(&self, key: &str, member: &str, score: f64) -> AppResult<bool> {
        let mut set = self.sets.entry(key.to_string()).or_default();
        if set.scores.contains_key(member) {
            return Ok(false);
        }
        Ok(set.insert(member, score))
    }

    async fn add(&self, key: &str, member: &str, score: f64) -> AppResult<bool> {
        let mut set = self.sets.entry(key.to_string()).or_default();
        Ok(set.insert(member, score))
    }

    async fn rank(&self, key: &str, member: &str) -> AppResult<Option<i64>> {
        Ok(self.sets.get(key).and_then(|set| set.rank(member)))
    }

    async fn pop_lowest(&self, key: &str, count: usize) -> AppResult<Vec<ScoredMember>> {
        let popped: Vec<ScoredMember> = match self.sets.get_mut(key) {
            Some(mut set) => std::iter::from_fn(|| set.pop_first())
                .take(count)
                .map(|entry| ScoredMember {
                    member: entry.member,
                    score: entry.score,
                })
                .collect(),
            None => return Ok(Vec::new()),
        };

        self.sets.remove_if(key, |_, set| set.len() == 0);

        debug!(key, requested = count, popped = popped.len(), "Popped lowest members");
        Ok(popped)
    }

    async fn cardinality(&self, key: &str) -> AppResult<u64> {
        Ok(self.sets.get(key).map_or(0, |set| set.len() as u64))
    }

    async fn scan_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .sets
            .iter()
            .filter(|entry| entry.value().len() > 0 && glob_match(pattern, entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Redis-style glob match supporting `*` and `?`.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star_p, star_t)) => {
                    p = star_p + 1;
                    t = star_t + 1;
                    backtrack = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
