use std::time::{SystemTime, UNIX_EPOCH};

use crate::scene::bubble::{BubbleId, BubbleInstance, BubblePatch};
use crate::scene::style::BubbleStyle;

/// Authoritative collection of placed bubbles, in paint order (last is topmost).
#[derive(Debug, Default, Clone)]
pub struct BubbleStore {
    bubbles: Vec<BubbleInstance>,
    last_millis: u64,
    same_millis_seq: u32,
    issued: u64,
}

impl BubbleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bubble with default text, size and position, styled by `tag`.
    pub fn add_bubble(&mut self, tag: &str) -> BubbleId {
        let id = self.next_id();
        let style = BubbleStyle::parse(tag);
        tracing::trace!(%id, style = %style, "add bubble");
        self.bubbles
            .push(BubbleInstance::with_defaults(id.clone(), style));
        id
    }

    /// Merge `patch` into the matching bubble. Returns `false` (and changes nothing) when the id
    /// is unknown.
    pub fn update(&mut self, patch: &BubblePatch) -> bool {
        match self.bubbles.iter_mut().find(|b| b.id == patch.id) {
            Some(bubble) => {
                tracing::trace!(id = %patch.id, ?patch, "update bubble");
                bubble.apply(patch);
                true
            }
            None => {
                tracing::trace!(id = %patch.id, "update for unknown bubble ignored");
                false
            }
        }
    }

    /// Remove a bubble, returning it if it existed.
    pub fn remove(&mut self, id: &BubbleId) -> Option<BubbleInstance> {
        let idx = self.bubbles.iter().position(|b| &b.id == id)?;
        tracing::trace!(%id, "remove bubble");
        Some(self.bubbles.remove(idx))
    }

    /// Look up a bubble.
    pub fn get(&self, id: &BubbleId) -> Option<&BubbleInstance> {
        self.bubbles.iter().find(|b| &b.id == id)
    }

    /// Bubbles in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &BubbleInstance> {
        self.bubbles.iter()
    }

    /// Number of bubbles.
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Whether the store holds no bubbles.
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    fn next_id(&mut self) -> BubbleId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        // Never step backwards, even if the wall clock does.
        let millis = now.max(self.last_millis);
        let id = if self.issued > 0 && millis == self.last_millis {
            self.same_millis_seq += 1;
            format!("bubble-{millis}-{}", self.same_millis_seq)
        } else {
            self.last_millis = millis;
            self.same_millis_seq = 0;
            format!("bubble-{millis}")
        };
        self.issued += 1;
        BubbleId::new(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
