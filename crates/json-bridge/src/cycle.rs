//! Cycle detection for the encoder.
//!
//! The set holds the identities of the containers on the path from the root
//! to the node being encoded, not every container seen so far. Two siblings
//! sharing one acyclic list are fine; a list that contains itself, directly
//! or through any chain of descendants, is not.

use std::collections::HashSet;

use crate::error::{ConvertError, Result};

/// Raw identity of a host container (its address).
pub type Identity = usize;

/// Containers currently being encoded on the active path.
///
/// One set is created per top-level encode call and dropped when it returns.
#[derive(Debug, Default)]
pub struct IdentitySet {
    on_path: HashSet<Identity>,
}

impl IdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `identity` as in progress, run `f`, then unmark it whether or not
    /// `f` succeeded. Fails with `CycleDetected` without calling `f` if the
    /// identity is already on the path.
    pub fn visit<T>(
        &mut self,
        identity: Identity,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if !self.on_path.insert(identity) {
            tracing::debug!(identity, depth = self.depth(), "circular reference detected");
            return Err(ConvertError::CycleDetected);
        }
        let result = f(self);
        self.on_path.remove(&identity);
        result
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.on_path.contains(&identity)
    }

    /// Number of containers on the active path.
    pub fn depth(&self) -> usize {
        self.on_path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentering_an_identity_on_the_path_fails() {
        let mut set = IdentitySet::new();
        let result = set.visit(1, |set| set.visit(2, |set| set.visit(1, |_| Ok(()))));
        assert!(matches!(result, Err(ConvertError::CycleDetected)));
        assert_eq!(set.depth(), 0);
    }

    #[test]
    fn siblings_may_share_an_identity() {
        let mut set = IdentitySet::new();
        let result = set.visit(1, |set| {
            set.visit(2, |_| Ok(()))?;
            set.visit(2, |_| Ok(()))
        });
        assert!(result.is_ok());
    }

    #[test]
    fn identity_is_released_after_failure() {
        let mut set = IdentitySet::new();
        let failed: Result<()> = set.visit(7, |set| {
            assert!(set.contains(7));
            Err(ConvertError::DepthLimitExceeded { limit: 0 })
        });
        assert!(failed.is_err());
        assert!(!set.contains(7));
        assert!(set.visit(7, |_| Ok(())).is_ok());
    }
}
