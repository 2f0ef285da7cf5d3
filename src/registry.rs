//! Index-addressed collection of tree roots.
//!
//! Trees are shared out as `Arc<Node>` so a render can keep reading a tree
//! while other requests grow the registry.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::node::Node;

/// Where [`TreeRegistry::ensure_and_insert`] puts a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPolicy {
    /// Pad with placeholders while `index > len`, then push the tree onto the end.
    /// Once the registry holds more than `index` entries the tree lands past `index`.
    /// Pushes stop once the registry holds `max_index + 1` trees.
    #[default]
    Append,
    /// Pad with placeholders up to `index`, then store the tree at `index`,
    /// replacing whatever was there.
    Indexed,
}

#[derive(Debug)]
pub struct TreeRegistry {
    trees: RwLock<Vec<Arc<Node>>>,
    policy: InsertPolicy,
    max_index: usize,
}

impl Default for TreeRegistry {
    fn default() -> Self {
        Self::new(InsertPolicy::default(), usize::MAX)
    }
}

impl TreeRegistry {
    pub fn new(policy: InsertPolicy, max_index: usize) -> Self {
        Self {
            trees: RwLock::new(Vec::new()),
            policy,
            max_index,
        }
    }

    pub fn policy(&self) -> InsertPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Rejects indices above the configured maximum.
    pub fn check_index(&self, index: usize) -> Result<(), RegistryError> {
        if index > self.max_index {
            return Err(RegistryError::IndexTooLarge {
                index,
                max: self.max_index,
            });
        }
        Ok(())
    }

    /// The tree stored at `index`.
    pub fn get(&self, index: usize) -> Result<Arc<Node>, RegistryError> {
        self.check_index(index)?;
        let trees = self.read();
        trees
            .get(index)
            .cloned()
            .ok_or(RegistryError::NotLoaded {
                index,
                len: trees.len(),
            })
    }

    /// Like [`TreeRegistry::get`], but a slot that was never loaded yields a placeholder tree.
    pub fn get_or_placeholder(&self, index: usize) -> Result<Arc<Node>, RegistryError> {
        match self.get(index) {
            Err(RegistryError::NotLoaded { .. }) => Ok(Arc::new(Node::placeholder())),
            other => other,
        }
    }

    /// Grows the registry to cover `index` and stores `tree` according to the policy.
    ///
    /// Returns the position the tree was stored at. Under either policy the
    /// registry never holds more than `max_index + 1` trees; an append that
    /// would exceed that fails with [`RegistryError::Full`].
    pub fn ensure_and_insert(&self, index: usize, tree: Node) -> Result<usize, RegistryError> {
        self.check_index(index)?;
        let tree = Arc::new(tree);
        let mut trees = self.write();

        let padded = index.saturating_sub(trees.len());
        while index > trees.len() {
            trees.push(Arc::new(Node::placeholder()));
        }

        let position = match self.policy {
            InsertPolicy::Append => {
                if trees.len() > self.max_index {
                    warn!(index, len = trees.len(), max = self.max_index, "registry full, not storing tree");
                    return Err(RegistryError::Full {
                        len: trees.len(),
                        max: self.max_index,
                    });
                }
                trees.push(tree);
                trees.len() - 1
            }
            InsertPolicy::Indexed => {
                if index == trees.len() {
                    trees.push(tree);
                } else {
                    trees[index] = tree;
                }
                index
            }
        };

        debug!(index, position, padded, len = trees.len(), "stored tree");
        Ok(position)
    }

    /// A copy of the current sequence of roots.
    pub fn snapshot(&self) -> Vec<Arc<Node>> {
        self.read().clone()
    }

    // Writers only ever push or swap whole `Arc`s, so a poisoned lock still
    // guards a consistent vector.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Node>>> {
        self.trees.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Node>>> {
        self.trees.write().unwrap_or_else(PoisonError::into_inner)
    }
}
