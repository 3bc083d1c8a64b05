//! An ordered index on top of the positional [`Tree`].

use super::{NodeIdx, Tree};

/// A balanced search tree ordered by a strict "less than" predicate.
///
/// Two values that are neither less than one another are considered equal, and
/// the tree holds at most one of them.
#[derive(Clone)]
pub struct OrderedTree<T, L> {
    tree: Tree<T>,
    less: L,
}

impl<T: std::fmt::Debug, L> std::fmt::Debug for OrderedTree<T, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tree.iter().map(|(_, v)| v))
            .finish()
    }
}

impl<T: Ord> OrderedTree<T, fn(&T, &T) -> bool> {
    /// Creates an empty tree ordered by `T`'s `Ord` impl.
    pub fn natural() -> Self {
        Self::new(|a: &T, b: &T| a < b)
    }
}

impl<T: Ord> Default for OrderedTree<T, fn(&T, &T) -> bool> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T, fn(&T, &T) -> bool> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Self::natural();
        ret.extend(iter);
        ret
    }
}

impl<T, L: Fn(&T, &T) -> bool> Extend<T> for OrderedTree<T, L> {
    /// Inserts everything, silently dropping values equal to one already present.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            let _ = self.insert(v);
        }
    }
}

impl<T, L: Fn(&T, &T) -> bool> OrderedTree<T, L> {
    /// Creates an empty tree ordered by `less`.
    pub fn new(less: L) -> Self {
        Self {
            tree: Tree::new(),
            less,
        }
    }

    /// The underlying positional tree.
    pub fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    /// The number of values.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Are we empty?
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The value at a node.
    pub fn get(&self, idx: NodeIdx) -> Option<&T> {
        self.tree.get(idx)
    }

    /// The smallest value.
    pub fn min(&self) -> Option<&T> {
        self.tree.first().map(|idx| &self.tree[idx])
    }

    /// The largest value.
    pub fn max(&self) -> Option<&T> {
        self.tree.last().map(|idx| &self.tree[idx])
    }

    /// The node holding the next-larger value.
    pub fn successor(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.tree.next(idx)
    }

    /// The node holding the next-smaller value.
    pub fn predecessor(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.tree.prev(idx)
    }

    /// Iterates over the values in increasing order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree.iter().map(|(_, v)| v)
    }

    /// Finds the node holding a value equal to `value`.
    pub fn search(&self, value: &T) -> Option<NodeIdx> {
        let mut cur = self.tree.root();
        while let Some(idx) = cur {
            let here = &self.tree[idx];
            cur = if (self.less)(value, here) {
                self.tree.left(idx)
            } else if (self.less)(here, value) {
                self.tree.right(idx)
            } else {
                return Some(idx);
            };
        }
        None
    }

    /// Inserts a value, returning its node.
    ///
    /// If an equal value is already present, the tree is unchanged and `value`
    /// is handed back.
    pub fn insert(&mut self, value: T) -> Result<NodeIdx, T> {
        let Some(mut cur) = self.tree.root() else {
            return Ok(self.tree.insert_root(value));
        };

        loop {
            if (self.less)(&value, &self.tree[cur]) {
                match self.tree.left(cur) {
                    Some(left) => cur = left,
                    None => return Ok(self.tree.insert_before(cur, value)),
                }
            } else if (self.less)(&self.tree[cur], &value) {
                match self.tree.right(cur) {
                    Some(right) => cur = right,
                    None => return Ok(self.tree.insert_after(cur, value)),
                }
            } else {
                return Err(value);
            }
        }
    }

    /// Removes the value equal to `value`, if there is one.
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let idx = self.search(value)?;
        Some(self.tree.remove(idx))
    }

    /// Removes the value at a node.
    pub fn remove(&mut self, idx: NodeIdx) -> T {
        self.tree.remove(idx)
    }

    /// Checks the tree's invariants, and also that the values are strictly increasing.
    pub fn check_invariants(&self) {
        self.tree.check_invariants();
        let values: Vec<_> = self.values().collect();
        for pair in values.windows(2) {
            assert!((self.less)(pair[0], pair[1]), "values out of order");
        }
    }
}
