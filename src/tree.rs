//! An AVL tree over an arena of nodes, threaded with an inorder linked list.
//!
//! [`Tree`] is positional: it never compares values, and callers say where a
//! new value goes relative to an existing node. That's what the beachline
//! needs, because the left-to-right order of its arcs isn't a fixed key
//! order. [`ordered::OrderedTree`] layers a comparison predicate on top to
//! get a conventional ordered index.
//!
//! Nodes live in a slab and are addressed by [`NodeIdx`]. A node owns its two
//! children in the sense that exactly one parent link points at each child;
//! the parent pointer and the `prev`/`next` thread are plain relations used for
//! upward walks and O(1) neighbor access. A handle stays valid until its node is
//! removed, and removing a node never moves any other value to a new handle.

pub mod ordered;

/// A handle to a node of a [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NodeIdx(usize);

impl std::fmt::Debug for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n_{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    parent: Option<NodeIdx>,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
    height: i32,
    prev: Option<NodeIdx>,
    next: Option<NodeIdx>,
}

/// A self-balancing binary tree whose nodes are also linked in inorder sequence.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    root: Option<NodeIdx>,
    first: Option<NodeIdx>,
    last: Option<NodeIdx>,
    len: usize,
}

/// The shape of a (sub)tree, for diagnostics and rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Shape {
    /// The node at the root of this subtree.
    pub node: NodeIdx,
    /// Its cached height.
    pub height: i32,
    /// The left subtree.
    pub left: Option<Box<Shape>>,
    /// The right subtree.
    pub right: Option<Box<Shape>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            first: None,
            last: None,
            len: 0,
        }
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Are we empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, if there is one.
    pub fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    /// The leftmost node, in O(1).
    pub fn first(&self) -> Option<NodeIdx> {
        self.first
    }

    /// The rightmost node, in O(1).
    pub fn last(&self) -> Option<NodeIdx> {
        self.last
    }

    /// Does `idx` refer to a live node?
    pub fn contains(&self, idx: NodeIdx) -> bool {
        matches!(self.slots.get(idx.0), Some(Some(_)))
    }

    /// The value at `idx`, or `None` if that node has been removed.
    pub fn get(&self, idx: NodeIdx) -> Option<&T> {
        self.slots.get(idx.0)?.as_ref().map(|n| &n.value)
    }

    /// The value at `idx`, mutably.
    ///
    /// Nothing in the tree depends on the values, so this can't break any
    /// invariant of ours. (It can break an ordering that a caller relies on.)
    pub fn get_mut(&mut self, idx: NodeIdx) -> Option<&mut T> {
        self.slots.get_mut(idx.0)?.as_mut().map(|n| &mut n.value)
    }

    fn node(&self, idx: NodeIdx) -> &Node<T> {
        match self.slots.get(idx.0) {
            Some(Some(node)) => node,
            _ => panic!("stale tree handle {idx:?}"),
        }
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<T> {
        match self.slots.get_mut(idx.0) {
            Some(Some(node)) => node,
            _ => panic!("stale tree handle {idx:?}"),
        }
    }

    /// The left child of `idx`.
    pub fn left(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).left
    }

    /// The right child of `idx`.
    pub fn right(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).right
    }

    /// The parent of `idx`, or `None` for the root.
    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).parent
    }

    /// The inorder predecessor of `idx`, following the thread.
    pub fn prev(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).prev
    }

    /// The inorder successor of `idx`, following the thread.
    pub fn next(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).next
    }

    /// The height of the subtree rooted at `idx`. A single node has height zero.
    pub fn height(&self, idx: NodeIdx) -> i32 {
        self.node(idx).height
    }

    fn height_of(&self, idx: Option<NodeIdx>) -> i32 {
        idx.map_or(-1, |i| self.node(i).height)
    }

    /// The height of the left subtree minus the height of the right subtree.
    pub fn balance(&self, idx: NodeIdx) -> i32 {
        let node = self.node(idx);
        self.height_of(node.left) - self.height_of(node.right)
    }

    /// The leftmost node of the subtree rooted at `idx`.
    pub fn min(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(left) = self.node(idx).left {
            idx = left;
        }
        idx
    }

    /// The rightmost node of the subtree rooted at `idx`.
    pub fn max(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(right) = self.node(idx).right {
            idx = right;
        }
        idx
    }

    /// The inorder successor of `idx`, found by walking the tree.
    ///
    /// This always agrees with [`Tree::next`], which is faster.
    pub fn successor(&self, idx: NodeIdx) -> Option<NodeIdx> {
        if let Some(right) = self.node(idx).right {
            return Some(self.min(right));
        }
        let mut cur = idx;
        while let Some(parent) = self.node(cur).parent {
            if self.node(parent).left == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
        None
    }

    /// The inorder predecessor of `idx`, found by walking the tree.
    ///
    /// This always agrees with [`Tree::prev`], which is faster.
    pub fn predecessor(&self, idx: NodeIdx) -> Option<NodeIdx> {
        if let Some(left) = self.node(idx).left {
            return Some(self.max(left));
        }
        let mut cur = idx;
        while let Some(parent) = self.node(cur).parent {
            if self.node(parent).right == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
        None
    }

    fn alloc(&mut self, value: T, parent: Option<NodeIdx>) -> NodeIdx {
        let node = Node {
            value,
            parent,
            left: None,
            right: None,
            height: 0,
            prev: None,
            next: None,
        };
        self.len += 1;
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            NodeIdx(slot)
        } else {
            self.slots.push(Some(node));
            NodeIdx(self.slots.len() - 1)
        }
    }

    /// Inserts the first value into an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree isn't empty.
    pub fn insert_root(&mut self, value: T) -> NodeIdx {
        assert!(self.is_empty(), "insert_root on a non-empty tree");
        let idx = self.alloc(value, None);
        self.root = Some(idx);
        self.first = Some(idx);
        self.last = Some(idx);
        idx
    }

    /// Inserts `value` immediately after `node` in inorder sequence.
    ///
    /// The new node becomes the right child of `node` if that slot is free,
    /// and otherwise the left child of `node`'s successor (whose left slot is
    /// necessarily free).
    pub fn insert_after(&mut self, node: NodeIdx, value: T) -> NodeIdx {
        let new = match self.node(node).right {
            None => {
                let new = self.alloc(value, Some(node));
                self.node_mut(node).right = Some(new);
                new
            }
            Some(right) => {
                let succ = self.min(right);
                let new = self.alloc(value, Some(succ));
                self.node_mut(succ).left = Some(new);
                new
            }
        };

        let next = self.node(node).next;
        self.link(Some(node), new, next);
        self.rebalance_from(self.node(new).parent);
        new
    }

    /// Inserts `value` immediately before `node` in inorder sequence.
    pub fn insert_before(&mut self, node: NodeIdx, value: T) -> NodeIdx {
        let new = match self.node(node).left {
            None => {
                let new = self.alloc(value, Some(node));
                self.node_mut(node).left = Some(new);
                new
            }
            Some(left) => {
                let pred = self.max(left);
                let new = self.alloc(value, Some(pred));
                self.node_mut(pred).right = Some(new);
                new
            }
        };

        let prev = self.node(node).prev;
        self.link(prev, new, Some(node));
        self.rebalance_from(self.node(new).parent);
        new
    }

    // Splices `new` into the thread between `prev` and `next`.
    fn link(&mut self, prev: Option<NodeIdx>, new: NodeIdx, next: Option<NodeIdx>) {
        {
            let node = self.node_mut(new);
            node.prev = prev;
            node.next = next;
        }
        match prev {
            Some(p) => self.node_mut(p).next = Some(new),
            None => self.first = Some(new),
        }
        match next {
            Some(n) => self.node_mut(n).prev = Some(new),
            None => self.last = Some(new),
        }
    }

    /// Removes the node `idx`, returning its value.
    ///
    /// A node with two children is replaced by its inorder successor: the
    /// successor node itself is moved into the removed node's position, so
    /// every other handle keeps pointing at the same value.
    pub fn remove(&mut self, idx: NodeIdx) -> T {
        let Node {
            parent,
            left,
            right,
            height,
            prev,
            next,
            ..
        } = *self.node(idx);

        let rebalance_start = match (left, right) {
            (None, child) | (child, None) => {
                self.replace_child(parent, idx, child);
                if let Some(child) = child {
                    self.node_mut(child).parent = parent;
                }
                parent
            }
            (Some(left), Some(right)) => {
                // The successor has no left child, because it's the minimum of
                // `right`. Its old parent is where the tree got shorter.
                let succ = self.min(right);
                let start = if succ == right {
                    succ
                } else {
                    let succ_parent = self.node(succ).parent;
                    let succ_right = self.node(succ).right;
                    if let Some(sp) = succ_parent {
                        self.node_mut(sp).left = succ_right;
                    }
                    if let Some(sr) = succ_right {
                        self.node_mut(sr).parent = succ_parent;
                    }
                    self.node_mut(succ).right = Some(right);
                    self.node_mut(right).parent = Some(succ);
                    // unwrap: succ is strictly below `right`, so it has a parent
                    succ_parent.unwrap()
                };

                self.replace_child(parent, idx, Some(succ));
                {
                    let s = self.node_mut(succ);
                    s.parent = parent;
                    s.left = Some(left);
                    s.height = height;
                }
                self.node_mut(left).parent = Some(succ);
                Some(start)
            }
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.first = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.last = prev,
        }

        // unwrap: `self.node(idx)` above would have panicked on a stale handle
        let node = self.slots[idx.0].take().unwrap();
        self.free.push(idx.0);
        self.len -= 1;

        self.rebalance_from(rebalance_start);
        node.value
    }

    // Points whichever link used to point at `old` (a child link of `parent`,
    // or the root) at `new` instead.
    fn replace_child(&mut self, parent: Option<NodeIdx>, old: NodeIdx, new: Option<NodeIdx>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let p = self.node_mut(p);
                if p.left == Some(old) {
                    p.left = new;
                } else {
                    debug_assert_eq!(p.right, Some(old));
                    p.right = new;
                }
            }
        }
    }

    fn update_height(&mut self, idx: NodeIdx) {
        let node = self.node(idx);
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.node_mut(idx).height = height;
    }

    // Walks from `start` to the root, fixing heights and rotating where
    // necessary. Stops as soon as a subtree comes out with the same height it
    // had before, since nothing above it can have changed.
    fn rebalance_from(&mut self, start: Option<NodeIdx>) {
        let mut cur = start;
        while let Some(idx) = cur {
            let parent = self.node(idx).parent;
            let old_height = self.node(idx).height;
            self.update_height(idx);

            let bal = self.balance(idx);
            let top = if bal.abs() > 1 {
                self.rebalance(idx, bal)
            } else {
                idx
            };
            debug_assert!(
                self.balance(top).abs() <= 1,
                "rebalancing failed at {top:?}"
            );

            if self.node(top).height == old_height {
                break;
            }
            cur = parent;
        }
    }

    // Restores the balance of a node whose balance factor is +-2, returning the
    // new root of its subtree.
    fn rebalance(&mut self, idx: NodeIdx, bal: i32) -> NodeIdx {
        if bal > 1 {
            let Some(left) = self.node(idx).left else {
                unreachable!("left-heavy node {idx:?} without a left child");
            };
            if self.balance(left) < 0 {
                self.rotate_left(left);
            }
            self.rotate_right(idx)
        } else {
            let Some(right) = self.node(idx).right else {
                unreachable!("right-heavy node {idx:?} without a right child");
            };
            if self.balance(right) > 0 {
                self.rotate_right(right);
            }
            self.rotate_left(idx)
        }
    }

    // Lifts the left child of `idx` into its place. Only the heights of the
    // two nodes involved change.
    fn rotate_right(&mut self, idx: NodeIdx) -> NodeIdx {
        let Some(x) = self.node(idx).left else {
            unreachable!("right rotation of {idx:?} without a left child");
        };
        let y = self.node(x).right;
        let parent = self.node(idx).parent;

        self.replace_child(parent, idx, Some(x));
        self.node_mut(x).parent = parent;
        self.node_mut(x).right = Some(idx);
        self.node_mut(idx).parent = Some(x);
        self.node_mut(idx).left = y;
        if let Some(y) = y {
            self.node_mut(y).parent = Some(idx);
        }

        self.update_height(idx);
        self.update_height(x);
        x
    }

    fn rotate_left(&mut self, idx: NodeIdx) -> NodeIdx {
        let Some(x) = self.node(idx).right else {
            unreachable!("left rotation of {idx:?} without a right child");
        };
        let y = self.node(x).left;
        let parent = self.node(idx).parent;

        self.replace_child(parent, idx, Some(x));
        self.node_mut(x).parent = parent;
        self.node_mut(x).left = Some(idx);
        self.node_mut(idx).parent = Some(x);
        self.node_mut(idx).right = y;
        if let Some(y) = y {
            self.node_mut(y).parent = Some(idx);
        }

        self.update_height(idx);
        self.update_height(x);
        x
    }

    /// Iterates over the nodes in order, by following the thread.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            next: self.first,
            remaining: self.len,
        }
    }

    /// Lists the nodes in order, by walking the tree structure.
    ///
    /// This is slower than [`Tree::iter`]; its purpose is to cross-check the thread.
    pub fn inorder(&self) -> Vec<NodeIdx> {
        let mut ret = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(idx) = cur {
                stack.push(idx);
                cur = self.node(idx).left;
            }
            let Some(idx) = stack.pop() else {
                break;
            };
            ret.push(idx);
            cur = self.node(idx).right;
        }
        ret
    }

    /// A snapshot of the tree's shape.
    pub fn shape(&self) -> Option<Shape> {
        self.root.map(|root| self.subtree_shape(root))
    }

    fn subtree_shape(&self, idx: NodeIdx) -> Shape {
        let node = self.node(idx);
        Shape {
            node: idx,
            height: node.height,
            left: node.left.map(|l| Box::new(self.subtree_shape(l))),
            right: node.right.map(|r| Box::new(self.subtree_shape(r))),
        }
    }

    /// Checks the structural invariants, panicking if any of them fail.
    ///
    /// These are: parent and child links agree, cached heights are correct,
    /// every node is AVL-balanced, and the thread visits the nodes in the
    /// same order as an inorder traversal.
    pub fn check_invariants(&self) {
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None, "root has a parent");
            self.check_subtree(root);
        }

        let inorder = self.inorder();
        assert_eq!(inorder.len(), self.len, "wrong node count");
        assert_eq!(self.first, inorder.first().copied());
        assert_eq!(self.last, inorder.last().copied());

        let threaded: Vec<_> = self.iter().map(|(idx, _)| idx).collect();
        assert_eq!(inorder, threaded, "thread disagrees with the tree order");

        for pair in inorder.windows(2) {
            assert_eq!(self.node(pair[0]).next, Some(pair[1]));
            assert_eq!(self.node(pair[1]).prev, Some(pair[0]));
        }
        if let Some(first) = self.first {
            assert_eq!(self.node(first).prev, None);
        }
        if let Some(last) = self.last {
            assert_eq!(self.node(last).next, None);
        }

        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.len, "leaked or double-freed slots");
    }

    // Returns the subtree's height.
    fn check_subtree(&self, idx: NodeIdx) -> i32 {
        let node = self.node(idx);
        let child_height = |child: Option<NodeIdx>| match child {
            Some(c) => {
                assert_eq!(self.node(c).parent, Some(idx), "bad parent link");
                self.check_subtree(c)
            }
            None => -1,
        };
        let hl = child_height(node.left);
        let hr = child_height(node.right);
        assert_eq!(node.height, 1 + hl.max(hr), "stale height at {idx:?}");
        assert!((hl - hr).abs() <= 1, "unbalanced at {idx:?}");
        node.height
    }
}

impl<T> std::ops::Index<NodeIdx> for Tree<T> {
    type Output = T;

    fn index(&self, index: NodeIdx) -> &T {
        &self.node(index).value
    }
}

impl<T> std::ops::IndexMut<NodeIdx> for Tree<T> {
    fn index_mut(&mut self, index: NodeIdx) -> &mut T {
        &mut self.node_mut(index).value
    }
}

/// An iterator over a [`Tree`] in inorder sequence.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeIdx>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeIdx, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.tree.node(idx);
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((idx, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn values<T: Clone>(tree: &Tree<T>) -> Vec<T> {
        tree.iter().map(|(_, v)| v.clone()).collect()
    }

    #[test]
    fn append_stays_balanced() {
        let mut tree = Tree::new();
        let mut last = tree.insert_root(0);
        for i in 1..100 {
            last = tree.insert_after(last, i);
            tree.check_invariants();
        }
        assert_eq!(values(&tree), (0..100).collect::<Vec<_>>());
        // 100 nodes fit in an AVL tree of height at most 1.44 log2(100).
        assert!(tree.height(tree.root().unwrap()) <= 9);
    }

    #[test]
    fn prepend_stays_balanced() {
        let mut tree = Tree::new();
        let mut first = tree.insert_root(0);
        for i in 1..100 {
            first = tree.insert_before(first, -i);
            tree.check_invariants();
        }
        assert_eq!(values(&tree), (-99..=0).collect::<Vec<_>>());
    }

    #[test]
    fn rotations() {
        // Inserting 0, 1, 2 in sequence forces a left rotation at the root.
        let mut tree = Tree::new();
        let a = tree.insert_root(0);
        let b = tree.insert_after(a, 1);
        let c = tree.insert_after(b, 2);
        tree.check_invariants();
        assert_eq!(tree.root(), Some(b));
        assert_eq!(tree.left(b), Some(a));
        assert_eq!(tree.right(b), Some(c));

        // Inserting between a leaf and its parent forces a double rotation.
        let mut tree = Tree::new();
        let a = tree.insert_root(0);
        let c = tree.insert_after(a, 2);
        let b = tree.insert_before(c, 1);
        tree.check_invariants();
        assert_eq!(tree.root(), Some(b));
        assert_eq!(values(&tree), vec![0, 1, 2]);
    }

    #[test]
    fn remove_keeps_other_handles() {
        let mut tree = Tree::new();
        let mut handles = vec![tree.insert_root(0)];
        for i in 1..20 {
            let h = tree.insert_after(*handles.last().unwrap(), i);
            handles.push(h);
        }

        // The root has two children, so its successor gets promoted.
        let root = tree.root().unwrap();
        let root_val = tree[root];
        assert_eq!(tree.remove(root), root_val);
        tree.check_invariants();
        assert!(!tree.contains(root));

        for (i, h) in handles.iter().enumerate() {
            if *h != root {
                assert_eq!(tree[*h], i as i32);
            }
        }
    }

    #[test]
    fn remove_everything() {
        let mut tree = Tree::new();
        let mut handles = vec![tree.insert_root(0)];
        for i in 1..32 {
            let h = tree.insert_after(handles[i - 1], i);
            handles.push(h);
        }
        for (i, h) in handles.into_iter().enumerate().rev() {
            assert_eq!(tree.remove(h), i);
            tree.check_invariants();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn slots_are_reused() {
        let mut tree = Tree::new();
        let a = tree.insert_root('a');
        let b = tree.insert_after(a, 'b');
        tree.remove(b);
        let c = tree.insert_after(a, 'c');
        assert_eq!(b, c);
        assert_eq!(tree.get(c), Some(&'c'));
        tree.check_invariants();
    }

    #[test]
    fn shape() {
        let mut tree = Tree::new();
        let a = tree.insert_root(0);
        let b = tree.insert_after(a, 1);
        let shape = tree.shape().unwrap();
        assert_eq!(shape.node, a);
        assert_eq!(shape.height, 1);
        assert_eq!(shape.left, None);
        assert_eq!(shape.right.unwrap().node, b);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Before(usize, i32),
        After(usize, i32),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Before(i, v)),
            (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::After(i, v)),
            any::<usize>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn matches_vec(ops in prop::collection::vec(op(), 1..200)) {
            let mut tree = Tree::new();
            let mut model: Vec<(NodeIdx, i32)> = Vec::new();

            for op in ops {
                if model.is_empty() {
                    let v = match op {
                        Op::Before(_, v) | Op::After(_, v) => v,
                        Op::Remove(_) => continue,
                    };
                    model.push((tree.insert_root(v), v));
                    continue;
                }

                match op {
                    Op::Before(i, v) => {
                        let i = i % model.len();
                        let idx = tree.insert_before(model[i].0, v);
                        model.insert(i, (idx, v));
                    }
                    Op::After(i, v) => {
                        let i = i % model.len();
                        let idx = tree.insert_after(model[i].0, v);
                        model.insert(i + 1, (idx, v));
                    }
                    Op::Remove(i) => {
                        let i = i % model.len();
                        let (idx, v) = model.remove(i);
                        prop_assert_eq!(tree.remove(idx), v);
                    }
                }

                tree.check_invariants();
                prop_assert_eq!(tree.iter().map(|(i, v)| (i, *v)).collect::<Vec<_>>(), model.clone());
                for &(idx, _) in &model {
                    prop_assert_eq!(tree.successor(idx), tree.next(idx));
                    prop_assert_eq!(tree.predecessor(idx), tree.prev(idx));
                }
            }
        }
    }
}
