//! A `u64`-keyed splay map.
//!
//! Same top-down splay as the piece tree, but ordered by key and without
//! size augmentation or parent links. Useful for side tables keyed by
//! something monotonic (buffer ids, revision numbers) where recent keys are
//! looked up again soon.
//!
//! Entries live densely in a `Vec`. Removing one moves the last entry into
//! the hole and repoints that entry's parent.

use std::cmp::Ordering;

use smallvec::SmallVec;

type Idx = u32;

#[derive(Clone, Debug)]
struct Entry<V> {
    key: u64,
    value: V,
    left: Option<Idx>,
    right: Option<Idx>,
}

#[derive(Clone, Debug)]
pub struct SplayMap<V> {
    entries: Vec<Entry<V>>,
    root: Option<Idx>,
}

impl<V> Default for SplayMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SplayMap<V> {
    pub fn new() -> SplayMap<V> {
        SplayMap {
            entries: Vec::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn at(&self, idx: Idx) -> &Entry<V> {
        &self.entries[idx as usize]
    }

    #[inline]
    fn at_mut(&mut self, idx: Idx) -> &mut Entry<V> {
        &mut self.entries[idx as usize]
    }

    /// Look up `key`, moving it (or its nearest neighbour) to the root.
    pub fn get(&mut self, key: u64) -> Option<&V> {
        let root = self.splay_root(key)?;
        let entry = self.at(root);
        if entry.key == key { Some(&entry.value) } else { None }
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        let root = self.splay_root(key)?;
        let entry = self.at_mut(root);
        if entry.key == key { Some(&mut entry.value) } else { None }
    }

    pub fn contains_key(&mut self, key: u64) -> bool {
        self.get(key).is_some()
    }

    /// Insert `key`. Returns `false` and leaves the map unchanged if the key
    /// is already present.
    pub fn insert(&mut self, key: u64, value: V) -> bool {
        let new = self.entries.len() as Idx;
        let mut entry = Entry {
            key,
            value,
            left: None,
            right: None,
        };

        if let Some(root) = self.splay_root(key) {
            match key.cmp(&self.at(root).key) {
                Ordering::Equal => return false,
                Ordering::Less => {
                    entry.left = self.at_mut(root).left.take();
                    entry.right = Some(root);
                }
                Ordering::Greater => {
                    entry.right = self.at_mut(root).right.take();
                    entry.left = Some(root);
                }
            }
        }

        self.entries.push(entry);
        self.root = Some(new);
        true
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let root = self.splay_root(key)?;
        if self.at(root).key != key {
            return None;
        }

        let (left, right) = {
            let entry = self.at(root);
            (entry.left, entry.right)
        };
        // Every key on the left is smaller, so splaying the left subtree for
        // `key` brings its maximum up, which has no right child.
        self.root = match left {
            None => right,
            Some(left) => {
                let top = self.splay(left, key);
                self.at_mut(top).right = right;
                Some(top)
            }
        };

        let last = (self.entries.len() - 1) as Idx;
        let removed = self.entries.swap_remove(root as usize);
        if root != last {
            self.repoint(last, root);
        }
        Some(removed.value)
    }

    /// The entry formerly at `from` now lives at `to`. Fix whichever link
    /// pointed at `from`.
    fn repoint(&mut self, from: Idx, to: Idx) {
        if self.root == Some(from) {
            self.root = Some(to);
            return;
        }
        let key = self.at(to).key;
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let entry = self.at_mut(idx);
            let slot = if key < entry.key { &mut entry.left } else { &mut entry.right };
            if *slot == Some(from) {
                *slot = Some(to);
                return;
            }
            cursor = *slot;
        }
    }

    /// Keys and values in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter {
            map: self,
            stack: SmallVec::new(),
        };
        iter.descend(self.root);
        iter
    }

    fn splay_root(&mut self, key: u64) -> Option<Idx> {
        let root = self.splay(self.root?, key);
        self.root = Some(root);
        Some(root)
    }

    /// Top-down splay of the subtree rooted at `t` for `key`. Returns the new
    /// subtree root: the entry holding `key`, or the last entry visited on
    /// the search path if it is absent.
    fn splay(&mut self, mut t: Idx, key: u64) -> Idx {
        // Roots of the trees collected right and left of the target.
        let mut right_tree: Option<Idx> = None;
        let mut left_tree: Option<Idx> = None;
        let mut l: Option<Idx> = None;
        let mut r: Option<Idx> = None;

        loop {
            let k = self.at(t).key;
            if key < k {
                let Some(child) = self.at(t).left else { break };
                if key < self.at(child).key {
                    let b = self.at(child).right;
                    self.at_mut(t).left = b;
                    self.at_mut(child).right = Some(t);
                    t = child;
                }
                let Some(next) = self.at(t).left else { break };
                match r {
                    None => right_tree = Some(t),
                    Some(r) => self.at_mut(r).left = Some(t),
                }
                r = Some(t);
                t = next;
            } else if key > k {
                let Some(child) = self.at(t).right else { break };
                if key > self.at(child).key {
                    let b = self.at(child).left;
                    self.at_mut(t).right = b;
                    self.at_mut(child).left = Some(t);
                    t = child;
                }
                let Some(next) = self.at(t).right else { break };
                match l {
                    None => left_tree = Some(t),
                    Some(l) => self.at_mut(l).right = Some(t),
                }
                l = Some(t);
                t = next;
            } else {
                break;
            }
        }

        let (inner_left, inner_right) = {
            let entry = self.at(t);
            (entry.left, entry.right)
        };
        match l {
            None => left_tree = inner_left,
            Some(l) => self.at_mut(l).right = inner_left,
        }
        match r {
            None => right_tree = inner_right,
            Some(r) => self.at_mut(r).left = inner_right,
        }
        let entry = self.at_mut(t);
        entry.left = left_tree;
        entry.right = right_tree;
        t
    }
}

/// In-order iterator over a [`SplayMap`].
pub struct Iter<'a, V> {
    map: &'a SplayMap<V>,
    stack: SmallVec<[Idx; 32]>,
}

impl<'a, V> Iter<'a, V> {
    fn descend(&mut self, mut idx: Option<Idx>) {
        while let Some(i) = idx {
            self.stack.push(i);
            idx = self.map.at(i).left;
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let map = self.map;
        let entry = map.at(idx);
        self.descend(entry.right);
        Some((entry.key, &entry.value))
    }
}
