//! An ordered map backed by an unbalanced Binary Search Tree. Every `Node` owns its children
//! through a `Box` so dropping the map drops the whole tree.
//!
//! # Examples
//!
//! ```
//! use treemap::{Error, TreeMap};
//!
//! let mut map = TreeMap::new();
//!
//! // Nothing in here yet.
//! assert!(map.is_empty());
//! assert_eq!(map.get(&1), Err(Error::KeyNotFound));
//!
//! map.insert(1, 2).unwrap();
//! assert_eq!(map.get(&1), Ok(&2));
//!
//! // Keys are unique. Inserting an existing key doesn't overwrite its value.
//! assert_eq!(map.insert(1, 3), Err(Error::DuplicateKey));
//! assert_eq!(map.get(&1), Ok(&2));
//!
//! // Removing a key hands back its value.
//! assert_eq!(map.remove(&1), Ok(2));
//! assert_eq!(map.remove(&1), Err(Error::EmptyTree));
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// An ordered map from `K` to `V` stored in a Binary Search Tree. Keys are unique and kept in
/// sorted order which allows floor and ceiling lookups.
///
/// The tree never rebalances. Lookups, inserts, and removals take `O(height)` which is
/// `O(lg N)` for random insertion orders and `O(N)` for sorted ones.
pub struct TreeMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for TreeMap<K, V> {
    fn drop(&mut self) {
        // Nodes are released from an explicit stack. A degenerate tree is as deep as it is long
        // and recursing through `Box`'s drop would overflow on it.
        let mut stack: Vec<Box<Node<K, V>>> = self.root.0.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.0.take());
            stack.extend(node.right.0.take());
        }
    }
}

impl<K, V> Clone for TreeMap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        // Work left on a source node. Both of a node's children are built before the node.
        enum Step<'a, K, V> {
            Visit(&'a Node<K, V>),
            Build(&'a Node<K, V>),
        }

        let mut steps: Vec<Step<'_, K, V>> =
            self.root.root().map(Step::Visit).into_iter().collect();
        let mut built: Vec<Box<Node<K, V>>> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(node) => {
                    steps.push(Step::Build(node));
                    steps.extend(node.right().map(Step::Visit));
                    steps.extend(node.left().map(Step::Visit));
                }
                Step::Build(node) => {
                    // The left subtree was visited first so its copy sits below the right one.
                    let right = node.right().and_then(|_| built.pop());
                    let left = node.left().and_then(|_| built.pop());
                    built.push(Box::new(Node {
                        key: node.key.clone(),
                        value: node.value.clone(),
                        left: Link(left),
                        right: Link(right),
                    }));
                }
            }
        }

        Self {
            root: Link(built.pop()),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for TreeMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(InOrder::new(&self.root).map(|n| (&n.key, &n.value)))
            .finish()
    }
}

impl<K, V> TreeMap<K, V> {
    /// Generates a new, empty `TreeMap`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels on the longest path from the root to a leaf. An empty map
    /// has a height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// for key in 0..5 {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// // Sorted inserts build a tree shaped like a linked list.
    /// assert_eq!(map.height(), 5);
    /// ```
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Inserts the given value into the map stored at the given key.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if the map already has an entry for `key`. The existing value is
    /// kept; [`remove`][Self::remove] it first to replace it.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    ///
    /// assert_eq!(map.insert(23, 'A'), Ok(()));
    /// assert_eq!(map.insert(23, 'B'), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&23), Ok(&'A'));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()>
    where
        K: Ord,
    {
        self.root.insert(key, value).map_err(|err| {
            debug!(len = self.len, %err, "insert rejected");
            err
        })?;

        self.len += 1;
        trace!(len = self.len, "inserted key");
        Ok(())
    }

    /// Removes the entry for the given key from the map and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the map has no entries and [`Error::KeyNotFound`] if it has
    /// entries but none for `key`. The map is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(60, 'A').unwrap();
    /// map.insert(42, 'B').unwrap();
    ///
    /// assert_eq!(map.remove(&60), Ok('A'));
    /// assert_eq!(map.remove(&60), Err(Error::KeyNotFound));
    /// assert_eq!(map.remove(&42), Ok('B'));
    /// assert_eq!(map.remove(&42), Err(Error::EmptyTree));
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        if self.is_empty() {
            debug!("remove on an empty map");
            return Err(Error::EmptyTree);
        }

        let value = self.root.remove(key).map_err(|err| {
            debug!(len = self.len, %err, "remove rejected");
            err
        })?;

        self.len -= 1;
        trace!(len = self.len, "removed key");
        Ok(value)
    }

    /// Returns the value stored at the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the map has no entry for `key`, including when it is empty.
    pub fn get(&self, key: &K) -> Result<&V>
    where
        K: Ord,
    {
        self.root.find(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the greatest key in the map less than or equal to the given key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the map has no entries and [`Error::KeyOutOfRange`] if every key
    /// in the map is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// for key in [60, 30, 55, 35, 74, 56, 90, 88] {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(map.floor_key(&89), Ok(&88));
    /// assert_eq!(map.floor_key(&74), Ok(&74));
    /// assert_eq!(map.floor_key(&20), Err(Error::KeyOutOfRange));
    /// ```
    pub fn floor_key(&self, key: &K) -> Result<&K>
    where
        K: Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        self.root.floor(key).ok_or(Error::KeyOutOfRange)
    }

    /// Returns the least key in the map greater than or equal to the given key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the map has no entries and [`Error::KeyOutOfRange`] if every key
    /// in the map is less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// for key in [60, 30, 55, 35, 74, 56, 90, 88] {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(map.ceil_key(&89), Ok(&90));
    /// assert_eq!(map.ceil_key(&25), Ok(&30));
    /// assert_eq!(map.ceil_key(&95), Err(Error::KeyOutOfRange));
    /// ```
    pub fn ceil_key(&self, key: &K) -> Result<&K>
    where
        K: Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        self.root.ceil(key).ok_or(Error::KeyOutOfRange)
    }

    /// Returns `true` if the map has an entry for the given key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.root.find(key).is_some()
    }

    /// Returns `true` if any entry in the map holds the given value. Values aren't ordered so
    /// this visits every node.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        InOrder::new(&self.root).any(|n| n.value == *value)
    }

    /// Returns the smallest key in the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the map has no entries.
    pub fn min_key(&self) -> Result<&K> {
        self.root.min().ok_or(Error::EmptyTree)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the map has no entries.
    pub fn max_key(&self) -> Result<&K> {
        self.root.max().ok_or(Error::EmptyTree)
    }
}

/// The owning pointer from a parent (or the map) to a subtree. Empty at the bottom of the tree.
///
/// Every walk over links is a loop rather than a recursion: without rebalancing, a tree can be as
/// deep as it is long.
struct Link<K, V>(Option<Box<Node<K, V>>>);

impl<K, V> Link<K, V> {
    fn root(&self) -> Option<&Node<K, V>> {
        self.0.as_deref()
    }

    fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> =
            self.root().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    fn insert(&mut self, key: K, value: V) -> Result<()>
    where
        K: Ord,
    {
        let mut link = &mut self.0;
        while let Some(node) = link {
            if cfg!(debug_assertions) {
                node.assert_ordered();
            }
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left.0,
                Ordering::Equal => return Err(Error::DuplicateKey),
                Ordering::Greater => &mut node.right.0,
            };
        }

        *link = Some(Node::new_boxed(key, value));
        Ok(())
    }

    /// Removes the node holding `key` from this subtree and returns its value. Reaching the
    /// bottom of the tree means the key isn't stored anywhere on the search path.
    fn remove(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        let mut link = &mut self.0;
        loop {
            match link.as_deref() {
                Some(node) if *key < node.key => link = &mut link.as_mut().unwrap().left.0,
                Some(node) if *key > node.key => link = &mut link.as_mut().unwrap().right.0,
                _ => break,
            }
        }

        let node = link.take().ok_or(Error::KeyNotFound)?;
        let (value, replacement) = node.unlink();
        *link = replacement.0;
        Ok(value)
    }

    /// Detaches the node with the smallest key in this subtree. That node has no left child so
    /// its right child takes its place.
    fn take_min(&mut self) -> Option<Box<Node<K, V>>> {
        let mut link = &mut self.0;
        loop {
            match link.as_deref() {
                Some(node) if node.left.0.is_some() => link = &mut link.as_mut().unwrap().left.0,
                _ => break,
            }
        }

        let mut min = link.take()?;
        *link = min.right.0.take();
        Some(min)
    }

    fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    fn floor(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut current = self.root();
        let mut candidate = None;
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.key),
                // This key is a floor but the right subtree may hold a closer one.
                Ordering::Greater => {
                    candidate = Some(&node.key);
                    node.right()
                }
            };
        }
        candidate
    }

    fn ceil(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut current = self.root();
        let mut candidate = None;
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => {
                    candidate = Some(&node.key);
                    node.left()
                }
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => node.right(),
            };
        }
        candidate
    }

    fn min(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.key)
    }

    fn max(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }
}

/// A `Node` has a key that is used for searching/sorting and a value that is associated with
/// that key. Either child may be empty.
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: Link(None),
            right: Link(None),
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.root()
    }

    fn right(&self) -> Option<&Self> {
        self.right.root()
    }

    fn assert_ordered(&self)
    where
        K: Ord,
    {
        if let Some(left) = self.left() {
            assert!(self.key > left.key);
        }
        if let Some(right) = self.right() {
            assert!(self.key < right.key);
        }
    }

    /// Consumes this node and returns its value along with the subtree that replaces it.
    ///
    /// With one child (or none), that child is promoted. With two children, this node's
    /// in-order successor is detached from the right subtree and its key and value move in here.
    fn unlink(mut self: Box<Self>) -> (V, Link<K, V>) {
        if self.left.0.is_some() {
            if let Some(successor) = self.right.take_min() {
                let Node { key, value, .. } = *successor;
                self.key = key;
                let removed = std::mem::replace(&mut self.value, value);
                return (removed, Link(Some(self)));
            }
        }

        let Node {
            value, left, right, ..
        } = *self;
        (value, Link(left.0.or(right.0)))
    }
}

/// Walks the nodes of a subtree in key order, keeping the path still to visit on the heap.
struct InOrder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> InOrder<'a, K, V> {
    fn new(link: &'a Link<K, V>) -> Self {
        let mut in_order = Self { stack: Vec::new() };
        in_order.push_left_spine(link.root());
        in_order
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

#[cfg(test)]
impl<K, V> TreeMap<K, V> {
    /// Collects the keys in order.
    fn keys(&self) -> Vec<&K> {
        InOrder::new(&self.root).map(|n| &n.key).collect()
    }
}
