use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Ordered key/value map backing the index's serializable state.
///
/// An unbalanced binary search tree of boxed nodes. At most one entry per
/// key; inserting an existing key overwrites its value in place. Level-order
/// iteration is deterministic for a given map state, which the persistence
/// layer relies on.
pub struct OrderedMap<K, V> {
    root: Option<Box<Node<K, V>>>,
    len: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        OrderedMap { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `key` or overwrites the value of an existing entry. Returns
    /// the previous value when the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut cur = &mut self.root;
        loop {
            match cur {
                None => {
                    *cur = Some(Node::new(key, value));
                    self.len += 1;
                    return None;
                }
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Equal => {
                        return Some(std::mem::replace(&mut node.value, value));
                    }
                    Ordering::Less => cur = &mut node.left,
                    Ordering::Greater => cur = &mut node.right,
                },
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
        None
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
            }
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        // Tear down iteratively so a degenerate (list-shaped) tree cannot
        // overflow the stack through recursive Box drops.
        let mut pending = Vec::new();
        if let Some(root) = self.root.take() {
            pending.push(root);
        }
        while let Some(mut node) = pending.pop() {
            if let Some(left) = node.left.take() {
                pending.push(left);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
        }
        self.len = 0;
    }

    /// Begins a level-order traversal. Each call returns an independent
    /// iterator; any number may be active at once.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        Iter { queue }
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Some(root) = self.root.take() {
            pending.push(root);
        }
        while let Some(mut node) = pending.pop() {
            if let Some(left) = node.left.take() {
                pending.push(left);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
        }
    }
}

impl<K: Ord + Clone, V: Clone> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in self.iter() {
            map.insert(k.clone(), v.clone());
        }
        map
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Level-order traversal over an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    queue: VecDeque<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(left) = node.left.as_deref() {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right.as_deref() {
            self.queue.push_back(right);
        }
        Some((&node.key, &node.value))
    }
}
