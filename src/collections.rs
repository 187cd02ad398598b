use std::hash::BuildHasherDefault;
use indexmap::IndexMap;
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;


/// Binary heap with a pluggable ordering predicate
///
/// The predicate decides which of two elements outranks the other: if
/// `pred(a, b)` is true, `a` belongs closer to the top of the heap than `b`.
/// A `|a, b| a < b` predicate therefore gives a min-heap.
///
/// Heap arithmetic is 1-indexed (parent = i/2, children = 2i and 2i+1);
/// storage stays 0-indexed internally.
///
/// Beyond the usual push/pop, the queue supports `replace`, which locates an
/// element by equality and overwrites it in place, re-sifting in whichever
/// direction the new value demands. The lookup is a linear scan over the
/// heap, which is acceptable here because replaces are rare compared to
/// pushes; see the module docs on decrease-key in `grid_algos::pathfinder`.
pub struct PriorityQueue<T> {
    items: Vec<T>,
    pred: fn(&T, &T) -> bool,
}

impl<T: PartialEq> PriorityQueue<T> {

    /// Empty queue ordered by `pred`
    pub fn new(pred: fn(&T, &T) -> bool) -> Self {
        Self { items: Vec::new(), pred }
    }

    /// Build a queue from existing elements, heapifying them under `pred`
    pub fn with_items(items: Vec<T>, pred: fn(&T, &T) -> bool) -> Self {
        let mut q = Self { items, pred };
        q.heapify();
        q
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all elements, keeping the predicate
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Swap in a new ordering predicate
    ///
    /// The predicate cannot be changed in place: every parent/child relation
    /// may now be wrong, so the whole heap is rebuilt.
    pub fn set_pred(&mut self, pred: fn(&T, &T) -> bool) {
        self.pred = pred;
        self.heapify();
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.swim(self.items.len());
    }

    /// Reference to the top element
    ///
    /// Precondition: the queue is non-empty. Callers check `is_empty` first;
    /// peeking an empty queue is a bug, not a recoverable condition.
    pub fn top(&self) -> &T {
        assert!(!self.is_empty(), "top() on an empty queue");
        &self.items[0]
    }

    /// Remove the top element without returning it
    pub fn pop(&mut self) {
        self.pop_and_get();
    }

    /// Remove and return the top element
    ///
    /// Same precondition as `top`.
    pub fn pop_and_get(&mut self) -> T {
        assert!(!self.is_empty(), "pop on an empty queue");
        let last = self.items.len();
        self.items.swap(0, last - 1);
        let top = self.items.pop().unwrap();
        self.sink(1);
        top
    }

    /// True if an element equal to `item` is on the heap
    pub fn contains(&self, item: &T) -> bool {
        self.search(item, 1) != 0
    }

    /// Overwrite the element equal to `old` with `new`
    ///
    /// Returns false if no such element exists. The new value may rank
    /// better or worse than the old one, so the slot is sifted both ways.
    pub fn replace(&mut self, old: &T, new: T) -> bool {
        let n = self.search(old, 1);
        if n == 0 {
            return false;
        }
        self.items[n - 1] = new;
        self.swim(n);
        self.sink(n);
        true
    }

    /// Recursive subtree search for `item`, starting at 1-indexed slot `n`.
    /// Returns the slot, or 0 if the subtree does not contain it.
    fn search(&self, item: &T, n: usize) -> usize {
        if n > self.items.len() {
            return 0;
        }
        if self.items[n - 1] == *item {
            return n;
        }
        let left = self.search(item, 2 * n);
        if left != 0 {
            return left;
        }
        self.search(item, 2 * n + 1)
    }

    /// Check whether slot `n` is fine where it is, i.e. the predicate holds
    /// between it and both children. If not, returns the child it has to be
    /// swapped with; if so, returns `n` itself.
    fn fine(&self, n: usize) -> usize {
        let len = self.items.len();
        let left = 2 * n;
        if left > len {
            return n;
        }
        let mut best = left;
        let right = left + 1;
        if right <= len && (self.pred)(&self.items[right - 1], &self.items[left - 1]) {
            best = right;
        }
        if (self.pred)(&self.items[best - 1], &self.items[n - 1]) {
            best
        } else {
            n
        }
    }

    /// Sift slot `n` down until it is fine
    fn sink(&mut self, mut n: usize) {
        loop {
            let m = self.fine(n);
            if m == n {
                break;
            }
            self.items.swap(n - 1, m - 1);
            n = m;
        }
    }

    /// Sift slot `n` up while it outranks its parent
    fn swim(&mut self, mut n: usize) {
        while n > 1 && (self.pred)(&self.items[n - 1], &self.items[n / 2 - 1]) {
            self.items.swap(n - 1, n / 2 - 1);
            n /= 2;
        }
    }

    /// Rebuild heap order from scratch
    fn heapify(&mut self) {
        for n in (1..=self.items.len() / 2).rev() {
            self.sink(n);
        }
    }
}
