//! Lazy enumeration of set partitions.
//!
//! Partitions are built with the insert-or-new-block construction: the
//! `k`-th item either joins one of the blocks of a partition of the first
//! `k - 1` items, or opens a new block on its own. Every partition of `k`
//! items arises exactly once, so the generator emits `Bell(k)` partitions.
//!
//! Instead of recursion the generator keeps an explicit work stack of
//! partial partitions, so partitions are produced on demand.

/// Iterator over all partitions of a sequence into non-empty blocks.
///
/// Emission order is deterministic for a given input.
#[derive(Debug, Clone)]
pub struct Partitions<T> {
    items: Vec<T>,
    /// Partial partitions and the index of the next item to place.
    stack: Vec<(Vec<Vec<T>>, usize)>,
}

impl<T: Clone> Partitions<T> {
    /// Create a generator over the partitions of `items`.
    ///
    /// An empty input yields no partitions.
    pub fn new(items: Vec<T>) -> Self {
        let stack = match items.first() {
            Some(first) => vec![(vec![vec![first.clone()]], 1)],
            None => Vec::new(),
        };
        Self { items, stack }
    }
}

impl<T: Clone> Iterator for Partitions<T> {
    type Item = Vec<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((blocks, next)) = self.stack.pop() {
            let Some(item) = self.items.get(next) else {
                return Some(blocks);
            };

            // Pushed in reverse so insertions come out before the new block.
            let mut alone = blocks.clone();
            alone.push(vec![item.clone()]);
            self.stack.push((alone, next + 1));

            for i in (0..blocks.len()).rev() {
                let mut joined = blocks.clone();
                joined[i].push(item.clone());
                self.stack.push((joined, next + 1));
            }
        }
        None
    }
}

/// All partitions of `items`, produced lazily.
pub fn partitions<T: Clone>(items: &[T]) -> Partitions<T> {
    Partitions::new(items.to_vec())
}

/// Bell number `B(n)`: the number of partitions of an `n`-element set.
///
/// Computed with the Bell triangle. Returns `None` on `u128` overflow.
pub fn bell_number(n: usize) -> Option<u128> {
    let mut row: Vec<u128> = vec![1];
    for _ in 0..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(*row.last()?);
        for &v in &row {
            let prev = *next.last()?;
            next.push(prev.checked_add(v)?);
        }
        row = next;
    }
    row.first().copied()
}
