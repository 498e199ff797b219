use core::cmp::Ordering;

/// Priority container that always yields its minimum under an injected comparator.
///
/// Items that compare equal come out in insertion order. Nothing is deduplicated: two equal
/// items are two entries.
pub struct OrderingQueue<T, C> {
    // Sorted descending so the minimum sits at the tail.
    items: Vec<T>,
    compare: C,
}

impl<T, C> OrderingQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: C) -> Self {
        Self {
            items: Vec::new(),
            compare,
        }
    }

    pub fn insert(&mut self, item: T) {
        // Ahead of every equal item, so older equals stay closer to the tail.
        let at = self
            .items
            .partition_point(|queued| (self.compare)(queued, &item) == Ordering::Greater);
        self.items.insert(at, item);
    }

    pub fn remove_min(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
