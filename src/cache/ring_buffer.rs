use std::collections::VecDeque;

/// FIFO queue that hands out a stable position for every pushed element.
///
/// Removing an element with [RingBuffer::remove] leaves a hole in place. Holes at the front are
/// dropped by [RingBuffer::pop_front], holes elsewhere stay until [RingBuffer::compact] squeezes
/// them out. The queue starts empty and only grows as elements are pushed.
#[derive(Debug)]
pub(crate) struct RingBuffer<T> {
    /// Position of the front slot.
    offset: u64,
    live: usize,
    slots: VecDeque<Option<T>>,
}

impl<T> RingBuffer<T> {
    pub(crate) fn new() -> RingBuffer<T> {
        RingBuffer {
            offset: 0,
            live: 0,
            slots: VecDeque::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of elements, not counting holes.
    #[cfg(test)]
    pub(crate) fn live_len(&self) -> usize {
        self.live
    }

    /// Number of slots in use, holes included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` once there are more holes than elements.
    pub(crate) fn needs_compaction(&self) -> bool {
        self.slots.len() - self.live > self.live
    }

    #[cfg(test)]
    pub(crate) fn get(&self, position: u64) -> Option<&T> {
        let index = self.index_of(position)?;
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Adds an item to the back of the queue and returns its position.
    pub(crate) fn push_back(&mut self, value: T) -> u64 {
        let position = self.offset + self.slots.len() as u64;
        self.slots.push_back(Some(value));
        self.live += 1;
        position
    }

    /// Pops the oldest element, skipping holes.
    ///
    /// If the queue is empty, [None] is returned.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        while let Some(slot) = self.slots.pop_front() {
            self.offset += 1;

            if let item @ Some(_) = slot {
                self.live -= 1;
                return item;
            }
        }

        None
    }

    /// Removes the element at `position` and leaves a hole behind.
    ///
    /// Returns [None] if the position is out of range or already a hole.
    pub(crate) fn remove(&mut self, position: u64) -> Option<T> {
        let index = self.index_of(position)?;
        let item = self.slots.get_mut(index)?.take();
        if item.is_some() {
            self.live -= 1;
        }
        item
    }

    /// Drops every hole, keeping the elements oldest first.
    ///
    /// Positions handed out before compaction are invalidated. Use [RingBuffer::iter] to learn the
    /// new ones.
    pub(crate) fn compact(&mut self) {
        self.slots.retain(Option::is_some);

        // don't hold on to the memory of a burst of holes
        if self.slots.capacity() > 4 * self.slots.len() {
            self.slots.shrink_to(2 * self.slots.len());
        }
    }

    /// Iterates over the elements from oldest to newest together with their position.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u64, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| {
                slot.as_ref()
                    .map(|item| (self.offset + index as u64, item))
            })
    }

    fn index_of(&self, position: u64) -> Option<usize> {
        let index = position.checked_sub(self.offset)?;
        usize::try_from(index).ok()
    }
}
