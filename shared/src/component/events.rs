use std::collections::VecDeque;

/// A queue of observer-side effects, filled by a module's `read` and drained
/// by whatever presents them (HUD, audio, particles)
pub struct Events<E> {
    queue: VecDeque<E>,
}

impl<E> Events<E> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: E) {
        self.queue.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.queue.iter()
    }
}

impl<E> Default for Events<E> {
    fn default() -> Self {
        Self::new()
    }
}
