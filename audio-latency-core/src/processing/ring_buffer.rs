/// Smallest backing allocation once the buffer first grows.
const MIN_CAPACITY: usize = 1024;

/// Growable circular FIFO of mono `f32` samples.
///
/// Appends go to the back, reads and drops happen at the front. Unlike a
/// fixed-size ring it never overwrites: storage doubles when an append would
/// not fit, and bounding the history is the owner's job (see
/// `CaptureHook::prune`).
///
/// No internal locking. `CaptureHook` keeps it behind a
/// `parking_lot::Mutex` together with its trailing timestamp.
#[derive(Debug, Default)]
pub struct RingBuffer {
    buffer: Vec<f32>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append samples at the back, growing the backing storage if needed.
    pub fn append(&mut self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }

        self.reserve(samples.len());

        let capacity = self.buffer.len();
        let tail = (self.head + self.len) % capacity;
        let first = samples.len().min(capacity - tail);
        self.buffer[tail..tail + first].copy_from_slice(&samples[..first]);
        self.buffer[..samples.len() - first].copy_from_slice(&samples[first..]);
        self.len += samples.len();
    }

    /// Copy the `dest.len()` oldest samples into `dest` without removing them.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is longer than [`len`](Self::len).
    pub fn peek_front_into(&self, dest: &mut [f32]) {
        let count = dest.len();
        assert!(
            count <= self.len,
            "peek of {} samples exceeds buffered length {}",
            count,
            self.len
        );
        if count == 0 {
            return;
        }

        let capacity = self.buffer.len();
        let first = count.min(capacity - self.head);
        dest[..first].copy_from_slice(&self.buffer[self.head..self.head + first]);
        dest[first..].copy_from_slice(&self.buffer[..count - first]);
    }

    /// Return a copy of the `count` oldest samples, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`len`](Self::len).
    pub fn peek_front(&self, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        self.peek_front_into(&mut out);
        out
    }

    /// Remove the `count` oldest samples. Capacity is kept for reuse.
    pub fn drop_front(&mut self, count: usize) {
        if count >= self.len {
            self.clear();
            return;
        }
        self.head = (self.head + count) % self.buffer.len();
        self.len -= count;
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Samples the buffer can hold before it has to grow again.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    fn reserve(&mut self, additional: usize) {
        let required = self.len + additional;
        if required <= self.buffer.len() {
            return;
        }

        let new_capacity = required.next_power_of_two().max(MIN_CAPACITY);
        let mut grown = vec![0.0; new_capacity];
        self.peek_front_into(&mut grown[..self.len]);
        self.buffer = grown;
        self.head = 0;
    }
}
