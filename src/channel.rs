//! Bounded event queues for `no_std` environments.
//!
//! Collaborators that used to deliver through callbacks (Wi-Fi events,
//! inbound MQTT messages, firmware-update progress) push into a [`Queue`]
//! instead; the controller drains it once per tick. The queue is backed by
//! `heapless::Deque` and guarded by `critical-section`, so it can be fed
//! from interrupt context or a driver callback.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when pushing into a full queue. Carries the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// A bounded, interrupt-safe FIFO queue.
pub struct Queue<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Queue<T, SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle. Any number may coexist.
    pub const fn sender(&self) -> QueueSender<'_, T, SIZE> {
        QueueSender { queue: self }
    }

    /// Consumer handle. The controller keeps exactly one per queue.
    pub const fn receiver(&self) -> QueueReceiver<'_, T, SIZE> {
        QueueReceiver { queue: self }
    }

    /// Append a value, or hand it back if the queue is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Take the oldest value, if any.
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued values.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Queue<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`Queue`].
pub struct QueueSender<'a, T, const SIZE: usize> {
    queue: &'a Queue<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for QueueSender<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for QueueSender<'_, T, SIZE> {}

impl<T, const SIZE: usize> QueueSender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.queue.try_send(value)
    }
}

/// Consumer side of a [`Queue`].
pub struct QueueReceiver<'a, T, const SIZE: usize> {
    queue: &'a Queue<T, SIZE>,
}

impl<T, const SIZE: usize> QueueReceiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.queue.try_receive()
    }

    /// Iterate over everything queued right now.
    ///
    /// Values pushed while the iterator is alive are yielded too, so a
    /// producer that refills from inside the loop body keeps it going.
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        core::iter::from_fn(|| self.queue.try_receive())
    }
}
