//! Notification channel fed by sentinels when their resource is reclaimed

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Unbounded FIFO queue of tokens whose observed resource has been reclaimed.
///
/// Cloning the queue yields another handle to the same channel.
#[derive(Debug)]
pub struct ReferenceQueue<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Clone for ReferenceQueue<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T> Default for ReferenceQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReferenceQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        let (sender, receiver) = channel::unbounded();
        Self { sender, receiver }
    }

    /// Deliver a token. Never blocks.
    pub(crate) fn enqueue(&self, token: T) {
        // The queue owns a receiver, so the channel cannot be disconnected here
        let _ = self.sender.send(token);
    }

    /// Block until a token is delivered
    #[cfg(test)]
    pub(crate) fn remove(&self) -> T {
        loop {
            if let Ok(token) = self.receiver.recv() {
                return token;
            }
        }
    }

    /// Wait at most `timeout` for a token.
    ///
    /// `None` means the wait ended without a delivery; callers wait again.
    pub fn remove_timeout(&self, timeout: Duration) -> Option<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(token) => Some(token),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Take a token if one is already waiting
    #[cfg(test)]
    pub(crate) fn poll(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Number of delivered tokens not yet removed
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
