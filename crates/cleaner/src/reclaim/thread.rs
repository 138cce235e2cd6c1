//! The calling thread as an observable resource.
//!
//! Each thread lazily owns a sentinel in thread-local storage. The sentinel
//! drops while the thread's thread-local destructors run, i.e. after the
//! thread body has returned and nothing can reach the thread any more.
//! The main thread's destructors may never run before the process exits.

use super::sentinel::Sentinel;
use super::{Observable, SentinelRef};
use reaper_core::{Error, Result};
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static THREAD_SENTINEL: Arc<Sentinel> = Sentinel::new();
}

/// Handle to the thread that created it
#[derive(Debug)]
pub struct CurrentThread {
    // Tied to the creating thread
    _not_send: PhantomData<*const ()>,
}

/// Observe the calling thread
pub fn current_thread() -> CurrentThread {
    CurrentThread {
        _not_send: PhantomData,
    }
}

impl Observable for CurrentThread {
    fn sentinel(&self) -> Result<SentinelRef<'_>> {
        THREAD_SENTINEL
            .try_with(|sentinel| SentinelRef::pinned(Arc::clone(sentinel)))
            .map_err(|_| Error::ThreadExiting)
    }
}
