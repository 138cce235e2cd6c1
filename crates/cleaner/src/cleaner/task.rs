use std::fmt;

/// A cleanup action: runs once, takes nothing, returns nothing
pub struct CleanupTask(Box<dyn FnOnce() + Send + 'static>);

impl CleanupTask {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Box::new(f))
    }

    pub(crate) fn run(self) {
        (self.0)();
    }
}

impl<F> From<F> for CleanupTask
where
    F: FnOnce() + Send + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for CleanupTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CleanupTask")
    }
}
