use std::sync::{Arc, RwLock};

/// Shared state slot with interior mutability.
///
/// `Shared<T>` is an `Arc<RwLock<T>>` wrapper, cheap to clone and safe to
/// hand across async task boundaries. The mediator uses it for the one
/// piece of cross-component state that is not routed through a channel
/// (the checkbox selection slot).
///
/// # Example
///
/// ```
/// use medigrid_ui::shared::Shared;
///
/// let slot: Shared<Vec<i64>> = Shared::default();
/// slot.set(vec![1, 2]);
/// slot.update(|ids| ids.push(3));
/// assert_eq!(slot.get(), vec![1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    /// Create a new shared slot with the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Set a new value.
    pub fn set(&self, value: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = value;
        }
    }

    /// Update the value using a closure.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
        }
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
