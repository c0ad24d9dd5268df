//! Multi-subscriber broadcast channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    handler: Handler<T>,
    once: bool,
}

struct ChannelInner<T> {
    subscribers: Mutex<Vec<Subscriber<T>>>,
    next_id: AtomicU64,
}

/// A fire-and-forget broadcast channel.
///
/// Publishing invokes every live subscriber synchronously with a
/// reference to the payload. Nothing is buffered: a subscriber
/// registered after a publish never sees that publish.
///
/// # Example
///
/// ```
/// use medigrid_ui::mediator::Channel;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let channel: Channel<i64> = Channel::new();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counted = Arc::clone(&hits);
/// let subscription = channel.subscribe(move |_| {
///     counted.fetch_add(1, Ordering::SeqCst);
/// });
///
/// channel.publish(&7);
/// drop(subscription);
/// channel.publish(&8);
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct Channel<T> {
    inner: Arc<ChannelInner<T>>,
}

impl<T: 'static> Channel<T> {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Publish a payload to every live subscriber.
    ///
    /// One-shot subscribers are retired under the lock before any
    /// handler runs, so a handler that publishes again cannot re-enter
    /// them.
    pub fn publish(&self, payload: &T) {
        let handlers: Vec<Handler<T>> = {
            let Ok(mut subscribers) = self.inner.subscribers.lock() else {
                return;
            };
            let handlers = subscribers.iter().map(|s| Arc::clone(&s.handler)).collect();
            subscribers.retain(|s| !s.once);
            handlers
        };
        for handler in handlers {
            handler(payload);
        }
    }

    /// Subscribe to every publish. The returned token unsubscribes on
    /// drop.
    pub fn subscribe(&self, handler: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.register(Arc::new(handler), false)
    }

    /// Subscribe to exactly the first publish after registration.
    pub fn subscribe_once(&self, handler: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.register(Arc::new(handler), true)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }

    fn register(&self, handler: Handler<T>, once: bool) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut subscribers) = self.inner.subscribers.lock() {
            subscribers.push(Subscriber { id, handler, once });
        }

        let weak: Weak<ChannelInner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade()
                    && let Ok(mut subscribers) = inner.subscribers.lock()
                {
                    subscribers.retain(|s| s.id != id);
                }
            })),
        }
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Disposer token for a channel subscription.
///
/// Dropping the token removes the subscriber. Call [`detach`] to keep
/// the subscription alive for the channel's lifetime instead.
///
/// [`detach`]: Subscription::detach
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Keep the subscription alive without holding the token.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
