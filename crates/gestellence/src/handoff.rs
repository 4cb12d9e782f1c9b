//! Single-slot "latest value wins" handoff between threads.
//!
//! Hand trackers typically deliver results asynchronously (eg. from a callback on an inference
//! thread), while the display loop runs at its own pace. [`latest`] connects the two: the producer
//! publishes every result it has, the consumer picks up whatever is newest when it gets around to
//! it, and results that were superseded before being picked up are dropped.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use thiserror::Error;

/// Creates a connected [`Publisher`] and [`Latest`] pair.
pub fn latest<T>() -> (Publisher<T>, Latest<T>) {
    let (sender, recv) = crossbeam_channel::bounded(1);
    let dropped = Arc::new(AtomicU64::new(0));
    (
        Publisher {
            sender,
            drain: recv.clone(),
            dropped: dropped.clone(),
        },
        Latest { recv, dropped },
    )
}

/// Error returned by [`Latest::wait`] when every [`Publisher`] is gone and no value is pending.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("all publishers have been dropped")]
pub struct Disconnected;

/// The sending half of a [`latest`] handoff.
pub struct Publisher<T> {
    sender: Sender<T>,
    /// Used to evict a pending value that nobody picked up yet.
    drain: Receiver<T>,
    dropped: Arc<AtomicU64>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            drain: self.drain.clone(),
            dropped: self.dropped.clone(),
        }
    }
}

impl<T> Publisher<T> {
    /// Publishes `value`, replacing any value that has not been consumed yet.
    ///
    /// This never blocks. Once the [`Latest`] has been dropped, published values go nowhere: they
    /// are silently discarded, and no error is reported.
    pub fn publish(&self, mut value: T) {
        loop {
            match self.sender.try_send(value) {
                Ok(()) => return,
                Err(TrySendError::Full(v)) => {
                    value = v;
                    if self.drain.try_recv().is_ok() {
                        let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                        log::trace!("replaced unconsumed value ({n} dropped so far)");
                    }
                }
                // We hold a receiver ourselves, so the channel can't be disconnected.
                Err(TrySendError::Disconnected(_)) => unreachable!(),
            }
        }
    }
}

/// The receiving half of a [`latest`] handoff.
pub struct Latest<T> {
    recv: Receiver<T>,
    dropped: Arc<AtomicU64>,
}

impl<T> Latest<T> {
    /// Takes the pending value, if there is one.
    pub fn take(&self) -> Option<T> {
        self.recv.try_recv().ok()
    }

    /// Blocks until a value is published and takes it.
    pub fn wait(&self) -> Result<T, Disconnected> {
        self.recv.recv().map_err(|_| Disconnected)
    }

    /// Like [`Latest::wait`], but gives up after `timeout` and returns `Ok(None)`.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Option<T>, Disconnected> {
        match self.recv.recv_timeout(timeout) {
            Ok(value) => Ok(Some(value)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Disconnected),
        }
    }

    /// Returns the number of published values that were replaced before anyone consumed them.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn newest_value_wins() {
        let (publisher, latest) = latest();
        assert_eq!(latest.take(), None);

        publisher.publish(1);
        publisher.publish(2);
        publisher.publish(3);
        assert_eq!(latest.take(), Some(3));
        assert_eq!(latest.take(), None);
        assert_eq!(latest.dropped(), 2);
    }

    #[test]
    fn pending_value_survives_publisher_drop() {
        let (publisher, latest) = latest();
        publisher.publish("last");
        drop(publisher);
        assert_eq!(latest.wait(), Ok("last"));
        assert_eq!(latest.wait(), Err(Disconnected));
        assert_eq!(latest.wait_timeout(Duration::from_millis(1)), Err(Disconnected));
    }

    #[test]
    fn publish_after_consumer_drop_discards() {
        let (publisher, latest) = latest();
        drop(latest);

        let value = Arc::new(());
        for _ in 0..3 {
            publisher.publish(value.clone());
        }
        // Only the pending value is kept alive, by the publisher itself.
        assert_eq!(Arc::strong_count(&value), 2);
        drop(publisher);
        assert_eq!(Arc::strong_count(&value), 1);
    }

    #[test]
    fn wait_timeout_without_value() {
        let (_publisher, latest) = latest::<u32>();
        assert_eq!(latest.wait_timeout(Duration::from_millis(5)), Ok(None));
    }

    #[test]
    fn publish_from_other_thread() {
        let (publisher, latest) = latest();
        let handle = thread::spawn(move || {
            for i in 0..=1000 {
                publisher.publish(i);
            }
        });

        let mut last = None;
        while let Ok(value) = latest.wait() {
            if let Some(prev) = last {
                assert!(value > prev, "values must arrive in order");
            }
            last = Some(value);
        }
        handle.join().unwrap();

        assert_eq!(last, Some(1000));
    }
}
