//! Typed zoom-changed channel.
//!
//! Only settled factors are published: the end of an animated run or an
//! immediate level change. Intermediate tick values never reach observers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::geometry::ZoomFactor;

/// Publisher side of the settled zoom factor. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ZoomEvents {
    tx: Arc<watch::Sender<ZoomFactor>>,
}

impl ZoomEvents {
    #[must_use]
    pub fn new(initial: ZoomFactor) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Publish a settled factor. Observers are only woken when it differs
    /// from the last published value.
    pub fn publish(&self, factor: ZoomFactor) {
        self.tx.send_if_modified(|current| {
            if *current == factor {
                false
            } else {
                *current = factor;
                true
            }
        });
    }

    /// A receiver that sees the latest settled factor and every later change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ZoomFactor> {
        self.tx.subscribe()
    }

    /// The last settled factor.
    #[must_use]
    pub fn latest(&self) -> ZoomFactor {
        *self.tx.borrow()
    }
}
