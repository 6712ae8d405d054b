// SPDX-License-Identifier: MPL-2.0
//! Displayable image handles with tracked lifetimes.
//!
//! A [`DisplayHandle`] pairs the raw bytes of an image with the `iced` handle
//! used to render it. Handles are created through a shared [`HandleLedger`],
//! which records every handle that is still live. A handle is released exactly
//! once: either explicitly through [`DisplayHandle::release`] or when it is
//! dropped. Since `DisplayHandle` is neither `Clone` nor `Copy`, a released
//! handle cannot be used again.

use bytes::Bytes;
use iced::widget::image;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifier of a display handle, unique within its ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandleId(u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bookkeeping for every display handle created by a component.
#[derive(Debug, Default)]
pub struct HandleLedger {
    next_id: AtomicU64,
    live: Mutex<BTreeSet<HandleId>>,
}

impl HandleLedger {
    /// Creates an empty ledger, ready to be shared between owners.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wraps `bytes` in a new live display handle.
    pub fn create(self: &Arc<Self>, bytes: impl Into<Bytes>) -> DisplayHandle {
        let bytes = bytes.into();
        let id = HandleId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.live_set().insert(id);
        tracing::trace!(handle = %id, len = bytes.len(), "display handle created");

        DisplayHandle {
            id,
            image: image::Handle::from_bytes(bytes.clone()),
            bytes,
            ledger: Arc::clone(self),
        }
    }

    /// Returns `true` if the handle has been created and not yet released.
    #[must_use]
    pub fn is_live(&self, id: HandleId) -> bool {
        self.live_set().contains(&id)
    }

    /// Returns the ids of all live handles, in creation order.
    #[must_use]
    pub fn live_ids(&self) -> Vec<HandleId> {
        self.live_set().iter().copied().collect()
    }

    /// Returns the number of live handles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_set().len()
    }

    fn release(&self, id: HandleId) {
        let removed = self.live_set().remove(&id);
        debug_assert!(removed, "display handle {id} released twice");
        tracing::trace!(handle = %id, "display handle released");
    }

    fn live_set(&self) -> MutexGuard<'_, BTreeSet<HandleId>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An image that a rendering surface can show.
pub struct DisplayHandle {
    id: HandleId,
    bytes: Bytes,
    image: image::Handle,
    ledger: Arc<HandleLedger>,
}

impl DisplayHandle {
    /// Returns this handle's id.
    #[must_use]
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Returns the underlying image bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the handle used by `iced` image widgets.
    #[must_use]
    pub fn image(&self) -> &image::Handle {
        &self.image
    }

    /// Returns the size of the image data in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the image data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Releases the handle. Equivalent to dropping it.
    pub fn release(self) {}
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        self.ledger.release(self.id);
    }
}

impl fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayHandle")
            .field("id", &self.id)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_handle_is_live() {
        let ledger = HandleLedger::new();
        let handle = ledger.create(vec![1u8, 2, 3]);
        assert!(ledger.is_live(handle.id()));
        assert_eq!(ledger.live_count(), 1);
        assert_eq!(handle.bytes().as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn release_removes_handle_from_ledger() {
        let ledger = HandleLedger::new();
        let handle = ledger.create(Bytes::from_static(b"abc"));
        let id = handle.id();
        handle.release();
        assert!(!ledger.is_live(id));
        assert_eq!(ledger.live_count(), 0);
    }

    #[test]
    fn drop_releases_handle() {
        let ledger = HandleLedger::new();
        let id = {
            let handle = ledger.create(Bytes::from_static(b"abc"));
            handle.id()
        };
        assert!(!ledger.is_live(id));
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let ledger = HandleLedger::new();
        let first = ledger.create(Bytes::from_static(b"a"));
        let second = ledger.create(Bytes::from_static(b"b"));
        assert!(first.id() < second.id());
        assert_eq!(ledger.live_ids(), vec![first.id(), second.id()]);
    }

    #[test]
    fn debug_output_omits_bytes() {
        let ledger = HandleLedger::new();
        let handle = ledger.create(Bytes::from_static(b"secret-bytes"));
        let debug = format!("{handle:?}");
        assert!(debug.contains("len"));
        assert!(!debug.contains("secret"));
    }
}
