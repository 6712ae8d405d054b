// SPDX-License-Identifier: MPL-2.0
//! Upload and result orchestration.
//!
//! [`Studio`] owns the selected source image, the request in flight and the
//! latest processed image. It is driven by the application's update loop:
//!
//! 1. [`Studio::select_file`] when the user picks an image,
//! 2. [`Studio::trigger`] when an operation button is pressed, which returns
//!    the request to send,
//! 3. [`Studio::settle`] once the remote call has completed.
//!
//! Every image the studio holds is a [`DisplayHandle`] registered in a shared
//! [`HandleLedger`], so callers can check that nothing leaks.

pub mod dispatcher;
pub mod handle;
pub mod notify;
pub mod result_store;
pub mod selection;
pub mod source;

pub use dispatcher::{
    Operation, RequestId, RequestState, StalePolicy, TransformDispatcher, TransformOutcome,
    TransformRequest, FAILURE_TITLE_KEY,
};
pub use handle::{DisplayHandle, HandleId, HandleLedger};
pub use notify::{NotificationSink, NotifyKind};
pub use result_store::{Download, ResultStore, DOWNLOAD_FILE_NAME};
pub use selection::{SelectedSource, SelectionManager, SourceId};
pub use source::{SelectionError, SourceFile, IMAGE_EXTENSIONS};

use bytes::Bytes;
use std::sync::Arc;

/// Client-side state for one editing session.
#[derive(Debug)]
pub struct Studio {
    ledger: Arc<HandleLedger>,
    selection: SelectionManager,
    dispatcher: TransformDispatcher,
    results: ResultStore,
    stale_policy: StalePolicy,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    #[must_use]
    pub fn new() -> Self {
        let ledger = HandleLedger::new();
        Self {
            selection: SelectionManager::new(Arc::clone(&ledger)),
            ledger,
            dispatcher: TransformDispatcher::new(),
            results: ResultStore::new(),
            stale_policy: StalePolicy::default(),
        }
    }

    /// Sets how results for a replaced source are handled.
    #[must_use]
    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Selects `file` as the new source. `None` leaves everything unchanged.
    ///
    /// Any processed image belongs to the previous source and is cleared.
    pub fn select_file(&mut self, file: Option<SourceFile>) {
        let Some(file) = file else {
            return;
        };
        self.selection.select(file);
        self.results.clear();
    }

    /// Starts `operation` on the current source.
    ///
    /// Returns the request to send, or `None` when there is no source or a
    /// request is already in flight. In that case nothing changes.
    pub fn trigger(&mut self, operation: Operation) -> Option<TransformRequest> {
        self.dispatcher.begin(operation, self.selection.current())
    }

    /// Applies the outcome of the request in flight and returns to idle.
    ///
    /// Outcomes that do not match the request in flight are ignored.
    pub fn settle(&mut self, outcome: TransformOutcome, sink: &mut impl NotificationSink) {
        if !self.dispatcher.is_awaiting(&outcome) {
            tracing::warn!(
                request = %outcome.request_id,
                operation = %outcome.operation,
                state = ?self.dispatcher.state(),
                "ignoring outcome without matching request"
            );
            return;
        }

        let TransformOutcome {
            operation,
            source_id,
            result,
            ..
        } = outcome;

        match result {
            Ok(bytes) => self.apply_result(operation, source_id, bytes, sink),
            Err(err) => {
                tracing::warn!(%operation, error = %err, "transform request failed");
                sink.notify(
                    NotifyKind::Failure,
                    FAILURE_TITLE_KEY,
                    operation.failure_detail_key(),
                );
            }
        }

        self.dispatcher.finish();
    }

    fn apply_result(
        &mut self,
        operation: Operation,
        source_id: SourceId,
        bytes: Bytes,
        sink: &mut impl NotificationSink,
    ) {
        let is_stale = self.selection.current_id() != Some(source_id);
        if is_stale && self.stale_policy == StalePolicy::Discard {
            tracing::info!(%operation, source = %source_id, "discarding result for replaced source");
            return;
        }
        if is_stale {
            tracing::debug!(%operation, source = %source_id, "applying result for replaced source");
        }

        let handle = self.ledger.create(bytes);
        tracing::info!(%operation, result = %handle.id(), len = handle.len(), "transform completed");
        self.results.replace(handle);
        sink.notify(NotifyKind::Success, operation.success_title_key(), None);
    }

    /// Releases every handle the studio holds.
    ///
    /// A request in flight is not aborted; its outcome will still reset the
    /// busy state when it arrives.
    pub fn teardown(&mut self) {
        self.results.clear();
        self.selection.clear();
        tracing::debug!(live = self.ledger.live_count(), "studio torn down");
    }

    #[must_use]
    pub fn source(&self) -> Option<&SelectedSource> {
        self.selection.current()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&DisplayHandle> {
        self.selection.current().map(SelectedSource::preview)
    }

    #[must_use]
    pub fn result(&self) -> Option<&DisplayHandle> {
        self.results.current()
    }

    #[must_use]
    pub fn download(&self) -> Option<Download> {
        self.results.download()
    }

    #[must_use]
    pub fn request_state(&self) -> RequestState {
        self.dispatcher.state()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.dispatcher.state().is_idle()
    }

    /// Returns `true` when an operation may be triggered right now.
    #[must_use]
    pub fn can_trigger(&self) -> bool {
        self.selection.current().is_some() && self.dispatcher.state().is_idle()
    }

    #[must_use]
    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    /// Ledger of all display handles created by this studio.
    #[must_use]
    pub fn ledger(&self) -> &Arc<HandleLedger> {
        &self.ledger
    }
}
