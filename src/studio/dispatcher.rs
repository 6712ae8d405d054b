// SPDX-License-Identifier: MPL-2.0
//! Transform dispatcher: operation catalogue and the single-flight guard.
//!
//! Both remote operations go through the same code path. They differ only in
//! the data returned by [`Operation`]: the endpoint path and the message keys
//! used for notifications.

use super::selection::{SelectedSource, SourceId};
use super::source::SourceFile;
use crate::service::TransformRequestError;
use bytes::Bytes;
use std::fmt;

/// Title key of every failure notification.
pub const FAILURE_TITLE_KEY: &str = "notification-transform-error";

/// A remote image transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Replace the background with plain white.
    RemoveBackground,
    /// Keep the subject sharp and blur the background.
    BlurBackground,
}

impl Operation {
    /// Every operation, in display order.
    pub const ALL: [Operation; 2] = [Operation::RemoveBackground, Operation::BlurBackground];

    /// Path of the service endpoint, relative to the base URL.
    #[must_use]
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Operation::RemoveBackground => "/process-image",
            Operation::BlurBackground => "/process-image-blur",
        }
    }

    /// Message key of the success notification.
    #[must_use]
    pub fn success_title_key(self) -> &'static str {
        match self {
            Operation::RemoveBackground => "notification-remove-background-success",
            Operation::BlurBackground => "notification-blur-background-success",
        }
    }

    /// Message key of the detail attached to failure notifications.
    #[must_use]
    pub fn failure_detail_key(self) -> Option<&'static str> {
        match self {
            Operation::RemoveBackground => Some("notification-transform-error-check-server"),
            Operation::BlurBackground => None,
        }
    }

    /// Message key of the trigger button label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Operation::RemoveBackground => "action-remove-background",
            Operation::BlurBackground => "action-blur-background",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::RemoveBackground => write!(f, "remove-background"),
            Operation::BlurBackground => write!(f, "blur-background"),
        }
    }
}

/// Busy state of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight(Operation),
}

impl RequestState {
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, RequestState::Idle)
    }
}

/// Identifies one dispatched request. Ids only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request-{}", self.0)
    }
}

/// Everything needed to perform one remote call.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub id: RequestId,
    pub operation: Operation,
    /// Selection the request was issued for.
    pub source_id: SourceId,
    pub file: SourceFile,
}

/// Settled result of a [`TransformRequest`].
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// Request this outcome answers.
    pub request_id: RequestId,
    pub operation: Operation,
    pub source_id: SourceId,
    pub result: Result<Bytes, TransformRequestError>,
}

impl TransformOutcome {
    /// Builds the outcome of `request`.
    #[must_use]
    pub fn of(request: &TransformRequest, result: Result<Bytes, TransformRequestError>) -> Self {
        Self {
            request_id: request.id,
            operation: request.operation,
            source_id: request.source_id,
            result,
        }
    }
}

/// What to do with a successful result whose source has since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Show the result anyway.
    #[default]
    Apply,
    /// Drop the result silently.
    Discard,
}

/// Single-flight guard around remote calls.
#[derive(Debug, Default)]
pub struct TransformDispatcher {
    state: RequestState,
    /// Id of the request in flight.
    active: Option<RequestId>,
    next_id: u64,
}

impl TransformDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Moves to `InFlight(operation)` and packages the source for upload.
    ///
    /// Returns `None`, leaving the state untouched, when there is no source or
    /// another request is already in flight.
    pub fn begin(
        &mut self,
        operation: Operation,
        source: Option<&SelectedSource>,
    ) -> Option<TransformRequest> {
        if let RequestState::InFlight(active) = self.state {
            tracing::debug!(%operation, %active, "trigger ignored: request already in flight");
            return None;
        }
        let Some(source) = source else {
            tracing::debug!(%operation, "trigger ignored: no source selected");
            return None;
        };

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.state = RequestState::InFlight(operation);
        self.active = Some(id);
        tracing::info!(
            request = %id,
            %operation,
            source = %source.id(),
            len = source.file().len(),
            "transform request dispatched"
        );
        Some(TransformRequest {
            id,
            operation,
            source_id: source.id(),
            file: source.file().clone(),
        })
    }

    /// Returns `true` if `outcome` answers the request currently in flight.
    ///
    /// Matching is by request id, so an outcome of an earlier request for the
    /// same operation is not taken for the current one.
    #[must_use]
    pub fn is_awaiting(&self, outcome: &TransformOutcome) -> bool {
        self.active == Some(outcome.request_id)
    }

    /// Returns to `Idle`.
    pub fn finish(&mut self) {
        self.state = RequestState::Idle;
        self.active = None;
    }
}
