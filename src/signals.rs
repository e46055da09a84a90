//! UI signals emitted by the coordinator.
//!
//! The surrounding UI (progress spinner, toasts, result list) subscribes to a
//! [`UiSignalSink`] and renders accordingly; rendering itself is out of scope
//! here. Empty input and empty results are expected outcomes and get their own
//! signals, distinct from provider failures.

use crate::model::ResultSet;
use crate::providers::ProviderError;

/// One coordinator-to-UI notification.
#[derive(Debug, Clone, PartialEq)]
pub enum UiSignal {
    /// A query was dispatched; show a loading indicator.
    LoadingStarted,
    /// The in-flight query reached a terminal outcome, whatever it was.
    LoadingFinished,
    /// Submission rejected before dispatch: the query text was empty.
    EmptyInput,
    /// The provider completed successfully but matched nothing.
    EmptyResult,
    /// The provider failed; the error is surfaced as-is, never retried.
    SearchFailed(ProviderError),
    /// A new result set was applied to the map.
    ResultsReady(ResultSet),
}

impl UiSignal {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoadingStarted => "loading-started",
            Self::LoadingFinished => "loading-finished",
            Self::EmptyInput => "empty-input",
            Self::EmptyResult => "empty-result",
            Self::SearchFailed(_) => "search-failed",
            Self::ResultsReady(_) => "results-ready",
        }
    }
}

/// Consumer of coordinator signals.
pub trait UiSignalSink {
    fn signal(&mut self, signal: UiSignal);
}

/// Sink that forwards signals into a tokio channel, for UI loops living on
/// another task. Send failures are ignored: a dropped receiver just means the
/// UI went away.
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<UiSignal>,
}

impl ChannelSink {
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<UiSignal>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl UiSignalSink for ChannelSink {
    fn signal(&mut self, signal: UiSignal) {
        let _ = self.tx.send(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_forwards_in_order() {
        let (mut sink, mut rx) = ChannelSink::new();
        sink.signal(UiSignal::LoadingStarted);
        sink.signal(UiSignal::EmptyResult);
        sink.signal(UiSignal::LoadingFinished);

        assert_eq!(rx.try_recv().unwrap(), UiSignal::LoadingStarted);
        assert_eq!(rx.try_recv().unwrap(), UiSignal::EmptyResult);
        assert_eq!(rx.try_recv().unwrap(), UiSignal::LoadingFinished);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (mut sink, rx) = ChannelSink::new();
        drop(rx);
        sink.signal(UiSignal::LoadingStarted);
    }
}
