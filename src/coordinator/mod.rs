//! Query/annotation coordination.
//!
//! [`QueryCoordinator`] serializes query submission and result application so
//! the map only ever reflects the latest completed query. It is a plain
//! synchronous state machine: all the async plumbing (dispatching provider
//! futures, marshaling completions back onto one task) lives in [`runtime`].
//!
//! Staleness is handled with a monotonically increasing sequence number. Each
//! accepted submission bumps it; a completion tagged with anything but the
//! current value is dropped without side effects. That supersession is the
//! only cancellation mechanism; in-flight provider calls are never aborted.

pub mod runtime;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::ResultSet;
use crate::providers::SearchOutcome;
use crate::query::Query;
use crate::render::{AnnotationHandle, AnnotationStyle, MapRenderer, Viewport};
use crate::signals::{UiSignal, UiSignalSink};

/// Camera behavior when a non-empty result set is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportPolicy {
    /// Center on the first result's coordinate.
    #[default]
    FirstResult,
    /// Fit a bounding region covering every locatable result.
    BoundingRegion,
}

/// Serializes one-query-at-a-time search against a renderer and a signal sink.
///
/// Owns the sequence counter and the set of annotation handles for the
/// currently displayed result set; nothing else holds either.
pub struct QueryCoordinator<R: MapRenderer, S: UiSignalSink> {
    renderer: R,
    sink: S,
    policy: ViewportPolicy,
    seq: u64,
    handles: Vec<AnnotationHandle>,
    latest: Option<ResultSet>,
}

impl<R: MapRenderer, S: UiSignalSink> QueryCoordinator<R, S> {
    pub fn new(renderer: R, sink: S, policy: ViewportPolicy) -> Self {
        Self {
            renderer,
            sink,
            policy,
            seq: 0,
            handles: Vec::new(),
            latest: None,
        }
    }

    /// Accept a query for dispatch.
    ///
    /// Empty input is rejected synchronously: an `EmptyInput` signal fires,
    /// the sequence counter is untouched and `None` comes back, meaning no
    /// provider call may be made. Otherwise all annotations from the previous
    /// result set are removed *before* anything else happens, loading is
    /// signaled, and the new sequence number is returned for tagging the
    /// async dispatch.
    pub fn submit(&mut self, query: &Query) -> Option<u64> {
        if let Err(err) = query.validate() {
            debug!(kind = query.kind(), %err, "query rejected at submission");
            self.sink.signal(UiSignal::EmptyInput);
            return None;
        }

        self.seq += 1;
        if !self.handles.is_empty() {
            self.renderer.remove_annotations(&self.handles);
            self.handles.clear();
        }
        info!(seq = self.seq, kind = query.kind(), "query submitted");
        self.sink.signal(UiSignal::LoadingStarted);
        Some(self.seq)
    }

    /// Apply a provider completion.
    ///
    /// Completions tagged with a superseded sequence number are discarded
    /// silently: no signals, no renderer mutations.
    pub fn on_result(&mut self, seq: u64, outcome: SearchOutcome) {
        if seq != self.seq {
            debug!(seq, current = self.seq, "stale result dropped");
            return;
        }

        match outcome {
            Err(err) => {
                info!(seq, %err, "search failed");
                self.sink.signal(UiSignal::SearchFailed(err));
            }
            Ok(items) if items.is_empty() => {
                info!(seq, "search matched nothing");
                self.sink.signal(UiSignal::EmptyResult);
            }
            Ok(items) => {
                let set = ResultSet::new(seq, items);
                self.apply_results(&set);
                info!(seq, results = set.len(), "results applied");
                self.latest = Some(set.clone());
                self.sink.signal(UiSignal::ResultsReady(set));
            }
        }
        self.sink.signal(UiSignal::LoadingFinished);
    }

    fn apply_results(&mut self, set: &ResultSet) {
        let mut coordinates = Vec::new();
        for (index, (item, coordinate)) in set.locatable().enumerate() {
            let style = AnnotationStyle {
                label: Some(format!("{}. {}", index + 1, item.display_name())),
                draggable: true,
            };
            let handle = self.renderer.add_annotation(coordinate, style);
            self.handles.push(handle);
            coordinates.push(coordinate);
        }

        let viewport = match self.policy {
            ViewportPolicy::FirstResult => coordinates.first().copied().map(Viewport::Center),
            ViewportPolicy::BoundingRegion => {
                crate::geo::GeoBoundingBox::covering(coordinates).map(Viewport::Region)
            }
        };
        if let Some(viewport) = viewport {
            self.renderer.set_viewport(viewport);
        }
    }

    /// Sequence number of the most recently accepted submission.
    pub fn current_seq(&self) -> u64 {
        self.seq
    }

    /// Handles for the annotations currently on the map.
    pub fn annotation_handles(&self) -> &[AnnotationHandle] {
        &self.handles
    }

    /// The last applied result set, e.g. for a result-list screen.
    pub fn latest_results(&self) -> Option<&ResultSet> {
        self.latest.as_ref()
    }
}
