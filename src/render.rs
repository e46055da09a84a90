//! Map rendering collaborator.
//!
//! The coordinator never draws anything itself; it asks a [`MapRenderer`] to
//! place and remove annotations and to move the viewport, and holds on to the
//! returned [`AnnotationHandle`]s solely so it can remove them later.
//!
//! Implementations must only be touched from the coordinator's home task; the
//! runtime guarantees that.

use tracing::info;

use crate::geo::{GeoBoundingBox, GeoCoordinate};

/// Opaque reference to a placed annotation. Used only for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationHandle(pub u64);

/// Presentation hints for an annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStyle {
    /// Marker label, e.g. the result's display name.
    pub label: Option<String>,
    /// Whether the marker may be dragged (drag end triggers a reverse lookup
    /// in a typical UI).
    pub draggable: bool,
}

/// Camera target after results are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    Center(GeoCoordinate),
    Region(GeoBoundingBox),
}

/// The map surface the coordinator mutates.
pub trait MapRenderer {
    /// Place an annotation and return a handle for later removal.
    fn add_annotation(&mut self, coordinate: GeoCoordinate, style: AnnotationStyle)
    -> AnnotationHandle;

    /// Remove previously placed annotations. Unknown handles are ignored.
    fn remove_annotations(&mut self, handles: &[AnnotationHandle]);

    /// Re-center or zoom the camera.
    fn set_viewport(&mut self, viewport: Viewport);
}

/// Renderer that reports every mutation via tracing. Used by the CLI, where
/// there is no actual map surface.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    next_handle: u64,
    live: usize,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of annotations currently placed.
    pub fn live_annotations(&self) -> usize {
        self.live
    }
}

impl MapRenderer for TraceRenderer {
    fn add_annotation(
        &mut self,
        coordinate: GeoCoordinate,
        style: AnnotationStyle,
    ) -> AnnotationHandle {
        let handle = AnnotationHandle(self.next_handle);
        self.next_handle += 1;
        self.live += 1;
        info!(
            handle = handle.0,
            %coordinate,
            label = style.label.as_deref().unwrap_or("-"),
            "annotation placed"
        );
        handle
    }

    fn remove_annotations(&mut self, handles: &[AnnotationHandle]) {
        self.live = self.live.saturating_sub(handles.len());
        if !handles.is_empty() {
            info!(count = handles.len(), "annotations removed");
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        match viewport {
            Viewport::Center(coordinate) => info!(%coordinate, "viewport centered"),
            Viewport::Region(region) => info!(
                south_west = %region.south_west,
                north_east = %region.north_east,
                "viewport fitted to region"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_renderer_hands_out_unique_handles() {
        let mut renderer = TraceRenderer::new();
        let coord = GeoCoordinate::new(52.52, 13.405).unwrap();
        let a = renderer.add_annotation(coord, AnnotationStyle::default());
        let b = renderer.add_annotation(coord, AnnotationStyle::default());
        assert_ne!(a, b);
        assert_eq!(renderer.live_annotations(), 2);

        renderer.remove_annotations(&[a, b]);
        assert_eq!(renderer.live_annotations(), 0);
    }
}
