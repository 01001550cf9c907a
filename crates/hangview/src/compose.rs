//! Painter's-algorithm compositing of preview primitives.
//!
//! Every builder pushes `(depth, layer, primitive)`; `finish` returns the
//! primitives in draw order. Front view: farthest first (descending depth,
//! stable for ties). Rear view: ascending depth, ties drawn `Front`, `Mid`,
//! `Back` so rear-layer elements still end up on top.

use std::cmp::Ordering;

use serde::Serialize;

use crate::layout::MoundShape;
use crate::model::{ChainSegment, ClaspConnector, DepthLayer, PreviewView, Sphere};

/// Drawable unit handed to the rendering/export layers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Sphere { sphere: Sphere, color_id: String },
    Chain { segment: ChainSegment },
    Clasp { clasp: ClaspConnector },
    Mound { mound: MoundShape },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepthItem {
    pub depth: f64,
    pub layer: DepthLayer,
    pub primitive: Primitive,
}

#[derive(Clone, Debug, Default)]
pub struct DepthCompositor {
    items: Vec<DepthItem>,
}

impl DepthCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, depth: f64, layer: DepthLayer, primitive: Primitive) {
        self.items.push(DepthItem {
            depth,
            layer,
            primitive,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in draw order for `view`.
    pub fn ordered(mut self, view: PreviewView) -> Vec<DepthItem> {
        // `sort_by` is stable: equal keys keep insertion order.
        match view {
            PreviewView::Front => self.items.sort_by(|a, b| depth_cmp(b.depth, a.depth)),
            PreviewView::Rear => self.items.sort_by(|a, b| {
                depth_cmp(a.depth, b.depth)
                    .then_with(|| a.layer.rear_priority().cmp(&b.layer.rear_priority()))
            }),
        }
        self.items
    }

    /// Primitives in draw order for `view`.
    pub fn finish(self, view: PreviewView) -> Vec<Primitive> {
        self.ordered(view).into_iter().map(|it| it.primitive).collect()
    }
}

/// Total order on depth keys; `+ 0.0` folds -0.0 into 0.0 so signed zeros tie.
#[inline]
fn depth_cmp(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn chain(tag: f64) -> Primitive {
        Primitive::Chain {
            segment: ChainSegment::new(Vector2::new(tag, 0.0), Vector2::new(tag, 1.0)),
        }
    }

    fn tag(p: &Primitive) -> f64 {
        match p {
            Primitive::Chain { segment } => segment.p1.x,
            _ => f64::NAN,
        }
    }

    #[test]
    fn front_draws_far_first_and_keeps_ties_stable() {
        let mut c = DepthCompositor::new();
        c.push(1.0, DepthLayer::Mid, chain(0.0));
        c.push(5.0, DepthLayer::Mid, chain(1.0));
        c.push(1.0, DepthLayer::Mid, chain(2.0));
        c.push(-3.0, DepthLayer::Mid, chain(3.0));
        assert_eq!(c.len(), 4);
        let order: Vec<f64> = c.finish(PreviewView::Front).iter().map(tag).collect();
        assert_eq!(order, vec![1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn rear_sorts_ascending_with_back_layer_last_on_ties() {
        let mut c = DepthCompositor::new();
        c.push(2.0, DepthLayer::Back, chain(0.0));
        c.push(2.0, DepthLayer::Front, chain(1.0));
        c.push(2.0, DepthLayer::Mid, chain(2.0));
        c.push(-1.0, DepthLayer::Back, chain(3.0));
        let items = c.ordered(PreviewView::Rear);
        let order: Vec<f64> = items.iter().map(|it| tag(&it.primitive)).collect();
        assert_eq!(order, vec![3.0, 1.0, 2.0, 0.0]);
        for w in items.windows(2) {
            assert!(w[0].depth <= w[1].depth);
        }
    }

    #[test]
    fn nan_depth_still_sorts_in_total_order() {
        let mut c = DepthCompositor::new();
        c.push(1.0, DepthLayer::Mid, chain(0.0));
        c.push(f64::NAN, DepthLayer::Mid, chain(1.0));
        c.push(4.0, DepthLayer::Mid, chain(2.0));
        c.push(-0.0, DepthLayer::Mid, chain(3.0));
        c.push(0.0, DepthLayer::Mid, chain(4.0));
        let order: Vec<f64> = c.finish(PreviewView::Front).iter().map(tag).collect();
        // NaN sorts above every finite key; signed zeros keep insertion order
        assert_eq!(order, vec![1.0, 2.0, 0.0, 3.0, 4.0]);

        let mut c = DepthCompositor::new();
        c.push(f64::NAN, DepthLayer::Back, chain(0.0));
        c.push(2.0, DepthLayer::Back, chain(1.0));
        c.push(-2.0, DepthLayer::Back, chain(2.0));
        let order: Vec<f64> = c.finish(PreviewView::Rear).iter().map(tag).collect();
        assert_eq!(order, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_compositor_yields_nothing() {
        let c = DepthCompositor::new();
        assert!(c.is_empty());
        assert!(c.finish(PreviewView::Front).is_empty());
    }
}
