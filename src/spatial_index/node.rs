//! Tree node of the facility R-tree.
//!
//! A node is either a leaf holding facility records or an internal node
//! owning its child nodes. Each node caches the minimal [`BoundingBox2D`]
//! over everything beneath it; every mutating method recomputes it before
//! returning, so the box is never stale.

use crate::compute::haversine_km;
use crate::config::Config;
use geo::Point;
use geofacility_types::{BoundingBox2D, Facility};
use smallvec::SmallVec;
use std::sync::Arc;

/// Inline storage for leaf records; the default capacity of 4 plus the one
/// overflowing record that triggers a split fit without spilling.
pub(crate) type LeafEntries = SmallVec<[Arc<Facility>; 8]>;

/// Structural parameters shared by every node of one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodePolicy {
    pub capacity: usize,
    pub min_fill: usize,
    pub split_internal: bool,
}

impl From<&Config> for NodePolicy {
    fn from(config: &Config) -> Self {
        Self {
            capacity: config.node_capacity,
            min_fill: config.min_node_fill,
            split_internal: config.split_internal_nodes,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Leaf(LeafEntries),
    Internal(Vec<Node>),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// `None` only while the node has no children
    bbox: Option<BoundingBox2D>,
    kind: NodeKind,
}

impl Node {
    pub fn new_leaf() -> Self {
        Self {
            bbox: None,
            kind: NodeKind::Leaf(LeafEntries::new()),
        }
    }

    pub fn new_internal(children: Vec<Node>) -> Self {
        let mut node = Self {
            bbox: None,
            kind: NodeKind::Internal(children),
        };
        node.adjust_bounding_box();
        node
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn bbox(&self) -> Option<&BoundingBox2D> {
        self.bbox.as_ref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Number of direct children (records for a leaf, nodes otherwise).
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.len(),
            NodeKind::Internal(children) => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the node, yielding its only child if it is an internal node
    /// with exactly one.
    pub fn into_single_child(self) -> Result<Node, Node> {
        match self.kind {
            NodeKind::Internal(mut children) if children.len() == 1 => {
                Ok(children.pop().unwrap_or_else(Node::new_leaf))
            }
            kind => Err(Node {
                bbox: self.bbox,
                kind,
            }),
        }
    }

    /// Insert a record beneath this node.
    ///
    /// Returns the new sibling when this node overflowed and split; the
    /// caller must adopt it.
    pub fn insert(&mut self, facility: Arc<Facility>, policy: &NodePolicy) -> Option<Node> {
        match &mut self.kind {
            NodeKind::Leaf(entries) => {
                entries.push(facility);
                self.adjust_bounding_box();

                if self.len() > policy.capacity {
                    let sibling = self.split();
                    log::debug!(
                        "leaf split into {} + {} records",
                        self.len(),
                        sibling.len()
                    );
                    return Some(sibling);
                }
                None
            }
            NodeKind::Internal(children) => {
                let location = facility.location();
                match choose_best_child(children, &location) {
                    Some(idx) => {
                        if let Some(sibling) = children[idx].insert(facility, policy) {
                            children.push(sibling);
                        }
                    }
                    None => {
                        let mut leaf = Node::new_leaf();
                        leaf.insert(facility, policy);
                        children.push(leaf);
                    }
                }
                // recompute even without a split: the chosen child's box may
                // have grown past ours
                self.adjust_bounding_box();

                if policy.split_internal && self.len() > policy.capacity {
                    let sibling = self.split();
                    log::debug!(
                        "internal node split into {} + {} children",
                        self.len(),
                        sibling.len()
                    );
                    return Some(sibling);
                }
                None
            }
        }
    }

    /// Move the second half of the children (by current order) into a new
    /// node of the same kind. Both boxes are recomputed.
    pub fn split(&mut self) -> Node {
        let kind = match &mut self.kind {
            NodeKind::Leaf(entries) => {
                let mid = entries.len() / 2;
                NodeKind::Leaf(entries.drain(mid..).collect())
            }
            NodeKind::Internal(children) => {
                let mid = children.len() / 2;
                NodeKind::Internal(children.split_off(mid))
            }
        };
        self.adjust_bounding_box();

        let mut sibling = Node { bbox: None, kind };
        sibling.adjust_bounding_box();
        sibling
    }

    /// Recompute the box as the min/max over all children. An empty node has
    /// no box.
    pub fn adjust_bounding_box(&mut self) {
        self.bbox = match &self.kind {
            NodeKind::Leaf(entries) => {
                let points: SmallVec<[Point; 8]> = entries.iter().map(|f| f.location()).collect();
                BoundingBox2D::enclosing_points(&points)
            }
            NodeKind::Internal(children) => {
                BoundingBox2D::enclosing_boxes(children.iter().filter_map(|c| c.bbox.as_ref()))
            }
        };
    }

    /// Remove `facility` from beneath this node.
    ///
    /// Children whose box contains the record's point are searched first; if
    /// none of them holds it the remaining children are scanned too. A child
    /// left with fewer than `min_fill` children is evicted and every record
    /// still beneath it is pushed onto `orphans` for the caller to reinsert.
    pub fn delete(
        &mut self,
        facility: &Facility,
        policy: &NodePolicy,
        orphans: &mut Vec<Arc<Facility>>,
    ) -> bool {
        match &mut self.kind {
            NodeKind::Leaf(entries) => {
                let Some(pos) = entries.iter().position(|f| f.as_ref() == facility) else {
                    return false;
                };
                entries.remove(pos);
                self.adjust_bounding_box();
                true
            }
            NodeKind::Internal(children) => {
                let location = facility.location();
                let contains =
                    |bbox: Option<BoundingBox2D>| bbox.is_some_and(|b| b.contains_point(&location));

                let mut removed_from = None;
                for (idx, child) in children.iter_mut().enumerate() {
                    if contains(child.bbox) && child.delete(facility, policy, orphans) {
                        removed_from = Some(idx);
                        break;
                    }
                }

                if removed_from.is_none() {
                    for (idx, child) in children.iter_mut().enumerate() {
                        if !contains(child.bbox) && child.delete(facility, policy, orphans) {
                            log::warn!(
                                "facility {} found outside every containing box; bounding boxes were stale",
                                facility.id
                            );
                            removed_from = Some(idx);
                            break;
                        }
                    }
                }

                let Some(idx) = removed_from else {
                    return false;
                };

                if children[idx].len() < policy.min_fill {
                    let evicted = children.remove(idx);
                    let before = orphans.len();
                    evicted.collect_into(orphans);
                    log::debug!(
                        "evicted underfull child ({} orphaned records)",
                        orphans.len() - before
                    );
                }
                self.adjust_bounding_box();
                true
            }
        }
    }

    /// Push every record beneath this node onto `out`, consuming the node.
    pub fn collect_into(self, out: &mut Vec<Arc<Facility>>) {
        match self.kind {
            NodeKind::Leaf(entries) => out.extend(entries),
            NodeKind::Internal(children) => {
                for child in children {
                    child.collect_into(out);
                }
            }
        }
    }

    /// Visit every leaf record, collecting those within `range_km` of
    /// `location` (all of them when `range_km` is `None`) with their distance.
    pub fn collect_within(
        &self,
        location: &Point,
        range_km: Option<f64>,
        out: &mut Vec<(Arc<Facility>, f64)>,
    ) {
        match &self.kind {
            NodeKind::Leaf(entries) => {
                for facility in entries {
                    let dist = haversine_km(location, &facility.location());
                    if range_km.is_none_or(|range| dist <= range) {
                        out.push((Arc::clone(facility), dist));
                    }
                }
            }
            NodeKind::Internal(children) => {
                for child in children {
                    child.collect_within(location, range_km, out);
                }
            }
        }
    }

    /// Depth-first walk over every record.
    pub fn for_each<'a>(&'a self, f: &mut impl FnMut(&'a Arc<Facility>)) {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.iter().for_each(&mut *f),
            NodeKind::Internal(children) => {
                for child in children {
                    child.for_each(f);
                }
            }
        }
    }
}

/// Index of the child whose lower-left corner is nearest to `location`.
/// The first child wins ties; children without a box are skipped.
pub(crate) fn choose_best_child(children: &[Node], location: &Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, child) in children.iter().enumerate() {
        let Some(bbox) = child.bbox.as_ref() else {
            continue;
        };
        let dist = haversine_km(&bbox.lower_left(), location);
        if best.is_none_or(|(_, min)| dist < min) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}
