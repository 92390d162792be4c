//! R-tree style spatial index over facility records.
//!
//! The index owns a single root node. Inserts descend by the
//! nearest-lower-left-corner heuristic and split overflowing nodes in half;
//! when the root itself splits a new root is grown above it. Deletes evict
//! underfull nodes and reinsert the records left beneath them.
//!
//! Nearest-neighbour search is a full traversal filtered per record by
//! haversine distance, then sorted ascending by that distance.
//!
//! ## Example
//!
//! ```rust
//! use geofacility::{Facility, Point, SpatialIndex};
//!
//! let mut index = SpatialIndex::new();
//! index.insert_facility(Facility::new("A", "", 0.0, 0.0, 5.0, ""))?;
//! index.insert_facility(Facility::new("B", "", 0.0, 0.01, 3.0, ""))?;
//! index.insert_facility(Facility::new("C", "", 1.0, 1.0, 4.0, ""))?;
//!
//! let near = index.search_nearest(&Point::new(0.0, 0.0), 10, Some(2.0))?;
//! let names: Vec<&str> = near.iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, ["A", "B"]);
//! # Ok::<(), geofacility::FacilityError>(())
//! ```

pub(crate) mod node;

use crate::compute::{validate_geographic_point, validate_range_km};
use crate::config::Config;
use crate::error::{FacilityError, Result};
use geo::Point;
use geofacility_types::{BoundingBox2D, Facility};
use node::{Node, NodeKind, NodePolicy};
use std::sync::Arc;

/// Bounding-box tree of facility records.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    root: Node,
    policy: NodePolicy,
    truncate_results: bool,
    len: usize,
}

impl SpatialIndex {
    /// Empty index with the default configuration (capacity 4, min fill 2).
    pub fn new() -> Self {
        Self::from_valid_config(&Config::default())
    }

    /// Empty index tuned by `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &Config) -> Self {
        Self {
            root: Node::new_leaf(),
            policy: NodePolicy::from(config),
            truncate_results: config.truncate_results,
            len: 0,
        }
    }

    /// Insert a facility.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the facility's latitude or longitude is
    /// non-finite or out of range; the index is left unchanged.
    pub fn insert_facility(&mut self, facility: impl Into<Arc<Facility>>) -> Result<()> {
        let facility = facility.into();
        validate_geographic_point(&facility.location())?;
        self.place(facility);
        self.len += 1;
        Ok(())
    }

    fn place(&mut self, facility: Arc<Facility>) {
        if let Some(sibling) = self.root.insert(facility, &self.policy) {
            let old_root = std::mem::replace(&mut self.root, Node::new_leaf());
            self.root = Node::new_internal(vec![old_root, sibling]);
            log::debug!("root split; tree height is now {}", self.height());
        }
    }

    /// Remove a facility. Returns `false` if it was not indexed.
    pub fn delete_facility(&mut self, facility: &Facility) -> bool {
        let mut orphans = Vec::new();
        if !self.root.delete(facility, &self.policy, &mut orphans) {
            return false;
        }
        self.len -= 1;
        self.condense_root();

        if !orphans.is_empty() {
            log::debug!("reinserting {} orphaned records", orphans.len());
            for orphan in orphans {
                self.place(orphan);
            }
        }
        true
    }

    fn condense_root(&mut self) {
        while !self.root.is_leaf() && self.root.len() <= 1 {
            let root = std::mem::replace(&mut self.root, Node::new_leaf());
            match root.into_single_child() {
                Ok(child) => {
                    log::debug!("root has a single child; tree shortened");
                    self.root = child;
                }
                Err(_) => {
                    log::debug!("root emptied; reset to an empty leaf");
                }
            }
        }
    }

    /// Facilities ordered by ascending distance from `location`.
    ///
    /// Only records within `distance_range_km` are returned when a range is
    /// given. The result is capped at `max_results` unless the index was
    /// configured with `truncate_results = false`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` for an invalid `location` and
    /// `InvalidInput` for a negative or non-finite range.
    pub fn search_nearest(
        &self,
        location: &Point,
        max_results: usize,
        distance_range_km: Option<f64>,
    ) -> Result<Vec<Arc<Facility>>> {
        Ok(self
            .search_nearest_with_distance(location, max_results, distance_range_km)?
            .into_iter()
            .map(|(facility, _)| facility)
            .collect())
    }

    /// Like [`search_nearest`](Self::search_nearest) but pairs each facility
    /// with its distance in kilometers.
    pub fn search_nearest_with_distance(
        &self,
        location: &Point,
        max_results: usize,
        distance_range_km: Option<f64>,
    ) -> Result<Vec<(Arc<Facility>, f64)>> {
        validate_geographic_point(location)?;
        if let Some(range) = distance_range_km {
            validate_range_km(range)?;
        }

        let mut results = Vec::new();
        self.root
            .collect_within(location, distance_range_km, &mut results);

        results.sort_by(|a, b| a.1.total_cmp(&b.1));
        if self.truncate_results {
            results.truncate(max_results);
        }
        Ok(results)
    }

    /// Whether this exact record is indexed.
    pub fn contains(&self, facility: &Facility) -> bool {
        let mut found = false;
        self.root
            .for_each(&mut |f| found |= f.as_ref() == facility);
        found
    }

    /// Every indexed record in tree order.
    pub fn facilities(&self) -> Vec<Arc<Facility>> {
        let mut out = Vec::with_capacity(self.len);
        self.root.for_each(&mut |f| out.push(Arc::clone(f)));
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Box enclosing every indexed record, `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox2D> {
        self.root.bbox().copied()
    }

    /// Number of levels; an index whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        depth(&self.root)
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            facilities: self.len,
            nodes: 0,
            leaves: 0,
            height: self.height(),
        };
        count_nodes(&self.root, &mut stats);
        stats
    }

    /// Walk the whole tree and verify its structural invariants:
    ///
    /// - every node's box is exactly the minimal box over its children
    /// - no leaf holds more than `node_capacity` records (and no internal node
    ///   more than `node_capacity` children when internal splitting is on)
    /// - every non-root node has at least `min_node_fill` children
    /// - the record count matches [`len`](Self::len)
    ///
    /// Intended for tests and diagnostics.
    pub fn check_invariants(&self) -> Result<()> {
        let counted = check_node(&self.root, &self.policy, true)
            .map_err(FacilityError::InvariantViolation)?;
        if counted != self.len {
            return Err(FacilityError::InvariantViolation(format!(
                "index reports {} records but the tree holds {}",
                self.len, counted
            )));
        }
        Ok(())
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape of the tree at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub facilities: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub height: usize,
}

fn depth(node: &Node) -> usize {
    match node.kind() {
        NodeKind::Leaf(_) => 1,
        NodeKind::Internal(children) => 1 + children.iter().map(depth).max().unwrap_or(0),
    }
}

fn count_nodes(node: &Node, stats: &mut IndexStats) {
    stats.nodes += 1;
    match node.kind() {
        NodeKind::Leaf(_) => stats.leaves += 1,
        NodeKind::Internal(children) => {
            for child in children {
                count_nodes(child, stats);
            }
        }
    }
}

fn check_node(
    node: &Node,
    policy: &NodePolicy,
    is_root: bool,
) -> std::result::Result<usize, String> {
    if !is_root && node.len() < policy.min_fill {
        return Err(format!(
            "non-root node has {} children, below the minimum of {}",
            node.len(),
            policy.min_fill
        ));
    }

    let (expected, count) = match node.kind() {
        NodeKind::Leaf(entries) => {
            if entries.len() > policy.capacity {
                return Err(format!(
                    "leaf holds {} records, capacity is {}",
                    entries.len(),
                    policy.capacity
                ));
            }
            let points: Vec<Point> = entries.iter().map(|f| f.location()).collect();
            (BoundingBox2D::enclosing_points(&points), entries.len())
        }
        NodeKind::Internal(children) => {
            if is_root && node.is_empty() {
                return Err("internal root has no children".to_string());
            }
            if policy.split_internal && children.len() > policy.capacity {
                return Err(format!(
                    "internal node has {} children, capacity is {}",
                    children.len(),
                    policy.capacity
                ));
            }
            let mut count = 0;
            for child in children {
                count += check_node(child, policy, false)?;
            }
            let boxes: Vec<BoundingBox2D> = children.iter().filter_map(|c| c.bbox().copied()).collect();
            (BoundingBox2D::enclosing_boxes(&boxes), count)
        }
    };

    if node.bbox() != expected.as_ref() {
        return Err(format!(
            "stale bounding box: stored {:?}, children span {:?}",
            node.bbox(),
            expected
        ));
    }
    Ok(count)
}
