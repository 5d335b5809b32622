use slotmap::SlotMap;

use crate::error::ChainError;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node within a [`Chain`].
    pub struct NodeId;
}

/// RGB colour attached to every chain node, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Creates a colour from its components.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Data associated with one chain node.
#[derive(Debug, Clone)]
struct NodeData {
    point: Point2,
    color: Color,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

/// A doubly linked sequence of coloured vertices forming one curve.
///
/// A chain is either open (the ends have no wrap links) or a loop (the last
/// node's `next` is the first node and vice versa). Nodes live in a per-chain
/// arena and are addressed by stable [`NodeId`]s; insertion splices a new
/// node between two existing ones in O(1) and never removes links.
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: SlotMap<NodeId, NodeData>,
    head: NodeId,
    tail: NodeId,
}

impl Chain {
    /// Builds a chain from an ordered list of points, all sharing one colour.
    ///
    /// With `closed` set, the last node is linked back to the first to form
    /// a loop. A single-point chain is always open.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Empty`] if `points` is empty.
    pub fn from_points(points: &[Point2], color: Color, closed: bool) -> Result<Self, ChainError> {
        let (first, rest) = points.split_first().ok_or(ChainError::Empty)?;

        let mut nodes = SlotMap::with_key();
        let head = nodes.insert(NodeData {
            point: *first,
            color,
            next: None,
            prev: None,
        });
        let mut chain = Self { nodes, head, tail: head };

        for p in rest {
            let tail = chain.tail;
            chain.insert_after_with(tail, *p, color)?;
        }

        if closed && chain.tail != chain.head {
            chain.nodes[chain.tail].next = Some(chain.head);
            chain.nodes[chain.head].prev = Some(chain.tail);
        }

        Ok(chain)
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, ChainError> {
        self.nodes.get(id).ok_or(ChainError::NodeNotFound)
    }

    /// The first node of the chain.
    #[must_use]
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The distinguished end node of the chain; backward subdivision passes
    /// start here. Splices move it only when appending past an open end.
    #[must_use]
    pub fn tail(&self) -> NodeId {
        self.tail
    }

    /// Number of nodes in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` if the chain is a closed loop.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.nodes[self.head].prev.is_some()
    }

    /// Position of a node.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn point(&self, id: NodeId) -> Result<Point2, ChainError> {
        Ok(self.node(id)?.point)
    }

    /// Colour of a node.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn color(&self, id: NodeId) -> Result<Color, ChainError> {
        Ok(self.node(id)?.color)
    }

    /// Successor of a node (`None` at the open end of a chain).
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn next(&self, id: NodeId) -> Result<Option<NodeId>, ChainError> {
        Ok(self.node(id)?.next)
    }

    /// Predecessor of a node (`None` at the open start of a chain).
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn prev(&self, id: NodeId) -> Result<Option<NodeId>, ChainError> {
        Ok(self.node(id)?.prev)
    }

    /// Inserts a new node after `id`, inheriting its colour.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn insert_after(&mut self, id: NodeId, point: Point2) -> Result<NodeId, ChainError> {
        let color = self.node(id)?.color;
        self.insert_after_with(id, point, color)
    }

    /// Inserts a new node after `id` with an explicit colour.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn insert_after_with(
        &mut self,
        id: NodeId,
        point: Point2,
        color: Color,
    ) -> Result<NodeId, ChainError> {
        let old_next = self.node(id)?.next;
        let new = self.nodes.insert(NodeData {
            point,
            color,
            next: old_next,
            prev: Some(id),
        });
        match old_next {
            Some(next) => self.nodes[next].prev = Some(new),
            // Appending past the open end moves the tail.
            None => self.tail = new,
        }
        self.nodes[id].next = Some(new);
        Ok(new)
    }

    /// Inserts a new node before `id`, inheriting its colour.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn insert_before(&mut self, id: NodeId, point: Point2) -> Result<NodeId, ChainError> {
        let color = self.node(id)?.color;
        self.insert_before_with(id, point, color)
    }

    /// Inserts a new node before `id` with an explicit colour.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NodeNotFound`] if `id` is not in this chain.
    pub fn insert_before_with(
        &mut self,
        id: NodeId,
        point: Point2,
        color: Color,
    ) -> Result<NodeId, ChainError> {
        let old_prev = self.node(id)?.prev;
        let new = self.nodes.insert(NodeData {
            point,
            color,
            next: Some(id),
            prev: old_prev,
        });
        match old_prev {
            Some(prev) => self.nodes[prev].next = Some(new),
            None => self.head = new,
        }
        self.nodes[id].prev = Some(new);
        Ok(new)
    }

    /// Iterates node ids in chain order, visiting every node exactly once.
    ///
    /// An open chain terminates at the null link; a loop stops just before
    /// returning to the start.
    #[must_use]
    pub fn node_ids(&self) -> NodeIds<'_> {
        NodeIds {
            chain: self,
            next: Some(self.head),
            start: self.head,
        }
    }

    /// Iterates node positions in chain order.
    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.node_ids().map(|id| self.nodes[id].point)
    }

    /// Iterates the chain's segments as `(start, end)` node pairs.
    ///
    /// A loop chain yields the wrap segment `tail → head` last.
    pub fn segments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.node_ids()
            .filter_map(|id| self.nodes[id].next.map(|next| (id, next)))
    }

    /// Aggregate segment-length statistics, computed in a single traversal.
    #[must_use]
    pub fn segment_stats(&self) -> SegmentStats {
        let mut count = 0;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut max = 0.0_f64;
        let mut min = f64::INFINITY;

        for (a, b) in self.segments() {
            let len_sq = (self.nodes[b].point - self.nodes[a].point).norm_squared();
            let len = len_sq.sqrt();
            count += 1;
            sum += len;
            sum_sq += len_sq;
            max = max.max(len);
            min = min.min(len);
        }

        if count == 0 {
            min = 0.0;
        }
        SegmentStats {
            count,
            sum,
            sum_sq,
            max,
            min,
        }
    }
}

/// Segment-length statistics for one chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStats {
    /// Number of segments.
    pub count: usize,
    /// Sum of segment lengths.
    pub sum: f64,
    /// Sum of squared segment lengths.
    pub sum_sq: f64,
    /// Longest segment (0 for a chain without segments).
    pub max: f64,
    /// Shortest segment (0 for a chain without segments).
    pub min: f64,
}

/// Iterator over the node ids of a [`Chain`] in order.
pub struct NodeIds<'a> {
    chain: &'a Chain,
    next: Option<NodeId>,
    start: NodeId,
}

impl Iterator for NodeIds<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let follow = self.chain.nodes.get(current)?.next;
        self.next = match follow {
            Some(id) if id == self.start => None,
            other => other,
        };
        Some(current)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_points() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn from_points_empty_is_error() {
        assert!(matches!(
            Chain::from_points(&[], Color::WHITE, false),
            Err(ChainError::Empty)
        ));
    }

    #[test]
    fn open_chain_links() {
        let chain = Chain::from_points(&square_points(), Color::WHITE, false).unwrap();
        assert_eq!(chain.len(), 4);
        assert!(!chain.is_loop());
        assert!(chain.prev(chain.head()).unwrap().is_none());
        assert!(chain.next(chain.tail()).unwrap().is_none());
        assert_eq!(chain.segments().count(), 3);
    }

    #[test]
    fn loop_chain_links() {
        let chain = Chain::from_points(&square_points(), Color::WHITE, true).unwrap();
        assert!(chain.is_loop());
        assert_eq!(chain.next(chain.tail()).unwrap(), Some(chain.head()));
        assert_eq!(chain.prev(chain.head()).unwrap(), Some(chain.tail()));
        assert_eq!(chain.segments().count(), 4);
    }

    #[test]
    fn traversal_visits_each_node_once() {
        let chain = Chain::from_points(&square_points(), Color::WHITE, true).unwrap();
        let ids: Vec<NodeId> = chain.node_ids().collect();
        assert_eq!(ids.len(), 4);
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn insert_after_splices_between() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)];
        let mut chain = Chain::from_points(&pts, Color::new(0.5, 0.0, 0.0), false).unwrap();
        let head = chain.head();
        let tail = chain.tail();

        let mid = chain.insert_after(head, Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.next(head).unwrap(), Some(mid));
        assert_eq!(chain.prev(mid).unwrap(), Some(head));
        assert_eq!(chain.next(mid).unwrap(), Some(tail));
        assert_eq!(chain.prev(tail).unwrap(), Some(mid));
        // New node inherits the host's colour.
        assert_eq!(chain.color(mid).unwrap(), Color::new(0.5, 0.0, 0.0));
        // Tail is untouched by an interior splice.
        assert_eq!(chain.tail(), tail);
    }

    #[test]
    fn insert_after_open_end_moves_tail() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let mut chain = Chain::from_points(&pts, Color::WHITE, false).unwrap();
        let tail = chain.tail();
        let new = chain.insert_after(tail, Point2::new(2.0, 0.0)).unwrap();
        assert_eq!(chain.tail(), new);
        assert!(chain.next(new).unwrap().is_none());
    }

    #[test]
    fn insert_before_open_start_moves_head() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let mut chain = Chain::from_points(&pts, Color::WHITE, false).unwrap();
        let head = chain.head();
        let new = chain.insert_before(head, Point2::new(-1.0, 0.0)).unwrap();
        assert_eq!(chain.head(), new);
        assert!(chain.prev(new).unwrap().is_none());
        assert_eq!(chain.next(new).unwrap(), Some(head));
    }

    #[test]
    fn insert_with_explicit_color() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let mut chain = Chain::from_points(&pts, Color::WHITE, false).unwrap();
        let head = chain.head();
        let red = Color::new(1.0, 0.0, 0.0);
        let new = chain
            .insert_after_with(head, Point2::new(0.5, 0.0), red)
            .unwrap();
        assert_eq!(chain.color(new).unwrap(), red);
    }

    #[test]
    fn insert_preserves_loop_topology() {
        let mut chain = Chain::from_points(&square_points(), Color::WHITE, true).unwrap();
        let head = chain.head();
        chain.insert_after(head, Point2::new(0.5, -0.1)).unwrap();
        assert!(chain.is_loop());
        assert_eq!(chain.node_ids().count(), 5);
        assert_eq!(chain.segments().count(), 5);
    }

    #[test]
    fn unknown_node_is_error() {
        let mut chain =
            Chain::from_points(&[Point2::new(0.0, 0.0)], Color::WHITE, false).unwrap();
        // A slot the one-node chain's arena has never allocated.
        let other = Chain::from_points(
            &[Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)],
            Color::WHITE,
            false,
        )
        .unwrap();
        let foreign = other.tail();
        assert!(matches!(
            chain.insert_after(foreign, Point2::new(2.0, 2.0)),
            Err(ChainError::NodeNotFound)
        ));
    }

    #[test]
    fn stats_unit_square() {
        let chain = Chain::from_points(&square_points(), Color::WHITE, true).unwrap();
        let stats = chain.segment_stats();
        assert_eq!(stats.count, 4);
        assert_relative_eq!(stats.sum, 4.0, epsilon = 1e-12);
        assert_relative_eq!(stats.sum_sq, 4.0, epsilon = 1e-12);
        assert_relative_eq!(stats.max, 1.0, epsilon = 1e-12);
        assert_relative_eq!(stats.min, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn stats_single_node() {
        let chain = Chain::from_points(&[Point2::new(0.0, 0.0)], Color::WHITE, false).unwrap();
        let stats = chain.segment_stats();
        assert_eq!(stats.count, 0);
        assert_relative_eq!(stats.sum, 0.0);
        assert_relative_eq!(stats.min, 0.0);
        assert_relative_eq!(stats.max, 0.0);
    }
}
