use crate::models::{ParticleId, ParticleStore};
use crate::utils::{Vector2, MIN_SPLIT_HALF_DIMENSION, STRADDLE_FACTOR};

/// Represents a square region in 2D space.
///
/// The y axis grows downwards (screen convention), so the "north" quadrants have the
/// smaller y coordinate.
///
/// # Examples
///
/// ```
/// use particle_sandbox::quadtree::QuadTreeBox;
/// use particle_sandbox::utils::Vector2;
///
/// let quad = QuadTreeBox::new(Vector2::ZERO, 1.0);
/// let [nw, ne, sw, se] = quad.subdivide();
///
/// assert_eq!(nw.center, Vector2::new(-0.5, -0.5));
/// assert_eq!(ne.center, Vector2::new(0.5, -0.5));
/// assert_eq!(sw.center, Vector2::new(-0.5, 0.5));
/// assert_eq!(se.center, Vector2::new(0.5, 0.5));
/// assert_eq!(se.half_dimension, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTreeBox {
    pub center: Vector2,
    /// Half the length of one side.
    pub half_dimension: f64,
}

impl QuadTreeBox {
    pub fn new(center: Vector2, half_dimension: f64) -> Self {
        QuadTreeBox { center, half_dimension }
    }

    /// Strict containment on all four sides. Points on an edge belong to neither neighbour.
    pub fn contains(&self, point: Vector2) -> bool {
        point.x < self.center.x + self.half_dimension
            && point.x > self.center.x - self.half_dimension
            && point.y < self.center.y + self.half_dimension
            && point.y > self.center.y - self.half_dimension
    }

    /// Containment closed on the north and west edges, open on the south and east ones.
    /// Sibling quadrants tile their parent without overlap under this test.
    pub fn contains_half_open(&self, point: Vector2) -> bool {
        let min = self.min();
        let max = min + self.size();
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }

    /// Top-left corner.
    pub fn min(&self) -> Vector2 {
        self.center - Vector2::splat(self.half_dimension)
    }

    /// Full side lengths.
    pub fn size(&self) -> Vector2 {
        Vector2::splat(self.half_dimension * 2.0)
    }

    /// The four quadrants in `[nw, ne, sw, se]` order.
    pub fn subdivide(&self) -> [QuadTreeBox; 4] {
        let hd = self.half_dimension / 2.0;
        let Vector2 { x: cx, y: cy } = self.center;
        [
            QuadTreeBox::new(Vector2::new(cx - hd, cy - hd), hd), // NW
            QuadTreeBox::new(Vector2::new(cx + hd, cy - hd), hd), // NE
            QuadTreeBox::new(Vector2::new(cx - hd, cy + hd), hd), // SW
            QuadTreeBox::new(Vector2::new(cx + hd, cy + hd), hd), // SE
        ]
    }

    /// Position in `[nw, ne, sw, se]` of the half-open quadrant holding `point`.
    fn quadrant_of(&self, point: Vector2) -> usize {
        let east = point.x >= self.center.x;
        let south = point.y >= self.center.y;
        match (south, east) {
            (false, false) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (true, true) => 3,
        }
    }
}

/// Index of a node inside a [`QuadTree`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A particle's membership in a leaf bucket.
///
/// A particle near a split line is copied into several leaves, but exactly one copy is
/// `owned`: the one in the leaf whose half-open quadrant holds the particle's centre.
/// Only the owning leaf applies static lines to the particle; a halo copy is moved only
/// by pairs anchored in that leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafEntry {
    pub id: ParticleId,
    pub owned: bool,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(Vec<LeafEntry>),
    /// Children in `[nw, ne, sw, se]` order.
    Branch([NodeId; 4]),
}

#[derive(Debug, Clone)]
struct Node {
    boundary: QuadTreeBox,
    depth: usize,
    kind: NodeKind,
}

/// Region quadtree over particle handles, stored as a flat arena.
///
/// The tree is meant to be thrown away and rebuilt every tick: insert everything into the
/// root, then [`split`](QuadTree::split) once.
///
/// # Examples
///
/// ```
/// use particle_sandbox::models::{Particle, ParticleStore};
/// use particle_sandbox::quadtree::{QuadTree, QuadTreeBox};
/// use particle_sandbox::utils::Vector2;
///
/// let mut store = ParticleStore::new();
/// for i in 0..8 {
///     let x = if i % 2 == 0 { -50.0 } else { 50.0 };
///     store.insert(Particle::new(Vector2::new(x, i as f64), 1.0).unwrap());
/// }
///
/// let tree = QuadTree::build(QuadTreeBox::new(Vector2::ZERO, 100.0), 4, &store);
/// let leaves = tree.leaves();
/// assert_eq!(leaves.len(), 4);
/// assert!(leaves.iter().all(|&leaf| tree.entries(leaf).len() <= 4));
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    capacity: usize,
}

impl QuadTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Creates a tree consisting of a single empty leaf.
    pub fn new(boundary: QuadTreeBox, capacity: usize) -> Self {
        QuadTree {
            nodes: vec![Node {
                boundary,
                depth: 0,
                kind: NodeKind::Leaf(Vec::new()),
            }],
            capacity,
        }
    }

    /// Inserts every particle of `particles` and splits.
    pub fn build(boundary: QuadTreeBox, capacity: usize, particles: &ParticleStore) -> Self {
        let mut tree = QuadTree::new(boundary, capacity);
        for (id, _) in particles.iter() {
            tree.insert_particle(id);
        }
        tree.split(particles);
        tree
    }

    /// Appends a handle to the root bucket. Has no effect once the root has been split.
    pub fn insert_particle(&mut self, id: ParticleId) {
        if let NodeKind::Leaf(bucket) = &mut self.nodes[Self::ROOT.0].kind {
            bucket.push(LeafEntry { id, owned: true });
        }
    }

    /// Recursively subdivides every over-full node.
    ///
    /// A node is left alone when it holds at most `capacity` entries or when halving it
    /// would reach the minimum half dimension. Handles missing from `particles` are dropped.
    pub fn split(&mut self, particles: &ParticleStore) {
        self.split_node(Self::ROOT, particles);
    }

    fn split_node(&mut self, node: NodeId, particles: &ParticleStore) {
        let Node { boundary, depth, .. } = self.nodes[node.0];
        let bucket_len = match &self.nodes[node.0].kind {
            NodeKind::Leaf(bucket) => bucket.len(),
            NodeKind::Branch(_) => return,
        };
        if bucket_len <= self.capacity || boundary.half_dimension / 2.0 <= MIN_SPLIT_HALF_DIMENSION {
            return;
        }

        let bucket = match &mut self.nodes[node.0].kind {
            NodeKind::Leaf(bucket) => std::mem::take(bucket),
            NodeKind::Branch(_) => return,
        };

        let center = boundary.center;
        let mut buckets: [Vec<LeafEntry>; 4] = Default::default();
        for entry in bucket {
            let Some(particle) = particles.get(entry.id) else {
                continue;
            };
            let position = particle.position;
            let reach = particle.radius * STRADDLE_FACTOR;
            let owner = boundary.quadrant_of(position);

            let east = position.x >= center.x - reach;
            let west = position.x <= center.x + reach;
            let south = position.y >= center.y - reach;
            let north = position.y <= center.y + reach;

            let touches = [west && north, east && north, west && south, east && south];
            for (quadrant, bucket) in buckets.iter_mut().enumerate() {
                if touches[quadrant] {
                    bucket.push(LeafEntry {
                        id: entry.id,
                        owned: entry.owned && quadrant == owner,
                    });
                }
            }
        }

        let first = self.nodes.len();
        let children = [NodeId(first), NodeId(first + 1), NodeId(first + 2), NodeId(first + 3)];
        for (child_boundary, child_bucket) in boundary.subdivide().into_iter().zip(buckets) {
            self.nodes.push(Node {
                boundary: child_boundary,
                depth: depth + 1,
                kind: NodeKind::Leaf(child_bucket),
            });
        }
        self.nodes[node.0].kind = NodeKind::Branch(children);

        for child in children {
            self.split_node(child, particles);
        }
    }

    /// Drops every node below the root and empties the root bucket.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[Self::ROOT.0].kind = NodeKind::Leaf(Vec::new());
    }

    /// All leaves in depth-first `nw, ne, sw, se` order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_leaves(Self::ROOT, &mut out);
        out
    }

    /// Appends the leaves below `node` to `out` in `nw, ne, sw, se` order.
    pub fn collect_leaves(&self, node: NodeId, out: &mut Vec<NodeId>) {
        match &self.nodes[node.0].kind {
            NodeKind::Leaf(_) => out.push(node),
            NodeKind::Branch(children) => {
                for &child in children {
                    self.collect_leaves(child, out);
                }
            }
        }
    }

    /// First leaf (in leaf order) whose boundary strictly contains `point`.
    pub fn leaf_at(&self, point: Vector2) -> Option<NodeId> {
        self.leaves()
            .into_iter()
            .find(|&leaf| self.nodes[leaf.0].boundary.contains(point))
    }

    pub fn boundary(&self, node: NodeId) -> QuadTreeBox {
        self.nodes[node.0].boundary
    }

    /// Bucket of a leaf. Branches have an empty bucket.
    pub fn entries(&self, node: NodeId) -> &[LeafEntry] {
        match &self.nodes[node.0].kind {
            NodeKind::Leaf(bucket) => bucket,
            NodeKind::Branch(_) => &[],
        }
    }

    pub fn children(&self, node: NodeId) -> Option<[NodeId; 4]> {
        match &self.nodes[node.0].kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Branch(children) => Some(*children),
        }
    }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Leaf(_))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest node; a lone root has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn root_boundary(&self) -> QuadTreeBox {
        self.boundary(Self::ROOT)
    }
}
