use crate::chain::{Chain, NodeId, SegmentStats};
use crate::error::{ChainError, ConfigError, Result};
use crate::solver::SplitSolver;

/// Parameters for one subdivision run.
#[derive(Debug, Clone)]
pub struct FillConfig {
    /// Initial clearance radius.
    pub radius: f64,
    /// Multiplicative radius reduction applied after each chain of a pass.
    pub shrink_factor: f64,
    /// Number of subdivision passes.
    pub max_depth: u32,
    /// Subdivide in reverse traversal order on alternate depths.
    pub zigzag: bool,
    /// Destination identifier handed through to the output collaborator;
    /// opaque to the engine.
    pub target: String,
}

impl FillConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "radius",
                value: self.radius,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        if !self.shrink_factor.is_finite() || self.shrink_factor <= 0.0 {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "shrink_factor",
                value: self.shrink_factor,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

/// The full set of curves being subdivided.
///
/// Chain 0 is the boundary: it constrains every split but is never itself
/// subdivided. The remaining chains are filled in by [`CurveSet::subdivide`],
/// which pushes a new vertex onto the perpendicular bisector of every
/// segment, as far out as the clearance radius allows, over `max_depth`
/// passes with the radius shrinking geometrically between chains.
#[derive(Debug)]
pub struct CurveSet {
    chains: Vec<Chain>,
    radius: f64,
    shrink_factor: f64,
    max_depth: u32,
    zigzag: bool,
    target: String,
}

impl CurveSet {
    /// Creates a curve set from a validated configuration and the boundary
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] when the radius or the
    /// shrink factor is not positive.
    pub fn new(config: FillConfig, boundary: Chain) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chains: vec![boundary],
            radius: config.radius,
            shrink_factor: config.shrink_factor,
            max_depth: config.max_depth,
            zigzag: config.zigzag,
            target: config.target,
        })
    }

    /// Appends a curve to be subdivided inside the boundary.
    pub fn push_curve(&mut self, chain: Chain) {
        self.chains.push(chain);
    }

    /// The boundary chain.
    #[must_use]
    pub fn boundary(&self) -> &Chain {
        &self.chains[0]
    }

    /// The non-boundary curves, in insertion order.
    pub fn curves(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter().skip(1)
    }

    /// All chains, boundary first.
    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// The working clearance radius. After [`CurveSet::subdivide`] this is
    /// the radius in force during the last completed pass.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The opaque destination identifier from the configuration.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    /// Splits the segment starting at `node` of chain `chain_idx`.
    ///
    /// The break point is found by scanning every node and segment of every
    /// chain (boundary included) at the current radius, excluding the two
    /// segment endpoints and the segments adjacent to them, and is inserted
    /// after `node`, inheriting its colour. This is the only place new
    /// vertices are created.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::ChainNotFound`] for a bad chain index and
    /// [`ChainError::MissingSuccessor`] when `node` has no successor (the
    /// segment to split does not exist).
    pub fn split(&mut self, chain_idx: usize, node: NodeId) -> Result<NodeId> {
        let point = {
            let chain = self
                .chains
                .get(chain_idx)
                .ok_or(ChainError::ChainNotFound(chain_idx))?;
            let succ = chain.next(node)?.ok_or(ChainError::MissingSuccessor)?;
            let a = chain.point(node)?;
            let b = chain.point(succ)?;

            let mut solver = SplitSolver::new(a, b, self.radius);
            for (ci, other) in self.chains.iter().enumerate() {
                let same = ci == chain_idx;
                for id in other.node_ids() {
                    if !(same && (id == node || id == succ)) {
                        solver.constrain_point(&other.point(id)?);
                    }
                    if let Some(next) = other.next(id)? {
                        // The split segment itself and the two segments
                        // touching its endpoints never constrain it.
                        let adjacent = same && (id == node || id == succ || next == node);
                        if !adjacent {
                            solver.constrain_segment(&other.point(id)?, &other.point(next)?);
                        }
                    }
                }
            }
            solver.resolve()
        };

        let chain = self
            .chains
            .get_mut(chain_idx)
            .ok_or(ChainError::ChainNotFound(chain_idx))?;
        Ok(chain.insert_after(node, point)?)
    }

    /// Runs the full subdivision schedule.
    ///
    /// Each depth makes one pass over the non-boundary chains, splitting
    /// every segment that existed when the pass reached its chain; the
    /// radius is multiplied by the shrink factor after each chain. With
    /// `zigzag` set, every other depth walks the chains backwards from
    /// their tails instead. The final division restores the radius of the
    /// last pass actually run.
    ///
    /// # Errors
    ///
    /// Propagates chain-structure errors; these indicate a malformed curve
    /// set, not a geometric failure.
    pub fn subdivide(&mut self) -> Result<()> {
        let mut depth = 1;
        while depth <= self.max_depth {
            self.forward_pass()?;
            depth += 1;

            if self.zigzag && depth <= self.max_depth {
                self.backward_pass()?;
                depth += 1;
            }
        }
        self.radius /= self.shrink_factor;
        Ok(())
    }

    /// One pass splitting every segment of every non-boundary chain in
    /// `next` order.
    ///
    /// The successor is captured before each split so the walk advances
    /// past the freshly inserted node: only segments present at the start
    /// of the pass are split, which fixes the branching factor at one new
    /// vertex per original segment per pass.
    fn forward_pass(&mut self) -> Result<()> {
        for ci in 1..self.chains.len() {
            if self.chains[ci].len() >= 2 {
                let head = self.chains[ci].head();
                let mut here = head;
                loop {
                    let Some(succ) = self.chains[ci].next(here)? else {
                        break;
                    };
                    self.split(ci, here)?;
                    here = succ;
                    if here == head {
                        break;
                    }
                }
            }
            self.radius *= self.shrink_factor;
        }
        Ok(())
    }

    /// The reverse-order pass used on alternate depths in zigzag mode:
    /// walks from each chain's tail following `prev`, splitting the segment
    /// that leaves each visited node.
    fn backward_pass(&mut self) -> Result<()> {
        for ci in 1..self.chains.len() {
            if self.chains[ci].len() >= 2 {
                let tail = self.chains[ci].tail();
                let mut here = tail;
                loop {
                    let prev = self.chains[ci].prev(here)?;
                    if self.chains[ci].next(here)?.is_some() {
                        self.split(ci, here)?;
                    }
                    let Some(p) = prev else {
                        break;
                    };
                    here = p;
                    if here == tail {
                        break;
                    }
                }
            }
            self.radius *= self.shrink_factor;
        }
        Ok(())
    }

    /// Per-curve segment statistics (boundary excluded), one traversal each.
    #[must_use]
    pub fn statistics(&self) -> Vec<SegmentStats> {
        self.curves().map(Chain::segment_stats).collect()
    }
}
