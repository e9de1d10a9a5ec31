//! Seeded force-directed (Fruchterman-Reingold) layout.
//!
//! Positions start uniformly random in the unit square, then move under
//! repulsion between every pair of nodes (`k²/d`) and attraction along
//! edges (`d²/k`). The step size is capped by a temperature that cools
//! linearly. The final positions are centred on the origin and scaled so
//! the largest coordinate magnitude is 1.

use crate::config::LayoutSettings;
use crate::error::Result;
use crate::graph::PatternGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MIN_DISTANCE: f64 = 0.01;

/// 2-D coordinates, indexed like [`PatternGraph::nodes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: Vec<(f64, f64)>,
}

impl Layout {
    /// Wrap precomputed positions, one per node in graph order.
    pub fn new(positions: Vec<(f64, f64)>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<(f64, f64)> {
        self.positions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringLayout {
    pub seed: u64,
    /// Optimal distance between nodes.
    pub k: f64,
    pub iterations: usize,
    /// Stop once the mean displacement per node drops below this.
    pub threshold: f64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::from(&LayoutSettings::default())
    }
}

impl From<&LayoutSettings> for SpringLayout {
    fn from(settings: &LayoutSettings) -> Self {
        Self {
            seed: settings.seed,
            k: settings.k,
            iterations: settings.iterations,
            threshold: settings.threshold,
        }
    }
}

impl From<&SpringLayout> for LayoutSettings {
    fn from(layout: &SpringLayout) -> Self {
        Self {
            seed: layout.seed,
            k: layout.k,
            iterations: layout.iterations,
            threshold: layout.threshold,
        }
    }
}

impl SpringLayout {
    /// Fails with `NetworkError::Config` when `k` or `threshold` would make
    /// the forces undefined.
    pub fn compute(&self, graph: &PatternGraph) -> Result<Layout> {
        LayoutSettings::from(self).validate()?;

        let n = graph.node_count();
        if n == 0 {
            return Ok(Layout::default());
        }
        if n == 1 {
            return Ok(Layout {
                positions: vec![(0.0, 0.0)],
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pos: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
            .collect();

        let mut adjacent = vec![vec![false; n]; n];
        for (a, b) in graph.edge_positions() {
            if a != b {
                adjacent[a][b] = true;
                adjacent[b][a] = true;
            }
        }

        let k = self.k;
        let mut temperature = 0.1 * spread(&pos);
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for iteration in 0..self.iterations {
            let mut displacement = vec![(0.0_f64, 0.0_f64); n];
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let distance = dx.hypot(dy).max(MIN_DISTANCE);
                    let attraction = if adjacent[i][j] { distance / k } else { 0.0 };
                    let force = k * k / (distance * distance) - attraction;
                    displacement[i].0 += dx * force;
                    displacement[i].1 += dy * force;
                }
            }

            let mut moved = 0.0;
            for (p, (dx, dy)) in pos.iter_mut().zip(displacement) {
                let length = dx.hypot(dy).max(MIN_DISTANCE);
                let step_x = dx * temperature / length;
                let step_y = dy * temperature / length;
                p.0 += step_x;
                p.1 += step_y;
                moved += step_x.hypot(step_y);
            }

            temperature -= cooling;
            if moved / (n as f64) < self.threshold {
                tracing::debug!(iteration, "Spring layout converged");
                break;
            }
        }

        Ok(Layout {
            positions: rescale(pos),
        })
    }
}

/// Largest extent of the point cloud along either axis.
fn spread(pos: &[(f64, f64)]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in pos {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    (max_x - min_x).max(max_y - min_y)
}

fn rescale(mut pos: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.1).sum::<f64>() / n;
    for p in &mut pos {
        p.0 -= mean_x;
        p.1 -= mean_y;
    }
    let lim = pos
        .iter()
        .map(|p| p.0.abs().max(p.1.abs()))
        .fold(0.0_f64, f64::max);
    if lim > 0.0 {
        for p in &mut pos {
            p.0 /= lim;
            p.1 /= lim;
        }
    }
    pos
}
