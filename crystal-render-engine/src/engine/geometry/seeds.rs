use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::engine::lod::uniforms::LodUniforms;

const SEED_DOT: Vec3 = Vec3::new(12.9898, 78.233, 45.164);
const SEED_SCALE: f32 = 43758.5453;

/// Hash a position into `[0, 1)`, matching the shader-side seed.
pub fn position_seed(position: Vec3) -> f32 {
    let value = position.dot(SEED_DOT).sin() * SEED_SCALE;
    value - value.floor()
}

/// An element survives density discard when its seed is within the retained fraction.
pub fn is_retained(seed: f32, density_fraction: f32) -> bool {
    seed <= density_fraction
}

pub fn is_highlight_edge(edge_seed: f32, pool_fraction: f32) -> bool {
    edge_seed < pool_fraction
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCounts {
    pub nodes: usize,
    pub lines: usize,
    pub highlight_lines: usize,
}

/// Seeded crystal geometry attached to a view by the dataset loader.
#[derive(Component, Debug, Clone, Default)]
pub struct CrystalGeometry {
    positions: Vec<Vec3>,
    /// Edges whose endpoints both exist.
    edges: Vec<[u32; 2]>,
    node_seeds: Vec<f32>,
    /// Density hash of each edge midpoint.
    segment_seeds: Vec<f32>,
    /// Random per-edge value fixing highlight pool membership.
    edge_seeds: Vec<f32>,
}

impl CrystalGeometry {
    /// Build seeds for a node/edge set. Edges referencing missing nodes are dropped.
    pub fn build(positions: &[Vec3], edges: &[[u32; 2]], rng_seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let node_seeds = positions.iter().copied().map(position_seed).collect();

        let mut kept_edges = Vec::with_capacity(edges.len());
        let mut segment_seeds = Vec::with_capacity(edges.len());
        let mut edge_seeds = Vec::with_capacity(edges.len());
        let mut dropped = 0usize;

        for &[a, b] in edges {
            let (Some(&start), Some(&end)) =
                (positions.get(a as usize), positions.get(b as usize))
            else {
                dropped += 1;
                continue;
            };
            kept_edges.push([a, b]);
            segment_seeds.push(position_seed((start + end) * 0.5));
            edge_seeds.push(rng.r#gen::<f32>());
        }

        if dropped > 0 {
            warn!("Dropped {} edges referencing missing nodes", dropped);
        }

        Self {
            positions: positions.to_vec(),
            edges: kept_edges,
            node_seeds,
            segment_seeds,
            edge_seeds,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_seeds.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_seeds.len()
    }

    /// Node positions with their density seeds.
    pub fn nodes(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        self.positions.iter().copied().zip(self.node_seeds.iter().copied())
    }

    /// Edge endpoints with their density hash and pool seed.
    pub fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3, f32, f32)> + '_ {
        self.edges
            .iter()
            .zip(&self.segment_seeds)
            .zip(&self.edge_seeds)
            .map(|((&[a, b], &segment), &edge)| {
                (
                    self.positions[a as usize],
                    self.positions[b as usize],
                    segment,
                    edge,
                )
            })
    }

    #[cfg(test)]
    fn highlight_pool_size(&self, pool_fraction: f32) -> usize {
        self.edge_seeds
            .iter()
            .filter(|&&seed| is_highlight_edge(seed, pool_fraction))
            .count()
    }

    /// Elements that pass density discard under `uniforms`. Distance fade is
    /// view dependent and not counted.
    pub fn visible_counts(&self, uniforms: &LodUniforms) -> DrawCounts {
        let nodes = self
            .node_seeds
            .iter()
            .filter(|&&seed| is_retained(seed, uniforms.node_density))
            .count();

        let (highlight_lines, lines) = self
            .edge_seeds
            .iter()
            .zip(&self.segment_seeds)
            .fold((0, 0), |(pool, standard), (&edge, &segment)| {
                if is_highlight_edge(edge, uniforms.xor_threshold) {
                    (pool + 1, standard)
                } else if is_retained(segment, uniforms.line_density) {
                    (pool, standard + 1)
                } else {
                    (pool, standard)
                }
            });

        DrawCounts {
            nodes,
            lines,
            highlight_lines,
        }
    }
}
