use bevy::prelude::*;

/// Node positions and edge index pairs for a crystal.
#[derive(Debug, Clone, Default)]
pub struct CrystalLattice {
    pub positions: Vec<Vec3>,
    pub edges: Vec<[u32; 2]>,
}

impl CrystalLattice {
    /// Cubic lattice of `cells` cells per axis, centred on the origin, with
    /// an edge between each pair of axis-aligned neighbours.
    pub fn cubic(cells: u32, spacing: f32) -> Self {
        let side = cells + 1;
        let offset = cells as f32 * spacing * 0.5;
        let index = |x: u32, y: u32, z: u32| x + side * (y + side * z);

        let mut positions = Vec::with_capacity((side * side * side) as usize);
        let mut edges = Vec::new();

        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    positions.push(
                        Vec3::new(x as f32, y as f32, z as f32) * spacing - Vec3::splat(offset),
                    );

                    let here = index(x, y, z);
                    if x + 1 < side {
                        edges.push([here, index(x + 1, y, z)]);
                    }
                    if y + 1 < side {
                        edges.push([here, index(x, y + 1, z)]);
                    }
                    if z + 1 < side {
                        edges.push([here, index(x, y, z + 1)]);
                    }
                }
            }
        }

        Self { positions, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_lattice_counts() {
        let lattice = CrystalLattice::cubic(4, 1.0);
        assert_eq!(lattice.positions.len(), 125);
        assert_eq!(lattice.edges.len(), 3 * 25 * 4);
    }

    #[test]
    fn cubic_lattice_is_centred() {
        let lattice = CrystalLattice::cubic(2, 3.0);
        let centre = lattice.positions.iter().copied().sum::<Vec3>() / lattice.positions.len() as f32;
        assert!(centre.length() < 1e-4);
    }
}
