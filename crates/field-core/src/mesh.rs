//! Neighbour wiring. Particles are grouped into triangles by raw index order
//! (`[0,1,2]`, `[3,4,5]`, ...), not by geometry; a trailing group with fewer
//! than three members gets no triangle.

use crate::particle::Particle;

pub fn triangulate(count: usize) -> Vec<[usize; 3]> {
    (0..count)
        .step_by(3)
        .filter(|&i| i + 2 < count)
        .map(|i| [i, i + 1, i + 2])
        .collect()
}

/// Give every particle the other members of each triangle it belongs to.
pub fn assign_neighbors(particles: &mut [Particle], triangles: &[[usize; 3]]) {
    for (i, particle) in particles.iter_mut().enumerate() {
        for tri in triangles.iter().filter(|t| t.contains(&i)) {
            for &v in tri {
                if v != i && !particle.neighbors.contains(&v) {
                    particle.neighbors.push(v);
                }
            }
        }
    }
}

/// Edges drawn by the debug mesh overlay: `v → v+1`, skipping the wrap from
/// the last vertex of one group to the first of the next.
pub fn mesh_edges(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..count.saturating_sub(1))
        .filter(|v| (v + 1) % 3 != 0)
        .map(|v| (v, v + 1))
}
