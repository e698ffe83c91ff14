use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    config::{INITIAL_CELL_CAPACITY, MAX_RAY_CELLS},
    core::rigidbody::RigidBody,
    utils::allocator::{Arena, BodyHandle},
};

const HASH_X: u32 = 73_856_093;
const HASH_Y: u32 = 19_349_663;
const HASH_Z: u32 = 83_492_791;

/// Integer coordinate of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Neighbouring coordinate, or `None` when it falls outside the `i32` range.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Bucket index for `coord` in a table of `bucket_count` buckets.
///
/// Distinct coordinates can share a bucket; chains compare the full triple.
pub fn hash_cell(coord: CellCoord, bucket_count: usize) -> usize {
    let h = (coord.x as u32).wrapping_mul(HASH_X)
        ^ (coord.y as u32).wrapping_mul(HASH_Y)
        ^ (coord.z as u32).wrapping_mul(HASH_Z);
    h as usize % bucket_count
}

/// One occupied cell in a bucket chain.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub coord: CellCoord,
    pub bodies: Vec<BodyHandle>,
}

impl GridCell {
    fn new(coord: CellCoord) -> Self {
        Self {
            coord,
            bodies: Vec::with_capacity(INITIAL_CELL_CAPACITY),
        }
    }
}

/// Uniform-cell spatial hash used as the broad-phase.
///
/// The grid is derived state: it is cleared and refilled from body positions
/// on every [`SpatialHashGrid::rebuild`] and never updated incrementally.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    buckets: Vec<Vec<GridCell>>,
    body_count: usize,
}

impl SpatialHashGrid {
    /// `cell_size` must be positive and `bucket_count` non-zero;
    /// [`crate::config::SceneConfig::validate`] checks both.
    pub fn new(cell_size: f32, bucket_count: usize) -> Self {
        Self {
            cell_size,
            buckets: vec![Vec::new(); bucket_count.max(1)],
            body_count: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Cell containing `position`.
    ///
    /// Coordinates saturate at the `i32` range: every position further than
    /// `i32::MAX` cells from the origin along an axis lands in the edge cell,
    /// and NaN maps to cell 0.
    pub fn cell_of(&self, position: Vec3) -> CellCoord {
        CellCoord::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.body_count = 0;
    }

    pub fn insert(&mut self, handle: BodyHandle, position: Vec3) {
        let coord = self.cell_of(position);
        let index = hash_cell(coord, self.buckets.len());
        let bucket = &mut self.buckets[index];

        match bucket.iter_mut().find(|cell| cell.coord == coord) {
            Some(cell) => cell.bodies.push(handle),
            None => {
                let mut cell = GridCell::new(coord);
                cell.bodies.push(handle);
                bucket.push(cell);
            }
        }
        self.body_count += 1;
    }

    /// Clears the grid and re-inserts every body at its current position.
    pub fn rebuild(&mut self, bodies: &Arena<RigidBody>) {
        self.clear();
        for (handle, body) in bodies.enumerate() {
            self.insert(handle, body.position);
        }
    }

    /// Occupants of the cell at `coord`, if any.
    pub fn cell(&self, coord: CellCoord) -> Option<&[BodyHandle]> {
        let index = hash_cell(coord, self.buckets.len());
        self.buckets[index]
            .iter()
            .find(|cell| cell.coord == coord)
            .map(|cell| cell.bodies.as_slice())
    }

    /// Every occupied cell, in bucket order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.buckets.iter().flatten()
    }

    pub fn occupied_cells(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn body_count(&self) -> usize {
        self.body_count
    }

    /// Number of distinct cells chained in bucket `index`.
    pub fn chain_len(&self, index: usize) -> usize {
        self.buckets.get(index).map_or(0, Vec::len)
    }

    /// Unordered pairs of bodies sharing exactly the same cell.
    ///
    /// Bodies in adjacent cells are never paired, even when they touch.
    pub fn candidate_pairs(&self) -> Vec<(BodyHandle, BodyHandle)> {
        let mut pairs = Vec::new();
        for cell in self.cells() {
            for (i, &a) in cell.bodies.iter().enumerate() {
                for &b in &cell.bodies[i + 1..] {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Bodies in the 3×3×3 block of cells around `position`, minus `handle`.
    pub fn query_nearby(&self, handle: BodyHandle, position: Vec3) -> Vec<BodyHandle> {
        let center = self.cell_of(position);
        let mut results = Vec::new();

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(coord) = center.offset(dx, dy, dz) else {
                        continue;
                    };
                    if let Some(bodies) = self.cell(coord) {
                        results.extend(bodies.iter().copied().filter(|&other| other != handle));
                    }
                }
            }
        }

        results
    }

    /// Occupants of every cell the segment `start..end` passes through, in
    /// walk order from `start`.
    ///
    /// Cells are stepped one face at a time, so a body is only reported when
    /// its position lies in a crossed cell. The walk stops at the `i32` edge of
    /// the grid or after [`MAX_RAY_CELLS`] cells. Non-finite endpoints yield
    /// nothing.
    pub fn query_ray(&self, start: Vec3, end: Vec3) -> Vec<BodyHandle> {
        let mut results = Vec::new();
        if !start.is_finite() || !end.is_finite() {
            return results;
        }

        let last = self.cell_of(end);
        let mut coord = self.cell_of(start).to_array();
        let delta = end - start;

        let mut step = [0i32; 3];
        let mut t_max = Vec3::INFINITY;
        let mut t_delta = Vec3::INFINITY;
        for axis in 0..3 {
            let d = delta[axis];
            if d == 0.0 {
                continue;
            }
            step[axis] = if d > 0.0 { 1 } else { -1 };
            let edge = if d > 0.0 {
                (coord[axis] as f32 + 1.0) * self.cell_size
            } else {
                coord[axis] as f32 * self.cell_size
            };
            t_max[axis] = (edge - start[axis]) / d;
            t_delta[axis] = self.cell_size / d.abs();
        }

        for visited in 0.. {
            let cell = CellCoord::new(coord[0], coord[1], coord[2]);
            if let Some(bodies) = self.cell(cell) {
                results.extend_from_slice(bodies);
            }
            if cell == last {
                break;
            }
            if visited + 1 >= MAX_RAY_CELLS {
                log::debug!("ray walk truncated after {MAX_RAY_CELLS} cells");
                break;
            }

            let axis = if t_max.x <= t_max.y && t_max.x <= t_max.z {
                0
            } else if t_max.y <= t_max.z {
                1
            } else {
                2
            };
            // rounding can leave the walk one face short of `last`
            if t_max[axis] > 1.0 {
                break;
            }
            let Some(next) = coord[axis].checked_add(step[axis]) else {
                break;
            };
            coord[axis] = next;
            t_max[axis] += t_delta[axis];
        }

        results
    }
}
