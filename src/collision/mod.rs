//! Collision modules: the spatial hash broad-phase, the contact model seam
//! and segment queries over the grid.

pub mod broadphase;
pub mod contact;
pub mod queries;

pub use broadphase::{hash_cell, CellCoord, GridCell, SpatialHashGrid};
pub use contact::{ContactModel, ShapeRestLength, UnitRestLength};
pub use queries::{cast_segment, RayHit};
