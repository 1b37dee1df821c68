// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! # nanoxtal_rs: Nanostructure Crystallography Library for Rust
//!
//! Rust library for generating atomic-coordinate models of crystalline
//! and quasi-crystalline nanostructures. It provides the geometric
//! algebra needed to place, rotate, translate, and replicate atoms
//! consistently with crystallographic conventions: an anchored
//! vector/point algebra, a lattice metric engine converting between
//! fractional and Cartesian coordinates, a unit-cell/supercell
//! hierarchy, and an atom container with aggregate geometric queries.
//!
//! File export, visualization, and material-specific structure
//! generators are intentionally out of scope: this crate produces the
//! in-memory atom containers such tools consume.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add nanoxtal_rs
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use nanoxtal_rs::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Building a graphene supercell
//!
//! Construct a hexagonal lattice with a two-atom carbon basis and
//! expand it 2×2 in plane.
//!
//! ```
//! use nanoxtal_rs::prelude::*;
//! use nanoxtal_rs::errors::CellError;
//!
//! fn main() -> Result<(), CellError> {
//!     // reference data for element masses and atomic numbers
//!     let table = ElementTable::default();
//!
//!     // hexagonal lattice: a = b = 2.46 Å, c = 10 Å, γ = 120°
//!     let lattice = Lattice::hexagonal(2.46, 10.0)?;
//!
//!     // two-atom basis in fractional coordinates
//!     let unit_cell = UnitCell::from_coords(
//!         lattice,
//!         &["C", "C"],
//!         &[[0.0, 0.0, 0.0], [1.0 / 3.0, 1.0 / 3.0, 0.0]],
//!         CoordinateSystem::Fractional,
//!         &table,
//!     )?;
//!
//!     // replicate the cell 2×2×1, wrapping fractional coordinates in plane
//!     let supercell = SuperCell::new(unit_cell, [2, 2, 1], Dimension::XY)?;
//!     assert_eq!(supercell.basis().len(), 8);
//!
//!     // hand the Cartesian atoms to an exporter
//!     let atoms = supercell.to_atoms()?;
//!     let center = atoms.center_of_mass()?;
//!     println!("{} atoms centered at {:?}", atoms.len(), center);
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Working with anchored vectors
//!
//! A [`Vector`](crate::math::vector::Vector) keeps its anchor point,
//! head point, and components mutually consistent under every
//! mutation.
//!
//! ```
//! use nanoxtal_rs::prelude::*;
//! use float_cmp::assert_approx_eq;
//!
//! let mut vector = Vector::new(1.0, 0.0, 0.0).with_anchor(Point::new(0.0, 0.0, 1.0));
//!
//! // rotate 90° about the z-axis through the vector's own anchor
//! let anchor = vector.anchor();
//! vector
//!     .rotate_axis_angle_about(std::f64::consts::FRAC_PI_2, &Dimension::Z.into(), &anchor)
//!     .unwrap();
//!
//! assert_approx_eq!(f64, vector.y, 1.0, epsilon = 1e-10);
//! assert_approx_eq!(f64, (vector.head() - vector.anchor()).x, vector.x);
//! ```
//!
//! #### Retyping lattice sites
//!
//! Doping a subset of sites, here alternating boron and nitrogen on a
//! carbon lattice, leaves geometry untouched while updating element
//! identity, atomic number, and mass.
//!
//! ```no_run
//! use nanoxtal_rs::prelude::*;
//! # use nanoxtal_rs::errors::CellError;
//! # fn example(mut cell: CrystalCell, table: &ElementTable) -> Result<(), CellError> {
//! cell.update_basis("B", &BasisSelection::Strided { start: 0, step: None }, table)?;
//! cell.update_basis("N", &BasisSelection::Strided { start: 1, step: None }, table)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Constructors validate their input eagerly: lattices with
//! non-positive lengths or angles outside (0°, 180°) are rejected, as
//! are singular scaling matrices. Degenerate geometric operations
//! (normalizing a null vector, dividing by zero) print a warning and
//! return the operand unchanged so batch transforms are not aborted by
//! a single malformed element; computing the angle of a zero-length
//! vector is an error, never NaN.
//!
//! The individual error types live in the [`errors`] module and are
//! not exported into the `prelude`. If you want to work with a
//! specific error type, include it explicitly:
//! ```
//! use nanoxtal_rs::errors::LatticeError;
//! ```
//!
//! ## Features
//! - [x] anchored point/vector algebra with rotation and alignment transforms
//! - [x] triclinic lattice metrics: ortho matrix, reciprocal vectors, cell volume
//! - [x] fractional ↔ Cartesian conversion with orientation and offset
//! - [x] unit cell, crystal cell, and supercell expansion by integer scaling matrices
//! - [x] per-axis fractional-coordinate wrapping
//! - [x] atom container with center of mass, clipping, and stable sorting
//! - [x] YAML-backed element reference data with user overrides
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `nanoxtal_rs` library.
pub const NANOXTAL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod errors;
mod utility;
pub mod math {
    pub mod point;
    pub mod transforms;
    pub mod vector;
}
pub mod structures {
    pub mod atom;
    pub mod atoms;
    pub mod dimension;
    pub mod element;
    pub mod region;
}
pub mod crystallography {
    pub mod cell;
    pub mod lattice;
}
#[cfg(test)]
mod test_utilities;

/// Reexported basic `nanoxtal_rs` structures and traits.
pub mod prelude {
    pub use crate::crystallography::cell::{
        BasisSelection, CoordinateSystem, CrystalCell, ScalingSpec, SuperCell, UnitCell,
    };
    pub use crate::crystallography::lattice::Lattice;
    pub use crate::math::point::Point;
    pub use crate::math::vector::Vector;
    pub use crate::structures::atom::{Atom, HasCharge, HasCoordinationNumber, HasVelocity};
    pub use crate::structures::atoms::Atoms;
    pub use crate::structures::dimension::Dimension;
    pub use crate::structures::element::ElementTable;
    pub use crate::structures::region::{Cylinder, Rectangular, Region, Sphere};
}
