// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of errors originating from the `nanoxtal_rs` library.

use thiserror::Error;

/// Errors that can occur when performing vector algebra.
#[derive(Error, Debug, PartialEq)]
pub enum VectorError {
    #[error("Vector has zero length; `{0}` is undefined for a null vector.")]
    ZeroLength(&'static str),
}

/// Errors that can occur when constructing or transforming a crystal lattice.
#[derive(Error, Debug, PartialEq)]
pub enum LatticeError {
    #[error("Lattice length `{name}` is `{value}` but must be positive and finite.")]
    InvalidLength { name: &'static str, value: f64 },
    #[error("Lattice angle `{name}` is `{value}`° but must lie inside (0°, 180°).")]
    InvalidAngle { name: &'static str, value: f64 },
    #[error("Lattice parameters describe a degenerate cell (volume discriminant `{0}`).")]
    DegenerateCell(f64),
}

/// Errors that can occur when working with atoms and atom containers.
#[derive(Error, Debug, PartialEq)]
pub enum AtomError {
    #[error("Element `{0}` is not present in the element table.")]
    UnknownElement(String),
    #[error("Attribute `{name}` must be a finite number, got `{value}`.")]
    NotFinite { name: &'static str, value: f64 },
    #[error("Operation requires a non-empty atom container.")]
    EmptyContainer,
    #[error("Total mass of the atom container is zero.")]
    ZeroTotalMass,
}

/// Errors that can occur when building unit cells, crystal cells, and supercells.
#[derive(Error, Debug, PartialEq)]
pub enum CellError {
    #[error("Scaling matrix has zero determinant and cannot tile a supercell.")]
    SingularScaling,
    #[error("Basis has `{basis}` elements but `{coords}` coordinates were provided.")]
    BasisCoordsMismatch { basis: usize, coords: usize },
    #[error("Basis index `{index}` is out of range for a basis of `{len}` atoms.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Operation requires a lattice but the cell has none.")]
    MissingLattice,
    #[error("{0}")]
    Lattice(#[from] LatticeError),
    #[error("{0}")]
    Atom(#[from] AtomError),
}

/// Errors that can occur when reading and parsing element reference data.
#[derive(Error, Debug)]
pub enum ParseElementError {
    #[error("File `{0}` could not be read.")]
    FileNotFound(Box<std::path::Path>),
    #[error("Could not parse element data as yaml: `{0}`.")]
    CouldNotParseYaml(serde_yaml::Error),
    #[error("Symbol `{0}` is shared by elements `{1}` and `{2}`.")]
    DuplicateSymbol(String, String, String),
    #[error("Element with symbol `{0}` does not exist.")]
    UnknownSymbol(String),
}
