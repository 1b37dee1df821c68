// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of the unit cell, crystal cell, and supercell structures.

use std::ops::{Deref, DerefMut};

use nalgebra::base::{Matrix3, Vector3};

use crate::crystallography::lattice::Lattice;
use crate::errors::{AtomError, CellError};
use crate::math::point::Point;
use crate::math::vector::Vector;
use crate::structures::atom::Atom;
use crate::structures::atoms::Atoms;
use crate::structures::dimension::Dimension;
use crate::structures::element::ElementTable;

/// Coordinate system of externally supplied coordinates.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CoordinateSystem {
    /// Coordinates expressed as multiples of the lattice vectors.
    Fractional,
    /// Coordinates expressed in the orthonormal Cartesian frame.
    Cartesian,
}

/// Selection of basis sites for bulk element reassignment
/// ([`CrystalCell::update_basis`]).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BasisSelection {
    /// Every basis site.
    All,
    /// Sites `start`, `start + step`, `start + 2·step`, ...
    /// When `step` is `None`, it defaults to the number of atoms in the
    /// unit-cell basis, selecting site `start` of every replicated copy.
    Strided { start: usize, step: Option<usize> },
    /// An explicit list of site indices.
    Indices(Vec<usize>),
}

/// Integer scaling specification expanding a unit cell into a supercell.
///
/// A scalar `k` scales uniformly (`k·I`), a 3-vector scales each lattice
/// direction independently, and a full matrix produces a general
/// (possibly non-diagonal) supercell.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ScalingSpec {
    Scalar(i32),
    Diagonal([i32; 3]),
    Matrix([[i32; 3]; 3]),
}

impl From<i32> for ScalingSpec {
    fn from(k: i32) -> Self {
        ScalingSpec::Scalar(k)
    }
}

impl From<[i32; 3]> for ScalingSpec {
    fn from(diagonal: [i32; 3]) -> Self {
        ScalingSpec::Diagonal(diagonal)
    }
}

impl From<[[i32; 3]; 3]> for ScalingSpec {
    fn from(matrix: [[i32; 3]; 3]) -> Self {
        ScalingSpec::Matrix(matrix)
    }
}

impl ScalingSpec {
    /// Normalize the specification to a full 3×3 integer matrix.
    pub fn normalized(&self) -> Matrix3<i32> {
        match self {
            ScalingSpec::Scalar(k) => Matrix3::from_diagonal(&Vector3::new(*k, *k, *k)),
            ScalingSpec::Diagonal(d) => Matrix3::from_diagonal(&Vector3::new(d[0], d[1], d[2])),
            ScalingSpec::Matrix(m) => Matrix3::new(
                m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
            ),
        }
    }

    /// Determinant of the normalized scaling matrix. Its absolute value
    /// is the number of unit cells tiling the supercell.
    pub fn determinant(&self) -> i32 {
        det3(&self.normalized())
    }

    /// Check whether the specification is the identity scaling.
    pub fn is_identity(&self) -> bool {
        self.normalized() == Matrix3::identity()
    }
}

/// Determinant of a 3×3 integer matrix.
fn det3(m: &Matrix3<i32>) -> i32 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// Enumerate the integer lattice points of the unit lattice that tile
/// the supercell described by the scaling matrix.
///
/// The points are expressed in the (old) fractional axes; the count
/// always equals the absolute value of the scaling-matrix determinant.
///
/// ## Panics
/// Panics if the scaling matrix is singular. Callers validate the
/// determinant before the expansion reaches this function.
pub fn supercell_lattice_points(scaling: &Matrix3<i32>) -> Vec<Vector3<f64>> {
    const MEMBER_EPSILON: f64 = 1.0e-10;

    let det = det3(scaling).abs();
    if det == 0 {
        panic!(
            "FATAL NANOXTAL ERROR | supercell_lattice_points | Scaling matrix must not be singular."
        );
    }

    let scale = scaling.map(|v| v as f64);
    let scale_t = scale.transpose();
    // membership test: p lies inside the supercell iff S⁻ᵀ·p ∈ [0, 1)³
    let inverse_t = scale
        .try_inverse()
        .expect(
            "FATAL NANOXTAL ERROR | supercell_lattice_points | Non-singular matrix has no inverse.",
        )
        .transpose();

    // bounding box of the supercell corners in the unit-lattice axes
    let mut mins = [0i64; 3];
    let mut maxs = [0i64; 3];
    for corner in 0..8u8 {
        let f = Vector3::new(
            f64::from(corner & 1),
            f64::from((corner >> 1) & 1),
            f64::from((corner >> 2) & 1),
        );
        let vertex = scale_t * f;
        for i in 0..3 {
            mins[i] = mins[i].min(vertex[i].floor() as i64);
            maxs[i] = maxs[i].max(vertex[i].ceil() as i64);
        }
    }

    let mut points = Vec::with_capacity(det as usize);
    for x in mins[0]..=maxs[0] {
        for y in mins[1]..=maxs[1] {
            for z in mins[2]..=maxs[2] {
                let p = Vector3::new(x as f64, y as f64, z as f64);
                let f = inverse_t * p;

                if (0..3).all(|i| f[i] > -MEMBER_EPSILON && f[i] < 1.0 - MEMBER_EPSILON) {
                    points.push(p);
                }
            }
        }
    }

    if points.len() != det as usize {
        panic!(
            "FATAL NANOXTAL ERROR | supercell_lattice_points | Expected `{}` lattice points, found `{}`.",
            det,
            points.len()
        );
    }

    points
}

/// Materialize the Cartesian atoms of a lattice + fractional basis pair.
fn cell_to_atoms(lattice: &Lattice, basis: &Atoms) -> Atoms {
    basis
        .iter()
        .map(|atom| {
            let cartesian = lattice.fractional_to_cartesian(&atom.get_position().head());
            let mut out = atom.clone();
            out.set_position(Vector::from(cartesian));
            out
        })
        .collect()
}

/// Crystallographic unit cell: one lattice and one ordered basis of
/// atoms with fractional positions.
///
/// Basis atoms store **fractional** coordinates; the cell owns the
/// lattice and converts to Cartesian on demand ([`UnitCell::to_atoms`]).
/// Rigid rotations and translations therefore act on the lattice alone
/// and the basis follows automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    lattice: Lattice,
    basis: Atoms,
}

impl UnitCell {
    /// Create a new `UnitCell` from a lattice and a basis whose atom
    /// positions are already fractional.
    pub fn new(lattice: Lattice, basis: Atoms) -> Self {
        UnitCell { lattice, basis }
    }

    /// Create a new `UnitCell` from element symbols and coordinates.
    ///
    /// Cartesian coordinates are converted to fractional through the
    /// lattice before being stored. Atom ids are assigned from 1 in
    /// input order; masses and atomic numbers are resolved through the
    /// provided [`ElementTable`].
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// let table = ElementTable::default();
    /// let lattice = Lattice::hexagonal(2.46, 10.0).unwrap();
    ///
    /// let cell = UnitCell::from_coords(
    ///     lattice,
    ///     &["C", "C"],
    ///     &[[0.0, 0.0, 0.0], [1.0 / 3.0, 1.0 / 3.0, 0.0]],
    ///     CoordinateSystem::Fractional,
    ///     &table,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(cell.basis().len(), 2);
    /// ```
    pub fn from_coords(
        lattice: Lattice,
        symbols: &[&str],
        coords: &[[f64; 3]],
        system: CoordinateSystem,
        table: &ElementTable,
    ) -> Result<Self, CellError> {
        if symbols.len() != coords.len() {
            return Err(CellError::BasisCoordsMismatch {
                basis: symbols.len(),
                coords: coords.len(),
            });
        }

        let mut basis = Atoms::new();
        for (i, (symbol, coord)) in symbols.iter().zip(coords).enumerate() {
            let point = Point::from(*coord);
            let fractional = match system {
                CoordinateSystem::Fractional => point,
                CoordinateSystem::Cartesian => lattice.cartesian_to_fractional(&point),
            };

            let atom =
                Atom::from_symbol(symbol, Vector::from(fractional), table)?.with_id(i + 1);
            basis.push(atom);
        }

        Ok(UnitCell { lattice, basis })
    }

    /// Get the lattice of the unit cell.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Get the basis of the unit cell (fractional positions).
    pub fn basis(&self) -> &Atoms {
        &self.basis
    }

    /// Get mutable access to the basis of the unit cell.
    pub fn basis_mut(&mut self) -> &mut Atoms {
        &mut self.basis
    }

    /// Rotate the unit cell about its lattice offset.
    ///
    /// The basis stores fractional positions, so rotating the lattice
    /// rotates the whole cell consistently.
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        let anchor = self.lattice.offset_point();
        self.lattice.rotate_about(matrix, &anchor);
    }

    /// Rotate the unit cell about an explicit anchor point.
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        self.lattice.rotate_about(matrix, anchor);
    }

    /// Translate the unit cell by the provided vector.
    pub fn translate(&mut self, t: &Vector) {
        self.lattice.translate(t);
    }

    /// Materialize the atoms of the unit cell with Cartesian positions.
    pub fn to_atoms(&self) -> Atoms {
        cell_to_atoms(&self.lattice, &self.basis)
    }
}

/// Crystal structure cell supporting incremental construction and
/// supercell expansion.
///
/// A `CrystalCell` may be built piece by piece (`with_lattice`,
/// `with_basis`) or from a reference [`UnitCell`]. Assigning a
/// non-identity scaling matrix triggers the supercell expansion
/// ([`CrystalCell::set_scaling_matrix`]).
#[derive(Debug, Clone)]
pub struct CrystalCell {
    lattice: Option<Lattice>,
    basis: Atoms,
    unit_cell: Option<UnitCell>,
    scaling_matrix: Matrix3<i32>,
    wrap: Dimension,
}

impl Default for CrystalCell {
    fn default() -> Self {
        CrystalCell::new()
    }
}

impl CrystalCell {
    /// Create a new empty `CrystalCell` with identity scaling and no
    /// wrapping.
    pub fn new() -> Self {
        CrystalCell {
            lattice: None,
            basis: Atoms::new(),
            unit_cell: None,
            scaling_matrix: Matrix3::identity(),
            wrap: Dimension::None,
        }
    }

    /// Set the lattice of the cell.
    pub fn with_lattice(mut self, lattice: Lattice) -> Self {
        self.lattice = Some(lattice);
        self
    }

    /// Set the basis of the cell (fractional positions).
    pub fn with_basis(mut self, basis: Atoms) -> Self {
        self.basis = basis;
        self
    }

    /// Set the reference unit cell. A missing lattice or an empty basis
    /// is filled in from the unit cell.
    pub fn with_unit_cell(mut self, unit_cell: UnitCell) -> Self {
        if self.lattice.is_none() {
            self.lattice = Some(unit_cell.lattice().clone());
        }
        if self.basis.is_empty() {
            self.basis = unit_cell.basis().clone();
        }
        self.unit_cell = Some(unit_cell);
        self
    }

    /// Select the fractional axes along which coordinates are wrapped
    /// into `[0, 1)` during expansion. Default: no wrapping.
    pub fn with_wrap(mut self, axes: Dimension) -> Self {
        self.wrap = axes;
        self
    }

    /// Get the lattice of the cell.
    pub fn lattice(&self) -> Option<&Lattice> {
        self.lattice.as_ref()
    }

    /// Get the basis of the cell (fractional positions).
    pub fn basis(&self) -> &Atoms {
        &self.basis
    }

    /// Get mutable access to the basis of the cell.
    pub fn basis_mut(&mut self) -> &mut Atoms {
        &mut self.basis
    }

    /// Get the reference unit cell of the cell.
    pub fn unit_cell(&self) -> Option<&UnitCell> {
        self.unit_cell.as_ref()
    }

    /// Get the current scaling matrix of the cell.
    pub fn scaling_matrix(&self) -> Matrix3<i32> {
        self.scaling_matrix
    }

    /// Get the fractional axes along which coordinates are wrapped.
    pub fn wrap(&self) -> Dimension {
        self.wrap
    }

    /// Assign a scaling matrix, expanding the cell into a supercell.
    ///
    /// The expansion (for a non-identity scaling):
    /// 1. replaces the lattice with one built from
    ///    `scaling × old_cell_matrix` (preserving the offset),
    /// 2. enumerates the `|det|` lattice-translation vectors tiling the
    ///    scaled cell, expressed in Cartesian space via the old cell
    ///    matrix,
    /// 3. re-derives the fractional position of every (translation ×
    ///    atom) replica under the new lattice, wrapping along the
    ///    selected axes,
    /// 4. assigns each replica the molecule id
    ///    `translation_index × max_mol + original_mol`, and
    /// 5. rebuilds the basis container from scratch.
    ///
    /// An identity scaling (scalar 1, all-ones diagonal, or identity
    /// matrix) is a true no-op: the lattice and basis are left untouched
    /// with no floating-point drift.
    ///
    /// ## Returns
    /// `Ok` on success. `CellError::SingularScaling` for a scaling with
    /// zero determinant; `CellError::MissingLattice` if the cell has no
    /// lattice yet.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use nanoxtal_rs::errors::CellError;
    /// #
    /// # fn main() -> Result<(), CellError> {
    /// let table = ElementTable::default();
    /// let lattice = Lattice::hexagonal(2.46, 10.0)?;
    /// let unit_cell = UnitCell::from_coords(
    ///     lattice,
    ///     &["C", "C"],
    ///     &[[0.0, 0.0, 0.0], [1.0 / 3.0, 1.0 / 3.0, 0.0]],
    ///     CoordinateSystem::Fractional,
    ///     &table,
    /// )?;
    ///
    /// let mut cell = CrystalCell::new().with_unit_cell(unit_cell);
    /// cell.set_scaling_matrix([2, 2, 1])?;
    ///
    /// assert_eq!(cell.basis().len(), 8);
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_scaling_matrix(&mut self, scaling: impl Into<ScalingSpec>) -> Result<(), CellError> {
        let matrix = scaling.into().normalized();

        if det3(&matrix) == 0 {
            return Err(CellError::SingularScaling);
        }

        // size-preserving case: no re-derivation, no floating-point drift
        if matrix == Matrix3::identity() {
            self.scaling_matrix = matrix;
            return Ok(());
        }

        let old_lattice = self.lattice.clone().ok_or(CellError::MissingLattice)?;
        let old_matrix = old_lattice.matrix();

        let scale = matrix.map(|v| v as f64);
        let mut new_lattice = Lattice::from_matrix(scale * old_matrix)?;
        new_lattice.translate(&Vector::from(old_lattice.offset()));

        // lattice points of the scaled cell, Cartesian via the old cell matrix
        let points = supercell_lattice_points(&matrix);
        let tvecs: Vec<Vector3<f64>> = points.iter().map(|p| old_matrix.transpose() * p).collect();

        let max_mol = self
            .basis
            .iter()
            .map(Atom::get_mol)
            .max()
            .unwrap_or(1)
            .max(1);

        let old_basis = std::mem::take(&mut self.basis);
        let mut new_basis = Atoms::new();

        for (i, tvec) in tvecs.iter().enumerate() {
            for atom in old_basis.iter() {
                let cartesian =
                    old_lattice.fractional_to_cartesian(&atom.get_position().head()) + *tvec;
                let fractional = new_lattice.cartesian_to_fractional(&cartesian);
                let fractional = new_lattice.wrap_fractional(&fractional, self.wrap);

                let mut replica = atom.clone();
                replica.set_position(Vector::from(fractional));
                replica.set_mol(i * max_mol + atom.get_mol());
                new_basis.push(replica);
            }
        }

        self.lattice = Some(new_lattice);
        self.basis = new_basis;
        self.scaling_matrix = matrix;
        Ok(())
    }

    /// Rigidly shift every atom's fractional position by the provided
    /// translation, rebuilding the basis container. Coordinates are
    /// wrapped into `[0, 1)` along the `wrap` axes.
    pub fn translate_basis(
        &mut self,
        t: &Vector,
        system: CoordinateSystem,
        wrap: Dimension,
    ) -> Result<(), CellError> {
        let lattice = self.lattice.clone().ok_or(CellError::MissingLattice)?;

        let shift = match system {
            CoordinateSystem::Fractional => t.components(),
            CoordinateSystem::Cartesian => {
                lattice.cartesian_to_fractional_displacement(&t.components())
            }
        };

        let old_basis = std::mem::take(&mut self.basis);
        let mut new_basis = Atoms::new();

        for atom in old_basis {
            let fractional = atom.get_position().head() + shift;
            let fractional = lattice.wrap_fractional(&fractional, wrap);

            let mut moved = atom;
            moved.set_position(Vector::from(fractional));
            new_basis.push(moved);
        }

        self.basis = new_basis;
        Ok(())
    }

    /// Bulk-reassign the element identity of basis atoms, leaving
    /// geometry untouched.
    ///
    /// The selection applies to the (possibly expanded) cell basis and,
    /// in lockstep, to the retained unit-cell basis, so that a later
    /// re-expansion from the unit cell stays consistent.
    ///
    /// ## Returns
    /// `Ok` on success. An error for an unknown element or an explicit
    /// index outside the cell basis; in both cases nothing is modified.
    pub fn update_basis(
        &mut self,
        element: &str,
        selection: &BasisSelection,
        table: &ElementTable,
    ) -> Result<(), CellError> {
        // resolve the element up front so a failure cannot leave the
        // basis partially retyped
        if table.get(element).is_none() {
            return Err(CellError::Atom(AtomError::UnknownElement(
                element.to_string(),
            )));
        }

        let unit_len = self.unit_cell.as_ref().map(|cell| cell.basis().len());

        let len = self.basis.len();
        for index in resolve_selection(selection, len, unit_len)? {
            self.basis
                .get_mut(index)
                .expect("FATAL NANOXTAL ERROR | CrystalCell::update_basis | Resolved index out of range.")
                .retype(element, table)?;
        }

        if let Some(unit_cell) = self.unit_cell.as_mut() {
            let len = unit_cell.basis().len();
            // explicit indices beyond the unit-cell basis only concern
            // the expanded basis
            let indices: Vec<usize> = match selection {
                BasisSelection::Indices(list) => {
                    list.iter().copied().filter(|index| *index < len).collect()
                }
                other => resolve_selection(other, len, unit_len)?,
            };

            for index in indices {
                unit_cell
                    .basis_mut()
                    .get_mut(index)
                    .expect("FATAL NANOXTAL ERROR | CrystalCell::update_basis | Resolved index out of range.")
                    .retype(element, table)?;
            }
        }

        Ok(())
    }

    /// Rotate the cell about its lattice offset (or the origin if the
    /// cell has no lattice yet).
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        let anchor = self
            .lattice
            .as_ref()
            .map(|lattice| lattice.offset_point())
            .unwrap_or_default();
        self.rotate_about(matrix, &anchor);
    }

    /// Rotate the cell about an explicit anchor point. The rotation is
    /// applied to the lattice and the retained unit cell; the fractional
    /// basis follows the lattice.
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        if let Some(lattice) = self.lattice.as_mut() {
            lattice.rotate_about(matrix, anchor);
        }
        if let Some(unit_cell) = self.unit_cell.as_mut() {
            unit_cell.rotate_about(matrix, anchor);
        }
    }

    /// Translate the cell (lattice and retained unit cell) by the
    /// provided vector.
    pub fn translate(&mut self, t: &Vector) {
        if let Some(lattice) = self.lattice.as_mut() {
            lattice.translate(t);
        }
        if let Some(unit_cell) = self.unit_cell.as_mut() {
            unit_cell.translate(t);
        }
    }

    /// Snap basis coordinates with absolute value at most `epsilon` to
    /// exactly zero.
    pub fn rezero(&mut self, epsilon: f64) {
        self.basis.rezero(epsilon);
    }

    /// Materialize the atoms of the cell with Cartesian positions.
    pub fn to_atoms(&self) -> Result<Atoms, CellError> {
        let lattice = self.lattice.as_ref().ok_or(CellError::MissingLattice)?;
        Ok(cell_to_atoms(lattice, &self.basis))
    }
}

impl PartialEq for CrystalCell {
    /// Cells with reference unit cells compare by unit cell and scaling
    /// matrix; otherwise by lattice and basis.
    fn eq(&self, other: &Self) -> bool {
        match (&self.unit_cell, &other.unit_cell) {
            (Some(own), Some(their)) => {
                own == their && self.scaling_matrix == other.scaling_matrix
            }
            _ => self.lattice == other.lattice && self.basis == other.basis,
        }
    }
}

/// Resolve a [`BasisSelection`] into concrete indices for a basis of
/// `len` atoms.
fn resolve_selection(
    selection: &BasisSelection,
    len: usize,
    unit_len: Option<usize>,
) -> Result<Vec<usize>, CellError> {
    match selection {
        BasisSelection::All => Ok((0..len).collect()),
        BasisSelection::Strided { start, step } => {
            let step = step.or(unit_len).unwrap_or(1).max(1);
            Ok((*start..len).step_by(step).collect())
        }
        BasisSelection::Indices(indices) => {
            for &index in indices {
                if index >= len {
                    return Err(CellError::IndexOutOfRange { index, len });
                }
            }
            Ok(indices.clone())
        }
    }
}

/// Crystal structure supercell: a [`CrystalCell`] constructed from an
/// explicit [`UnitCell`] and a validated scaling specification.
///
/// Unlike `CrystalCell`, which tolerates partially-specified
/// construction for incremental building, `SuperCell` validates its
/// inputs up front and fails immediately on a singular scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperCell {
    cell: CrystalCell,
}

impl SuperCell {
    /// Build a supercell by expanding `unit_cell` with the provided
    /// scaling specification, wrapping fractional coordinates along the
    /// `wrap` axes.
    ///
    /// ## Returns
    /// The expanded `SuperCell`, or `CellError::SingularScaling` for a
    /// scaling with zero determinant.
    pub fn new(
        unit_cell: UnitCell,
        scaling: impl Into<ScalingSpec>,
        wrap: Dimension,
    ) -> Result<Self, CellError> {
        let spec = scaling.into();
        if spec.determinant() == 0 {
            return Err(CellError::SingularScaling);
        }

        let mut cell = CrystalCell::new().with_unit_cell(unit_cell).with_wrap(wrap);
        cell.set_scaling_matrix(spec)?;

        Ok(SuperCell { cell })
    }

    /// Unwrap the underlying [`CrystalCell`].
    pub fn into_inner(self) -> CrystalCell {
        self.cell
    }
}

impl Deref for SuperCell {
    type Target = CrystalCell;

    fn deref(&self) -> &CrystalCell {
        &self.cell
    }
}

impl DerefMut for SuperCell {
    fn deref_mut(&mut self) -> &mut CrystalCell {
        &mut self.cell
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
