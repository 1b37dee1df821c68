// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Shared fixtures for the `nanoxtal_rs` unit tests.

use crate::crystallography::cell::{CoordinateSystem, UnitCell};
use crate::crystallography::lattice::Lattice;
use crate::structures::element::ElementTable;

/// Primitive graphene unit cell: hexagonal lattice with
/// a = b = 2.46 Å, c = 10 Å, γ = 120° and a two-atom carbon basis.
pub(crate) fn graphene_unit_cell() -> UnitCell {
    let table = ElementTable::default();
    let lattice = Lattice::hexagonal(2.46, 10.0).unwrap();

    UnitCell::from_coords(
        lattice,
        &["C", "C"],
        &[[0.0, 0.0, 0.0], [1.0 / 3.0, 1.0 / 3.0, 0.0]],
        CoordinateSystem::Fractional,
        &table,
    )
    .unwrap()
}

/// Orthorhombic unit cell with a single carbon atom at the origin.
pub(crate) fn orthorhombic_unit_cell() -> UnitCell {
    let table = ElementTable::default();
    let lattice = Lattice::orthorhombic(2.46, 4.26, 10.0).unwrap();

    UnitCell::from_coords(
        lattice,
        &["C"],
        &[[0.0, 0.0, 0.0]],
        CoordinateSystem::Fractional,
        &table,
    )
    .unwrap()
}
