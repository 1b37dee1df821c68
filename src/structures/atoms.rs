// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of the Atoms container and its aggregate queries.

use std::ops::{Index, IndexMut};

use nalgebra::base::Matrix3;
use ndarray::Array2;

use crate::errors::AtomError;
use crate::math::point::Point;
use crate::math::vector::Vector;
use crate::structures::atom::{Atom, HasCharge, HasCoordinationNumber};
use crate::structures::region::Region;
use crate::utility::compensated_sum;

/// Ordered, index-addressable, mutable sequence of atoms.
///
/// Aggregate queries (center of mass, total mass, coordinate arrays)
/// are always recomputed from the current atom state; they are never
/// cached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Atoms {
    atoms: Vec<Atom>,
}

impl From<Vec<Atom>> for Atoms {
    fn from(atoms: Vec<Atom>) -> Self {
        Atoms { atoms }
    }
}

impl FromIterator<Atom> for Atoms {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Atoms {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Atom> for Atoms {
    fn extend<I: IntoIterator<Item = Atom>>(&mut self, iter: I) {
        self.atoms.extend(iter);
    }
}

impl Index<usize> for Atoms {
    type Output = Atom;

    fn index(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }
}

impl IndexMut<usize> for Atoms {
    fn index_mut(&mut self, index: usize) -> &mut Atom {
        &mut self.atoms[index]
    }
}

impl IntoIterator for Atoms {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

impl<'a> IntoIterator for &'a Atoms {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl<'a> IntoIterator for &'a mut Atoms {
    type Item = &'a mut Atom;
    type IntoIter = std::slice::IterMut<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter_mut()
    }
}

impl Atoms {
    /// Create a new empty `Atoms` container.
    pub fn new() -> Self {
        Atoms { atoms: Vec::new() }
    }

    /// Get the number of atoms in the container.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Add an atom to the end of the container.
    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Insert an atom at the given position, shifting later atoms back.
    ///
    /// ## Panics
    /// Panics if `index` is greater than the number of atoms.
    pub fn insert(&mut self, index: usize, atom: Atom) {
        self.atoms.insert(index, atom);
    }

    /// Remove and return the atom at the given position.
    ///
    /// ## Panics
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Atom {
        self.atoms.remove(index)
    }

    /// Get a reference to the atom at the given position.
    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Get a mutable reference to the atom at the given position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Iterate over the atoms of the container.
    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Iterate mutably over the atoms of the container.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Atom> {
        self.atoms.iter_mut()
    }

    /// Calculate the center of mass of the atoms.
    ///
    /// ## Returns
    /// The center of mass as a [`Point`], or an error if the container
    /// is empty or the total mass is zero.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let atoms: Atoms = vec![
    ///     Atom::new("H", 1, 1.0, Vector::new(0.0, 0.0, 0.0)),
    ///     Atom::new("H", 1, 3.0, Vector::new(2.0, 0.0, 0.0)),
    /// ]
    /// .into();
    ///
    /// let center = atoms.center_of_mass().unwrap();
    /// assert_approx_eq!(f64, center.x, 1.5);
    /// ```
    pub fn center_of_mass(&self) -> Result<Point, AtomError> {
        if self.is_empty() {
            return Err(AtomError::EmptyContainer);
        }

        let total = self.total_mass();
        if total == 0.0 {
            return Err(AtomError::ZeroTotalMass);
        }

        let weighted = |axis: usize| {
            compensated_sum(
                self.atoms
                    .iter()
                    .map(|atom| atom.get_mass() * atom.location().coords()[axis]),
            ) / total
        };

        Ok(Point::new(weighted(0), weighted(1), weighted(2)))
    }

    /// Calculate the total mass of the atoms in amu.
    ///
    /// Uses compensated summation so that the result is stable for
    /// large atom counts.
    pub fn total_mass(&self) -> f64 {
        compensated_sum(self.atoms.iter().map(Atom::get_mass))
    }

    /// Calculate the total charge of the atoms.
    pub fn total_charge(&self) -> f64 {
        total_charge(&self.atoms)
    }

    /// Calculate the mean coordination number of the atoms.
    /// Returns `None` for an empty container.
    pub fn mean_coordination(&self) -> Option<f64> {
        mean_coordination(&self.atoms)
    }

    /// Get the locations of all atoms as an `n × 3` array,
    /// order-preserving.
    pub fn coordinates(&self) -> Array2<f64> {
        let mut coords = Array2::zeros((self.len(), 3));

        for (i, atom) in self.atoms.iter().enumerate() {
            let location = atom.location();
            coords[(i, 0)] = location.x;
            coords[(i, 1)] = location.y;
            coords[(i, 2)] = location.z;
        }

        coords
    }

    /// Get the masses of all atoms, order-preserving.
    pub fn masses(&self) -> Vec<f64> {
        self.atoms.iter().map(Atom::get_mass).collect()
    }

    /// Get the element symbols of all atoms, order-preserving.
    pub fn symbols(&self) -> Vec<&str> {
        self.atoms.iter().map(Atom::get_element).collect()
    }

    /// Remove every atom whose location falls outside the given region.
    ///
    /// With `center_first`, the container is translated so that its
    /// center of mass sits at the origin before clipping and the offset
    /// is restored afterwards, making the clip reproducible regardless
    /// of the structure's absolute position.
    pub fn clip_to_region(
        &mut self,
        region: &impl Region,
        center_first: bool,
    ) -> Result<(), AtomError> {
        if self.is_empty() {
            return Ok(());
        }

        if center_first {
            let center = Vector::from(self.center_of_mass()?);
            self.translate(&-center);
            self.atoms.retain(|atom| region.contains(&atom.location()));
            self.translate(&center);
        } else {
            self.atoms.retain(|atom| region.contains(&atom.location()));
        }

        Ok(())
    }

    /// Sort the atoms by `(element symbol, atomic number, z-coordinate)`.
    ///
    /// The sort is stable: ties preserve the prior relative order, which
    /// downstream group-id assignment depends on.
    pub fn sort(&mut self) {
        self.atoms.sort_by(|a, b| {
            a.get_element()
                .cmp(b.get_element())
                .then(a.get_number().cmp(&b.get_number()))
                .then(a.location().z.total_cmp(&b.location().z))
        });
    }

    /// Sort the atoms with a custom comparator. The sort is stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Atom, &Atom) -> std::cmp::Ordering,
    {
        self.atoms.sort_by(compare);
    }

    /// Apply a transformation matrix to every atom, rotating it about
    /// the origin.
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        self.atoms.iter_mut().for_each(|atom| atom.rotate(matrix));
    }

    /// Apply a transformation matrix to every atom, rotating it about
    /// an anchor point.
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        self.atoms
            .iter_mut()
            .for_each(|atom| atom.rotate_about(matrix, anchor));
    }

    /// Move every atom by the provided vector.
    pub fn translate(&mut self, t: &Vector) {
        self.atoms.iter_mut().for_each(|atom| atom.translate(t));
    }

    /// Snap position components of every atom with absolute value at
    /// most `epsilon` to exactly zero.
    pub fn rezero(&mut self, epsilon: f64) {
        self.atoms.iter_mut().for_each(|atom| atom.rezero(epsilon));
    }
}

/// Calculate the total charge of a collection of charged records.
pub fn total_charge<'a, T>(atoms: impl IntoIterator<Item = &'a T>) -> f64
where
    T: HasCharge + 'a,
{
    compensated_sum(atoms.into_iter().map(|atom| atom.charge()))
}

/// Calculate the mean coordination number of a collection of records.
/// Returns `None` for an empty collection.
pub fn mean_coordination<'a, T>(atoms: impl IntoIterator<Item = &'a T>) -> Option<f64>
where
    T: HasCoordinationNumber + 'a,
{
    let mut count = 0usize;
    let sum = compensated_sum(atoms.into_iter().map(|atom| {
        count += 1;
        atom.coordination_number() as f64
    }));

    (count > 0).then(|| sum / count as f64)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
