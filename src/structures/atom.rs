// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of the Atom structure and its methods.

use nalgebra::base::Matrix3;

use crate::errors::AtomError;
use crate::math::point::Point;
use crate::math::vector::Vector;
use crate::structures::element::ElementTable;

/// Single atom record.
///
/// One flat structure covers the whole capability set: basic geometry,
/// extended attributes for molecular-dynamics exports (velocity, ids,
/// type tag, charge, image flags), and the coordination number.
/// Capability interfaces ([`HasVelocity`], [`HasCharge`],
/// [`HasCoordinationNumber`]) expose the extended attributes to generic
/// consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element symbol of the atom.
    element: String,
    /// Atomic number of the element.
    number: u32,
    /// Mass of the atom in amu.
    mass: f64,
    /// Position vector of the atom. The atom is located at the head of
    /// the vector; the anchor is typically the origin.
    position: Vector,
    /// Velocity vector of the atom.
    velocity: Vector,
    /// Atom id.
    id: usize,
    /// Molecule/group id.
    mol: usize,
    /// Numeric type tag.
    type_tag: usize,
    /// Net charge of the atom as a multiple of the elementary charge.
    charge: f64,
    /// Periodic image flags.
    image_flags: [i32; 3],
    /// Coordination number.
    coordination: u32,
}

impl Atom {
    /// Create a new `Atom` with the specified element data and position.
    ///
    /// ## Notes
    /// - The remaining attributes default to: null velocity, `id` 0,
    ///   `mol` 1, `type_tag` 1, zero charge, zero image flags, and zero
    ///   coordination number. Use the `with_*` methods to supply them.
    pub fn new(element: &str, number: u32, mass: f64, position: Vector) -> Self {
        Atom {
            element: element.to_string(),
            number,
            mass,
            position,
            velocity: Vector::default(),
            id: 0,
            mol: 1,
            type_tag: 1,
            charge: 0.0,
            image_flags: [0, 0, 0],
            coordination: 0,
        }
    }

    /// Create a new `Atom` from an element symbol, resolving the atomic
    /// number and mass through the provided [`ElementTable`].
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let table = ElementTable::default();
    /// let atom = Atom::from_symbol("C", Vector::new(0.0, 0.0, 1.7), &table).unwrap();
    ///
    /// assert_eq!(atom.get_number(), 6);
    /// assert_approx_eq!(f64, atom.get_mass(), 12.0107);
    /// ```
    pub fn from_symbol(
        element: &str,
        position: Vector,
        table: &ElementTable,
    ) -> Result<Self, AtomError> {
        let data = table
            .get(element)
            .ok_or_else(|| AtomError::UnknownElement(element.to_string()))?;

        Ok(Atom::new(element, data.number(), data.mass(), position))
    }

    /// Reassign the element identity of the atom, updating its atomic
    /// number and mass through the provided [`ElementTable`].
    /// Geometry is untouched.
    pub fn retype(&mut self, element: &str, table: &ElementTable) -> Result<(), AtomError> {
        let data = table
            .get(element)
            .ok_or_else(|| AtomError::UnknownElement(element.to_string()))?;

        self.element = element.to_string();
        self.number = data.number();
        self.mass = data.mass();
        Ok(())
    }

    /// Add velocity information to target atom.
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Add an atom id to target atom.
    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    /// Add a molecule/group id to target atom.
    pub fn with_mol(mut self, mol: usize) -> Self {
        self.mol = mol;
        self
    }

    /// Add a numeric type tag to target atom.
    pub fn with_type_tag(mut self, type_tag: usize) -> Self {
        self.type_tag = type_tag;
        self
    }

    /// Add a charge to target atom. The charge must be finite.
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    /// Add periodic image flags to target atom.
    pub fn with_image_flags(mut self, image_flags: [i32; 3]) -> Self {
        self.image_flags = image_flags;
        self
    }

    /// Add a coordination number to target atom.
    pub fn with_coordination(mut self, coordination: u32) -> Self {
        self.coordination = coordination;
        self
    }

    /// Get the element symbol of the atom.
    pub fn get_element(&self) -> &str {
        &self.element
    }

    /// Get the atomic number of the atom.
    pub fn get_number(&self) -> u32 {
        self.number
    }

    /// Get the mass of the atom in amu.
    pub fn get_mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass of the atom in amu. The mass must be finite.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), AtomError> {
        if !mass.is_finite() {
            return Err(AtomError::NotFinite {
                name: "mass",
                value: mass,
            });
        }

        self.mass = mass;
        Ok(())
    }

    /// Get the position vector of the atom.
    pub fn get_position(&self) -> &Vector {
        &self.position
    }

    /// Set the position vector of the atom.
    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    /// Get the location of the atom in space (the head of its position vector).
    pub fn location(&self) -> Point {
        self.position.head()
    }

    /// Get the velocity vector of the atom.
    pub fn get_velocity(&self) -> &Vector {
        &self.velocity
    }

    /// Set the velocity vector of the atom.
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
    }

    /// Check whether the atom has non-zero velocity.
    pub fn has_velocity(&self) -> bool {
        !self.velocity.is_zero()
    }

    /// Get the id of the atom.
    pub fn get_id(&self) -> usize {
        self.id
    }

    /// Set the id of the atom.
    pub fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    /// Get the molecule/group id of the atom.
    pub fn get_mol(&self) -> usize {
        self.mol
    }

    /// Set the molecule/group id of the atom.
    pub fn set_mol(&mut self, mol: usize) {
        self.mol = mol;
    }

    /// Get the numeric type tag of the atom.
    pub fn get_type_tag(&self) -> usize {
        self.type_tag
    }

    /// Set the numeric type tag of the atom.
    pub fn set_type_tag(&mut self, type_tag: usize) {
        self.type_tag = type_tag;
    }

    /// Get the charge of the atom.
    pub fn get_charge(&self) -> f64 {
        self.charge
    }

    /// Set the charge of the atom. The charge must be finite.
    pub fn set_charge(&mut self, charge: f64) -> Result<(), AtomError> {
        if !charge.is_finite() {
            return Err(AtomError::NotFinite {
                name: "charge",
                value: charge,
            });
        }

        self.charge = charge;
        Ok(())
    }

    /// Get the periodic image flags of the atom.
    pub fn get_image_flags(&self) -> [i32; 3] {
        self.image_flags
    }

    /// Set the periodic image flags of the atom.
    pub fn set_image_flags(&mut self, image_flags: [i32; 3]) {
        self.image_flags = image_flags;
    }

    /// Get the coordination number of the atom.
    pub fn get_coordination(&self) -> u32 {
        self.coordination
    }

    /// Set the coordination number of the atom.
    pub fn set_coordination(&mut self, coordination: u32) {
        self.coordination = coordination;
    }

    /// Move the atom by the provided vector.
    ///
    /// Only the head of the position vector moves; the anchor stays
    /// fixed and the components are re-derived.
    pub fn translate(&mut self, t: &Vector) {
        self.position.translate_head(t);
    }

    /// Apply a transformation matrix to the atom position, rotating it
    /// about the origin.
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        self.position.rotate(matrix);
    }

    /// Apply a transformation matrix to the atom position, rotating it
    /// about an anchor point.
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        self.position.rotate_about(matrix, anchor);
    }

    /// Snap position components with absolute value at most `epsilon`
    /// to exactly zero.
    pub fn rezero(&mut self, epsilon: f64) {
        self.position.rezero(epsilon);
    }

    /// Calculate the Euclidean distance between the locations of two atoms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        (self.location() - other.location()).norm()
    }
}

/// Capability interface for atoms carrying a velocity.
pub trait HasVelocity {
    /// Get the velocity vector.
    fn velocity(&self) -> &Vector;
}

/// Capability interface for atoms carrying a charge.
pub trait HasCharge {
    /// Get the charge as a multiple of the elementary charge.
    fn charge(&self) -> f64;
}

/// Capability interface for atoms carrying a coordination number.
pub trait HasCoordinationNumber {
    /// Get the coordination number.
    fn coordination_number(&self) -> u32;
}

impl HasVelocity for Atom {
    fn velocity(&self) -> &Vector {
        &self.velocity
    }
}

impl HasCharge for Atom {
    fn charge(&self) -> f64 {
        self.charge
    }
}

impl HasCoordinationNumber for Atom {
    fn coordination_number(&self) -> u32 {
        self.coordination
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn carbon_at(x: f64, y: f64, z: f64) -> Atom {
        Atom::new("C", 6, 12.0107, Vector::new(x, y, z))
    }

    #[test]
    fn new_defaults() {
        let atom = carbon_at(1.0, 2.0, 3.0);

        assert_eq!(atom.get_element(), "C");
        assert_eq!(atom.get_number(), 6);
        assert_approx_eq!(f64, atom.get_mass(), 12.0107);
        assert_eq!(atom.location(), Point::new(1.0, 2.0, 3.0));
        assert!(!atom.has_velocity());
        assert_eq!(atom.get_id(), 0);
        assert_eq!(atom.get_mol(), 1);
        assert_eq!(atom.get_type_tag(), 1);
        assert_approx_eq!(f64, atom.get_charge(), 0.0);
        assert_eq!(atom.get_image_flags(), [0, 0, 0]);
        assert_eq!(atom.get_coordination(), 0);
    }

    #[test]
    fn builders() {
        let atom = carbon_at(0.0, 0.0, 0.0)
            .with_velocity(Vector::new(0.1, 0.0, 0.0))
            .with_id(42)
            .with_mol(3)
            .with_type_tag(2)
            .with_charge(-0.5)
            .with_image_flags([1, 0, -1])
            .with_coordination(3);

        assert!(atom.has_velocity());
        assert_eq!(atom.get_id(), 42);
        assert_eq!(atom.get_mol(), 3);
        assert_eq!(atom.get_type_tag(), 2);
        assert_approx_eq!(f64, atom.get_charge(), -0.5);
        assert_eq!(atom.get_image_flags(), [1, 0, -1]);
        assert_eq!(atom.get_coordination(), 3);
    }

    #[test]
    fn from_symbol() {
        let table = ElementTable::default();
        let atom = Atom::from_symbol("N", Vector::new(0.0, 0.0, 0.0), &table).unwrap();

        assert_eq!(atom.get_number(), 7);
        assert_approx_eq!(f64, atom.get_mass(), 14.0067);
    }

    #[test]
    fn from_symbol_unknown() {
        let table = ElementTable::default();
        assert_eq!(
            Atom::from_symbol("Qq", Vector::default(), &table),
            Err(AtomError::UnknownElement(String::from("Qq")))
        );
    }

    #[test]
    fn retype_keeps_geometry() {
        let table = ElementTable::default();
        let mut atom = carbon_at(0.4, -0.2, 1.0).with_mol(7);

        atom.retype("B", &table).unwrap();

        assert_eq!(atom.get_element(), "B");
        assert_eq!(atom.get_number(), 5);
        assert_approx_eq!(f64, atom.get_mass(), 10.811);
        assert_eq!(atom.location(), Point::new(0.4, -0.2, 1.0));
        assert_eq!(atom.get_mol(), 7);
    }

    #[test]
    fn retype_unknown_leaves_atom() {
        let table = ElementTable::default();
        let mut atom = carbon_at(0.0, 0.0, 0.0);

        assert!(atom.retype("Qq", &table).is_err());
        assert_eq!(atom.get_element(), "C");
        assert_eq!(atom.get_number(), 6);
    }

    #[test]
    fn set_charge_validates() {
        let mut atom = carbon_at(0.0, 0.0, 0.0);

        atom.set_charge(1.25).unwrap();
        assert_approx_eq!(f64, atom.get_charge(), 1.25);

        assert!(matches!(
            atom.set_charge(f64::NAN),
            Err(AtomError::NotFinite { name: "charge", .. })
        ));
        assert_approx_eq!(f64, atom.get_charge(), 1.25);

        assert!(atom.set_charge(f64::INFINITY).is_err());
    }

    #[test]
    fn set_mass_validates() {
        let mut atom = carbon_at(0.0, 0.0, 0.0);

        assert!(matches!(
            atom.set_mass(f64::NAN),
            Err(AtomError::NotFinite { name: "mass", .. })
        ));
        assert_approx_eq!(f64, atom.get_mass(), 12.0107);
    }

    #[test]
    fn translate_moves_location() {
        let mut atom = carbon_at(1.0, 2.0, 3.0);
        atom.translate(&Vector::new(0.5, -1.0, 0.0));

        assert_eq!(atom.location(), Point::new(1.5, 1.0, 3.0));
        // the anchor of the position vector does not move
        assert_eq!(atom.get_position().anchor(), Point::origin());
    }

    #[test]
    fn rotate_about_anchor() {
        let matrix = crate::math::transforms::rotation_matrix(
            std::f64::consts::FRAC_PI_2,
            &nalgebra::Vector3::z(),
        )
        .unwrap();

        let mut atom = carbon_at(2.0, 1.0, 0.0);
        atom.rotate_about(&matrix, &Point::new(1.0, 1.0, 0.0));

        let location = atom.location();
        assert_approx_eq!(f64, location.x, 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, location.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn distance() {
        let atom1 = carbon_at(0.0, 0.0, 0.0);
        let atom2 = carbon_at(3.0, 4.0, 0.0);

        assert_approx_eq!(f64, atom1.distance_to(&atom2), 5.0);
        assert_approx_eq!(f64, atom2.distance_to(&atom1), 5.0);
    }

    #[test]
    fn capability_traits() {
        let atom = carbon_at(0.0, 0.0, 0.0)
            .with_charge(0.4)
            .with_coordination(3)
            .with_velocity(Vector::new(1.0, 0.0, 0.0));

        assert_approx_eq!(f64, HasCharge::charge(&atom), 0.4);
        assert_eq!(HasCoordinationNumber::coordination_number(&atom), 3);
        assert_approx_eq!(f64, HasVelocity::velocity(&atom).norm(), 1.0);
    }
}
