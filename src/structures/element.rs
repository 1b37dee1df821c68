// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of the Element structure and the element reference table.

use std::path::Path;

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::ParseElementError;

/// Contains reference information about a specific element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Element {
    /// Symbol of the element ("C", "Si", ...).
    symbol: String,
    /// Atomic number of the element.
    number: u32,
    /// Atomic mass of the element in amu (daltons).
    mass: f64,
}

impl Element {
    /// Get the symbol of the element.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the atomic number of the element.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Get the atomic mass of the element in amu.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

/// Contains reference information about all elements that can occur in
/// a structure.
///
/// Atoms constructed from an element symbol resolve their atomic number
/// and mass through this table.
#[derive(Debug, Clone)]
pub struct ElementTable {
    /// All supported elements, keyed by element name, in the order they
    /// were defined.
    elements: IndexMap<String, Element>,
    /// HashMap converting element symbol to element name.
    symbols2names: HashMap<String, String>,
}

impl Default for ElementTable {
    /// Construct a default `ElementTable`.
    /// The table will contain default information about elements
    /// that are supported and recognized by the `nanoxtal_rs` library.
    ///
    /// ## Notes
    /// - This function parses YAML content from `src/config/elements.yaml`
    ///   which is included in the `nanoxtal_rs` library at compile time.
    /// - This is a relatively slow operation and there is no reason to
    ///   call it multiple times in a program! If you need the table for
    ///   multiple structures, clone it.
    fn default() -> Self {
        let yaml = include_str!("../config/elements.yaml");

        ElementTable::from_yaml(yaml).expect(
            "FATAL NANOXTAL ERROR | ElementTable::default | Default `elements.yaml` file could not be parsed.",
        )
    }
}

impl ElementTable {
    /// Construct a new `ElementTable` from the provided YAML file.
    ///
    /// ## Returns
    /// `ElementTable` structure if parsing was successful.
    /// `ParseElementError` otherwise.
    ///
    /// ## Notes
    /// - For an example of the 'elements yaml file', see
    ///   `src/config/elements.yaml`.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ParseElementError> {
        ElementTable::from_yaml(&load_yaml_to_string(filename)?)
    }

    /// Parse a YAML string into an `ElementTable`.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseElementError> {
        let elements: IndexMap<String, Element> = match serde_yaml::from_str(yaml) {
            Ok(x) => x,
            Err(e) => return Err(ParseElementError::CouldNotParseYaml(e)),
        };

        let symbols2names = make_symbols2names(&elements)?;

        Ok(ElementTable {
            elements,
            symbols2names,
        })
    }

    /// Update the `ElementTable` using data from the provided YAML file.
    ///
    /// Elements sharing a name with an already known element are
    /// replaced; other elements are added. Symbols must stay unique
    /// across the merged table.
    ///
    /// ## Returns
    /// `Ok` if the parsing was successful. `ParseElementError`
    /// otherwise. If an error occurs, the `ElementTable` is not changed.
    ///
    /// ## Example
    /// Suppose the default table is missing information about iridium.
    /// Construct a yaml file, `my_elements.yaml`, containing the
    /// missing element:
    /// ```yaml
    /// ---
    /// iridium:
    ///   symbol: Ir
    ///   number: 77
    ///   mass: 192.217
    /// ...
    /// ```
    ///
    /// The updated table can then be obtained using:
    /// ```no_run
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// let mut table = ElementTable::default();
    /// table.update_from_file("my_elements.yaml").unwrap();
    /// ```
    pub fn update_from_file(
        &mut self,
        filename: impl AsRef<Path>,
    ) -> Result<(), ParseElementError> {
        self.update_from_yaml(&load_yaml_to_string(filename)?)
    }

    /// Update the `ElementTable` using data from the provided YAML string.
    /// See [`ElementTable::update_from_file`] for the merging rules.
    pub fn update_from_yaml(&mut self, yaml: &str) -> Result<(), ParseElementError> {
        let parsed: IndexMap<String, Element> = match serde_yaml::from_str(yaml) {
            Ok(x) => x,
            Err(e) => return Err(ParseElementError::CouldNotParseYaml(e)),
        };

        // merge into a copy so that `self` stays untouched on error
        let mut merged = self.elements.clone();
        for (name, element) in parsed {
            merged.insert(name, element);
        }

        let symbols2names = make_symbols2names(&merged)?;

        self.elements = merged;
        self.symbols2names = symbols2names;
        Ok(())
    }

    /// Get reference data for the element with the provided symbol.
    pub fn get(&self, symbol: &str) -> Option<&Element> {
        let name = self.symbols2names.get(symbol)?;
        self.elements.get(name)
    }

    /// Get the name of the element with the provided symbol.
    pub fn name_of(&self, symbol: &str) -> Result<&str, ParseElementError> {
        self.symbols2names
            .get(symbol)
            .map(|name| name.as_str())
            .ok_or_else(|| ParseElementError::UnknownSymbol(symbol.to_owned()))
    }

    /// Get the atomic mass (in amu) of the element with the provided symbol.
    pub fn mass_of(&self, symbol: &str) -> Result<f64, ParseElementError> {
        self.get(symbol)
            .map(Element::mass)
            .ok_or_else(|| ParseElementError::UnknownSymbol(symbol.to_owned()))
    }

    /// Get the atomic number of the element with the provided symbol.
    pub fn number_of(&self, symbol: &str) -> Result<u32, ParseElementError> {
        self.get(symbol)
            .map(Element::number)
            .ok_or_else(|| ParseElementError::UnknownSymbol(symbol.to_owned()))
    }

    /// Get the number of elements in the table.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements of the table in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements
            .iter()
            .map(|(name, element)| (name.as_str(), element))
    }
}

/// Read the content of a YAML file into a string.
fn load_yaml_to_string(filename: impl AsRef<Path>) -> Result<String, ParseElementError> {
    std::fs::read_to_string(&filename)
        .map_err(|_| ParseElementError::FileNotFound(Box::from(filename.as_ref())))
}

/// Create a map converting element symbols to element names, checking
/// that no two elements share a symbol.
fn make_symbols2names(
    elements: &IndexMap<String, Element>,
) -> Result<HashMap<String, String>, ParseElementError> {
    let mut map = HashMap::new();

    for (name, element) in elements {
        if let Some(previous) =
            map.insert(element.symbol.clone(), name.clone())
        {
            return Err(ParseElementError::DuplicateSymbol(
                element.symbol.clone(),
                previous,
                name.clone(),
            ));
        }
    }

    Ok(map)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
