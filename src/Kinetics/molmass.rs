/// Standard atomic weights, looked up by atomic number.
/// Composition maps used across the crate are keyed by atomic number; key 0 is the
/// electric charge and carries no mass.
use crate::Kinetics::kinetics_errors::KineticsError;
use std::collections::BTreeMap;

// Define a struct to hold element data
pub struct Element {
    pub number: u32,
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

const fn el(number: u32, symbol: &'static str, atomic_mass: f64) -> Element {
    Element {
        number,
        symbol,
        atomic_mass,
    }
}

// g/mol
const ELEMENTS: &[Element] = &[
    el(1, "H", 1.008),
    el(2, "He", 4.0026),
    el(3, "Li", 6.94),
    el(4, "Be", 9.0122),
    el(5, "B", 10.81),
    el(6, "C", 12.011),
    el(7, "N", 14.007),
    el(8, "O", 15.999),
    el(9, "F", 18.998),
    el(10, "Ne", 20.18),
    el(11, "Na", 22.99),
    el(12, "Mg", 24.305),
    el(13, "Al", 26.982),
    el(14, "Si", 28.085),
    el(15, "P", 30.974),
    el(16, "S", 32.06),
    el(17, "Cl", 35.45),
    el(18, "Ar", 39.948),
    el(19, "K", 39.098),
    el(20, "Ca", 40.078),
    el(21, "Sc", 44.956),
    el(22, "Ti", 47.867),
    el(23, "V", 50.942),
    el(24, "Cr", 51.996),
    el(25, "Mn", 54.938),
    el(26, "Fe", 55.845),
    el(27, "Co", 58.933),
    el(28, "Ni", 58.693),
    el(29, "Cu", 63.546),
    el(30, "Zn", 65.38),
    el(31, "Ga", 69.723),
    el(32, "Ge", 72.63),
    el(33, "As", 74.922),
    el(34, "Se", 78.971),
    el(35, "Br", 79.904),
    el(36, "Kr", 83.798),
    el(37, "Rb", 85.468),
    el(38, "Sr", 87.62),
    el(39, "Y", 88.906),
    el(40, "Zr", 91.224),
    el(41, "Nb", 92.906),
    el(42, "Mo", 95.95),
    el(43, "Tc", 98.0),
    el(44, "Ru", 101.07),
    el(45, "Rh", 102.91),
    el(46, "Pd", 106.42),
    el(47, "Ag", 107.87),
    el(48, "Cd", 112.41),
    el(49, "In", 114.82),
    el(50, "Sn", 118.71),
    el(51, "Sb", 121.76),
    el(52, "Te", 127.6),
    el(53, "I", 126.9),
    el(54, "Xe", 131.29),
    el(55, "Cs", 132.91),
    el(56, "Ba", 137.33),
    el(74, "W", 183.84),
    el(78, "Pt", 195.08),
    el(79, "Au", 196.97),
    el(80, "Hg", 200.59),
    el(82, "Pb", 207.2),
    el(92, "U", 238.03),
];

pub fn element_by_number(number: u32) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.number == number)
}

pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// molar mass (g/mol) of the composition {atomic number: count}; the charge key 0 is skipped
pub fn molar_mass_of_composition(composition: &BTreeMap<u32, i32>) -> Result<f64, KineticsError> {
    let mut molar_mass = 0.0;
    for (&number, &count) in composition.iter() {
        if number == 0 {
            continue;
        }
        let element = element_by_number(number).ok_or(KineticsError::UnknownElement(number))?;
        molar_mass += element.atomic_mass * count as f64;
    }
    Ok(molar_mass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_water_molar_mass() {
        let composition = BTreeMap::from([(1, 2), (8, 1)]);
        let m = molar_mass_of_composition(&composition).unwrap();
        assert_relative_eq!(m, 15.9994 + 2.0 * 1.008, max_relative = 1e-3);
    }

    #[test]
    fn test_charge_key_has_no_mass() {
        let hydroxide = BTreeMap::from([(0, -1), (1, 1), (8, 1)]);
        let m = molar_mass_of_composition(&hydroxide).unwrap();
        assert_relative_eq!(m, 1.008 + 15.999, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_element() {
        let composition = BTreeMap::from([(118, 1)]);
        assert_eq!(
            molar_mass_of_composition(&composition),
            Err(KineticsError::UnknownElement(118))
        );
    }

    #[test]
    fn test_lookup_by_symbol() {
        assert_eq!(element_by_symbol("Fe").map(|e| e.number), Some(26));
        assert!(element_by_symbol("Xx").is_none());
    }
}
