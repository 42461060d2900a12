use crate::Kinetics::kinetics_errors::KineticsError;
use crate::Kinetics::molmass::molar_mass_of_composition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A chemical species. The name is the key the reactions refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substance {
    pub name: String,
    pub charge: i32,
    /// display name, e.g. `\mathrm{H_{2}O}`
    pub latex_name: Option<String>,
    /// {atomic number: count}, key 0 is the charge
    pub composition: Option<BTreeMap<u32, i32>>,
    pub other_properties: HashMap<String, f64>,
}

impl Substance {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            charge: 0,
            latex_name: None,
            composition: None,
            other_properties: HashMap::new(),
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_latex_name(mut self, latex_name: &str) -> Self {
        self.latex_name = Some(latex_name.to_string());
        self
    }

    /// sets the composition; a charge stored under key 0 becomes the substance charge
    pub fn with_composition<I>(mut self, composition: I) -> Self
    where
        I: IntoIterator<Item = (u32, i32)>,
    {
        let composition: BTreeMap<u32, i32> = composition.into_iter().collect();
        if let Some(&charge) = composition.get(&0) {
            self.charge = charge;
        }
        self.composition = Some(composition);
        self
    }

    pub fn with_property(mut self, property: &str, value: f64) -> Self {
        self.other_properties.insert(property.to_string(), value);
        self
    }

    /// count of the composition key, zero when the key or the whole composition is absent
    pub fn composition_of(&self, key: u32) -> i32 {
        if key == 0 {
            return self.charge;
        }
        self.composition
            .as_ref()
            .and_then(|c| c.get(&key).copied())
            .unwrap_or(0)
    }

    /// molar mass in g/mol, `None` when the composition is unknown
    pub fn molar_mass(&self) -> Option<Result<f64, KineticsError>> {
        self.composition.as_ref().map(molar_mass_of_composition)
    }

    /// the name used in titles: LaTeX name if present, plain name otherwise
    pub fn display_name(&self) -> &str {
        self.latex_name.as_deref().unwrap_or(&self.name)
    }

    /// union of composition keys of the given substances (charge key 0 included)
    pub fn composition_keys<'a, I>(substances: I) -> Vec<u32>
    where
        I: IntoIterator<Item = &'a Substance>,
    {
        let mut keys = BTreeSet::new();
        for substance in substances {
            keys.insert(0);
            if let Some(composition) = &substance.composition {
                keys.extend(composition.keys().copied());
            }
        }
        keys.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_substance_ordering_by_name() {
        let h2o = Substance::new("H2O")
            .with_latex_name(r"\mathrm{H_{2}O}")
            .with_property("pKa", 14.0);
        let oh = Substance::new("OH-")
            .with_charge(-1)
            .with_latex_name(r"\mathrm{OH^{-}}");
        let mut subs = vec![oh.clone(), h2o.clone()];
        subs.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(subs, vec![h2o, oh]);
    }

    #[test]
    fn test_charge_from_composition() {
        let hp = Substance::new("H+").with_composition([(0, 1), (1, 1)]);
        assert_eq!(hp.charge, 1);
        assert_eq!(hp.composition_of(1), 1);
        assert_eq!(hp.composition_of(8), 0);
    }

    #[test]
    fn test_molar_mass() {
        let h2o = Substance::new("H2O").with_composition([(1, 2), (8, 1)]);
        let m = h2o.molar_mass().unwrap().unwrap();
        assert_relative_eq!(m / (15.9994 + 2.0 * 1.008), 1.0, epsilon = 1e-3);
        assert!(Substance::new("X").molar_mass().is_none());
    }

    #[test]
    fn test_display_name() {
        let s = Substance::new("H2O");
        assert_eq!(s.display_name(), "H2O");
        let s = s.with_latex_name("H_{2}O");
        assert_eq!(s.display_name(), "H_{2}O");
    }

    #[test]
    fn test_composition_keys() {
        let a = Substance::new("OH-").with_composition([(0, -1), (1, 1), (8, 1)]);
        let b = Substance::new("Na").with_composition([(11, 1)]);
        assert_eq!(Substance::composition_keys([&a, &b]), vec![0, 1, 8, 11]);
    }
}
