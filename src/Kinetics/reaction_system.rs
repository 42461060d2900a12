use crate::Kinetics::User_reactions::{Reaction, ReactionLike};
use crate::Kinetics::User_substances::Substance;
use crate::Kinetics::kinetics_errors::KineticsError;
use log::debug;
use nalgebra::{DMatrix, DVector};
use std::collections::{BTreeMap, HashMap, HashSet};

// tolerance of the mass and charge balance checks
const BALANCE_TOL: f64 = 1e-12;

/// Ordered substances and ordered reactions. Reaction indices used everywhere in the crate
/// (rate array columns, equilibrium pairs) are positions in `rxns`.
#[derive(Debug, Clone)]
pub struct ReactionSystem {
    pub rxns: Vec<Reaction>,
    pub name: Option<String>,
    substances: HashMap<String, Substance>,
    substance_keys: Vec<String>,
}

impl ReactionSystem {
    /// Builds the system and validates every reaction:
    /// 1) all substance keys are known
    /// 2) no reaction duplicates an earlier one
    /// 3) charge is conserved, and mass is conserved when all participants have a composition
    pub fn new(rxns: Vec<Reaction>, substances: Vec<Substance>) -> Result<Self, KineticsError> {
        let mut substance_keys = Vec::with_capacity(substances.len());
        let mut map = HashMap::with_capacity(substances.len());
        for substance in substances {
            if map.contains_key(&substance.name) {
                return Err(KineticsError::DuplicateSubstance(substance.name));
            }
            substance_keys.push(substance.name.clone());
            map.insert(substance.name.clone(), substance);
        }
        let system = Self {
            rxns,
            name: None,
            substances: map,
            substance_keys,
        };
        system.validate()?;
        debug!(
            "reaction system with {} substances and {} reactions",
            system.substance_keys.len(),
            system.rxns.len()
        );
        Ok(system)
    }

    /// substances created from bare keys, without charge or composition
    pub fn from_substance_keys(rxns: Vec<Reaction>, keys: &[&str]) -> Result<Self, KineticsError> {
        let substances = keys.iter().map(|k| Substance::new(k)).collect();
        Self::new(rxns, substances)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    fn validate(&self) -> Result<(), KineticsError> {
        let mut seen: Vec<(BTreeMap<String, f64>, BTreeMap<String, f64>)> =
            Vec::with_capacity(self.rxns.len());
        for (index, rxn) in self.rxns.iter().enumerate() {
            let stoich = rxn.stoichiometry();
            for key in stoich.keys() {
                if !self.substances.contains_key(key) {
                    return Err(KineticsError::UnknownSubstanceInReaction {
                        index,
                        label: rxn.label(),
                        key: key.to_string(),
                    });
                }
            }
            let sides = (stoich.all_reac_stoich(), stoich.all_prod_stoich());
            if let Some(first) = seen.iter().position(|s| *s == sides) {
                return Err(KineticsError::DuplicateReaction {
                    index,
                    first,
                    label: rxn.label(),
                });
            }
            seen.push(sides);

            let charge = stoich.charge_neutrality_violation(&self.substances)?;
            if charge.abs() > BALANCE_TOL {
                return Err(KineticsError::ChargeViolation {
                    index,
                    label: rxn.label(),
                    violation: charge,
                });
            }
            let all_known = stoich
                .keys()
                .iter()
                .all(|k| self.substances[*k].composition.is_some());
            if all_known {
                let violation = stoich.composition_violation(&self.substances, None)?;
                if violation.iter().any(|v| v.abs() > BALANCE_TOL) {
                    return Err(KineticsError::CompositionViolation {
                        index,
                        label: rxn.label(),
                        violation,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rxns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rxns.is_empty()
    }

    pub fn substance_keys(&self) -> &[String] {
        &self.substance_keys
    }

    /// substances in system order
    pub fn substances(&self) -> impl Iterator<Item = &Substance> {
        self.substance_keys.iter().map(|k| &self.substances[k])
    }

    pub fn substance_map(&self) -> &HashMap<String, Substance> {
        &self.substances
    }

    pub fn substance(&self, key: &str) -> Result<&Substance, KineticsError> {
        self.substances
            .get(key)
            .ok_or_else(|| KineticsError::UnknownSubstance(key.to_string()))
    }

    pub fn as_substance_index(&self, key: &str) -> Result<usize, KineticsError> {
        self.substance_keys
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| KineticsError::UnknownSubstance(key.to_string()))
    }

    /// {substance: value} -> vector in system order. Every substance needs a value,
    /// keys outside the system are rejected.
    pub fn as_per_substance_array(
        &self,
        values: &HashMap<String, f64>,
    ) -> Result<DVector<f64>, KineticsError> {
        if let Some(unknown) = values.keys().find(|k| !self.substances.contains_key(*k)) {
            return Err(KineticsError::UnknownSubstance(unknown.clone()));
        }
        let mut out = DVector::zeros(self.substance_keys.len());
        for (i, key) in self.substance_keys.iter().enumerate() {
            out[i] = *values
                .get(key)
                .ok_or_else(|| KineticsError::MissingSubstanceValue(key.clone()))?;
        }
        Ok(out)
    }

    pub fn as_per_substance_dict(
        &self,
        values: &[f64],
    ) -> Result<HashMap<String, f64>, KineticsError> {
        if values.len() != self.substance_keys.len() {
            return Err(KineticsError::LengthMismatch {
                expected: self.substance_keys.len(),
                got: values.len(),
            });
        }
        Ok(self
            .substance_keys
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect())
    }

    /// net stoichiometric coefficients, one row per reaction and one column per key
    pub fn net_stoichs(&self, keys: &[&str]) -> Result<DMatrix<f64>, KineticsError> {
        for key in keys {
            self.substance(key)?;
        }
        Ok(DMatrix::from_fn(self.rxns.len(), keys.len(), |ri, ki| {
            self.rxns[ri].stoichiometry().net_effect_on(keys[ki])
        }))
    }

    /// {reaction index: net coefficient of the substance}, reactions where the
    /// substance has no net effect are left out
    pub fn per_reaction_effect_on_substance(
        &self,
        substance_key: &str,
    ) -> Result<BTreeMap<usize, f64>, KineticsError> {
        self.substance(substance_key)?;
        Ok(self
            .rxns
            .iter()
            .enumerate()
            .filter_map(|(ri, rxn)| {
                let n = rxn.stoichiometry().net_effect_on(substance_key);
                (n != 0.0).then_some((ri, n))
            })
            .collect())
    }

    /// Pairs (i, j), i < j, where reaction j is the exact inverse of reaction i
    /// (inactive species included). The first inverse found for i wins and
    /// every reaction index takes part in at most one pair.
    pub fn identify_equilibria(&self) -> Vec<(usize, usize)> {
        let sides: Vec<_> = self
            .rxns
            .iter()
            .map(|r| {
                let s = r.stoichiometry();
                (s.all_reac_stoich(), s.all_prod_stoich())
            })
            .collect();
        let mut used = HashSet::new();
        let mut pairs = Vec::new();
        for ri1 in 0..sides.len() {
            if used.contains(&ri1) {
                continue;
            }
            for ri2 in (ri1 + 1)..sides.len() {
                if used.contains(&ri2) {
                    continue;
                }
                if sides[ri1].0 == sides[ri2].1 && sides[ri1].1 == sides[ri2].0 {
                    used.insert(ri1);
                    used.insert(ri2);
                    pairs.push((ri1, ri2));
                    break;
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_substances() -> Vec<Substance> {
        vec![
            Substance::new("H2O").with_composition([(0, 0), (1, 2), (8, 1)]),
            Substance::new("H+").with_composition([(0, 1), (1, 1)]),
            Substance::new("OH-").with_composition([(0, -1), (1, 1), (8, 1)]),
        ]
    }

    fn dissociation() -> Reaction {
        Reaction::new([("H2O", 1.0)], [("H+", 1.0), ("OH-", 1.0)])
    }

    #[test]
    fn test_valid_system() {
        let rs = ReactionSystem::new(vec![dissociation()], water_substances()).unwrap();
        assert_eq!(rs.len(), 1);
        assert_eq!(rs.substance_keys(), &["H2O", "H+", "OH-"]);
        assert_eq!(rs.substance("OH-").unwrap().charge, -1);
        assert_eq!(rs.substance("H+").unwrap().composition_of(0), 1);
    }

    #[test]
    fn test_unbalanced_reaction_rejected() {
        let r2 = Reaction::new([("H2O", 1.0)], [("H+", 2.0), ("OH-", 1.0)]);
        let err = ReactionSystem::new(vec![r2], water_substances()).unwrap_err();
        assert!(matches!(err, KineticsError::ChargeViolation { index: 0, .. }));

        let r3 = Reaction::new([("H2O", 2.0)], [("H+", 1.0), ("OH-", 1.0)]);
        let err = ReactionSystem::new(vec![r3], water_substances()).unwrap_err();
        assert!(matches!(err, KineticsError::CompositionViolation { index: 0, .. }));
    }

    #[test]
    fn test_duplicate_reaction_rejected() {
        let err = ReactionSystem::new(vec![dissociation(), dissociation()], water_substances())
            .unwrap_err();
        assert!(matches!(
            err,
            KineticsError::DuplicateReaction {
                index: 1,
                first: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_substance_in_reaction() {
        let r = Reaction::new([("H2O", 1.0)], [("H", 1.0), ("OH-", 1.0)]);
        let err = ReactionSystem::new(vec![r], water_substances()).unwrap_err();
        assert!(matches!(err, KineticsError::UnknownSubstanceInReaction { ref key, .. } if key == "H"));
    }

    #[test]
    fn test_duplicate_substance_rejected() {
        let err =
            ReactionSystem::new(vec![], vec![Substance::new("A"), Substance::new("A")]).unwrap_err();
        assert_eq!(err, KineticsError::DuplicateSubstance("A".to_string()));
    }

    #[test]
    fn test_unknown_composition_skips_mass_balance() {
        // no compositions: only the (trivially zero) charge balance applies
        let r = Reaction::new([("A", 1.0)], [("B", 2.0)]);
        assert!(ReactionSystem::from_substance_keys(vec![r], &["A", "B"]).is_ok());
    }

    #[test]
    fn test_net_stoichs() {
        let rs = ReactionSystem::new(vec![dissociation()], water_substances()).unwrap();
        assert_eq!(rs.net_stoichs(&["H2O"]).unwrap(), DMatrix::from_row_slice(1, 1, &[-1.0]));
        assert_eq!(rs.net_stoichs(&["H+"]).unwrap()[(0, 0)], 1.0);
        assert_eq!(rs.net_stoichs(&["OH-"]).unwrap()[(0, 0)], 1.0);
        assert!(rs.net_stoichs(&["H"]).is_err());
    }

    #[test]
    fn test_per_substance_array_and_dict() {
        let rs = ReactionSystem::from_substance_keys(vec![], &["H2O"]).unwrap();
        let c = rs
            .as_per_substance_array(&HashMap::from([("H2O".to_string(), 1.0)]))
            .unwrap();
        assert_eq!(c, DVector::from_vec(vec![1.0]));
        assert_eq!(
            rs.as_per_substance_array(&HashMap::from([("H".to_string(), 1.0)])),
            Err(KineticsError::UnknownSubstance("H".to_string()))
        );
        assert_eq!(
            rs.as_per_substance_array(&HashMap::new()),
            Err(KineticsError::MissingSubstanceValue("H2O".to_string()))
        );
        assert_eq!(
            rs.as_per_substance_dict(&[42.0]).unwrap(),
            HashMap::from([("H2O".to_string(), 42.0)])
        );
        assert!(matches!(
            rs.as_per_substance_dict(&[1.0, 2.0]),
            Err(KineticsError::LengthMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_per_reaction_effect_on_substance() {
        let rxns = vec![
            Reaction::new([("A", 1.0)], [("B", 1.0)]),
            Reaction::new([("B", 1.0)], [("C", 1.0)]),
            Reaction::new([("A", 2.0)], [("C", 1.0), ("A", 1.0)]),
        ];
        let rs = ReactionSystem::from_substance_keys(rxns, &["A", "B", "C"]).unwrap();
        let effects = rs.per_reaction_effect_on_substance("A").unwrap();
        assert_eq!(effects, BTreeMap::from([(0, -1.0), (2, -1.0)]));
        let effects = rs.per_reaction_effect_on_substance("B").unwrap();
        assert_eq!(effects.into_iter().collect::<Vec<_>>(), vec![(0, 1.0), (1, -1.0)]);
        assert_eq!(
            rs.per_reaction_effect_on_substance("D"),
            Err(KineticsError::UnknownSubstance("D".to_string()))
        );
    }

    #[test]
    fn test_identify_equilibria() {
        let rxns = vec![
            Reaction::new([("A", 1.0)], [("B", 1.0)]),
            Reaction::new([("B", 1.0)], [("C", 1.0)]),
            Reaction::new([("B", 1.0)], [("A", 1.0)]),
            Reaction::new([("C", 1.0)], [("B", 1.0)]),
            Reaction::new([("C", 1.0)], [("D", 1.0)]),
        ];
        let rs = ReactionSystem::from_substance_keys(rxns, &["A", "B", "C", "D"]).unwrap();
        assert_eq!(rs.identify_equilibria(), vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_identify_equilibria_respects_inactive_species() {
        let rxns = vec![
            Reaction::new([("A", 1.0)], [("B", 1.0)]).with_inactive_reactants([("Cat", 1.0)]),
            Reaction::new([("B", 1.0)], [("A", 1.0)]),
            Reaction::new([("B", 1.0)], [("A", 1.0)]).with_inactive_products([("Cat", 1.0)]),
        ];
        let rs = ReactionSystem::from_substance_keys(rxns, &["A", "B", "Cat"]).unwrap();
        assert_eq!(rs.identify_equilibria(), vec![(0, 2)]);
    }
}
