use crate::Analysis::analysis_errors::AnalysisError;
use crate::Kinetics::User_reactions::{Equilibrium, ReactionLike};
use crate::Kinetics::reaction_system::ReactionSystem;
use log::info;
use std::collections::HashSet;

/// forward reaction index, backward reaction index and the equilibrium reported in their place
#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumPair {
    pub forward: usize,
    pub backward: usize,
    pub merged: Equilibrium,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquilibriumPairing {
    pairs: Vec<EquilibriumPair>,
}

impl EquilibriumPairing {
    /// empty pairing: nothing is merged
    pub fn none() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Pairs everything `identify_equilibria` finds. Being asked to pair a system
    /// without any inverse reactions is an error.
    pub fn from_system(rsys: &ReactionSystem) -> Result<Self, AnalysisError> {
        let found = rsys.identify_equilibria();
        if found.is_empty() {
            return Err(AnalysisError::NoEquilibria);
        }
        let pairing = Self::from_pairs(rsys, &found)?;
        info!("{} equilibria identified", pairing.len());
        Ok(pairing)
    }

    /// Pairing from explicit (forward, backward) indices. Indices must exist in the system,
    /// differ within a pair and occur in one pair only.
    pub fn from_pairs(
        rsys: &ReactionSystem,
        pairs: &[(usize, usize)],
    ) -> Result<Self, AnalysisError> {
        let mut used = HashSet::new();
        let mut records = Vec::with_capacity(pairs.len());
        for &(forward, backward) in pairs {
            let invalid = |reason: &str| AnalysisError::InvalidPair {
                forward,
                backward,
                reason: reason.to_string(),
            };
            if forward >= rsys.len() || backward >= rsys.len() {
                return Err(invalid("reaction index out of range"));
            }
            if forward == backward {
                return Err(invalid("a reaction cannot be its own inverse"));
            }
            if !used.insert(forward) || !used.insert(backward) {
                return Err(invalid("reaction already paired"));
            }
            records.push(EquilibriumPair {
                forward,
                backward,
                merged: merge(rsys, forward, backward),
            });
        }
        Ok(Self { pairs: records })
    }

    pub fn pairs(&self) -> &[EquilibriumPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn forward_indices(&self) -> Vec<usize> {
        self.pairs.iter().map(|p| p.forward).collect()
    }

    pub fn backward_indices(&self) -> Vec<usize> {
        self.pairs.iter().map(|p| p.backward).collect()
    }

    pub fn equilibria(&self) -> Vec<&Equilibrium> {
        self.pairs.iter().map(|p| &p.merged).collect()
    }

    /// the pair whose forward slot is `ri`
    pub fn forward_pair(&self, ri: usize) -> Option<&EquilibriumPair> {
        self.pairs.iter().find(|p| p.forward == ri)
    }

    pub fn is_backward(&self, ri: usize) -> bool {
        self.pairs.iter().any(|p| p.backward == ri)
    }
}

// stoichiometry of the forward reaction (inactive sets included); K = kf/kb when both are known
fn merge(rsys: &ReactionSystem, forward: usize, backward: usize) -> Equilibrium {
    let fw = &rsys.rxns[forward];
    let bw = &rsys.rxns[backward];
    let merged = Equilibrium::from_stoichiometry(fw.stoichiometry().clone());
    match (fw.param(), bw.param()) {
        (Some(kf), Some(kb)) if kb != 0.0 => merged.with_param(kf / kb),
        _ => merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::User_reactions::Reaction;

    fn system() -> ReactionSystem {
        let rxns = vec![
            Reaction::new([("A", 1.0)], [("B", 1.0)])
                .with_inactive_reactants([("Cat", 1.0)])
                .with_param(4.0),
            Reaction::new([("B", 1.0)], [("C", 1.0)]),
            Reaction::new([("B", 1.0)], [("A", 1.0)])
                .with_inactive_products([("Cat", 1.0)])
                .with_param(2.0),
        ];
        ReactionSystem::from_substance_keys(rxns, &["A", "B", "C", "Cat"]).unwrap()
    }

    #[test]
    fn test_from_system() {
        let rsys = system();
        let pairing = EquilibriumPairing::from_system(&rsys).unwrap();
        assert_eq!(pairing.forward_indices(), vec![0]);
        assert_eq!(pairing.backward_indices(), vec![2]);
        let eq = pairing.equilibria()[0];
        assert_eq!(eq.stoich, rsys.rxns[0].stoich);
        assert_eq!(eq.stoich.inact_reac.get("Cat"), Some(&1.0));
        assert_eq!(eq.param, Some(2.0));
        assert_eq!(eq.label(), "A + Cat <-> B");
        assert!(pairing.forward_pair(0).is_some());
        assert!(pairing.forward_pair(2).is_none());
        assert!(pairing.is_backward(2));
        assert!(!pairing.is_backward(1));
    }

    #[test]
    fn test_no_equilibria_is_an_error() {
        let rxns = vec![Reaction::new([("A", 1.0)], [("B", 1.0)])];
        let rsys = ReactionSystem::from_substance_keys(rxns, &["A", "B"]).unwrap();
        assert!(matches!(
            EquilibriumPairing::from_system(&rsys),
            Err(AnalysisError::NoEquilibria)
        ));
        let none = EquilibriumPairing::none();
        assert!(none.is_empty());
        assert!(none.forward_indices().is_empty());
    }

    #[test]
    fn test_from_pairs_validation() {
        let rsys = system();
        assert!(matches!(
            EquilibriumPairing::from_pairs(&rsys, &[(0, 5)]),
            Err(AnalysisError::InvalidPair { backward: 5, .. })
        ));
        assert!(matches!(
            EquilibriumPairing::from_pairs(&rsys, &[(1, 1)]),
            Err(AnalysisError::InvalidPair { .. })
        ));
        assert!(matches!(
            EquilibriumPairing::from_pairs(&rsys, &[(0, 2), (2, 1)]),
            Err(AnalysisError::InvalidPair { forward: 2, .. })
        ));
        let pairing = EquilibriumPairing::from_pairs(&rsys, &[(1, 0)]).unwrap();
        assert_eq!(pairing.len(), 1);
        assert_eq!(pairing.pairs()[0].merged.param, None);
    }
}
