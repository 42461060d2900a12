use crate::Analysis::analysis_errors::AnalysisError;
use crate::Analysis::contributions::pairing_for;
use crate::Analysis::reaction_effects::ReactionEffectDecomposer;
use crate::Kinetics::User_reactions::ReactionOrEquilibrium;
use crate::Kinetics::reaction_system::ReactionSystem;
use crate::settings::ContributionSettings;
use log::debug;
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, PartialEq)]
pub struct DominantReaction {
    pub contributor: ReactionOrEquilibrium,
    pub reaction_indices: Vec<usize>,
    /// signed contribution to d[substance]/dt
    pub rate: f64,
    /// 1 + log10|rate| - min(log10|rate|): the weakest reported contribution gets 1
    pub weight: f64,
}

/// Weighted contributions plus the reactions behind them, detached from the reaction
/// system: merged equilibria appear as `Equilibrium`, everything else as the original
/// `Reaction`, in the order of `entries`.
#[derive(Debug, Clone, PartialEq)]
pub struct DominantReactions {
    pub substance_key: String,
    pub entries: Vec<DominantReaction>,
    pub reactions: Vec<ReactionOrEquilibrium>,
}

impl DominantReactions {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Contributions to the rate of change of one substance at a single state, with logarithmic
/// weights (e.g. pen widths of a reaction graph). Contributions that are exactly zero
/// carry no weight on a log scale and are left out.
pub fn dominant_reactions<F, E>(
    concs: &DVector<f64>,
    rate_exprs_cb: F,
    rsys: &ReactionSystem,
    substance_key: &str,
    settings: &ContributionSettings,
) -> Result<DominantReactions, AnalysisError>
where
    F: FnOnce(&DVector<f64>, &DMatrix<f64>) -> Result<DMatrix<f64>, E>,
    AnalysisError: From<E>,
{
    let state = DMatrix::from_row_slice(1, concs.len(), concs.as_slice());
    let rates = rate_exprs_cb(&DVector::zeros(1), &state)?;
    if rates.nrows() != 1 {
        return Err(AnalysisError::NotASingleState(rates.nrows()));
    }
    let pairing = pairing_for(rsys, settings)?;
    let decomposer = ReactionEffectDecomposer::new(rsys, &rates, settings.threshold, &pairing)?;
    let (series, _total) = decomposer.decompose(substance_key)?;

    let nonzero: Vec<_> = series.into_iter().filter(|s| s.values[0] != 0.0).collect();
    let min_lg = nonzero
        .iter()
        .map(|s| s.values[0].abs().log10())
        .fold(f64::INFINITY, f64::min);
    let entries: Vec<DominantReaction> = nonzero
        .into_iter()
        .map(|s| {
            let rate = s.values[0];
            DominantReaction {
                contributor: s.contributor,
                reaction_indices: s.reaction_indices,
                rate,
                weight: 1.0 + rate.abs().log10() - min_lg,
            }
        })
        .collect();
    debug!(
        "{} dominant contributions to {}",
        entries.len(),
        substance_key
    );
    let reactions = entries.iter().map(|d| d.contributor.clone()).collect();
    Ok(DominantReactions {
        substance_key: substance_key.to_string(),
        entries,
        reactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::User_reactions::{Reaction, ReactionLike};
    use approx::assert_relative_eq;

    fn system() -> ReactionSystem {
        let rxns = vec![
            Reaction::new([("A", 1.0)], [("B", 1.0)]).with_param(100.0),
            Reaction::new([("A", 1.0)], [("C", 1.0)]).with_param(1.0),
            Reaction::new([("B", 1.0)], [("A", 1.0)]).with_param(10.0),
            Reaction::new([("A", 1.0)], [("D", 1.0)]).with_param(1e-12),
        ];
        ReactionSystem::from_substance_keys(rxns, &["A", "B", "C", "D"]).unwrap()
    }

    #[test]
    fn test_weights() {
        let rsys = system();
        let concs = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
        let dominant = dominant_reactions(
            &concs,
            |_t, c| rsys.mass_action_rates(c),
            &rsys,
            "A",
            &ContributionSettings::default(),
        )
        .unwrap();
        // B -> A is zero at B = 0, A -> D is below the default threshold
        assert_eq!(dominant.len(), 2);
        assert_eq!(dominant.substance_key, "A");
        assert_eq!(dominant.entries[0].contributor.label(), "A -> B");
        assert_relative_eq!(dominant.entries[0].rate, -100.0, epsilon = 1e-12);
        assert_relative_eq!(dominant.entries[0].weight, 3.0, epsilon = 1e-12);
        assert_relative_eq!(dominant.entries[1].weight, 1.0, epsilon = 1e-12);
        let labels: Vec<String> = dominant.reactions.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["A -> B", "A -> C"]);
    }

    #[test]
    fn test_combined_equilibria() {
        let rsys = system();
        let concs = DVector::from_vec(vec![1.0, 2.0, 0.0, 0.0]);
        let settings = ContributionSettings::default().with_combine_equilibria(true);
        let dominant =
            dominant_reactions(&concs, |_t, c| rsys.mass_action_rates(c), &rsys, "A", &settings)
                .unwrap();
        assert_eq!(dominant.len(), 2);
        assert!(dominant.entries[0].contributor.is_equilibrium());
        assert_eq!(dominant.entries[0].reaction_indices, vec![0, 2]);
        assert_relative_eq!(dominant.entries[0].rate, -100.0 + 20.0, epsilon = 1e-12);
        // the pair is reported once, as an equilibrium with K = kf/kb
        assert_eq!(dominant.reactions.len(), 2);
        assert!(dominant.reactions[0].is_equilibrium());
        assert_eq!(dominant.reactions[0].label(), "A <-> B");
        assert_relative_eq!(dominant.reactions[0].param().unwrap(), 10.0, epsilon = 1e-12);
        assert!(!dominant.reactions[1].is_equilibrium());
    }

    #[test]
    fn test_not_a_single_state() {
        let rsys = system();
        let concs = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
        let res = dominant_reactions(
            &concs,
            |_t, _c| Ok::<_, AnalysisError>(DMatrix::zeros(2, 4)),
            &rsys,
            "A",
            &ContributionSettings::default(),
        );
        assert!(matches!(res, Err(AnalysisError::NotASingleState(2))));
    }
}
