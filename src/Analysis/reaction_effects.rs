use crate::Analysis::analysis_errors::AnalysisError;
use crate::Analysis::equilibrium_pairing::EquilibriumPairing;
use crate::Kinetics::User_reactions::ReactionOrEquilibrium;
use crate::Kinetics::reaction_system::ReactionSystem;
use log::debug;
use nalgebra::{DMatrix, DVector};

/// signed contribution of one reaction (or merged equilibrium) to the rate of change
/// of a substance at every sweep step
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSeries {
    pub values: DVector<f64>,
    pub contributor: ReactionOrEquilibrium,
    /// the reaction index, or forward and backward index of a merged equilibrium
    pub reaction_indices: Vec<usize>,
}

impl ContributionSeries {
    pub fn last(&self) -> Option<f64> {
        self.values.iter().last().copied()
    }
}

/// Read-only view of a reaction system together with its rate array (steps x reactions),
/// the magnitude floor and the equilibrium pairing. Decomposition of different substances
/// shares one instance.
#[derive(Debug, Clone)]
pub struct ReactionEffectDecomposer<'a> {
    rsys: &'a ReactionSystem,
    rates: &'a DMatrix<f64>,
    threshold: f64,
    pairing: &'a EquilibriumPairing,
}

impl<'a> ReactionEffectDecomposer<'a> {
    pub fn new(
        rsys: &'a ReactionSystem,
        rates: &'a DMatrix<f64>,
        threshold: f64,
        pairing: &'a EquilibriumPairing,
    ) -> Result<Self, AnalysisError> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(AnalysisError::InvalidThreshold(threshold));
        }
        Ok(Self {
            rsys,
            rates,
            threshold,
            pairing,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn contribution(&self, ri: usize, coeff: f64) -> Result<DVector<f64>, AnalysisError> {
        if ri >= self.rates.ncols() {
            return Err(AnalysisError::RateColumnsMismatch {
                index: ri,
                columns: self.rates.ncols(),
            });
        }
        Ok(self.rates.column(ri) * coeff)
    }

    /// Returns (contribution series, total) for the substance.
    /// The total sums coeff*rate over every reaction involving the substance, whatever the
    /// threshold and the pairing. A backward reaction of a pair never gets its own series:
    /// its contribution is part of the merged equilibrium series of its forward partner.
    pub fn decompose(
        &self,
        substance_key: &str,
    ) -> Result<(Vec<ContributionSeries>, DVector<f64>), AnalysisError> {
        let effects = self.rsys.per_reaction_effect_on_substance(substance_key)?;
        let mut total = DVector::zeros(self.rates.nrows());
        let mut data = Vec::new();
        if self.rates.ncols() == 0 {
            debug!("no reaction rates given, nothing to decompose for {}", substance_key);
            return Ok((data, total));
        }
        for (&ri, &coeff) in effects.iter() {
            let y_own = self.contribution(ri, coeff)?;
            total += &y_own;
            let (values, contributor, reaction_indices) =
                if let Some(pair) = self.pairing.forward_pair(ri) {
                    let other_coeff = effects.get(&pair.backward).copied().unwrap_or(0.0);
                    let y = y_own + self.contribution(pair.backward, other_coeff)?;
                    (
                        y,
                        ReactionOrEquilibrium::from(pair.merged.clone()),
                        vec![ri, pair.backward],
                    )
                } else if self.pairing.is_backward(ri) {
                    continue;
                } else {
                    (
                        y_own,
                        ReactionOrEquilibrium::from(self.rsys.rxns[ri].clone()),
                        vec![ri],
                    )
                };
            if values.iter().all(|y| y.abs() < self.threshold) {
                debug!(
                    "contribution of reaction {} to {} is below {}",
                    ri, substance_key, self.threshold
                );
                continue;
            }
            data.push(ContributionSeries {
                values,
                contributor,
                reaction_indices,
            });
        }
        Ok((data, total))
    }
}

/// one-shot form of `ReactionEffectDecomposer::decompose`
pub fn decompose(
    substance_key: &str,
    rsys: &ReactionSystem,
    rates: &DMatrix<f64>,
    threshold: f64,
    pairing: &EquilibriumPairing,
) -> Result<(Vec<ContributionSeries>, DVector<f64>), AnalysisError> {
    ReactionEffectDecomposer::new(rsys, rates, threshold, pairing)?.decompose(substance_key)
}
