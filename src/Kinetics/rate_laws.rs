#![allow(non_snake_case)]
use crate::Kinetics::User_reactions::ReactionLike;
use crate::Kinetics::kinetics_errors::KineticsError;
use crate::Kinetics::reaction_system::ReactionSystem;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Universal gas constant in J/(mol·K)
pub const R_GAS: f64 = 8.314472;

/// Arrhenius form of the rate constant: k = A*T^n*exp(-Ea/(R*T))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusRate {
    /// pre-exponential factor
    pub A: f64,
    /// temperature exponent
    pub n: f64,
    /// activation energy, J/mol
    pub Ea: f64,
}

impl ArrheniusRate {
    pub fn new(A: f64, Ea: f64) -> Self {
        Self { A, n: 0.0, Ea }
    }

    pub fn with_temperature_exponent(mut self, n: f64) -> Self {
        self.n = n;
        self
    }

    pub fn K_const(&self, T: f64) -> f64 {
        self.A * T.powf(self.n) * f64::exp(-self.Ea / (R_GAS * T))
    }

    /// rate constants on a temperature grid
    pub fn K_const_vec(&self, T: &DVector<f64>) -> DVector<f64> {
        T.map(|t| self.K_const(t))
    }
}

impl ReactionSystem {
    /// Mass-action rates for every concentration snapshot.
    /// `concs` is (steps x substances) in system order, the result is (steps x reactions):
    /// rate = param * prod(c_k^coeff_k) over all reactants, inactive ones included.
    pub fn mass_action_rates(&self, concs: &DMatrix<f64>) -> Result<DMatrix<f64>, KineticsError> {
        let n_subs = self.substance_keys().len();
        if concs.ncols() != n_subs {
            return Err(KineticsError::ConcentrationShape {
                expected: n_subs,
                got: concs.ncols(),
            });
        }
        // (param, [(substance column, exponent)]) for each reaction
        let mut factors = Vec::with_capacity(self.rxns.len());
        for (index, rxn) in self.rxns.iter().enumerate() {
            let param = rxn
                .param()
                .ok_or_else(|| KineticsError::MissingRateParameter {
                    index,
                    label: rxn.label(),
                })?;
            let mut powers = Vec::new();
            for (key, coeff) in rxn.stoichiometry().all_reac_stoich() {
                powers.push((self.as_substance_index(&key)?, coeff));
            }
            factors.push((param, powers));
        }
        let rates = DMatrix::from_fn(concs.nrows(), self.rxns.len(), |step, ri| {
            let (param, powers) = &factors[ri];
            powers
                .iter()
                .fold(*param, |acc, &(ci, coeff)| acc * concs[(step, ci)].powf(coeff))
        });
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::User_reactions::Reaction;
    use approx::assert_relative_eq;

    #[test]
    fn test_arrhenius_rate() {
        let k = ArrheniusRate::new(1e10, 42e3).K_const(273.15);
        let reference = 1e10 * f64::exp(-42e3 / (8.3145 * 273.15));
        assert_relative_eq!(k, reference, max_relative = 1e-4);
    }

    #[test]
    fn test_arrhenius_temperature_exponent() {
        let rate = ArrheniusRate::new(1e13, 20000.0).with_temperature_exponent(0.5);
        let k = rate.K_const(1000.0);
        let expected = 1e13 * 1000.0_f64.sqrt() * f64::exp(-20000.0 / (R_GAS * 1000.0));
        assert_relative_eq!(k, expected, max_relative = 1e-12);
        let ks = rate.K_const_vec(&DVector::from_vec(vec![500.0, 1000.0]));
        assert_relative_eq!(ks[1], expected, max_relative = 1e-12);
        assert!(ks[0] < ks[1]);
    }

    #[test]
    fn test_mass_action_rates() {
        let rxns = vec![
            Reaction::new([("A", 2.0)], [("B", 1.0)]).with_param(3.0),
            Reaction::new([("B", 1.0)], [("C", 1.0)])
                .with_inactive_reactants([("Cat", 1.0)])
                .with_inactive_products([("Cat", 1.0)])
                .with_param(0.5),
        ];
        let rs = ReactionSystem::from_substance_keys(rxns, &["A", "B", "C", "Cat"]).unwrap();
        let concs = DMatrix::from_row_slice(2, 4, &[2.0, 1.0, 0.0, 0.1, 1.0, 4.0, 0.0, 2.0]);
        let rates = rs.mass_action_rates(&concs).unwrap();
        assert_eq!(rates.shape(), (2, 2));
        assert_relative_eq!(rates[(0, 0)], 12.0, epsilon = 1e-12);
        assert_relative_eq!(rates[(0, 1)], 0.05, epsilon = 1e-12);
        assert_relative_eq!(rates[(1, 0)], 3.0, epsilon = 1e-12);
        assert_relative_eq!(rates[(1, 1)], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mass_action_errors() {
        let rxns = vec![Reaction::new([("A", 1.0)], [("B", 1.0)])];
        let rs = ReactionSystem::from_substance_keys(rxns, &["A", "B"]).unwrap();
        assert!(matches!(
            rs.mass_action_rates(&DMatrix::zeros(1, 2)),
            Err(KineticsError::MissingRateParameter { index: 0, .. })
        ));
        assert!(matches!(
            rs.mass_action_rates(&DMatrix::zeros(1, 3)),
            Err(KineticsError::ConcentrationShape { expected: 2, got: 3 })
        ));
    }
}
