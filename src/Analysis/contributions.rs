use crate::Analysis::analysis_errors::AnalysisError;
use crate::Analysis::contributions_output::ContributionRenderer;
use crate::Analysis::equilibrium_pairing::EquilibriumPairing;
use crate::Analysis::reaction_effects::{ContributionSeries, ReactionEffectDecomposer};
use crate::Kinetics::reaction_system::ReactionSystem;
use crate::settings::ContributionSettings;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};

/// Contributions of the reactions to the rate of change of one substance.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstanceContributions {
    pub substance_key: String,
    /// LaTeX name of the substance if it has one, plain name otherwise
    pub title: String,
    /// sorted descending by the last sample
    pub series: Vec<ContributionSeries>,
    /// only present when requested in the settings
    pub total: Option<DVector<f64>>,
    /// whether the rates are divided by the concentration of the substance
    pub relative: bool,
}

/// pairing requested by the settings; a system without inverse reactions gives the empty pairing
pub(crate) fn pairing_for(
    rsys: &ReactionSystem,
    settings: &ContributionSettings,
) -> Result<EquilibriumPairing, AnalysisError> {
    if !settings.combine_equilibria {
        return Ok(EquilibriumPairing::none());
    }
    match EquilibriumPairing::from_system(rsys) {
        Ok(pairing) => Ok(pairing),
        Err(AnalysisError::NoEquilibria) => {
            warn!("combining equilibria requested, but the reaction system has no equilibria");
            Ok(EquilibriumPairing::none())
        }
        Err(e) => Err(e),
    }
}

/// presentation order: descending by the last sample of each series.
/// Ordered with `f64::total_cmp`, so NaN and infinities from relative scaling are allowed.
pub fn sort_by_last_sample(series: &mut [ContributionSeries]) {
    series.sort_by(|a, b| {
        let a_last = a.last().unwrap_or(f64::NEG_INFINITY);
        let b_last = b.last().unwrap_or(f64::NEG_INFINITY);
        b_last.total_cmp(&a_last)
    });
}

/// Per-reaction contributions to the concentration change of the substances over a sweep.
///
/// # Arguments
/// * `varied` - values of the swept parameter (usually time), one per concentration snapshot
/// * `concs` - concentration snapshots, (steps x substances) in system order
/// * `rate_exprs_cb` - callback (time, concs) -> rates (steps x reactions); time is passed as zeros
/// * `rsys` - the reaction system
/// * `settings` - substances to analyse, threshold, equilibrium merging, relative scaling, total
pub fn reaction_contributions<F, E>(
    varied: &DVector<f64>,
    concs: &DMatrix<f64>,
    rate_exprs_cb: F,
    rsys: &ReactionSystem,
    settings: &ContributionSettings,
) -> Result<Vec<SubstanceContributions>, AnalysisError>
where
    F: FnOnce(&DVector<f64>, &DMatrix<f64>) -> Result<DMatrix<f64>, E>,
    AnalysisError: From<E>,
{
    let steps = varied.len();
    if concs.nrows() != steps {
        return Err(AnalysisError::SweepShapeMismatch {
            varied: steps,
            concs: concs.nrows(),
        });
    }
    let substance_keys: Vec<String> = match &settings.substance_keys {
        Some(keys) => keys.clone(),
        None => rsys.substance_keys().to_vec(),
    };
    let rates = rate_exprs_cb(&DVector::zeros(steps), concs)?;
    if rates.nrows() != steps {
        return Err(AnalysisError::RateRowsMismatch {
            expected: steps,
            got: rates.nrows(),
        });
    }
    let pairing = pairing_for(rsys, settings)?;
    let decomposer = ReactionEffectDecomposer::new(rsys, &rates, settings.threshold, &pairing)?;
    info!(
        "reaction contributions for {} substances over {} steps",
        substance_keys.len(),
        steps
    );

    let mut results = Vec::with_capacity(substance_keys.len());
    for key in substance_keys.iter() {
        let (mut series, mut total) = decomposer.decompose(key)?;
        let substance = rsys.substance(key)?;
        if settings.relative {
            let index = rsys.as_substance_index(key)?;
            if index >= concs.ncols() {
                return Err(AnalysisError::ConcentrationColumnsMismatch {
                    index,
                    got: concs.ncols(),
                });
            }
            let c = concs.column(index);
            for s in series.iter_mut() {
                s.values.component_div_assign(&c);
            }
            total.component_div_assign(&c);
        }
        sort_by_last_sample(&mut series);
        results.push(SubstanceContributions {
            substance_key: key.clone(),
            title: substance.display_name().to_string(),
            series,
            total: settings.total.then_some(total),
            relative: settings.relative,
        });
    }
    Ok(results)
}

/// `reaction_contributions` followed by rendering of every substance's result
pub fn plot_reaction_contributions<F, E, R>(
    varied: &DVector<f64>,
    concs: &DMatrix<f64>,
    rate_exprs_cb: F,
    rsys: &ReactionSystem,
    settings: &ContributionSettings,
    renderer: &mut R,
) -> Result<Vec<SubstanceContributions>, AnalysisError>
where
    F: FnOnce(&DVector<f64>, &DMatrix<f64>) -> Result<DMatrix<f64>, E>,
    AnalysisError: From<E>,
    R: ContributionRenderer + ?Sized,
{
    let results = reaction_contributions(varied, concs, rate_exprs_cb, rsys, settings)?;
    for contributions in results.iter() {
        renderer.render(varied, contributions, settings)?;
    }
    Ok(results)
}
