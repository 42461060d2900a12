use crate::Analysis::analysis_errors::AnalysisError;
use crate::Analysis::contributions::plot_reaction_contributions;
use crate::Analysis::contributions_output::TableRenderer;
use crate::Analysis::dominant_reactions::dominant_reactions;
use crate::Kinetics::User_reactions::{Equilibrium, Reaction, ReactionLike};
use crate::Kinetics::User_substances::Substance;
use crate::Kinetics::reaction_system::ReactionSystem;
use crate::settings::ContributionSettings;
use nalgebra::{DMatrix, DVector};

pub fn kin_examples(kintask: usize, settings: &ContributionSettings) -> Result<(), AnalysisError> {
    match kintask {
        0 => {
            // autoionization of water: equilibrium split into forward and backward reactions,
            // contributions of both merged back into one equilibrium
            let water = Equilibrium::new([("H2O", 1.0)], [("H+", 1.0), ("OH-", 1.0)])
                .with_param(1e-14 * 55.4);
            let (fw, bw) = water.as_reactions(None, Some(1.4e11))?;
            println!("forward: {} k = {:e}", fw, fw.param().unwrap_or(f64::NAN));
            println!("backward: {} k = {:e}", bw, bw.param().unwrap_or(f64::NAN));
            let substances = vec![
                Substance::new("H2O").with_composition([(1, 2), (8, 1)]),
                Substance::new("H+").with_composition([(0, 1), (1, 1)]),
                Substance::new("OH-").with_composition([(0, -1), (1, 1), (8, 1)]),
            ];
            let rsys = ReactionSystem::new(vec![fw, bw], substances)?.with_name("water");
            for s in rsys.substances() {
                if let Some(Ok(m)) = s.molar_mass() {
                    println!("molar mass of {}: {:.3} g/mol", s.name, m);
                }
            }
            // relaxation of an acidified solution toward equilibrium
            let varied = DVector::from_vec(vec![1e-12, 1e-11, 1e-10, 1e-9]);
            let concs = DMatrix::from_row_slice(
                4,
                3,
                &[
                    55.4, 1e-3, 1.0e-7, //
                    55.4, 1e-3, 5.0e-9, //
                    55.4, 1e-3, 1.0e-11, //
                    55.4, 1e-3, 1.0e-11,
                ],
            );
            let settings = settings.clone().with_combine_equilibria(true).with_total(true);
            let mut renderer = TableRenderer::new(std::io::stdout()).with_varied_name("t, s");
            plot_reaction_contributions(
                &varied,
                &concs,
                |_t, c| rsys.mass_action_rates(c),
                &rsys,
                &settings,
                &mut renderer,
            )?;
        }
        1 => {
            // consecutive first order reactions A -> B -> C with the analytic solution
            let (k1, k2) = (1.0, 0.2);
            let rsys = ReactionSystem::from_substance_keys(
                vec![
                    Reaction::new([("A", 1.0)], [("B", 1.0)]).with_param(k1),
                    Reaction::new([("B", 1.0)], [("C", 1.0)]).with_param(k2),
                ],
                &["A", "B", "C"],
            )?;
            let varied = DVector::from_fn(8, |i, _| 0.5 * i as f64);
            let concs = DMatrix::from_fn(8, 3, |i, j| {
                let t = varied[i];
                let a = f64::exp(-k1 * t);
                let b = k1 / (k2 - k1) * (f64::exp(-k1 * t) - f64::exp(-k2 * t));
                match j {
                    0 => a,
                    1 => b,
                    _ => 1.0 - a - b,
                }
            });
            let mut renderer = TableRenderer::new(std::io::stdout());
            plot_reaction_contributions(
                &varied,
                &concs,
                |_t, c| rsys.mass_action_rates(c),
                &rsys,
                &settings.clone().with_total(true),
                &mut renderer,
            )?;
            let state = concs.row(2).transpose();
            let dominant =
                dominant_reactions(&state, |_t, c| rsys.mass_action_rates(c), &rsys, "B", settings)?;
            for d in dominant.entries {
                println!("{:<12} rate {:>12.4e} weight {:.3}", d.contributor, d.rate, d.weight);
            }
        }
        _ => {
            println!("Wrong task number");
        }
    }
    Ok(())
}
