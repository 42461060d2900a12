/// errors of the analysis layer, wraps the kinetics errors
pub mod analysis_errors;
/// eng
/// Identification of forward/backward reaction pairs in a reaction system and construction of
/// one merged `Equilibrium` per pair. The pairs are kept as explicit records
/// {forward, backward, merged} so the three indices can never get out of step.
pub mod equilibrium_pairing;
/// eng
/// Decomposition of the rate of change of one substance into per-reaction contributions.
/// Takes the rate array (steps x reactions) produced by an external rate-expression callback
/// or ODE solution and returns:
/// 1) the signed contribution series of every reaction (or merged equilibrium) whose magnitude
///    reaches the threshold somewhere on the sweep
/// 2) the total rate of change, the sum of ALL contributions (never filtered)
///
/// # Examples
/// ```
/// use KiReact::Kinetics::User_reactions::Reaction;
/// use KiReact::Kinetics::reaction_system::ReactionSystem;
/// use KiReact::Analysis::equilibrium_pairing::EquilibriumPairing;
/// use KiReact::Analysis::reaction_effects::ReactionEffectDecomposer;
/// use nalgebra::DMatrix;
/// let rsys = ReactionSystem::from_substance_keys(
///     vec![Reaction::new([("A", 1.0)], [("B", 1.0)])],
///     &["A", "B"],
/// )
/// .unwrap();
/// let rates = DMatrix::from_row_slice(1, 1, &[2.0]);
/// let pairing = EquilibriumPairing::none();
/// let decomposer = ReactionEffectDecomposer::new(&rsys, &rates, 0.0, &pairing).unwrap();
/// let (series, total) = decomposer.decompose("A").unwrap();
/// assert_eq!(series[0].values[0], -2.0);
/// assert_eq!(total[0], -2.0);
/// ```
pub mod reaction_effects;
/// eng
/// Contributions of all reactions to the concentration change of every requested substance
/// over a sweep: checks the sweep shape, evaluates the rate-expression callback, pairs
/// equilibria if asked to, decomposes, applies relative scaling and the presentation order
/// (descending by the last sample), and passes the results to an injected renderer.
pub mod contributions;
/// text output of contribution results
pub mod contributions_output;
/// dominant contributions at a single state with logarithmic weights, the input of
/// graph exporters
pub mod dominant_reactions;
