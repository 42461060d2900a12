/// errors of the kinetics layer: unknown substances, unbalanced or duplicate reactions,
/// missing rate parameters
pub mod kinetics_errors;
/// standard atomic weights used to calculate molar masses from elemental composition
pub mod molmass;
/// eng
/// Substances taking part in the reactions: name, charge, optional LaTeX name,
/// optional elemental composition {atomic number: count} (key 0 holds the charge) and
/// free-form numeric properties
/// ----------------------------------------------------------------
/// ru
/// Вещества, участвующие в реакциях: имя, заряд, необязательное имя в LaTeX,
/// необязательный элементный состав {атомный номер: число атомов} (ключ 0 - заряд)
pub mod User_substances;
/// eng
/// Reactions and equilibria. Both share the `Stoichiometry` struct: reactants, products,
/// and inactive reactants/products (catalysts, solvents) that appear in the equation but do
/// not count toward the net stoichiometric effect.
/// `ReactionOrEquilibrium` is the tagged union reported by the analysis routines.
///
/// # Examples
/// ```
/// use KiReact::Kinetics::User_reactions::{Reaction, ReactionLike};
/// let r = Reaction::new([("H2O", 2.0)], [("H2", 2.0), ("O2", 1.0)]);
/// assert_eq!(r.label(), "2 H2O -> 2 H2 + O2");
/// assert_eq!(r.stoichiometry().net_effect_on("H2O"), -2.0);
/// ```
pub mod User_reactions;
/// eng
/// The reaction system: ordered substances plus ordered reactions, validated on construction
/// (unknown substances, duplicate reactions, mass and charge balance).
/// Provides the stoichiometric queries used by the analysis module:
/// per-reaction effect on a substance and identification of forward/backward pairs.
pub mod reaction_system;
/// Arrhenius rate constants and mass-action rates of a whole reaction system
pub mod rate_laws;
