use crate::Kinetics::User_substances::Substance;
use crate::Kinetics::kinetics_errors::KineticsError;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// {substance key: stoichiometric coefficient}
pub type Stoich = BTreeMap<String, f64>;

fn stoich_from<I, S>(pairs: I) -> Stoich
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

fn merged(active: &Stoich, inactive: &Stoich) -> Stoich {
    let mut all = active.clone();
    for (k, v) in inactive.iter() {
        *all.entry(k.clone()).or_insert(0.0) += v;
    }
    all
}

/// reactants, products and the inactive species of both sides
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stoichiometry {
    pub reac: Stoich,
    pub prod: Stoich,
    /// appear on the reactant side but do not count toward the net effect
    pub inact_reac: Stoich,
    /// appear on the product side but do not count toward the net effect
    pub inact_prod: Stoich,
}

impl Stoichiometry {
    pub fn new(reac: Stoich, prod: Stoich) -> Self {
        Self {
            reac,
            prod,
            inact_reac: Stoich::new(),
            inact_prod: Stoich::new(),
        }
    }

    /// every substance key mentioned in the equation, inactive ones included
    pub fn keys(&self) -> BTreeSet<&str> {
        self.reac
            .keys()
            .chain(self.prod.keys())
            .chain(self.inact_reac.keys())
            .chain(self.inact_prod.keys())
            .map(|k| k.as_str())
            .collect()
    }

    /// product coefficient minus reactant coefficient, inactive species excluded
    pub fn net_effect_on(&self, key: &str) -> f64 {
        self.prod.get(key).copied().unwrap_or(0.0) - self.reac.get(key).copied().unwrap_or(0.0)
    }

    pub fn net_stoich(&self, keys: &[&str]) -> Vec<f64> {
        keys.iter().map(|k| self.net_effect_on(k)).collect()
    }

    pub fn all_reac_stoich(&self) -> Stoich {
        merged(&self.reac, &self.inact_reac)
    }

    pub fn all_prod_stoich(&self) -> Stoich {
        merged(&self.prod, &self.inact_prod)
    }

    /// sum of the reactant coefficients, inactive reactants included
    pub fn order(&self) -> f64 {
        self.reac.values().chain(self.inact_reac.values()).sum()
    }

    /// the reverse direction: products become reactants, inactive sets swap too
    pub fn reversed(&self) -> Self {
        Self {
            reac: self.prod.clone(),
            prod: self.reac.clone(),
            inact_reac: self.inact_prod.clone(),
            inact_prod: self.inact_reac.clone(),
        }
    }

    /// net amount of every composition key created by the reaction (zero everywhere for a
    /// balanced reaction). Without explicit keys the union of the participants' keys is used.
    pub fn composition_violation(
        &self,
        substances: &HashMap<String, Substance>,
        composition_keys: Option<&[u32]>,
    ) -> Result<Vec<f64>, KineticsError> {
        let mut participants = Vec::new();
        for key in self.keys() {
            let substance = substances
                .get(key)
                .ok_or_else(|| KineticsError::UnknownSubstance(key.to_string()))?;
            participants.push(substance);
        }
        let keys = match composition_keys {
            Some(keys) => keys.to_vec(),
            None => Substance::composition_keys(participants.iter().copied()),
        };
        let violation = keys
            .iter()
            .map(|&ck| {
                participants
                    .iter()
                    .map(|s| self.net_effect_on(&s.name) * s.composition_of(ck) as f64)
                    .sum()
            })
            .collect();
        Ok(violation)
    }

    pub fn charge_neutrality_violation(
        &self,
        substances: &HashMap<String, Substance>,
    ) -> Result<f64, KineticsError> {
        let mut net = 0.0;
        for key in self.keys() {
            let substance = substances
                .get(key)
                .ok_or_else(|| KineticsError::UnknownSubstance(key.to_string()))?;
            net += self.net_effect_on(key) * substance.charge as f64;
        }
        Ok(net)
    }

    /// plain text equation, `arrow` between the sides
    pub fn render(&self, arrow: &str) -> String {
        let lhs = render_side(&self.reac, &self.inact_reac);
        let rhs = render_side(&self.prod, &self.inact_prod);
        format!("{} {} {}", lhs, arrow, rhs).trim().to_string()
    }
}

fn render_coefficient(coeff: f64) -> String {
    if coeff == 1.0 {
        String::new()
    } else if coeff.fract() == 0.0 {
        format!("{} ", coeff as i64)
    } else {
        format!("{} ", coeff)
    }
}

fn render_side(active: &Stoich, inactive: &Stoich) -> String {
    active
        .iter()
        .chain(inactive.iter())
        .map(|(k, &v)| format!("{}{}", render_coefficient(v), k))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// shared capability of everything the contribution analysis may report
#[enum_dispatch]
pub trait ReactionLike {
    fn stoichiometry(&self) -> &Stoichiometry;
    /// rate constant of a reaction or equilibrium constant of an equilibrium
    fn param(&self) -> Option<f64>;
    /// plain text label used in tables and legends
    fn label(&self) -> String;
}

/// A single-direction reaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reaction {
    pub stoich: Stoichiometry,
    pub param: Option<f64>,
    pub name: Option<String>,
}

impl Reaction {
    pub fn new<I, J, S, T>(reac: I, prod: J) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        J: IntoIterator<Item = (T, f64)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::from_stoichiometry(Stoichiometry::new(stoich_from(reac), stoich_from(prod)))
    }

    pub fn from_stoichiometry(stoich: Stoichiometry) -> Self {
        Self {
            stoich,
            param: None,
            name: None,
        }
    }

    pub fn with_param(mut self, param: f64) -> Self {
        self.param = Some(param);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_inactive_reactants<I, S>(mut self, inact_reac: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.stoich.inact_reac = stoich_from(inact_reac);
        self
    }

    pub fn with_inactive_products<I, S>(mut self, inact_prod: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.stoich.inact_prod = stoich_from(inact_prod);
        self
    }
}

impl ReactionLike for Reaction {
    fn stoichiometry(&self) -> &Stoichiometry {
        &self.stoich
    }
    fn param(&self) -> Option<f64> {
        self.param
    }
    fn label(&self) -> String {
        self.stoich.render("->")
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A reversible process. `param` is the equilibrium constant K = kf/kb.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equilibrium {
    pub stoich: Stoichiometry,
    pub param: Option<f64>,
}

impl Equilibrium {
    pub fn new<I, J, S, T>(reac: I, prod: J) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        J: IntoIterator<Item = (T, f64)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::from_stoichiometry(Stoichiometry::new(stoich_from(reac), stoich_from(prod)))
    }

    pub fn from_stoichiometry(stoich: Stoichiometry) -> Self {
        Self {
            stoich,
            param: None,
        }
    }

    pub fn with_param(mut self, k_eq: f64) -> Self {
        self.param = Some(k_eq);
        self
    }

    /// Splits the equilibrium into its forward and backward reactions.
    /// Exactly one of `kf`, `kb` is given; the other follows from K = kf/kb.
    pub fn as_reactions(
        &self,
        kf: Option<f64>,
        kb: Option<f64>,
    ) -> Result<(Reaction, Reaction), KineticsError> {
        let k_eq = self
            .param
            .ok_or_else(|| KineticsError::MissingEquilibriumConstant(self.label()))?;
        let (kf, kb) = match (kf, kb) {
            (Some(kf), None) => (kf, kf / k_eq),
            (None, Some(kb)) => (k_eq * kb, kb),
            _ => return Err(KineticsError::AmbiguousRateConstants),
        };
        let forward = Reaction::from_stoichiometry(self.stoich.clone()).with_param(kf);
        let backward = Reaction::from_stoichiometry(self.stoich.reversed()).with_param(kb);
        Ok((forward, backward))
    }
}

impl ReactionLike for Equilibrium {
    fn stoichiometry(&self) -> &Stoichiometry {
        &self.stoich
    }
    fn param(&self) -> Option<f64> {
        self.param
    }
    fn label(&self) -> String {
        self.stoich.render("<->")
    }
}

impl fmt::Display for Equilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// what a contribution series is attributed to
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(ReactionLike)]
pub enum ReactionOrEquilibrium {
    Reaction(Reaction),
    Equilibrium(Equilibrium),
}

impl ReactionOrEquilibrium {
    pub fn is_equilibrium(&self) -> bool {
        matches!(self, ReactionOrEquilibrium::Equilibrium(_))
    }
}

impl fmt::Display for ReactionOrEquilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
