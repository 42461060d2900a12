use super::analysis_errors::AnalysisError;
use super::contributions::SubstanceContributions;
use crate::Kinetics::User_reactions::ReactionLike;
use crate::settings::ContributionSettings;
use nalgebra::DVector;
use prettytable::{Cell, Row, Table};
use std::io::Write;

/// Consumer of contribution results: plotting backends, graph exporters, text output.
pub trait ContributionRenderer {
    fn render(
        &mut self,
        varied: &DVector<f64>,
        contributions: &SubstanceContributions,
        settings: &ContributionSettings,
    ) -> Result<(), AnalysisError>;
}

/// Writes one table per substance: the swept value, the total (if present) and one
/// column per reaction in presentation order.
pub struct TableRenderer<W: Write> {
    out: W,
    varied_name: String,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            varied_name: "Time".to_string(),
        }
    }

    /// header of the first column, "Time" by default
    pub fn with_varied_name(mut self, name: &str) -> Self {
        self.varied_name = name.to_string();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// table of the contributions of one substance
pub fn contributions_table(
    varied: &DVector<f64>,
    contributions: &SubstanceContributions,
    varied_name: &str,
) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new(varied_name)];
    if contributions.total.is_some() {
        header.push(Cell::new("Total"));
    }
    for s in contributions.series.iter() {
        header.push(Cell::new(&s.contributor.label()));
    }
    table.add_row(Row::new(header));
    for (step, x) in varied.iter().enumerate() {
        let mut row = vec![Cell::new(&format!("{:.4e}", x))];
        if let Some(total) = &contributions.total {
            row.push(Cell::new(&format!("{:.4e}", total[step])));
        }
        for s in contributions.series.iter() {
            row.push(Cell::new(&format!("{:.4e}", s.values[step])));
        }
        table.add_row(Row::new(row));
    }
    table
}

impl<W: Write> ContributionRenderer for TableRenderer<W> {
    fn render(
        &mut self,
        varied: &DVector<f64>,
        contributions: &SubstanceContributions,
        settings: &ContributionSettings,
    ) -> Result<(), AnalysisError> {
        let quantity = if contributions.relative {
            "d[X]/dt / [X]"
        } else {
            "d[X]/dt"
        };
        writeln!(
            self.out,
            "__________{}: {} by reaction (|rate| >= {:e})__________",
            contributions.title, quantity, settings.threshold
        )?;
        if contributions.series.is_empty() && contributions.total.is_none() {
            writeln!(self.out, "no contributions above the threshold")?;
            return Ok(());
        }
        let table = contributions_table(varied, contributions, &self.varied_name);
        table.print(&mut self.out)?;
        Ok(())
    }
}

/// prints the tables of all substances to stdout
pub fn pretty_print_contributions(
    varied: &DVector<f64>,
    results: &[SubstanceContributions],
    settings: &ContributionSettings,
) -> Result<(), AnalysisError> {
    let mut renderer = TableRenderer::new(std::io::stdout());
    for contributions in results {
        renderer.render(varied, contributions, settings)?;
    }
    Ok(())
}
