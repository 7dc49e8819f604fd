use crate::core::{StoredCalculation, SubmissionOutcome};
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Two decimals for display only; stored values stay unrounded.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn write_outcome<W: Write>(out: &mut W, outcome: &SubmissionOutcome) -> Result<()> {
    writeln!(out, "Taxable income: {}", format_amount(outcome.taxable_income))?;
    writeln!(out, "Tax: {}", format_amount(outcome.result.tax_amount))?;
    match outcome.record_id {
        Some(id) => writeln!(out, "Saved as record #{} ({})", id, outcome.result.status)?,
        None => writeln!(out, "Warning: the calculation was not saved")?,
    }
    Ok(())
}

pub fn write_outcome_json<W: Write>(out: &mut W, outcome: &SubmissionOutcome) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcome)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_history<W: Write>(
    out: &mut W,
    calculations: &[StoredCalculation],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_history_table(out, calculations),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, calculations)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for calculation in calculations {
                writer.serialize(calculation)?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_history_table<W: Write>(out: &mut W, calculations: &[StoredCalculation]) -> Result<()> {
    if calculations.is_empty() {
        writeln!(out, "No saved calculations.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>5}  {:<19}  {:>15}  {:>15}  {:>15}  {}",
        "ID", "Date", "Income", "Deductions", "Tax", "Status"
    )?;
    for c in calculations {
        writeln!(
            out,
            "{:>5}  {:<19}  {:>15}  {:>15}  {:>15}  {}",
            c.id,
            c.calculated_at.format("%Y-%m-%d %H:%M:%S"),
            format_amount(c.income),
            format_amount(c.deductions),
            format_amount(c.tax_amount),
            c.status
        )?;
    }
    Ok(())
}
