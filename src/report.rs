//! End-of-run exposure report and its output formats.

use crate::amount::Amount;
use crate::error::Result;
use crate::ledger::{Breakpoint, PortfolioState};
use crate::month::Month;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Peak and net change for one month, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyExposure {
    pub month: Month,
    pub peak: Amount,
    pub end: Amount,
}

/// Aggregates handed to reporting and charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposureReport {
    /// January through December, in order.
    pub months: Vec<MonthlyExposure>,

    /// Records rejected by validation.
    pub skipped: usize,

    /// Skipped records per rejection code.
    pub rejections: BTreeMap<&'static str, usize>,

    /// Distinct invoices registered.
    pub invoices: usize,

    /// Exposure after the last applied event, unrounded.
    pub closing_exposure: Amount,

    /// Exposure after each applied event, unrounded.
    pub series: Vec<Amount>,

    pub breakpoints: Vec<Breakpoint>,
}

impl ExposureReport {
    pub fn new(
        state: &PortfolioState,
        invoices: usize,
        rejections: &BTreeMap<&'static str, usize>,
    ) -> Self {
        let months = Month::ALL
            .iter()
            .map(|&month| MonthlyExposure {
                month,
                peak: state.peak(month).rounded(),
                end: state.end(month).rounded(),
            })
            .collect();

        ExposureReport {
            months,
            skipped: state.skipped_count,
            rejections: rejections.clone(),
            invoices,
            closing_exposure: state.current_exposure,
            series: state.exposure_series.clone(),
            breakpoints: state.breakpoints.clone(),
        }
    }

    pub fn month(&self, month: Month) -> &MonthlyExposure {
        &self.months[month.index()]
    }

    /// Writes the tab-separated monthly table followed by the skip count.
    pub fn write_text<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "Month\tPeak exposure\tEnd of month exposure")?;
        for row in &self.months {
            writeln!(writer, "{}\t{}\t{}", row.month, row.peak, row.end)?;
        }
        writeln!(writer, "Lines skipped: {}", self.skipped)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the whole report as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the exposure series as CSV for external charting.
    ///
    /// Each row carries the label of the breakpoint in force at that index,
    /// so the month column changes exactly where the breakpoints say.
    pub fn write_series_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["index", "month", "exposure"])?;

        let mut breakpoints = self.breakpoints.iter().peekable();
        let mut month = None;

        for (index, exposure) in self.series.iter().enumerate() {
            while let Some(bp) = breakpoints.next_if(|bp| bp.index <= index) {
                month = Some(bp.month);
            }

            csv_writer.write_record([
                index.to_string(),
                month.map(|m| m.label()).unwrap_or_default().to_string(),
                exposure.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
