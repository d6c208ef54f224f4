//! YAML Export functionality
//!
//! Exports a sale distribution to YAML for a human-readable copy.

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::DistributionExport;
use crate::models::DistributionResult;
use std::io::Write;

/// Export a distribution to YAML format
pub fn export_distribution_yaml<W: Write>(
    result: &DistributionResult,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = DistributionExport::from_result(result);

    writeln!(writer, "# gstr-ledger sale distribution")
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Span: {}", export.span).map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are in paise.").map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a distribution back from a YAML export
pub fn import_distribution_yaml(yaml_str: &str) -> LedgerResult<DistributionExport> {
    let export: DistributionExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Import(e.to_string()))?;

    export.validate().map_err(LedgerError::Import)?;

    Ok(export)
}
