use crate::rename::RenameResult;
use std::io::{self, Write};

/// Display dry run results in a formatted output
pub fn display_dry_run(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Operations: {}", result.operations.len())?;
    writeln!(writer)?;

    if result.operations.is_empty() && result.skipped.is_empty() {
        writeln!(writer, "No files to rename.")?;
        return Ok(());
    }

    if !result.operations.is_empty() {
        writeln!(writer, "Planned changes:")?;
        writeln!(writer)?;

        for (i, op) in result.operations.iter().enumerate() {
            writeln!(writer, "  {}.", i + 1)?;
            writeln!(writer, "     From: {}", op.source_name)?;
            writeln!(writer, "     To:   {}", op.destination_name)?;
            writeln!(writer)?;
        }
    }

    if !result.skipped.is_empty() {
        writeln!(writer, "Collisions (would be skipped):")?;
        writeln!(writer)?;

        for skip in &result.skipped {
            writeln!(
                writer,
                "  [!] {} -> {} (destination exists)",
                skip.source_name, skip.destination_name
            )?;
        }

        writeln!(writer)?;
    }

    // Summary
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(
        writer,
        "  {} files would be renamed",
        result.operations.len()
    )?;

    if !result.skipped.is_empty() {
        writeln!(writer, "  {} collisions would be skipped", result.skipped.len())?;
    }

    if result.unchanged > 0 {
        writeln!(writer, "  {} files already canonical", result.unchanged)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Run without --dry to apply these changes.")?;

    Ok(())
}

/// Display dry run results in a simple tab-separated format for scripting
pub fn display_dry_run_simple(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    for op in &result.operations {
        writeln!(writer, "{}\t{}", op.source_name, op.destination_name)?;
    }
    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_execution_result(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Successfully renamed {} files.",
        result.operations.len()
    )?;

    if !result.skipped.is_empty() {
        writeln!(
            writer,
            "  {} collisions were skipped.",
            result.skipped.len()
        )?;
    }

    if result.unchanged > 0 {
        writeln!(writer, "  {} files were already canonical.", result.unchanged)?;
    }

    Ok(())
}
