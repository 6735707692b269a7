use clap::Parser;
use tracing::{debug, error, info};

use receiptfix::cli::Args;
use receiptfix::error::AppError;
use receiptfix::history::write_history;
use receiptfix::listing::write_listing;
use receiptfix::ocr::{config_from_env, OcrPipeline, OutputLayout, VisionClient};
use receiptfix::output::{display_dry_run, display_execution_result};
use receiptfix::progress::Progress;
use receiptfix::rename::{rename_receipts, RenameOptions};
use receiptfix::revert::{revert_from_history, RevertOptions};
use receiptfix::scanner::scan_files;
use receiptfix::{logging, normalize_filename};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    debug!("Environment loaded");

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut progress = Progress::new_with_verbosity(args.verbose > 0);

    if let Some(history_file) = &args.revert {
        info!("Revert mode: {:?}", history_file);

        let options = RevertOptions { dry_run: args.dry };
        revert_from_history(history_file, &options, &mut progress)?;
    } else if let Some(target_dir) = &args.target_dir {
        if let Some(output) = &args.list {
            info!("List mode: {:?} -> {:?}", target_dir, output);

            let count = write_listing(target_dir, output)?;
            progress.listing_written(output, count);
        } else if args.ocr {
            info!("OCR mode: {:?}", target_dir);

            let config = config_from_env();
            let client = VisionClient::new(config)?;
            let pipeline = OcrPipeline::new(Box::new(client), OutputLayout::default());

            pipeline.process_all(target_dir, &mut progress)?;
        } else {
            // Step 1: Scan directory tree
            progress.scan_start(target_dir);
            let entries = scan_files(target_dir)?;
            progress.scan_complete(entries.len());

            info!("Found {} files", entries.len());
            for entry in &entries {
                debug!("  {} -> {}", entry.name, normalize_filename(&entry.name));
            }

            // Step 2: Rename (or preview)
            let options = RenameOptions { dry_run: args.dry };
            let result = rename_receipts(&entries, &options, &mut progress)?;

            // Step 3: Record the batch
            if !args.dry && !result.is_empty() {
                let history_path = write_history(&result, target_dir)?;
                progress.history_written(&history_path);
            }

            if args.dry {
                display_dry_run(&result, &mut std::io::stdout())
                    .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
            } else {
                display_execution_result(&result, &mut std::io::stdout())
                    .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
            }
        }
    }

    Ok(())
}
