use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "receiptfix")]
#[command(author, version, long_about = None)]
#[command(about = "Normalize receipt filenames and preprocess receipt PDFs for OCR")]
pub struct Args {
    /// Target directory containing receipt files
    #[arg(required_unless_present = "revert")]
    pub target_dir: Option<PathBuf>,

    /// Simulate changes without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Revert renames using a history file
    #[arg(short, long, value_name = "HISTORY_FILE", conflicts_with_all = ["list", "ocr"])]
    pub revert: Option<PathBuf>,

    /// Write the relative path of every file under the target to a listing file
    #[arg(
        long,
        value_name = "OUTPUT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "filenames.txt",
        conflicts_with = "ocr"
    )]
    pub list: Option<PathBuf>,

    /// Run the OCR preprocessing pipeline over PDF receipts in the target
    #[arg(long)]
    pub ocr: bool,
}
