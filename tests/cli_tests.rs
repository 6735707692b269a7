use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn create_receipt_files(dir: &Path) {
    std::fs::write(dir.join("bank of cleveland 526.pdf"), "x").unwrap();
    std::fs::write(dir.join("smiths hardware -450.5 (2).pdf"), "x").unwrap();
    std::fs::write(dir.join("notes.txt"), "x").unwrap();
}

fn find_history_file(dir: &Path) -> std::path::PathBuf {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with("receiptfix-history-"))
                .unwrap_or(false)
        })
        .expect("history file written")
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Normalize receipt filenames"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_target_dir() {
    Command::cargo_bin("receiptfix")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_dry_flag_shows_preview() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .args(["--dry", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("Planned changes"))
        .stdout(predicate::str::contains("Bank of Cleveland $526.00.pdf"))
        .stdout(predicate::str::contains("2 files would be renamed"));
}

#[test]
fn test_dry_flag_no_filesystem_changes() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .args(["--dry", dir.path().to_str().unwrap()])
        .assert()
        .success();

    // Originals untouched, no history written
    assert!(dir.path().join("bank of cleveland 526.pdf").exists());
    assert!(!dir.path().join("Bank of Cleveland $526.00.pdf").exists());
    assert!(std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .all(|e| !e.file_name().to_string_lossy().contains("history")));
}

#[test]
fn test_rename_executes_and_writes_history() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully renamed 2 files"));

    assert!(dir.path().join("Bank of Cleveland $526.00.pdf").exists());
    assert!(dir.path().join("Smiths Hardware -$450.50 (2).pdf").exists());
    assert!(!dir.path().join("bank of cleveland 526.pdf").exists());

    // Files without an amount token are untouched
    assert!(dir.path().join("notes.txt").exists());

    let history = find_history_file(dir.path());
    let content = std::fs::read_to_string(history).unwrap();
    assert!(content.contains("bank of cleveland 526.pdf"));
    assert!(content.contains("Bank of Cleveland $526.00.pdf"));
}

#[test]
fn test_rename_recurses_into_subdirectories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("2022").join("01");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("joe's garage L3 1200.pdf"), "x").unwrap();

    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success();

    assert!(nested.join("Joes Garage $1,200.00 L3.pdf").exists());
}

#[test]
fn test_rename_is_idempotent() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success();

    // Second run finds nothing to do
    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully renamed 0 files"));
}

#[test]
fn test_collision_is_skipped() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("bank 5.pdf"), "original").unwrap();
    std::fs::write(dir.path().join("Bank $5.00.pdf"), "existing").unwrap();

    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    // Neither file was touched
    assert_eq!(
        std::fs::read_to_string(dir.path().join("bank 5.pdf")).unwrap(),
        "original"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Bank $5.00.pdf")).unwrap(),
        "existing"
    );
}

#[test]
fn test_revert_round_trip() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success();

    let history = find_history_file(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .args(["--revert", history.to_str().unwrap()])
        .assert()
        .success();

    // Original names restored
    assert!(dir.path().join("bank of cleveland 526.pdf").exists());
    assert!(dir.path().join("smiths hardware -450.5 (2).pdf").exists());
    assert!(!dir.path().join("Bank of Cleveland $526.00.pdf").exists());
}

#[test]
fn test_revert_missing_history_file() {
    Command::cargo_bin("receiptfix")
        .unwrap()
        .args(["--revert", "/nonexistent/history.json"])
        .assert()
        .code(6) // ExitCode::HistoryError
        .stderr(predicate::str::contains("History file error"));
}

#[test]
fn test_list_writes_filenames() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    let output = dir.path().join("listing.txt");
    let list_arg = format!("--list={}", output.display());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .args([list_arg.as_str(), dir.path().to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("bank of cleveland 526.pdf"));
    assert!(content.contains("notes.txt"));
}

#[test]
fn test_ocr_requires_configuration() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("receiptfix")
        .unwrap()
        .env_remove("GOOGLE_VISION_API_KEY")
        .args(["--ocr", dir.path().to_str().unwrap()])
        .assert()
        .code(9) // ExitCode::OcrError
        .stderr(predicate::str::contains("GOOGLE_VISION_API_KEY"));
}

#[test]
fn test_verbose_flag() {
    let dir = tempdir().unwrap();
    create_receipt_files(dir.path());

    Command::cargo_bin("receiptfix")
        .unwrap()
        .args(["--dry", "--verbose", dir.path().to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_nonexistent_directory() {
    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg("/nonexistent/path")
        .assert()
        .code(3) // ExitCode::DirectoryNotFound
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("file.txt");
    std::fs::write(&file_path, "content").unwrap();

    Command::cargo_bin("receiptfix")
        .unwrap()
        .arg(file_path.to_str().unwrap())
        .assert()
        .code(3) // NotADirectory maps to the same code
        .stderr(predicate::str::contains("not a directory"));
}
