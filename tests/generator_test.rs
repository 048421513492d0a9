mod common;

use assert_cmd::cargo_bin;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::process::Command;

#[test]
fn test_generated_script_round_trip() {
    let output_path = std::path::PathBuf::from("test_generated.csv");
    common::generate_transfer_script(&output_path, 5, 200).expect("Failed to generate CSV");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read file");
    // Header + 5 opens + 200 transfers
    assert_eq!(content.lines().count(), 206);

    let output = Command::new(cargo_bin!("pocketbank"))
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let account_rows: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("account,"))
        .collect();
    assert_eq!(account_rows.len(), 5);

    // Whatever the transfer outcomes, the total is conserved.
    let total: Decimal = account_rows
        .iter()
        .map(|line| {
            line.split(',')
                .nth(3)
                .expect("balance column missing")
                .parse::<Decimal>()
                .expect("balance must be numeric")
        })
        .sum();
    assert_eq!(total, dec!(500.0));

    std::fs::remove_file(output_path).ok();
}
