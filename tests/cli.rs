use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gstr(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gstr").unwrap();
    cmd.env("GSTR_LEDGER_DATA_DIR", data_dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_command_prints_help_pointer() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("gstr --help"));
}

#[test]
fn test_distribute_prints_totals() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--amount", "10000", "--from", "2024-01-01", "--to", "2024-01-30"])
        .args(["--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Grand Total"))
        .stdout(predicate::str::contains("10752.00"))
        .stdout(predicate::str::contains("Total for 2024-01-30"));
}

#[test]
fn test_distribute_same_seed_same_output() {
    let temp = TempDir::new().unwrap();
    let run = || {
        gstr(temp.path())
            .args(["distribute", "-a", "2500.50", "-f", "01/03/2024", "-t", "31/03/2024"])
            .args(["--seed", "9", "--days-only"])
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_distribute_rejects_29_days() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--amount", "10000", "--from", "2024-01-01", "--to", "2024-01-29"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Validation error"))
        .stderr(predicate::str::contains("29 days"));
}

#[test]
fn test_distribute_rejects_zero_amount() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--amount", "0", "--from", "2024-01-01", "--to", "2024-01-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Total amount must be greater than zero"));
}

#[test]
fn test_distribute_missing_amount() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--from", "2024-01-01", "--to", "2024-01-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount is required"));
}

#[test]
fn test_distribute_exact_range_rejects_31_days() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--amount", "100", "--from", "2024-01-01", "--to", "2024-01-31"])
        .arg("--exact-range")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 30 are allowed"));
}

#[test]
fn test_distribute_rejects_bad_precision() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--amount", "100", "--from", "2024-01-01", "--to", "2024-01-30"])
        .args(["--precision", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Precision must be 0 or 2"));
}

#[test]
fn test_distribute_exports_csv_and_journals() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("sales.csv");

    gstr(temp.path())
        .args(["distribute", "--amount", "10000", "--from", "2024-01-01", "--to", "2024-01-30"])
        .args(["--precision", "0", "--seed", "1", "--quiet", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Date,Amount");
    assert_eq!(lines.len(), 1 + 300 + 30 + 1);
    assert!(lines[1..10].iter().all(|l| l.ends_with(".00")));
    assert_eq!(*lines.last().unwrap(), "Final Grand Total,10752.00");

    gstr(temp.path())
        .arg("journal")
        .assert()
        .success()
        .stdout(predicate::str::contains("DISTRIBUTE 10000.00 over 2024-01-01 to 2024-01-30"));
}

#[test]
fn test_distribute_exports_json_by_extension() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("sales.json");

    gstr(temp.path())
        .args(["distribute", "--amount", "500", "--from", "2024-02-01", "--to", "2024-03-15", "-q"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["entries"].as_array().unwrap().len(), 300);
    assert_eq!(json["grand_total"], 53760);
    assert_eq!(json["span"]["end"], "2024-03-01");
}

#[test]
fn test_summary_prints_and_exports() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("profit.csv");
    fs::write(
        &input,
        "Purchase Month,Sale Month,Purchase Amount,Whole Sale Amount\n\
         April,May,1000,200\n\
         May,June,500,\n",
    )
    .unwrap();

    gstr(temp.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("₹920.00"))
        .stdout(predicate::str::contains("Total sales: ₹1680.00"));

    let out = temp.path().join("summary.csv");
    gstr(temp.path())
        .arg("summary")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.contains("May,June,500.00,0.00,560.00"));
    assert!(csv.contains("Total,,1500.00,200.00,1480.00"));
}

#[test]
fn test_summary_header_only_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("profit.csv");
    fs::write(
        &input,
        "Purchase Month,Sale Month,Purchase Amount,Whole Sale Amount\n",
    )
    .unwrap();

    gstr(temp.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid rows in"))
        .stderr(predicate::str::contains("the file has no data rows"));
}

#[test]
fn test_summary_total_row_only_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("profit.csv");
    fs::write(
        &input,
        "Purchase Month,Sale Month,Purchase Amount,Whole Sale Amount\nTotal,,100,20\n\n",
    )
    .unwrap();

    gstr(temp.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid rows in"));
}

#[test]
fn test_summary_reports_skipped_row_once() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("profit.csv");
    fs::write(
        &input,
        "Purchase Month,Sale Month,Purchase Amount,Whole Sale Amount\n\
         April,May,1000,200\n\
         May,June,lots,\n",
    )
    .unwrap();

    let output = gstr(temp.path()).arg("summary").arg(&input).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("row 2").count(), 1, "stderr was: {stderr}");
    assert!(stderr.contains("Skipped row 2:"));
}

#[test]
fn test_summary_total_out_of_range_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("profit.csv");
    fs::write(
        &input,
        "Purchase Month,Sale Month,Purchase Amount,Whole Sale Amount\n\
         April,May,50000000000000000,0\n\
         May,June,50000000000000000,0\n",
    )
    .unwrap();

    gstr(temp.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount out of range: total purchase amount"));
}

#[test]
fn test_distribute_rejects_oversized_amount() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["distribute", "--amount", "90000000000000000"])
        .args(["--from", "2024-01-01", "--to", "2024-01-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount is not a valid amount"));
}

#[test]
fn test_summary_missing_file() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .args(["summary", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open profit file"));
}

#[test]
fn test_purchase_check_accepts_and_fills_gstin() {
    let temp = TempDir::new().unwrap();
    let firms = temp.path().join("firms.json");
    let drafts = temp.path().join("purchases.json");
    fs::write(&firms, r#"[{"firmName": "Sharma Traders", "gstin": "27AAPFU0939F1ZV"}]"#).unwrap();
    fs::write(
        &drafts,
        r#"[
            {"invoiceNumber": "A-1", "date": "01/04/2024", "firmName": "Sharma Traders",
             "amount": 1180, "taxableAmount": 1000, "cgst": 90},
            {"invoiceNumber": "A-2", "date": "2024-05-02", "firmName": "Sharma Traders",
             "gstin": "27AAPFU0939F1ZV", "amount": "118", "taxableAmount": "100",
             "cgst": "9", "sgst": "9"}
        ]"#,
    )
    .unwrap();

    gstr(temp.path())
        .args(["purchase", "check"])
        .arg(&drafts)
        .arg("--firms")
        .arg(&firms)
        .assert()
        .success()
        .stdout(predicate::str::contains("27AAPFU0939F1ZV"))
        .stdout(predicate::str::contains("1298.00"))
        .stdout(predicate::str::contains("2 invoice(s)"));

    gstr(temp.path())
        .args(["purchase", "check"])
        .arg(&drafts)
        .args(["--firms"])
        .arg(&firms)
        .args(["--from", "01/05/2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 invoice(s)"));
}

#[test]
fn test_purchase_check_reports_every_issue() {
    let temp = TempDir::new().unwrap();
    let drafts = temp.path().join("purchases.json");
    fs::write(
        &drafts,
        r#"{"invoiceNumber": "B-7", "date": "31/02/2024", "firmName": "Patel Sons",
            "gstin": "24AAACP1234B1Z2", "amount": "100", "taxableAmount": "150", "cgst": "5"}"#,
    )
    .unwrap();

    gstr(temp.path())
        .args(["purchase", "check"])
        .arg(&drafts)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Draft #1 B-7:"))
        .stdout(predicate::str::contains("Date is invalid"))
        .stdout(predicate::str::contains("Taxable Amount cannot be greater than Total Amount"))
        .stderr(predicate::str::contains("1 of 1 purchase draft(s) rejected"));
}

#[test]
fn test_config_set_and_show() {
    let temp = TempDir::new().unwrap();

    gstr(temp.path())
        .args(["config", "set", "--precision", "0", "--range-policy", "exact"])
        .args(["--journal", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    gstr(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Precision:       0"))
        .stdout(predicate::str::contains("Range policy:    exact"))
        .stdout(predicate::str::contains("Journal:         disabled"));

    gstr(temp.path())
        .args(["distribute", "--amount", "100", "--from", "2024-01-01", "--to", "2024-01-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 30 are allowed"));
}

#[test]
fn test_journal_empty() {
    let temp = TempDir::new().unwrap();
    gstr(temp.path())
        .arg("journal")
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal entries."));
}
