//! End-to-end tests of the `dipcalc` binary.

use std::fs;
use std::process::{Command, Output};

fn dipcalc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dipcalc"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("DIPCALC_VARIANTS")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run dipcalc")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn move_prints_banner_and_verdict() {
    let out = dipcalc(&["move", "F", "NTH", "PIC", "UK"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("{:#^60}", " ORDERS "));
    assert_eq!(lines[1], "[ENGLAND]");
    assert!(lines[2].starts_with("F  NTH (North Sea)"));
    assert!(lines[2].ends_with("[INVALID]"));
}

#[test]
fn legal_move_without_faction() {
    let out = dipcalc(&["move", "a", "par", "bur"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("PAR (Paris)"));
    assert!(text.contains("BUR (Burgundy)"));
    assert!(text.trim_end().ends_with("[VALID]"));
}

#[test]
fn move_requiring_occupancy_uses_start_positions() {
    let ok = dipcalc(&["--start-positions", "move", "A", "PAR", "BUR", "FR", "--require-occupancy"]);
    assert!(stdout(&ok).trim_end().ends_with(" [VALID]"));

    let wrong = dipcalc(&["--start-positions", "move", "A", "PAR", "BUR", "DE", "--require-occupancy"]);
    assert!(wrong.status.success());
    assert!(stdout(&wrong).trim_end().ends_with("[INVALID]"));
}

#[test]
fn order_json_report() {
    let out = dipcalc(&["order", "uk f nth m: pic", "--json"]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(report["order"], "UK F NTH M: PIC");
    assert_eq!(report["valid"], false);
    assert_eq!(report["violation"], "not_adjacent");
    assert!(report["reason"].is_string());
}

#[test]
fn order_plain_report() {
    let out = dipcalc(&["order", "FR A PAR M: BUR"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim_end(), format!("{:<30}[VALID]", "FR A PAR M: BUR"));
}

#[test]
fn check_file_reports_each_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.txt");
    fs::write(&path, "# spring\nFR A PAR M: BUR\n\nUK F LVP M: IRI\nDE A KIE M: MUN\n").unwrap();

    let out = dipcalc(&["check", path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("FR A PAR M: BUR") && lines[0].ends_with("[VALID]"));
    assert!(lines[1].ends_with("[VALID]"));
    assert!(lines[2].starts_with("DE A KIE M: MUN") && lines[2].ends_with("[VALID]"));
}

#[test]
fn check_file_with_bad_line_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.txt");
    fs::write(&path, "FR A PAR M: BUR\nFR A XYZ M: BUR\n").unwrap();

    let out = dipcalc(&["check", path.to_str().unwrap()]);
    assert!(!out.status.success());
    let text = stdout(&out);
    assert!(text.contains("line 2:"));
    assert!(text.contains("FR A PAR M: BUR"));
}

#[test]
fn show_lists_coasts_and_units() {
    let out = dipcalc(&["show", "stp"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("STP (St. Petersburg)"));
    assert!(text.contains("coasts:   STPNC, STPSC"));
    assert!(text.contains("capital:  yes"));

    let out = dipcalc(&["--start-positions", "show", "lon"]);
    assert!(stdout(&out).contains("unit:     England F"));
}

#[test]
fn named_test_variant_is_selectable() {
    let out = dipcalc(&["--variant", "basictest", "--start-positions", "show", "isls"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("parent:   ISL"));
    assert!(text.contains("unit:     Alphonia F"));
}

#[test]
fn unknown_variant_fails() {
    let out = dipcalc(&["--variant", "fake-variant", "show", "par"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("fake-variant"));
}

#[test]
fn unknown_territory_fails() {
    let out = dipcalc(&["move", "A", "PAR", "XYZ"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("XYZ"));
}
