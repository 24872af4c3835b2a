mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_batch_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args(["batch", "tests/fixtures/requests.csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "status,order_id,plan,method,total,discount,coupon,message",
        ))
        // WELCOME20 on the $9.99 plan: $2.00 off, $7.99 total.
        .stdout(predicate::str::contains(
            "advanced,card,7.99,2.00,WELCOME20,",
        ))
        // Wallet purchase with no coupon.
        .stdout(predicate::str::contains("academic,wallet,19.99,0.00,,"))
        // Unknown coupon is ignored; the total is unchanged.
        .stdout(predicate::str::contains("commercial,card,49.99,0.00,,"))
        // Free plan confirms without a provider charge.
        .stdout(predicate::str::contains("basic,none,0.00,0.00,,"))
        // Missing email blocks the billing gate.
        .stdout(predicate::str::contains(
            "rejected,,advanced,,,,,email: Email is required",
        ))
        // The decline test card produces a failure record.
        .stdout(predicate::str::contains("Your card was declined"));

    Ok(())
}

#[test]
fn test_buy_single_checkout() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args([
        "buy",
        "--plan",
        "advanced",
        "--email",
        "jane@school.edu",
        "--first-name",
        "Jane",
        "--last-name",
        "Doe",
        "--address1",
        "123 Main Street",
        "--city",
        "New York",
        "--postal-code",
        "10001",
        "--password",
        "s3cret-pass",
        "--agree-terms",
        "--coupon",
        "WELCOME20",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Coupon WELCOME20: save 20%"))
        .stdout(predicate::str::contains("Advanced Plan: total $7.99"))
        .stdout(predicate::str::contains("confirmed via card"));

    Ok(())
}

#[test]
fn test_buy_cad_display() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args([
        "buy",
        "--plan",
        "academic",
        "--email",
        "dean@uni.edu",
        "--first-name",
        "Sam",
        "--last-name",
        "Lee",
        "--address1",
        "45 College Ave",
        "--city",
        "Boston",
        "--postal-code",
        "02134",
        "--existing-user",
        "--agree-terms",
        "--method",
        "wallet",
        "--currency",
        "cad",
    ]);

    // 19.99 USD * 1.35 = 26.9865 -> C$26.99
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Academic Plan: total C$26.99"));

    Ok(())
}

#[test]
fn test_buy_missing_terms_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args([
        "buy",
        "--plan",
        "advanced",
        "--email",
        "jane@school.edu",
        "--first-name",
        "Jane",
        "--last-name",
        "Doe",
        "--address1",
        "123 Main Street",
        "--city",
        "New York",
        "--postal-code",
        "10001",
        "--password",
        "s3cret-pass",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("You must agree to the terms"));

    Ok(())
}

#[test]
fn test_unknown_plan_is_rejected_row() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad_plan.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(common::HEADER)?;
    wtr.write_record([
        "platinum",
        "a@b.co",
        "Ann",
        "Bee",
        "",
        "1 St",
        "Town",
        "00000",
        "US",
        "pw12345678",
        "false",
        "true",
        "",
        "wallet",
        "",
        "",
        "",
    ])?;
    wtr.flush()?;
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("batch").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rejected,,platinum,,,,,unknown plan: platinum"));

    Ok(())
}
