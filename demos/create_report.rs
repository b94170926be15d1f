/*
[INPUT]:  AVTOCOD_EMAIL / AVTOCOD_PASSWORD env vars, a VIN to check
[OUTPUT]: A generated vehicle report printed to stdout
[POS]:    Examples - full report flow (login, create, wait, fetch)
[UPDATE]: When the report flow changes
*/

use std::time::Duration;

use avtocod::{AvtocodClient, QueryType};

/// Example: order a report by VIN and wait for it to finish.
///
/// Requires real Profi credentials in the environment.
#[tokio::main]
async fn main() {
    println!("=== Avtocod Report Example ===\n");

    let email = match std::env::var("AVTOCOD_EMAIL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Set AVTOCOD_EMAIL and AVTOCOD_PASSWORD to run this example");
            return;
        }
    };
    let password = std::env::var("AVTOCOD_PASSWORD").unwrap_or_default();

    let client = match AvtocodClient::from_credentials(&email, &password).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Login failed: {}", e);
            return;
        }
    };
    println!("✓ Logged in\n");

    let vin = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "XTA210990Y2769486".to_string());

    println!("Ordering report for {}...", vin);
    let created = match client.create_report(&vin, QueryType::Vin).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ create_report failed: {}", e);
            return;
        }
    };
    println!("✓ Report ordered: {}", created.uuid);

    if let Some(seconds) = created.suggest_get_seconds {
        println!("Server suggests waiting {}s before the first fetch", seconds);
        tokio::time::sleep(Duration::from_secs(seconds)).await;
    }

    println!("Waiting for generation to finish...");
    match client
        .wait_report(
            created.uuid,
            Duration::from_secs(5),
            Duration::from_secs(300),
        )
        .await
    {
        Ok(report) => {
            println!(
                "✓ Report ready: {} sources ok, {} failed",
                report.progress.ok, report.progress.error
            );
            if let Some(content) = report.content {
                println!("Content sections: {:#?}", content);
            }
        }
        Err(e) => println!("✗ Error while waiting: {}", e),
    }
}
