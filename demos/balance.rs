/*
[INPUT]:  AVTOCOD_TOKEN env var
[OUTPUT]: Balance, account info, and recent reports printed to stdout
[POS]:    Examples - profile queries and reports stream
[UPDATE]: When profile endpoints change
*/

use avtocod::AvtocodClient;
use futures_util::{StreamExt, TryStreamExt};

/// Example: inspect the account with a pre-acquired API token.
#[tokio::main]
async fn main() {
    println!("=== Avtocod Profile Example ===\n");

    let token = match std::env::var("AVTOCOD_TOKEN") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Set AVTOCOD_TOKEN to run this example");
            return;
        }
    };

    let client = match AvtocodClient::from_token(token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.get_account_info().await {
        Ok(account) => println!("✓ Account: {} ({:?})", account.email, account.tariff),
        Err(e) => println!("✗ Account info error: {}", e),
    }

    match client.get_balance().await {
        Ok(balance) => {
            for item in balance {
                println!("✓ Product {}: {} reports left", item.product_uuid, item.count);
            }
        }
        Err(e) => println!("✗ Balance error: {}", e),
    }

    println!("\nLast 5 reports:");
    let recent: Result<Vec<_>, _> = client.iter_reports(5).take(5).try_collect().await;
    match recent {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "  {} {} ({:?})",
                    report.uuid, report.query.body, report.query.query_type
                );
            }
        }
        Err(e) => println!("✗ Reports list error: {}", e),
    }
}
