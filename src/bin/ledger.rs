use budget_planner::{Config, init_tracing, rebuild_all_ledgers};

fn print_usage(bin_name: &str) {
    eprintln!("Usage: {bin_name} rebuild");
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args();
    let bin_name = args.next().unwrap_or_else(|| "ledger".to_string());
    let command = args.next();

    if command.as_deref() != Some("rebuild") || args.next().is_some() {
        print_usage(&bin_name);
        std::process::exit(2);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, config.logging.json_format);

    match rebuild_all_ledgers(&config).await {
        Ok(result) => {
            println!(
                "Ledger rebuild completed: budgets_processed={}, budgets_failed={}, days_removed={}, days_created={}",
                result.budgets_processed, result.budgets_failed, result.days_removed, result.days_created
            );
            if result.budgets_failed > 0 {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("Ledger rebuild failed: {err:?}");
            std::process::exit(1);
        }
    }
}
