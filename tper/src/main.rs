use std::io::{BufRead, Write};

use clap::Parser;
use tper::agents::OpenAiConfig;
use tper::cli::Args;
use tper::workflow::TperWorkflow;
use tper_sdk::log_debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    args.validate()?;

    let mut config = OpenAiConfig::from_env()?;
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    println!("TPER Framework");
    println!("{}", "=".repeat(50));
    println!(
        "Session started {} (model: {})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.model
    );

    if let Some(request) = &args.request {
        run_request(&args, &config, request).await?;
        return Ok(());
    }

    // Interactive loop, one fresh workflow per request
    let stdin = std::io::stdin();
    loop {
        println!("\n{}", "=".repeat(50));
        print!("Enter your request (or 'quit' to exit): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let user_input = line.trim();

        if matches!(user_input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        if user_input.is_empty() {
            println!("Please enter a valid request.");
            continue;
        }

        run_request(&args, &config, user_input).await?;
    }

    println!("Goodbye!");
    Ok(())
}

async fn run_request(args: &Args, config: &OpenAiConfig, user_input: &str) -> anyhow::Result<()> {
    let mut workflow = TperWorkflow::with_openai(
        "TPER_Workflow",
        "Think-Plan-Execute-Review Framework",
        config,
    )
    .with_max_iterations(args.max_iterations);

    let result = workflow.run_with_iterations(user_input).await;

    println!("\n{}", "=".repeat(50));
    println!("FINAL RESULTS");
    println!("{}", "=".repeat(50));
    println!("{}", result);

    if args.debug {
        log_debug!(
            "Run finished after {} iteration(s), {} context entries",
            workflow.current_iteration(),
            workflow.context().len()
        );
    }

    workflow.cleanup().await?;
    Ok(())
}
