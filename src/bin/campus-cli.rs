use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Command-line client for the campus contract gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway and node health
    Health,
    /// List callable functions of a contract
    Functions {
        address: String,
        #[arg(long)]
        abi: PathBuf,
    },
    /// Execute a read-only call
    Call {
        address: String,
        #[arg(long)]
        abi: PathBuf,
        function: String,
        args: Vec<String>,
    },
    /// Sign and broadcast a state-changing transaction
    Send {
        address: String,
        #[arg(long)]
        abi: PathBuf,
        function: String,
        args: Vec<String>,
        /// Poll for the receipt instead of returning after broadcast
        #[arg(long)]
        wait: bool,
    },
    /// List the built-in university operations
    Ops,
    /// Invoke a built-in university operation by name
    Op {
        name: String,
        args: Vec<String>,
        #[arg(long)]
        wait: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Functions { address, abi } => {
            let body = json!({
                "address": address,
                "abi": read_abi(&abi)?,
                "function": "",
            });
            let res = client
                .post(format!("{}/contracts/functions", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Call {
            address,
            abi,
            function,
            args,
        } => {
            let body = json!({
                "address": address,
                "abi": read_abi(&abi)?,
                "function": function,
                "args": parse_args(&args),
            });
            let res = client
                .post(format!("{}/contracts/call", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Send {
            address,
            abi,
            function,
            args,
            wait,
        } => {
            let body = json!({
                "address": address,
                "abi": read_abi(&abi)?,
                "function": function,
                "args": parse_args(&args),
                "wait": wait,
            });
            let res = client
                .post(format!("{}/contracts/send", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Ops => {
            let res = client.get(format!("{}/ops", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Op { name, args, wait } => {
            let body = json!({
                "args": parse_args(&args),
                "wait": wait,
            });
            let res = client
                .post(format!("{}/ops/{}", cli.url, name))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn read_abi(path: &PathBuf) -> Result<Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Each positional argument is parsed as JSON when it is valid JSON
/// (numbers, booleans, arrays) and passed through as a string otherwise.
fn parse_args(args: &[String]) -> Vec<Value> {
    args.iter()
        .map(|arg| serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args_json_or_string() {
        let args = vec![
            "42".to_string(),
            "true".to_string(),
            "[1,2]".to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string(),
        ];
        assert_eq!(
            parse_args(&args),
            vec![
                json!(42),
                json!(true),
                json!([1, 2]),
                json!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            ]
        );
    }

    #[tokio::test]
    async fn test_print_response_handles_success_and_error() {
        let ok = axum::http::Response::builder()
            .status(200)
            .body(r#"{"result":[42]}"#.to_string())
            .unwrap();
        assert!(print_response(reqwest::Response::from(ok)).await.is_ok());

        let failed = axum::http::Response::builder()
            .status(502)
            .body(r#"{"error":"rpc error: connection refused"}"#.to_string())
            .unwrap();
        assert!(print_response(reqwest::Response::from(failed)).await.is_ok());
    }
}
