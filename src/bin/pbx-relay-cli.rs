use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "pbx-relay-cli")]
#[command(about = "Command-line client for the PBX relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the relay is up
    Health,
    /// List extensions known to the PBX
    Extensions,
    /// Create a PBX user from a JSON file
    CreateUser {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Create an extension from a JSON file
    CreateExtension {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/", base)).send().await?;
            let ok = res.status().is_success();
            println!("{}", res.text().await?);
            return Ok(ok);
        }
        Commands::Extensions => {
            client
                .get(format!("{}/webapi/core/extension", base))
                .send()
                .await?
        }
        Commands::CreateUser { file } => {
            client
                .post(format!("{}/webapi/core/user/create", base))
                .json(&read_json(&file)?)
                .send()
                .await?
        }
        Commands::CreateExtension { file } => {
            client
                .post(format!("{}/webapi/core/extension/create", base))
                .json(&read_json(&file)?)
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Relay returned status {}", status);
        eprintln!("{}", rendered);
    }
    Ok(status.is_success())
}
