use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Send requests through a running CORS relay", long_about = None)]
struct Cli {
    /// Base URL of the relay.
    #[arg(short, long, default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay liveness
    Status,
    /// Fetch a URL through the simple relay (GET /relay?url=)
    Get { url: String },
    /// Send a full request through the structured relay (POST /relay)
    Send {
        url: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Header as `Name: value`; repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body; sent as JSON when it parses as JSON
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.server.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/", base)).send().await?,
        Commands::Get { url } => {
            client
                .get(format!("{}/relay", base))
                .query(&[("url", url)])
                .send()
                .await?
        }
        Commands::Send {
            url,
            method,
            headers,
            body,
        } => {
            let mut header_map = Map::new();
            for header in headers {
                let (name, value) = header
                    .split_once(':')
                    .ok_or_else(|| format!("header '{}' is not 'Name: value'", header))?;
                header_map.insert(name.trim().to_string(), Value::String(value.trim().to_string()));
            }

            let mut request = json!({
                "url": url,
                "method": method,
                "headers": header_map,
            });
            if let Some(body) = body {
                request["body"] = serde_json::from_str(&body).unwrap_or(Value::String(body));
            }

            client
                .post(format!("{}/relay", base))
                .json(&request)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
