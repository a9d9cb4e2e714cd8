use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

use ledger_bot::commands::{descriptor, ParamKind};

#[derive(Parser)]
#[command(name = "ledger-cli")]
#[command(about = "Drive the ledger bot ingress from a terminal", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Platform identity to act as.
    #[arg(long, default_value = "cli-user")]
    user: String,

    #[arg(long, default_value = "cli")]
    channel: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a chat message, e.g. `say '!balance alice'`
    Say { text: String },
    /// Invoke a structured command, e.g. `slash createtransaction amount=5 payer=alice payee=bob`
    Slash {
        name: String,
        /// Options as name=value, typed by the command's parameter table.
        options: Vec<String>,
    },
    /// Print the registered command schema
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let event_id = uuid::Uuid::new_v4().to_string();

    match cli.command {
        Commands::Say { text } => {
            let event = json!({
                "type": "message",
                "id": event_id,
                "channel_id": cli.channel,
                "author": { "id": cli.user, "bot": false },
                "content": text,
            });
            let res = client.post(format!("{}/events", cli.url)).json(&event).send().await?;
            print_response(res).await?;
        }
        Commands::Slash { name, options } => {
            let event = json!({
                "type": "interaction",
                "id": event_id,
                "kind": "application_command",
                "user_id": cli.user,
                "channel_id": cli.channel,
                "data": { "name": name, "options": parse_options(&name, &options)? },
            });
            let res = client.post(format!("{}/events", cli.url)).json(&event).send().await?;
            print_response(res).await?;
        }
        Commands::Schema => {
            let res = client.get(format!("{}/commands", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Build interaction options, typing each value by the command table.
/// Options the table does not know are sent as strings.
fn parse_options(command: &str, raw: &[String]) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    let descriptor = descriptor::find(command);

    raw.iter()
        .map(|pair| -> Result<Value, Box<dyn std::error::Error>> {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("option '{}' is not name=value", pair))?;

            let kind = descriptor
                .and_then(|d| d.params.iter().find(|p| p.name == name))
                .map(|p| p.kind);
            let value = match kind {
                Some(ParamKind::Number) => {
                    let n: f64 = value
                        .parse()
                        .map_err(|_| format!("option '{}' must be a number", name))?;
                    json!(n)
                }
                _ => Value::String(value.to_string()),
            };

            let mut option = Map::new();
            option.insert("name".into(), Value::String(name.to_string()));
            option.insert("value".into(), value);
            Ok(Value::Object(option))
        })
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: ingress returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_options_typed_by_command_table() {
        let options = parse_options(
            "createtransaction",
            &strings(&["amount=5", "payer=007", "payee=42"]),
        )
        .unwrap();

        assert_eq!(
            options,
            vec![
                json!({"name": "amount", "value": 5.0}),
                json!({"name": "payer", "value": "007"}),
                json!({"name": "payee", "value": "42"}),
            ]
        );
    }

    #[test]
    fn test_numeric_looking_username_stays_string() {
        let options = parse_options("getpublickey", &strings(&["username=42"])).unwrap();
        assert_eq!(options, vec![json!({"name": "username", "value": "42"})]);
    }

    #[test]
    fn test_bad_options() {
        assert!(parse_options("createtransaction", &strings(&["amount=five"])).is_err());
        assert!(parse_options("balance", &strings(&["username"])).is_err());
    }

    #[test]
    fn test_unknown_command_options_are_strings() {
        let options = parse_options("frobnicate", &strings(&["level=3"])).unwrap();
        assert_eq!(options, vec![json!({"name": "level", "value": "3"})]);
    }
}
