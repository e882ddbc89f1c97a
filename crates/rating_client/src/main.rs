//! The interactive console client of the module rating service.
//!
//! It speaks to the HTTP API of the [`rating-api`](../rating_api_lib/index.html)
//! program. Commands are read from the standard input, one per line.

use std::io::{self, BufRead as _, Write as _};

use clap::Parser;

use self::api::ApiClient;

mod api;

/// The interactive console client of the module rating service.
#[derive(clap::Parser)]
struct Args {
    /// The base URL of the API, e.g. http://localhost:8000.
    ///
    /// Without it, the URL is taken from the first `login <url>` command.
    #[arg(long)]
    url: Option<String>,
}

const COMMANDS: &str = "register, login, logout, list, view, average, rate, exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut client = ApiClient::new(args.url);

    println!("Module rating client");
    println!("Available commands: {COMMANDS}");

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let words = line.split_whitespace().collect::<Vec<_>>();
        let Some((&cmd, rest)) = words.split_first() else {
            continue;
        };

        let res = match (cmd, rest) {
            ("register", []) => client.register().await,
            ("login", [url]) => client.login(url).await,
            ("login", _) => usage("login <url>"),
            ("logout", []) => {
                client.logout();
                continue;
            }
            ("list", []) => client.list_instances().await,
            ("view", []) => client.view_professors().await,
            ("average", [professor_id, module_code]) => {
                client.average(professor_id, module_code).await
            }
            ("average", _) => usage("average <professor_id> <module_code>"),
            ("rate", [professor_id, module_code, year, semester, rating]) => {
                match (year.parse(), semester.parse(), rating.parse()) {
                    (Ok(year), Ok(semester), Ok(rating)) => {
                        client
                            .rate(professor_id, module_code, year, semester, rating)
                            .await
                    }
                    _ => {
                        println!("Invalid numeric input");
                        continue;
                    }
                }
            }
            ("rate", _) => usage("rate <professor_id> <module_code> <year> <semester> <rating>"),
            ("exit", _) => break,
            _ => {
                println!("Invalid command. Available commands: {COMMANDS}");
                continue;
            }
        };

        if let Err(e) = res {
            println!("Error: {e:#}");
        }
    }

    Ok(())
}

fn usage(usage: &str) -> anyhow::Result<()> {
    println!("Usage: {usage}");
    Ok(())
}
