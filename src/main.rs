use clap::{Parser, Subcommand};

use advisor_place::config::AppConfig;
use advisor_place::server;

#[derive(Debug, Parser)]
#[command(name = "advisor-place", version, about = "Advisor Place API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Issue a sign up link for an email address
    SignupLink {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load().and_then(|c| c.validate().map(|_| c).map_err(Into::into)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };
    server::init_tracing(&config.server);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::serve(config).await,
        Command::SignupLink { email } => match server::issue_sign_up_link(&config, &email).await {
            Ok(Some(url)) => {
                println!("{url}");
                Ok(())
            }
            Ok(None) => {
                eprintln!("{email} already has an account; no link issued");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "fatal");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
