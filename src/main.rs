use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use clauseguard::{
    chat::ChatPanel,
    config::Config,
    controller::Controller,
    extract::extract_text,
    render::render_analysis,
    AnalysisBackend, HttpClient,
};

#[derive(Parser)]
#[command(name = "clauseguard", version, about = "AI-Powered Terms & Conditions Analyzer")]
struct Cli {
    /// Base URL of the analysis service.
    #[arg(long, env = "CLAUSEGUARD_API_URL", global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds; unset waits indefinitely.
    #[arg(long, env = "CLAUSEGUARD_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze Terms & Conditions text or a URL.
    Analyze(AnalyzeArgs),
    /// Check that the analysis service is up.
    Health,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Terms & Conditions text.
    #[arg(long, conflicts_with_all = ["text_file", "html_file"])]
    text: Option<String>,

    /// Read the text from a file.
    #[arg(long, conflicts_with = "html_file")]
    text_file: Option<PathBuf>,

    /// Extract the text from a saved HTML page.
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// URL of the Terms & Conditions page.
    #[arg(long)]
    url: Option<String>,

    /// Ask follow-up questions on stdin after the analysis.
    #[arg(long)]
    chat: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Load environment variables from .env file if it exists, before clap reads them
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_values(cli.api_url.as_deref(), cli.timeout_secs.as_deref())?;
    tracing::info!(api = %config.api_base_url, "using analysis service");

    let client = HttpClient::new(config)?;

    match cli.command {
        Command::Analyze(args) => analyze(client, args).await,
        Command::Health => health(&client).await,
    }
}

async fn analyze(client: HttpClient, args: AnalyzeArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let text = if let Some(text) = args.text {
        text
    } else if let Some(path) = args.text_file {
        tokio::fs::read_to_string(path).await?
    } else if let Some(path) = args.html_file {
        extract_text(&tokio::fs::read_to_string(path).await?)?
    } else {
        String::new()
    };

    let mut controller = Controller::new(client);
    controller.set_text(text);
    controller.set_url(args.url.unwrap_or_default());

    if controller.can_analyze() {
        eprintln!("Analyzing...");
    }
    controller.analyze().await;

    let view = controller.view();
    if let Some(error) = view.error {
        eprintln!("⚠️ {}", error);
        return Ok(ExitCode::FAILURE);
    }

    if let Some(result) = view.result {
        println!("{}", render_analysis(result));
    }

    if args.chat {
        match view.chat_context {
            Some(context) => run_chat(controller.backend(), context).await?,
            None => tracing::warn!("analysis returned no summary; chat unavailable"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_chat<B: AnalysisBackend>(backend: &B, context: &str) -> std::io::Result<()> {
    let mut panel = ChatPanel::new(context);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("Ask a question about these terms (empty line to quit).");
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }

        let answer = panel.ask(backend, &line).await.map(str::to_string);
        match answer {
            Some(answer) => println!("{}\n", answer),
            None => {
                if let Some(error) = panel.error() {
                    eprintln!("⚠️ {}", error);
                }
            }
        }
    }

    Ok(())
}

async fn health(client: &HttpClient) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match client.health().await {
        Ok(health) => {
            println!("{}: {}", client.config().api_base_url, health.status);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("⚠️ {}", failure);
            Ok(ExitCode::FAILURE)
        }
    }
}
