use chatline_core::ProviderAdapter;
use chatline_core::error::{ChatlineError, Result};
use chatline_core::message::Message;
use chatline_core::provider::{self, ChatProvider};
use clap::Parser;
use futures::StreamExt;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser)]
#[command(name = "chatline", about = "Chatline — chat with hosted LLM providers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show version information
    Version,
    /// List available providers
    Providers,
    /// Run a prompt against a provider
    Chat {
        /// Provider: deepseek, internlm
        #[arg(short, long, default_value = "deepseek")]
        provider: String,
        /// Model name
        #[arg(short, long)]
        model: String,
        /// System instructions
        #[arg(short, long)]
        system: Option<String>,
        /// Print the reply as it is generated
        #[arg(long)]
        stream: bool,
        /// Config file with an `env` table (TOML, YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,
        /// HTTP timeout for each request, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Single prompt (if omitted, starts interactive mode)
        #[arg(trailing_var_arg = true)]
        prompt: Vec<String>,
    },
}

fn build_provider(
    name: &str,
    config_path: Option<&str>,
    timeout_ms: Option<u64>,
) -> Result<ProviderAdapter> {
    let profile = provider::by_name(name)
        .ok_or_else(|| ChatlineError::config(format!("Unknown provider: {name}")))?;
    let config = config::load(config_path)?;

    let mut adapter = ProviderAdapter::new(profile);
    if let Some(ms) = timeout_ms {
        adapter = adapter.timeout(ms);
    }
    adapter.init(name, &config)?;
    Ok(adapter)
}

/// Send the history and print the reply, returning its full text.
async fn respond(
    provider: &dyn ChatProvider,
    history: &[Message],
    model: &str,
    stream: bool,
) -> Result<String> {
    if !stream {
        let reply = provider.chat(history, model).await?;
        println!("{reply}");
        return Ok(reply);
    }

    let mut fragments = provider.stream(history, model).await?;
    let mut reply = String::new();
    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;
        print!("{fragment}");
        io::stdout().flush().ok();
        reply.push_str(&fragment);
    }
    println!();
    Ok(reply)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("chatline {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Providers => {
            println!("Available providers:");
            for profile in provider::builtin() {
                println!(
                    "  {:<10} — {} [{}]",
                    profile.name, profile.base_url, profile.credential_key
                );
            }
        }
        Commands::Chat {
            provider,
            model,
            system,
            stream,
            config,
            timeout_ms,
            prompt,
        } => {
            let p = match build_provider(&provider, config.as_deref(), timeout_ms) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };

            let mut history: Vec<Message> = Vec::new();

            if let Some(ref sys) = system {
                history.push(Message::system(sys));
            }

            if !prompt.is_empty() {
                // Single-shot mode
                history.push(Message::user(prompt.join(" ")));
                if let Err(e) = respond(&p, &history, &model, stream).await {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            } else {
                // Interactive REPL
                println!(
                    "chatline chat — {provider}/{model} ({})",
                    p.profile().base_url
                );
                println!("Type 'exit' to quit.\n");

                let stdin = io::stdin();
                loop {
                    print!("you> ");
                    io::stdout().flush().ok();

                    let mut line = String::new();
                    match stdin.lock().read_line(&mut line) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line.trim() == "exit" => break,
                        Ok(_) => {}
                    }

                    let text = line.trim().to_string();
                    if text.is_empty() {
                        continue;
                    }

                    history.push(Message::user(&text));

                    print!("\nassistant> ");
                    match respond(&p, &history, &model, stream).await {
                        Ok(reply) => {
                            println!();
                            history.push(Message::assistant(reply));
                        }
                        Err(e) => {
                            eprintln!("Error: {e}\n");
                            history.pop();
                        }
                    }
                }
            }
        }
    }
}
