use std::path::PathBuf;
use std::process::ExitCode;

use ai_gateway_client::{
    AiGatewayConfig, ChatAnswer, ChatRequest, ENV_PREFIX, GatewayClient, IndexStatus,
    ResultEnvelope, UploadRequest,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use tracing_subscriber::EnvFilter;

/// Talk to the AI inference service from the command line.
#[derive(Debug, Parser)]
#[command(name = "ai-gateway", version)]
struct Cli {
    /// Base URL of the AI service (overrides `AI_API_URL`)
    #[arg(long, global = true)]
    url: Option<String>,

    /// YAML file with client settings (`url`, `timeout`, `upload_timeout`, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a document for indexing
    Upload {
        path: PathBuf,
        /// File name announced to the service (defaults to the basename)
        #[arg(long)]
        name: Option<String>,
    },
    /// Ask a question against the indexed documents
    Chat { question: String },
    /// Show the state of the remote index
    Status,
    /// Probe service liveness
    Health,
}

fn load_config(cli: &Cli) -> anyhow::Result<AiGatewayConfig> {
    // defaults < YAML file < environment < command line
    let mut figment: Figment = AiGatewayConfig::figment();
    if let Some(path) = &cli.config {
        figment = figment
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX));
    }
    if let Some(url) = &cli.url {
        figment = figment.merge(("url", url));
    }
    AiGatewayConfig::from_figment(&figment).context("invalid AI gateway configuration")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_envelope(envelope: &ResultEnvelope) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, "using AI service");
    let client = GatewayClient::from_config(config)?;

    match cli.command {
        Command::Upload { path, name } => {
            let mut request = UploadRequest::new(path);
            request.file_name = name;
            print_envelope(&client.upload_document(request).await)
        }
        Command::Chat { question } => {
            let envelope = client.chat(ChatRequest::new(question)).await;
            if let Some(Ok(answer)) = envelope.decode_data::<ChatAnswer>() {
                tracing::info!(
                    intent = ?answer.intent,
                    recommendations = answer.recommendations.len(),
                    "chat answer received"
                );
            }
            print_envelope(&envelope)
        }
        Command::Status => {
            let envelope = client.get_status().await;
            if let Some(Ok(status)) = envelope.decode_data::<IndexStatus>() {
                tracing::info!(
                    ready = status.is_ready(),
                    vectors = status.vectors,
                    "index status received"
                );
            }
            print_envelope(&envelope)
        }
        Command::Health => {
            if client.health_check().await {
                println!("healthy");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("unhealthy");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    run(Cli::parse()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn yaml_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_upload_with_name() {
        let cli = Cli::try_parse_from([
            "ai-gateway",
            "--url",
            "http://ai.local:8000",
            "upload",
            "/tmp/phpXYZ",
            "--name",
            "menu.pdf",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://ai.local:8000"));
        let Command::Upload { path, name } = cli.command else {
            panic!("expected upload command");
        };
        assert_eq!(path, PathBuf::from("/tmp/phpXYZ"));
        assert_eq!(name.as_deref(), Some("menu.pdf"));
    }

    #[test]
    fn test_chat_requires_question() {
        assert!(Cli::try_parse_from(["ai-gateway", "chat"]).is_err());
    }

    #[test]
    fn test_url_flag_beats_environment() {
        temp_env::with_vars(
            [
                ("AI_API_URL", Some("http://from-env:8000")),
                ("AI_API_TIMEOUT", Some("30")),
            ],
            || {
                let cli =
                    Cli::try_parse_from(["ai-gateway", "status", "--url", "http://from-flag:9000"])
                        .unwrap();
                let config = load_config(&cli).unwrap();
                assert_eq!(config.base_url, "http://from-flag:9000");
                assert_eq!(config.timeouts.chat, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_yaml_file_sits_between_defaults_and_environment() {
        let yaml = yaml_config("url: http://from-yaml:8000\ntimeout: 20\nstatus_timeout: 15\n");
        let path = yaml.path().to_str().unwrap().to_owned();

        temp_env::with_vars(
            [("AI_API_URL", None), ("AI_API_TIMEOUT", Some("30"))],
            || {
                let cli = Cli::try_parse_from(["ai-gateway", "--config", path.as_str(), "status"])
                    .unwrap();
                let config = load_config(&cli).unwrap();
                assert_eq!(config.base_url, "http://from-yaml:8000");
                assert_eq!(config.timeouts.chat, Duration::from_secs(30));
                assert_eq!(config.timeouts.status, Duration::from_secs(15));
                assert_eq!(config.timeouts.upload, Duration::from_secs(300));

                let cli = Cli::try_parse_from([
                    "ai-gateway",
                    "--config",
                    path.as_str(),
                    "--url",
                    "http://from-flag:9000",
                    "health",
                ])
                .unwrap();
                assert_eq!(load_config(&cli).unwrap().base_url, "http://from-flag:9000");
            },
        );
    }
}
