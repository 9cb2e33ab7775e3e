//! Servidor Axum e CLI do app tokenizador MMIF

mod server;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tok_core::{AnnotateParams, ClamsApp, Mmif, TokenizerApp};
use tracing_subscriber::EnvFilter;

use crate::server::{start_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "tok-web", about = "Tokenizador simples exposto como app CLAMS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sobe o servidor HTTP.
    Serve {
        /// Endereço de escuta
        #[arg(long, env = "TOKAPP_HOST", default_value = "0.0.0.0")]
        host: String,
        /// Porta de escuta
        #[arg(long, env = "TOKAPP_PORT", default_value_t = 5000)]
        port: u16,
    },

    /// Anota um arquivo MMIF sem passar pelo servidor e resume as views.
    Annotate {
        /// MMIF de entrada (JSON)
        input: PathBuf,
        /// Onde gravar o MMIF anotado
        output: PathBuf,
        /// Grava o JSON sem indentação
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            start_server(ServerConfig { host, port }).await?;
        }
        Commands::Annotate { input, output, compact } => {
            cmd_annotate(input, output, compact)?;
        }
    }

    Ok(())
}

fn cmd_annotate(input: PathBuf, output: PathBuf, compact: bool) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&input)
        .with_context(|| format!("falha ao ler {}", input.display()))?;

    let params = AnnotateParams {
        pretty: !compact,
        ..Default::default()
    };
    let annotated = TokenizerApp::new().annotate_str(&raw, &params)?;
    fs::write(&output, &annotated)
        .with_context(|| format!("falha ao gravar {}", output.display()))?;

    for line in view_summary(&Mmif::from_json(&annotated)?) {
        println!("{line}");
    }
    Ok(())
}

/// Uma linha `<View id=... annotations=... app=...>` por view.
fn view_summary(mmif: &Mmif) -> Vec<String> {
    mmif.views
        .iter()
        .map(|v| {
            format!(
                "<View id={} annotations={} app={}>",
                v.id,
                v.annotations.len(),
                v.metadata.app
            )
        })
        .collect()
}
