//! render-html - Preview a local HTML file in the browser
//!
//! Serves the directory containing the given HTML file over HTTP on a local
//! port and opens the file in the default browser. The server runs until
//! interrupted with Ctrl+C.

use anyhow::{bail, Context, Result};
use axum::Router;
use clap::Parser;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tower_http::services::ServeDir;
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8000;

/// render-html - serve a local HTML file and open it in a browser.
#[derive(Parser, Debug)]
#[command(name = "render-html")]
#[command(
    author,
    version,
    about,
    long_about = r#"Render a local HTML file by serving its directory via HTTP and opening
it in the default browser.

The whole directory containing the file is served, so relative links to
stylesheets, scripts and images keep working.

Examples:
    render-html report.html
    render-html docs/index.html --port 9000
"#
)]
struct Cli {
    /// Path to the HTML file to render.
    #[arg(value_name = "HTML_FILE")]
    html_file: PathBuf,

    /// Port number to use for the local server.
    #[arg(short, long, default_value_t = DEFAULT_PORT, value_name = "PORT")]
    port: u16,
}

// Resolve the directory to serve and the file name to open within it.
fn target_parts(html_file: &Path) -> Result<(PathBuf, String)> {
    let file = html_file
        .canonicalize()
        .with_context(|| format!("file not found at '{}'", html_file.display()))?;

    if !file.is_file() {
        bail!("file not found at '{}'", file.display());
    }

    let dir = file
        .parent()
        .context("file has no parent directory")?
        .to_path_buf();
    let name = file
        .file_name()
        .context("path has no file name")?
        .to_string_lossy()
        .into_owned();

    Ok((dir, name))
}

async fn serve(cli: Cli) -> Result<()> {
    let (dir, name) = target_parts(&cli.html_file)?;

    let listener = match tokio::net::TcpListener::bind(("127.0.0.1", cli.port)).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            bail!(
                "port {} is already in use. Try a different port using --port.",
                cli.port
            );
        }
        Err(e) => bail!("failed to start server: {}", e),
    };

    let url = format!("http://localhost:{}/{}", cli.port, name);
    info!("serving file '{}'", name);
    info!("serving files from: {}", dir.display());
    info!("access it at: {}", url);
    info!("press Ctrl+C to stop the server");

    if let Err(err) = webbrowser::open(&url) {
        warn!("could not automatically open web browser: {}", err);
    }

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("render_html=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match serve(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_target_parts() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("page.html");
        fs::write(&file, "<html></html>").unwrap();

        let (dir, name) = target_parts(&file).unwrap();
        assert_eq!(name, "page.html");
        assert!(dir.is_dir());
    }

    #[test]
    fn test_target_parts_missing_file() {
        assert!(target_parts(Path::new("/no/such/page.html")).is_err());
    }

    #[test]
    fn test_target_parts_rejects_directory() {
        let temp = tempdir().unwrap();
        assert!(target_parts(temp.path()).is_err());
    }

    #[test]
    fn test_default_port() {
        let cli = Cli::try_parse_from(["render-html", "page.html"]).unwrap();
        assert_eq!(cli.port, DEFAULT_PORT);
    }
}
