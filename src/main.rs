use std::env;

use pensioen::api::{ReportError, run_http_server, run_report};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        if let Err(e) = run_http_server(port).await {
            error!("server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    match run_report(raw_args) {
        Ok(report) => println!("{report}"),
        Err(ReportError::Args(e)) => e.exit(),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
