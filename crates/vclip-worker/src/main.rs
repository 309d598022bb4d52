//! Clip selection and rendering pipeline CLI.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vclip_worker::config::PipelineConfig;
use vclip_worker::coordinator::run_pipeline;
use vclip_worker::fetcher;
use vclip_worker::grader::CogencyGrader;
use vclip_worker::transcription_client::TranscriptionClient;

/// Select and render the top-K short-form vertical clips from a long-form
/// source video.
#[derive(Debug, Parser)]
#[command(name = "vclip-worker")]
struct Cli {
    /// Local path or file:// URL to the source video.
    #[arg(long)]
    url: Option<String>,

    /// Number of top clips to render.
    #[arg(long, default_value_t = 5)]
    k: usize,

    /// Directory to write rendered clips and the report into.
    #[arg(long)]
    output_dir: Option<String>,

    /// Render quality tier.
    #[arg(long, default_value = "medium")]
    quality: String,

    /// Probe the transcription and grader back ends and exit without
    /// running the pipeline.
    #[arg(long)]
    health_check: bool,
}

#[tokio::main]
async fn main() {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive("vclip=info".parse().unwrap()))
        .init();

    let cli = Cli::parse();
    let mut config = PipelineConfig::from_env();
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }

    if cli.health_check {
        run_health_check(&config).await;
        return;
    }

    let Some(url) = cli.url else {
        error!("--url is required unless --health-check is passed");
        std::process::exit(1);
    };

    let quality: vclip_models::encoding::Quality = cli
        .quality
        .parse()
        .unwrap_or(config.default_quality);

    info!(url = %url, k = cli.k, output_dir = %config.output_dir, "starting run");

    let work_dir = std::path::PathBuf::from(&config.work_dir);
    let (source, _info) = match fetcher::fetch(&url, &work_dir).await {
        Ok(pair) => pair,
        Err(err) => {
            error!(error = %err, "failed to fetch source video");
            std::process::exit(1);
        }
    };

    match run_pipeline(source, &config, cli.k, quality).await {
        Ok(report) => {
            info!(
                clips = report.clips.len(),
                window_count = report.window_count,
                "run complete"
            );
        }
        Err(err) => {
            error!(error = %err, "run failed");
            std::process::exit(1);
        }
    }
}

async fn run_health_check(config: &PipelineConfig) {
    let transcription = TranscriptionClient::new(
        config.transcription_base_url.clone(),
        config.transcription_timeout,
    );
    let grader = CogencyGrader::new(config.grader_base_url.clone(), config.grading_timeout);

    let transcription_ok = transcription.health_check().await;
    let grader_ok = grader.health_check().await;

    info!(
        transcription_ok,
        grader_ok, "health check complete"
    );

    if transcription_ok && grader_ok {
        std::process::exit(0);
    } else {
        error!("one or more back ends are unhealthy");
        std::process::exit(1);
    }
}
