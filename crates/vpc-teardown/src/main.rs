//! vpc-teardown: delete an AWS VPC, its dependents, and an optional EKS cluster

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vpc_teardown::aws::{AwsClients, AwsContext};
use vpc_teardown::{Args, Teardown, TeardownConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

fn init_tracing() -> Result<()> {
    let mut filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    // AWS SDK internals are noisy at info
    const SDK_TARGETS: &[&str] = &[
        "aws_config",
        "aws_smithy_runtime",
        "aws_sdk_ec2",
        "aws_sdk_eks",
        "aws_sdk_autoscaling",
        "aws_sdk_elasticloadbalancingv2",
    ];
    for target in SDK_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let config = TeardownConfig::try_from(args).context("Invalid configuration")?;
    if config.dry_run {
        info!("Dry run: nothing will be deleted");
    }

    let aws = AwsContext::new(config.region.as_deref()).await;
    info!(region = ?aws.region(), "Using AWS region");
    let teardown = Teardown::new(AwsClients::from_context(&aws));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current call");
            on_signal.cancel();
        }
    });

    teardown.run(&config, &cancel).await?;
    Ok(())
}
