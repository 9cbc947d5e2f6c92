//! Gethscope batch job binary

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use metrics::{TransformOptions, batch::run_batch};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        input = %opts.logs.input_path.display(),
        output = %opts.logs.output_path.display(),
        "Gethscope batch starting..."
    );

    let transform_opts = TransformOptions {
        check_column_name: !opts.transforms.skip_column_check,
        add_column_name: opts.transforms.add_column_name,
        sample: opts.transforms.sample,
    };

    run_batch(&opts.logs.input_path, &opts.logs.output_path, &transform_opts)?;
    Ok(())
}
