//! Gethscope configuration
use std::path::PathBuf;

use clap::Parser;

/// Log directory configuration options
#[derive(Debug, Clone, Parser)]
pub struct LogDirOpts {
    /// Directory the node instrumentation writes its CSV logs to
    #[clap(long, env = "GETHSCOPE_INPUT_PATH")]
    pub input_path: PathBuf,
    /// Directory result series and the merged summary are written to
    #[clap(long, env = "GETHSCOPE_OUTPUT_PATH")]
    pub output_path: PathBuf,
}

/// Transform configuration options
#[derive(Debug, Clone, Parser)]
pub struct TransformOpts {
    /// Skip verifying each file's header against the expected schema
    #[clap(long, env = "GETHSCOPE_SKIP_COLUMN_CHECK")]
    pub skip_column_check: bool,
    /// Overwrite headers positionally instead of validating them, for files
    /// whose producer wrote no header
    #[clap(long, env = "GETHSCOPE_ADD_COLUMN_NAME")]
    pub add_column_name: bool,
    /// Process only the first N records of every file
    #[clap(long, env = "GETHSCOPE_SAMPLE")]
    pub sample: Option<usize>,
}

/// CLI options for gethscope
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Log directory configuration
    #[clap(flatten)]
    pub logs: LogDirOpts,

    /// Transform configuration
    #[clap(flatten)]
    pub transforms: TransformOpts,
}
