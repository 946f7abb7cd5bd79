use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use magic_image::ScanOptions;
use magic_image::options::DEFAULT_SEGMENT_LIMIT;
use magic_image::scanner::DEFAULT_MIN_GAP;

#[derive(Parser)]
#[command(name = "magic-image")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hide one image behind another and get it back out")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Bytes skipped past a signature before searching for the next image
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_GAP)]
    pub min_gap: usize,

    /// Maximum number of images reported by analyze
    #[arg(long, global = true, default_value_t = DEFAULT_SEGMENT_LIMIT)]
    pub limit: usize,
}

impl ScanArgs {
    pub fn options(&self) -> ScanOptions {
        ScanOptions::new()
            .with_min_gap(self.min_gap)
            .with_segment_limit(self.limit)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append SECOND to FIRST, producing a file that displays as FIRST
    Create {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },

    /// Extract the visible image (default) or the hidden one (--magic)
    View {
        #[arg(short, long, conflicts_with = "normal")]
        magic: bool,

        #[arg(short, long)]
        normal: bool,

        input: PathBuf,

        output: Option<PathBuf>,
    },

    /// List every embedded image
    Analyze {
        #[arg(long)]
        json: bool,

        input: PathBuf,
    },

    /// Print the format of each file based on its leading bytes
    Detect {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}
