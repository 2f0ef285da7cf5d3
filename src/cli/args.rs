//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Render galaxy simulation quadtrees as SVG (over HTTP) or PNG (in batch)
#[derive(Parser, Debug)]
#[command(name = "galaxyview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// More logging: -d debug, -dd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// TOML config file
    #[arg(short, long, global = true, env = "GALAXYVIEW_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve `GET /drawtree/{treeindex}` as SVG, fetching trees from the tree source
    Serve {
        /// Address to bind, overrides `server.listen`
        #[arg(long)]
        listen: Option<String>,

        /// Tree source base URL, overrides `source.base_url`
        #[arg(long, value_hint = ValueHint::Url)]
        base_url: Option<String>,
    },

    /// Render `{i}.json` to `{i}.png` for every i in 0..amount
    Batch {
        /// Number of trees
        amount: usize,

        /// Input/output directory, overrides `batch.dir`
        #[arg(long, value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Write `amount` random trees as `{i}.json`
    Generate {
        /// Number of trees
        amount: usize,

        /// Stars per tree
        #[arg(long, default_value_t = 1000)]
        stars: usize,

        /// Radius of the star disc in simulation units
        #[arg(long, default_value_t = 5.0e6)]
        radius: f64,

        /// Output directory, overrides `batch.dir`
        #[arg(long, value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
}
