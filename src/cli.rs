use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stickerkit")]
#[command(author, version, about = "Convert images and short videos into WebP stickers")]
pub struct Cli {
    /// Path to config file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an image or video into a sticker
    Create {
        /// Input file, or `-` to read from stdin
        #[arg(required = true)]
        input: PathBuf,

        /// Where to write the sticker
        #[arg(short, long)]
        output: PathBuf,

        /// Sticker pack name to embed
        #[arg(long)]
        pack: Option<String>,

        /// Pack author/publisher to embed
        #[arg(long)]
        author: Option<String>,

        /// Emoji category (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Explicit pack id (derived from pack and author when omitted)
        #[arg(long)]
        pack_id: Option<String>,

        /// Path to the ffmpeg-compatible transcoder
        #[arg(long)]
        ffmpeg: Option<PathBuf>,

        /// Transcoder timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Directory for temporary files
        #[arg(long)]
        temp_dir: Option<PathBuf>,
    },

    /// Detect a file's media type from its content
    Detect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the sticker metadata embedded in a WebP file
    Metadata {
        /// Sticker file
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Check that the external transcoder is available
    CheckTools {
        /// Output tool information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
