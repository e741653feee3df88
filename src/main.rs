mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sk_av::ToolRegistry;
use sk_core::config::Config;
use stickerkit::{ConversionOptions, RawInput, StickerMaker, StickerMetadata};
use tokio::io::AsyncWriteExt;

/// Arguments of `stickerkit create` that shape the conversion options.
struct CreateOverrides {
    pack: Option<String>,
    author: Option<String>,
    categories: Vec<String>,
    pack_id: Option<String>,
    ffmpeg: Option<PathBuf>,
    timeout: Option<u64>,
    temp_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "stickerkit=trace,sk_av=debug,sk_probe=debug,sk_core=debug".to_string()
        } else {
            "stickerkit=warn,sk_av=warn,sk_probe=warn,sk_core=warn".to_string()
        }
    });

    // Logs go to stderr; stdout may carry sticker bytes.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Create {
            input,
            output,
            pack,
            author,
            categories,
            pack_id,
            ffmpeg,
            timeout,
            temp_dir,
        } => {
            let config = load_config(cli.config.as_deref());
            let options = build_options(
                &config,
                CreateOverrides {
                    pack,
                    author,
                    categories,
                    pack_id,
                    ffmpeg,
                    timeout,
                    temp_dir,
                },
            )?;

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(create(&input, &output, &options))
        }
        Commands::Detect { file, json } => detect_file(&file, json),
        Commands::Metadata { file } => print_metadata(&file),
        Commands::CheckTools { json } => {
            let config = load_config(cli.config.as_deref());
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(check_tools(&config, json))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("stickerkit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Process exit code for `err`: the sysexits mapping of the first library
/// error in the chain, or 1.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<sk_core::Error>())
        .and_then(|e| u8::try_from(e.exit_status()).ok())
        .unwrap_or(1)
}

fn load_config(path: Option<&Path>) -> Config {
    let config = Config::load_or_default(path);
    for warning in config.validate() {
        tracing::warn!("config: {warning}");
    }
    config
}

/// Merge config defaults with command-line flags. Flags win.
fn build_options(config: &Config, flags: CreateOverrides) -> Result<ConversionOptions> {
    let transcoder = match flags.ffmpeg {
        Some(path) => Some(path),
        None => ToolRegistry::discover(&config.tools)
            .transcoder_path()
            .map(Path::to_path_buf),
    };

    let mut options = config.conversion_options(transcoder);

    if let Some(secs) = flags.timeout {
        options.timeout = Some(std::time::Duration::from_secs(secs));
    }
    if let Some(dir) = flags.temp_dir {
        options.temp_dir = Some(dir);
    }

    if let Some(pack) = flags.pack {
        let mut meta = StickerMetadata::new(pack);
        meta.author = config.sticker.default_author.clone();
        options.metadata = Some(meta);
    }

    match options.metadata.as_mut() {
        Some(meta) => {
            if let Some(author) = flags.author {
                meta.author = Some(author);
            }
            if !flags.categories.is_empty() {
                meta.categories = Some(flags.categories);
            }
            if flags.pack_id.is_some() {
                meta.pack_id = flags.pack_id;
            }
        }
        None => {
            if flags.author.is_some() || !flags.categories.is_empty() || flags.pack_id.is_some() {
                anyhow::bail!(
                    "sticker metadata flags need a pack name (--pack or sticker.default_pack)"
                );
            }
        }
    }

    Ok(options)
}

async fn create(input: &Path, output: &Path, options: &ConversionOptions) -> Result<()> {
    let raw = if input == Path::new("-") {
        tracing::info!("reading input from stdin");
        RawInput::reader(tokio::io::stdin())
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("failed to open input {}", input.display()))?;
        RawInput::reader(file)
    };

    let sticker = StickerMaker::new().create(raw, options).await?;

    if output == Path::new("-") {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&sticker).await.context("failed to write sticker to stdout")?;
        stdout.flush().await?;
    } else {
        tokio::fs::write(output, &sticker)
            .await
            .with_context(|| format!("failed to write output {}", output.display()))?;
        tracing::info!("wrote {} bytes to {}", sticker.len(), output.display());
    }

    Ok(())
}

fn detect_file(file: &Path, json: bool) -> Result<()> {
    let data = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let detected = sk_probe::detect(&data);

    if json {
        println!("{}", serde_json::to_string_pretty(&detected)?);
    } else {
        println!("File: {}", file.display());
        println!("Kind: {}", detected.kind);
        if !detected.extension.is_empty() {
            println!("Extension: {}", detected.extension);
            println!("MIME: {}", detected.mime);
        }
    }

    Ok(())
}

fn print_metadata(file: &Path) -> Result<()> {
    let data = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    match stickerkit::read_sticker_metadata(&data)? {
        Some(meta) => println!("{}", serde_json::to_string_pretty(&meta)?),
        None => println!("No sticker metadata in {}", file.display()),
    }

    Ok(())
}

async fn check_tools(config: &Config, json: bool) -> Result<()> {
    let tools = ToolRegistry::discover(&config.tools).check_all().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!("Checking external tools...\n");
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All tools are available!");
    } else {
        println!("Transcoder missing. Image stickers work; video input needs ffmpeg.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read config {}", p.display()))?;
            Config::from_json(&contents)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        for warning in &warnings {
            println!("⚠ {warning}");
        }
    }

    match &config.tools.ffmpeg_path {
        Some(p) => println!("  Transcoder: {}", p.display()),
        None => println!("  Transcoder: (PATH lookup)"),
    }
    match config.tools.timeout_secs {
        Some(secs) => println!("  Timeout: {secs}s"),
        None => println!("  Timeout: none"),
    }
    println!(
        "  Default pack: {}",
        config.sticker.default_pack.as_deref().unwrap_or("(none)")
    );

    Ok(())
}
