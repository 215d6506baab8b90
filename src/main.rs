use clap::{Args, Parser, Subcommand};
use image_intake::acquire::SourceAcquirer;
use image_intake::config::{self, AppConfig, DEFAULT_CONFIG_FILE};
use image_intake::desktop::{FsPicker, TerminalChooser};
use image_intake::imaging::{ImageCompressor, Quality, RustBackend};
use image_intake::notify::{LogSink, ToastErrorReporter};
use image_intake::output;
use image_intake::pipeline::ImagePipeline;
use image_intake::platform::Platform;
use image_intake::session::{PickOutcome, PickerSession};
use image_intake::types::{PickResult, RawAsset};
use std::path::PathBuf;
use std::sync::Arc;

fn version_string() -> &'static str {
    let on_tag = env!("INTAKE_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("INTAKE_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "image-intake")]
#[command(about = "Pick photos from a library or camera and compress them")]
#[command(long_about = "\
Pick photos from a library or camera and compress them

Every picked image is downscaled so its longer edge fits the configured
bound (aspect ratio kept, never upscaled) and re-encoded as JPEG. Results
come back in pick order; an image that fails to compress is dropped and
the rest continue.

On the desktop the photo library is a directory and the camera is a single
capture file:

  image-intake pick --library ~/Pictures --multiple --limit 5
  image-intake pick --camera shot.jpg
  image-intake pick --choose --library ~/Pictures --camera shot.jpg
  image-intake compress IMG_0042.jpg --max-dimension 256

Logging goes to stderr and is controlled by RUST_LOG
(default: image_intake=info).

Run 'image-intake gen-config' to generate a documented image-intake.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (optional; stock defaults when missing)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Directory compressed files are written to (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by commands that compress.
#[derive(Args, Clone)]
struct CompressArgs {
    /// Longer-edge bound in pixels
    #[arg(long)]
    max_dimension: Option<u32>,

    /// JPEG quality (0-100)
    #[arg(long)]
    quality: Option<u32>,

    /// Platform whose URI style to use
    #[arg(long, value_enum)]
    platform: Option<Platform>,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compress files directly, without a picker
    Compress {
        /// Image files to compress, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        args: CompressArgs,
    },
    /// Pick from a library directory or a camera capture file, then compress
    Pick {
        /// Directory standing in for the photo library
        #[arg(long)]
        library: Option<PathBuf>,

        /// File standing in for a camera capture
        #[arg(long)]
        camera: Option<PathBuf>,

        /// Ask which source to use before picking
        #[arg(long)]
        choose: bool,

        /// Allow selecting several photos from the library
        #[arg(long)]
        multiple: bool,

        /// Maximum photos when --multiple (0 = unlimited)
        #[arg(long)]
        limit: Option<u32>,

        #[command(flatten)]
        args: CompressArgs,
    },
    /// Print a stock image-intake.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Compress { files, args } => {
            let config = effective_config(&cli.config, cli.output, &args)?;
            compress_files(&config, &files, args.json).await?;
        }
        Command::Pick {
            library,
            camera,
            choose,
            multiple,
            limit,
            args,
        } => {
            let mut config = effective_config(&cli.config, cli.output, &args)?;
            if multiple {
                config.picker.multiple = true;
            }
            if let Some(limit) = limit {
                config.picker.selection_limit = limit;
            }
            let result = pick(config, library, camera, choose).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_pick_result(&result);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "image_intake=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file and apply command-line overrides on top.
fn effective_config(
    path: &std::path::Path,
    output_dir: Option<PathBuf>,
    args: &CompressArgs,
) -> Result<AppConfig, config::ConfigError> {
    let mut config = config::load_config(path)?;
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    if let Some(max) = args.max_dimension {
        config.picker.max_dimension = max;
    }
    if let Some(quality) = args.quality {
        config.picker.quality = quality;
    }
    if let Some(platform) = args.platform {
        config.platform = platform;
    }
    config.validate()?;
    Ok(config)
}

async fn compress_files(
    config: &AppConfig,
    files: &[PathBuf],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let compressor = ImageCompressor::new(
        Arc::new(RustBackend::new()),
        &config.output.dir,
        config.platform,
    );
    let quality = Quality::new(config.picker.quality);

    let mut images = Vec::with_capacity(files.len());
    for file in files {
        let asset = RawAsset::without_dimensions(file.to_string_lossy());
        if let Some(image) = compressor
            .compress(&asset, config.picker.max_dimension, quality)
            .await
        {
            images.push(image);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
    } else {
        output::print_images(&images);
    }

    let failed = files.len() - images.len();
    if failed > 0 {
        return Err(format!("{failed} of {} files failed to compress", files.len()).into());
    }
    Ok(())
}

async fn pick(
    config: AppConfig,
    library: Option<PathBuf>,
    camera: Option<PathBuf>,
    choose: bool,
) -> Result<PickResult, Box<dyn std::error::Error>> {
    if library.is_none() && camera.is_none() {
        return Err("pick needs --library <DIR> or --camera <FILE>".into());
    }
    let from_camera = library.is_none();

    let acquirer = SourceAcquirer::new(
        Arc::new(FsPicker::new(library, camera)),
        Arc::new(TerminalChooser),
        config.platform,
    );
    let compressor = ImageCompressor::new(
        Arc::new(RustBackend::new()),
        &config.output.dir,
        config.platform,
    );
    let reporter = Arc::new(ToastErrorReporter::new(LogSink));
    let pipeline = ImagePipeline::new(acquirer, compressor, reporter);
    let session = PickerSession::new(Arc::new(pipeline), config.picker);

    let outcome = if choose {
        session.pick_from_both().await
    } else if from_camera {
        session.capture_from_camera().await
    } else {
        session.pick_from_gallery().await
    };

    match outcome {
        PickOutcome::Finished(result) => Ok(result),
        PickOutcome::Busy => Err("a pick is already in progress".into()),
    }
}
