use brandpack::pipeline::{self, BuildRequest};
use brandpack::types::BrandProfile;
use brandpack::{config, output};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brandpack")]
#[command(about = "Turn a ZIP of property photos into a branded deliverable")]
#[command(long_about = "\
Turn a ZIP of property photos into a branded deliverable

The archive is unpacked, photos are ordered as a property tour, watermarked
with your logo and written in three sizes. Three documents describe the
sequence: a branded PDF table, the same table as HTML, and a caption list.

Output structure:

  output/
  ├── extracted/                           # Archive contents as-is
  ├── photos_full_res_watermarked/         # 01_Exterior_Front.jpg, ...
  ├── photos_web_optimized_watermarked/    # Longer side capped (default 2560px)
  ├── thumbnails/                          # thumb_01.jpg, ... (fit 600x400)
  ├── <Property>_Photo_Order_Branded.pdf
  ├── <Property>_Photo_Order_Branded.html
  ├── <Property>_Clean_Captions_List.html
  └── manifest.json                        # Run summary

Ordering (first rule that applies):
  Order file:  one filename per line; listed photos first, in that order
  Keywords:    exterior, front/aerial, living, fireplace, kitchen, dining,
               bedroom, bath, deck, dock, lake, twilight, local; then name

Captions (first available wins):
  CSV table:   filename,caption
  Filename:    Exterior_Front.jpg → \"Exterior Front.\"

Run 'brandpack gen-config' to generate a documented brandpack.toml.")]
#[command(version)]
struct Cli {
    /// Log per-step detail (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Optional ordering and caption sources shared by `build` and `check`.
#[derive(clap::Args, Clone)]
struct SequenceArgs {
    /// Text file with one filename per line, highest priority first
    #[arg(long)]
    order_file: Option<PathBuf>,

    /// CSV with `filename,caption` columns
    #[arg(long)]
    captions_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// ZIP archive of source photos
    #[arg(long)]
    zip: PathBuf,

    /// Logo image used for the watermark and document headers
    #[arg(long)]
    logo: PathBuf,

    #[arg(long)]
    property_name: String,

    #[arg(long)]
    brand_name: String,

    #[arg(long)]
    brand_email: String,

    #[arg(long)]
    brand_phone: String,

    #[arg(long)]
    brand_site: String,

    /// Output directory
    #[arg(long, default_value = "output")]
    outdir: PathBuf,

    #[command(flatten)]
    sequence: SequenceArgs,

    /// Longer side of web-optimized images (overrides the config file)
    #[arg(long)]
    max_web_width: Option<u32>,

    /// brandpack.toml with palette, quality and size settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full job: extract → watermark → documents
    Build(BuildArgs),
    /// Show the planned photo order and captions without writing anything
    Check {
        /// ZIP archive of source photos
        #[arg(long)]
        zip: PathBuf,

        #[command(flatten)]
        sequence: SequenceArgs,
    },
    /// Print a stock brandpack.toml with all options documented
    GenConfig,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::builder()
        .filter_module("brandpack", level)
        .parse_default_env()
        .try_init()
        .ok();
}

fn build(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(side) = args.max_web_width {
        config.images.max_web_side = side;
    }

    let request = BuildRequest {
        zip: args.zip,
        logo: args.logo,
        brand: BrandProfile {
            name: args.brand_name,
            property: args.property_name,
            email: args.brand_email,
            phone: args.brand_phone,
            site: args.brand_site,
        },
        outdir: args.outdir,
        order_file: args.sequence.order_file,
        captions_csv: args.sequence.captions_csv,
    };

    println!(
        "==> Building {} from {}",
        request.brand.title(),
        request.zip.display()
    );
    let manifest = pipeline::run(&request, &config, &mut |event| {
        output::print_pipeline_event(event)
    })?;
    output::print_summary(&manifest);
    println!("==> Done. Outputs in: {}", request.outdir.display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build(args) => build(args)?,
        Command::Check { zip, sequence } => {
            println!("==> Checking {}", zip.display());
            let plan = pipeline::plan(
                &zip,
                sequence.order_file.as_deref(),
                sequence.captions_csv.as_deref(),
            )?;
            output::print_plan(&plan, &zip);
            println!("==> Archive is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
