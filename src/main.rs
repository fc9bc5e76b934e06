use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use croplens::{ExtractionProfile, MosaicCompositor, Report, extract, load_image};

#[derive(Parser)]
#[command(name = "croplens")]
#[command(about = "Analyze aerial crop imagery: stitch mosaics and extract countable features")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Stitch overlapping captures into a single cropped panorama
    Stitch {
        /// Input image files (at least 2)
        #[arg(value_name = "IMAGES", required = true, num_args = 2..)]
        images: Vec<PathBuf>,

        /// Where to write the panorama
        #[arg(short, long, default_value = "panorama.png")]
        output: PathBuf,

        /// Print the full JSON report to stdout
        #[arg(long)]
        json: bool,
    },
    /// Run a feature-extraction profile over a single image
    Analyze {
        /// Input image file
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Extraction profile to apply
        #[arg(short, long, value_enum)]
        profile: ProfileName,

        /// Where to write the annotated image
        #[arg(short, long, default_value = "annotated.png")]
        output: PathBuf,

        /// Print the full JSON report to stdout
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileName {
    Tree,
    Area,
    Disease,
    Object,
}

impl ProfileName {
    fn profile(self) -> ExtractionProfile {
        match self {
            ProfileName::Tree => ExtractionProfile::tree(),
            ProfileName::Area => ExtractionProfile::area(),
            ProfileName::Disease => ExtractionProfile::disease(),
            ProfileName::Object => ExtractionProfile::object(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Command::Stitch {
            images,
            output,
            json,
        } => {
            let mut loaded = Vec::with_capacity(images.len());
            for path in &images {
                if args.verbose {
                    println!("Loading image: {:?}", path);
                }
                loaded.push(load_image(path)?);
            }

            if args.verbose {
                println!("Stitching {} images...", loaded.len());
            }
            let result = MosaicCompositor::default().compose(&loaded)?;
            let report = Report::from_mosaic(&result)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if let Some(err) = result.to_error() {
                return Err(err.into());
            }
            if let Some(panorama) = &result.panorama {
                panorama
                    .save(&output)
                    .map_err(|e| anyhow::anyhow!("Failed to save panorama: {}", e))?;
                println!(
                    "Panorama ({}x{}) written to {:?}",
                    panorama.width(),
                    panorama.height(),
                    output
                );
            }
        }
        Command::Analyze {
            image,
            profile,
            output,
            json,
        } => {
            if args.verbose {
                println!("Loading image: {:?}", image);
            }
            let img = load_image(&image)?;
            let profile = profile.profile();

            if args.verbose {
                println!(
                    "Running {} extraction on {}x{} image...",
                    profile.name,
                    img.width(),
                    img.height()
                );
            }
            let result = extract(&img, &profile);
            let report = Report::from_extraction(&result)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            result
                .annotated
                .save(&output)
                .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;

            println!("Detected {} features ({} profile)", result.count, profile.name);
            if args.verbose {
                for (i, b) in result.boxes.iter().enumerate() {
                    println!(
                        "  Feature {} at ({}, {}) size {}x{}",
                        i + 1,
                        b.x,
                        b.y,
                        b.width,
                        b.height
                    );
                }
            }
            println!("Annotated image written to {:?}", output);
        }
    }

    Ok(())
}
