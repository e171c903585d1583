use clap::{Parser, Subcommand};
use dated_gallery::{Gallery, config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dated-gallery")]
#[command(about = "Browse a photo folder tree as a dated catalog")]
#[command(long_about = "\
Browse a photo folder tree as a dated catalog

Categories are top-level directories; albums are their subdirectories. Album
folder names carry a title and a date, in either order:

  images/
  ├── 旅行/
  │   ├── 天安门 2025 年 8 月 24 日/   # title \"天安门\", 2025-08-24
  │   ├── 2025-08 Hiking/              # title \"Hiking\", 2025-08-01
  │   └── drafts/                      # no images → not listed
  └── 美食/
      └── Dumplings/                   # no date → listed last

Albums are listed newest first; undated albums follow the dated ones.

Run 'dated-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Config file [default: gallery.toml in the working directory, if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Image root directory (overrides library.images_root)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the image root and print the catalog
    Scan {
        /// Print the catalog as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Show one category, or one album within it
    Show {
        /// Category directory name
        category: String,
        /// Album directory name
        album: Option<String>,
    },
    /// Resolve a media path to the image file inside the root
    Resolve {
        /// Root-relative path, e.g. "旅行/2025-08 Hiking/trail.png"
        path: String,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let load_gallery = || -> Result<Gallery, config::ConfigError> {
        let mut gallery_config = match &cli.config {
            Some(path) => config::load_config_file(path)?,
            None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE))?,
        };
        if let Some(root) = &cli.root {
            gallery_config.library.images_root = root.clone();
        }
        Ok(Gallery::from_config(&gallery_config))
    };

    match cli.command {
        Command::Scan { json } => {
            let catalog = load_gallery()?.list_categories();
            if json {
                println!("{}", serde_json::to_string_pretty(&*catalog)?);
            } else {
                output::print_catalog(&catalog);
            }
        }
        Command::Show { category, album } => {
            let gallery = load_gallery()?;
            match album {
                Some(folder) => {
                    let album = gallery
                        .find_album(&category, &folder)
                        .ok_or_else(|| format!("album '{folder}' not found in '{category}'"))?;
                    output::print_album(&album);
                }
                None => {
                    let found = gallery
                        .find_category(&category)
                        .ok_or_else(|| format!("category '{category}' not found"))?;
                    output::print_category(&found);
                }
            }
        }
        Command::Resolve { path } => {
            let resolved = load_gallery()?
                .resolve_media_path(&path)
                .ok_or_else(|| format!("media '{path}' not found"))?;
            println!("{}", resolved.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
