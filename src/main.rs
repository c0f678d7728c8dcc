use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mmpack::{ErrorKind, Outcome, PlatformCode};
use std::path::PathBuf;
use tracing::Level;

mod commands;

/// mmpack - build, inspect and edit .mmpackage mod archives
#[derive(Parser)]
#[command(name = "mmpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON ({"success": ..., ...})
    #[arg(long, global = true)]
    json: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a .mmpackage from .pak, .sig, .ucas and .utoc files
    Build {
        /// The four payload files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Platform code (Windows, WinGDK, EGS); defaults from settings
        #[arg(short, long)]
        platform: Option<PlatformCode>,

        /// Replace the pakchunk number and suffix the package name with it
        #[arg(short, long)]
        chunk: Option<u32>,

        /// Output folder (defaults to the configured mod folder)
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Package name, without the .mmpackage suffix
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Manage the metadata.json record of packages
    Metadata {
        #[command(subcommand)]
        action: MetadataAction,
    },

    /// Check that a package has all payload files and metadata
    Validate {
        /// Package to check
        package: PathBuf,
    },

    /// Extract a package into <name>_unpacked next to it
    Unpack {
        /// Package to extract
        package: PathBuf,
    },

    /// Pack the files of a folder into a new package
    Repack {
        /// Folder whose files (not subfolders) are packed
        folder: PathBuf,

        /// Output file name ending in .mmpackage (default: mod.mmpackage)
        #[arg(short, long)]
        output: Option<String>,

        /// Output folder (defaults to the configured export folder or the desktop)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Clone, Default)]
struct MetadataFields {
    /// Display name of the mod
    #[arg(long)]
    name: Option<String>,

    /// Author of the mod
    #[arg(long)]
    author: Option<String>,

    /// Description of the mod
    #[arg(long)]
    description: Option<String>,

    /// Category of the mod (e.g. Skins, Gameplay)
    #[arg(long)]
    category: Option<String>,
}

#[derive(Subcommand)]
enum MetadataAction {
    /// Write metadata.json into one or more packages, replacing any existing record
    Inject {
        /// Packages to update
        #[arg(required = true)]
        packages: Vec<PathBuf>,

        #[command(flatten)]
        fields: MetadataFields,

        /// Inject the JSON object stored in this file instead of the field flags
        #[arg(long, conflicts_with_all = ["name", "author", "description", "category"])]
        from_file: Option<PathBuf>,
    },

    /// Change individual fields of a package's metadata
    Edit {
        /// Package to update
        package: PathBuf,

        #[command(flatten)]
        fields: MetadataFields,
    },

    /// Show a package's metadata
    View {
        /// Package to read
        package: PathBuf,
    },

    /// Save a package's metadata.json as <name>_metadata.json
    Export {
        /// Package to read
        package: PathBuf,

        /// Output folder (defaults to the configured export folder or the desktop)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings
    Show,

    /// Remember the folder packages are built into
    SetModFolder {
        /// Existing folder
        path: PathBuf,
    },

    /// Set a setting (mod_folder, platform, export_dir)
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },

    /// Clear a setting
    Unset {
        /// Setting key
        key: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let result = match cli.command {
        Commands::Build {
            files,
            platform,
            chunk,
            dest,
            name,
        } => commands::build::run(files, platform, chunk, dest, name, json),
        Commands::Metadata { action } => commands::metadata::run(action, json),
        Commands::Validate { package } => commands::validate::run(package, json),
        Commands::Unpack { package } => commands::unpack::run(package, json),
        Commands::Repack {
            folder,
            output,
            out_dir,
        } => commands::repack::run(folder, output, out_dir, json),
        Commands::Config { action } => commands::config::run(&action, json),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "mmpack", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        if json {
            let kind = e
                .downcast_ref::<mmpack::Error>()
                .map_or(ErrorKind::InvalidArgument, mmpack::Error::kind);
            let outcome: Outcome<()> = Outcome::failure(kind, e.to_string());
            match serde_json::to_string_pretty(&outcome) {
                Ok(text) => println!("{}", text),
                Err(_) => eprintln!("Error: {}", e),
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
