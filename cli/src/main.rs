//! docxpack CLI - unpack and repack DOCX archives
//!
//! A command-line tool for extracting DOCX files into a `templates`
//! directory and packing directories back into DOCX files.

use clap::{Parser, Subcommand};
use colored::*;
use docxpack::{ArchiveOperation, Config, DocxReader, DocxWriter, WriteOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Unpack DOCX files into a working directory and pack them back
#[derive(Parser)]
#[command(
    name = "docxpack",
    author = "iyulab",
    version,
    about = "Unpack and repack DOCX archives",
    long_about = "docxpack - Unpack DOCX files into a templates directory and pack them back.\n\n\
                  DOCX files are treated as plain ZIP containers; XML parts are not modified."
)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a DOCX into a `templates` directory next to it
    Unpack {
        /// DOCX file to extract (default: templates/default.docx)
        input: Option<PathBuf>,
    },

    /// Pack a directory into a DOCX file
    Pack {
        /// Directory whose files are packed
        source: PathBuf,

        /// Output file name (".docx" is appended unless the name contains "docx")
        #[arg(short, long, default_value = docxpack::DEFAULT_OUTPUT_NAME)]
        name: String,

        /// Existing directory to save the archive in (default: the source directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the entries of a DOCX file
    #[command(visible_alias = "ls")]
    List {
        /// DOCX file to inspect
        input: PathBuf,

        /// Output entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Unpack { input } => {
            let reader = match input {
                Some(path) => open_reader(&path)?,
                None => Config::default().template_reader()?,
            };

            let pb = create_spinner("Extracting archive...");
            let result = reader.run();
            pb.finish_and_clear();
            result?;

            println!(
                "{} Extracted {} to {}",
                "✓".green().bold(),
                reader.archive_path().display(),
                reader.target_dir().display()
            );
        }

        Commands::Pack {
            source,
            name,
            output,
        } => {
            let mut options = WriteOptions::new().with_output_name(name);
            if let Some(dir) = output {
                options = options.with_save_dir(dir);
            }
            let writer = DocxWriter::new(&source, options)?;
            log::debug!("{}", writer.describe());

            let pb = create_spinner("Packing directory...");
            let result = writer.run();
            pb.finish_and_clear();
            result?;

            println!(
                "{} Packed {} into {}",
                "✓".green().bold(),
                source.display(),
                writer.destination().display()
            );
        }

        Commands::List { input, json } => {
            let reader = open_reader(&input)?;
            let entries = reader.entries()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            println!("{}", "Archive Entries".cyan().bold());
            println!("{}", "─".repeat(40));
            for entry in &entries {
                if entry.is_dir {
                    println!("{}", entry.name.blue());
                } else {
                    println!("{:>10}  {}", entry.size, entry.name);
                }
            }
            let total: u64 = entries.iter().map(|e| e.size).sum();
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Entries".bold(), entries.len());
            println!("{}: {} bytes", "Uncompressed".bold(), total);
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Split a file path into its working directory and archive name.
fn open_reader(path: &Path) -> Result<DocxReader, Box<dyn std::error::Error>> {
    let name = path
        .file_name()
        .ok_or_else(|| format!("not a file path: {}", path.display()))?
        .to_string_lossy()
        .into_owned();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(DocxReader::new(dir, name)?)
}

fn print_version() {
    println!("{} {}", "docxpack".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Unpack DOCX files into a working directory and pack them back");
    println!();
    println!("Repository: https://github.com/iyulab/docxpack");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
