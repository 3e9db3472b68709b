//! epiccoder command line
//!
//! Highlights `.prs` rule files, Python, C and plain text, and searches
//! project folders from the command line.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use epiccoder::config::Config;
use epiccoder::lexer::ThemeSet;
use epiccoder::line_ending::LineEnding;
use epiccoder::render::Painter;
use epiccoder::search::{SearchRequest, SearchScope, SearchWorker};
use epiccoder::{Document, EditorError, Lexer, Result, Session, Styler};

#[derive(Debug, Parser)]
#[command(name = "epiccoder", version, about = "Highlight and search EPIC production-rule projects")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a file with syntax highlighting
    Highlight {
        file: PathBuf,
        /// List style runs instead of painting
        #[arg(long)]
        runs: bool,
        /// Theme name (overrides the config file)
        #[arg(long)]
        theme: Option<String>,
        /// Use the dark variant of the theme
        #[arg(long, conflicts_with = "light")]
        dark: bool,
        /// Use the light variant of the theme
        #[arg(long)]
        light: bool,
        /// Paint the theme background too
        #[arg(long)]
        background: bool,
    },
    /// Search every file under a folder
    Search {
        pattern: String,
        /// Folder to search (current folder by default)
        path: Option<PathBuf>,
        #[arg(short = 'i', long)]
        ignore_case: bool,
        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,
        /// Include hidden files and folders
        #[arg(long)]
        hidden: bool,
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// List the styles a file's lexer can produce
    Styles { file: PathBuf },
    /// List the available themes
    Themes,
    /// Rewrite a file's line breaks to one convention
    Normalize {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = LineEnding::Lf)]
        ending: LineEnding,
    },
    /// Replace literal text in a file
    Replace {
        file: PathBuf,
        pattern: String,
        with: String,
        /// Print the restyled runs instead of saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Copy a file to a fresh name beside it
    Duplicate { file: PathBuf },
    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
    /// Print an unused file name in a folder
    New {
        /// Extension of the new file, e.g. prs
        extension: String,
        #[arg(long)]
        stem: Option<String>,
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();
    debug!(?config, "loaded configuration");

    match cli.command {
        Command::Highlight {
            file,
            runs,
            theme,
            dark,
            light,
            background,
        } => {
            let document = Document::open(&file)?;
            if runs {
                print_runs(&document);
                return Ok(());
            }

            if let Some(theme) = theme {
                config.theme = theme;
            }
            if dark || light {
                config.dark_mode = dark;
            }
            let theme = config.theme()?;
            let mut painter = Painter::new(io::stdout().lock()).with_background(background);
            painter.paint(&document, &theme)?;
            println!();
        }
        Command::Search {
            pattern,
            path,
            ignore_case,
            regex,
            hidden,
            max_results,
        } => {
            let mut options = config.search_options();
            options.ignore_case |= ignore_case;
            options.regex |= regex;
            options.include_hidden |= hidden;
            if let Some(max) = max_results {
                options.max_results = max.max(1);
            }

            let mut worker = SearchWorker::new();
            worker.start(SearchRequest {
                pattern,
                scope: SearchScope::Folder(path.unwrap_or_else(|| PathBuf::from("."))),
                options,
            })?;
            if let Some(result) = worker.wait() {
                for item in result? {
                    println!("{}", item);
                }
            }
        }
        Command::Styles { file } => {
            let lexer = Lexer::for_path(&file)?;
            println!("{} ({})", lexer.language(), lexer.kind().name());
            for entry in lexer.registry().entries() {
                let weight = if entry.bold { "bold" } else { "normal" };
                println!("{:>3}  {:<14} {}", entry.id, lexer.description(entry.id), weight);
            }
        }
        Command::Themes => {
            let mut themes = ThemeSet::builtin();
            if let Some(path) = &config.theme_file {
                themes.merge(ThemeSet::load(path)?);
            }
            for name in themes.names() {
                let marker = if name == config.theme { "*" } else { " " };
                println!("{} {}", marker, name);
            }
        }
        Command::Normalize { file, ending } => {
            let mut document = Document::open(&file)?;
            document.set_line_ending(ending);
            if document.is_modified() {
                document.save()?;
                println!("{}: converted to {}", document.name(), ending);
            } else {
                println!("{}: already {}", document.name(), ending);
            }
        }
        Command::Replace {
            file,
            pattern,
            with,
            dry_run,
        } => {
            if pattern.is_empty() {
                return Err(EditorError::Message("empty pattern".to_string()));
            }
            let mut document = Document::open(&file)?;
            let found: Vec<usize> = document.text().match_indices(&pattern).map(|(at, _)| at).collect();
            // back to front so earlier offsets stay valid
            for &at in found.iter().rev() {
                document.replace(at..at + pattern.len(), &with);
            }
            if dry_run {
                print_runs(&document);
            } else if document.is_modified() {
                document.save()?;
            }
            println!("{}: {} replacements", document.name(), found.len());
        }
        Command::Duplicate { file } => {
            let file = fs::canonicalize(&file).map_err(|_| EditorError::FileNotFound(file.display().to_string()))?;
            let root = file.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            let mut session = Session::new(root);
            let index = session.open(&file)?;
            let copy = session.duplicate_path(&file);
            if let Some(document) = session.document_mut(index) {
                document.save_as(copy.clone())?;
            }
            let document = session.close(index)?;
            println!("{} ({})", copy.display(), document.lexer().language());
        }
        Command::Config { save } => {
            print!("{}", config.to_file_contents());
            if save {
                config.save()?;
            }
        }
        Command::New { extension, stem, root } => {
            let mut session = Session::new(root);
            println!("{}", session.next_new_file_path(&extension, stem.as_deref()).display());
        }
    }

    Ok(())
}

/// One line per run: byte range, style name and the covered text
fn print_runs(document: &Document) {
    let text = document.text();
    for (range, category) in document.runs() {
        let (start, end) = (range.start, range.end);
        println!("{:>6}..{:<6} {:<14} {:?}", start, end, category.name(), &text[range]);
    }
    println!("{} bytes, {} line endings", text.len(), document.line_ending());
}
