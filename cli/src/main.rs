//! mdpreso CLI - markdown slide deck tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdpreso::fetch::fetch_async;
use mdpreso::{
    render, CommandHighlighter, Deck, DeckParser, JsonFormat, ParseOptions, RenderOptions,
    SlideSelection,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "mdpreso")]
#[command(version)]
#[command(about = "Turn a markdown document into an HTML slide deck", long_about = None)]
struct Cli {
    /// Input markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    deck: DeckArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that parses a deck.
#[derive(Args)]
struct DeckArgs {
    /// Fail on the first malformed slide
    #[arg(long, global = true)]
    strict: bool,

    /// Fence keyword marking diagram blocks
    #[arg(long, global = true, value_name = "WORD")]
    diagram_keyword: Option<String>,

    /// Maximum nesting depth of positioned blocks
    #[arg(long, global = true, value_name = "N")]
    max_nesting: Option<usize>,

    /// Ignore the frontmatter block
    #[arg(long, global = true)]
    no_frontmatter: bool,

    /// Command used to highlight code blocks, e.g. "pygmentize -l {lang} -f html"
    #[arg(long, global = true, env = "MDPRESO_HIGHLIGHT_CMD", value_name = "CMD")]
    highlight_cmd: Option<String>,
}

impl DeckArgs {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new().with_frontmatter(!self.no_frontmatter);
        if self.strict {
            options = options.strict();
        }
        if let Some(ref keyword) = self.diagram_keyword {
            options = options.with_diagram_keyword(keyword.clone());
        }
        if let Some(depth) = self.max_nesting {
            options = options.with_max_nesting(depth);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to all formats (HTML, JSON, notes)
    Convert {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render a standalone HTML page
    Html {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave speaker notes out of the page
        #[arg(long)]
        no_notes: bool,

        /// Start in presenter mode
        #[arg(long)]
        presenter: bool,

        /// URL of the diagram rendering script
        #[arg(long, value_name = "URL")]
        diagram_script: Option<String>,

        /// Slide range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        slides: Option<String>,
    },

    /// Convert markdown to JSON
    Json {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Slide range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        slides: Option<String>,
    },

    /// Print speaker notes
    Notes {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Slide range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        slides: Option<String>,
    },

    /// Show deck information
    Info {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let deck_args = cli.deck;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&input, output.as_deref(), &deck_args)
        }
        Some(Commands::Html {
            input,
            output,
            no_notes,
            presenter,
            diagram_script,
            slides,
        }) => {
            let render_options = RenderOptions::new()
                .with_notes(!no_notes)
                .with_presenter_mode(presenter);
            let render_options = match diagram_script {
                Some(url) => render_options.with_diagram_script(url),
                None => render_options,
            };
            cmd_html(
                &input,
                output.as_deref(),
                &deck_args,
                render_options,
                slides.as_deref(),
            )
        }
        Some(Commands::Json {
            input,
            output,
            compact,
            slides,
        }) => cmd_json(&input, output.as_deref(), &deck_args, compact, slides.as_deref()),
        Some(Commands::Notes {
            input,
            output,
            slides,
        }) => cmd_notes(&input, output.as_deref(), &deck_args, slides.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input, &deck_args),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &deck_args)
            } else {
                println!("{}", "Usage: mdpreso <FILE> [OUTPUT]".yellow());
                println!("       mdpreso --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Parse a deck, routing code blocks through the highlight command if one
/// is configured.
fn load_deck(input: &Path, args: &DeckArgs) -> Result<Deck, Box<dyn std::error::Error>> {
    let options = args.parse_options();

    let Some(ref command) = args.highlight_cmd else {
        return Ok(DeckParser::open_with_options(input, options)?.parse()?);
    };

    let highlighter = CommandHighlighter::new(command)?;
    log::info!("Highlighting code with {}", highlighter.program());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let deck = runtime.block_on(async {
        let source = fetch_async(input).await?;
        DeckParser::with_options(source, options)
            .parse_with_highlighter(&highlighter)
            .await
    })?;
    Ok(deck)
}

fn slide_selection(slides: Option<&str>) -> Result<SlideSelection, Box<dyn std::error::Error>> {
    Ok(match slides {
        Some(s) => SlideSelection::parse(s)?,
        None => SlideSelection::All,
    })
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: Option<&Path>, args: &DeckArgs) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_slides", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing markdown...");
    let deck = match load_deck(input, args) {
        Ok(deck) => deck,
        Err(e) => {
            pb.abandon();
            if let Some(err) = e.downcast_ref::<mdpreso::Error>() {
                fs::write(output_dir.join("index.html"), render::error_page(err))?;
            }
            return Err(e);
        }
    };
    pb.inc(1);

    let render_options = RenderOptions::new();

    pb.set_message("Generating HTML...");
    let html = render::to_html(&deck, &render_options)?;
    fs::write(output_dir.join("index.html"), &html)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = render::to_json(&deck, JsonFormat::Pretty)?;
    fs::write(output_dir.join("deck.json"), &json)?;
    pb.inc(1);

    pb.set_message("Collecting notes...");
    let notes = render::to_notes(&deck, &render_options)?;
    fs::write(output_dir.join("notes.txt"), &notes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} index.html", "├─".dimmed());
    println!("  {} deck.json", "├─".dimmed());
    println!("  {} notes.txt", "└─".dimmed());

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    args: &DeckArgs,
    render_options: RenderOptions,
    slides: Option<&str>,
) -> CliResult {
    let render_options = render_options.with_slides(slide_selection(slides)?);
    let deck = load_deck(input, args)?;
    let html = render::to_html(&deck, &render_options)?;
    write_or_print(output, &html)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    args: &DeckArgs,
    compact: bool,
    slides: Option<&str>,
) -> CliResult {
    let selection = slide_selection(slides)?;
    let deck = load_deck(input, args)?;
    let deck = render::select_deck(&deck, &selection)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&deck, format)?;
    write_or_print(output, &json)
}

fn cmd_notes(
    input: &Path,
    output: Option<&Path>,
    args: &DeckArgs,
    slides: Option<&str>,
) -> CliResult {
    let render_options = RenderOptions::new().with_slides(slide_selection(slides)?);
    let deck = load_deck(input, args)?;
    let notes = render::to_notes(&deck, &render_options)?;
    write_or_print(output, &notes)
}

fn cmd_info(input: &Path, args: &DeckArgs) -> CliResult {
    let deck = load_deck(input, args)?;
    let metadata = &deck.metadata;
    let stats = &deck.stats;

    println!("{}", "Deck Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Slides".bold(), deck.slide_count());
    println!("{}: {}", "With notes".bold(), stats.notes_count);

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(seconds) = metadata.refresh {
        println!("{}: every {}s", "Refresh".bold(), seconds);
    }
    for (key, value) in &metadata.extra {
        println!("{}: {}", key.bold(), value);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let content = &stats.content;
    println!("{}: {}", "Words".bold(), content.word_count);
    println!("{}: {}", "Headings".bold(), content.heading_count);
    println!("{}: {}", "Lists".bold(), content.list_count);
    println!("{}: {}", "Tables".bold(), content.table_count);
    println!("{}: {}", "Code blocks".bold(), content.code_block_count);
    println!("{}: {}", "Diagrams".bold(), content.diagram_count);
    println!("{}: {}", "Images".bold(), deck.image_urls.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdpreso".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown slide deck tool");
    println!();
    println!("License: MIT");
}
