mod logger;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use todo_booklet::{BookletOptions, BookletStatistics};

#[derive(Parser)]
#[command(
    name = "todo-booklet",
    about = "Generate cross-linked todo booklet PDFs",
    version
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the booklet PDF
    Generate {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Output PDF file (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show page and item counts without generating
    Stats {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the first list page as a one-page preview PDF
    Preview {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the default configuration as JSON
    InitConfig {
        /// Output JSON file
        #[arg(short, long, default_value = "todo-booklet.json")]
        output: PathBuf,
    },
}

/// Options shared by the commands that lay out a booklet
#[derive(Args)]
struct LayoutArgs {
    /// JSON configuration to start from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Landscape orientation
    #[arg(long)]
    landscape: bool,

    /// Todo items per column
    #[arg(long)]
    items_per_column: Option<usize>,

    /// Columns per list page (1 or 2)
    #[arg(long)]
    columns: Option<usize>,

    /// Number of list pages
    #[arg(long)]
    list_pages: Option<usize>,

    /// Detail pages per todo item
    #[arg(long)]
    detail_pages: Option<usize>,

    /// Where item numbers are drawn
    #[arg(long, value_enum)]
    number_placement: Option<PlacementArg>,

    /// Add a title page with this text
    #[arg(long)]
    title: Option<String>,

    /// Draw guide lines through the dot grid
    #[arg(long)]
    guide_lines: bool,
}

impl LayoutArgs {
    /// Configuration file (or defaults) with the command line overrides applied
    async fn options(&self) -> Result<BookletOptions> {
        let mut options = match &self.config {
            Some(path) => BookletOptions::load(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => BookletOptions::default(),
        };

        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if self.landscape {
            options.orientation = todo_booklet::Orientation::Landscape;
        }
        if let Some(items) = self.items_per_column {
            options.structure.items_per_column = items;
        }
        if let Some(columns) = self.columns {
            options.structure.columns = columns;
        }
        if let Some(pages) = self.list_pages {
            options.structure.list_pages = pages;
        }
        if let Some(pages) = self.detail_pages {
            options.structure.detail_pages_per_item = pages;
        }
        if let Some(placement) = self.number_placement {
            options.numbers.placement = placement.into();
        }
        if let Some(title) = &self.title {
            options.title_page.enabled = true;
            options.title_page.text = title.clone();
        }
        if self.guide_lines {
            options.guide_lines.enabled = true;
        }

        Ok(options)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    B4,
    B5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlacementArg {
    Outside,
    InsideLeft,
    InsideRight,
    Hidden,
}

impl From<PaperArg> for todo_booklet::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::B4 => Self::B4,
            PaperArg::B5 => Self::B5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<PlacementArg> for todo_booklet::NumberPlacement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Outside => Self::Outside,
            PlacementArg::InsideLeft => Self::InsideLeft,
            PlacementArg::InsideRight => Self::InsideRight,
            PlacementArg::Hidden => Self::Hidden,
        }
    }
}

fn print_statistics(stats: &BookletStatistics) {
    println!("Booklet Statistics:");
    if stats.title_pages > 0 {
        println!("  Title pages: {}", stats.title_pages);
    }
    println!("  Index pages: {}", stats.index_pages);
    println!("  List pages: {}", stats.list_pages);
    println!("  Todo items: {}", stats.items);
    println!("  Detail pages: {}", stats.detail_pages);
    println!("  Total pages: {}", stats.total_pages);
    println!("  Dots per grid tile: {}", stats.dots_per_tile);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(logger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Generate { layout, output } => {
            let options = layout.options().await?;
            let params = options.resolve()?;
            let output = output.unwrap_or_else(|| PathBuf::from(&options.output_filename));

            let stats = todo_booklet::generate_booklet(&params, &output).await?;
            println!(
                "Generated {} pages ({} todo items) → {}",
                stats.total_pages,
                stats.items,
                output.display()
            );
        }

        Commands::Stats { layout, json } => {
            let params = layout.options().await?.resolve()?;
            let stats = todo_booklet::calculate_statistics(&params);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_statistics(&stats);
            }
        }

        Commands::Preview { layout, output } => {
            let params = layout.options().await?.resolve()?;
            let preview = todo_booklet::generate_preview(&params).await?;
            todo_booklet::save_pdf(preview, &output).await?;
            println!("Preview → {}", output.display());
        }

        Commands::InitConfig { output } => {
            BookletOptions::default().save(&output).await?;
            println!("Default configuration → {}", output.display());
        }
    }

    Ok(())
}
