//! pdfa11y CLI - accessibility analysis for extracted PDF content
//!
//! Consumes a JSON primitive stream (the output of an external PDF
//! extractor) and produces an accessibility report, a tagged JSON tree,
//! or accessible HTML. OCR and captioning collaborators are external
//! services and are not wired up here: images resolve to dimension-derived
//! fallback descriptions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use pdfa11y::{
    remediate::remediate, render, Analysis, AnalyzeOptions, Analyzer, JsonFormat, NoopCaptioner,
    NoopRecognizer, RawDocument, RenderOptions,
};

#[derive(Parser)]
#[command(name = "pdfa11y")]
#[command(version)]
#[command(about = "Score and tag extracted PDF content for accessibility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a primitive stream and print an accessibility summary
    Analyze {
        /// Input JSON primitive stream
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the full analysis as JSON to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Apply remediation (title/language fallbacks, table roles)
        /// before scoring the final tree
        #[arg(long)]
        remediate: bool,

        /// Disable page-level parallelism
        #[arg(long)]
        sequential: bool,

        /// Number of alt-text workers
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Per-image deadline in milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },

    /// Print the accessibility report as JSON
    Score {
        /// Input JSON primitive stream
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render the tagged document as accessible HTML
    Html {
        /// Input JSON primitive stream
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fallback language attribute
        #[arg(long, default_value = "en")]
        lang: String,

        /// Apply remediation before rendering
        #[arg(long)]
        remediate: bool,
    },

    /// Show document information
    Info {
        /// Input JSON primitive stream
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            remediate,
            sequential,
            workers,
            timeout_ms,
        } => cmd_analyze(
            &input,
            output.as_deref(),
            remediate,
            sequential,
            workers,
            timeout_ms,
        ),
        Commands::Score { input, compact } => cmd_score(&input, compact),
        Commands::Html {
            input,
            output,
            lang,
            remediate,
        } => cmd_html(&input, output.as_deref(), &lang, remediate),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_document(input: &Path) -> Result<RawDocument, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let doc: RawDocument = serde_json::from_str(&data)?;
    Ok(doc)
}

fn build_options(
    sequential: bool,
    workers: Option<usize>,
    timeout_ms: Option<u64>,
) -> AnalyzeOptions {
    let mut options = AnalyzeOptions::new();
    if sequential {
        options = options.sequential();
    }
    if let Some(workers) = workers {
        options = options.with_image_workers(workers);
    }
    if let Some(ms) = timeout_ms {
        options = options.with_image_timeout(Duration::from_millis(ms));
    }
    options
}

fn run_analysis(
    input: &Path,
    options: AnalyzeOptions,
    apply_remediation: bool,
) -> Result<Analysis, Box<dyn std::error::Error>> {
    let doc = read_document(input)?;
    let analyzer = Analyzer::with_options(options);
    let mut analysis =
        analyzer.analyze(&doc, Arc::new(NoopRecognizer), Arc::new(NoopCaptioner))?;

    if apply_remediation {
        let fallback = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string());
        let fixes = remediate(&mut analysis.tree, fallback.as_deref());
        for fix in &fixes {
            log::info!("remediation: {}", fix);
        }
        analysis.report = pdfa11y::score_tree(&analysis.tree)?;
    }

    Ok(analysis)
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    apply_remediation: bool,
    sequential: bool,
    workers: Option<usize>,
    timeout_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(sequential, workers, timeout_ms);
    let analysis = run_analysis(input, options, apply_remediation)?;
    let report = &analysis.report;

    let score_text = format!("{}/100", report.score);
    let score_colored = if report.score >= 90 {
        score_text.green().bold()
    } else if report.score >= 70 {
        score_text.yellow().bold()
    } else {
        score_text.red().bold()
    };

    println!("{} {}", "Accessibility score:".bold(), score_colored);
    println!(
        "  {} page(s), {} node(s)",
        analysis.tree.page_count(),
        analysis.tree.node_count()
    );

    if report.issues.is_empty() {
        println!("  {}", "No issues found".green());
    } else {
        println!("  {} issue(s):", report.issues.len());
        for issue in &report.issues {
            println!(
                "  {} [WCAG {}] {}",
                "-".dimmed(),
                issue.wcag_reference.cyan(),
                issue.description
            );
        }
    }

    if !analysis.warnings.is_empty() {
        println!("  {} warning(s):", analysis.warnings.len());
        for warning in &analysis.warnings {
            println!("  {} {}", "!".yellow(), warning.message.dimmed());
        }
    }

    if let Some(output) = output {
        let json = render::to_json(&analysis, JsonFormat::Pretty)?;
        fs::write(output, json)?;
        println!("{} {}", "Wrote".green(), output.display());
    }

    Ok(())
}

fn cmd_score(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = run_analysis(input, AnalyzeOptions::new(), false)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    println!("{}", render::to_json(&analysis.report, format)?);
    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    lang: &str,
    apply_remediation: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = run_analysis(input, AnalyzeOptions::new(), apply_remediation)?;
    let options = RenderOptions::new().with_fallback_lang(lang);
    let html = render::to_html(&analysis.tree, &options);

    match output {
        Some(path) => {
            fs::write(path, html)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(input)?;

    println!("{}", "Document information".bold());
    println!(
        "  Title:    {}",
        doc.metadata.title.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Language: {}",
        doc.metadata.language.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Author:   {}",
        doc.metadata.author.as_deref().unwrap_or("(none)")
    );
    println!("  Pages:    {}", doc.page_count());
    println!("  Text:     {} characters", doc.char_count());

    let images: usize = doc.pages.iter().map(|p| p.images.len()).sum();
    let links: usize = doc.pages.iter().map(|p| p.links.len()).sum();
    println!("  Images:   {}", images);
    println!("  Links:    {}", links);

    Ok(())
}
