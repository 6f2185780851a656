//! aegis-code CLI entry point

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aegis_code::config::Config;
use aegis_code::detectors::common::count_nodes;
use aegis_code::indexing::{analyze_files_parallel, collect_files};
use aegis_code::{
    analyze_source, encode_toon, encode_toon_batch, AegisError, AnalysisDocument, Cli,
    CodeAnalysisAgent, FileAnalysis, Lang, OutputFormat,
};

/// Exit status for `--strict` when any input failed to parse
const STRICT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(Outcome { output, has_errors }) => {
            println!("{}", output);
            if has_errors {
                ExitCode::from(STRICT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

struct Outcome {
    output: String,
    /// Set only under `--strict`
    has_errors: bool,
}

impl Outcome {
    fn plain(output: String) -> Self {
        Self {
            output,
            has_errors: false,
        }
    }
}

fn run() -> aegis_code::Result<Outcome> {
    let cli = Cli::parse_args();

    if cli.init_config {
        return Ok(Outcome::plain(Config::default_toml()));
    }
    if cli.tool_schema {
        let definition = CodeAnalysisAgent::new().tool_definition();
        return Ok(Outcome::plain(serde_json::to_string_pretty(&definition)?));
    }

    let mut config = Config::resolve(cli.config.as_deref())?;
    config.merge_with_args(&cli);
    init_logging(&config.logging.level);
    debug!("Effective config: {:?}", config);

    let format = config.output.format;

    // 1. Single document: stdin or exactly one file
    if cli.reads_stdin() {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        debug!("Read {} bytes from stdin", source.len());

        let document = analyze_one(&source, cli.print_ast);
        return finish_single(&document, format, cli.strict);
    }

    if let [path] = cli.paths.as_slice() {
        if path.is_file() {
            let source = read_source(path)?;
            let document = analyze_one(&source, cli.print_ast);
            return finish_single(&document, format, cli.strict);
        }
    }

    // 2. Batch: several paths and/or directories
    let files = gather_files(&cli.paths, &config)?;
    info!("Analyzing {} files", files.len());

    let progress = progress_bar(files.len());
    let callback = |done: usize, _total: usize| progress.set_position(done as u64);
    let result = analyze_files_parallel(&files, Some(&callback));
    progress.finish_and_clear();

    for (path, reason) in &result.read_errors {
        warn!("Skipped {}: {}", path.display(), reason);
    }
    if cli.print_ast {
        warn!("--print-ast is ignored when analyzing more than one file");
    }

    let output = render_batch(&result.analyses, format)?;
    Ok(Outcome {
        output,
        has_errors: cli.strict && result.parse_errors > 0,
    })
}

/// Initialize tracing on stderr; `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init();
}

fn read_source(path: &Path) -> aegis_code::Result<String> {
    let lang = Lang::from_path(path)?;
    let source = fs::read_to_string(path)?;
    debug!(
        "Read {} bytes from {} ({})",
        source.len(),
        path.display(),
        lang.name()
    );
    Ok(source)
}

fn analyze_one(source: &str, show_ast: bool) -> AnalysisDocument {
    if show_ast {
        match aegis_code::parse::parse_tree(source) {
            Ok(tree) => {
                debug!("Parsed AST with {} nodes", count_nodes(&tree.root_node()));
                eprintln!("\n=== AST ===");
                print_ast(tree.root_node(), source);
                eprintln!("=== END AST ===\n");
            }
            Err(e) => warn!("Could not print AST: {}", e),
        }
    }
    analyze_source(source)
}

fn finish_single(
    document: &AnalysisDocument,
    format: OutputFormat,
    strict: bool,
) -> aegis_code::Result<Outcome> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Compact => serde_json::to_string(document)?,
        OutputFormat::Toon => encode_toon(document),
    };
    Ok(Outcome {
        output,
        has_errors: strict && document.is_error(),
    })
}

fn render_batch(analyses: &[FileAnalysis], format: OutputFormat) -> aegis_code::Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(analyses)?,
        OutputFormat::Compact => serde_json::to_string(analyses)?,
        OutputFormat::Toon => encode_toon_batch(analyses).trim_end().to_string(),
    };
    Ok(output)
}

/// Expand the command-line paths into the list of files to analyze
fn gather_files(paths: &[PathBuf], config: &Config) -> aegis_code::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path == Path::new("-") {
            return Err(AegisError::Config {
                message: "'-' (stdin) cannot be combined with other paths".to_string(),
            });
        }
        if !path.exists() {
            return Err(AegisError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        if path.is_dir() {
            let found = collect_files(path, config.scan.max_depth, &config.scan.extensions);
            files.extend(found.into_iter().filter(|f| !config.is_excluded(f)));
        } else {
            Lang::from_path(path)?;
            files.push(path.clone());
        }
    }

    Ok(files)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Print AST for debugging
fn print_ast(root: tree_sitter::Node, source: &str) {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        let text = node
            .utf8_text(source.as_bytes())
            .unwrap_or("<invalid utf8>");
        let text_preview: String = text.chars().take(50).collect();
        let text_preview = text_preview.replace('\n', "\\n");

        eprintln!(
            "{}{}:{} [{}-{}] \"{}\"{}",
            indent,
            node.kind(),
            if node.is_named() { "" } else { " (anonymous)" },
            node.start_position().row + 1,
            node.end_position().row + 1,
            text_preview,
            if text.chars().count() > 50 { "..." } else { "" }
        );

        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
}
