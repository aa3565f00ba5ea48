use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use checklist_catalog::{InferenceMode, Resolver, SetSlugParts, Vocabulary, card_slug, set_slug};
use checklist_core::{ParsedSet, SetRecord, SetType, validation_messages};
use checklist_parser::output::{OutputFormat, format_parsed_set, format_parsed_sets, format_report};
use checklist_parser::{
    ChecklistParser, ChecklistReport, ChecklistReportBundle, ParseOptions,
    parse_checklist_csv, parse_checklist_with_report,
};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const REPORT_BUNDLE_FILE: &str = "report.json";
const PARSED_SETS_DIR: &str = "sets";

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Summary,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Summary => Self::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliInferenceMode {
    Name,
    Slug,
}

impl From<CliInferenceMode> for InferenceMode {
    fn from(mode: CliInferenceMode) -> Self {
        match mode {
            CliInferenceMode::Name => Self::Name,
            CliInferenceMode::Slug => Self::Slug,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSetType {
    Base,
    Insert,
    Autograph,
    Memorabilia,
}

impl From<CliSetType> for SetType {
    fn from(set_type: CliSetType) -> Self {
        match set_type {
            CliSetType::Base => Self::Base,
            CliSetType::Insert => Self::Insert,
            CliSetType::Autograph => Self::Autograph,
            CliSetType::Memorabilia => Self::Memorabilia,
        }
    }
}

/// Ordering strategy for `sort`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SortKey {
    /// Group by base name parsed from display names.
    Name,
    /// Slug signals only.
    Slug,
}

#[derive(Debug, Parser)]
#[command(name = "checklist")]
#[command(about = "Trading card checklist parsing and set ordering")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    verbose: bool,
    /// Vocabulary YAML file replacing the built-in word tables.
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse checklist text from a file.
    ParseFile(ParseFileArgs),
    /// Parse checklist text from stdin.
    ParseStdin(ParseStdinArgs),
    /// Parse every `.txt` checklist in a directory in parallel.
    ParseDir(ParseDirArgs),
    /// Import a CSV checklist export, one set per base set.
    ImportCsv(ImportCsvArgs),
    /// Validate a parsed set JSON file.
    Validate(ValidateArgs),
    /// Infer the parallel relationship of a set name or slug.
    Resolve(ResolveArgs),
    /// Order a JSON list of set records for display.
    Sort(SortArgs),
    /// Build a set slug (and optionally a card slug).
    Slug(SlugArgs),
    /// Write the built-in vocabulary as YAML.
    Vocabulary(VocabularyArgs),
}

#[derive(Debug, Args)]
struct ParseOptionArgs {
    /// Output both the parsed set and the parse report.
    #[arg(long)]
    with_report: bool,
    /// Accept parallel lines without a print run.
    #[arg(long)]
    accept_unnumbered: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Path to file containing checklist text.
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    options: ParseOptionArgs,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    #[command(flatten)]
    options: ParseOptionArgs,
}

#[derive(Debug, Args)]
struct ParseDirArgs {
    /// Directory containing `.txt` checklists.
    #[arg(long)]
    input: PathBuf,
    /// Output directory for `report.json`; parsed sets go under `sets/`.
    #[arg(long)]
    output: PathBuf,
    /// Accept parallel lines without a print run.
    #[arg(long)]
    accept_unnumbered: bool,
    /// Number of parallel parse jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Output format for parsed set files.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ImportCsvArgs {
    /// Path to the CSV export.
    #[arg(long)]
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Parsed set JSON file.
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Display name or slug to resolve.
    text: String,
    /// Whether `text` is a display name or a slug.
    #[arg(long, default_value = "name")]
    mode: CliInferenceMode,
}

#[derive(Debug, Args)]
struct SortArgs {
    /// JSON file containing a list of set records.
    #[arg(long)]
    input: PathBuf,
    /// Ordering strategy.
    #[arg(long, default_value = "name")]
    by: SortKey,
}

#[derive(Debug, Args)]
struct SlugArgs {
    /// Release year, e.g. 2024-25.
    #[arg(long)]
    year: String,
    /// Release name, e.g. "Donruss Soccer".
    #[arg(long)]
    release: String,
    /// Set name, e.g. Optic.
    #[arg(long)]
    set: String,
    #[arg(long, default_value = "base")]
    set_type: CliSetType,
    /// Parallel variant name.
    #[arg(long)]
    variant: Option<String>,
    /// Parallel print run.
    #[arg(long)]
    print_run: Option<u32>,
    /// Card number; prints the card slug instead of the set slug.
    #[arg(long, requires = "player")]
    card: Option<String>,
    /// Player name for the card slug.
    #[arg(long, requires = "card")]
    player: Option<String>,
}

#[derive(Debug, Args)]
struct VocabularyArgs {
    /// Output YAML path.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let vocabulary = cli.vocabulary.as_deref();
    let result = match cli.command {
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::ParseDir(args) => run_parse_dir(args),
        Command::ImportCsv(args) => run_import_csv(args, vocabulary),
        Command::Validate(args) => run_validate(args),
        Command::Resolve(args) => run_resolve(args, vocabulary),
        Command::Sort(args) => run_sort(args, vocabulary),
        Command::Slug(args) => run_slug(args),
        Command::Vocabulary(args) => run_vocabulary(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_resolver(vocabulary: Option<&Path>) -> Result<Resolver, String> {
    let vocabulary = match vocabulary {
        Some(path) => Vocabulary::load(path)
            .map_err(|err| format!("Failed to load vocabulary '{}': {err}", path.display()))?,
        None => Vocabulary::default(),
    };
    Resolver::new(vocabulary).map_err(|err| format!("Invalid vocabulary: {err}"))
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let source = args.input.display().to_string();
    run_parse_checklist_text(&source, &text, &args.options)
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    run_parse_checklist_text("stdin", &text, &args.options)
}

fn run_parse_checklist_text(
    source: &str,
    text: &str,
    args: &ParseOptionArgs,
) -> Result<(), String> {
    let options = ParseOptions {
        accept_unnumbered_parallels: args.accept_unnumbered,
    };
    let format: OutputFormat = args.format.into();

    if args.with_report {
        let run = parse_checklist_with_report(text, options);

        #[derive(serde::Serialize)]
        struct ParseOutput {
            #[serde(skip_serializing_if = "Option::is_none")]
            parsed_set: Option<ParsedSet>,
            report: ChecklistReport,
        }

        let output = ParseOutput {
            parsed_set: run.result.as_ref().ok().cloned(),
            report: run.report.with_source(source),
        };

        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&output)
                    .map_err(|e| format!("Failed to serialize output: {e}"))?;
                println!("{json}");
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(&output)
                    .map_err(|e| format!("Failed to serialize output: {e}"))?;
                println!("{yaml}");
            }
            OutputFormat::Summary => {
                if let Some(ref set) = output.parsed_set {
                    println!("{}", format_parsed_set(set, format)?);
                }
                print!("{}", format_report(&output.report, format)?);
            }
        }
    } else {
        let set = ChecklistParser::new(text)
            .with_options(options)
            .parse()
            .map_err(|err| format!("Failed to parse '{source}': {err}"))?;
        println!("{}", format_parsed_set(&set, format)?);
    }
    Ok(())
}

fn run_parse_dir(args: ParseDirArgs) -> Result<(), String> {
    let inputs = collect_checklist_paths(&args.input)?;
    let sets_dir = args.output.join(PARSED_SETS_DIR);
    fs::create_dir_all(&sets_dir).map_err(|err| {
        format!(
            "Failed to create output directory '{}': {err}",
            sets_dir.display()
        )
    })?;
    let stems = output_stems(&inputs);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    let options = ParseOptions {
        accept_unnumbered_parallels: args.accept_unnumbered,
    };
    let format: OutputFormat = args.format.into();
    let output_dir = &args.output;

    let reports: Vec<ChecklistReport> = pool.install(|| {
        inputs
            .par_iter()
            .zip(stems.par_iter())
            .map(|(path, stem)| {
                let target = sets_dir.join(format!("{stem}.{}", format_extension(format)));
                parse_checklist_file(path, &target, options, format)
            })
            .collect()
    });

    let bundle = ChecklistReportBundle::new(chrono::Utc::now().to_rfc3339(), reports);
    let bundle_path = output_dir.join(REPORT_BUNDLE_FILE);
    let raw = serde_json::to_string_pretty(&bundle)
        .map_err(|err| format!("Failed to serialize report bundle: {err}"))?;
    fs::write(&bundle_path, raw)
        .map_err(|err| format!("Failed to write '{}': {err}", bundle_path.display()))?;

    println!(
        "Parsed {}/{} checklist(s) into '{}'.",
        bundle.succeeded,
        bundle.total,
        output_dir.display()
    );
    Ok(())
}

/// Parses one checklist file and writes its parsed set to `target`.
///
/// Failures are folded into the returned report so one bad file does not
/// stop the batch.
fn parse_checklist_file(
    path: &Path,
    target: &Path,
    options: ParseOptions,
    format: OutputFormat,
) -> ChecklistReport {
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            let mut report = parse_checklist_with_report("", options).report.with_source(&source);
            report.error_code = Some("io_error".to_string());
            report.error = Some(format!("Failed to read '{}': {err}", path.display()));
            return report;
        }
    };

    let run = parse_checklist_with_report(&text, options);
    let mut report = run.report.with_source(&source);
    let Ok(set) = run.result else {
        debug!(source = %source, "Checklist failed to parse");
        return report;
    };

    let written = format_parsed_set(&set, format).and_then(|body| {
        fs::write(target, body)
            .map_err(|err| format!("Failed to write '{}': {err}", target.display()))
    });

    match written {
        Ok(()) => info!(source = %source, output = %target.display(), "Parsed checklist"),
        Err(err) => {
            report.success = false;
            report.error_code = Some("io_error".to_string());
            report.error = Some(err);
        }
    }
    report
}

/// Assigns each input a distinct output file stem.
///
/// Stems are compared case-insensitively; later inputs whose sanitized stem
/// is already taken get a numeric suffix.
fn output_stems(paths: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map(|stem| sanitize_filename_segment(&stem.to_string_lossy()))
                .unwrap_or_else(|| sanitize_filename_segment(""));
            let mut candidate = stem.clone();
            let mut suffix = 2;
            while !taken.insert(candidate.to_lowercase()) {
                candidate = format!("{stem}-{suffix}");
                suffix += 1;
            }
            candidate
        })
        .collect()
}

fn collect_checklist_paths(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to read directory '{}': {err}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| format!("Failed to read directory entry: {err}"))?;
        let path = entry.path();
        let is_checklist = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if path.is_file() && is_checklist {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn run_import_csv(args: ImportCsvArgs, vocabulary: Option<&Path>) -> Result<(), String> {
    let resolver = load_resolver(vocabulary)?;
    let content = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let sets = parse_checklist_csv(&content, &resolver)
        .map_err(|err| format!("Failed to import '{}': {err}", args.input.display()))?;
    println!("{}", format_parsed_sets(&sets, args.format.into())?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let set: ParsedSet = serde_json::from_str(&raw)
        .map_err(|err| format!("Invalid parsed set '{}': {err}", args.input.display()))?;

    let messages = validation_messages(&set);
    if messages.is_empty() {
        println!(
            "Validated '{}': {} base card(s), {} parallel(s).",
            set.set_name,
            set.base_cards.len(),
            set.parallels.len()
        );
        return Ok(());
    }

    for message in &messages {
        println!("{message}");
    }
    Err(format!(
        "{} validation error(s) in '{}'",
        messages.len(),
        args.input.display()
    ))
}

fn run_resolve(args: ResolveArgs, vocabulary: Option<&Path>) -> Result<(), String> {
    let resolver = load_resolver(vocabulary)?;
    let relationship = resolver.infer(&args.text, args.mode.into());
    let json = serde_json::to_string_pretty(&relationship)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}

fn run_sort(args: SortArgs, vocabulary: Option<&Path>) -> Result<(), String> {
    let resolver = load_resolver(vocabulary)?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let sets: Vec<SetRecord> = serde_json::from_str(&raw)
        .map_err(|err| format!("Invalid set list '{}': {err}", args.input.display()))?;

    let ordered = match args.by {
        SortKey::Name => resolver.sort_sets_grouped(sets),
        SortKey::Slug => resolver.sort_sets(sets),
    };
    let json = serde_json::to_string_pretty(&ordered)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}

fn run_slug(args: SlugArgs) -> Result<(), String> {
    let slug = set_slug(&SetSlugParts {
        year: &args.year,
        release_name: &args.release,
        set_name: &args.set,
        set_type: args.set_type.into(),
        variant: args.variant.as_deref(),
        print_run: args.print_run,
    });
    if slug.is_empty() {
        return Err("Slug parts produced an empty slug".to_string());
    }

    match (args.card.as_deref(), args.player.as_deref()) {
        (Some(card), Some(player)) => println!("{}", card_slug(&slug, card, player)),
        _ => println!("{slug}"),
    }
    Ok(())
}

fn run_vocabulary(args: VocabularyArgs) -> Result<(), String> {
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    Vocabulary::default()
        .save(&args.output)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;
    println!("Wrote vocabulary to '{}'.", args.output.display());
    Ok(())
}

fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Yaml => "yaml",
        OutputFormat::Summary => "txt",
    }
}

fn sanitize_filename_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            out.push(ch);
        } else {
            out.push('-');
        }
    }
    let cleaned = out.trim_matches(|c: char| c == '-' || c == '.');
    if cleaned.is_empty() {
        "checklist".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{OutputFormat, format_extension, output_stems, sanitize_filename_segment};

    #[test]
    fn test_sanitize_filename_segment_keeps_safe_chars() {
        assert_eq!(sanitize_filename_segment("prizm-2024"), "prizm-2024");
        assert_eq!(sanitize_filename_segment("Dual Jersey Ink"), "Dual-Jersey-Ink");
        assert_eq!(sanitize_filename_segment("Kaboom!"), "Kaboom");
    }

    #[test]
    fn test_sanitize_filename_segment_never_empty() {
        assert_eq!(sanitize_filename_segment(""), "checklist");
        assert_eq!(sanitize_filename_segment("..."), "checklist");
        assert_eq!(sanitize_filename_segment("★"), "checklist");
    }

    #[test]
    fn test_output_stems_are_unique() {
        let paths = [
            PathBuf::from("in/a b.txt"),
            PathBuf::from("in/a-b.txt"),
            PathBuf::from("in/A-B.TXT"),
            PathBuf::from("in/optic.txt"),
        ];
        assert_eq!(output_stems(&paths), ["a-b", "a-b-2", "A-B-3", "optic"]);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(format_extension(OutputFormat::Json), "json");
        assert_eq!(format_extension(OutputFormat::Yaml), "yaml");
        assert_eq!(format_extension(OutputFormat::Summary), "txt");
    }
}
