//! lod: command-line interface for liblod
//!
//! Resolves Linked Open Data URIs and prints their statements, optionally
//! narrowed by a predicate query.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use liblod::{Lod, LodConfig, LodStatement, LodTerm};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "lod", version, about = "Linked Open Data client")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preferred languages, most preferred first (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    lang: Vec<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log fetches and parsing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URI and print its statements
    Resolve {
        uri: String,

        /// Predicate query, e.g. "rdfs:label,schema:name"
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Fetch URIs one at a time and report each outcome
    Fetch {
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// Fetch URIs and print everything indexed as Turtle
    Turtle {
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// Load a local RDF file and print the statements about a subject
    Load {
        file: PathBuf,

        /// Subject to print; every subject if omitted
        #[arg(long)]
        subject: Option<String>,

        /// Media type of the file
        #[arg(long, default_value = "text/turtle")]
        media_type: String,

        /// Base IRI for relative references in the file
        #[arg(long)]
        base: Option<String>,

        /// Predicate query applied to the subject
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Resolve a URI and list the subjects declaring owl:sameAs to it
    SameAs { uri: String },
    /// Start an interactive shell
    Shell,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let result = match build_context(&cli) {
        Ok(mut lod) => match cli.command {
            Commands::Resolve { ref uri, ref query } => {
                run_resolve(&mut lod, uri, query.as_deref(), &cli.format).await
            }
            Commands::Fetch { ref uris } => run_fetch(&mut lod, uris, &cli.format).await,
            Commands::Turtle { ref uris } => run_turtle(&mut lod, uris).await,
            Commands::Load { ref file, ref subject, ref media_type, ref base, ref query } => run_load(
                &mut lod,
                file,
                subject.as_deref(),
                media_type,
                base.as_deref(),
                query.as_deref(),
                &cli.format,
            ),
            Commands::SameAs { ref uri } => run_same_as(&mut lod, uri).await,
            Commands::Shell => run_shell(&mut lod, &cli.format).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_context(cli: &Cli) -> CliResult<Lod> {
    let mut config = match &cli.config {
        Some(path) => LodConfig::from_file(path)?,
        None => LodConfig::default(),
    };
    if !cli.lang.is_empty() {
        config.languages = cli.lang.clone();
    }
    Ok(Lod::with_config(config)?)
}

async fn run_resolve(
    lod: &mut Lod,
    uri: &str,
    query: Option<&str>,
    format: &OutputFormat,
) -> CliResult<()> {
    if lod.resolve(uri).await.is_none() {
        return Err(describe_failure(lod, uri).into());
    }
    print_subject(lod, uri, query, format)
}

async fn run_fetch(lod: &mut Lod, uris: &[String], format: &OutputFormat) -> CliResult<()> {
    let mut rows = Vec::with_capacity(uris.len());

    // One batch per URI so the last-operation fields describe each outcome
    for uri in uris {
        let ok = lod.fetch_all(std::slice::from_ref(uri)).await;
        rows.push(vec![
            uri.clone(),
            lod.status().to_string(),
            lod.error().to_string(),
            if ok {
                lod.document().unwrap_or_default().to_string()
            } else {
                lod.err_msg().unwrap_or_default()
            },
        ]);
    }

    print_rows(&["uri", "status", "error", "document / message"], &rows, format)
}

async fn run_turtle(lod: &mut Lod, uris: &[String]) -> CliResult<()> {
    if !lod.fetch_all(uris).await {
        eprintln!("warning: some URIs failed; last error: {}", lod.err_msg().unwrap_or_default());
    }
    print!("{}", lod.to_turtle()?);
    Ok(())
}

fn run_load(
    lod: &mut Lod,
    file: &Path,
    subject: Option<&str>,
    media_type: &str,
    base: Option<&str>,
    query: Option<&str>,
    format: &OutputFormat,
) -> CliResult<()> {
    let rdf = std::fs::read_to_string(file)?;
    if !lod.load_rdf_with_base(&rdf, media_type, base) {
        return Err(format!("could not parse {} as {}", file.display(), media_type).into());
    }

    match subject {
        Some(uri) => print_subject(lod, uri, query, format),
        None => {
            let rows: Vec<Vec<String>> = lod
                .instances()
                .flat_map(|instance| instance.iter())
                .map(|s| statement_row(s, true))
                .collect();
            print_rows(&["subject", "predicate", "object", "tag"], &rows, format)
        }
    }
}

async fn run_same_as(lod: &mut Lod, uri: &str) -> CliResult<()> {
    if !lod.contains(uri).await && lod.error() != 0 {
        return Err(describe_failure(lod, uri).into());
    }
    for subject in lod.get_same_as(uri) {
        println!("{}", subject);
    }
    Ok(())
}

async fn run_shell(lod: &mut Lod, format: &OutputFormat) -> CliResult<()> {
    println!("liblod interactive shell");
    println!("Type <uri> [query], or :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("lod> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :lang <l1,l2>   Set language preferences");
                println!("  :turtle         Print the index as Turtle");
                println!("  :quit           Exit shell");
                println!("  <uri> [query]   Resolve a URI, optionally filtering by predicates");
            }
            ":turtle" => match lod.to_turtle() {
                Ok(turtle) => print!("{}", turtle),
                Err(e) => eprintln!("Error: {}", e),
            },
            cmd if cmd.starts_with(":lang") => {
                let langs = cmd.trim_start_matches(":lang").trim();
                lod.set_languages(langs.split(',').map(str::trim).filter(|l| !l.is_empty()));
                println!("languages: {}", lod.languages().join(", "));
            }
            input => {
                let (uri, query) = match input.split_once(char::is_whitespace) {
                    Some((uri, query)) => (uri, Some(query.trim())),
                    None => (input, None),
                };
                if let Err(e) = run_resolve(lod, uri, query, format).await {
                    eprintln!("Error: {}", e);
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

fn describe_failure(lod: &Lod, uri: &str) -> String {
    match lod.err_msg() {
        Some(msg) => format!("{} (error {}, HTTP {})", msg, lod.error(), lod.status()),
        None => format!("no statements about {}", uri),
    }
}

fn print_subject(lod: &Lod, uri: &str, query: Option<&str>, format: &OutputFormat) -> CliResult<()> {
    let instance = lod
        .locate(uri)
        .ok_or_else(|| format!("no statements about {}", uri))?;

    let rows: Vec<Vec<String>> = match query {
        Some(query) => lod
            .filter(instance, query)
            .model()
            .iter()
            .map(|s| statement_row(s, false))
            .collect(),
        None => instance.iter().map(|s| statement_row(s, false)).collect(),
    };

    print_rows(&["predicate", "object", "tag"], &rows, format)
}

fn statement_row(statement: &LodStatement, with_subject: bool) -> Vec<String> {
    let mut row = Vec::with_capacity(4);
    if with_subject {
        row.push(statement.subject().to_string());
    }
    row.push(statement.predicate().to_string());
    row.push(statement.object().value().to_string());
    row.push(term_tag(statement.object()));
    row
}

fn term_tag(term: &LodTerm) -> String {
    match term.as_literal() {
        Some(literal) => match (literal.language(), literal.datatype()) {
            (Some(lang), _) => format!("@{}", lang),
            (None, Some(datatype)) => format!("^^{}", datatype),
            (None, None) => String::new(),
        },
        None => "<uri>".to_string(),
    }
}

fn print_rows(header: &[&str], rows: &[Vec<String>], format: &OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let records: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let object: serde_json::Map<String, serde_json::Value> = header
                        .iter()
                        .zip(row)
                        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                        .collect();
                    serde_json::Value::Object(object)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Csv => {
            println!("{}", header.join(","));
            for row in rows {
                let cells: Vec<String> = row.iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(header);

            for row in rows {
                table.add_row(row);
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }

    Ok(())
}

fn format_csv_value(v: &str) -> String {
    if v.contains(',') || v.contains('"') || v.contains('\n') {
        format!("\"{}\"", v.replace('"', "\"\""))
    } else {
        v.to_string()
    }
}
