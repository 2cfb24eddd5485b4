mod config;
mod input;
mod logging;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use smartcomp_parser::{
    complete, declaration_at, next_word, previous_word, segment, segment_until,
    try_parse_property, Classifier,
};
use smartcomp_protocol::{CursorContext, PropertyDescriptor, Span, SpanKind, SpanKinds};
use tracing::info;

use crate::config::Config;
use crate::input::{CursorArgs, SourceArgs};

#[derive(Parser)]
#[command(author, version, about = "Cursor context and Q_PROPERTY analysis for C++ sources")]
struct Cli {
    /// Keyword configuration (defaults to ./smartcomp.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split the source into code, literal and comment spans
    Segment {
        #[command(flatten)]
        source: SourceArgs,

        /// Stop once the spans cover this byte offset
        #[arg(long)]
        limit: Option<usize>,

        /// Only print these kinds (code, char, string, block-comment, line-comment)
        #[arg(long, value_delimiter = ',')]
        kinds: Vec<String>,
    },
    /// Classify the word under the cursor
    Classify {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Show the words before and after the cursor
    Words {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Parse a property declaration, given inline or taken from the cursor's line
    Property {
        /// Declaration text, e.g. "Q_PROPERTY(int x READ x)"
        declaration: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Classify the cursor and parse the property declaration it is on
    Complete {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
}

#[derive(Serialize)]
struct SpanReport<'a> {
    kind: SpanKind,
    start: usize,
    end: usize,
    text: &'a str,
}

#[derive(Serialize)]
struct WordsReport {
    previous: String,
    next: String,
}

#[derive(Serialize)]
struct CompletionReport {
    context: CursorContext,
    property: Option<PropertyDescriptor>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let keywords = &config.keywords;

    match &cli.command {
        Command::Segment {
            source,
            limit,
            kinds,
        } => {
            let text = source.read()?;
            let filter = parse_kinds(kinds)?;
            let spans = match limit {
                Some(limit) => segment_until(&text, *limit),
                None => segment(&text),
            };
            info!(spans = spans.len(), bytes = text.len(), "segmented");

            let reports: Vec<SpanReport> = spans
                .iter()
                .filter(|span| filter.includes(span.kind))
                .map(|span| span_report(&text, span))
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!(
                        "{:<13} {:>6}..{:<6} {:?}",
                        report.kind.as_str(),
                        report.start,
                        report.end,
                        report.text
                    );
                }
            }
        }
        Command::Classify { source, cursor } => {
            let text = source.read()?;
            let offset = cursor.resolve(&text)?;
            let context = Classifier::new(keywords).classify(&text, offset);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&context)?);
            } else {
                println!("{:?} {:?}", context.category, context.word);
            }
        }
        Command::Words { source, cursor } => {
            let text = source.read()?;
            let offset = cursor.resolve(&text)?;
            // Full segmentation so the forward search has material past the cursor
            let spans = segment(&text);
            let report = WordsReport {
                previous: previous_word(&text, &spans, offset),
                next: next_word(&text, &spans, offset),
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("previous: {:?}", report.previous);
                println!("next:     {:?}", report.next);
            }
        }
        Command::Property {
            declaration,
            source,
            cursor,
        } => {
            let property = match declaration {
                Some(declaration) => try_parse_property(declaration)?,
                None => {
                    let text = source.read()?;
                    let offset = cursor.resolve(&text)?;
                    try_parse_property(declaration_at(&text, offset))?
                }
            };
            print_property(&property, cli.json)?;
        }
        Command::Complete { source, cursor } => {
            let text = source.read()?;
            let offset = cursor.resolve(&text)?;
            let completion = complete(keywords, &text, offset);

            if cli.json {
                let report = CompletionReport {
                    context: completion.context,
                    property: completion.property,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{:?} {:?}",
                    completion.context.category, completion.context.word
                );
                if let Some(property) = &completion.property {
                    print_property(property, false)?;
                }
            }
        }
    }

    Ok(())
}

fn span_report<'a>(text: &'a str, span: &Span) -> SpanReport<'a> {
    SpanReport {
        kind: span.kind,
        start: span.start,
        end: span.end(),
        text: span.text(text),
    }
}

fn parse_kinds(names: &[String]) -> Result<SpanKinds> {
    if names.is_empty() {
        return Ok(SpanKinds::all());
    }

    names.iter().try_fold(SpanKinds::empty(), |set, name| {
        let kind = SpanKind::from_name(name).ok_or_else(|| anyhow!("unknown span kind '{name}'"))?;
        Ok(set | SpanKinds::from(kind))
    })
}

fn print_property(property: &PropertyDescriptor, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(property)?);
        return Ok(());
    }

    println!("type:     {}", property.type_name);
    println!("name:     {}", property.property_name);
    for (attribute, value) in property.accessors() {
        println!("{:<9} {}", format!("{}:", attribute.to_lowercase()), value);
    }
    Ok(())
}
