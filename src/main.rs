use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use unicode_table_reader::{
    available_languages, Archive, SearchMode, SearchResults, UnicodeIndex, DEFAULT_ARCHIVE_NAME,
    DEFAULT_LANGUAGE,
};
use unicode_table_reader::table::MIN_SYMBOL_QUERY_LEN;

#[derive(Parser, Debug)]
#[command(name = "unitable", version, about = "Browse Unicode names and blocks from a unicode-table-data archive")]
struct Cli {
    /// Path to the unicode-table-data ZIP archive
    #[arg(short, long, default_value = DEFAULT_ARCHIVE_NAME)]
    archive: PathBuf,

    /// Language of symbol and block names
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the languages the archive provides
    Languages,
    /// Show the name of one code point (hex, optionally prefixed by U+ or 0x)
    Lookup { code: String },
    /// Search blocks or symbols
    Search {
        /// block, name, literal, hex or dec
        #[arg(short, long, default_value_t = SearchMode::BlockName)]
        mode: SearchMode,
        text: String,
    },
    /// List every named symbol of a block, by canonical name
    Block { name: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Languages => {
            let archive = Archive::open(cli.archive)?;
            for lang in available_languages(&archive) {
                println!("{}", lang);
            }
        }
        Command::Lookup { code } => {
            let code = parse_code(&code)?;
            let index = UnicodeIndex::build(cli.archive, &cli.lang)?;
            match index.info_for(code)? {
                Some(info) => println!("{}", info),
                None => println!("{:04X} | no info", code),
            }
        }
        Command::Search { mode, text } => {
            if mode == SearchMode::SymbolName && text.chars().count() < MIN_SYMBOL_QUERY_LEN {
                return Err(format!(
                    "symbol name search needs at least {} letters",
                    MIN_SYMBOL_QUERY_LEN
                )
                .into());
            }
            let index = UnicodeIndex::build(cli.archive, &cli.lang)?;
            let mut results = index.search(mode, &text);
            results.sort_by_code();
            match &results {
                SearchResults::Blocks(blocks) => {
                    for m in blocks {
                        println!(
                            "{:05X}  {}  ({})  [{}]",
                            m.first_code,
                            m.block.display_name(),
                            m.count_label(),
                            m.block.canonical_name()
                        );
                    }
                    println!("{}", "=".repeat(60));
                    println!("{} blocks", results.len());
                }
                SearchResults::Symbols(symbols) => {
                    for m in symbols {
                        println!("{}", m);
                    }
                    println!("{}", "=".repeat(60));
                    println!("{} symbols", results.len());
                }
            }
        }
        Command::Block { name } => {
            let index = UnicodeIndex::build(cli.archive, &cli.lang)?;
            let block = index.get_block(&name)?;
            println!(
                "{} ({:04X}..{:04X}, {} symbols)",
                block.display_name(),
                block.range().start(),
                block.range().end(),
                block.len()
            );
            println!("{}", "=".repeat(60));
            for (code, symbol_name) in block.symbols() {
                println!("{:05X}  {}", code, symbol_name);
            }
        }
    }
    Ok(())
}

fn parse_code(text: &str) -> Result<u32, String> {
    let digits = text
        .trim()
        .trim_start_matches("U+")
        .trim_start_matches("u+")
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid code point '{}': {}", text, e))
}
