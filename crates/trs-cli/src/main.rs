use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use trs_ast::pretty::print_program;
use trs_ast::span::Span;
use trs_lexer::lex;
use trs_parser::{parse_source_with, ParserConfig, DEFAULT_MAX_DEPTH};

#[derive(Parser, Debug)]
#[command(
    name = "trs",
    version,
    about = "Parse term-rewriting scripts and print their syntax tree"
)]
struct Opt {
    /// Source file
    file: Option<PathBuf>,

    /// Inline program instead of a file
    #[arg(short = 'e', long = "eval", conflicts_with = "file")]
    eval: Option<String>,

    /// Output format: text|json
    #[arg(long = "format", default_value = "text")]
    format: String,

    /// Print the token stream instead of parsing
    #[arg(long = "dump-tokens", default_value_t = false)]
    dump_tokens: bool,

    /// Maximum nesting of terms and patterns
    #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// 1-based line and column of a byte offset.
fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let before = &src[..offset.min(src.len())];
    let line = before.matches('\n').count() + 1;
    let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, col)
}

fn report(src: &str, span: Option<Span>, msg: &str) {
    let offset = span.map_or(src.len(), |s| s.offset);
    let (line, col) = line_col(src, offset);
    eprintln!("error: {line}:{col}: {msg}");
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let opt = Opt::parse();
    init_logging(opt.verbose);

    let src = match (&opt.eval, &opt.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => {
            info!("reading {}", path.display());
            std::fs::read_to_string(path)?
        }
        (None, None) => {
            eprintln!("no input; try -e '...' or a file path");
            return Ok(ExitCode::from(2));
        }
    };

    if opt.format != "text" && opt.format != "json" {
        eprintln!("unknown format `{}` (expected text or json)", opt.format);
        return Ok(ExitCode::from(2));
    }

    if opt.dump_tokens {
        let toks = match lex(&src) {
            Ok(toks) => toks,
            Err(e) => {
                report(&src, Some(e.span()), &e.to_string());
                return Ok(ExitCode::FAILURE);
            }
        };
        if opt.format == "json" {
            let rows: Vec<_> = toks.iter().map(|t| (t.tok, t.text, t.span)).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for t in &toks {
                println!("{:?}:{}", t.tok, t.text);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = ParserConfig { max_depth: opt.max_depth };
    let items = match parse_source_with(&src, &config) {
        Ok(items) => items,
        Err(e) => {
            report(&src, e.span(), &e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!("parsed {} item(s)", items.len());

    if opt.format == "json" {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", print_program(&items));
    }
    Ok(ExitCode::SUCCESS)
}
