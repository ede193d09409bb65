use std::fs;
use std::io::{self, Read};

use bertok::config::{Config, Output, MAX_LEN_ENV, VOCAB_ENV};
use bertok::{source_for, BertTokenizer, ModelInput, TokenizerCell};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!(
        "Usage: bertok [options] [path...]\n\
         \n\
         Convert text to BERT WordPiece token ids.\n\
         \n\
         Options:\n\
         \x20 -v, --vocab <loc>    Vocabulary JSON: path, http(s) URL or 'embedded:'\n\
         \x20 -c, --count          Print token counts instead of ids\n\
         \x20 -o, --offsets        Print 'id offset token' lines\n\
         \x20 -p, --pack           Print fixed-length model input as JSON\n\
         \x20 --max-len <n>        Model input length for --pack (default: 128)\n\
         \x20 --base64             With --pack, add little-endian int64 ids as base64\n\
         \x20 -V, --version        Show version\n\
         \x20 -h, --help           Show this help\n\
         \n\
         When no paths are given (or '-'), reads from stdin.\n\
         Environment: {} (vocabulary location), {} (model input length),\n\
         RUST_LOG (log filter, default: warn).",
        VOCAB_ENV, MAX_LEN_ENV
    );
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

struct Input {
    name: Option<String>,
    text: String,
}

fn read_stdin() -> String {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
        eprintln!("Error reading stdin: {}", e);
        std::process::exit(1);
    });
    buf
}

fn read_inputs(paths: &[String]) -> Vec<Input> {
    if paths.is_empty() {
        return vec![Input {
            name: None,
            text: read_stdin(),
        }];
    }
    paths
        .iter()
        .map(|p| {
            if p == "-" {
                return Input {
                    name: Some("stdin".to_string()),
                    text: read_stdin(),
                };
            }
            let text = fs::read_to_string(p).unwrap_or_else(|e| {
                eprintln!("Error reading {}: {}", p, e);
                std::process::exit(1);
            });
            Input {
                name: Some(p.clone()),
                text,
            }
        })
        .collect()
}

fn format_line(count: &str, label: &str) -> String {
    format!("{:>8} {}\n", count, label)
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats one input for the selected output mode; also returns its id count.
fn render(
    tok: &BertTokenizer,
    config: &Config,
    input: &Input,
    labelled: bool,
) -> (String, usize) {
    match config.output {
        Output::Ids => {
            let ids = tok.tokenize(&input.text);
            let line = match (&input.name, labelled) {
                (Some(name), true) => format!("{}\t{}\n", name, join_ids(&ids)),
                _ => format!("{}\n", join_ids(&ids)),
            };
            (line, ids.len())
        }
        Output::Count => {
            let count = tok.tokenize(&input.text).len();
            let line = format_line(&count.to_string(), input.name.as_deref().unwrap_or(""));
            (line, count)
        }
        Output::Offsets => {
            let pairs = tok.tokenize_with_offsets(&input.text);
            let mut out = String::new();
            if labelled {
                out.push_str(&format!("# {}\n", input.name.as_deref().unwrap_or("stdin")));
            }
            for &(id, offset) in &pairs {
                let piece = tok.id_to_token(id).unwrap_or("");
                out.push_str(&format!("{}\t{}\t{}\n", id, offset, piece));
            }
            (out, pairs.len())
        }
        Output::Pack => {
            let ids = tok.tokenize(&input.text);
            let mut obj = ModelInput::from_ids(&ids, config.max_len).to_json(config.base64);
            if let Some(name) = input.name.as_deref().filter(|_| labelled) {
                obj["name"] = serde_json::json!(name);
            }
            (format!("{}\n", obj), ids.len())
        }
    }
}

fn main() {
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if config.version {
        println!("bertok {}", VERSION);
        return;
    }
    if config.help {
        print_help();
        return;
    }

    init_logging();

    let cell = TokenizerCell::new(source_for(&config.vocab));
    let tok = cell.get_or_load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let inputs = read_inputs(&config.paths);
    let labelled = inputs.len() > 1;

    let rendered: Vec<(String, usize)> = if labelled {
        inputs
            .par_iter()
            .map(|input| render(&tok, &config, input, labelled))
            .collect()
    } else {
        inputs
            .iter()
            .map(|input| render(&tok, &config, input, labelled))
            .collect()
    };
    for (chunk, _) in &rendered {
        print!("{}", chunk);
    }

    if config.output == Output::Count && labelled {
        let total: usize = rendered.iter().map(|(_, n)| n).sum();
        print!("{}", format_line(&total.to_string(), "total"));
    }
}
