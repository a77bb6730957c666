// ABOUTME: CLI for the rscore text primitives.
// ABOUTME: Runs one operation on an argument or stdin and prints the result, optionally as JSON.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rscore_text::{
    case_insensitive_contains, collapse_whitespace, digest_bytes, escape_xml, filename,
    looks_like_url, normalize_scheme, strip_http_scheme, strip_prefix, strip_suffix, strip_tags,
    to_plain_text, trim_whitespace, Digest,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Clean, classify and hash feed text.
#[derive(Parser, Debug)]
#[command(name = "rscore")]
#[command(about = "Clean, classify and hash feed text", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print {"op", "input", "output"} as JSON instead of the bare result.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trim the ends and collapse internal whitespace runs to one space.
    Collapse { text: Option<String> },

    /// Trim leading and trailing space, tab, CR and LF.
    Trim { text: Option<String> },

    /// Remove markup, optionally keeping only the first N characters.
    StripTags {
        text: Option<String>,

        /// Maximum characters to keep; 0 or negative keeps everything.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        max_chars: i64,
    },

    /// Strip tags, decode entities and collapse whitespace.
    PlainText { text: Option<String> },

    /// Escape & < > " ' as XML entities.
    EscapeXml { text: Option<String> },

    /// MD5 of the UTF-8 text as 32 lowercase hex characters.
    Md5 { text: Option<String> },

    /// Report whether the text looks like a URL.
    LooksLikeUrl { text: Option<String> },

    /// Rewrite feed: and feeds: schemes to http: and https:.
    NormalizeScheme { text: Option<String> },

    /// Remove a leading http:// or https://.
    StripScheme { text: Option<String> },

    /// Remove a prefix if present.
    StripPrefix {
        text: Option<String>,

        #[arg(long)]
        affix: String,

        #[arg(long, default_value_t = false)]
        case_sensitive: bool,
    },

    /// Remove a suffix if present.
    StripSuffix {
        text: Option<String>,

        #[arg(long)]
        affix: String,

        #[arg(long, default_value_t = false)]
        case_sensitive: bool,
    },

    /// Report whether the text contains NEEDLE, ignoring case.
    Contains {
        text: Option<String>,

        #[arg(long)]
        needle: String,
    },

    /// Last path component of a path or URL.
    Filename { text: Option<String> },
}

#[derive(Debug)]
enum Output {
    Text(String),
    Bool(bool),
    Digest(Digest),
}

impl Output {
    fn to_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            Output::Text(s) => json!(s),
            Output::Bool(b) => json!(b),
            Output::Digest(d) => serde_json::to_value(d)?,
        };
        Ok(value)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let (op, input, output) = run(args.command)?;
    tracing::debug!(op, input_len = input.len(), "ran operation");

    if args.json {
        let value = json!({
            "op": op,
            "input": input,
            "output": output.to_json()?,
        });
        println!("{}", serde_json::to_string(&value)?);
    } else {
        match output {
            Output::Text(s) => println!("{}", s),
            Output::Bool(b) => println!("{}", b),
            Output::Digest(d) => println!("{:x}", d),
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<(&'static str, String, Output)> {
    let result = match command {
        Command::Collapse { text } => {
            let input = load_text(text)?;
            let out = Output::Text(collapse_whitespace(&input).into_owned());
            ("collapse", input, out)
        }
        Command::Trim { text } => {
            let input = load_text(text)?;
            let out = Output::Text(trim_whitespace(&input).to_string());
            ("trim", input, out)
        }
        Command::StripTags { text, max_chars } => {
            let input = load_text(text)?;
            let out = Output::Text(strip_tags(&input, max_chars).into_owned());
            ("strip-tags", input, out)
        }
        Command::PlainText { text } => {
            let input = load_text(text)?;
            let out = Output::Text(to_plain_text(&input).into_owned());
            ("plain-text", input, out)
        }
        Command::EscapeXml { text } => {
            let input = load_text(text)?;
            let out = Output::Text(escape_xml(&input).into_owned());
            ("escape-xml", input, out)
        }
        Command::Md5 { text } => {
            let input = load_text(text)?;
            let out = Output::Digest(digest_bytes(&input));
            ("md5", input, out)
        }
        Command::LooksLikeUrl { text } => {
            let input = load_text(text)?;
            let out = Output::Bool(looks_like_url(&input));
            ("looks-like-url", input, out)
        }
        Command::NormalizeScheme { text } => {
            let input = load_text(text)?;
            let out = Output::Text(normalize_scheme(&input).into_owned());
            ("normalize-scheme", input, out)
        }
        Command::StripScheme { text } => {
            let input = load_text(text)?;
            let out = Output::Text(strip_http_scheme(&input).to_string());
            ("strip-scheme", input, out)
        }
        Command::StripPrefix {
            text,
            affix,
            case_sensitive,
        } => {
            let input = load_text(text)?;
            let out = Output::Text(strip_prefix(&input, &affix, case_sensitive).to_string());
            ("strip-prefix", input, out)
        }
        Command::StripSuffix {
            text,
            affix,
            case_sensitive,
        } => {
            let input = load_text(text)?;
            let out = Output::Text(strip_suffix(&input, &affix, case_sensitive).to_string());
            ("strip-suffix", input, out)
        }
        Command::Contains { text, needle } => {
            let input = load_text(text)?;
            let out = Output::Bool(case_insensitive_contains(&input, &needle));
            ("contains", input, out)
        }
        Command::Filename { text } => {
            let input = load_text(text)?;
            let out = Output::Text(filename(&input).into_owned());
            ("filename", input, out)
        }
    };
    Ok(result)
}

/// The positional TEXT, or all of stdin when it is missing or "-".
fn load_text(text: Option<String>) -> Result<String> {
    match text {
        Some(t) if t != "-" => Ok(t),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf)
        }
    }
}
