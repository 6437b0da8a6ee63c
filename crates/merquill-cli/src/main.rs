use futures::executor::block_on;
use merquill::render::{
    CommandHost, EngineConfig, PreconditionFailure, RenderOptions, RenderResult, SafeRenderer,
    Theme,
};
use merquill::validate::KNOWN_KEYWORDS;
use merquill::{DiagramVariant, ValidateOptions, validate};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MERQUILL_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Description(merquill::Error),
    Json(serde_json::Error),
    Precondition(PreconditionFailure),
    Invalid(String),
    Fallback(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Description(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Precondition(err) => write!(f, "{err}"),
            CliError::Invalid(msg) => write!(f, "invalid definition: {msg}"),
            CliError::Fallback(msg) => write!(f, "render failed: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<merquill::Error> for CliError {
    fn from(value: merquill::Error) -> Self {
        Self::Description(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<PreconditionFailure> for CliError {
    fn from(value: PreconditionFailure) -> Self {
        Self::Precondition(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Serialize,
    Validate,
    Render,
    Keywords,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    with_meta: bool,
    suppress_errors: bool,
    mmdc: Option<String>,
    container_id: Option<String>,
    theme: Option<Theme>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "merquill-cli\n\
\n\
USAGE:\n\
  merquill-cli [serialize] [--meta] [--pretty] [<path>|-]\n\
  merquill-cli validate [--suppress-errors] [--pretty] [<path>|-]\n\
  merquill-cli render [--mmdc <bin>] [--id <container>] [--theme <theme>] [--suppress-errors] [--out <path>] [<path>|-]\n\
  merquill-cli keywords\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - serialize reads a JSON or YAML diagram description and prints Mermaid notation;\n\
    --meta prints the full result object as JSON instead.\n\
  - validate exits with status 1 when the definition is invalid.\n\
  - render prints SVG; when rendering fails it prints the fallback block and exits with status 4.\n\
  - Set MERQUILL_LOG (e.g. MERQUILL_LOG=debug) to control diagnostics on stderr.\n\
"
}

fn parse_theme(raw: &str) -> Option<Theme> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase())).ok()
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "serialize" => args.command = Command::Serialize,
            "validate" => args.command = Command::Validate,
            "render" => args.command = Command::Render,
            "keywords" => args.command = Command::Keywords,
            "--pretty" => args.pretty = true,
            "--meta" => args.with_meta = true,
            "--suppress-errors" => args.suppress_errors = true,
            "--mmdc" => {
                let Some(bin) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.mmdc = Some(bin.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.container_id = Some(id.clone());
            }
            "--theme" => {
                let Some(theme) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.theme = Some(parse_theme(theme).ok_or(CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// JSON unless the file says YAML; stdin is sniffed by its first character.
fn decode_description(input: Option<&str>, text: &str) -> Result<DiagramVariant, CliError> {
    let is_yaml = match input.map(Path::new) {
        Some(path) if path != Path::new("-") => path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml")),
        _ => !text.trim_start().starts_with('{'),
    };
    let variant = if is_yaml {
        DiagramVariant::from_yaml_str(text)?
    } else {
        DiagramVariant::from_json_str(text)?
    };
    Ok(variant)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(stdout)?;
            }
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Keywords => {
            let mut stdout = std::io::stdout().lock();
            for keyword in KNOWN_KEYWORDS {
                writeln!(stdout, "{keyword}")?;
            }
            Ok(())
        }
        Command::Serialize => {
            let text = read_input(args.input.as_deref())?;
            let variant = decode_description(args.input.as_deref(), &text)?;
            let result = merquill::serialize(&variant);
            tracing::debug!(diagram = %result.kind, valid = result.is_valid, "serialized description");
            if args.with_meta {
                return write_json(&result, args.pretty);
            }
            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }
            write_text(&result.definition, args.out.as_deref())
        }
        Command::Validate => {
            let text = read_input(args.input.as_deref())?;
            let options = ValidateOptions {
                suppress_errors: args.suppress_errors,
            };
            let report = validate(&text, options);
            write_json(&report, args.pretty)?;
            if !report.is_valid {
                return Err(CliError::Invalid(report.errors.join("; ")));
            }
            Ok(())
        }
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            let host = match args.mmdc.as_deref() {
                Some(bin) => CommandHost::new(bin),
                None => CommandHost::default(),
            };
            let config = EngineConfig {
                theme: args.theme.unwrap_or_default(),
                ..Default::default()
            };
            let renderer = SafeRenderer::new(host).with_engine_config(config);
            let options = RenderOptions {
                suppress_errors: args.suppress_errors,
            };
            let result = block_on(renderer.render(
                &text,
                args.container_id.as_deref(),
                options,
            ))?;
            write_text(result.markup(), args.out.as_deref())?;
            match result {
                RenderResult::Success(_) => Ok(()),
                RenderResult::Failure { error, .. } => Err(CliError::Fallback(error.to_string())),
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Fallback(_)) => {
            eprintln!("{err}");
            std::process::exit(4);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
