use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::EnvFilter;

use numfield::{
    DocumentFormat, FormDefinition, NumericFormUI, OutputDestination, OutputOptions, UiOptions,
    parse_form_definition_str,
};

#[derive(Debug, Parser)]
#[command(
    name = "numfield",
    version,
    about = "Edit constrained numeric fields in the terminal"
)]
struct Cli {
    /// Form definition: file path, inline payload, or "-" for stdin
    #[arg(short = 'f', long = "form", value_name = "SPEC")]
    form: String,

    /// Title shown above the fields
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Decimal separator of the active locale (overrides the form definition)
    #[arg(long = "decimal-separator", value_name = "CHAR")]
    decimal_separator: Option<char>,

    /// Digit group separator accepted while parsing (overrides the form definition)
    #[arg(long = "group-separator", value_name = "CHAR")]
    group_separator: Option<char>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Normalize the initial values and print them without opening the UI
    #[arg(long = "no-ui")]
    no_ui: bool,

    /// Write diagnostics to this file (filtered by RUST_LOG, default "info")
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let mut diagnostics = DiagnosticCollector::default();

    let format_hint = format_from_path(&cli.form);
    let definition = match load_definition(&cli.form, format_hint) {
        Ok(definition) => Some(definition),
        Err(err) => {
            diagnostics.push_input("form", format!("{err:#}"));
            None
        }
    };
    let output = build_output_options(&cli, format_hint, &mut diagnostics);
    diagnostics.into_result()?;

    let Some(definition) = definition else {
        return Err(eyre!("no form definition loaded"));
    };
    info!(fields = definition.fields.len(), "form definition loaded");

    let format = {
        let mut format = definition.number_format();
        if let Some(separator) = cli.decimal_separator {
            format = format.with_decimal_separator(separator);
        }
        if cli.group_separator.is_some() {
            format = format.with_group_separator(cli.group_separator);
        }
        format
    };
    if format.group_separator == Some(format.decimal_separator) {
        return Err(eyre!(
            "decimal and group separators must differ (both are '{}')",
            format.decimal_separator
        ));
    }

    let mut ui = NumericFormUI::new(definition)
        .with_options(UiOptions::default().with_number_format(format))
        .with_output(output);
    if let Some(title) = cli.title.as_ref() {
        ui = ui.with_title(title.clone());
    }

    if cli.no_ui {
        ui.evaluate().map_err(Report::msg)?;
    } else {
        ui.run().map_err(Report::msg)?;
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_definition(spec: &str, format: Option<DocumentFormat>) -> Result<FormDefinition> {
    let (contents, label) = if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        (buffer, "stdin")
    } else {
        match fs::read_to_string(spec) {
            Ok(contents) => (contents, "file"),
            Err(_) if !Path::new(spec).exists() => (spec.to_string(), "inline"),
            Err(err) => {
                return Err(Report::new(err).wrap_err(format!("failed to read file {spec}")));
            }
        }
    };
    parse_contents(&contents, format, label)
}

fn parse_contents(
    contents: &str,
    format: Option<DocumentFormat>,
    label: &str,
) -> Result<FormDefinition> {
    let primary = format.unwrap_or_default();
    match parse_form_definition_str(contents, primary) {
        Ok(definition) => Ok(definition),
        Err(first) => {
            if format.is_none() {
                for candidate in DocumentFormat::available_formats() {
                    if candidate == primary {
                        continue;
                    }
                    if let Ok(definition) = parse_form_definition_str(contents, candidate) {
                        return Ok(definition);
                    }
                }
            }
            Err(eyre!(
                "failed to parse {label} form definition: tried {} (first error: {first:#})",
                format_list()
            ))
        }
    }
}

fn format_from_path(spec: &str) -> Option<DocumentFormat> {
    if spec == "-" {
        return None;
    }
    Path::new(spec)
        .extension()
        .and_then(|ext| DocumentFormat::from_extension(&ext.to_string_lossy()))
}

fn format_list() -> String {
    DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn build_output_options(
    cli: &Cli,
    input_hint: Option<DocumentFormat>,
    diagnostics: &mut DiagnosticCollector,
) -> OutputOptions {
    let mut destinations = Vec::new();
    let mut detected: Option<DocumentFormat> = None;

    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
            continue;
        }
        let path = PathBuf::from(raw);
        if path.exists() && !cli.force {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
        match format_from_path(raw) {
            Some(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                _ => detected = Some(format),
            },
            None => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use {}",
                path.display(),
                format_list()
            )),
        }
        destinations.push(OutputDestination::File(path));
    }

    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    OutputOptions::new(detected.or(input_hint).unwrap_or_default())
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations)
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_format_from_extension() {
        assert_eq!(format_from_path("form.json"), Some(DocumentFormat::Json));
        assert_eq!(format_from_path("form.txt"), None);
        assert_eq!(format_from_path("-"), None);
    }

    #[test]
    fn inline_definitions_parse() {
        let definition =
            parse_contents(r#"{"fields": [{"name": "a"}]}"#, None, "inline").unwrap();
        assert_eq!(definition.fields[0].name, "a");
    }

    #[test]
    fn reports_unparseable_definitions() {
        let err = parse_contents("not a form", None, "inline").unwrap_err();
        assert!(err.to_string().contains("failed to parse inline form definition"));
    }
}
