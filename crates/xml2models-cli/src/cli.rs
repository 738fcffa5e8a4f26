//! Command-line interface for the xml2models utility
//!
//! `xml2models <infile> [outfile] [--json]`: extract the model, optionally dump
//! it as JSON on stdout, render the template and write the result.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use xml2models::core::logging::init_logging;
use xml2models::model::{JsonRenderer, ModelDatabase, ModelParser, TemplateRenderer};
use xml2models::{GeneratorConfig, Parser as _, Renderer as _};

/// Name recorded as `filename` when the model is read from stdin
pub const STDIN_FILENAME: &str = "<stdin>";

/// xml2models - Generate data-model source code from XML model descriptions
#[derive(Parser)]
#[command(name = "xml2models")]
#[command(about = "Convert an XML data-model description into model source code")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Input XML model file (use - for stdin)
    pub infile: PathBuf,

    /// Output file for the generated code (omit or use - for stdout)
    pub outfile: Option<PathBuf>,

    /// Also print the extracted model as JSON to stdout
    #[arg(short, long)]
    pub json: bool,

    /// Directory searched for templates [env: XML2MODELS_TEMPLATE_DIR] [default: templates]
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Template to render [env: XML2MODELS_TEMPLATE] [default: models.py.j2]
    #[arg(long)]
    pub template: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json) [env: XML2MODELS_LOG_FORMAT] [default: compact]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Template configuration: flags over environment over defaults
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::from_env();
        if let Some(dir) = &self.template_dir {
            config.template_dir = dir.clone();
        }
        if let Some(name) = &self.template {
            config.template_name = name.clone();
        }
        config
    }

    /// Level and format handed to `init_logging`.
    ///
    /// `--log-level` wins and `--verbose` bumps the default to info. Whatever
    /// is left as `None` falls back to the environment inside `init_logging`.
    pub fn log_settings(&self) -> (Option<&'static str>, Option<&'static str>) {
        let level = self
            .log_level
            .map(|l| l.as_str())
            .or(if self.verbose { Some("info") } else { None });
        (level, self.log_format.map(|f| f.as_str()))
    }
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Main CLI application
pub struct Xml2ModelsApp {
    parser: ModelParser,
    json: JsonRenderer,
}

impl Xml2ModelsApp {
    pub fn new() -> Self {
        Self {
            parser: ModelParser::new(),
            json: JsonRenderer::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        let (level, format) = cli.log_settings();
        if let Err(e) = init_logging(level, format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("xml2models v{}", env!("CARGO_PKG_VERSION"));
        }

        let config = cli.generator_config();
        self.generate(&cli.infile, cli.outfile.as_deref(), cli.json, &config, cli.verbose)
    }

    /// Extract, optionally dump, render and write
    pub fn generate(
        &self,
        infile: &Path,
        outfile: Option<&Path>,
        json: bool,
        config: &GeneratorConfig,
        verbose: bool,
    ) -> Result<()> {
        let (content, filename) = self.read_input(infile)?;

        if verbose {
            eprintln!("Read {} bytes from {}", content.len(), filename);
        }

        let database = self.extract(&content, &filename)?;

        if json {
            println!("{}", self.json.render(&database)?);
        }

        let renderer = TemplateRenderer::from_config(config);
        let output = renderer.render(&database).with_context(|| {
            format!(
                "Failed to render template '{}'",
                config.template_path().display()
            )
        })?;

        if verbose {
            eprintln!(
                "Generated {} classes and {} relations",
                database.class_count(),
                database.relation_count()
            );
        }

        self.write_output(outfile, &output)
    }

    /// Run the extractor over already-read document text
    pub fn extract(&self, content: &str, filename: &str) -> Result<ModelDatabase> {
        let mut database = ModelDatabase::new(filename);
        self.parser
            .parse(content, &mut database)
            .with_context(|| format!("Failed to extract model from '{}'", filename))?;
        Ok(database)
    }

    /// Read input from file or stdin, returning the text and the name to record
    pub fn read_input(&self, input: &Path) -> Result<(String, String)> {
        if input.as_os_str() == "-" {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read model from stdin")?;
            return Ok((content, STDIN_FILENAME.to_string()));
        }

        let content = fs::read_to_string(input)
            .map_err(|e| anyhow!("Failed to read input file '{}': {}", input.display(), e))?;
        Ok((content, input.display().to_string()))
    }

    /// Write output to file or stdout
    ///
    /// Files are written through a temporary sibling that replaces the target
    /// only once the whole text is on disk.
    pub fn write_output(&self, output: Option<&Path>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.as_os_str() != "-" => {
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
                    anyhow!("Failed to create output file in '{}': {}", dir.display(), e)
                })?;
                file.write_all(content.as_bytes())?;
                file.persist(path).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
                info!(path = %path.display(), bytes = content.len(), "Wrote output");
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for Xml2ModelsApp {
    fn default() -> Self {
        Self::new()
    }
}
