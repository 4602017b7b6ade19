//! Minimal CLI: schema → (definition | declarations)
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use tracing::debug;

use crate::codegen::{Codegen, Definition, Settings, DEFAULT_MAX_DEPTH};
use crate::document::Document;
use crate::indent::INDENT_SIZE;
use crate::ir::Schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn JSON-Schema / OpenAPI component schemas into type definitions
#[derive(Parser, Debug)]
#[command(name = "schema-typedef", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print `{ dependencies, body }` for each input schema as JSON
    Definition(DefinitionOut),
    /// emit `type Name = <body>;` for every `components.schemas` entry
    Declarations(DeclarationsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone, Copy)]
struct CodegenSettings {
    /// give up on schemas nested deeper than this
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// spaces per indentation step inside object bodies
    #[arg(long, default_value_t = INDENT_SIZE)]
    indent_size: usize,
}

#[derive(clap::Parser, Debug)]
struct DefinitionOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    codegen: CodegenSettings,

    /// JSON Pointer to select the schema in each document (e.g. /components/schemas/Pet)
    #[arg(long)]
    json_pointer: Option<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct DeclarationsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    codegen: CodegenSettings,

    /// prefix each declaration with `export`
    #[arg(long, default_value_t = false)]
    export: bool,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(&Path, Vec<u8>) -> Result<()>) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            debug!(path = %source_path.display(), "reading input");
            let source = std::fs::read(&source_path)
                .with_context(|| format!("failed to read source file {}", source_path.display()))?;
            apply(&source_path, source)?;
        }
        Ok(())
    }
}

impl From<CodegenSettings> for Codegen {
    fn from(settings: CodegenSettings) -> Self {
        Codegen::with_settings(Settings {
            max_depth: settings.max_depth,
            indent_size: settings.indent_size,
        })
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Definition(target) => {
                let codegen = Codegen::from(target.codegen);
                let mut definitions = IndexMap::<String, Definition>::new();
                target.input_settings.load_process(|path, source| {
                    let label = path.to_string_lossy().to_string();
                    let document = crate::path_de::from_slice_with_path::<serde_json::Value>(&source)
                        .with_context(|| format!("failed to parse JSON source file ({label})"))?;
                    let node = match target.json_pointer.as_deref() {
                        None => &document,
                        Some(pointer) => document
                            .pointer(pointer)
                            .ok_or_else(|| anyhow!("no value at `{pointer}` in {label}"))?,
                    };
                    let schema = Schema::from_value(node)
                        .with_context(|| format!("unsupported schema in {label}"))?;
                    let definition = codegen
                        .generate(&schema)
                        .with_context(|| format!("failed to generate type for {label}"))?;
                    definitions.insert(label, definition);
                    Ok(())
                })?;
                let json_src = serde_json::to_string_pretty(&definitions)?;
                write_output(target.out.as_deref(), &json_src)
            }
            Command::Declarations(target) => {
                let codegen = Codegen::from(target.codegen);
                let mut declarations = Vec::<String>::new();
                target.input_settings.load_process(|path, source| {
                    let label = path.to_string_lossy().to_string();
                    let document = Document::from_slice(&source)
                        .with_context(|| format!("failed to parse OpenAPI document ({label})"))?;
                    for (name, definition) in document.definitions(&codegen) {
                        let definition = definition
                            .with_context(|| format!("failed to generate type `{name}` ({label})"))?;
                        debug!(schema = name, dependencies = ?definition.dependencies, "generated");
                        declarations.push(render_declaration(name, &definition, target.export));
                    }
                    Ok(())
                })?;
                if declarations.is_empty() {
                    bail!("no schemas found under components.schemas");
                }
                write_output(target.out.as_deref(), &declarations.join("\n\n"))
            }
        }
    }
}

/// `type Name = <body>;`, optionally exported.
pub fn render_declaration(name: &str, definition: &Definition, export: bool) -> String {
    let export = if export { "export " } else { "" };
    format!("{export}type {name} = {};", definition.body)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, format!("{text}\n"))
        .with_context(|| format!("failed to write {}", out.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                // explicit glob that matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
