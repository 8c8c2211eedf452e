// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Morphir decorations CLI
//!
//! Validate, query and edit the decorations configured for a Morphir project,
//! and manage the catalog of reusable decoration types.
//!
//! # Usage
//!
//! ```bash
//! # Check every configured values file against its schema
//! morphir-deco validate
//!
//! # Configure a decoration from a registered type
//! morphir-deco setup shape --type shape
//!
//! # Show the decorations attached to one node
//! morphir-deco get My.Package:Foo:bar --type documentation
//!
//! # Set a value (checked against the schema before it is written)
//! morphir-deco set My.Package:Foo:bar --type shape --value '["Unit",[]]'
//!
//! # Register a decoration type in the user's global catalog
//! morphir-deco type register shape --ir shape-ir.json \
//!     --entry-point My.Decoration:Foo:shape --global
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::SecondsFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use morphir_decorations::{
    load_and_attach_decorations, load_decoration_ir, remove_decoration_value_for_node_path,
    save_decoration_values, set_decoration_value_for_node_path, validate_decoration_type,
    validate_decoration_value, validate_decoration_value_file, validate_entry_point,
    AttachedDistribution, DecorationConfig, DecorationFilter, DecorationId, DecorationIr,
    DecorationStats, DecorationType, DecorationValue, DecorationValues, ProjectDecorations,
    RegistryPaths, RegistrySource, TypeRegistry, ValidationResult,
};
use morphir_ir::{codec, Distribution, NodePath};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "morphir-deco")]
#[command(author = "naskel.com")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate, query and edit Morphir decorations")]
#[command(long_about = None)]
struct Cli {
    /// Project directory holding morphir.json (or morphir.toml)
    #[arg(short, long, default_value = ".", global = true)]
    project_dir: PathBuf,

    /// Project IR file, relative to the project directory
    #[arg(long, default_value = "morphir-ir.json", global = true)]
    project_ir: PathBuf,

    /// Verbose mode (show internal logs)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate every configured values file against its schema
    Validate {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add or replace a decoration in the project config
    Setup(SetupArgs),

    /// List decorated nodes
    List {
        /// Only nodes carrying this decoration kind
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show the decorations on one node
    Get {
        /// Node path, e.g. My.Package:Foo:bar
        node: String,

        /// Only this decoration kind
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Summary counts
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Set one node's value for a decoration kind
    Set {
        node: String,

        #[arg(short = 't', long = "type")]
        kind: String,

        /// Encoded Morphir IR value (JSON)
        #[arg(long)]
        value: String,

        /// Write without checking the value against the schema
        #[arg(long)]
        no_validate: bool,
    },

    /// Remove one node's value for a decoration kind
    Remove {
        node: String,

        #[arg(short = 't', long = "type")]
        kind: String,
    },

    /// Manage the decoration type catalog
    #[command(subcommand)]
    Type(TypeCommand),
}

#[derive(Args)]
struct SetupArgs {
    /// Decoration id; derived from the schema package name when omitted
    id: Option<String>,

    /// Take the schema and entry point from a registered decoration type
    #[arg(long = "type", value_name = "TYPE", conflicts_with_all = ["ir", "entry_point"])]
    registered: Option<String>,

    /// Schema IR file
    #[arg(short, long, required_unless_present = "registered")]
    ir: Option<PathBuf>,

    /// Entry point, e.g. My.Decoration:Foo:shape
    #[arg(short, long, required_unless_present = "registered")]
    entry_point: Option<String>,

    /// Values file, relative to the project directory [default: <id>-values.json]
    #[arg(long)]
    storage_location: Option<PathBuf>,

    #[arg(long)]
    display_name: Option<String>,
}

#[derive(Subcommand)]
enum TypeCommand {
    /// Register (or replace) a decoration type
    Register {
        id: String,

        /// Schema IR file
        #[arg(long)]
        ir: PathBuf,

        /// Entry point, e.g. My.Decoration:Foo:shape
        #[arg(long)]
        entry_point: String,

        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// List registered types across all scopes
    List {
        /// Only types from this scope
        #[arg(long, value_enum)]
        source: Option<SourceArg>,
    },

    /// Show one registered type
    Show { id: String },

    /// Remove a registered type
    Unregister {
        id: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },
}

#[derive(Args)]
struct ScopeArgs {
    /// Use the user's global catalog instead of the workspace one
    #[arg(long)]
    global: bool,
}

impl ScopeArgs {
    fn source(&self) -> RegistrySource {
        if self.global {
            RegistrySource::Global
        } else {
            RegistrySource::Workspace
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Workspace,
    Global,
    System,
}

impl From<SourceArg> for RegistrySource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Workspace => RegistrySource::Workspace,
            SourceArg::Global => RegistrySource::Global,
            SourceArg::System => RegistrySource::System,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("morphir_decorations=debug,morphir_deco=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("morphir_decorations=info,morphir_deco=info"))
    };
    fmt().with_env_filter(filter).with_target(false).init();

    match &cli.command {
        Command::Validate { json } => cmd_validate(&cli, *json),
        Command::Setup(args) => cmd_setup(&cli, args).map(|_| ()),
        Command::List { kind, json } => cmd_list(&cli, kind.as_deref(), *json),
        Command::Get { node, kind, json } => cmd_get(&cli, node, kind.as_deref(), *json),
        Command::Stats { json } => cmd_stats(&cli, *json),
        Command::Set {
            node,
            kind,
            value,
            no_validate,
        } => cmd_set(&cli, node, kind, value, !*no_validate),
        Command::Remove { node, kind } => cmd_remove(&cli, node, kind),
        Command::Type(cmd) => cmd_type(&cli, cmd),
    }
}

// ---------------------------------------------------------------------------
// Project loading
// ---------------------------------------------------------------------------

/// `morphir.json`, or `morphir.toml` when only that one exists.
fn project_config_path(project_dir: &Path) -> PathBuf {
    let json = project_dir.join("morphir.json");
    let toml = project_dir.join("morphir.toml");
    if !json.exists() && toml.exists() {
        toml
    } else {
        json
    }
}

fn load_project(cli: &Cli) -> Result<ProjectDecorations> {
    let path = project_config_path(&cli.project_dir);
    let project = ProjectDecorations::from_file(&path)
        .with_context(|| format!("Failed to load project config {}", path.display()))?
        .resolve_relative_to(&cli.project_dir);
    project.validate().context("Invalid decorations config")?;
    debug!(decorations = project.len(), "project loaded");
    Ok(project)
}

fn decoration_config<'a>(project: &'a ProjectDecorations, kind: &str) -> Result<&'a DecorationConfig> {
    match project.get(&DecorationId::from(kind)) {
        Some(config) => Ok(config),
        None => bail!("decoration '{kind}' is not configured in morphir.json"),
    }
}

fn load_distribution(cli: &Cli) -> Result<Distribution> {
    let path = cli.project_dir.join(&cli.project_ir);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read project IR {}", path.display()))?;
    codec::decode_distribution_file_payload(&bytes)
        .with_context(|| format!("Failed to decode project IR {}", path.display()))
}

fn attach(cli: &Cli) -> Result<AttachedDistribution> {
    let project = load_project(cli)?;
    let distribution = load_distribution(cli)?;
    load_and_attach_decorations(distribution, &project, false)
        .context("Failed to attach decorations")
}

fn parse_node(node: &str) -> Result<NodePath> {
    node.parse()
        .with_context(|| format!("Invalid node path {node:?}"))
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

/// `path` relative to `base` when it lies inside it, otherwise unchanged.
fn relative_to(base: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) if path.is_absolute() && !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_validate(cli: &Cli, as_json: bool) -> Result<()> {
    let project = load_project(cli)?;
    let mut reports = Vec::new();
    let mut all_valid = true;

    for (id, config) in project.iter() {
        let dec_ir = load_decoration_ir(&config.ir)
            .with_context(|| format!("Failed to load schema for '{id}'"))?;
        let result = validate_decoration_value_file(&dec_ir, &config.entry_point, &config.storage_location)
            .with_context(|| format!("Failed to load values for '{id}'"))?;
        all_valid &= result.valid;
        reports.push((id.clone(), result));
    }

    if as_json {
        let report: Vec<_> = reports
            .iter()
            .map(|(id, result)| validation_report_json(id, result))
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (id, result) in &reports {
            print_validation_report(id, result);
        }
    }

    if !all_valid {
        bail!("decoration validation failed");
    }
    info!(decorations = reports.len(), "all decorations valid");
    Ok(())
}

fn validation_report_json(id: &DecorationId, result: &ValidationResult) -> serde_json::Value {
    json!({
        "decoration": id,
        "valid": result.valid,
        "checked": result.checked,
        "errors": result
            .errors
            .iter()
            .map(|e| json!({"nodePath": e.node_path, "message": e.to_string()}))
            .collect::<Vec<_>>(),
    })
}

fn print_validation_report(id: &DecorationId, result: &ValidationResult) {
    let status = if result.valid { "[OK]" } else { "[FAIL]" };
    println!(
        "{status} {id}: {} checked, {} error(s)",
        result.checked,
        result.error_count()
    );
    for error in &result.errors {
        println!("    {error}");
    }
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Camel-cased last name of the schema package, e.g. `My.Shape.Marker` gives `marker`.
fn derive_decoration_id(dec_ir: &DecorationIr) -> Result<DecorationId> {
    match dec_ir.package_name().names().last() {
        Some(name) => Ok(DecorationId::from(name.to_camel_case())),
        None => bail!("decoration id is required: the schema package name is empty"),
    }
}

fn default_display_name(id: &DecorationId) -> String {
    let mut chars = id.as_str().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn cmd_setup(cli: &Cli, args: &SetupArgs) -> Result<DecorationId> {
    let (ir, entry_point, registered_name) = match &args.registered {
        Some(type_id) => {
            let registry = RegistryPaths::standard(Some(&cli.project_dir)).load_merged()?;
            let Some(dec_type) = registry.get(type_id) else {
                bail!("decoration type '{type_id}' is not registered");
            };
            (
                dec_type.ir_path.clone(),
                dec_type.entry_point.clone(),
                Some(dec_type.display_name.clone()).filter(|name| !name.is_empty()),
            )
        }
        None => match (&args.ir, &args.entry_point) {
            (Some(ir), Some(entry_point)) => (absolute_path(ir)?, entry_point.clone(), None),
            _ => bail!("either --type or both --ir and --entry-point are required"),
        },
    };

    let dec_ir = load_decoration_ir(&ir)
        .with_context(|| format!("Failed to load schema {}", ir.display()))?;
    validate_entry_point(&dec_ir, &entry_point)
        .with_context(|| format!("Invalid entry point '{entry_point}'"))?;

    let id = match &args.id {
        Some(id) => DecorationId::from(id.as_str()),
        None => derive_decoration_id(&dec_ir)?,
    };
    let display_name = args
        .display_name
        .clone()
        .or(registered_name)
        .unwrap_or_else(|| default_display_name(&id));
    let storage_location = args
        .storage_location
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{id}-values.json")));

    let project_dir = absolute_path(&cli.project_dir)?;
    let config = DecorationConfig::builder()
        .display_name(display_name)
        .ir(relative_to(&project_dir, &ir))
        .entry_point(entry_point)
        .storage_location(relative_to(&project_dir, &storage_location))
        .build();

    let config_path = project_config_path(&cli.project_dir);
    ProjectDecorations::save_decoration(&config_path, &id, &config)
        .with_context(|| format!("Failed to update {}", config_path.display()))?;

    let values_path = config.resolve_relative_to(&project_dir).storage_location;
    if !values_path.exists() {
        save_decoration_values(&values_path, &DecorationValues::empty())
            .with_context(|| format!("Failed to create {}", values_path.display()))?;
        info!(path = %values_path.display(), "created empty decoration values file");
    }

    println!("[OK] Decoration '{id}' configured");
    println!("  Display name: {}", config.display_name);
    println!("  Entry point:  {}", config.entry_point);
    println!("  IR:           {}", config.ir.display());
    println!("  Storage:      {}", config.storage_location.display());
    if let Some(type_id) = &args.registered {
        println!("  Type:         {type_id} (from registry)");
    }
    Ok(id)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

fn node_listing_json(attached: &AttachedDistribution, nodes: &[NodePath]) -> serde_json::Value {
    nodes
        .iter()
        .map(|node| {
            let kinds: Vec<_> = attached.get_decorations_for_node(node).into_keys().collect();
            json!({"nodePath": node.to_string(), "decorations": kinds})
        })
        .collect()
}

fn cmd_list(cli: &Cli, kind: Option<&str>, as_json: bool) -> Result<()> {
    let attached = attach(cli)?;
    let nodes = match kind {
        Some(kind) => attached.all_nodes_with_decoration(&DecorationId::from(kind)),
        None => attached.all_nodes_with_decorations(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&node_listing_json(&attached, &nodes))?);
        return Ok(());
    }
    for node in &nodes {
        let kinds: Vec<String> = attached
            .get_decorations_for_node(node)
            .keys()
            .map(ToString::to_string)
            .collect();
        println!("{node}  [{}]", kinds.join(", "));
    }
    Ok(())
}

fn cmd_get(cli: &Cli, node: &str, kind: Option<&str>, as_json: bool) -> Result<()> {
    let node = parse_node(node)?;
    let attached = attach(cli)?;
    let filter = match kind {
        Some(kind) => DecorationFilter::only([kind]),
        None => DecorationFilter::all(),
    };

    let decorations = attached.filter_decorations_for_node(&node, &filter);
    if decorations.is_empty() {
        bail!("no decorations on {node}");
    }
    if as_json {
        println!("{}", serde_json::to_string_pretty(&decorations)?);
        return Ok(());
    }
    for (id, value) in &decorations {
        println!("{id}: {value}");
    }
    Ok(())
}

fn render_stats(stats: &DecorationStats) -> String {
    let mut out = format!(
        "Decorated nodes:   {}\nTotal decorations: {}\n",
        stats.decorated_nodes, stats.total_decorations
    );
    for (kind, count) in &stats.by_kind {
        out.push_str(&format!("  {kind}: {count}\n"));
    }
    out
}

fn cmd_stats(cli: &Cli, as_json: bool) -> Result<()> {
    let stats = attach(cli)?.stats();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_stats(&stats));
    }
    Ok(())
}

fn cmd_set(cli: &Cli, node: &str, kind: &str, value: &str, validate: bool) -> Result<()> {
    let node = parse_node(node)?;
    let project = load_project(cli)?;
    let config = decoration_config(&project, kind)?;
    let value = DecorationValue::from_json_str(value).context("Value is not valid JSON")?;

    if validate {
        let dec_ir = load_decoration_ir(&config.ir)
            .with_context(|| format!("Failed to load schema for '{kind}'"))?;
        validate_decoration_value(&dec_ir, &config.entry_point, &node, &value)?;
    }

    set_decoration_value_for_node_path(&config.storage_location, &node, value)
        .with_context(|| format!("Failed to update {}", config.storage_location.display()))?;
    info!(node = %node, decoration = kind, "value set");
    Ok(())
}

fn cmd_remove(cli: &Cli, node: &str, kind: &str) -> Result<()> {
    let node = parse_node(node)?;
    let project = load_project(cli)?;
    let config = decoration_config(&project, kind)?;

    remove_decoration_value_for_node_path(&config.storage_location, &node)
        .with_context(|| format!("Failed to update {}", config.storage_location.display()))?;
    info!(node = %node, decoration = kind, "value removed");
    Ok(())
}

// ---------------------------------------------------------------------------
// Type catalog
// ---------------------------------------------------------------------------

fn registry_path(paths: &RegistryPaths, source: RegistrySource) -> Result<&Path> {
    match paths.for_source(source) {
        Some(path) => Ok(path),
        None => bail!("no {source} registry location available"),
    }
}

fn cmd_type(cli: &Cli, cmd: &TypeCommand) -> Result<()> {
    let paths = RegistryPaths::standard(Some(&cli.project_dir));

    match cmd {
        TypeCommand::Register {
            id,
            ir,
            entry_point,
            display_name,
            description,
            scope,
        } => {
            let source = scope.source();
            let ir = absolute_path(ir)?;
            let mut dec_type = DecorationType::new(id.as_str(), ir, entry_point.as_str(), source);
            if let Some(name) = display_name {
                dec_type = dec_type.with_display_name(name.as_str());
            }
            if let Some(description) = description {
                dec_type = dec_type.with_description(description.as_str());
            }
            validate_decoration_type(&dec_type)
                .with_context(|| format!("Decoration type '{id}' is not usable"))?;

            let path = registry_path(&paths, source)?;
            let mut registry = TypeRegistry::load(path)?;
            registry.register(dec_type);
            registry.save(path)?;
            info!(id = %id, source = %source, path = %path.display(), "decoration type registered");
        }
        TypeCommand::List { source } => {
            let registry = paths.load_merged()?;
            let types = match source {
                Some(source) => registry.list_by_source((*source).into()),
                None => registry.list(),
            };
            for dec_type in types {
                println!(
                    "{:20} {:10} {}",
                    dec_type.id, dec_type.source, dec_type.entry_point
                );
            }
        }
        TypeCommand::Show { id } => {
            let registry = paths.load_merged()?;
            let Some(dec_type) = registry.get(id) else {
                bail!("decoration type '{id}' is not registered");
            };
            println!("ID:            {}", dec_type.id);
            println!("Display name:  {}", dec_type.display_name);
            if !dec_type.description.is_empty() {
                println!("Description:   {}", dec_type.description);
            }
            println!("IR:            {}", dec_type.ir_path.display());
            println!("Entry point:   {}", dec_type.entry_point);
            println!("Source:        {}", dec_type.source);
            println!(
                "Registered at: {}",
                dec_type.registered_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
        }
        TypeCommand::Unregister { id, scope } => {
            let source = scope.source();
            let path = registry_path(&paths, source)?;
            let mut registry = TypeRegistry::load(path)?;
            if !registry.unregister(id) {
                bail!("decoration type '{id}' is not registered in the {source} scope");
            }
            registry.save(path)?;
            info!(id = %id, source = %source, "decoration type unregistered");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphir_ir::{
        AccessControlled, Documented, ModuleDefinition, Name, PackageDefinition, Path as IrPath,
        Type, TypeDefinition,
    };
    use std::fs;
    use tempfile::tempdir;

    const ENTRY_POINT: &str = "My.Shape.Marker:Foo:shape";

    /// `module Foo exposing (Shape)` / `type alias Shape = ()` in package `My.Shape.Marker`.
    fn write_shape_schema(dir: &Path) -> PathBuf {
        let shape = TypeDefinition::TypeAlias {
            params: Vec::new(),
            tpe: Type::Unit(()),
        };
        let module = ModuleDefinition {
            types: vec![(
                Name::parse("shape"),
                AccessControlled::public(Documented::undocumented(shape)),
            )],
            ..Default::default()
        };
        let dist = Distribution::library(
            IrPath::parse("My.Shape.Marker"),
            PackageDefinition {
                modules: vec![(IrPath::parse("Foo"), AccessControlled::public(module))],
            },
        );
        let path = dir.join("shape-ir.json");
        fs::write(&path, codec::encode_distribution_file_payload(&dist).to_string()).unwrap();
        path
    }

    fn setup_args(cli: &Cli) -> &SetupArgs {
        match &cli.command {
            Command::Setup(args) => args,
            _ => panic!("expected setup"),
        }
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("morphir-deco").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = cli(&["validate", "--json", "--project-dir", "/tmp/proj", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, PathBuf::from("/tmp/proj"));
        assert_eq!(cli.project_ir, PathBuf::from("morphir-ir.json"));
        assert!(matches!(cli.command, Command::Validate { json: true }));
    }

    #[test]
    fn test_parse_type_register() {
        let cli = cli(&[
            "type",
            "register",
            "shape",
            "--ir",
            "shape.json",
            "--entry-point",
            "My.Decoration:Foo:shape",
            "--global",
        ]);
        match cli.command {
            Command::Type(TypeCommand::Register { id, scope, .. }) => {
                assert_eq!(id, "shape");
                assert_eq!(scope.source(), RegistrySource::Global);
            }
            _ => panic!("expected type register"),
        }
    }

    #[test]
    fn test_parse_set_requires_type() {
        let args = ["morphir-deco", "set", "A:B:c", "--value", "[]"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_node_rejects_single_segment() {
        assert!(parse_node("invalid").is_err());
        assert_eq!(parse_node("A:B:c").unwrap().to_string(), "A:B:c");
    }

    #[test]
    fn test_missing_config_is_reported() {
        let dir = tempdir().unwrap();
        let cli = cli(&["stats", "--project-dir", dir.path().to_str().unwrap()]);
        let err = load_project(&cli).unwrap_err();
        assert!(err.to_string().contains("morphir.json"));
    }

    #[test]
    fn test_unknown_decoration_kind() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("morphir.json"),
            r#"{"name": "My.Package", "decorations": {"shape": {
                "ir": "shape-ir.json", "entryPoint": "My.Decoration:Foo:shape",
                "storageLocation": "shape-values.json"}}}"#,
        )
        .unwrap();
        let cli = cli(&["stats", "--project-dir", dir.path().to_str().unwrap()]);
        let project = load_project(&cli).unwrap();

        let config = decoration_config(&project, "shape").unwrap();
        assert_eq!(config.storage_location, dir.path().join("shape-values.json"));
        assert!(decoration_config(&project, "docs").is_err());
    }

    #[test]
    fn test_parse_query_json_flags() {
        assert!(matches!(cli(&["list", "--json"]).command, Command::List { json: true, .. }));
        assert!(matches!(
            cli(&["get", "A:B:c", "-t", "shape", "--json"]).command,
            Command::Get { json: true, .. }
        ));
        assert!(matches!(cli(&["stats"]).command, Command::Stats { json: false }));
        assert!(matches!(cli(&["stats", "--json"]).command, Command::Stats { json: true }));
    }

    #[test]
    fn test_render_stats_is_plain_text() {
        let stats = DecorationStats {
            total_decorations: 3,
            decorated_nodes: 2,
            by_kind: [("docs".to_string(), 2), ("shape".to_string(), 1)].into(),
        };
        assert_eq!(
            render_stats(&stats),
            "Decorated nodes:   2\nTotal decorations: 3\n  docs: 2\n  shape: 1\n"
        );
    }

    #[test]
    fn test_absolute_path_for_registered_ir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(Path::new("shape-ir.json")).unwrap(), cwd.join("shape-ir.json"));
        assert_eq!(
            absolute_path(Path::new("/abs/shape-ir.json")).unwrap(),
            PathBuf::from("/abs/shape-ir.json")
        );
    }

    #[test]
    fn test_relative_to_project() {
        let base = Path::new("/proj");
        assert_eq!(relative_to(base, Path::new("/proj/ir/a.json")), PathBuf::from("ir/a.json"));
        assert_eq!(relative_to(base, Path::new("/elsewhere/a.json")), PathBuf::from("/elsewhere/a.json"));
        assert_eq!(relative_to(base, Path::new("a.json")), PathBuf::from("a.json"));
    }

    #[test]
    fn test_parse_setup_sources_are_exclusive() {
        let parse = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("morphir-deco").chain(args.iter().copied()))
        };
        assert!(parse(&["setup", "--type", "shape"]).is_ok());
        assert!(parse(&["setup", "-i", "a.json", "-e", "A:B:c"]).is_ok());
        assert!(parse(&["setup", "--type", "shape", "-i", "a.json"]).is_err());
        assert!(parse(&["setup", "-i", "a.json"]).is_err());
        assert!(parse(&["setup"]).is_err());
    }

    #[test]
    fn test_default_display_name() {
        assert_eq!(default_display_name(&DecorationId::from("marker")), "Marker");
        assert_eq!(default_display_name(&DecorationId::from("")), "");
    }

    #[test]
    fn test_setup_from_schema_file() {
        let dir = tempdir().unwrap();
        let schema = write_shape_schema(dir.path());
        fs::write(
            dir.path().join("morphir.json"),
            r#"{"name": "My.Package", "sourceDirectory": "src"}"#,
        )
        .unwrap();

        let cli = cli(&[
            "setup",
            "-i",
            schema.to_str().unwrap(),
            "-e",
            ENTRY_POINT,
            "--project-dir",
            dir.path().to_str().unwrap(),
        ]);
        let id = cmd_setup(&cli, setup_args(&cli)).unwrap();
        assert_eq!(id, DecorationId::from("marker"));

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("morphir.json")).unwrap())
                .unwrap();
        assert_eq!(raw["sourceDirectory"], "src");
        let entry = &raw["decorations"]["marker"];
        assert_eq!(entry["displayName"], "Marker");
        assert_eq!(entry["ir"], "shape-ir.json");
        assert_eq!(entry["storageLocation"], "marker-values.json");

        let values = fs::read_to_string(dir.path().join("marker-values.json")).unwrap();
        assert_eq!(values.trim(), "{}");

        let project = load_project(&cli).unwrap();
        let config = decoration_config(&project, "marker").unwrap();
        assert_eq!(config.ir, dir.path().join("shape-ir.json"));
        assert_eq!(config.entry_point, ENTRY_POINT);
    }

    #[test]
    fn test_setup_keeps_existing_values_file() {
        let dir = tempdir().unwrap();
        let schema = write_shape_schema(dir.path());
        let values = dir.path().join("shapes.json");
        fs::write(&values, r#"{"My.Package:Foo:bar": ["Unit", []]}"#).unwrap();

        let cli = cli(&[
            "setup",
            "shape",
            "-i",
            schema.to_str().unwrap(),
            "-e",
            ENTRY_POINT,
            "--storage-location",
            "shapes.json",
            "--display-name",
            "Shapes",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ]);
        cmd_setup(&cli, setup_args(&cli)).unwrap();

        assert!(fs::read_to_string(&values).unwrap().contains("My.Package:Foo:bar"));
        let project = load_project(&cli).unwrap();
        let config = decoration_config(&project, "shape").unwrap();
        assert_eq!(config.display_name, "Shapes");
        assert_eq!(config.storage_location, values);
    }

    #[test]
    fn test_setup_rejects_unknown_entry_point() {
        let dir = tempdir().unwrap();
        let schema = write_shape_schema(dir.path());
        let cli = cli(&[
            "setup",
            "-i",
            schema.to_str().unwrap(),
            "-e",
            "My.Shape.Marker:Foo:missing",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ]);
        assert!(cmd_setup(&cli, setup_args(&cli)).is_err());
        assert!(!dir.path().join("morphir.json").exists());
    }

    #[test]
    fn test_setup_from_registered_type() {
        let dir = tempdir().unwrap();
        let schema = write_shape_schema(dir.path());
        let paths = RegistryPaths::standard(Some(dir.path()));
        let mut registry = TypeRegistry::new();
        registry.register(
            DecorationType::new("shape", &schema, ENTRY_POINT, RegistrySource::Workspace)
                .with_display_name("Shape Marker"),
        );
        registry.save(paths.for_source(RegistrySource::Workspace).unwrap()).unwrap();

        let setup = cli(&[
            "setup",
            "myShape",
            "--type",
            "shape",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ]);
        cmd_setup(&setup, setup_args(&setup)).unwrap();

        let project = load_project(&setup).unwrap();
        let config = decoration_config(&project, "myShape").unwrap();
        assert_eq!(config.display_name, "Shape Marker");
        assert_eq!(config.entry_point, ENTRY_POINT);
        assert_eq!(config.storage_location, dir.path().join("myShape-values.json"));
        assert!(config.storage_location.exists());

        let unknown = cli(&["setup", "--type", "nope", "--project-dir", dir.path().to_str().unwrap()]);
        assert!(cmd_setup(&unknown, setup_args(&unknown)).is_err());
    }
}
