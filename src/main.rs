use anyhow::Context;
use clap::Parser;
use nestmap::{MappingSettings, NameStrategy, TypeMappingWriter, TypeName, TypeRegistry};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Print the mapping of a type described in a JSON type file
#[derive(Parser, Debug)]
#[command(name = "nestmap")]
#[command(about = "Derive a type mapping from type descriptors", long_about = None)]
struct Args {
    /// JSON file holding an array of type descriptors
    #[arg(long)]
    types: PathBuf,

    /// Root type to map
    #[arg(long = "type")]
    type_name: String,

    /// Mapping name, inferred from the type name when omitted
    #[arg(long)]
    name: Option<String>,

    /// JSON file with mapping settings, overridden by the flags below
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Times a type may be re-entered along one path
    #[arg(long)]
    max_recursion: Option<u32>,

    /// Field name casing: identity, camel_case, snake_case, lowercase, pluralize
    #[arg(long)]
    field_casing: Option<NameStrategy>,

    /// Mapping name casing: identity, camel_case, snake_case, lowercase, pluralize
    #[arg(long)]
    type_casing: Option<NameStrategy>,

    /// Print only the inner properties object
    #[arg(long)]
    properties_only: bool,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_settings(args: &Args) -> anyhow::Result<MappingSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing settings {}", path.display()))?
        }
        None => MappingSettings::default(),
    };
    if let Some(max_recursion) = args.max_recursion {
        settings.max_recursion = max_recursion;
    }
    if let Some(strategy) = args.field_casing {
        settings.field_names = strategy;
    }
    if let Some(strategy) = args.type_casing {
        settings.type_names = strategy;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let registry = TypeRegistry::from_json_file(&args.types)
        .with_context(|| format!("loading types from {}", args.types.display()))?;
    info!("Loaded {} types from {:?}", registry.len(), args.types);

    if let Err(err) = registry.resolve(&args.type_name) {
        let known: Vec<&str> = registry.sorted_names().into_iter().map(TypeName::as_str).collect();
        return Err(err).with_context(|| format!("known types: {}", known.join(", ")));
    }

    let settings = load_settings(&args)?;
    debug!("Settings: {:?}", settings);

    let writer = TypeMappingWriter::new(&registry, settings);
    let mapping = writer.build_mapping(&args.type_name, args.name.as_deref())?;
    info!("Mapped {} as '{}'", args.type_name, mapping.name);

    let output = if args.properties_only {
        mapping.properties_json()
    } else {
        mapping.to_json()
    };
    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", text);
    Ok(())
}
