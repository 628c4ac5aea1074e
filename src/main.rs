//! bm_nodes CLI - runs the directory loader outside a host.

use anyhow::{bail, Context};
use bm_nodes::prelude::*;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bm_nodes");

    if args.len() < 2 {
        print_usage(program);
        return;
    }

    let result = match args[1].as_str() {
        "list" => {
            list_nodes();
            Ok(())
        }
        "info" => match args.get(2) {
            Some(id) => node_info(id, args[3..].iter().any(|a| a == "--json")),
            None => Err(anyhow::anyhow!("Please specify a node ID")),
        },
        "load" => match args.get(2) {
            Some(directories) => load(directories, &args[3..]),
            None => Err(anyhow::anyhow!(
                "Please specify one or more directories separated by ';'"
            )),
        },
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("bm_nodes v{}", bm_nodes::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                      List registered nodes");
    println!("  info <id> [--json]        Show node metadata");
    println!("  load <dirs> [options]     Load one image from ';'-separated directories");
    println!("  help                      Show this help message");
    println!();
    println!("Load options:");
    println!("  --index <n>       Index into the sorted file list (default: 0)");
    println!("  --sort <label>    {} (default: Filename)", SortMode::labels().join(" | "));
    println!("  --config <file>   TOML loader settings (extensions, blank_mask_size)");
    println!();
    println!("Set RUST_LOG=debug to trace scanning and selection.");
}

fn list_nodes() {
    let registry = FilterRegistry::with_builtins();
    let grouped = registry.grouped_by_category();

    println!("Available nodes ({} total):", registry.len());
    println!();

    for (category, nodes) in grouped {
        println!("  {}", category.display_name());
        for metadata in nodes {
            println!("      • {} -> {}", metadata.id, metadata.function);
        }
        println!();
    }
}

fn node_info(id: &str, json: bool) -> anyhow::Result<()> {
    let registry = FilterRegistry::with_builtins();
    let Some(metadata) = registry.get_metadata(id) else {
        bail!("Node not found: {}. Use 'list' to see available nodes.", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(metadata)?);
        return Ok(());
    }

    println!("Node: {}", metadata.name);
    println!("ID: {}", metadata.id);
    println!("Category: {}", metadata.category.display_name());
    println!("Function: {}", metadata.function);
    println!("Version: {}", metadata.version);
    println!("Author: {}", metadata.author);
    println!();
    println!("Description:");
    println!("  {}", metadata.description);
    println!();

    println!("Parameters:");
    for param in &metadata.parameters {
        println!(
            "  • {} [{}] = {}",
            param.name,
            param.param_type.host_name(),
            param.default_value
        );
        if !param.description.is_empty() {
            println!("    {}", param.description);
        }
        for constraint in &param.constraints {
            println!("    - {}", constraint.description());
        }
    }
    println!();

    println!("Outputs:");
    for port in &metadata.outputs {
        println!("  • {} [{}]", port.name, port.port_type.host_name());
        if !port.description.is_empty() {
            println!("    {}", port.description);
        }
    }

    Ok(())
}

fn load(directories: &str, args: &[String]) -> anyhow::Result<()> {
    let mut index: i64 = 0;
    let mut sort = SortMode::default();
    let mut config = LoaderConfig::default();

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--index", Some(v)) => {
                index = v
                    .parse()
                    .with_context(|| format!("Invalid --index value '{}'", v))?;
            }
            ("--sort", Some(v)) => sort = v.parse()?,
            ("--config", Some(v)) => {
                config = LoaderConfig::load(v)
                    .with_context(|| format!("Failed to load config from {}", v))?;
            }
            (flag, _) => bail!("Unknown or incomplete option: {}", flag),
        }
        i += 2;
    }

    let node = LoadImageFromDir::with_config(config);

    let mut validation = ValidationContext::new(NodeId::new());
    validation.add_parameter("directory", Value::String(directories.to_string()));
    validation.add_parameter("file_number", Value::Integer(index));
    validation.add_parameter("sort_by", Value::String(sort.label().to_string()));
    node.validate(&validation).map_err(|err| match err.suggested_fix() {
        Some(fix) => anyhow::anyhow!("{} ({})", err, fix),
        None => anyhow::Error::new(err),
    })?;

    let mut ctx = ExecutionContext::from(validation);
    node.execute(&mut ctx)?;
    let outputs = ctx.take_outputs();

    for name in node.metadata().output_names() {
        if let Some(value) = outputs.get(name) {
            println!("{:>16}: {}", name, value);
        }
    }

    Ok(())
}
