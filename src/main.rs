// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use the_switchboard::backends::ModuleCatalog;
use the_switchboard::config::load_config;
use the_switchboard::traits::DependencyLoader;
use the_switchboard::{Config, Options, Processor, Registry};
use tracing_subscriber::EnvFilter;

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    fetch: bool,
    dir: Option<PathBuf>,
    engine: Option<String>,
    options: Options,
    list: bool,
    input: Option<PathBuf>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config FILE] [--fetch] [--dir DIR] [--engine NAME] [--option KEY=VALUE]... <input-file>\n       {program} --list"
    )
}

/// `KEY=VALUE`; the value is taken as JSON when it parses, otherwise as a string.
fn parse_option(raw: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("--option expects KEY=VALUE, got '{raw}'"))?;
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{flag} requires a value"))
        };

        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value_for("--config")?)),
            "--dir" => args.dir = Some(PathBuf::from(value_for("--dir")?)),
            "--engine" => args.engine = Some(value_for("--engine")?),
            "--option" => {
                let (key, value) = parse_option(&value_for("--option")?)?;
                args.options.insert(key, value);
            }
            "--fetch" => args.fetch = true,
            "--list" => args.list = true,
            flag if flag.starts_with("--") => bail!("unknown flag '{flag}'"),
            path => {
                if args.input.replace(PathBuf::from(path)).is_some() {
                    bail!("only one input file may be given");
                }
            }
        }
    }

    Ok(args)
}

fn list_engines(registry: &Registry) {
    for name in registry.engine_names() {
        if let Some(descriptor) = registry.descriptor(name) {
            let shape = match descriptor.is_async {
                _ if descriptor.is_identity() => "identity",
                Some(true) => "async",
                Some(false) => "sync",
                None => "derived",
            };
            println!("{name:<16} {shape:<9} .{}", descriptor.extensions.join(" ."));
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if args.fetch {
        config.fetch = true;
    }
    if let Some(dir) = args.dir {
        config.dir = dir;
    }

    let loader: Arc<dyn DependencyLoader> = if config.fetch {
        Arc::new(ModuleCatalog::from_install_dir(&config.dir))
    } else {
        Arc::new(ModuleCatalog::builtin())
    };
    let registry = Registry::from_config(&config, loader);

    if args.list {
        list_engines(&registry);
        return Ok(());
    }

    let input_path = args
        .input
        .ok_or_else(|| anyhow!("no input file given"))?;
    let input = std::fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let resolve = config.resolve_config();
    let processor = match &args.engine {
        Some(engine) => registry.get_processor(engine, &resolve)?,
        None => registry.processor_for_path(&input_path, &resolve)?,
    };

    if let Some(output) = processor.execute(input, args.options).await? {
        println!("{output}");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = env::args().collect();
    let program = raw.first().map(String::as_str).unwrap_or("the-switchboard");

    let args = match parse_args(raw.get(1..).unwrap_or_default()) {
        Ok(args) if args.list || args.input.is_some() => args,
        Ok(_) => {
            eprintln!("{}", usage(program));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {e}");
            eprintln!("{}", usage(program));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&strings(&[
            "--fetch",
            "--dir",
            "mods",
            "--option",
            "name=Ada",
            "--option",
            "count=3",
            "letter.mustache",
        ]))
        .unwrap();

        assert!(args.fetch);
        assert_eq!(args.dir, Some(PathBuf::from("mods")));
        assert_eq!(args.options.get("name"), Some(&serde_json::json!("Ada")));
        assert_eq!(args.options.get("count"), Some(&serde_json::json!(3)));
        assert_eq!(args.input, Some(PathBuf::from("letter.mustache")));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        struct TestCase {
            name: &'static str,
            args: &'static [&'static str],
        }

        let test_cases = vec![
            TestCase { name: "missing value", args: &["--engine"] },
            TestCase { name: "unknown flag", args: &["--verbose", "a.txt"] },
            TestCase { name: "option without '='", args: &["--option", "name", "a.txt"] },
            TestCase { name: "two inputs", args: &["a.txt", "b.txt"] },
        ];

        for test_case in test_cases {
            assert!(
                parse_args(&strings(test_case.args)).is_err(),
                "Test case '{}' should fail",
                test_case.name
            );
        }
    }
}
