// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod report;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use esp_connectors::xml::{self, CONNECTOR_TAG};
use esp_connectors::{ConnectorFactory, Registry, SdkConfig};
use report::{ClassifyRow, ConnectorReport, DescriptorRow, VariantSummary};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "espconn")]
#[command(about = "ESP connector XML validator, classifier and normalizer")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter (e.g. "warn", "esp_connectors=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every connector in a document and list validation issues
    Validate {
        /// Connector, connector list or project XML
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Fail on any validation issue
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the variant each connector resolves to
    Classify {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Rewrite connectors with defaults injected and properties ordered
    Normalize {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },

    /// List registered variants, or the property table of one
    Describe {
        /// Variant type name, e.g. KafkaSubscriber
        #[arg(value_name = "VARIANT")]
        variant: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            SdkConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => SdkConfig::default(),
    };
    let factory = ConnectorFactory::with_config(Registry::global(), config);

    match cli.command {
        Commands::Validate {
            input,
            strict,
            json,
        } => cmd_validate(&factory, &input, strict, json),
        Commands::Classify { input, json } => cmd_classify(&factory, &input, json),
        Commands::Normalize {
            input,
            output,
            pretty,
        } => cmd_normalize(&factory, &input, output, pretty),
        Commands::Describe { variant, json } => cmd_describe(&factory, variant.as_deref(), json),
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn cmd_validate(
    factory: &ConnectorFactory,
    input: &Path,
    strict: bool,
    json: bool,
) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let elements = xml::parse_connectors(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    debug!("{} connector element(s) in {}", elements.len(), input.display());

    let reports: Vec<ConnectorReport> = elements
        .iter()
        .map(|element| ConnectorReport::build(factory, element))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            match (&report.variant, &report.error) {
                (_, Some(error)) => println!("[ERROR] {}: {}", report.label(), error),
                (Some(variant), None) if report.issues.is_empty() => {
                    println!("[OK] {} -> {}", report.label(), variant);
                }
                (Some(variant), None) => {
                    println!(
                        "[WARN] {} -> {} ({} issues)",
                        report.label(),
                        variant,
                        report.issues.len()
                    );
                    for (idx, issue) in report.issues.iter().enumerate() {
                        println!("  {}. {}", idx + 1, issue);
                    }
                }
                (None, None) => {}
            }
        }
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    let issues: usize = reports.iter().map(|r| r.issues.len()).sum();
    if failed > 0 {
        bail!("{failed} of {} connectors failed to build", reports.len());
    }
    if (strict || factory.config().validation.strict) && issues > 0 {
        bail!("Validation failed with {issues} issues (strict mode)");
    }
    if !json {
        println!(
            "\n{} connectors checked in {}, {} issues",
            reports.len(),
            input.display(),
            issues
        );
    }
    Ok(())
}

fn cmd_classify(factory: &ConnectorFactory, input: &Path, json: bool) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let elements = xml::parse_connectors(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    let rows = elements
        .iter()
        .map(|element| ClassifyRow::build(factory, element))
        .collect::<esp_connectors::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in &rows {
        println!(
            "{:<24} {:<12} {:<10} {}",
            row.name.as_deref().unwrap_or("<unnamed>"),
            row.class,
            row.direction,
            row.variant
        );
    }
    Ok(())
}

fn cmd_normalize(
    factory: &ConnectorFactory,
    input: &Path,
    output: Option<PathBuf>,
    pretty: bool,
) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let single = xml::parse_document(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?
        .root_element()
        .tag_name()
        .name()
        == CONNECTOR_TAG;

    let mut options = factory.config().xml;
    options.pretty |= pretty;

    let mut normalized = if single {
        factory.from_xml(&text)?.to_xml_with(&options)
    } else {
        factory.parse_set(&text)?.to_xml_with(&options)
    };
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }

    match output {
        Some(path) => {
            std::fs::write(&path, normalized)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("[OK] Normalized {} -> {}", input.display(), path.display());
        }
        None => print!("{normalized}"),
    }
    Ok(())
}

fn cmd_describe(
    factory: &ConnectorFactory,
    variant: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let registry = factory.registry();

    let Some(type_name) = variant else {
        let rows: Vec<VariantSummary> = registry
            .variants()
            .map(|v| VariantSummary::from(v.as_ref()))
            .collect();
        if json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        for row in &rows {
            let selectors = if row.selectors.is_empty() {
                String::new()
            } else {
                format!(" [{}]", row.selectors.join(", "))
            };
            println!(
                "{:<28} {:<12} {:<10} {:>3} properties{}",
                row.type_name, row.class, row.direction, row.properties, selectors
            );
        }
        return Ok(());
    };

    let Some(variant) = registry.get(type_name) else {
        bail!("Unknown variant {type_name}. Run `espconn describe` for the list.");
    };
    let rows: Vec<DescriptorRow> = variant.descriptors().iter().map(DescriptorRow::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let summary = VariantSummary::from(variant.as_ref());
    println!("{} (class={}, type={})", summary.type_name, summary.class, summary.direction);
    if !summary.positional.is_empty() {
        println!("  positional: {}", summary.positional.join(", "));
    }
    for (property, selector) in &variant.key().selectors {
        println!("  selected when {property} matches {selector}");
    }
    println!();
    for row in &rows {
        let mut line = format!("  {:<28} {:<12}", row.wire_name, row.kinds.join("|"));
        if row.required {
            line.push_str(" required");
        }
        if let Some(default) = &row.default {
            line.push_str(&format!(" default={default}"));
        }
        if !row.valid_values.is_empty() {
            line.push_str(&format!(" values=[{}]", row.valid_values.join(", ")));
        }
        if !row.valid_expr.is_empty() {
            line.push_str(&format!(" expr=[{}]", row.valid_expr.join(", ")));
        }
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PROJECT: &str = r#"<project name="p"><contqueries><contquery name="cq"><windows>
      <window-source name="src"><connectors>
        <connector class="fs" name="in"><properties>
          <property name="type">sub</property>
          <property name="fstype">csv</property>
          <property name="fsname">in.csv</property>
        </properties></connector>
        <connector class="fs" name="half"><properties>
          <property name="type">sub</property>
        </properties></connector>
      </connectors></window-source>
    </windows></contquery></contqueries></project>"#;

    fn write_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_validate_fails_only_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "project.xml", PROJECT);
        let factory = ConnectorFactory::new();

        assert!(cmd_validate(&factory, &input, false, false).is_ok());
        let err = cmd_validate(&factory, &input, true, true).unwrap_err();
        assert!(err.to_string().contains("strict mode"));
    }

    #[test]
    fn test_validate_reports_unreadable_and_unbuildable_input() {
        let dir = TempDir::new().unwrap();
        let factory = ConnectorFactory::new();

        let missing = dir.path().join("missing.xml");
        let err = cmd_validate(&factory, &missing, false, false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));

        let bad = write_input(
            &dir,
            "bad.xml",
            r#"<connector class="fs" name="in"><properties>
                 <property name="snapshot">often</property>
               </properties></connector>"#,
        );
        let err = cmd_validate(&factory, &bad, false, false).unwrap_err();
        assert!(err.to_string().contains("1 of 1 connectors failed"));
    }

    #[test]
    fn test_normalize_writes_stable_output() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "project.xml", PROJECT);
        let output = dir.path().join("normalized.xml");
        let factory = ConnectorFactory::new();

        cmd_normalize(&factory, &input, Some(output.clone()), false).unwrap();
        let first = fs::read_to_string(&output).unwrap();
        assert!(first.starts_with("<connectors>"));
        assert!(first.ends_with('\n'));
        assert!(first.contains(r#"<property name="snapshot">false</property>"#));

        let again = dir.path().join("again.xml");
        cmd_normalize(&factory, &output, Some(again.clone()), false).unwrap();
        assert_eq!(fs::read_to_string(&again).unwrap(), first);
    }

    #[test]
    fn test_normalize_single_connector() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "one.xml",
            r#"<connector class="fs" name="in" type="sub"><properties>
                 <property name="fsname">in.csv</property>
                 <property name="fstype">csv</property>
               </properties></connector>"#,
        );
        let output = dir.path().join("one.norm.xml");
        cmd_normalize(&ConnectorFactory::new(), &input, Some(output.clone()), false).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with(r#"<connector class="fs" name="in" type="subscribe">"#));
    }

    #[test]
    fn test_classify_and_describe() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "project.xml", PROJECT);
        let factory = ConnectorFactory::new();

        assert!(cmd_classify(&factory, &input, true).is_ok());
        assert!(cmd_describe(&factory, Some("KafkaSubscriber"), false).is_ok());
        let err = cmd_describe(&factory, Some("NoSuchThing"), false).unwrap_err();
        assert!(err.to_string().contains("Unknown variant NoSuchThing"));
    }
}
