//! infrasage CLI: analyze infrastructure topologies against the knowledge base.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use infrasage::capacity::TrafficTier;
use infrasage::{
    catalog, detection_registry, enrich_context, estimate_capacity, recommend_sizing,
    CapacityEstimate, DataSourceProvider, EnrichOptions, EnrichedContext, InfraSpec,
    KnowledgeConfig, KnowledgeFilter, KnowledgeResult, Locale, PromptSection,
    SizingRecommendation, SourceKind,
};

#[derive(Parser)]
#[command(name = "infrasage", version, about = "Knowledge-driven infrastructure analysis")]
struct Cli {
    /// Knowledge source: "static" or "database". Overrides INFRASAGE_KNOWLEDGE_SOURCE.
    #[arg(long, global = true)]
    source: Option<String>,

    /// SQLite database path. Overrides INFRASAGE_DB_PATH.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a topology JSON file.
    Analyze {
        /// Path to the topology JSON.
        file: PathBuf,

        /// Confidence floor for the prompt section.
        #[arg(long)]
        min_confidence: Option<f32>,

        /// Emit a JSON report instead of text.
        #[arg(long)]
        json: bool,

        /// Render entry text in Korean.
        #[arg(long)]
        korean: bool,

        /// Also show sizing for this traffic tier (small, medium, large, enterprise).
        #[arg(long)]
        target_tier: Option<String>,
    },

    /// List registered detection rules.
    Rules,

    /// Validate the built-in catalog.
    Validate,

    /// Mirror the built-in catalog into a SQLite database.
    SeedDb {
        /// Database file to create or update.
        path: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    violations: Vec<&'a str>,
    enriched: &'a EnrichedContext,
    capacity: &'a CapacityEstimate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sizing: Vec<SizingRecommendation>,
    prompt: String,
}

fn parse_tier(value: &str) -> Option<TrafficTier> {
    TrafficTier::ALL
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
}

fn load_config(cli: &Cli, min_confidence: Option<f32>) -> KnowledgeResult<KnowledgeConfig> {
    let mut config = KnowledgeConfig::from_env()?;
    if let Some(source) = &cli.source {
        config.source = SourceKind::parse(source);
    }
    if let Some(path) = &cli.db_path {
        config.database_path.clone_from(path);
    }
    if let Some(min) = min_confidence {
        config.min_confidence = min;
    }
    Ok(config.validate()?)
}

async fn analyze(
    config: KnowledgeConfig,
    file: &Path,
    json: bool,
    locale: Locale,
    target_tier: Option<TrafficTier>,
) -> KnowledgeResult<()> {
    let spec = InfraSpec::from_json(&std::fs::read_to_string(file)?)?;
    let provider = DataSourceProvider::new(config);
    let source = provider.get()?;

    let filter = KnowledgeFilter::default();
    let relationships = source.get_relationships(&filter).await?;
    let anti_patterns = source.get_anti_patterns(&filter).await?;
    let failures = source.get_failures(&filter).await?;
    tracing::info!(
        backend = source.name(),
        nodes = spec.nodes.len(),
        connections = spec.connections.len(),
        "analyzing topology"
    );

    let options = EnrichOptions::new()
        .with_anti_patterns(&anti_patterns)
        .with_failures(&failures);
    let enriched = enrich_context(&spec, &relationships, options);
    let prompt = PromptSection::new(&enriched)
        .min_confidence(provider.config().min_confidence)
        .locale(locale)
        .render();
    let table = catalog::sizing_table();
    let capacity = estimate_capacity(&spec, table);
    let sizing = target_tier
        .map(|tier| recommend_sizing(&spec, table, tier))
        .unwrap_or_default();

    if json {
        let report = Report {
            violations: enriched.violations.iter().map(|a| a.meta.id.as_str()).collect(),
            enriched: &enriched,
            capacity: &capacity,
            sizing,
            prompt,
        };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| infrasage::KnowledgeError::serialization(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    if prompt.is_empty() {
        println!("No applicable knowledge.");
    } else {
        println!("{prompt}");
    }
    println!(
        "Capacity: ~{} RPS ({} tier)",
        capacity.max_rps, capacity.current_tier
    );
    for b in &capacity.bottlenecks {
        println!("  bottleneck {}: {}", b.component_type, b.recommendation);
    }
    for rec in &sizing {
        println!(
            "  {} @ {}: {} x {} (add {}), {}",
            rec.component_type,
            rec.target_tier,
            rec.recommended.instance_count,
            rec.recommended.spec,
            rec.additional_instances,
            rec.estimated_monthly_cost
        );
    }
    Ok(())
}

async fn run(cli: Cli) -> KnowledgeResult<()> {
    match &cli.command {
        Commands::Analyze {
            file,
            min_confidence,
            json,
            korean,
            target_tier,
        } => {
            let config = load_config(&cli, *min_confidence)?;
            let locale = if *korean { Locale::Ko } else { Locale::En };
            let tier = match target_tier.as_deref() {
                Some(raw) => Some(parse_tier(raw).ok_or_else(|| {
                    infrasage::ValidationError::InvalidConfig {
                        reason: format!("unknown traffic tier '{raw}'"),
                    }
                })?),
                None => None,
            };
            analyze(config, file, *json, locale, tier).await
        }
        Commands::Rules => {
            let registry = detection_registry();
            for id in registry.list() {
                let name = infrasage::knowledge::anti_pattern_by_id(catalog::anti_patterns(), id)
                    .map(|a| format!("{:<9} {}", a.severity.as_str(), a.name.en))
                    .unwrap_or_default();
                println!("{id:<12} {name}");
            }
            println!("{} rules", registry.count());
            Ok(())
        }
        Commands::Validate => {
            catalog::validate()?;
            println!(
                "catalog ok: {} relationships, {} anti-patterns, {} failures, {} profiles, {} patterns, {} vulnerabilities, {} cloud services, {} sizing rows",
                catalog::relationships().len(),
                catalog::anti_patterns().len(),
                catalog::failures().len(),
                catalog::performance_profiles().len(),
                catalog::patterns().len(),
                catalog::vulnerabilities().len(),
                catalog::cloud_services().len(),
                catalog::sizing_table().len(),
            );
            Ok(())
        }
        Commands::SeedDb { path } => seed_db(path),
    }
}

#[cfg(feature = "sqlite")]
fn seed_db(path: &Path) -> KnowledgeResult<()> {
    let source = infrasage::SqliteDataSource::open(path)?;
    let written = source.import_catalog()?;
    println!("Seeded {written} records into {}", path.display());
    Ok(())
}

#[cfg(not(feature = "sqlite"))]
fn seed_db(_path: &Path) -> KnowledgeResult<()> {
    Err(infrasage::DataSourceError::Unavailable {
        backend: "sqlite".to_string(),
    }
    .into())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
