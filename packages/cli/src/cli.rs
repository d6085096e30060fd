//! Command-line interface for the Rentline tools.

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use console::style;
use serde_json::json;

use rentline_engine::filters::QueryParams;
use rentline_engine::{
    build_breadcrumbs, build_canonical_path, check_request, ApiClient, DimensionSet,
    FilterSynchronizer, HttpApiClient, Labels, ListingPageResolver, MetadataOrigin, PageOutcome,
    PageSeo, PathDecision, SiteConfig,
};

use crate::error::Result;

/// Rentline - resolve rental listing pages from the command line.
#[derive(Parser)]
#[command(name = "rentline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve SEO metadata, breadcrumbs and structured data for a listing path.
    Resolve {
        /// Listing path (e.g., /ae/dubai/listing/cars/brand/bmw)
        path: String,

        /// Skip the marketplace API and use generated content only
        #[arg(long)]
        offline: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical path and breadcrumbs for a listing path.
    Canonical {
        /// Listing path, optionally with a query string
        path: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a filter query string.
    Filters {
        /// Query string (e.g., "brand=bmw&color=red&price=100-500")
        query: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            path,
            offline,
            json,
        } => resolve_command(&path, offline, json),
        Commands::Canonical { path, json } => canonical_command(&path, json),
        Commands::Filters { query, json } => filters_command(&query, json),
    }
}

/// Client for `--offline`: every lookup resolves without a result.
struct OfflineClient;

#[async_trait]
impl ApiClient for OfflineClient {
    async fn get_json(&self, path: &str, _country: &str) -> rentline_engine::Result<serde_json::Value> {
        tracing::debug!(path, "Offline, skipping API request");
        Ok(json!({}))
    }
}

/// Execute the resolve command.
fn resolve_command(path: &str, offline: bool, as_json: bool) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = if offline {
        let config = SiteConfig::from_env().unwrap_or_else(|_| SiteConfig::new(""));
        let resolver = ListingPageResolver::new(OfflineClient, config);
        runtime.block_on(resolver.handle_request(path))?
    } else {
        // Validate the path before requiring API configuration
        DimensionSet::from_path(path)?;
        let config = SiteConfig::from_env()?;
        let resolver = ListingPageResolver::new(HttpApiClient::new(&config)?, config);
        runtime.block_on(resolver.handle_request(path))?
    };

    match outcome {
        PageOutcome::Redirect { location, status } => {
            if as_json {
                let out = json!({ "redirect": location, "status": status });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_redirect(status, &location);
            }
        }
        PageOutcome::Render(seo) => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&seo)?);
            } else {
                print_seo(&seo);
            }
        }
    }
    Ok(())
}

fn print_redirect(status: u16, location: &str) {
    println!(
        "{} {} {}",
        style("Redirect").yellow().bold(),
        status,
        style(location).cyan()
    );
}

fn print_seo(seo: &PageSeo) {
    let origin = match seo.origin {
        MetadataOrigin::Remote(tier) => format!("remote ({tier})"),
        MetadataOrigin::Fallback => "generated".to_string(),
    };

    println!(
        "{} {}",
        style("Listing").bold(),
        style(&seo.canonical_path).cyan()
    );
    println!("  Page type: {}", seo.metadata_type);
    println!("  Source: {}", style(origin).green());
    print_field("Title", seo.metadata.meta_title.as_deref());
    print_field("Description", seo.metadata.meta_description.as_deref());
    print_field("H1", seo.metadata.h1.as_deref());
    print_field("H2", seo.metadata.h2.as_deref());

    let trail: Vec<&str> = seo.breadcrumbs.iter().map(|c| c.name.as_str()).collect();
    println!("  Breadcrumbs: {}", trail.join(" > "));
}

fn print_field(name: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("  {name}: {value}"),
        None => println!("  {name}: {}", style("-").dim()),
    }
}

/// Execute the canonical command.
fn canonical_command(path: &str, as_json: bool) -> Result<()> {
    let dims = DimensionSet::from_path(path)?;
    let labels = Labels::from_dimensions(&dims);
    let canonical = build_canonical_path(&dims);
    let decision = check_request(path, &dims);
    let breadcrumbs = build_breadcrumbs(&dims, &labels);

    if as_json {
        let redirect = match &decision {
            PathDecision::Redirect { location, status } => {
                json!({ "location": location, "status": status })
            }
            PathDecision::Render => serde_json::Value::Null,
        };
        let out = json!({
            "dimensions": dims,
            "canonicalPath": canonical,
            "redirect": redirect,
            "breadcrumbs": breadcrumbs,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{canonical}");
    if let PathDecision::Redirect { location, status } = &decision {
        print_redirect(*status, location);
    }
    for crumb in &breadcrumbs {
        println!("  {} {}", crumb.name, style(&crumb.path).dim());
    }
    Ok(())
}

/// Execute the filters command.
fn filters_command(query: &str, as_json: bool) -> Result<()> {
    let sync = FilterSynchronizer::from_query(query);
    let selection = sync.selected_filters();
    let normalized = QueryParams::parse(query);

    if as_json {
        let out = json!({
            "selection": selection,
            "appliedCount": sync.applied_filter_count(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} {}",
        style("Applied filters:").bold(),
        sync.applied_filter_count()
    );
    for key in selection.active_keys() {
        let values: Vec<&str> = normalized.get_all(key.as_ref()).collect();
        println!("  {}: {}", style(key.title()).cyan(), values.join(", "));
    }
    Ok(())
}
