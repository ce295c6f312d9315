//! Command line search against the dataset catalog.

use anyhow::Context;
use backend::{
    DatasetFetcher, FetcherConfig, ZeroCountFacets,
    api::search::{parse_sort_by, parse_sort_order},
    config::ENDPOINT_ENV_VAR,
};
use clap::Parser;
use common::search_options::{SearchFilters, SearchOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "search-datasets", about = "Faceted search over the dataset catalog")]
struct Args {
    /// Search engine endpoint receiving the query document.
    #[arg(long, env = ENDPOINT_ENV_VAR)]
    endpoint: String,

    /// Free text query; matches everything when omitted.
    #[arg(long, short)]
    query: Option<String>,

    #[arg(long)]
    offset: Option<i64>,

    #[arg(long)]
    limit: Option<i64>,

    /// `name` or `relevance`.
    #[arg(long)]
    sort_by: Option<String>,

    /// `asc` or `desc`.
    #[arg(long)]
    sort_order: Option<String>,

    /// Comma separated publisher ids.
    #[arg(long)]
    publishers: Option<String>,

    /// Comma separated license ids.
    #[arg(long)]
    licenses: Option<String>,

    /// Also list facet values that have no match under the current filters.
    #[arg(long)]
    include_empty_facets: bool,
}

impl Args {
    fn search_options(&self) -> anyhow::Result<SearchOptions> {
        Ok(SearchOptions {
            query: self.query.clone(),
            offset: self.offset,
            limit: self.limit,
            sort_by: self.sort_by.as_deref().map(parse_sort_by).transpose()?,
            sort_order: self.sort_order.as_deref().map(parse_sort_order).transpose()?,
            filters: Some(SearchFilters::from_comma_separated(
                self.publishers.as_deref(),
                self.licenses.as_deref(),
            )),
        })
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let zero_count_facets = if args.include_empty_facets { ZeroCountFacets::Include } else { ZeroCountFacets::Omit };
    let config = FetcherConfig::new(&args.endpoint)?.with_zero_count_facets(zero_count_facets);
    let fetcher = DatasetFetcher::new(config).context("Failed to create dataset fetcher")?;

    let result = fetcher.search(args.search_options()?).await.context("Dataset search failed")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("search-datasets: {:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
