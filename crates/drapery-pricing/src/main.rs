//! drapery-quote
//!
//! Prices a quotation document and prints the itemized result as JSON.
//!
//! ```text
//! drapery-quote <quotation.json>
//! ```
//!
//! The document holds the quotation request fields plus an optional
//! `catalog` snapshot; without one the starter catalog is used.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use drapery_common::{Catalog, CatalogSnapshot};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drapery_pricing::{QuotationRequest, QuotationService, QuoteSettings};

#[derive(Debug, Deserialize)]
struct QuotationDocument {
    #[serde(default)]
    catalog: Option<CatalogSnapshot>,
    #[serde(flatten)]
    request: QuotationRequest,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting drapery-quote v{}", drapery_common::VERSION);

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: drapery-quote <quotation.json>");
    };

    let settings = QuoteSettings::load().context("loading settings")?;

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let document: QuotationDocument =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?;

    let catalog = match document.catalog {
        Some(snapshot) => Catalog::from_parts(snapshot.products, snapshot.templates)
            .context("validating embedded catalog")?,
        None => {
            info!("No catalog in document, using starter catalog");
            Catalog::seeded()
        }
    };
    info!(
        products = catalog.product_count(),
        templates = catalog.template_count(),
        "Catalog ready"
    );

    let service = QuotationService::new(settings, Arc::new(catalog));
    let summary = service.quote(&document.request);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
