//! Quotation settings

use config::{Config, Environment, File};
use drapery_common::{DraperyError, ItemDefaults, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pricing::{PricingEngine, PricingRules};
use crate::quotation::{DeliveryEstimateTier, DiscountMode, QuotationAggregator};

/// Default terms and conditions text
pub const DEFAULT_TERMS: &str = "1) Delivery within {delivery_estimate} from the date of advance.\n\
     2) The quote is valid for 10 days from the quotation date.";

/// `DRAPERY_<KEY>` variables, `__` between nested keys
fn environment() -> Environment {
    Environment::with_prefix("DRAPERY")
        .prefix_separator("_")
        .separator("__")
}

/// Business defaults for new quotations
///
/// Keys are snake_case in `Drapery.toml`; environment overrides use the
/// `DRAPERY_` prefix with `__` between nested keys, e.g.
/// `DRAPERY_PRICING__SHEER_WIDTH_M=3.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    /// Currency code shown next to amounts
    pub currency: String,
    /// Discount percent applied to new quotations
    pub default_discount_percent: Decimal,
    /// Tax (VAT) percent applied to new quotations
    pub default_tax_percent: Decimal,
    /// Days a quotation stays valid
    pub default_expiration_days: u32,
    /// New row width in centimeters
    pub default_item_width: Decimal,
    /// New row height in centimeters
    pub default_item_height: Decimal,
    pub default_item_quantity: u32,
    /// Terms text, may contain `{delivery_estimate}`
    pub terms_and_conditions: String,
    pub delivery_tiers: Vec<DeliveryEstimateTier>,
    pub pricing: PricingRules,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            currency: "BHD".to_string(),
            default_discount_percent: Decimal::ZERO,
            default_tax_percent: dec!(10),
            default_expiration_days: 10,
            default_item_width: dec!(150),
            default_item_height: dec!(220),
            default_item_quantity: 1,
            terms_and_conditions: DEFAULT_TERMS.to_string(),
            delivery_tiers: DeliveryEstimateTier::defaults(),
            pricing: PricingRules::default(),
        }
    }
}

impl QuoteSettings {
    /// Load settings from `.env`, an optional `Drapery.toml`, and the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::load_from(
            Config::builder()
                .add_source(File::with_name("Drapery").required(false))
                .add_source(environment()),
        )
    }

    fn load_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| DraperyError::Config(format!("Failed to load settings: {}", e)))?;

        settings.validate()?;
        debug!(?settings, "Loaded quotation settings");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let widths = [
            ("pricing.fabric_width_m", self.pricing.fabric_width_m),
            ("pricing.sheer_width_m", self.pricing.sheer_width_m),
            ("pricing.lining_width_m", self.pricing.lining_width_m),
        ];
        for (key, width) in widths {
            if width <= Decimal::ZERO {
                return Err(DraperyError::Config(format!(
                    "{} must be positive, got {}",
                    key, width
                )));
            }
        }
        if self.pricing.panel_allowance_m < Decimal::ZERO {
            return Err(DraperyError::Config(format!(
                "pricing.panel_allowance_m must not be negative, got {}",
                self.pricing.panel_allowance_m
            )));
        }
        if let Some(tier) = self
            .delivery_tiers
            .iter()
            .find(|t| t.min_windows > t.max_windows)
        {
            return Err(DraperyError::Config(format!(
                "delivery tier {} has min_windows > max_windows",
                tier.id
            )));
        }
        Ok(())
    }

    /// Defaults for freshly added rows
    pub fn item_defaults(&self) -> ItemDefaults {
        ItemDefaults {
            width: self.default_item_width,
            height: self.default_item_height,
            quantity: self.default_item_quantity,
        }
    }

    pub fn default_discount(&self) -> DiscountMode {
        DiscountMode::Percentage(self.default_discount_percent)
    }

    pub fn engine(&self) -> PricingEngine {
        PricingEngine::new(self.pricing)
    }

    pub fn aggregator(&self) -> QuotationAggregator {
        QuotationAggregator::new(self.engine())
    }
}
