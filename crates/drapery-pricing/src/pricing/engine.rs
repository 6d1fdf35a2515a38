//! Line item pricing engine
//!
//! Turns one [`LineItem`] into an itemized [`CostBreakdown`]:
//!
//! ```text
//! panels     = ceil(width_m * fullness / fabric_width)
//! layer cost = panels * (height_m + allowance) * price      (running meter)
//!            = width_m * height_m * price                  (square meter)
//! total      = (fabric + sheer + lining + motors + accessories
//!               + stitching + fixing) * quantity
//! ```
//!
//! Pricing never fails. Unknown or sentinel ids contribute nothing, an
//! unresolved template yields an all-zero breakdown, and non-positive
//! dimensions price as zero area. Arithmetic saturates at `Decimal::MAX`
//! instead of overflowing.

use drapery_common::{
    CalculationType, CostBreakdown, LineItem, Product, ProductCategory, ProductLookup,
    ProductUnit, Template, TemplateLookup, CM_PER_METER, DEFAULT_FABRIC_WIDTH_M,
    DEFAULT_SHEER_WIDTH_M, PANEL_ALLOWANCE_M,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// How a material layer is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialPricingMode {
    /// Cut panels times drop length
    RunningMeter,
    /// Opening area, no panels and no stitching
    SquareMeter,
}

impl MaterialPricingMode {
    /// Mode for the front layer
    ///
    /// Square-meter templates price any front product by area. Blinds are
    /// always priced by area, even under a running-meter template.
    pub fn resolve(calculation_type: CalculationType, category: ProductCategory) -> Self {
        match (calculation_type, category) {
            (CalculationType::SquareMeter, _) | (_, ProductCategory::Blinds) => Self::SquareMeter,
            (CalculationType::RunningMeter, _) => Self::RunningMeter,
        }
    }
}

/// Textile layers of a curtain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialLayer {
    /// Front fabric or blind
    Fabric,
    /// Back sheer
    Sheer,
    /// Lining behind the front fabric
    Lining,
}

impl MaterialLayer {
    pub const ALL: [MaterialLayer; 3] = [Self::Fabric, Self::Sheer, Self::Lining];

    /// Product id selected for this layer
    pub fn selected_id<'a>(&self, item: &'a LineItem) -> &'a str {
        match self {
            Self::Fabric => &item.fabric_id,
            Self::Sheer => &item.sheer_id,
            Self::Lining => &item.lining_id,
        }
    }

    /// Fullness driving the panel count; lining follows the front drape
    pub fn fullness(&self, item: &LineItem) -> Decimal {
        match self {
            Self::Fabric | Self::Lining => item.fullness_front,
            Self::Sheer => item.fullness_back,
        }
    }

    /// Stitching charge per panel configured on the template
    pub fn stitching_rate(&self, template: &Template) -> Option<Decimal> {
        match self {
            Self::Fabric => template.stitching_price_per_panel_fabric,
            Self::Sheer => template.stitching_price_per_panel_sheer,
            Self::Lining => template.stitching_price_per_panel_lining,
        }
    }

    /// Only the front layer can switch to square-meter pricing
    pub fn pricing_mode(&self, template: &Template, product: &Product) -> MaterialPricingMode {
        match self {
            Self::Fabric => MaterialPricingMode::resolve(template.calculation_type, product.category),
            Self::Sheer | Self::Lining => MaterialPricingMode::RunningMeter,
        }
    }
}

/// Default roll widths and the per-panel cutting allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Roll width for fabric without one (meters)
    pub fabric_width_m: Decimal,
    /// Roll width for sheer without one (meters)
    pub sheer_width_m: Decimal,
    /// Roll width for lining without one (meters)
    pub lining_width_m: Decimal,
    /// Added to the drop of every panel (meters)
    pub panel_allowance_m: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            fabric_width_m: DEFAULT_FABRIC_WIDTH_M,
            sheer_width_m: DEFAULT_SHEER_WIDTH_M,
            lining_width_m: DEFAULT_FABRIC_WIDTH_M,
            panel_allowance_m: PANEL_ALLOWANCE_M,
        }
    }
}

impl PricingRules {
    fn default_width(&self, layer: MaterialLayer) -> Decimal {
        match layer {
            MaterialLayer::Fabric => self.fabric_width_m,
            MaterialLayer::Sheer => self.sheer_width_m,
            MaterialLayer::Lining => self.lining_width_m,
        }
    }
}

/// Opening size in meters, with non-positive inputs clamped to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width_m: Decimal,
    pub height_m: Decimal,
}

impl Dimensions {
    pub fn of(item: &LineItem) -> Self {
        Self {
            width_m: item.width.max(Decimal::ZERO) / CM_PER_METER,
            height_m: item.height.max(Decimal::ZERO) / CM_PER_METER,
        }
    }

    pub fn area_sq_m(&self) -> Decimal {
        self.width_m.saturating_mul(self.height_m)
    }
}

/// Material and stitching charge of one layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LayerCost {
    material: Decimal,
    stitching: Decimal,
}

/// Line item pricing engine
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rules: PricingRules,
}

impl PricingEngine {
    /// Create an engine with custom default widths and allowance
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Resolve the item's template, then price it
    pub fn price_item(
        &self,
        item: &LineItem,
        templates: &impl TemplateLookup,
        products: &impl ProductLookup,
    ) -> CostBreakdown {
        let template = templates.template(&item.template_id);
        self.compute_cost(item, template.as_ref(), products)
    }

    /// Price every item in order
    pub fn price_items(
        &self,
        items: &[LineItem],
        templates: &impl TemplateLookup,
        products: &impl ProductLookup,
    ) -> Vec<CostBreakdown> {
        items
            .iter()
            .map(|item| self.price_item(item, templates, products))
            .collect()
    }

    /// Itemized cost of one line item
    ///
    /// `template` is `None` when the item's template id did not resolve; the
    /// result is then all zeros.
    #[instrument(skip_all, fields(item_id = %item.id, template_id = %item.template_id))]
    pub fn compute_cost(
        &self,
        item: &LineItem,
        template: Option<&Template>,
        products: &impl ProductLookup,
    ) -> CostBreakdown {
        let Some(template) = template.filter(|t| !t.is_sentinel()) else {
            debug!("No template selected, pricing as zero");
            return CostBreakdown::zero();
        };

        let dims = Dimensions::of(item);
        let mut costs = CostBreakdown::zero();

        for layer in MaterialLayer::ALL {
            let Some(product) = products.product(layer.selected_id(item)) else {
                continue;
            };
            let cost = self.layer_cost(layer, item, template, &product, &dims);
            match layer {
                MaterialLayer::Fabric => costs.fabric = cost.material,
                MaterialLayer::Sheer => costs.sheer = cost.material,
                MaterialLayer::Lining => costs.lining = cost.material,
            }
            costs.stitching = costs.stitching.saturating_add(cost.stitching);
        }

        costs.front_motor = flat_price(products, &item.front_motor_id);
        costs.back_motor = flat_price(products, &item.back_motor_id);
        costs.accessories = accessories_cost(template, products, &dims);
        costs.fixing = template
            .fixing_price_per_sq_m
            .map(|rate| dims.area_sq_m().saturating_mul(rate))
            .unwrap_or(Decimal::ZERO);

        // Quantity scales the combined unit cost once, never per component
        costs.total = costs
            .per_unit_sum()
            .saturating_mul(Decimal::from(item.quantity));

        debug!(total = %costs.total, quantity = item.quantity, "Priced line item");
        costs
    }

    fn layer_cost(
        &self,
        layer: MaterialLayer,
        item: &LineItem,
        template: &Template,
        product: &Product,
        dims: &Dimensions,
    ) -> LayerCost {
        let price = product.effective_price();

        match layer.pricing_mode(template, product) {
            MaterialPricingMode::SquareMeter => LayerCost {
                material: dims.area_sq_m().saturating_mul(price),
                stitching: Decimal::ZERO,
            },
            MaterialPricingMode::RunningMeter => {
                let fabric_width = product.fabric_width_or(self.rules.default_width(layer));
                let panels = panel_count(dims.width_m, layer.fullness(item), fabric_width);
                let cut_length = dims.height_m.saturating_add(self.rules.panel_allowance_m);

                trace!(?layer, %panels, %fabric_width, "Running-meter layer");

                LayerCost {
                    material: panels.saturating_mul(cut_length).saturating_mul(price),
                    stitching: layer
                        .stitching_rate(template)
                        .map(|rate| panels.saturating_mul(rate))
                        .unwrap_or(Decimal::ZERO),
                }
            }
        }
    }
}

/// Panels needed to cover the gathered width, rounded up
///
/// Callers pass a positive fabric width; a non-positive one yields zero
/// panels instead of dividing by zero.
pub fn panel_count(width_m: Decimal, fullness: Decimal, fabric_width_m: Decimal) -> Decimal {
    if fabric_width_m <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let gathered = width_m
        .max(Decimal::ZERO)
        .saturating_mul(fullness.max(Decimal::ZERO));
    gathered
        .checked_div(fabric_width_m)
        .unwrap_or(Decimal::MAX)
        .ceil()
}

fn flat_price(products: &impl ProductLookup, id: &str) -> Decimal {
    products
        .product(id)
        .map(|p| p.effective_price())
        .unwrap_or(Decimal::ZERO)
}

fn accessories_cost(
    template: &Template,
    products: &impl ProductLookup,
    dims: &Dimensions,
) -> Decimal {
    template
        .accessory_ids()
        .filter_map(|id| products.product(id))
        .map(|accessory| match accessory.unit {
            ProductUnit::PerMeter => accessory.effective_price().saturating_mul(dims.width_m),
            ProductUnit::PerSquareMeter | ProductUnit::PerItem => accessory.effective_price(),
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Price one item with the default rules
pub fn compute_cost(
    item: &LineItem,
    template: Option<&Template>,
    products: &impl ProductLookup,
) -> CostBreakdown {
    PricingEngine::default().compute_cost(item, template, products)
}
