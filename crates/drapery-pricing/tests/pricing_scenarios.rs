//! Pricing scenarios against the starter catalog
//!
//! Covers:
//! - Full curtain build-ups (fabric + sheer + lining + motors)
//! - Blind selection under curtain templates
//! - Catalog edits while pricing
//! - Quotation totals end to end

use std::sync::Arc;
use std::thread;

use drapery_common::{
    CalculationType, Catalog, ItemDefaults, LineItem, Product, ProductCategory, ProductLookup,
    ProductUnit, Template, TemplateLookup, NONE_ID,
};
use drapery_pricing::{
    quotation::{delivery_estimate, DeliveryEstimateTier},
    DiscountMode, PricingEngine, QuotationAggregator,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item_with_template(catalog: &Catalog, template_id: &str) -> LineItem {
    let mut item = LineItem::blank(&ItemDefaults::default());
    let template = catalog.template(template_id).expect("template in starter catalog");
    item.apply_template(&template);
    item
}

#[test]
fn test_full_curtain_build_up() {
    let catalog = Catalog::seeded();
    catalog
        .insert_template(
            Template::new("wave", "Wave", CalculationType::RunningMeter)
                .with_fullness(dec!(2.0), dec!(2.5))
                .with_stitching(Some(dec!(3)), Some(dec!(2)), Some(dec!(1)))
                .with_fixing(dec!(5))
                .with_front_accessory("acc-wave-tape")
                .with_back_accessory("standard-rod-2m"),
        )
        .unwrap();

    let item = item_with_template(&catalog, "wave")
        .with_size(dec!(300), dec!(250))
        .with_fabric("linen-blend")
        .with_sheer("sheer-voile")
        .with_lining("blackout-lining")
        .with_motors("somfy-motor-s1", NONE_ID);

    let costs = PricingEngine::default().price_item(&item, &catalog, &catalog);

    // Fabric: ceil(3.0 * 2.0 / 1.4) = 5 panels x 2.75m x 21
    assert_eq!(costs.fabric, dec!(288.75));
    // Sheer: ceil(3.0 * 2.5 / 2.8) = 3 panels x 2.75m x 8.5
    assert_eq!(costs.sheer, dec!(70.125));
    // Lining follows front fullness: 5 panels x 2.75m x 17
    assert_eq!(costs.lining, dec!(233.75));
    assert_eq!(costs.front_motor, dec!(150));
    assert_eq!(costs.back_motor, Decimal::ZERO);
    // Wave tape 2 x 3.0m + rod 25
    assert_eq!(costs.accessories, dec!(31));
    // 5 x 3 + 3 x 2 + 5 x 1
    assert_eq!(costs.stitching, dec!(26));
    // 7.5 sq m x 5
    assert_eq!(costs.fixing, dec!(37.5));
    assert_eq!(costs.total, costs.per_unit_sum());
}

#[test]
fn test_blind_selected_under_curtain_template() {
    let catalog = Catalog::seeded();
    let templates = catalog.templates_sorted();
    let mut item = item_with_template(&catalog, "eyelet")
        .with_size(dec!(120), dec!(150))
        .with_sheer("sheer-voile");

    let blind = catalog.product("venetian-blind-wood").unwrap();
    item.select_fabric(&blind, &templates);

    assert_eq!(item.template_id, "roman-blind");
    assert_eq!(item.sheer_id, NONE_ID);

    let costs = PricingEngine::default().price_item(&item, &catalog, &catalog);
    // 1.2m x 1.5m x 75
    assert_eq!(costs.fabric, dec!(135));
    assert_eq!(costs.sheer, Decimal::ZERO);
    assert_eq!(costs.total, dec!(135));
}

#[test]
fn test_blind_forced_to_area_pricing_without_template_switch() {
    let catalog = Catalog::seeded();
    let item = item_with_template(&catalog, "eyelet")
        .with_size(dec!(100), dec!(100))
        .with_fabric("roller-blind-standard")
        .with_quantity(4);

    let costs = PricingEngine::default().price_item(&item, &catalog, &catalog);

    assert_eq!(costs.fabric, dec!(35));
    assert_eq!(costs.stitching, Decimal::ZERO);
    assert_eq!(costs.total, dec!(140));
}

#[test]
fn test_unknown_template_prices_zero() {
    let catalog = Catalog::seeded();
    let mut item = LineItem::blank(&ItemDefaults::default())
        .with_fabric("velvet")
        .with_motors("somfy-motor-s1", "smart-curtain-motor-z1");
    item.fullness_front = dec!(2.0);

    for template_id in [NONE_ID, "no-such-template"] {
        item.template_id = template_id.to_string();
        let costs = PricingEngine::default().price_item(&item, &catalog, &catalog);
        assert!(costs.is_zero(), "template {} should price to zero", template_id);
    }
}

#[test]
fn test_discounted_product_edit_is_picked_up() {
    let catalog = Catalog::seeded();
    let item = item_with_template(&catalog, "rod-pocket")
        .with_size(dec!(140), dec!(200))
        .with_fabric("cotton-printed");

    let engine = PricingEngine::default();
    let before = engine.price_item(&item, &catalog, &catalog);

    let mut product = catalog.product("cotton-printed").unwrap();
    product.discount_price = Some(dec!(7));
    catalog.insert_product(product).unwrap();

    let after = engine.price_item(&item, &catalog, &catalog);

    // ceil(1.4 * 2.0 / 1.4) = 2 panels x 2.25m
    assert_eq!(before.fabric, dec!(63));
    assert_eq!(after.fabric, dec!(31.5));
}

#[test]
fn test_concurrent_pricing_shares_catalog() {
    let catalog = Arc::new(Catalog::seeded());
    let template = catalog.template("french-pleat").unwrap();

    let handles: Vec<_> = (1..=8u32)
        .map(|quantity| {
            let catalog = Arc::clone(&catalog);
            let template = template.clone();
            thread::spawn(move || {
                let mut item = LineItem::blank(&ItemDefaults::default())
                    .with_fabric("cotton-plain")
                    .with_quantity(quantity);
                item.apply_template(&template);
                PricingEngine::default().price_item(&item, catalog.as_ref(), catalog.as_ref())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let unit = results[0].total;
    for (i, costs) in results.iter().enumerate() {
        assert_eq!(costs.total, unit * Decimal::from(i as u32 + 1));
    }
}

#[test]
fn test_quotation_end_to_end() {
    let mut products = std::collections::HashMap::new();
    products.insert(
        "fabric".to_string(),
        Product::new(
            "fabric",
            "Fabric",
            dec!(10),
            ProductCategory::Fabric,
            ProductUnit::PerMeter,
        )
        .with_fabric_width(dec!(1.4)),
    );
    let mut templates = std::collections::HashMap::new();
    templates.insert(
        "basic".to_string(),
        Template::new("basic", "Basic", CalculationType::RunningMeter)
            .with_stitching(Some(dec!(1)), None, None),
    );

    let mut item = LineItem::blank(&ItemDefaults::default())
        .with_size(dec!(150), dec!(220))
        .with_fabric("fabric")
        .with_quantity(2);
    item.template_id = "basic".to_string();
    item.fullness_front = dec!(2.0);
    let blank = LineItem::blank(&ItemDefaults::default());

    let (breakdowns, totals) = QuotationAggregator::default().aggregate_items(
        &[item, blank],
        &templates,
        &products,
        DiscountMode::Percentage(dec!(10)),
        dec!(10),
    );

    assert_eq!(breakdowns[0].total, dec!(153.0));
    assert!(breakdowns[1].is_zero());
    assert_eq!(totals.subtotal, dec!(153.0));
    assert_eq!(totals.discount, dec!(15.3));
    assert_eq!(totals.taxable, dec!(137.7));
    assert_eq!(totals.tax, dec!(13.77));
    assert_eq!(totals.grand_total, dec!(151.47));
    assert_eq!(totals.rounded_grand_total, dec!(151));

    let windows = [
        LineItem::blank(&ItemDefaults::default()).with_quantity(2),
        LineItem::blank(&ItemDefaults::default()).with_quantity(2),
    ];
    assert_eq!(
        delivery_estimate(&windows, &DeliveryEstimateTier::defaults()),
        "4 - 5 weeks"
    );
}

#[test]
fn test_sentinel_row_in_catalog_is_ignored() {
    let catalog = Catalog::seeded();
    assert!(catalog.get_product(NONE_ID).is_some());

    let item = item_with_template(&catalog, "eyelet")
        .with_fabric(NONE_ID)
        .with_sheer(NONE_ID)
        .with_lining(NONE_ID);
    let costs = PricingEngine::default().price_item(&item, &catalog, &catalog);
    assert!(costs.is_zero());
}
