//! Starter catalog shipped with a fresh install

use rust_decimal_macros::dec;

use super::Catalog;
use crate::types::product::{Product, ProductCategory, ProductUnit};
use crate::types::template::{CalculationType, Template};
use crate::NONE_ID;

impl Catalog {
    /// Catalog pre-filled with the standard templates and starter products
    pub fn seeded() -> Self {
        let catalog = Self::new();
        for product in seed_products() {
            catalog.products.insert(product.id.clone(), product);
        }
        for template in seed_templates() {
            catalog.templates.insert(template.id.clone(), template);
        }
        catalog
    }
}

fn seed_templates() -> Vec<Template> {
    use CalculationType::*;

    vec![
        Template::new(NONE_ID, "None", RunningMeter),
        Template::new("eyelet", "Eyelet", RunningMeter).with_fullness(dec!(1.8), dec!(2.0)),
        Template::new("french-pleat", "French Pleat", RunningMeter)
            .with_fullness(dec!(2.5), dec!(2.5)),
        Template::new("goblet-pleat", "Goblet Pleat", RunningMeter)
            .with_fullness(dec!(2.2), dec!(2.2)),
        Template::new("rod-pocket", "Rod Pocket", RunningMeter).with_fullness(dec!(2.0), dec!(2.0)),
        Template::new("roman-blind", "Roman Blind", SquareMeter).with_fullness(dec!(1.1), dec!(1.1)),
    ]
}

fn seed_products() -> Vec<Product> {
    use ProductCategory::*;
    use ProductUnit::*;

    vec![
        Product::new(NONE_ID, "None", dec!(0), Fabric, PerMeter),
        // Fabrics
        Product::new("cotton-plain", "Cotton - Plain", dec!(10.5), Fabric, PerMeter)
            .with_fabric_width(dec!(1.4)),
        Product::new("cotton-printed", "Cotton - Printed", dec!(14.0), Fabric, PerMeter)
            .with_fabric_width(dec!(1.4)),
        Product::new("linen-blend", "Linen Blend", dec!(21.0), Fabric, PerMeter)
            .with_fabric_width(dec!(1.4)),
        Product::new("velvet", "Velvet", dec!(28.0), Fabric, PerMeter).with_fabric_width(dec!(2.8)),
        // Sheers and linings
        Product::new("sheer-voile", "Sheer Voile", dec!(8.5), Sheer, PerMeter)
            .with_fabric_width(dec!(2.8)),
        Product::new("dimout-lining", "Dimout Lining", dec!(11.0), Blackout, PerMeter)
            .with_fabric_width(dec!(1.4)),
        Product::new("blackout-lining", "Blackout Lining", dec!(17.0), Blackout, PerMeter)
            .with_fabric_width(dec!(1.4)),
        // Blinds
        Product::new(
            "roller-blind-standard",
            "Roller Blind - Standard",
            dec!(35.0),
            Blinds,
            PerSquareMeter,
        ),
        Product::new(
            "venetian-blind-wood",
            "Venetian Blind - Wood",
            dec!(75.0),
            Blinds,
            PerSquareMeter,
        ),
        // Motors
        Product::new("somfy-motor-s1", "Somfy Motor S1", dec!(150.0), Motor, PerItem),
        Product::new(
            "smart-curtain-motor-z1",
            "Smart Curtain Motor Z1",
            dec!(220.0),
            Motor,
            PerItem,
        ),
        // Accessories
        Product::new(
            "standard-rod-2m",
            "Standard Curtain Rod (2m)",
            dec!(25.0),
            Accessory,
            PerItem,
        ),
        Product::new("tie-back-tassel", "Tie-Back Tassel (Pair)", dec!(12.0), Accessory, PerItem),
        Product::new("acc-wave-tape", "Wave Tape", dec!(2.0), Accessory, PerMeter),
    ]
}
