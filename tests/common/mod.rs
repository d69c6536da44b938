// Shared fixtures for terpmap integration tests
#![allow(dead_code)]

use terpmap::{Category, TerpeneRecord};

/// Limonene, Myrcene and Pinene: the three-record fixture.
pub fn three_terpenes() -> Vec<TerpeneRecord> {
    vec![
        TerpeneRecord::new("limonene", "Limonene")
            .with_aroma("Citrus")
            .with_sources(["Lemon", "Orange rind"])
            .with_effects(["energizing", "mood-enhancing"])
            .with_category(Category::Core),
        TerpeneRecord::new("myrcene", "Myrcene")
            .with_aroma("Earthy, musky")
            .with_sources(["Mango", "Hops"])
            .with_effects(["sedative"])
            .with_category(Category::Core),
        TerpeneRecord::new("pinene", "Pinene")
            .with_aroma("Pine")
            .with_sources(["Pine needles", "Rosemary"])
            .with_effects(["focus"])
            .with_category(Category::Secondary),
    ]
}

/// A mixed catalog covering every tier plus missing and invalid categories.
pub fn mixed_catalog() -> Vec<TerpeneRecord> {
    let mut records = three_terpenes();
    records.extend([
        TerpeneRecord::new("linalool", "Linalool")
            .with_aroma("Floral, lavender")
            .with_sources(["Lavender"])
            .with_effects(["anxiolytic", "sedative"])
            .with_category(Category::Secondary),
        TerpeneRecord::new("terpinolene", "Terpinolene")
            .with_aroma("Herbal")
            .with_effects(["energizing", "antioxidant"])
            .with_category(Category::Minor),
        TerpeneRecord::new("aardvarkene", "Aardvarkene")
            .with_aroma("Odd")
            .with_effects(["focus", "focus"])
            .with_category(Some("Bogus")),
        TerpeneRecord::new("nerolidol", "Nerolidol")
            .with_aroma("Woody")
            .with_effects(Vec::<String>::new()),
    ]);
    records
}

pub fn names<'a>(records: impl IntoIterator<Item = &'a TerpeneRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.name.as_str()).collect()
}

/// JSON catalog used by the CLI tests.
pub const CATALOG_JSON: &str = r#"{
  "terpenes": [
    {
      "id": "limonene",
      "name": "Limonene",
      "aroma": "Citrus",
      "description": "Bright citrus terpene",
      "sources": ["Lemon", "Orange rind"],
      "effects": ["energizing", "mood-enhancing"],
      "category": "Core"
    },
    {
      "id": "myrcene",
      "name": "Myrcene",
      "aroma": "Earthy",
      "sources": ["Mango"],
      "effects": ["sedative"],
      "category": "Core"
    },
    {
      "id": "pinene",
      "name": "Pinene",
      "aroma": "Pine",
      "sources": ["Pine needles"],
      "effects": ["focus"],
      "category": "Secondary"
    },
    {
      "id": "mystery",
      "name": "Mysterene",
      "aroma": "Unknown",
      "effects": null,
      "category": "Bogus"
    }
  ]
}"#;
