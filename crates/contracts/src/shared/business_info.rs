use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Static profile of the business shown on the overview page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub description: String,
    pub about: String,
    pub name_origin: String,
    pub contact: String,
    pub owners: Vec<Owner>,
    /// Branches advertised on the overview page
    pub branches: Vec<String>,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub role: String,
}

pub static BUSINESS_INFO: Lazy<BusinessInfo> = Lazy::new(|| BusinessInfo {
    name: "CJG LPG TRADING".to_string(),
    description: "Your trusted partner for quality LPG products. We provide reliable and efficient LPG trading services.".to_string(),
    about: "We are a trusted LPG trading company dedicated to providing high-quality liquefied petroleum gas products to our customers. With multiple branches across the region, we ensure reliable and efficient service.".to_string(),
    name_origin: "The name CJG is derived from the names of their children: Christine Gomez, John Joseph Gomez, and their family last name Gomez.".to_string(),
    contact: "For inquiries, please contact us.".to_string(),
    owners: vec![
        Owner { name: "Mr. Joseph B. Gomez".to_string(), role: "Owner".to_string() },
        Owner { name: "Dr. Norelyn Gomez".to_string(), role: "Owner".to_string() },
    ],
    branches: ["BAYAN", "GULOD", "CUENCA", "STA. TERESITA", "AGONCILLO", "CALOOCAN"]
        .iter()
        .map(|b| b.to_string())
        .collect(),
    services: [
        "Retail and wholesale LPG supply",
        "Bulk tank deliveries",
        "Refill services for residential and commercial clients",
        "Quality assured products",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect(),
});

impl BusinessInfo {
    /// Blurb shown on a branch card
    pub fn branch_blurb(branch: &str) -> String {
        format!(
            "Located in the {} area, serving customers with reliable LPG delivery and services.",
            branch
        )
    }
}
