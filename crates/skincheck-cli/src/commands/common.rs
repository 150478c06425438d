use serde::Serialize;
use skincheck_core::config::AppConfig;
use skincheck_core::{DiagnosisCategory, DiagnosisRecord, ProductRecord};

use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct DiagnosisItem {
    pub category: DiagnosisCategory,
    pub title: &'static str,
    pub symptoms: &'static str,
    pub products: Vec<ProductItem>,
}

#[derive(Debug, Serialize)]
pub struct ProductItem {
    pub name: &'static str,
    pub image: &'static str,
    pub url: &'static str,
}

impl From<&ProductRecord> for ProductItem {
    fn from(product: &ProductRecord) -> Self {
        Self {
            name: product.name,
            image: product.image_reference,
            url: product.purchase_url,
        }
    }
}

pub fn diagnosis_item(category: DiagnosisCategory, record: &DiagnosisRecord) -> DiagnosisItem {
    DiagnosisItem {
        category,
        title: record.title,
        symptoms: record.symptoms,
        products: record.products.iter().map(ProductItem::from).collect(),
    }
}

/// Result screen: title, symptoms and product names.
pub fn format_result_lines(record: &DiagnosisRecord) -> Vec<String> {
    let mut lines = vec![
        record.title.to_string(),
        format!("Symptoms: {}", record.symptoms),
        "Recommended Products:".to_string(),
    ];
    lines.extend(record.product_names().map(|name| format!("- {name}")));
    lines
}

/// Product browsing screen: one numbered entry per product with its link.
pub fn format_product_lines(record: &DiagnosisRecord) -> Vec<String> {
    record
        .products
        .iter()
        .enumerate()
        .map(|(index, product)| format!("{}. {} <{}>", index + 1, product.name, product.purchase_url))
        .collect()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load profiles and resolve the app config for `profile`.
pub fn load_app_config(profile: Option<&str>) -> Result<(String, AppConfig), CliError> {
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let (profile_name, config) = profiles.resolve_app_config(profile);
    config.validate()?;
    Ok((profile_name, config))
}
