use skincheck_core::catalog::{entries, lookup};
use skincheck_core::DiagnosisCategory;

use crate::commands::common::{diagnosis_item, format_product_lines, print_json, DiagnosisItem};
use crate::error::CliError;

pub fn run_catalog(category: Option<DiagnosisCategory>, as_json: bool) -> Result<(), CliError> {
    let selected: Vec<_> = match category {
        Some(category) => vec![(category, lookup(category))],
        None => entries().collect(),
    };

    if as_json {
        let items: Vec<DiagnosisItem> = selected
            .iter()
            .map(|(category, record)| diagnosis_item(*category, record))
            .collect();
        return print_json(&items);
    }

    for (index, (category, record)) in selected.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{} ({category})", record.title);
        println!("  {}", record.symptoms);
        for line in format_product_lines(record) {
            println!("  {line}");
        }
    }
    Ok(())
}
