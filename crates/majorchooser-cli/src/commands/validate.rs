//! The `majorchooser validate` command.

use anyhow::Result;

use majorchooser_core::catalog::{validate_catalog, validate_questions, CatalogWarning};

use super::open_question_store;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let (catalog, store) = open_question_store(global)?;

    println!(
        "Catalog: {} majors, {} default questions",
        catalog.major_count(),
        catalog.questions.len()
    );
    let catalog_warnings = validate_catalog(&catalog);
    print_warnings(&catalog_warnings);

    println!(
        "Stored questions: {} ({})",
        store.len(),
        store.store().path().display()
    );
    let store_warnings = validate_questions(store.questions(), catalog.major_count());
    print_warnings(&store_warnings);

    let total_warnings = catalog_warnings.len() + store_warnings.len();
    if total_warnings == 0 {
        println!("All checks passed.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[CatalogWarning]) {
    for w in warnings {
        let prefix = w
            .question_id
            .map(|id| format!("  [question {id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
