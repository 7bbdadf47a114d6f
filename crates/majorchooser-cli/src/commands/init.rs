//! The `majorchooser init` command.

use std::path::Path;

use anyhow::Result;

use majorchooser_core::catalog::Catalog;

pub fn execute() -> Result<()> {
    // Create majorchooser.toml
    if Path::new("majorchooser.toml").exists() {
        println!("majorchooser.toml already exists, skipping.");
    } else {
        std::fs::write("majorchooser.toml", SAMPLE_CONFIG)?;
        println!("Created majorchooser.toml");
    }

    // Create catalog.toml from the built-in catalog
    if Path::new("catalog.toml").exists() {
        println!("catalog.toml already exists, skipping.");
    } else {
        let catalog = Catalog::builtin().to_toml()?;
        std::fs::write("catalog.toml", format!("{CATALOG_HEADER}{catalog}"))?;
        println!("Created catalog.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit catalog.toml to describe your majors");
    println!("  2. Run: majorchooser validate");
    println!("  3. Run: majorchooser quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# majorchooser configuration

# JSON file holding the edited question bank
store_path = "./majorchooser-store.json"

# Majors and default questions
catalog_path = "catalog.toml"
"#;

const CATALOG_HEADER: &str = "# majorchooser catalog
#
# Major ids must run 1, 2, 3, ... in order: weights[i] applies to major i + 1.
# Questions seed an empty store; edits are kept in the store afterwards.

";
