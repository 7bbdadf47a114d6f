pub mod init;
pub mod majors;
pub mod questions;
pub mod quiz;
pub mod validate;

use anyhow::{Context, Result};

use majorchooser_core::catalog::Catalog;
use majorchooser_core::config::{load_config_from, ChooserConfig};
use majorchooser_core::questions::QuestionStore;
use majorchooser_core::storage::JsonFileStore;

use crate::GlobalArgs;

/// Config with command-line overrides applied.
pub fn resolve_config(global: &GlobalArgs) -> Result<ChooserConfig> {
    let mut config = load_config_from(global.config.as_deref())?;
    if let Some(store) = &global.store {
        config.store_path = store.clone();
    }
    if let Some(catalog) = &global.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    tracing::debug!(
        "store: {}, catalog: {}",
        config.store_path.display(),
        config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    Ok(config)
}

/// Load the catalog and open the question store it seeds.
pub fn open_question_store(
    global: &GlobalArgs,
) -> Result<(Catalog, QuestionStore<JsonFileStore>)> {
    let config = resolve_config(global)?;
    let catalog = config.catalog()?;
    let store = match QuestionStore::open(JsonFileStore::new(&config.store_path), &catalog) {
        Ok(store) => store,
        Err(e) if e.is_data_error() => {
            return Err(e).with_context(|| {
                format!(
                    "{} holds unreadable questions; fix or delete it to start from the defaults",
                    config.store_path.display()
                )
            });
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "failed to open question store: {}",
                    config.store_path.display()
                )
            });
        }
    };
    Ok((catalog, store))
}
