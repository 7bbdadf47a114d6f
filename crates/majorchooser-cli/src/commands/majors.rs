//! The `majorchooser majors` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use majorchooser_core::error::ChooserError;

use super::quiz::describe_major;
use super::resolve_config;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, id: Option<u32>) -> Result<()> {
    let catalog = resolve_config(global)?.catalog()?;

    match id {
        Some(id) => {
            let major = catalog.major(id).ok_or(ChooserError::UnknownMajor(id))?;
            println!("{}", describe_major(major));
        }
        None => {
            let mut table = Table::new();
            table.set_header(vec!["Id", "Major", "College"]);
            for major in &catalog.majors {
                table.add_row(vec![
                    Cell::new(major.id),
                    Cell::new(&major.name),
                    Cell::new(&major.college),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
