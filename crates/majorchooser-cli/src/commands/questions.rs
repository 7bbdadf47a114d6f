//! The `majorchooser questions` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use majorchooser_core::catalog::Catalog;
use majorchooser_core::error::ChooserError;
use majorchooser_core::model::Question;

use super::open_question_store;
use crate::{GlobalArgs, QuestionCommands};

pub fn execute(global: &GlobalArgs, command: QuestionCommands) -> Result<()> {
    let (catalog, mut store) = open_question_store(global)?;

    match command {
        QuestionCommands::List { weights } => {
            if store.is_empty() {
                println!("No questions.");
            } else {
                println!("{}", question_table(&catalog, store.questions(), weights));
            }
        }
        QuestionCommands::Add { text } => {
            let id = store.add_question()?;
            if let Some(text) = text {
                store.update_text(id, &text)?;
            }
            println!("Added question {id}");
        }
        QuestionCommands::SetText { id, text } => {
            store.update_text(id, &text)?;
            println!("Updated text of question {id}");
        }
        QuestionCommands::SetWeight { id, major, value } => {
            let index = major
                .checked_sub(1)
                .ok_or(ChooserError::UnknownMajor(major))? as usize;
            store.update_weight(id, index, value)?;
            let name = catalog
                .major(major)
                .map(|m| m.name.as_str())
                .unwrap_or("unknown major");
            println!("Set weight of question {id} for {name} to {value}");
        }
        QuestionCommands::Delete { id } => {
            store.delete_question(id)?;
            println!("Deleted question {id}, {} remaining", store.len());
        }
    }

    Ok(())
}

fn question_table(catalog: &Catalog, questions: &[Question], show_weights: bool) -> Table {
    let mut table = Table::new();

    let mut header = vec!["Id".to_string(), "Question".to_string()];
    if show_weights {
        header.extend(catalog.majors.iter().map(|m| m.name.clone()));
    }
    table.set_header(header);

    for q in questions {
        let mut row = vec![Cell::new(q.id), Cell::new(&q.text)];
        if show_weights {
            row.extend(catalog.majors.iter().map(|m| Cell::new(q.weight_for(m.id))));
        }
        table.add_row(row);
    }

    table
}
