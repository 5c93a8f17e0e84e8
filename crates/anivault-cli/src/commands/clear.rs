use super::config::load_runtime;
use super::prompts;
use crate::output::Output;
use anivault_core::{ProfileStore, Slot};
use color_eyre::Result;

#[allow(clippy::too_many_arguments)]
pub async fn run_clear(
    all: bool,
    history: bool,
    bookmarks: bool,
    reminders: bool,
    activity: bool,
    fortune: bool,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let mut slots = Vec::new();
    if all {
        slots.extend(Slot::ALL);
    } else {
        if history {
            slots.push(Slot::History);
        }
        if bookmarks {
            slots.push(Slot::Bookmarks);
        }
        if reminders {
            slots.push(Slot::Reminders);
        }
        if activity {
            slots.push(Slot::Activity);
        }
        if fortune {
            slots.push(Slot::Fortune);
        }
    }

    if slots.is_empty() {
        output.warn("Nothing selected. Pick slots (e.g. 'anivault clear --history') or pass --all.");
        return Ok(());
    }

    let (paths, _config) = load_runtime()?;
    let store = ProfileStore::new(&paths)?;

    let stored: Vec<Slot> = slots.into_iter().filter(|s| store.exists(*s)).collect();
    if stored.is_empty() {
        output.info("Nothing stored in the selected slots");
        return Ok(());
    }

    if !yes {
        let names = stored.iter().map(Slot::name).collect::<Vec<_>>().join(", ");
        let confirmed = prompts::prompt_yes_no(&format!("Delete stored {}?", names), Some(false))?;
        if !confirmed {
            output.info("Aborted");
            return Ok(());
        }
    }

    for slot in stored {
        store.clear(slot)?;
        output.success(format!("Cleared {}", slot));
    }
    Ok(())
}
