use color_eyre::Result;
use dialoguer::{Confirm, Input};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input = input.default(default_value.to_string());
    }

    input
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm = confirm.default(default_value);
    }

    confirm
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a number with optional default, re-asking until it parses
pub fn prompt_number(prompt: &str, default: Option<u32>) -> Result<u32> {
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);

        if let Some(default_value) = default {
            input = input.default(default_value.to_string());
        }

        let raw = input
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if let Some(default_value) = default {
                return Ok(default_value);
            }
            eprintln!("Invalid input. Please enter a valid number.");
            continue;
        }

        match trimmed.parse::<u32>() {
            Ok(value) => return Ok(value),
            Err(_) => eprintln!("Invalid input. Please enter a valid number."),
        }
    }
}
