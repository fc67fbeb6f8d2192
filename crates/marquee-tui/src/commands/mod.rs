// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Quit the app (`q!`/`quit!` accepted as aliases)
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Refetch both feed lists
    Refresh,
    // Toggle display of release years on cards
    Dates,
    // Set the grid column count
    Columns(u16),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "refresh" => Ok(Command::Refresh),
            "dates" => Ok(Command::Dates),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "columns" => match rest.parse::<u16>() {
                Ok(n) if (1..=6).contains(&n) => Ok(Command::Columns(n)),
                Ok(_) => Err("columns must be 1–6".to_string()),
                Err(_) => Err("usage: columns <1-6>".to_string()),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
