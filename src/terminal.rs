use crate::errors::{PrsError, Result};
use arboard::Clipboard;
use dialoguer::Confirm;

/// User interaction the workflow needs besides plain output
pub trait Terminal {
    /// Ask a yes/no question, yes being the default
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}

pub struct InteractiveTerminal {
    assume_yes: bool,
    // Kept alive for the whole run, some platforms drop the content with it
    clipboard: Option<Clipboard>,
}

impl InteractiveTerminal {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            clipboard: None,
        }
    }
}

impl Terminal for InteractiveTerminal {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| PrsError::Prompt(e.to_string()))
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| PrsError::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard
                .set_text(text.to_string())
                .map_err(|e| PrsError::Clipboard(e.to_string()))?;
        }
        Ok(())
    }
}

/// Records everything, answers with a fixed choice
#[cfg(test)]
#[derive(Default)]
pub struct MockTerminal {
    pub answer: bool,
    pub prompts: Vec<String>,
    pub clipboard: Vec<String>,
}

#[cfg(test)]
impl MockTerminal {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Terminal for MockTerminal {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self.answer)
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        self.clipboard.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_yes_skips_prompt() {
        let mut terminal = InteractiveTerminal::new(true);
        assert!(terminal.confirm("Open 2 pull requests?").unwrap());
    }
}
