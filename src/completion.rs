//! # Shell Completion Module
//!
//! Completion scripts for the `moodtune` CLI, plus the mood list used to
//! complete `--mood` arguments.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! moodtune completion bash > ~/.local/share/bash-completion/completions/moodtune
//!
//! # Generate zsh completions
//! moodtune completion zsh > ~/.config/zsh/completions/_moodtune
//! ```

use crate::vectorize::Mood;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Mood labels offered when completing `--mood`.
#[must_use]
pub fn mood_completions() -> Vec<&'static str> {
    Mood::ALL.iter().map(|mood| mood.label()).collect()
}

/// Print one mood label per line, for completion scripts.
pub fn print_mood_completions() {
    for mood in mood_completions() {
        println!("{mood}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_conversion() {
        assert_eq!(
            shell_to_completion_shell(&crate::cli::Shell::Bash),
            CompletionShell::Bash
        );
        assert_eq!(
            shell_to_completion_shell(&crate::cli::Shell::Zsh),
            CompletionShell::Zsh
        );
        assert_eq!(
            shell_to_completion_shell(&crate::cli::Shell::PowerShell),
            CompletionShell::PowerShell
        );
    }

    #[test]
    fn test_mood_completions() {
        let moods = mood_completions();
        assert_eq!(moods.len(), Mood::ALL.len());
        assert!(moods.contains(&"happy"));
        assert!(moods.contains(&"neutral"));
    }
}
