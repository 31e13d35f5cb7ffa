//! Shell completion script generation

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write a static completion script for `shell` to stdout
pub fn run(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bash_script_names_binary() {
        let mut command = Cli::command();
        let mut out = Vec::new();
        generate(Shell::Bash, &mut command, "aerocast", &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("aerocast"));
        assert!(script.contains("baggage"));
    }
}
