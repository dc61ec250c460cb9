//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// mdBook preprocessor expanding `{{name}}` placeholders in chapters.
///
/// Without a subcommand, reads `[context, book]` JSON from stdin and writes
/// the processed book to stdout.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with variables overriding or extending the built-in table
    #[arg(short = 'f', long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub vars: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Tell mdBook whether a renderer is supported (always yes)
    Supports {
        /// Renderer name passed by mdBook (e.g. `html`)
        renderer: Option<String>,

        /// Extra arguments, accepted and ignored
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        rest: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_pipeline() {
        let cli = Cli::try_parse_from(["mdbook-expand-vars"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.vars.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_supports_with_renderer() {
        let cli = Cli::try_parse_from(["mdbook-expand-vars", "supports", "html"]).unwrap();
        match cli.command {
            Some(Commands::Supports { renderer, .. }) => {
                assert_eq!(renderer.as_deref(), Some("html"))
            }
            None => panic!("expected supports"),
        }
    }

    #[test]
    fn test_supports_without_renderer() {
        let cli = Cli::try_parse_from(["mdbook-expand-vars", "supports"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Supports { renderer: None, .. })
        ));
    }

    #[test]
    fn test_supports_ignores_extra_args() {
        let cli = Cli::try_parse_from(["mdbook-expand-vars", "supports", "html", "extra", "--flag"])
            .unwrap();
        match cli.command {
            Some(Commands::Supports { renderer, rest }) => {
                assert_eq!(renderer.as_deref(), Some("html"));
                assert_eq!(rest, ["extra", "--flag"]);
            }
            None => panic!("expected supports"),
        }
    }

    #[test]
    fn test_vars_file_option() {
        let cli = Cli::try_parse_from(["mdbook-expand-vars", "-f", "vars.toml", "-v"]).unwrap();
        assert_eq!(cli.vars, Some(PathBuf::from("vars.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["mdbook-expand-vars", "render"]).is_err());
    }
}
