//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ugc_domain::FormField;
use ugc_types::{AnalysisKind, OptionGroup, OutputFormat, WizardStep};

#[derive(Parser)]
#[command(name = "ugc-studio")]
#[command(version)]
#[command(about = "Build AI video prompts for user-generated-content ads")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analysis server URL. Uses config value if not specified.
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Free-text form field
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    ProductName,
    TargetAudience,
    ManualDescription,
    CustomMessage,
}

impl From<FieldArg> for FormField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::ProductName => FormField::ProductName,
            FieldArg::TargetAudience => FormField::TargetAudience,
            FieldArg::ManualDescription => FormField::ManualDescription,
            FieldArg::CustomMessage => FormField::CustomMessage,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current session: step, selections, analyses
    Status,

    /// Jump to a wizard step
    Goto {
        step: WizardStep,
    },

    /// Move to the next wizard step
    Next,

    /// Move to the previous wizard step
    Prev,

    /// List the options of a group (all groups if omitted)
    Options {
        group: Option<OptionGroup>,
    },

    /// Select an option
    Select {
        group: OptionGroup,
        /// Option id (actor name for character-archetype)
        value: String,
    },

    /// Upload an image to the analysis server
    Analyze {
        /// Path to image file
        image: PathBuf,

        /// What the image shows
        #[arg(long, short = 'k', value_enum, default_value = "product")]
        kind: AnalysisKind,
    },

    /// Describe the product instead of uploading an image
    Manual {
        /// Product name
        #[arg(long, short = 'n')]
        name: String,

        /// Product description
        #[arg(long, short = 'd')]
        description: String,
    },

    /// Set a free-text field
    Form {
        field: FieldArg,
        /// New value (empty clears the field)
        value: String,
    },

    /// Assemble the prompt
    Generate {
        /// Also write the prompt to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Search the FAQ
    Faq {
        /// Search text
        query: Option<String>,

        /// Restrict to one category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Show a single entry by its slug
        #[arg(long)]
        slug: Option<String>,
    },

    /// Show or change the theme
    Theme {
        /// Theme name (light, dark, cyberpunk, sunset, ocean, forest, royal, rose)
        name: Option<String>,

        /// Switch between dark and light
        #[arg(long, conflicts_with = "name")]
        toggle: bool,
    },

    /// Show the guided tour
    Tour {
        /// Show the tour again on next GUI start
        #[arg(long)]
        reset: bool,
    },

    /// Save the session now
    Save,

    /// Start over with default selections
    New,

    /// Show catalog source and record counts
    Catalog,

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set analysis server URL
        #[arg(long)]
        set_server: Option<String>,

        /// Set catalog directory
        #[arg(long)]
        set_catalog_dir: Option<PathBuf>,

        /// Set catalog server URL (empty to unset)
        #[arg(long)]
        set_catalog_url: Option<String>,

        /// Set analysis request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set auto-save interval in seconds
        #[arg(long)]
        set_autosave: Option<u64>,

        /// Set default output format (json, table)
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let cli = Cli::try_parse_from(["ugc-studio", "select", "hook-strategy", "trending"]).unwrap();
        match cli.command {
            Commands::Select { group, value } => {
                assert_eq!(group, OptionGroup::HookStrategy);
                assert_eq!(value, "trending");
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_analyze_defaults_to_product() {
        let cli = Cli::try_parse_from(["ugc-studio", "analyze", "shot.jpg", "-f", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Analyze { kind, image } => {
                assert_eq!(kind, AnalysisKind::Product);
                assert_eq!(image, PathBuf::from("shot.jpg"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_theme_toggle_conflicts_with_name() {
        assert!(Cli::try_parse_from(["ugc-studio", "theme", "ocean", "--toggle"]).is_err());
    }

    #[test]
    fn test_form_field_names() {
        let cli =
            Cli::try_parse_from(["ugc-studio", "form", "custom-message", "Stop scrolling"]).unwrap();
        match cli.command {
            Commands::Form { field, value } => {
                assert_eq!(FormField::from(field), FormField::CustomMessage);
                assert_eq!(value, "Stop scrolling");
            }
            _ => panic!("expected form"),
        }
    }
}
