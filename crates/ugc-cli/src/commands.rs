//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{
    output_analysis, output_catalog, output_faq, output_faq_entry, output_options, output_prompt,
    output_status, output_themes, output_tour, print_notices,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use ugc_app::{
    load_catalog_or_empty, load_faq_or_empty, local_source, Config, RemoteCatalog, Studio,
};
use ugc_domain::{FaqSection, FormField, OptionCatalog, Theme};
use ugc_types::{AnalysisKind, Error, OptionGroup, OutputFormat, Result};
use ugc_vision::{HttpAnalyzer, ImageAnalyzer};

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Where the catalog comes from, for display
fn catalog_source_label(config: &Config) -> String {
    if let Some(ref url) = config.catalog_url {
        url.clone()
    } else if let Some(ref dir) = config.catalog_dir {
        dir.display().to_string()
    } else {
        "built-in".to_string()
    }
}

fn load_catalog(config: &Config) -> Result<(Arc<OptionCatalog>, Vec<FaqSection>)> {
    let source = local_source(config);
    let faq = load_faq_or_empty(source.as_ref());

    let catalog = match config.catalog_url {
        Some(ref url) => {
            let remote = RemoteCatalog::new(url, config.request_timeout())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(remote.fetch_or_empty())
        }
        None => load_catalog_or_empty(source.as_ref()),
    };
    Ok((catalog, faq))
}

fn open_studio(config: &Config) -> Result<Studio> {
    let (catalog, faq) = load_catalog(config)?;
    Studio::open(config, catalog, &faq, Instant::now())
}

/// Commands that leave the saved session alone
fn is_read_only(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Status
            | Commands::Options { .. }
            | Commands::Faq { .. }
            | Commands::Tour { .. }
            | Commands::New
            | Commands::Save
    )
}

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref server) = cli.server {
        config.server_url = server.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Config {
            show,
            set_server,
            set_catalog_dir,
            set_catalog_url,
            set_timeout,
            set_autosave,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_server.clone(),
            set_catalog_dir.clone(),
            set_catalog_url.clone(),
            *set_timeout,
            *set_autosave,
            *set_output,
            *reset,
        ),
        Commands::Catalog => cmd_catalog(&config, output_format),
        command => {
            let mut studio = open_studio(&config)?;
            let result = run_session_command(command, &config, &mut studio, output_format);

            let saved = if is_read_only(command) {
                Ok(())
            } else {
                studio.persist(Instant::now()).map(|outcome| {
                    debug!("session persisted: {:?}", outcome);
                })
            };
            print_notices(studio.notices_mut().drain(), cli.verbose);
            result?;
            saved
        }
    }
}

fn run_session_command(
    command: &Commands,
    config: &Config,
    studio: &mut Studio,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Status => output_status(output_format, studio),
        Commands::Goto { step } => cmd_navigate(studio, |s| s.switch_to(*step)),
        Commands::Next => cmd_navigate(studio, |s| s.next()),
        Commands::Prev => cmd_navigate(studio, |s| s.previous()),
        Commands::Options { group } => {
            let groups: Vec<OptionGroup> = match group {
                Some(g) => vec![*g],
                None => OptionGroup::ALL.to_vec(),
            };
            let cards: Vec<_> = groups.into_iter().map(|g| (g, studio.cards(g))).collect();
            output_options(output_format, &cards)
        }
        Commands::Select { group, value } => cmd_select(studio, *group, value),
        Commands::Analyze { image, kind } => {
            cmd_analyze(studio, config, image, *kind, output_format)
        }
        Commands::Manual { name, description } => {
            cmd_manual(studio, name, description, output_format)
        }
        Commands::Form { field, value } => cmd_form(studio, (*field).into(), value),
        Commands::Generate { output } => cmd_generate(studio, output.as_deref(), output_format),
        Commands::Faq {
            query,
            category,
            slug,
        } => cmd_faq(studio, query.as_deref(), category.as_deref(), slug.as_deref(), output_format),
        Commands::Theme { name, toggle } => cmd_theme(studio, name.as_deref(), *toggle, output_format),
        Commands::Tour { reset } => {
            if *reset {
                studio.reset_tour()?;
                println!("The guided tour will show again on next start");
                Ok(())
            } else {
                output_tour(output_format)
            }
        }
        Commands::Save => studio.save_now(Instant::now()).map(|_| ()),
        Commands::New => studio.new_project(Instant::now()),
        Commands::Config { .. } | Commands::Catalog => Ok(()),
    }
}

fn cmd_navigate(studio: &mut Studio, step: impl FnOnce(&mut Studio) -> bool) -> Result<()> {
    let moved = step(studio);
    let current = studio.current_step();
    if moved {
        println!("Step {}: {}", current.index() + 1, current.label());
    } else {
        println!("Already at step {}: {}", current.index() + 1, current.label());
    }
    println!("{}", current.hint());
    Ok(())
}

fn cmd_select(studio: &mut Studio, group: OptionGroup, value: &str) -> Result<()> {
    let known = studio.cards(group).iter().any(|c| c.value == value);
    if !known {
        warn!("'{}' is not in the {} catalog", value, group.label());
    }
    studio.select(group, value);
    println!("{}: {}", group.label(), value);
    Ok(())
}

fn cmd_analyze(
    studio: &mut Studio,
    config: &Config,
    image: &Path,
    kind: AnalysisKind,
    output_format: OutputFormat,
) -> Result<()> {
    let upload = studio.load_upload(image, Instant::now())?;
    let analyzer = HttpAnalyzer::new(&config.server_url, config.request_timeout())?;
    let rt = tokio::runtime::Runtime::new()?;

    info!("Sending {} to {}", upload.file_name, analyzer.endpoint_url(kind));
    let pb = spinner(format!(
        "Analyzing {} ({}) ...",
        upload.file_name,
        upload.size_label()
    ));
    let ticket = studio.begin_analysis(kind);
    let result = rt.block_on(analyzer.analyze(kind, &upload));
    pb.finish_and_clear();

    let failed = result.is_err();
    studio.complete_analysis(ticket, result, Instant::now());
    if failed {
        let message = studio
            .notices()
            .last()
            .map(|n| n.message.clone())
            .unwrap_or_else(|| format!("{} analysis failed", kind.label()));
        return Err(Error::Remote(message));
    }

    if let Some(step) = studio.apply_pending_advance() {
        info!("Advanced to {}", step);
    }
    output_analysis(output_format, studio.analyses(), kind)
}

fn cmd_manual(
    studio: &mut Studio,
    name: &str,
    description: &str,
    output_format: OutputFormat,
) -> Result<()> {
    studio.select(OptionGroup::AnalysisMethod, "manual");
    studio.set_form_field(FormField::ProductName, name);
    studio.set_form_field(FormField::ManualDescription, description);
    studio.use_manual_description(Instant::now())?;
    studio.apply_pending_advance();
    output_analysis(output_format, studio.analyses(), AnalysisKind::Product)
}

fn cmd_form(studio: &mut Studio, field: FormField, value: &str) -> Result<()> {
    studio.set_form_field(field, value);
    let counter = studio.form().counter(field);
    println!("{}: {}", field.label(), counter);
    if studio.form().over_limit().contains(&field) {
        warn!("{} is over its {} character limit", field.label(), field.limit());
    }
    Ok(())
}

fn cmd_generate(studio: &mut Studio, output: Option<&Path>, output_format: OutputFormat) -> Result<()> {
    let prompt = studio.generate_prompt(Instant::now())?;

    if let Some(path) = output {
        std::fs::write(path, &prompt)?;
        info!("Prompt written to {}", path.display());
    }
    output_prompt(output_format, &prompt)
}

fn cmd_faq(
    studio: &mut Studio,
    query: Option<&str>,
    category: Option<&str>,
    slug: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let index = studio.faq_mut();

    if let Some(slug) = slug {
        let slug = slug.trim_start_matches('#');
        let id = index
            .open_slug(slug)
            .ok_or_else(|| Error::FileNotFound(format!("FAQ entry #{}", slug)))?;
        return output_faq_entry(output_format, index, id);
    }

    if let Some(category) = category {
        index.filter_by_category(category);
    }
    match query {
        Some(q) => index.search(q),
        None => index.clear_search(),
    }
    output_faq(output_format, index)
}

fn cmd_theme(
    studio: &mut Studio,
    name: Option<&str>,
    toggle: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let now = Instant::now();
    if toggle {
        studio.toggle_theme(now);
        return Ok(());
    }
    match name {
        Some(name) => {
            let theme: Theme = name.parse()?;
            if theme == studio.theme() {
                println!("Theme is already {}", theme.label());
            }
            studio.set_theme(theme, now);
            Ok(())
        }
        None => output_themes(output_format, studio.theme()),
    }
}

fn cmd_catalog(config: &Config, output_format: OutputFormat) -> Result<()> {
    let (catalog, faq) = load_catalog(config)?;
    output_catalog(output_format, &catalog_source_label(config), &catalog)?;
    if output_format != OutputFormat::Json {
        let questions: usize = faq.iter().map(|s| s.items.len()).sum();
        println!("FAQ                  {} sections, {} questions", faq.len(), questions);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_server: Option<String>,
    set_catalog_dir: Option<PathBuf>,
    set_catalog_url: Option<String>,
    set_timeout: Option<u64>,
    set_autosave: Option<u64>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(server) = set_server {
        config.server_url = server;
        modified = true;
    }

    if let Some(dir) = set_catalog_dir {
        if !ugc_app::is_catalog_dir(&dir) {
            warn!("{} has no locations.json/actors.json", dir.display());
        }
        config.catalog_dir = Some(dir);
        modified = true;
    }

    if let Some(url) = set_catalog_url {
        config.catalog_url = if url.trim().is_empty() { None } else { Some(url) };
        modified = true;
    }

    if let Some(timeout) = set_timeout {
        config.request_timeout_secs = timeout;
        modified = true;
    }

    if let Some(interval) = set_autosave {
        config.autosave_interval_secs = interval;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugc_types::WizardStep;

    #[test]
    fn test_source_label_prefers_url() {
        let config = Config {
            catalog_url: Some("http://catalog.local".to_string()),
            catalog_dir: Some(PathBuf::from("/srv/catalog")),
            ..Default::default()
        };
        assert_eq!(catalog_source_label(&config), "http://catalog.local");
        assert_eq!(catalog_source_label(&Config::default()), "built-in");
    }

    #[test]
    fn test_read_only_commands() {
        assert!(is_read_only(&Commands::Status));
        assert!(is_read_only(&Commands::New));
        assert!(!is_read_only(&Commands::Next));
        assert!(!is_read_only(&Commands::Goto {
            step: WizardStep::Hook
        }));
    }
}
