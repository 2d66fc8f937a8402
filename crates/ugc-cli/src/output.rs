//! Output formatting module

use serde_json::json;
use ugc_app::{Notice, NoticeKind, Studio};
use ugc_domain::{FaqIndex, FormField, OptionCard, OptionCatalog, Theme, TOUR_STEPS};
use ugc_types::{AnalysisKind, AnalysisSet, OptionGroup, OutputFormat, Result, WizardStep};

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print queued notices. Errors are reported through the command result, so
/// only success and (with `verbose`) info notices are shown.
pub fn print_notices(notices: Vec<Notice>, verbose: bool) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => println!("{}", notice.message),
            NoticeKind::Info if verbose => println!("{}", notice.message),
            _ => {}
        }
    }
}

pub fn output_status(output_format: OutputFormat, studio: &Studio) -> Result<()> {
    let view = studio.wizard_view();

    if output_format == OutputFormat::Json {
        let completed: Vec<WizardStep> = view
            .completed
            .iter()
            .filter(|(_, done)| *done)
            .map(|(step, _)| *step)
            .collect();
        return print_json(&json!({
            "currentStep": view.current,
            "completed": completed,
            "progress": view.progress,
            "theme": studio.theme().key(),
            "snapshot": studio.snapshot(),
            "prompt": studio.prompt(),
        }));
    }

    println!("\nUGC Prompt Studio");
    println!("=================");
    for (step, done) in view.completed {
        let marker = if step == view.current {
            ">"
        } else if done {
            "*"
        } else {
            " "
        };
        println!(" {} {}. {:<10} {}", marker, step.index() + 1, step.label(), step.hint());
    }
    println!("Progress:        {:.0}%", view.progress * 100.0);

    println!("\n--- Selections ---");
    let selection = studio.selection();
    for group in OptionGroup::ALL {
        println!("{:<20} {}", group.label(), selection.get(group));
    }

    println!("\n--- Details ---");
    let form = studio.form();
    for field in FormField::ALL {
        let value = form.get(field);
        let counter = form.counter(field);
        println!(
            "{:<20} {} ({})",
            field.label(),
            if value.is_empty() { "-" } else { value },
            counter
        );
    }

    println!("\n--- Analyses ---");
    let analyses = studio.analyses();
    match &analyses.product {
        Some(p) => println!("Product:         {} ({})", p.product_name, p.product_type),
        None => println!("Product:         -"),
    }
    match &analyses.actor {
        Some(a) => println!("Actor:           {}", a.actor_description),
        None => println!("Actor:           -"),
    }
    match &analyses.scene {
        Some(s) => println!("Scene:           {}", s.scene_description),
        None => println!("Scene:           -"),
    }

    println!("\nTheme:           {}", studio.theme().label());
    if studio.prompt().is_some() {
        println!("Prompt:          generated (run `ugc-studio generate` to print)");
    }

    Ok(())
}

pub fn output_options(
    output_format: OutputFormat,
    groups: &[(OptionGroup, Vec<OptionCard>)],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value: serde_json::Map<String, serde_json::Value> = groups
            .iter()
            .map(|(group, cards)| (group.key().to_string(), json!(cards)))
            .collect();
        return print_json(&value);
    }

    for (group, cards) in groups {
        println!("\n{}", group.label());
        println!("{}", "-".repeat(group.label().len()));
        if cards.is_empty() {
            println!("  (no options)");
        }
        for card in cards {
            let marker = if card.active { "*" } else { " " };
            match &card.detail {
                Some(detail) => println!(" {} {:<20} {:<24} {}", marker, card.value, card.name, detail),
                None => println!(" {} {:<20} {}", marker, card.value, card.name),
            }
        }
    }
    Ok(())
}

pub fn output_prompt(output_format: OutputFormat, prompt: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&json!({ "prompt": prompt, "characters": prompt.chars().count() }));
    }
    println!("\n{}", prompt);
    Ok(())
}

fn highlighted(index: &FaqIndex, text: &str) -> String {
    index
        .highlight(text)
        .into_iter()
        .map(|span| {
            if span.highlighted {
                format!("[{}]", span.text)
            } else {
                span.text
            }
        })
        .collect()
}

pub fn output_faq(output_format: OutputFormat, index: &FaqIndex) -> Result<()> {
    let view = index.view();

    if output_format == OutputFormat::Json {
        let entries: Vec<_> = view
            .visible
            .iter()
            .filter_map(|id| index.entry(*id))
            .map(|e| {
                json!({
                    "slug": e.slug(),
                    "category": e.category,
                    "question": e.question,
                    "answer": e.answer,
                })
            })
            .collect();
        return print_json(&json!({ "query": index.query(), "category": index.category(), "entries": entries }));
    }

    if view.no_results {
        println!("No results found for \"{}\"", index.query());
        return Ok(());
    }

    for (category, shown) in &view.sections {
        if !shown {
            continue;
        }
        let title = index
            .sections()
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, t)| t.as_str())
            .unwrap_or(category.as_str());
        println!("\n{}", title);
        println!("{}", "=".repeat(title.len()));
        for id in view.visible.iter().copied() {
            let Some(entry) = index.entry(id) else { continue };
            if entry.category != *category {
                continue;
            }
            println!("\nQ: {}", highlighted(index, &entry.question));
            if index.is_expanded(id) || !index.query().is_empty() {
                println!("A: {}", highlighted(index, &entry.answer));
            }
            println!("   #{}", entry.slug());
        }
    }
    Ok(())
}

pub fn output_themes(output_format: OutputFormat, current: Theme) -> Result<()> {
    if output_format == OutputFormat::Json {
        let themes: Vec<_> = Theme::ALL
            .iter()
            .map(|t| json!({ "name": t.key(), "label": t.label(), "active": *t == current }))
            .collect();
        return print_json(&themes);
    }

    for theme in Theme::ALL {
        let marker = if theme == current { "*" } else { " " };
        println!(" {} {:<10} {}", marker, theme.key(), theme.description());
    }
    Ok(())
}

pub fn output_tour(output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Json {
        let steps: Vec<_> = TOUR_STEPS
            .iter()
            .map(|s| json!({ "title": s.title, "content": s.content }))
            .collect();
        return print_json(&steps);
    }

    for (i, step) in TOUR_STEPS.iter().enumerate() {
        println!("\n[{} of {}] {}", i + 1, TOUR_STEPS.len(), step.title);
        println!("{}", step.content);
    }
    Ok(())
}

pub fn output_catalog(output_format: OutputFormat, source: &str, catalog: &OptionCatalog) -> Result<()> {
    let counts: Vec<(OptionGroup, usize)> = OptionGroup::ALL
        .iter()
        .map(|g| {
            let n = match g {
                OptionGroup::CharacterArchetype => catalog.actors.len(),
                _ => catalog.group(*g).len(),
            };
            (*g, n)
        })
        .collect();

    if output_format == OutputFormat::Json {
        let groups: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(g, n)| (g.key().to_string(), json!(n)))
            .collect();
        return print_json(&json!({ "source": source, "groups": groups }));
    }

    println!("\nCatalog");
    println!("=======");
    println!("Source:              {}", source);
    for (group, n) in counts {
        println!("{:<20} {}", group.label(), n);
    }
    Ok(())
}

pub fn output_faq_entry(output_format: OutputFormat, index: &FaqIndex, id: usize) -> Result<()> {
    let Some(entry) = index.entry(id) else {
        return Ok(());
    };
    if output_format == OutputFormat::Json {
        return print_json(&json!({
            "slug": entry.slug(),
            "category": entry.category,
            "question": entry.question,
            "answer": entry.answer,
        }));
    }
    println!("\nQ: {}", entry.question);
    println!("A: {}", entry.answer);
    Ok(())
}

pub fn output_analysis(output_format: OutputFormat, analyses: &AnalysisSet, kind: AnalysisKind) -> Result<()> {
    if output_format == OutputFormat::Json {
        return match kind {
            AnalysisKind::Product => print_json(&analyses.product),
            AnalysisKind::Actor => print_json(&analyses.actor),
            AnalysisKind::Scene => print_json(&analyses.scene),
        };
    }

    match kind {
        AnalysisKind::Product => {
            let Some(p) = &analyses.product else { return Ok(()) };
            println!("\nProduct Analysis");
            println!("================");
            println!("Name:            {}", p.product_name);
            println!("Type:            {}", p.product_type);
            if !p.key_features.is_empty() {
                println!("Features:        {}", p.key_features.join(", "));
            }
            if !p.suggested_setting.is_empty() {
                println!("Setting:         {}", p.suggested_setting);
            }
            if !p.emotional_appeal.is_empty() {
                println!("Appeal:          {}", p.emotional_appeal);
            }
            println!("\nDescription:");
            println!("{}", p.detailed_description);
        }
        AnalysisKind::Actor => {
            if let Some(a) = &analyses.actor {
                println!("\nActor: {}", a.actor_description);
            }
        }
        AnalysisKind::Scene => {
            if let Some(s) = &analyses.scene {
                println!("\nScene: {}", s.scene_description);
            }
        }
    }
    Ok(())
}
