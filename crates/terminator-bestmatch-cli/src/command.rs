use crate::cli::{InspectArgs, MatchArgs, RelativeArgs, ResolveArgs, SnapshotArgs};
use anyhow::{Context, Result};
use bestmatch::{
    format_candidate_report, format_control_identifiers, format_element_report, AutomationError,
    MatchConfig, NameResolver, SnapshotTree, UIElement,
};
use colored::*;
use std::fs;
use std::sync::Arc;
use tracing::{debug, info};

fn load_snapshot(args: &SnapshotArgs) -> Result<Arc<SnapshotTree>> {
    let tree = SnapshotTree::from_file(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    info!("Loaded {} elements from {}", tree.len(), args.snapshot.display());
    Ok(tree)
}

fn load_config(args: &MatchArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<MatchConfig>(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    if let Some(cutoff) = args.cutoff {
        config.cutoff = cutoff;
    }
    config.validate()?;
    debug!("Using {:?}", config);
    Ok(config)
}

fn print_element(element: &UIElement) -> Result<()> {
    println!("    automation id: '{}'", element.automation_id()?);
    println!("    name:          '{}'", element.name()?);
    println!("    class name:    '{}'", element.class_name()?);
    println!("    control type:  {}", element.control_type()?);
    Ok(())
}

pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let tree = load_snapshot(&args.snapshot)?;
    let root = tree.root();

    let mut report = format_element_report(&root)?;
    report.push_str("\n-----------------------------------------\n");
    report.push_str(&format_control_identifiers(&root)?);

    match args.output {
        Some(path) => {
            fs::write(&path, report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Report written to {}", "✓".green(), path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

/// Returns false when at least one name did not resolve.
pub fn handle_resolve(args: ResolveArgs) -> Result<bool> {
    let tree = load_snapshot(&args.snapshot)?;
    let config = load_config(&args.matching)?;
    let mut resolver = NameResolver::with_config(tree.root(), config)?;

    let mut all_found = true;
    for name in &args.names {
        match resolver.find_best_match(name) {
            Ok(found) => {
                let kind = if found.exact { "exact" } else { "fuzzy" };
                println!(
                    "{} {} -> '{}' ({kind}, score {:.3})",
                    "✓".green(),
                    name.bold(),
                    found.candidate,
                    found.score
                );
                print_element(&found.element)?;
                let queries = resolver.queries_producing(&found.element)?;
                println!("    also reachable as: {}", queries.join(", "));
            }
            Err(e @ AutomationError::NoMatch { .. }) => {
                all_found = false;
                println!("{} {}: {e}", "✗".red(), name.bold());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(all_found)
}

pub fn handle_candidates(args: SnapshotArgs) -> Result<()> {
    let tree = load_snapshot(&args)?;
    let mut resolver = NameResolver::new(tree.root())?;
    print!("{}", format_candidate_report(resolver.catalog()?));
    Ok(())
}

/// Returns false when the path does not lead anywhere.
pub fn handle_relative(args: RelativeArgs) -> Result<bool> {
    let tree = load_snapshot(&args.snapshot)?;
    let config = load_config(&args.matching)?;
    let mut resolver = NameResolver::with_config(tree.root(), config)?;

    match resolver.find_relative(&args.path) {
        Ok(element) => {
            println!("{} {}", "✓".green(), args.path.bold());
            print_element(&element)?;
            Ok(true)
        }
        Err(e) if e.is_not_found() => {
            println!("{} {}: {e}", "✗".red(), args.path.bold());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
