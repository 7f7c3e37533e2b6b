//! Chapter and part creation with automatic order assignment.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::app::build_api;
use folio_core::{ContentApi, Settings, SiblingScope, propose_order};

#[derive(Args)]
pub struct NewArgs {
    /// Parent id (book for chapters, chapter for parts)
    #[arg(long)]
    pub parent: String,

    /// Which collection to create in
    #[arg(long, value_enum, default_value_t = ScopeArg::Chapters)]
    pub scope: ScopeArg,

    /// Title of the new unit
    pub title: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Parent id (book for chapters, chapter for parts)
    #[arg(long)]
    pub parent: String,

    /// Which collection to list
    #[arg(long, value_enum, default_value_t = ScopeArg::Chapters)]
    pub scope: ScopeArg,

    /// Include unpublished units
    #[arg(long, default_value_t = true)]
    pub include_unpublished: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum ScopeArg {
    Chapters,
    Parts,
}

impl From<ScopeArg> for SiblingScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Chapters => SiblingScope::Chapters,
            ScopeArg::Parts => SiblingScope::Parts,
        }
    }
}

pub async fn create(args: NewArgs) -> Result<()> {
    let api = build_api(&Settings::load())?;
    let scope: SiblingScope = args.scope.into();

    // Derived fresh from the listing; degrades to 1 if the fetch fails
    let order = propose_order(&api, &args.parent, scope).await;
    println!(
        "New {} \"{}\" will take order {} (assigned automatically).",
        scope.unit_name(),
        args.title,
        style(order).bold()
    );

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Create it?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let unit = api
        .create_sibling(&args.parent, scope, &args.title, order)
        .await?;
    println!(
        "{} created {} {} at order {}",
        style("✓").green(),
        scope.unit_name(),
        unit.id,
        unit.order
    );

    Ok(())
}

pub async fn list(args: ListArgs) -> Result<()> {
    let api = build_api(&Settings::load())?;
    let scope: SiblingScope = args.scope.into();

    let mut units = api
        .list_siblings(&args.parent, scope, args.include_unpublished)
        .await?;
    units.sort_by_key(|unit| unit.order);

    if units.is_empty() {
        println!("No {} under {}.", scope.path(), args.parent);
        return Ok(());
    }

    println!("{} under {}:", scope.path(), args.parent);
    for unit in units {
        let title = unit.title.as_deref().unwrap_or("(untitled)");
        let status = if unit.published { "published" } else { "draft" };
        println!("  {:>3}. {} [{}] ({})", unit.order, title, unit.id, status);
    }

    Ok(())
}
