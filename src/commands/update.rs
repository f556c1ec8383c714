use crate::MapmanContext;
use crate::manifest::Manifest;
use crate::output;
use crate::reconcile::{Outcome, Reconciler};
use crate::scanner::CampaignScanner;
use crate::utils::paths::file_name_string;
use anyhow::Result;
use tracing::info;

/// Rescans the campaigns directory and rewrites the manifest.
///
/// With `dry_run` the rebuilt manifest is printed to stdout and nothing is
/// written.
///
/// # Errors
///
/// Returns an error if the prior manifest cannot be parsed, the campaigns
/// directory is missing, an asset cannot be read, or the manifest cannot be
/// written. No file is touched when an error occurs.
pub fn execute(ctx: &MapmanContext, dry_run: bool) -> Result<()> {
    let outcome = build(ctx)?;
    print_reports(&outcome);

    if dry_run {
        println!("{}", outcome.manifest.to_json()?);
        output::info("Dry run: manifest not written");
        return Ok(());
    }

    outcome.manifest.save(&ctx.manifest_path)?;
    info!(
        path = %ctx.manifest_path.display(),
        campaigns = outcome.manifest.len(),
        assets = outcome.manifest.asset_count(),
        "Manifest written"
    );

    output::success(&format!("✓ {} complete", file_name_string(&ctx.manifest_path)));
    Ok(())
}

/// Runs the scan and merge stages without writing anything.
///
/// # Errors
///
/// Returns an error if the prior manifest cannot be parsed, the campaigns
/// directory is missing, or an asset cannot be read.
pub fn build(ctx: &MapmanContext) -> Result<Outcome> {
    let prior = Manifest::load(&ctx.manifest_path)?;
    let campaigns = CampaignScanner::new(ctx.campaigns_dir.clone(), &ctx.config.scan)?.scan()?;
    Reconciler::new(&ctx.repo_root, &ctx.fetch).reconcile_all(&campaigns, &prior)
}

/// Prints per-campaign reports in verbose mode.
fn print_reports(outcome: &Outcome) {
    for report in &outcome.reports {
        output::report(&report.to_string());
    }
    for title in &outcome.removed {
        output::action("removed", title);
    }
    if !outcome.has_changes() {
        output::report("No campaign changes");
    }
}
