use std::path::Path;

use crate::cli::Cli;
use crate::model::Customization;
use crate::persist;
use crate::policy::{ExplanationMode, PhasePolicy};

/// Timing policy from preset, then `--config`, then individual flags.
pub fn resolve_policy(cli: &Cli) -> Result<PhasePolicy, String> {
    let mut policy = PhasePolicy::preset(cli.preset);

    if let Some(path) = &cli.config {
        policy = policy.overlay_file(path)?;
    }

    if let Some(secs) = cli.timer_secs {
        policy.timer_secs = secs;
    }
    if let Some(ms) = cli.reveal_ms {
        policy.reveal_ms = ms;
    }
    if cli.instant && !matches!(policy.explanation, ExplanationMode::Instant { .. }) {
        policy.explanation = ExplanationMode::instant();
    }
    if cli.typed && !matches!(policy.explanation, ExplanationMode::Typed { .. }) {
        policy.explanation = ExplanationMode::typed();
    }
    if let Some(ms) = cli.transition_ms {
        policy.transition_ms = ms;
    }
    if let Some(on_empty) = cli.on_empty {
        policy.on_empty = on_empty;
    }

    policy.validate()?;
    Ok(policy)
}

/// Branding given on the command line.
pub fn branding_flags(cli: &Cli) -> Customization {
    Customization {
        promotion_link: cli.promo.clone(),
        quiz_title: cli.title.clone(),
        footer_text: cli.footer.clone(),
        social_proof: cli.social_proof.clone(),
    }
}

/// Saved branding overlaid with flags. `store` is the branding file, if the
/// platform has a config dir.
pub fn resolve_branding(cli: &Cli, store: Option<&Path>) -> Result<Customization, String> {
    let flags = branding_flags(cli);

    let saved = match store {
        Some(path) if cli.clear_branding => {
            persist::clear_branding(path)?;
            tracing::info!(path = %path.display(), "cleared saved branding");
            None
        }
        Some(path) => persist::load_branding(path)?,
        None => None,
    };

    let branding = saved.unwrap_or_default().overlay(flags);

    if cli.save_branding {
        let path = store.ok_or("No config directory available to save branding")?;
        persist::save_branding(&branding, path)?;
        tracing::info!(path = %path.display(), "saved branding");
    }

    Ok(branding)
}
