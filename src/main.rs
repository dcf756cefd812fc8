use anyhow::Result;
use clap::Parser;

use release_tagger::config::{self, ActionInputs, EventContext};
use release_tagger::github::GitHubClient;
use release_tagger::router::Router;
use release_tagger::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-tagger",
    about = "Derive SemVer RC/GA/patch tags and movable alias tags from release branches",
    after_help = "Environment variables (used as defaults when flags are not provided):\n  \
                  INPUT_TOKEN, GITHUB_TOKEN    GitHub token for authentication\n  \
                  INPUT_DEBUG                  Enable debug logging (true/false)\n  \
                  INPUT_DRY_RUN                Compute without creating tags (true/false)\n  \
                  INPUT_TARGET_BRANCH          Target branch for workflow_dispatch\n  \
                  INPUT_ALIASES                Update vX / vX.Y alias tags (true/false)\n  \
                  INPUT_RELEASE_PREFIX         Release branch prefix (default: release/v)\n  \
                  INPUT_TAG_PREFIX             Version tag prefix (default: v)"
)]
struct Args {
    #[arg(long, help = "GitHub token for authentication")]
    token: Option<String>,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,

    #[arg(long, help = "Preview what would happen without creating tags")]
    dry_run: bool,

    #[arg(long, help = "Target branch for workflow_dispatch events")]
    target_branch: Option<String>,

    #[arg(long, help = "Update major (vX) and minor (vX.Y) alias tags")]
    aliases: bool,

    #[arg(long, help = "Prefix for release branch names")]
    release_prefix: Option<String>,

    #[arg(long, help = "Prefix for version tags and aliases")]
    tag_prefix: Option<String>,
}

impl Args {
    /// Merge CLI flags with their INPUT_* environment defaults
    fn resolve(self) -> ActionInputs {
        ActionInputs {
            token: self.token.unwrap_or_else(|| {
                config::env_or("INPUT_TOKEN", &config::env_or_empty("GITHUB_TOKEN"))
            }),
            debug: self.debug || config::env_flag("INPUT_DEBUG"),
            dry_run: self.dry_run || config::env_flag("INPUT_DRY_RUN"),
            target_branch: self
                .target_branch
                .unwrap_or_else(|| config::env_or_empty("INPUT_TARGET_BRANCH")),
            aliases: self.aliases || config::env_flag("INPUT_ALIASES"),
            release_prefix: self.release_prefix.unwrap_or_else(|| {
                config::env_or("INPUT_RELEASE_PREFIX", config::DEFAULT_RELEASE_PREFIX)
            }),
            tag_prefix: self
                .tag_prefix
                .unwrap_or_else(|| config::env_or("INPUT_TAG_PREFIX", config::DEFAULT_TAG_PREFIX)),
        }
    }
}

fn main() -> Result<()> {
    let inputs = Args::parse().resolve();
    ui::set_debug(inputs.debug);

    if let Err(e) = inputs.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let context = EventContext::from_env();
    ui::display_debug(&format!(
        "Event: {}, Ref: {} ({}), SHA: {}",
        context.event_name,
        context.ref_name,
        context.ref_type,
        ui::short_sha(&context.sha)
    ));

    let client = GitHubClient::new(&inputs.token, &context.repository);
    let router = match Router::new(&client, &inputs) {
        Ok(router) => router,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let outputs = match router.dispatch(&context) {
        Ok(outputs) => outputs,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    outputs.write()?;
    Ok(())
}
