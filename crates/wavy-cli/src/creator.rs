//! Creator dashboard commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use wavy_client::{
    ClientError, CreatorDashboard, CreatorView, Mount, Navigator, PageSettings, PollState,
};

use crate::Context;

pub(crate) async fn run_videos(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let Some(token) = ctx.tokens.stored() else {
        anyhow::bail!("not logged in; run `wavy callback <URL>` first");
    };
    let status = match ctx.client.get_videos(&token).await {
        Ok(status) => status,
        Err(ClientError::Unauthorized { .. }) => {
            ctx.tokens.clear();
            anyhow::bail!("session expired; log in again");
        }
        Err(e) => return Err(e).context("Failed to fetch videos"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "processed {}/{} ({}%)",
        status.videos_processed,
        status.total_videos,
        status.progress_percent()
    );
    for video in status.videos() {
        let thumb = video.thumbnail().unwrap_or("-");
        println!("  {}  [{thumb}]", video.display_title());
    }
    Ok(())
}

/// Page settings for `watch`, with the `--interval-ms` override applied.
pub(crate) fn watch_settings(base: &PageSettings, interval_ms: Option<u64>) -> PageSettings {
    let mut settings = base.clone();
    if let Some(ms) = interval_ms {
        settings.poll_interval = Duration::from_millis(ms);
    }
    settings
}

/// Mounts the creator dashboard and prints progress until processing
/// completes, the session is rejected, or the user presses Ctrl-C.
pub(crate) async fn run_watch(ctx: &Context, interval_ms: Option<u64>) -> anyhow::Result<()> {
    let settings = watch_settings(&ctx.settings, interval_ms);
    let poll_interval = settings.poll_interval;
    let nav = ctx.navigator_at("/creator/dashboard")?;

    let mounted = CreatorDashboard::mount(
        Arc::clone(&ctx.client),
        Arc::clone(&ctx.tokens),
        Arc::clone(&nav) as Arc<dyn Navigator>,
        settings,
    )
    .await?;
    let Mount::Ready(dashboard) = mounted else {
        anyhow::bail!("not logged in; run `wavy callback <URL>` first");
    };

    let mut updates = dashboard.subscribe();
    print_view(&updates.borrow_and_update());

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                print_view(&view);
                if view.is_complete() {
                    println!("processing complete");
                    break;
                }
            }
            _ = &mut interrupt => {
                tracing::info!("interrupted; stopping");
                break;
            }
            () = tokio::time::sleep(poll_interval) => {}
        }
        if nav.current_url().path() == ctx.settings.login_path {
            dashboard.unmount();
            anyhow::bail!("session expired; log in again");
        }
        if dashboard.poll_state() == PollState::Stopped {
            break;
        }
    }

    dashboard.unmount();
    Ok(())
}

fn print_view(view: &CreatorView) {
    if let Some(error) = &view.error {
        println!("error: {error}");
    }
    match &view.profile {
        Some(profile) => println!(
            "progress: {}% ({}/{} videos, {} listed)",
            view.progress_percent(),
            profile.videos_processed,
            profile.total_videos,
            view.videos.len()
        ),
        None => println!("progress: waiting for first update"),
    }
}
