//! Login, callback, and logout commands.

use reqwest::Url;
use wavy_client::{complete_callback, login_url, Navigator};

use crate::Context;

pub(crate) fn run_login_url(ctx: &Context, redirect_uri: Option<&str>) -> anyhow::Result<()> {
    let url = match redirect_uri {
        Some(redirect) => ctx.client.tiktok_login_url(redirect)?,
        None => {
            let nav = ctx.navigator_at(&ctx.settings.login_path)?;
            login_url(&ctx.client, nav.as_ref(), &ctx.settings)?
        }
    };
    println!("{url}");
    Ok(())
}

/// Simulates landing on `url`: a token in the query is stored and scrubbed.
pub(crate) fn run_open(ctx: &Context, url: Url) {
    let nav = wavy_client::MemoryNavigator::new(url);
    let token = ctx.tokens.resolve_token(&nav);
    println!("{}", nav.current_url());
    if token.is_some() {
        println!("session: active");
    } else {
        println!("session: none");
    }
}

pub(crate) async fn run_callback(ctx: &Context, url: Url) -> anyhow::Result<()> {
    let nav = wavy_client::MemoryNavigator::new(url);
    let target = complete_callback(&ctx.client, &ctx.tokens, &nav, &ctx.settings).await?;
    println!("logged in; continue at {target}");
    Ok(())
}

/// Always succeeds locally; a failed backend notification is only reported.
pub(crate) async fn run_logout(ctx: &Context) {
    let token = ctx.tokens.stored();
    let outcome = ctx.tokens.logout(&ctx.client, token.as_ref()).await;
    if let Some(e) = outcome.error() {
        eprintln!("warning: backend was not notified: {e}");
    }
    println!("logged out");
}
