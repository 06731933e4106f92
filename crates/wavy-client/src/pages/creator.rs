use std::sync::Arc;

use tokio::sync::watch;
use wavy_core::{Credential, ProfileStatus, Video};

use super::{log_out, Mount, PageError, PageSettings};
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::nav::Navigator;
use crate::poller::{PollSession, PollState};
use crate::token::{BestEffort, TokenManager, TokenStore};

/// What the creator dashboard shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatorView {
    pub loading: bool,
    pub profile: Option<ProfileStatus>,
    pub videos: Vec<Video>,
    pub error: Option<String>,
}

impl CreatorView {
    /// Progress bar value. Zero until a profile snapshot has arrived.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.profile
            .as_ref()
            .map_or(0, ProfileStatus::progress_percent)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.profile.as_ref().is_some_and(ProfileStatus::is_complete)
    }

    /// A fresh snapshot replaces any earlier fetch error.
    fn apply(&mut self, status: ProfileStatus) {
        if let Some(videos) = &status.videos {
            self.videos.clone_from(videos);
        }
        self.profile = Some(status);
        self.error = None;
    }
}

/// Creator dashboard: loads videos once, then polls the profile until
/// processing completes.
pub struct CreatorDashboard<S> {
    client: Arc<ApiClient>,
    tokens: Arc<TokenManager<S>>,
    nav: Arc<dyn Navigator>,
    settings: PageSettings,
    token: Credential,
    view: Arc<watch::Sender<CreatorView>>,
    poller: PollSession,
}

impl<S: TokenStore + 'static> CreatorDashboard<S> {
    /// Mounts the page.
    ///
    /// Without a credential, or when the backend rejects it, the navigator is
    /// sent to the login page and no polling starts. Any other failure of the
    /// initial fetch is shown inline and polling still starts.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Poller`] if polling cannot start, for example
    /// outside a Tokio runtime or with a zero interval.
    pub async fn mount(
        client: Arc<ApiClient>,
        tokens: Arc<TokenManager<S>>,
        nav: Arc<dyn Navigator>,
        settings: PageSettings,
    ) -> Result<Mount<Self>, PageError> {
        let Some(token) = tokens.resolve_token(nav.as_ref()) else {
            tracing::info!("no credential; redirecting to login");
            nav.push(&settings.login_path);
            return Ok(Mount::RedirectedToLogin);
        };

        let (view, _) = watch::channel(CreatorView {
            loading: true,
            ..CreatorView::default()
        });

        match client.get_videos(&token).await {
            Ok(status) => view.send_modify(|v| {
                v.loading = false;
                v.videos = status.videos().to_vec();
                v.profile = Some(status);
            }),
            Err(ClientError::Unauthorized { .. }) => {
                tracing::info!("credential rejected; redirecting to login");
                nav.push(&settings.login_path);
                return Ok(Mount::RedirectedToLogin);
            }
            Err(e) => {
                tracing::warn!(error = %e, "initial video fetch failed");
                view.send_modify(|v| {
                    v.loading = false;
                    v.error = Some("Failed to fetch videos".to_owned());
                });
            }
        }

        let view = Arc::new(view);
        let mut poller = PollSession::new(settings.poll_interval);
        let on_update = {
            let view = Arc::clone(&view);
            move |status: ProfileStatus| view.send_modify(|v| v.apply(status))
        };
        let on_unauthorized = {
            let nav = Arc::clone(&nav);
            let login_path = settings.login_path.clone();
            move || nav.push(&login_path)
        };
        poller.start(Arc::clone(&client), token.clone(), on_update, on_unauthorized)?;

        Ok(Mount::Ready(Self {
            client,
            tokens,
            nav,
            settings,
            token,
            view,
            poller,
        }))
    }

    /// Current snapshot of the view.
    #[must_use]
    pub fn view(&self) -> CreatorView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CreatorView> {
        self.view.subscribe()
    }

    #[must_use]
    pub fn poll_state(&self) -> PollState {
        self.poller.state()
    }

    /// Stops polling. No view update happens after this returns.
    pub fn unmount(mut self) {
        self.poller.stop();
    }

    /// Stops polling, clears the session, and goes to the login page.
    pub async fn logout(mut self) -> BestEffort {
        self.poller.stop();
        log_out(
            &self.client,
            &self.tokens,
            self.nav.as_ref(),
            Some(&self.token),
            &self.settings.login_path,
        )
        .await
    }
}
