use std::sync::Arc;

use wavy_core::{Campaign, Credential, NewCampaign};

use super::{log_out, Mount, PageError, PageSettings};
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::nav::Navigator;
use crate::token::{BestEffort, TokenManager, TokenStore};

/// What the brand dashboard shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandView {
    pub loading: bool,
    pub campaigns: Vec<Campaign>,
    pub error: Option<String>,
}

impl BrandView {
    /// Looks a campaign up by its rendered id.
    #[must_use]
    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns
            .iter()
            .find(|c| c.id_string().as_deref() == Some(id))
    }
}

/// Brand dashboard: lists campaigns and creates new ones. No polling.
pub struct BrandDashboard<S> {
    client: Arc<ApiClient>,
    tokens: Arc<TokenManager<S>>,
    nav: Arc<dyn Navigator>,
    settings: PageSettings,
    token: Credential,
    view: BrandView,
}

impl<S: TokenStore> BrandDashboard<S> {
    /// Mounts the page and loads the campaign list.
    ///
    /// Without a credential, or when the backend rejects it, the navigator is
    /// sent to the login page. Other failures are shown inline.
    pub async fn mount(
        client: Arc<ApiClient>,
        tokens: Arc<TokenManager<S>>,
        nav: Arc<dyn Navigator>,
        settings: PageSettings,
    ) -> Mount<Self> {
        let Some(token) = tokens.resolve_token(nav.as_ref()) else {
            tracing::info!("no credential; redirecting to login");
            nav.push(&settings.login_path);
            return Mount::RedirectedToLogin;
        };

        let mut view = BrandView::default();
        match client.list_campaigns(&token).await {
            Ok(campaigns) => view.campaigns = campaigns,
            Err(ClientError::Unauthorized { .. }) => {
                tracing::info!("credential rejected; redirecting to login");
                nav.push(&settings.login_path);
                return Mount::RedirectedToLogin;
            }
            Err(e) => {
                tracing::warn!(error = %e, "campaign fetch failed");
                view.error = Some("Failed to fetch campaigns".to_owned());
            }
        }

        Mount::Ready(Self {
            client,
            tokens,
            nav,
            settings,
            token,
            view,
        })
    }

    #[must_use]
    pub fn view(&self) -> &BrandView {
        &self.view
    }

    /// Creates a campaign, then reloads the list.
    ///
    /// A failed reload keeps the previous list.
    ///
    /// # Errors
    ///
    /// - [`PageError::CreateCampaignFailed`] when the backend answers with a
    ///   non-2xx status; the message carries the status and response text.
    /// - [`PageError::Unauthorized`] on 401, after sending the navigator to
    ///   the login page.
    /// - [`PageError::CreateCampaign`] on network or other client failures.
    pub async fn create_campaign(
        &mut self,
        campaign: &NewCampaign,
    ) -> Result<Option<Campaign>, PageError> {
        let created = match self.client.create_campaign(&self.token, campaign).await {
            Ok(created) => created,
            Err(ClientError::UnexpectedStatus { status, body, .. }) => {
                return Err(PageError::CreateCampaignFailed { status, body });
            }
            Err(ClientError::Unauthorized { .. }) => {
                self.nav.push(&self.settings.login_path);
                return Err(PageError::Unauthorized);
            }
            Err(e) => return Err(PageError::CreateCampaign(e)),
        };
        tracing::info!(name = %campaign.name, "campaign created");
        self.refresh().await;
        Ok(created)
    }

    /// Reloads the campaign list, keeping the current one on failure.
    pub async fn refresh(&mut self) {
        match self.client.list_campaigns(&self.token).await {
            Ok(campaigns) => {
                self.view.campaigns = campaigns;
                self.view.error = None;
            }
            Err(e) => tracing::debug!(error = %e, "campaign refresh failed; keeping current list"),
        }
    }

    /// Clears the session and goes to the login page.
    pub async fn logout(self) -> BestEffort {
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
