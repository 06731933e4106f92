//! Session, polling, and page logic for the Wavy creator/brand dashboard.

pub mod campaigns;
pub mod client;
pub mod error;
pub mod nav;
pub mod pages;
pub mod poller;
pub mod token;

pub use campaigns::{normalize_campaigns, AUTOMATIC_SOFTMATCHING_HEADER};
pub use client::ApiClient;
pub use error::{ClientError, PollerError, StoreError};
pub use nav::{MemoryNavigator, Navigator};
pub use pages::{
    check_existing_session, complete_callback, login_url, BrandDashboard, BrandView,
    CreatorDashboard, CreatorView, Mount, PageError, PageSettings,
};
pub use poller::{PollSession, PollState, StatusSource};
pub use token::{
    auth_headers, choose_token, extract_and_scrub_token_from_location, scrub_token,
    token_from_url, BestEffort, FileStore, MemoryStore, TokenManager, TokenStore, TOKEN_KEY,
};
