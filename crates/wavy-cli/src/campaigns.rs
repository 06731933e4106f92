//! Brand dashboard commands.

use std::sync::Arc;

use clap::{Subcommand, ValueEnum};
use wavy_client::{BrandDashboard, BrandView, FileStore, Mount, Navigator};
use wavy_core::{
    filter_creators, score_percent, EmotionalPattern, FitLevel, FitMetric, NewCampaign,
    SoftMatching, SpeechComplexity,
};

use crate::Context;

/// Sub-commands available under `campaigns`.
#[derive(Debug, Subcommand)]
pub enum CampaignCommands {
    /// List the brand's campaigns
    List,
    /// Show one campaign and its matched creators
    Show {
        /// Campaign id as listed
        id: String,
        /// Score used for banding (overall, behavioral, emotional, semantic)
        #[arg(long, default_value = "overall")]
        metric: FitMetric,
        /// Only creators in this band (high, medium, low)
        #[arg(long)]
        level: Option<FitLevel>,
    },
    /// Create a campaign. Without --speech and --emotion the backend matches automatically.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Speech complexity for manual matching; requires --emotion
        #[arg(long, value_enum, requires = "emotion")]
        speech: Option<Speech>,
        /// Emotional pattern for manual matching; requires --speech
        #[arg(long, value_enum, requires = "speech")]
        emotion: Option<Emotion>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Speech {
    Complex,
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emotion {
    Consistent,
    Variant,
}

impl From<Speech> for SpeechComplexity {
    fn from(s: Speech) -> Self {
        match s {
            Speech::Complex => SpeechComplexity::Complex,
            Speech::Simple => SpeechComplexity::Simple,
        }
    }
}

impl From<Emotion> for EmotionalPattern {
    fn from(e: Emotion) -> Self {
        match e {
            Emotion::Consistent => EmotionalPattern::Consistent,
            Emotion::Variant => EmotionalPattern::Variant,
        }
    }
}

pub(crate) fn soft_matching(speech: Option<Speech>, emotion: Option<Emotion>) -> SoftMatching {
    match (speech, emotion) {
        (Some(speech), Some(emotion)) => SoftMatching::Manual {
            speech: speech.into(),
            emotion: emotion.into(),
        },
        _ => SoftMatching::Automatic,
    }
}

pub(crate) async fn run(ctx: &Context, command: CampaignCommands) -> anyhow::Result<()> {
    let mut dashboard = mount(ctx).await?;

    match command {
        CampaignCommands::List => print_list(dashboard.view()),
        CampaignCommands::Show { id, metric, level } => {
            print_campaign(dashboard.view(), &id, metric, level)?;
        }
        CampaignCommands::Create {
            name,
            description,
            speech,
            emotion,
        } => {
            let campaign = NewCampaign {
                name,
                description,
                soft_matching: soft_matching(speech, emotion),
            };
            let created = dashboard.create_campaign(&campaign).await?;
            match created.and_then(|c| c.id_string()) {
                Some(id) => println!("created campaign {id}"),
                None => println!("created campaign \"{}\"", campaign.name),
            }
            print_list(dashboard.view());
        }
    }
    Ok(())
}

async fn mount(ctx: &Context) -> anyhow::Result<BrandDashboard<FileStore>> {
    let nav = ctx.navigator_at("/brand/dashboard")?;
    let mounted = BrandDashboard::mount(
        Arc::clone(&ctx.client),
        Arc::clone(&ctx.tokens),
        nav as Arc<dyn Navigator>,
        ctx.settings.clone(),
    )
    .await;
    match mounted {
        Mount::Ready(dashboard) => Ok(dashboard),
        Mount::RedirectedToLogin => anyhow::bail!("not logged in; run `wavy callback <URL>` first"),
    }
}

fn print_list(view: &BrandView) {
    if let Some(error) = &view.error {
        println!("error: {error}");
        return;
    }
    if view.campaigns.is_empty() {
        println!("no campaigns");
        return;
    }
    for campaign in &view.campaigns {
        let id = campaign.id_string().unwrap_or_else(|| "-".to_owned());
        println!(
            "{id:>6}  {}  ({} creators)",
            campaign.name,
            campaign.creators().len()
        );
    }
}

fn print_campaign(
    view: &BrandView,
    id: &str,
    metric: FitMetric,
    level: Option<FitLevel>,
) -> anyhow::Result<()> {
    let campaign = view
        .campaign(id)
        .ok_or_else(|| anyhow::anyhow!("campaign '{id}' not found"))?;

    println!("{}", campaign.name);
    if let Some(description) = &campaign.description {
        println!("{description}");
    }
    let creators = filter_creators(campaign.creators(), metric, level);
    if creators.is_empty() {
        println!("no matching creators");
    }
    for creator in creators {
        let score = creator.score(metric);
        println!(
            "  {:<20} {:>3}%  {}",
            creator.name,
            score_percent(score),
            creator.level(metric).label()
        );
    }
    Ok(())
}
