use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::{RemoteContentConfig, SiteConfig};
use crate::error::ContentError;

pub const STATS_COLLECTION: &str = "stats";
pub const TESTIMONIALS_COLLECTION: &str = "testimonials";
pub const DEFAULT_IMAGE_HINT: &str = "person portrait";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A headline counter such as "500+ Families Served".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub id: String,
    pub label: String,
    /// Any JSON number; ratings such as 4.8 are allowed.
    pub value: f64,
    pub icon: String,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub title: String,
    pub quote: String,
    pub avatar: String,
    pub image_hint: String,
}

#[async_trait]
pub trait DisplayDataSource: Send + Sync {
    async fn stats(&self) -> Result<Vec<Stat>, ContentError>;
    async fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError>;
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

/// The figures and quotes shown when no remote source answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDisplayData;

impl StaticDisplayData {
    pub fn default_stats() -> Vec<Stat> {
        [
            ("users", 500.0, "+", "Families Served"),
            ("dollar-sign", 250.0, " Cr+", "Assets Under Management"),
            ("briefcase", 1200.0, "+", "Total Investors"),
            ("calendar", 15.0, "+", "Years of Experience"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (icon, value, unit, label))| Stat {
            id: (i + 1).to_string(),
            label: label.into(),
            value,
            icon: icon.into(),
            order: i as i64 + 1,
            unit: Some(unit.into()),
            prefix: None,
        })
        .collect()
    }

    pub fn default_testimonials() -> Vec<Testimonial> {
        [
            (
                "Rohan Sharma",
                "Tech Entrepreneur",
                "FlexiWealth transformed my approach to investing. Their data-driven advice helped me build a diversified portfolio that has consistently outperformed my expectations. Truly a trustworthy partner.",
                "man portrait",
            ),
            (
                "Priya Singh",
                "Doctor",
                "As a busy professional, I needed an advisor I could rely on. Anish and his team have been phenomenal, offering clear, jargon-free guidance that secured my family's financial future. I couldn't be happier.",
                "woman portrait",
            ),
            (
                "Amit Patel",
                "Marketing Manager",
                "The personalized financial plan they created for me was a game-changer. It aligned perfectly with my long-term goals, from my child's education to my own retirement. Their expertise is unmatched.",
                "man portrait",
            ),
            (
                "Sunita Reddy",
                "Small Business Owner",
                "Working with FlexiWealth has been a fantastic experience. They are not just advisors, but true partners who genuinely care about your financial well-being. Highly recommended for their ethical and knowledgeable approach.",
                "woman portrait",
            ),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, title, quote, hint))| Testimonial {
            id: (i + 1).to_string(),
            name: name.into(),
            title: title.into(),
            quote: quote.into(),
            avatar: format!("https://picsum.photos/seed/{}/80/80", 101 + i),
            image_hint: hint.into(),
        })
        .collect()
    }
}

#[async_trait]
impl DisplayDataSource for StaticDisplayData {
    async fn stats(&self) -> Result<Vec<Stat>, ContentError> {
        Ok(Self::default_stats())
    }

    async fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError> {
        Ok(Self::default_testimonials())
    }
}

// ---------------------------------------------------------------------------
// Remote document store
// ---------------------------------------------------------------------------

/// A collection body is either a bare array of documents or `{"documents": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Documents<T> {
    List(Vec<T>),
    Wrapped { documents: Vec<T> },
}

impl<T> Documents<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Documents::List(v) | Documents::Wrapped { documents: v } => v,
        }
    }
}

#[derive(Deserialize)]
struct StatDocument {
    id: Option<String>,
    label: String,
    value: f64,
    icon: String,
    #[serde(default)]
    order: i64,
    unit: Option<String>,
    prefix: Option<String>,
}

#[derive(Deserialize)]
struct TestimonialDocument {
    id: Option<String>,
    name: Option<String>,
    title: Option<String>,
    quote: Option<String>,
    avatar: Option<String>,
    #[serde(alias = "imageHint")]
    image_hint: Option<String>,
    order: Option<i64>,
}

fn decode<T: DeserializeOwned>(collection: &str, body: &str) -> Result<Vec<T>, ContentError> {
    serde_json::from_str::<Documents<T>>(body)
        .map(Documents::into_vec)
        .map_err(|e| ContentError::Decode {
            collection: collection.to_string(),
            reason: e.to_string(),
        })
}

/// Decode a `stats` collection body, ordered by `order`.
pub fn parse_stats(body: &str) -> Result<Vec<Stat>, ContentError> {
    let mut docs: Vec<StatDocument> = decode(STATS_COLLECTION, body)?;
    docs.sort_by_key(|d| d.order);
    Ok(docs
        .into_iter()
        .enumerate()
        .map(|(i, d)| Stat {
            id: d.id.unwrap_or_else(|| (i + 1).to_string()),
            label: d.label,
            value: d.value,
            icon: d.icon,
            order: d.order,
            unit: d.unit,
            prefix: d.prefix,
        })
        .collect())
}

/// Decode a `testimonials` collection body, ordered by `order`. Missing
/// text fields become empty strings.
pub fn parse_testimonials(body: &str) -> Result<Vec<Testimonial>, ContentError> {
    let mut docs: Vec<TestimonialDocument> = decode(TESTIMONIALS_COLLECTION, body)?;
    // Unordered documents go last
    docs.sort_by_key(|d| d.order.unwrap_or(i64::MAX));
    Ok(docs
        .into_iter()
        .enumerate()
        .map(|(i, d)| Testimonial {
            id: d.id.unwrap_or_else(|| (i + 1).to_string()),
            name: d.name.unwrap_or_default(),
            title: d.title.unwrap_or_default(),
            quote: d.quote.unwrap_or_default(),
            avatar: d.avatar.unwrap_or_default(),
            image_hint: d
                .image_hint
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_HINT.to_string()),
        })
        .collect())
}

/// Reads `{base_url}/stats` and `{base_url}/testimonials`.
#[derive(Debug, Clone)]
pub struct RemoteDisplayData {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteDisplayData {
    pub fn new(config: &RemoteContentConfig) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContentError::Transport {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    #[instrument(name = "display_data_fetch", skip(self))]
    async fn fetch_collection(&self, collection: &str) -> Result<String, ContentError> {
        let url = self.collection_url(collection);
        let mut req = self.client.get(&url);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        debug!(%url, "requesting display data");
        let resp = req.send().await.map_err(|e| ContentError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if !resp.status().is_success() {
            return Err(ContentError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }
        resp.text().await.map_err(|e| ContentError::Transport {
            url,
            reason: format!("read body failed: {e}"),
        })
    }
}

#[async_trait]
impl DisplayDataSource for RemoteDisplayData {
    async fn stats(&self) -> Result<Vec<Stat>, ContentError> {
        let body = self.fetch_collection(STATS_COLLECTION).await?;
        parse_stats(&body)
    }

    async fn testimonials(&self) -> Result<Vec<Testimonial>, ContentError> {
        let body = self.fetch_collection(TESTIMONIALS_COLLECTION).await?;
        parse_testimonials(&body)
    }
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Serves the primary source when it answers with data, the built-in
/// defaults otherwise. Never returns an error.
pub struct FallbackDisplayData {
    primary: Option<Box<dyn DisplayDataSource>>,
}

impl FallbackDisplayData {
    pub fn new(primary: Box<dyn DisplayDataSource>) -> Self {
        Self {
            primary: Some(primary),
        }
    }

    /// Built-in data only.
    pub fn defaults_only() -> Self {
        Self { primary: None }
    }

    /// Remote source when one is configured and its client can be built.
    pub fn from_config(config: &SiteConfig) -> Self {
        let Some(content) = &config.content else {
            return Self::defaults_only();
        };
        match RemoteDisplayData::new(content) {
            Ok(remote) => Self::new(Box::new(remote)),
            Err(e) => {
                warn!(error = %e, "remote display data unavailable, using defaults");
                Self::defaults_only()
            }
        }
    }

    pub async fn stats(&self) -> Vec<Stat> {
        let Some(primary) = &self.primary else {
            return StaticDisplayData::default_stats();
        };
        match primary.stats().await {
            Ok(stats) if !stats.is_empty() => stats,
            Ok(_) => {
                warn!(collection = STATS_COLLECTION, "no remote documents, using defaults");
                StaticDisplayData::default_stats()
            }
            Err(e) => {
                warn!(collection = STATS_COLLECTION, error = %e, "remote fetch failed, using defaults");
                StaticDisplayData::default_stats()
            }
        }
    }

    pub async fn testimonials(&self) -> Vec<Testimonial> {
        let Some(primary) = &self.primary else {
            return StaticDisplayData::default_testimonials();
        };
        match primary.testimonials().await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                warn!(
                    collection = TESTIMONIALS_COLLECTION,
                    "no remote documents, using defaults"
                );
                StaticDisplayData::default_testimonials()
            }
            Err(e) => {
                warn!(collection = TESTIMONIALS_COLLECTION, error = %e, "remote fetch failed, using defaults");
                StaticDisplayData::default_testimonials()
            }
        }
    }
}
