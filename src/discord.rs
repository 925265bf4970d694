// Discord webhook sink — fire-and-forget activity mirror.
//
// Every send is best-effort: delivery failures are logged and never
// propagate. The three orchestrator tasks share one `Webhook` behind an
// `Arc` and send independently; there is no queueing or ordering.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;

use crate::sn;
use crate::sn::types::Dupe;
use crate::timefmt;

/// Amber accent used for activity embeds.
pub const COLOR_ACTIVITY: u32 = 0xffc107;

/// Red accent used for error embeds.
pub const COLOR_ERROR: u32 = 0xdc3545;

const SN_FOOTER_ICON: &str = "https://stacker.news/favicon.png";
const SN_NOTIFY_ICON: &str = "https://stacker.news/favicon-notify.png";

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Serialize)]
struct WebhookPayload {
    embeds: Vec<Embed>,
}

/// Chat sink the orchestrator reports through. Best-effort by contract:
/// implementations log failures instead of returning them.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Deliver an embed to the channel.
    async fn send_embed(&self, embed: Embed);

    /// Deliver a plain error message to the channel.
    async fn send_error(&self, message: &str);
}

/// Discord webhook client.
pub struct Webhook {
    client: reqwest::Client,
    url: String,
}

impl Webhook {
    pub fn new(url: &str) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("kindling/0.1 (hn-to-sn cross-poster)")
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    async fn post(&self, payload: &WebhookPayload) {
        let result = self.client.post(&self.url).json(payload).send().await;
        match result {
            Ok(resp) => {
                if let Err(e) = resp.error_for_status() {
                    warn!(error = %e, "Discord webhook rejected payload");
                }
            }
            Err(e) => warn!(error = %e, "Discord webhook unreachable"),
        }
    }
}

#[async_trait]
impl ChatSink for Webhook {
    async fn send_embed(&self, embed: Embed) {
        self.post(&WebhookPayload {
            embeds: vec![embed],
        })
        .await;
    }

    async fn send_error(&self, message: &str) {
        let embed = Embed {
            title: message.to_string(),
            url: None,
            color: COLOR_ERROR,
            footer: None,
            timestamp: Some(now_rfc3339()),
            fields: Vec::new(),
        };
        self.send_embed(embed).await;
    }
}

// -- Embed constructors --

/// Embed announcing a fresh cross-post, linking to the SN item.
pub fn post_embed(title: &str, item_id: u64) -> Embed {
    Embed {
        title: title.to_string(),
        url: Some(sn::item_link(item_id)),
        color: COLOR_ACTIVITY,
        footer: Some(sn_footer(SN_FOOTER_ICON)),
        timestamp: Some(now_rfc3339()),
        fields: Vec::new(),
    }
}

/// Embed enumerating the existing posts that blocked a cross-post, so a
/// human can judge whether to force-post anyway.
pub fn dupes_embed(url: &str, dupes: &[Dupe]) -> Embed {
    let mut fields = Vec::with_capacity(dupes.len() * 7);
    for dupe in dupes {
        fields.push(field("Title", dupe.title.clone(), false));
        fields.push(field("Id", sn::item_link(dupe.id), true));
        fields.push(field("Url", dupe.url.clone(), true));
        fields.push(field("User", dupe.user.name.clone(), true));
        fields.push(field(
            "Created",
            timefmt::ago(dupe.created_at, Utc::now()),
            true,
        ));
        fields.push(field("Sats", dupe.sats.to_string(), true));
        fields.push(field("Comments", dupe.ncomments.to_string(), true));
    }

    Embed {
        title: format!("{} dupe(s) found for {url}:", dupes.len()),
        url: None,
        color: COLOR_ACTIVITY,
        footer: None,
        timestamp: None,
        fields,
    }
}

/// One-shot alert for the false->true notification edge.
pub fn notifications_embed() -> Embed {
    Embed {
        title: "new notifications".to_string(),
        url: Some(format!("{}/hn/posts", sn::client::DEFAULT_SN_URL)),
        color: COLOR_ACTIVITY,
        footer: Some(sn_footer(SN_NOTIFY_ICON)),
        timestamp: Some(now_rfc3339()),
        fields: Vec::new(),
    }
}

fn sn_footer(icon: &str) -> EmbedFooter {
    EmbedFooter {
        text: "Stacker News".to_string(),
        icon_url: icon.to_string(),
    }
}

fn field(name: &str, value: String, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value,
        inline,
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
