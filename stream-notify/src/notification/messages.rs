//! Outgoing message texts.
//!
//! Every text is HTML formatted for the Telegram `HTML` parse mode, so any
//! text that comes from a platform is escaped first.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::domain::{Channel, LiveStatus};

/// Placeholder for fields a platform did not report.
const MISSING: &str = "-";

/// Language of outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

struct Texts {
    went_live: fn(&str) -> String,
    went_offline: fn(&str) -> String,
    info: &'static str,
    title: &'static str,
    game: &'static str,
    viewers: &'static str,
    link: &'static str,
    no_active_streams: &'static str,
    help: &'static str,
}

static EN: Texts = Texts {
    went_live: |platform| format!("Stream started on {platform}!"),
    went_offline: |platform| format!("Stream on {platform} ended."),
    info: "Info:",
    title: "Title",
    game: "Game",
    viewers: "Viewers",
    link: "Link",
    no_active_streams: "No active streams",
    help: "I post a message here when a tracked stream starts or ends.\n\
           /status - list streams that are live right now",
};

static RU: Texts = Texts {
    went_live: |platform| format!("Начало стрима на {platform}!"),
    went_offline: |platform| format!("Стрим на {platform} завершен."),
    info: "Инфо:",
    title: "Трансляция",
    game: "Игра",
    viewers: "Число зрителей",
    link: "Ссылка",
    no_active_streams: "Нет запущенных стримов",
    help: "Я пишу сюда, когда отслеживаемый стрим начинается или заканчивается.\n\
           /status - список стримов, которые идут сейчас",
};

impl Language {
    fn texts(self) -> &'static Texts {
        match self {
            Language::En => &EN,
            Language::Ru => &RU,
        }
    }

    /// Announcement for a channel that just went live.
    pub fn live_announcement(self, channel: &Channel, status: &LiveStatus) -> String {
        let t = self.texts();
        let mut text = format!(
            "<b>{}</b>\n",
            escape_html(&(t.went_live)(channel.platform().display_name()))
        );
        self.push_details(&mut text, status);
        text.push_str(&escape_html(channel.canonical_url()));
        text
    }

    /// Announcement for a channel that just went offline.
    pub fn offline_announcement(self, channel: &Channel) -> String {
        let t = self.texts();
        format!(
            "<b>{}</b>\n{}",
            escape_html(&(t.went_offline)(channel.platform().display_name())),
            escape_html(channel.canonical_url())
        )
    }

    /// Reply to a status query for one live channel.
    pub fn channel_info(self, channel: &Channel, status: &LiveStatus) -> String {
        let t = self.texts();
        let mut text = match status.preview_url() {
            Some(preview) => format!("<a href=\"{}\">{}</a>\n", escape_html(preview), t.info),
            None => format!("{}\n", t.info),
        };
        self.push_details(&mut text, status);
        let _ = write!(text, "{}: {}", t.link, escape_html(channel.canonical_url()));
        text
    }

    pub fn no_active_streams(self) -> &'static str {
        self.texts().no_active_streams
    }

    pub fn help_text(self) -> &'static str {
        self.texts().help
    }

    fn push_details(self, text: &mut String, status: &LiveStatus) {
        let t = self.texts();
        let viewers = status
            .viewer_count()
            .map(|count| count.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let _ = writeln!(
            text,
            "{}: {}",
            t.title,
            escape_html(status.title().unwrap_or(MISSING))
        );
        let _ = writeln!(
            text,
            "{}: {}",
            t.game,
            escape_html(status.category().unwrap_or(MISSING))
        );
        let _ = writeln!(text, "{}: {}", t.viewers, viewers);
    }
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
