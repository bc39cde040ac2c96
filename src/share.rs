use reqwest::Url;
use tracing::{info, warn};
use webbrowser::Browser;

use crate::session::FinalStats;

const SHARE_ENDPOINT: &str = "https://twitter.com/intent/tweet";

pub fn share_text(stats: &FinalStats) -> String {
    format!(
        "I scored {} points in typestrike, destroying {} words at {} wpm with {}% accuracy!",
        stats.score, stats.words_completed, stats.wpm, stats.accuracy
    )
}

pub fn share_url(stats: &FinalStats) -> Option<Url> {
    Url::parse_with_params(SHARE_ENDPOINT, &[("text", share_text(stats))]).ok()
}

pub fn can_share() -> bool {
    Browser::is_available()
}

/// Opens the share page in the default browser; failures are only logged
pub fn open_share(stats: &FinalStats) {
    let Some(url) = share_url(stats) else {
        warn!("Could not build share url");
        return;
    };

    if !can_share() {
        warn!("No browser available for sharing");
        return;
    }

    match webbrowser::open(url.as_str()) {
        Ok(()) => info!("Opened share page"),
        Err(error) => warn!(%error, "Failed to open share page"),
    }
}
