// One-shot run: fetch -> parse -> format -> notify
use crate::config::AppConfig;
use crate::fetcher::Fetch;
use crate::formatter::format_report;
use crate::model::PipelineError;
use crate::notifier::Notify;
use crate::parser::ListingParser;

use tracing::{error, info, warn};

/// How a completed run ended. Delivery failure is kept apart from scrape
/// failure: the data was found even if the webhook refused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToReport,
    Notified,
    DeliveryFailed,
}

pub async fn run(
    fetcher: &dyn Fetch,
    notifier: &dyn Notify,
    config: &AppConfig,
) -> Result<RunOutcome, PipelineError> {
    let url = &config.target_url;

    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Error accessing {}: {}", url, e);
            return Err(e.into());
        }
    };

    let listings = match ListingParser::new().parse(&html, &config.rules.rule) {
        Ok(listings) => listings,
        Err(e) => {
            error!("Extraction failed for {}: {}", url, e);
            return Err(e.into());
        }
    };

    if listings.is_empty() {
        info!("No vacancies found at {}, nothing to report", url);
        return Ok(RunOutcome::NothingToReport);
    }

    info!("Found {} listing(s), sending notification", listings.len());
    let message = format_report(&listings, url);
    match notifier.notify(&message).await {
        Ok(()) => Ok(RunOutcome::Notified),
        Err(e) => {
            warn!("Delivery failed for {}: {}", url, e);
            Ok(RunOutcome::DeliveryFailed)
        }
    }
}

/// Maps a run to the process exit code. The legacy convention exits non-zero
/// whenever a notification went out, so an external monitor can alert off
/// the exit status alone.
pub fn exit_code(result: &Result<RunOutcome, PipelineError>, legacy: bool) -> i32 {
    match (result, legacy) {
        (Ok(RunOutcome::NothingToReport), _) => 0,
        (Ok(RunOutcome::Notified), false) => 0,
        (Ok(RunOutcome::Notified), true) => 1,
        (Ok(RunOutcome::DeliveryFailed), false) => 2,
        (Ok(RunOutcome::DeliveryFailed), true) => 1,
        (Err(_), _) => 1,
    }
}
