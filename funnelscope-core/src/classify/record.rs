use crate::classify::{FunnelStage, PatternCategory, TrafficProfile, is_checkout_related};
use crate::elb::LogRecord;

/// A checkout-related record with its derived labels.
#[derive(Debug, Clone)]
pub struct ClassifiedRecord<'a> {
    pub record: &'a LogRecord,
    /// Path and query of the request.
    pub url: &'a str,
    pub funnel_stage: FunnelStage,
    pub pattern_category: PatternCategory,
    pub is_bot: bool,
    pub is_mobile: bool,
}

impl ClassifiedRecord<'_> {
    /// URL with the query string removed, used to group error URLs.
    pub fn clean_url(&self) -> &str {
        self.url.split_once('?').map_or(self.url, |(path, _)| path)
    }
}

/// Returns `Some` iff the record has a URL and that URL is checkout-related.
pub fn classify(record: &LogRecord) -> Option<ClassifiedRecord<'_>> {
    let url = record.url()?;
    if !is_checkout_related(url) {
        return None;
    }

    let profile = TrafficProfile::of(&record.user_agent);

    Some(ClassifiedRecord {
        funnel_stage: FunnelStage::of(url),
        pattern_category: PatternCategory::of(url),
        is_bot: profile.is_bot,
        is_mobile: profile.is_mobile,
        url,
        record,
    })
}
