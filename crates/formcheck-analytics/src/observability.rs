//! Metrics emitted by the engine.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host process installs a recorder.

use metrics::{counter, histogram};

use formcheck_models::{Activity, AnalyticsResult};

/// Metric names as constants for consistency.
pub mod names {
    pub const SESSIONS_ANALYZED_TOTAL: &str = "formcheck_sessions_analyzed_total";
    pub const SESSIONS_FAILED_TOTAL: &str = "formcheck_sessions_failed_total";
    pub const FRAMES_ANALYZED_TOTAL: &str = "formcheck_frames_analyzed_total";
    pub const UNSCORED_FRAMES_TOTAL: &str = "formcheck_unscored_frames_total";
    pub const REPS_DETECTED_TOTAL: &str = "formcheck_reps_detected_total";
    pub const ANALYSIS_DURATION_SECONDS: &str = "formcheck_analysis_duration_seconds";
}

/// Record a completed analysis.
pub fn record_analysis(result: &AnalyticsResult, duration_secs: f64) {
    let activity = result.activity.as_str();

    counter!(names::SESSIONS_ANALYZED_TOTAL, "activity" => activity).increment(1);
    counter!(names::FRAMES_ANALYZED_TOTAL, "activity" => activity)
        .increment(result.total_frames as u64);
    counter!(names::UNSCORED_FRAMES_TOTAL, "activity" => activity)
        .increment(result.frame_category_counts.unknown as u64);
    counter!(names::REPS_DETECTED_TOTAL, "activity" => activity, "quality" => "good")
        .increment(result.good_rep_count as u64);
    counter!(names::REPS_DETECTED_TOTAL, "activity" => activity, "quality" => "bad")
        .increment(result.bad_rep_count as u64);
    histogram!(names::ANALYSIS_DURATION_SECONDS, "activity" => activity).record(duration_secs);
}

/// Record a rejected analysis.
pub fn record_failure(activity: Activity, reason: &'static str) {
    counter!(
        names::SESSIONS_FAILED_TOTAL,
        "activity" => activity.as_str(),
        "reason" => reason
    )
    .increment(1);
}
