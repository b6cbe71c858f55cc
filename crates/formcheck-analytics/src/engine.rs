//! Session analysis entry points.
//!
//! ```text
//! Session ──► resolve rule ──► per frame: extract metrics ─► score
//!                                   │
//!                                   ▼
//!                       primary series ─► smooth ─► extrema ─► segment reps
//!                                                                  │
//!                                   timeline + reps ─► aggregate ◄─┘
//! ```
//!
//! Analysis is a pure function of the session and options. Each call owns
//! its buffers, so sessions can be analyzed from any number of threads.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use formcheck_models::{Activity, AnalyticsPoint, AnalyticsResult, Rep, Rule, Session};

use crate::aggregate::aggregate;
use crate::config::AnalyzeOptions;
use crate::error::{EngineError, EngineResult};
use crate::extrema::find_extrema;
use crate::joint_metrics::extract_selected;
use crate::observability;
use crate::scoring::score_frame;
use crate::segmenter::{RepSegmenter, SegmentInput};
use crate::smoothing::smooth;

/// Analyze a recorded session.
///
/// Fails only for an empty session or invalid options. Sparse input
/// (missing landmarks, unmeasurable frames, no detectable reps) produces a
/// report with null scores and `Unknown` categories instead.
pub fn analyze(session: &Session, options: &AnalyzeOptions) -> EngineResult<AnalyticsResult> {
    let activity = Activity::resolve(&session.activity_id);
    let started = Instant::now();

    let result = run(session, activity, options);
    match &result {
        Ok(report) => observability::record_analysis(report, started.elapsed().as_secs_f64()),
        Err(e) => {
            warn!(activity_id = %session.activity_id, error = %e, "Session analysis rejected");
            observability::record_failure(activity, e.kind());
        }
    }
    result
}

/// Analyze many sessions in parallel, preserving input order.
pub fn analyze_batch(
    sessions: &[Session],
    options: &AnalyzeOptions,
) -> Vec<EngineResult<AnalyticsResult>> {
    sessions
        .par_iter()
        .map(|session| analyze(session, options))
        .collect()
}

/// Parse a session from JSON and analyze it.
pub fn analyze_json(json: &str, options: &AnalyzeOptions) -> EngineResult<AnalyticsResult> {
    let session: Session = serde_json::from_str(json)?;
    analyze(&session, options)
}

fn run(
    session: &Session,
    activity: Activity,
    options: &AnalyzeOptions,
) -> EngineResult<AnalyticsResult> {
    options.check()?;
    if session.is_empty() {
        return Err(EngineError::EmptySession);
    }

    if let Some(index) = session.first_out_of_order() {
        warn!(
            activity_id = %session.activity_id,
            frame = index,
            "Frame timestamps go backwards; analyzing in recorded order"
        );
    }

    let rule = activity.rule();
    debug!(
        activity_id = %session.activity_id,
        %activity,
        primary = %rule.primary_metric,
        frames = session.frames.len(),
        "Resolved activity rule"
    );

    let timeline = build_timeline(session, &rule, options.min_visibility);
    let reps = detect_reps(&timeline, &rule, options.smoothing_radius);

    let report = aggregate(session, activity, &rule, timeline, reps, options.sample_stride);

    info!(
        %activity,
        total_frames = report.total_frames,
        correct_frames = report.correct_frames,
        accuracy_pct = report.accuracy_pct,
        reps = report.reps.len(),
        good_reps = report.good_rep_count,
        "Session analyzed"
    );

    Ok(report)
}

/// Extract and score every frame.
fn build_timeline(session: &Session, rule: &Rule, min_visibility: f64) -> Vec<AnalyticsPoint> {
    let scored: Vec<_> = rule.metrics.iter().map(|t| t.metric).collect();

    session
        .frames
        .iter()
        .map(|frame| {
            let metrics = extract_selected(&frame.landmarks, scored.iter().copied(), min_visibility);
            let frame_score = score_frame(&metrics, rule);
            AnalyticsPoint {
                t: frame.t,
                metrics,
                score: frame_score.score,
                category: frame_score.category,
                passed: frame_score.passed,
            }
        })
        .collect()
}

/// Segment the primary metric into reps; holds yield none.
fn detect_reps(timeline: &[AnalyticsPoint], rule: &Rule, radius: usize) -> Vec<Rep> {
    let Some(segmenter) = RepSegmenter::new(rule) else {
        return Vec::new();
    };

    let primary: Vec<Option<f64>> = timeline.iter().map(|p| p.metric(rule.primary_metric)).collect();
    let smoothed = smooth(&primary, radius);
    let extrema = find_extrema(&smoothed);

    debug!(
        valleys = extrema.valleys.len(),
        peaks = extrema.peaks.len(),
        radius,
        "Primary metric extrema"
    );

    let scores: Vec<Option<f64>> = timeline.iter().map(|p| p.score).collect();
    let timestamps: Vec<u64> = timeline.iter().map(|p| p.t).collect();

    segmenter.segment(
        SegmentInput {
            smoothed: &smoothed,
            scores: &scores,
            timestamps: &timestamps,
        },
        &extrema,
    )
}
