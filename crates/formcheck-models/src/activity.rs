//! Activity registry.
//!
//! Every supported activity is a variant of [`Activity`] carrying its rule as
//! associated data through [`Activity::rule`]. Free-form identifiers coming
//! from the capture layer are mapped onto a variant with [`Activity::resolve`]:
//!
//! - the identifier is trimmed and lowercased
//! - the first alias in [`ACTIVITY_ALIASES`] that is a substring of it wins
//! - nothing matches: [`Activity::Default`]
//!
//! An identifier containing aliases of two activities (e.g. "squat_to_plank")
//! resolves to whichever alias is declared first. That ordering is part of
//! the contract and is covered by tests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::metric::{MetricName, MetricTarget};
use crate::rule::{Polarity, Rule, SegmentationMode};

/// Supported activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Squat,
    PushUp,
    Lunge,
    BicepCurl,
    GluteBridge,
    Plank,
    WarriorTwo,
    TreePose,
    ChairPose,
    /// Fallback for identifiers that match no alias.
    #[default]
    Default,
}

/// Substring aliases in match order. First match wins.
pub const ACTIVITY_ALIASES: &[(&str, Activity)] = &[
    ("squat", Activity::Squat),
    ("pushup", Activity::PushUp),
    ("push_up", Activity::PushUp),
    ("push-up", Activity::PushUp),
    ("push up", Activity::PushUp),
    ("lunge", Activity::Lunge),
    ("curl", Activity::BicepCurl),
    ("bridge", Activity::GluteBridge),
    ("plank", Activity::Plank),
    ("warrior", Activity::WarriorTwo),
    ("tree", Activity::TreePose),
    ("chair", Activity::ChairPose),
];

impl Activity {
    /// All activities, fallback last.
    pub const ALL: &'static [Activity] = &[
        Activity::Squat,
        Activity::PushUp,
        Activity::Lunge,
        Activity::BicepCurl,
        Activity::GluteBridge,
        Activity::Plank,
        Activity::WarriorTwo,
        Activity::TreePose,
        Activity::ChairPose,
        Activity::Default,
    ];

    /// Map a free-form activity identifier onto a registered activity.
    pub fn resolve(activity_id: &str) -> Activity {
        let normalized = activity_id.trim().to_lowercase();
        ACTIVITY_ALIASES
            .iter()
            .find(|(alias, _)| normalized.contains(alias))
            .map(|(_, activity)| *activity)
            .unwrap_or(Activity::Default)
    }

    /// Returns the activity name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Squat => "squat",
            Activity::PushUp => "push_up",
            Activity::Lunge => "lunge",
            Activity::BicepCurl => "bicep_curl",
            Activity::GluteBridge => "glute_bridge",
            Activity::Plank => "plank",
            Activity::WarriorTwo => "warrior_two",
            Activity::TreePose => "tree_pose",
            Activity::ChairPose => "chair_pose",
            Activity::Default => "default",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Activity::Squat => "Bodyweight squat, counted at knee depth",
            Activity::PushUp => "Push-up, counted at elbow depth",
            Activity::Lunge => "Forward lunge, counted on the front knee",
            Activity::BicepCurl => "Bicep curl, counted at full elbow flexion",
            Activity::GluteBridge => "Glute bridge, counted at full hip extension",
            Activity::Plank => "Plank hold with a straight body line",
            Activity::WarriorTwo => "Warrior II hold with bent front knee and level arms",
            Activity::TreePose => "Tree pose balance hold",
            Activity::ChairPose => "Chair pose hold",
            Activity::Default => "Unrecognized activity, scored on general alignment",
        }
    }

    /// Returns true if the activity is a hold rather than a rep exercise.
    pub fn is_hold(&self) -> bool {
        matches!(
            self,
            Activity::Plank
                | Activity::WarriorTwo
                | Activity::TreePose
                | Activity::ChairPose
                | Activity::Default
        )
    }

    /// Scoring and segmentation rule for this activity.
    pub fn rule(&self) -> Rule {
        use MetricName::*;

        let segmented = |min_frames, polarity| SegmentationMode::Segmented {
            min_frames,
            polarity,
        };

        let (primary_metric, metrics, threshold, segmentation) = match self {
            Activity::Squat => (
                Knee,
                vec![
                    MetricTarget::new(Knee, 90.0, 28.0),
                    MetricTarget::new(Hip, 90.0, 35.0),
                    MetricTarget::new(Back, 165.0, 25.0),
                ],
                0.60,
                segmented(6, Polarity::Valley),
            ),
            Activity::PushUp => (
                Elbow,
                vec![
                    MetricTarget::new(Elbow, 90.0, 25.0),
                    MetricTarget::new(Body, 175.0, 15.0),
                ],
                0.60,
                segmented(6, Polarity::Valley),
            ),
            Activity::Lunge => (
                FrontKnee,
                vec![
                    MetricTarget::new(FrontKnee, 90.0, 25.0),
                    MetricTarget::new(Back, 170.0, 20.0),
                ],
                0.60,
                segmented(6, Polarity::Valley),
            ),
            Activity::BicepCurl => (
                Arms,
                vec![
                    MetricTarget::new(Arms, 45.0, 30.0),
                    MetricTarget::new(Back, 175.0, 15.0),
                ],
                0.55,
                segmented(5, Polarity::Valley),
            ),
            Activity::GluteBridge => (
                Hip,
                vec![
                    MetricTarget::new(Hip, 175.0, 20.0),
                    MetricTarget::new(Knee, 90.0, 25.0),
                ],
                0.60,
                segmented(6, Polarity::Peak),
            ),
            Activity::Plank => (
                Body,
                vec![
                    MetricTarget::new(Body, 180.0, 15.0),
                    MetricTarget::new(Hip, 180.0, 20.0),
                ],
                0.70,
                SegmentationMode::Continuous,
            ),
            Activity::WarriorTwo => (
                FrontKnee,
                vec![
                    MetricTarget::new(FrontKnee, 90.0, 20.0),
                    MetricTarget::new(Arms, 180.0, 20.0),
                ],
                0.65,
                SegmentationMode::Continuous,
            ),
            Activity::TreePose => (
                Body,
                vec![
                    MetricTarget::new(Body, 180.0, 12.0),
                    MetricTarget::new(Back, 175.0, 15.0),
                ],
                0.65,
                SegmentationMode::Continuous,
            ),
            Activity::ChairPose => (
                Knee,
                vec![
                    MetricTarget::new(Knee, 120.0, 20.0),
                    MetricTarget::new(Back, 165.0, 20.0),
                ],
                0.65,
                SegmentationMode::Continuous,
            ),
            Activity::Default => (
                Body,
                vec![
                    MetricTarget::new(Body, 180.0, 30.0),
                    MetricTarget::new(Back, 170.0, 30.0),
                ],
                0.60,
                SegmentationMode::Continuous,
            ),
        };

        Rule {
            primary_metric,
            metrics,
            correct_ratio_threshold: threshold,
            frame_pass_threshold: threshold,
            segmentation,
        }
    }
}

/// Resolve the rule for a free-form activity identifier.
///
/// Always succeeds; unknown identifiers get the [`Activity::Default`] rule.
pub fn resolve_rule(activity_id: &str) -> Rule {
    Activity::resolve(activity_id).rule()
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Activity {
    type Err = ActivityParseError;

    /// Exact parse of a canonical name. Use [`Activity::resolve`] for
    /// free-form identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Activity::ALL
            .iter()
            .find(|a| a.as_str() == lower)
            .copied()
            .ok_or_else(|| ActivityParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown activity: {0}")]
pub struct ActivityParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_normalizes() {
        assert_eq!(Activity::resolve("  SQUAT "), Activity::Squat);
        assert_eq!(Activity::resolve("Push-Up"), Activity::PushUp);
        assert_eq!(Activity::resolve("push up"), Activity::PushUp);
        assert_eq!(Activity::resolve("Side Plank Hold"), Activity::Plank);
        assert_eq!(Activity::resolve("hammer_curl"), Activity::BicepCurl);
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(Activity::resolve("burpee"), Activity::Default);
        assert_eq!(Activity::resolve(""), Activity::Default);
        assert!(resolve_rule("burpee").is_hold());
    }

    #[test]
    fn test_resolve_first_declared_alias_wins() {
        // Both "squat" and "plank" are substrings; "squat" is declared first.
        assert_eq!(Activity::resolve("plank_to_squat"), Activity::Squat);
        // "tree" is declared after "bridge".
        assert_eq!(Activity::resolve("bridge_in_tree"), Activity::GluteBridge);
    }

    #[test]
    fn test_every_rule_scores_its_primary_metric() {
        for activity in Activity::ALL {
            let rule = activity.rule();
            assert!(
                rule.target(rule.primary_metric).is_some(),
                "{} has no primary target",
                activity
            );
            assert!((0.0..=1.0).contains(&rule.correct_ratio_threshold));
            assert!((0.0..=1.0).contains(&rule.frame_pass_threshold));
            assert_eq!(rule.is_hold(), activity.is_hold(), "{}", activity);
        }
    }

    #[test]
    fn test_squat_rule() {
        let rule = Activity::Squat.rule();
        let knee = rule.primary_target();
        assert_eq!(knee.metric, MetricName::Knee);
        assert_eq!(knee.ideal, 90.0);
        assert_eq!(knee.tolerance, 28.0);
        assert_eq!(rule.polarity(), Some(Polarity::Valley));
        assert_eq!(
            Activity::GluteBridge.rule().polarity(),
            Some(Polarity::Peak)
        );
    }

    #[test]
    fn test_parse_and_display() {
        for activity in Activity::ALL {
            assert_eq!(activity.to_string().parse::<Activity>().unwrap(), *activity);
        }
        assert!("squats please".parse::<Activity>().is_err());
    }
}
