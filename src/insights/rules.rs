/// Local rule-based insight provider
///
/// Produces guidance from the aggregates alone, without any external
/// service. Used as the default provider so insight tools always answer.

use async_trait::async_trait;
use chrono::{Local, TimeZone};

use crate::insights::{InsightError, InsightKind, InsightProvider, InsightRequest};
use crate::stats::{
    detect_anomalies, day_of_week_pattern, low_mood_alert, select_recent, weekday_name,
    AverageTier, DEFAULT_RECENT_COUNT, PATTERN_MIN_ENTRIES,
};

pub struct RuleBasedProvider<Tz: TimeZone = Local> {
    /// Timezone used to read weekdays off entry timestamps
    tz: Tz,
}

impl RuleBasedProvider<Local> {
    /// Provider reading weekdays in local time, resolved per entry
    pub fn new() -> Self {
        Self::with_timezone(Local)
    }
}

impl<Tz: TimeZone> RuleBasedProvider<Tz> {
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    fn recommendations(&self, request: &InsightRequest) -> String {
        let tier = AverageTier::from_average(request.average);
        let mut lines = vec![format!(
            "## 🌱 Your Wellbeing Suggestions (7-day average: {}/10)",
            request.average
        )];

        let tips: [&str; 4] = match tier {
            AverageTier::Thriving => [
                "Keep the routines that carried this week: sleep, movement and time outside.",
                "Write down one thing that went well each evening to lock in the pattern.",
                "Share some of that energy: reach out to a friend who might need it.",
                "Plan something to look forward to next week so the momentum continues.",
            ],
            AverageTier::Balanced => [
                "Try a five-minute breathing break when the day feels heavy.",
                "Protect a regular bedtime; steady sleep smooths out mood swings.",
                "Take a short walk outdoors, even ten minutes helps.",
                "Note what happened on your lower days to spot the triggers.",
            ],
            AverageTier::Struggling => [
                "Please consider talking to a mental health professional this week.",
                "If you feel unsafe, call 112 or your local emergency number right away.",
                "Tell someone you trust how you have been feeling.",
                "Keep today small: water, a meal and a few minutes of rest are enough.",
            ],
            AverageTier::Empty => [
                "Log your mood once a day to start building a picture.",
                "Add a short note with each entry; context makes patterns visible.",
                "Try logging at the same time each day.",
                "Check back after a week for your first average.",
            ],
        };
        lines.extend(tips.iter().enumerate().map(|(i, tip)| format!("{}. {}", i + 1, tip)));

        let recent = select_recent(&request.entries, DEFAULT_RECENT_COUNT);
        if low_mood_alert(&recent) {
            lines.push(
                "🚨 Your last few entries have been consistently low. Please prioritize your safety and reach out for support."
                    .to_string(),
            );
        }

        if let Some(latest) = detect_anomalies(&request.entries).first() {
            lines.push(format!(
                "⚠️ Your mood dropped from {} to {} on {}. Be gentle with yourself around similar situations.",
                latest.from, latest.to, latest.date
            ));
        }

        lines.join("\n")
    }

    fn improvement_plan(&self, request: &InsightRequest) -> String {
        let tier = AverageTier::from_average(request.average);
        let goal = match tier {
            AverageTier::Thriving => "Sustain your current wellbeing and make it resilient to setbacks.",
            AverageTier::Balanced => "Lift your average by one point over the next two weeks.",
            AverageTier::Struggling | AverageTier::Empty => {
                "Stabilize your mood with support and a few dependable daily anchors."
            }
        };

        let mut lines = vec![
            "### 🎯 Main Goal".to_string(),
            goal.to_string(),
            "### 📋 Weekly Actions".to_string(),
            "1. Log your mood every day, with a note on what shaped it.".to_string(),
            "2. Schedule three 20-minute blocks for something restorative.".to_string(),
        ];

        if request.entries.len() >= PATTERN_MIN_ENTRIES {
            let pattern = day_of_week_pattern(&request.entries, &self.tz);
            match pattern.challenging_day {
                Some(day) => lines.push(format!(
                    "3. Plan something joyful for {} mornings, your most challenging day.",
                    weekday_name(day)
                )),
                None => lines.push("3. Review your week every Sunday evening.".to_string()),
            }
        } else {
            lines.push("3. Review your week every Sunday evening.".to_string());
        }

        lines.push("### 🧠 Mindset Shift".to_string());
        lines.push("Progress shows up in the overall flow, not in any single day.".to_string());

        lines.join("\n")
    }
}

impl Default for RuleBasedProvider<Local> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<Tz> InsightProvider for RuleBasedProvider<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    async fn generate(&self, request: &InsightRequest) -> Result<String, InsightError> {
        Ok(match request.kind {
            InsightKind::Recommendations => self.recommendations(request),
            InsightKind::ImprovementPlan => self.improvement_plan(request),
        })
    }
}
