//! Narrative project insights and the optional AI risk analysis.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::time::Duration;

use super::ai_client::AiClient;
use crate::domain::FloorSpec;

pub const ANALYSIS_FALLBACK: &str = "AI Analysis unavailable (Ollama may not be running).";
const ANALYSIS_EMPTY: &str = "Analysis complete.";

/// Inputs of the engineering analysis prompt.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub area: f64,
    pub floors: FloorSpec,
    pub days: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub analysis: String,
    pub ai_available: bool,
}

#[derive(Clone)]
pub struct InsightProvider {
    client: AiClient,
    analysis_timeout: Duration,
}

impl InsightProvider {
    pub fn new(client: AiClient, analysis_timeout: Duration) -> Self {
        Self {
            client,
            analysis_timeout,
        }
    }

    /// Templated insights; deterministic, no outbound call.
    pub fn get_insights(area: f64, total_cost: Decimal, duration_weeks: u64) -> Vec<String> {
        vec![
            format!(
                "Based on {} sq yards, the timeline of {duration_weeks} weeks is aggressive but achievable.",
                format_area(area)
            ),
            format!(
                "The estimated cost of INR {} aligns with current market rates for this region.",
                format_amount(total_cost)
            ),
            "Recommendation: Secure cement bulk orders early to avoid price fluctuation during the Foundation phase."
                .to_string(),
        ]
    }

    /// Ask the generative service for risks and recommendations, falling
    /// back to a fixed message on any failure.
    pub async fn get_analysis(&self, summary: &ProjectSummary) -> Analysis {
        let prompt = format!(
            "Act as a senior construction engineer. Analyze a project with these details: \
             Area: {} sq yards, Floors: {}, Timeline: {} days. \
             Provide a brief 3-point summary of risks and 3 recommendations for optimization.",
            format_area(summary.area),
            summary.floors,
            summary.days
        );

        match self.client.generate(&prompt, self.analysis_timeout).await {
            Ok(text) => Analysis {
                analysis: text.unwrap_or_else(|| ANALYSIS_EMPTY.to_string()),
                ai_available: true,
            },
            Err(e) => {
                tracing::warn!(error = %e, "AI analysis unavailable, using fallback");
                Analysis {
                    analysis: ANALYSIS_FALLBACK.to_string(),
                    ai_available: false,
                }
            }
        }
    }
}

/// Areas read as decimals: `1000` -> `1000.0`, `1234.5` stays as is.
pub(crate) fn format_area(area: f64) -> String {
    if area.is_finite() && area.fract() == 0.0 {
        format!("{area:.1}")
    } else {
        format!("{area}")
    }
}

/// `1925000` -> `1,925,000.00`
fn format_amount(amount: Decimal) -> String {
    let fixed = format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    );
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}.{fraction}")
}
