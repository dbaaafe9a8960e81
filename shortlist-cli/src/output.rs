//! Rendering of recommendation results for the terminal and for JSON consumers

use serde::Serialize;
use shortlist_lib::engine::{Projected, Projection, RecommendationResult};

/// One item in the HTTP-style response body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApiRecommendation<'a> {
    pub assessment_name: &'a str,
    pub assessment_url: &'a str,
}

/// `{"recommendations": [{"assessment_name": .., "assessment_url": ..}]}`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApiResponse<'a> {
    pub recommendations: Vec<ApiRecommendation<'a>>,
}

impl<'a> From<&RecommendationResult<'a>> for ApiResponse<'a> {
    fn from(result: &RecommendationResult<'a>) -> Self {
        Self {
            recommendations: result
                .iter()
                .map(|r| ApiRecommendation {
                    assessment_name: r.name(),
                    assessment_url: r.url(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonResponse<'a> {
    query: &'a str,
    recommendations: Vec<Projected<'a>>,
}

/// Human-readable listing, one block per result.
pub fn text(result: &RecommendationResult<'_>, projection: Projection) -> String {
    let mut out = String::new();
    for rec in result {
        out.push_str(&format!("#{} (score: {:.4}) {}\n", rec.rank, rec.score, rec.name()));
        out.push_str(&format!("    {}\n", rec.url()));
        if projection == Projection::Full {
            let e = rec.entry;
            if !e.description.is_empty() {
                out.push_str(&format!("    {}\n", e.description));
            }
            out.push_str(&format!(
                "    type: {}  duration: {}  remote: {}  adaptive: {}\n",
                e.test_type,
                e.duration,
                yes_no(e.remote_support),
                yes_no(e.adaptive_support)
            ));
        }
    }
    out
}

/// `{"query": .., "recommendations": [..]}` with the requested projection.
pub fn json(
    query: &str,
    result: &RecommendationResult<'_>,
    projection: Projection,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonResponse {
        query,
        recommendations: result.project(projection),
    })
}

/// The HTTP-style body.
pub fn api(result: &RecommendationResult<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ApiResponse::from(result))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
