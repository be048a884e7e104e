use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean rating and review count for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRating {
    pub customer_id: String,
    pub average_rating: f64,
    pub review_count: u64,
}

/// Number of comments containing a complaint keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub occurrences: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// 4 and 5 are positive, 3 is neutral, anything lower is negative.
    pub fn from_rating(rating: i64) -> Self {
        match rating {
            r if r >= 4 => Sentiment::Positive,
            3 => Sentiment::Neutral,
            _ => Sentiment::Negative,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRow {
    pub customer_id: String,
    pub rating: i64,
    pub sentiment: Sentiment,
}

/// Mean rating and review count for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub average_rating: f64,
    pub review_count: u64,
}

/// The four reports, in presentation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub top_customers: Vec<CustomerRating>,
    pub keyword_counts: Vec<KeywordCount>,
    pub sentiments: Vec<SentimentRow>,
    pub monthly_trend: Vec<MonthlyTrend>,
}
