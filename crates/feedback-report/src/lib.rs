//! Aggregate reports over the unioned staging tables.
//!
//! - **Top customers**: mean rating and review count, best ten
//! - **Keyword frequency**: comments mentioning each complaint keyword
//! - **Sentiment**: per-record positive / neutral / negative label
//! - **Monthly trend**: mean rating per review month

mod engine;
mod types;

pub use engine::{COMPLAINT_KEYWORDS, ReportEngine, ReportError, Result, TOP_CUSTOMER_LIMIT};
pub use types::{
    AnalysisReport, CustomerRating, KeywordCount, MonthlyTrend, Sentiment, SentimentRow,
};
