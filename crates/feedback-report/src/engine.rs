//! Report queries over the staging union view.

use feedback_store::{StagingStore, UNION_VIEW};
use rusqlite::{Connection, params};
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{
    AnalysisReport, CustomerRating, KeywordCount, MonthlyTrend, Sentiment, SentimentRow,
};

/// Complaint keywords counted by [`ReportEngine::keyword_frequency`], in report order.
pub const COMPLAINT_KEYWORDS: [&str; 4] = ["damaged", "delay", "defective", "late"];

/// Maximum rows in the top-customers report.
pub const TOP_CUSTOMER_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Read-only analyses over every staged record.
pub struct ReportEngine<'a> {
    conn: &'a Connection,
}

impl<'a> ReportEngine<'a> {
    pub fn new(store: &'a StagingStore) -> Self {
        Self {
            conn: store.connection(),
        }
    }

    /// Customers by mean rating, highest first; ties go to the lower customer id.
    pub fn top_customers(&self) -> Result<Vec<CustomerRating>> {
        let sql = format!(
            "SELECT customer_id, AVG(rating) AS avg_rating, COUNT(*) AS review_count
             FROM {UNION_VIEW}
             GROUP BY customer_id
             ORDER BY avg_rating DESC, customer_id ASC
             LIMIT ?1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![TOP_CUSTOMER_LIMIT as i64], |row| {
            Ok(CustomerRating {
                customer_id: row.get(0)?,
                average_rating: row.get(1)?,
                review_count: count(row.get(2)?),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// For each complaint keyword, how many comments contain it.
    ///
    /// Matching is a case-sensitive substring test; a comment counts once
    /// per keyword no matter how often the keyword repeats.
    pub fn keyword_frequency(&self) -> Result<Vec<KeywordCount>> {
        let sql = format!("SELECT COUNT(*) FROM {UNION_VIEW} WHERE instr(comments, ?1) > 0");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut counts = Vec::with_capacity(COMPLAINT_KEYWORDS.len());
        for keyword in COMPLAINT_KEYWORDS {
            let occurrences: i64 = stmt.query_row(params![keyword], |row| row.get(0))?;
            counts.push(KeywordCount {
                keyword: keyword.to_string(),
                occurrences: count(occurrences),
            });
        }
        Ok(counts)
    }

    /// One row per staged record, in union-view order.
    pub fn sentiment(&self) -> Result<Vec<SentimentRow>> {
        let sql = format!(
            "SELECT customer_id, rating FROM {UNION_VIEW} ORDER BY source_rank, id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            let rating: i64 = row.get(1)?;
            Ok(SentimentRow {
                customer_id: row.get(0)?,
                rating,
                sentiment: Sentiment::from_rating(rating),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Mean rating per `YYYY-MM` prefix of the review date, oldest month first.
    /// Records without a date are left out.
    pub fn monthly_trend(&self) -> Result<Vec<MonthlyTrend>> {
        let sql = format!(
            "SELECT substr(review_date, 1, 7) AS month, AVG(rating), COUNT(*)
             FROM {UNION_VIEW}
             WHERE review_date IS NOT NULL AND review_date <> ''
             GROUP BY month
             ORDER BY month"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(MonthlyTrend {
                month: row.get(0)?,
                average_rating: row.get(1)?,
                review_count: count(row.get(2)?),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Run the four reports in presentation order.
    pub fn run_all(&self) -> Result<AnalysisReport> {
        let report = AnalysisReport {
            top_customers: self.top_customers()?,
            keyword_counts: self.keyword_frequency()?,
            sentiments: self.sentiment()?,
            monthly_trend: self.monthly_trend()?,
        };
        debug!(
            top_customers = report.top_customers.len(),
            sentiment_rows = report.sentiments.len(),
            months = report.monthly_trend.len(),
            "reports computed"
        );
        info!("analysis complete");
        Ok(report)
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
