use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use feedback_report::{AnalysisReport, Sentiment};

use crate::commands::RunOutcome;

pub fn print_run_summary(outcome: &RunOutcome) {
    let result = &outcome.result;
    println!("Database: {}", outcome.database.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Tag"),
        header_cell("Input"),
        header_cell("Read"),
        header_cell("Accepted"),
        header_cell("Rejected"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let mut total_read = 0usize;
    let mut total_accepted = 0usize;
    for summary in &result.sources {
        total_read += summary.read;
        total_accepted += summary.accepted;
        table.add_row(vec![
            Cell::new(summary.source.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.source.log_tag()),
            Cell::new(summary.path.display()),
            Cell::new(summary.read),
            Cell::new(summary.accepted),
            count_cell(summary.rejected as u64, Color::Red),
        ]);
    }
    for failure in &result.failures {
        table.add_row(vec![
            Cell::new(failure.source.as_str())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(failure.source.log_tag()),
            Cell::new(failure.path.display()),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("skipped").fg(Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_read).add_attribute(Attribute::Bold),
        Cell::new(total_accepted).add_attribute(Attribute::Bold),
        count_cell(result.total_rejected() as u64, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if !result.failures.is_empty() {
        eprintln!("Skipped sources:");
        for failure in &result.failures {
            eprintln!("- {}", failure.message);
        }
    }
}

/// Completion notice pointing at the error log.
pub fn print_completion_notice(outcome: &RunOutcome) {
    if outcome.rejections_logged > 0 {
        eprintln!("{} record(s) rejected.", outcome.rejections_logged);
    }
    eprintln!(
        "Data parsing completed. Check {} for issues.",
        outcome.error_log.display()
    );
}

pub fn print_report(report: &AnalysisReport) {
    print_top_customers(report);
    print_keyword_counts(report);
    print_sentiments(report);
    print_monthly_trend(report);
}

fn print_top_customers(report: &AnalysisReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Customer"),
        header_cell("Average rating"),
        header_cell("Reviews"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &report.top_customers {
        table.add_row(vec![
            Cell::new(&row.customer_id),
            Cell::new(format!("{:.2}", row.average_rating)),
            Cell::new(row.review_count),
        ]);
    }
    print_section("Top customers", &table, report.top_customers.is_empty());
}

fn print_keyword_counts(report: &AnalysisReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Keyword"), header_cell("Comments")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in &report.keyword_counts {
        table.add_row(vec![
            Cell::new(&row.keyword),
            count_cell(row.occurrences, Color::Yellow),
        ]);
    }
    print_section("Complaint keywords", &table, report.keyword_counts.is_empty());
}

fn print_sentiments(report: &AnalysisReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Customer"),
        header_cell("Rating"),
        header_cell("Sentiment"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in &report.sentiments {
        table.add_row(vec![
            Cell::new(&row.customer_id),
            Cell::new(row.rating),
            sentiment_cell(row.sentiment),
        ]);
    }
    print_section("Sentiment", &table, report.sentiments.is_empty());
}

fn print_monthly_trend(report: &AnalysisReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Average rating"),
        header_cell("Reviews"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &report.monthly_trend {
        table.add_row(vec![
            Cell::new(&row.month),
            Cell::new(format!("{:.2}", row.average_rating)),
            Cell::new(row.review_count),
        ]);
    }
    print_section("Monthly trend", &table, report.monthly_trend.is_empty());
}

fn print_section(title: &str, table: &Table, empty: bool) {
    println!();
    println!("{title}:");
    if empty {
        println!("  (no rows)");
    } else {
        println!("{table}");
    }
}

fn sentiment_cell(sentiment: Sentiment) -> Cell {
    let color = match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::Red,
    };
    Cell::new(sentiment.as_str()).fg(color)
}

fn count_cell(value: u64, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
