use oee_core::{LogEntry, MetricInputs, MetricResult, Rating, RatingThresholds};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Availability")]
    availability: String,
    #[tabled(rename = "Performance")]
    performance: String,
    #[tabled(rename = "Quality")]
    quality: String,
    #[tabled(rename = "OEE")]
    oee: String,
}

fn pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

fn rating_cell(rating: Rating) -> String {
    let code = match rating {
        Rating::Poor => "31",
        Rating::Fair => "33",
        Rating::Good => "32",
    };
    format!("\x1b[{}m{}\x1b[0m", code, rating.label())
}

fn kpi_rows(result: &MetricResult, thresholds: &RatingThresholds) -> Vec<KpiRow> {
    let mut performance = pct(result.performance);
    if result.raw_performance > result.performance {
        performance = format!("{} (raw {})", performance, pct(result.raw_performance));
    }

    vec![
        KpiRow {
            metric: "Availability".to_string(),
            value: pct(result.availability),
            rating: rating_cell(thresholds.rate(result.availability)),
        },
        KpiRow {
            metric: "Performance".to_string(),
            value: performance,
            rating: rating_cell(thresholds.rate(result.performance)),
        },
        KpiRow {
            metric: "Quality".to_string(),
            value: pct(result.quality),
            rating: rating_cell(thresholds.rate(result.quality)),
        },
        KpiRow {
            metric: "OEE".to_string(),
            value: pct(result.oee),
            rating: rating_cell(thresholds.rate(result.oee)),
        },
    ]
}

pub fn show_kpis(inputs: &MetricInputs, result: &MetricResult, thresholds: &RatingThresholds) {
    println!(
        "\x1b[1;36mShift\x1b[0m planned {} min, downtime {} min, cycle {} min/unit, {} units ({} good)",
        inputs.planned_production_time,
        inputs.downtime,
        inputs.ideal_cycle_time,
        inputs.total_units,
        inputs.good_units
    );

    let mut table = Table::new(kpi_rows(result, thresholds));
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    println!("{}", table);
}

pub fn show_log(entries: &[LogEntry]) {
    if entries.is_empty() {
        println!("No data available yet.");
        return;
    }

    let rows: Vec<LogRow> = entries
        .iter()
        .map(|e| LogRow {
            date: e.date.format("%Y-%m-%d").to_string(),
            availability: pct(e.availability),
            performance: pct(e.performance),
            quality: pct(e.quality),
            oee: pct(e.oee),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}
