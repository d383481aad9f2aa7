use collegeaid_lib::types::fields;
use collegeaid_lib::{AcceptanceSummary, EstimateResult, TuitionSummary};
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct SchoolRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "State")]
    state: String,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Component")]
    component: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn text_field(record: &Value, field: &str) -> String {
    match &record[field] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn build_school_rows(page: &Value) -> Vec<SchoolRow> {
    page["results"]
        .as_array()
        .map(|results| {
            results
                .iter()
                .map(|r| SchoolRow {
                    id: text_field(r, fields::ID),
                    name: text_field(r, fields::SCHOOL_NAME),
                    city: text_field(r, fields::SCHOOL_CITY),
                    state: text_field(r, fields::SCHOOL_STATE),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn build_breakdown_rows(estimate: &EstimateResult) -> Vec<BreakdownRow> {
    let b = &estimate.breakdown;
    vec![
        BreakdownRow {
            component: "Grants",
            amount: format_currency(b.grants),
        },
        BreakdownRow {
            component: "Work-study",
            amount: format_currency(b.work_study),
        },
        BreakdownRow {
            component: "Loans",
            amount: format_currency(b.loans),
        },
        BreakdownRow {
            component: "Out-of-pocket",
            amount: format_currency(b.out_of_pocket),
        },
    ]
}

fn build_tuition_rows(t: &TuitionSummary) -> Vec<LookupRow> {
    let name = t.name.clone().unwrap_or_default();
    vec![
        LookupRow {
            id: t.id,
            name: name.clone(),
            field: "In-state tuition",
            value: t.in_state.map(format_currency).unwrap_or_else(|| "n/a".to_string()),
        },
        LookupRow {
            id: t.id,
            name,
            field: "Out-of-state tuition",
            value: t.out_state.map(format_currency).unwrap_or_else(|| "n/a".to_string()),
        },
    ]
}

fn build_acceptance_rows(a: &AcceptanceSummary) -> Vec<LookupRow> {
    vec![LookupRow {
        id: a.id,
        name: a.name.clone().unwrap_or_default(),
        field: "Acceptance rate",
        value: a
            .acceptance_rate_pct
            .map(|pct| format!("{:.1}%", pct))
            .unwrap_or_else(|| "n/a".to_string()),
    }]
}

fn render<T: Tabled>(rows: Vec<T>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if *format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

// -- Printers --

pub fn print_schools(page: &Value, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(page),
        _ => println!("{}", render(build_school_rows(page), format)),
    }
}

pub fn print_estimate(estimate: &EstimateResult, format: &OutputFormat) {
    if *format == OutputFormat::Json {
        print_json(estimate);
        return;
    }
    println!("{}", estimate_header(estimate));
    println!("{}", render(build_breakdown_rows(estimate), format));
    println!("{}", estimate.note);
}

pub fn print_tuition(tuition: &TuitionSummary, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(tuition),
        _ => println!("{}", render(build_tuition_rows(tuition), format)),
    }
}

pub fn print_acceptance(acceptance: &AcceptanceSummary, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(acceptance),
        _ => println!("{}", render(build_acceptance_rows(acceptance), format)),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn estimate_header(estimate: &EstimateResult) -> String {
    let school = &estimate.school;
    let location = match (&school.city, &school.state) {
        (Some(city), Some(state)) => format!(" ({}, {})", city, state),
        (None, Some(state)) => format!(" ({})", state),
        (Some(city), None) => format!(" ({})", city),
        (None, None) => String::new(),
    };
    format!(
        "{}{}\nIncome {} | bracket {} | net price {}",
        school.name,
        location,
        format_currency(estimate.income),
        estimate.bracket,
        format_currency(estimate.net_price)
    )
}

/// Whole dollars with thousands separators: `12000.0` -> `$12,000`.
fn format_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
