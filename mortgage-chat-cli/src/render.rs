//! Terminal rendering for the transcript and the approval prompt

use console::style;
use mortgage_chat_core::protocol::PendingCalculation;
use mortgage_chat_core::session::{ChatMessage, Role};

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "Assistant";
pub const INPUT_HINT: &str = "Type your message here...";
pub const SENDING: &str = "Sending...";
pub const PROCESSING: &str = "Processing...";
pub const APPROVE: &str = "Approve";
pub const DENY: &str = "Deny";

/// Format money as whole US dollars with thousands separators
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}", sign, grouped)
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", value)
}

pub fn format_loan_term(years: u32) -> String {
    format!("{} years", years)
}

/// Labelled values shown in the approval prompt, in display order
pub fn approval_rows(calculation: &PendingCalculation) -> Vec<(&'static str, String)> {
    vec![
        ("Home Price", format_currency(calculation.home_price)),
        ("Down Payment", format_currency(calculation.down_payment)),
        ("Interest Rate", format_percentage(calculation.interest_rate)),
        ("Loan Term", format_loan_term(calculation.loan_term)),
        ("ZIP Code", calculation.zip_code.clone()),
    ]
}

pub fn render_approval_panel(calculation: &PendingCalculation) -> String {
    let rows = approval_rows(calculation);
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style("Simulation Approval Required").bold().magenta()
    ));
    out.push_str(&format!(
        "{}\n\n",
        style("Please review the simulation parameters below").dim()
    ));
    out.push_str("The AI wants to run a mortgage simulation with the following parameters:\n\n");
    for (label, value) in rows {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            label,
            style(value).bold(),
            width = label_width
        ));
    }
    out
}

pub fn render_header(title: &str) -> String {
    format!(
        "{}  {}\n    {}",
        style("AI").bold().on_blue().white(),
        style(title).bold(),
        style("Online").green()
    )
}

pub fn render_message(message: &ChatMessage) -> String {
    match message.role {
        Role::User => format!("{}: {}", style(USER_LABEL).bold().blue(), message.content),
        Role::Assistant => format!(
            "{}: {}",
            style(ASSISTANT_LABEL).bold().magenta(),
            message.content
        ),
    }
}
