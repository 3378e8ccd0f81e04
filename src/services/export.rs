// src/services/export.rs

use crate::models::Payslip;
use rust_decimal::{Decimal, RoundingStrategy};

fn money(amount: Decimal) -> String {
    format!(
        "${:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Printable payslip document.
pub fn payslip_html(company: &str, payslip: &Payslip) -> String {
    let rows = [
        ("Base Salary", payslip.base_salary, false),
        ("Overtime Pay", payslip.overtime_pay, false),
        ("Allowances", payslip.allowances, false),
        ("Gross Salary", payslip.gross_salary, true),
        ("Deductions", payslip.deductions, false),
        ("Net Salary", payslip.net_salary, true),
    ]
    .iter()
    .map(|(label, amount, total)| {
        let class = if *total { r#" class="total-row""# } else { "" };
        format!("      <tr{class}><td>{label}</td><td>{}</td></tr>", money(*amount))
    })
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        r#"<html>
  <head>
    <title>Payslip - {name}</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 20px; }}
      .header {{ text-align: center; margin-bottom: 30px; }}
      .company {{ font-size: 24px; font-weight: bold; }}
      .payslip-title {{ font-size: 18px; margin-top: 10px; }}
      .employee-info {{ margin-bottom: 20px; }}
      .salary-table {{ width: 100%; border-collapse: collapse; }}
      .salary-table th, .salary-table td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
      .salary-table th {{ background-color: #f2f2f2; }}
      .total-row {{ font-weight: bold; background-color: #f9f9f9; }}
    </style>
  </head>
  <body>
    <div class="header">
      <div class="company">{company}</div>
      <div class="payslip-title">Salary Slip</div>
    </div>
    <div class="employee-info">
      <p><strong>Employee ID:</strong> {employee_id}</p>
      <p><strong>Employee Name:</strong> {name}</p>
      <p><strong>Month/Year:</strong> {month} {year}</p>
      <p><strong>Generated Date:</strong> {generated}</p>
    </div>
    <table class="salary-table">
      <tr><th>Description</th><th>Amount</th></tr>
{rows}
    </table>
  </body>
</html>
"#,
        name = escape(&payslip.employee_name),
        company = escape(company),
        employee_id = escape(&payslip.employee_id),
        month = escape(&payslip.month),
        year = payslip.year,
        generated = payslip.generated_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::demo_data;
    use rust_decimal_macros::dec;

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(dec!(4100)), "$4100.00");
        assert_eq!(money(dec!(132.5)), "$132.50");
        assert_eq!(money(dec!(0.125)), "$0.13");
    }

    #[test]
    fn payslip_rows_in_fixed_order() {
        let data = demo_data();
        let html = payslip_html("Tyre Centre Management", &data.payslips[0]);

        let order = ["Base Salary", "Overtime Pay", "Allowances", "Gross Salary", "Deductions", "Net Salary"];
        let positions: Vec<usize> = order.iter().map(|l| html.find(l).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(html.contains("<td>Gross Salary</td><td>$4500.00</td>"));
        assert!(html.contains("<td>Net Salary</td><td>$4000.00</td>"));
        assert!(html.contains("<strong>Month/Year:</strong> October 2024"));
    }

    #[test]
    fn names_are_escaped() {
        let mut slip = demo_data().payslips.remove(0);
        slip.employee_name = "<script>".to_string();
        let html = payslip_html("A & B", &slip);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
    }
}
