//! Print the daily aggregate from the command line.

use karam_admin::db::{Backend, PgBackend};
use karam_admin::services::{daily_report, today_in};
use karam_core::parse_form_date;

use super::{CommandError, connect};

/// Print the units left on `date` (today in the panel's zone by default).
///
/// # Errors
///
/// Returns an error if the date doesn't parse or a backend call fails.
#[allow(clippy::print_stdout)]
pub async fn run(date: Option<&str>) -> Result<(), CommandError> {
    let (config, pool) = connect().await?;
    let date = match date {
        Some(raw) => parse_form_date(raw)?,
        None => today_in(config.timezone),
    };

    let backend = PgBackend::new(pool);
    let stores = backend.list_stores().await?;
    let report = daily_report(&backend, date, &stores).await?;

    if report.is_empty() {
        println!("{}", report.empty_message());
        return Ok(());
    }

    println!("Total del día {date}");
    for group in &report.groups {
        println!(
            "  {:<40} {:>3} entregas {:>6}",
            group.store_name, group.deliveries, group.units
        );
    }
    println!("  {:<40} {:>20}", "Total", report.grand_total);
    Ok(())
}
