use anyhow::Result;

use super::display::print_report;
use crate::relations::RelationshipCoordinator;

pub async fn run_audit(coord: &RelationshipCoordinator, json: bool) -> Result<()> {
    let report = coord.audit().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
