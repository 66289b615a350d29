//! Command-line front end. Every command goes through the hooks; nothing
//! here touches the store or the repositories directly.

use clap::{Args, Parser, Subcommand};

pub mod audit;
pub mod contact;
pub mod display;
pub mod lead;
pub mod link;
pub mod org;

pub use audit::run_audit;
pub use contact::run_contact;
pub use lead::run_lead;
pub use link::{run_link, run_unlink};
pub use org::run_org;

#[derive(Parser)]
#[command(name = "bizconsole")]
#[command(about = "Organisations, contacts and leads, and the links between them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage organisations
    #[command(subcommand)]
    Org(OrgCommand),
    /// Manage contacts
    #[command(subcommand)]
    Contact(ContactCommand),
    /// Manage leads
    #[command(subcommand)]
    Lead(LeadCommand),
    /// Create a relationship
    #[command(subcommand)]
    Link(LinkCommand),
    /// Remove a relationship
    #[command(subcommand)]
    Unlink(UnlinkCommand),
    /// Report relationship drift and invariant violations
    Audit(AuditArgs),
}

#[derive(Subcommand)]
pub enum OrgCommand {
    Add(OrgAddArgs),
    List,
    /// Show an organisation with its contacts, leads and websites
    Show { id: String },
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct OrgAddArgs {
    pub name: String,
    /// client, prospect, partner, supplier or other
    #[arg(short = 't', long = "type")]
    pub org_type: Option<String>,
    #[arg(short, long)]
    pub industry: Option<String>,
    #[arg(short, long)]
    pub website: Option<String>,
}

#[derive(Subcommand)]
pub enum ContactCommand {
    Add(ContactAddArgs),
    List,
    Show { id: String },
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ContactAddArgs {
    pub name: String,
    pub email: String,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub role: Option<String>,
}

#[derive(Subcommand)]
pub enum LeadCommand {
    Add(LeadAddArgs),
    List,
    Show { id: String },
}

#[derive(Args)]
pub struct LeadAddArgs {
    /// Name of the person behind the lead
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub email: String,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short = 'j', long)]
    pub job_title: Option<String>,
    /// website, referral, social, email, event or other
    #[arg(short, long)]
    pub source: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: String,
    /// orphan, cascade or reject (defaults to BIZCONSOLE_DELETE_POLICY)
    #[arg(long)]
    pub policy: Option<String>,
}

#[derive(Subcommand)]
pub enum LinkCommand {
    /// Add an organisation link to a contact
    ContactOrg {
        contact_id: String,
        organisation_id: String,
        #[arg(short, long, default_value = "")]
        role: String,
        #[arg(long)]
        primary: bool,
        /// Display priority, lower first (default 1 for primary, else 10)
        #[arg(long)]
        priority: Option<u32>,
    },
    /// Point a lead at an organisation
    LeadOrg {
        lead_id: String,
        organisation_id: String,
    },
    /// Attach a contact to a lead
    LeadContact { lead_id: String, contact_id: String },
}

#[derive(Subcommand)]
pub enum UnlinkCommand {
    /// Remove a contact's organisation link by relationship id
    ContactOrg { relationship_id: String },
    /// Clear a lead's organisation
    LeadOrg { lead_id: String },
    /// Detach a contact from a lead
    LeadContact { lead_id: String, contact_id: String },
}

#[derive(Args)]
pub struct AuditArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
