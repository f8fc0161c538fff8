use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde_json::Value;
use twentycrm_api::{
    parse_fields_json, Client, CompanyFields, NoteFields, OpportunityFields, OpportunityStage,
    PersonFields, Resource, TaskFields, TaskStatus,
};

#[derive(Args)]
pub struct GetArgs {
    pub resource: Resource,
    /// ID of the record
    pub id: String,
}

#[derive(Args)]
pub struct CreateArgs {
    pub resource: Resource,

    /// JSON object with field values (required for custom resources)
    #[arg(long)]
    pub fields: Option<String>,

    #[command(flatten)]
    pub record: RecordFlags,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub resource: Resource,
    /// ID of the record
    pub id: String,
    /// JSON object with the fields to change
    #[arg(long)]
    pub fields: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub resource: Resource,
    /// ID of the record
    pub id: String,
}

/// Typed creation flags, mirroring the fields each resource accepts.
#[derive(Args, Default)]
pub struct RecordFlags {
    /// First name (person)
    #[arg(long)]
    pub first_name: Option<String>,
    /// Last name (person)
    #[arg(long)]
    pub last_name: Option<String>,
    /// Email address (person)
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number (person)
    #[arg(long)]
    pub phone: Option<String>,
    /// Job title (person)
    #[arg(long)]
    pub job_title: Option<String>,
    /// City (person)
    #[arg(long)]
    pub city: Option<String>,

    /// Company name (company)
    #[arg(long)]
    pub name: Option<String>,
    /// Domain, e.g. example.com (company)
    #[arg(long)]
    pub domain: Option<String>,
    /// Employee count (company)
    #[arg(long)]
    pub employees: Option<i64>,
    /// Street address (company)
    #[arg(long)]
    pub address: Option<String>,

    /// Title (task, note, opportunity)
    #[arg(long)]
    pub title: Option<String>,
    /// Body text (task, note)
    #[arg(long)]
    pub body: Option<String>,
    /// Task status: todo, in-progress, done
    #[arg(long)]
    pub status: Option<TaskStatus>,
    /// Due date, RFC 3339 (task)
    #[arg(long)]
    pub due_at: Option<DateTime<Utc>>,

    /// Amount (opportunity)
    #[arg(long)]
    pub amount: Option<f64>,
    /// Stage: new, qualified, proposal, negotiation, won, lost (opportunity)
    #[arg(long)]
    pub stage: Option<OpportunityStage>,
    /// Win probability, 0-100 (opportunity)
    #[arg(long)]
    pub probability: Option<f64>,
    /// Expected close date, RFC 3339 (opportunity)
    #[arg(long)]
    pub close_date: Option<DateTime<Utc>>,
}

fn build_body(resource: &Resource, flags: &RecordFlags, fields: Option<&str>) -> Result<Value> {
    let mut body = match resource {
        Resource::Person => {
            let mut person = PersonFields::default();
            if let Some(v) = &flags.first_name {
                person = person.with_first_name(v);
            }
            if let Some(v) = &flags.last_name {
                person = person.with_last_name(v);
            }
            if let Some(v) = &flags.email {
                person = person.with_email(v);
            }
            if let Some(v) = &flags.phone {
                person = person.with_phone(v);
            }
            if let Some(v) = &flags.job_title {
                person = person.with_job_title(v);
            }
            if let Some(v) = &flags.city {
                person = person.with_city(v);
            }
            person.into_body()
        }
        Resource::Company => {
            let Some(name) = &flags.name else {
                bail!("--name is required when creating a company");
            };
            let mut company = CompanyFields::new(name);
            if let Some(v) = &flags.domain {
                company = company.with_domain_name(v);
            }
            if let Some(v) = flags.employees {
                company = company.with_employees(v);
            }
            if let Some(v) = &flags.address {
                company = company.with_address(v);
            }
            company.into_body()
        }
        Resource::Task => {
            let Some(title) = &flags.title else {
                bail!("--title is required when creating a task");
            };
            let mut task = TaskFields::new(title);
            if let Some(v) = &flags.body {
                task = task.with_body(v);
            }
            if let Some(v) = flags.status {
                task = task.with_status(v);
            }
            if let Some(v) = flags.due_at {
                task = task.with_due_at(v);
            }
            task.into_body()
        }
        Resource::Note => {
            let Some(title) = &flags.title else {
                bail!("--title is required when creating a note");
            };
            let mut note = NoteFields::new(title);
            if let Some(v) = &flags.body {
                note = note.with_body(v);
            }
            note.into_body()
        }
        Resource::Opportunity => {
            let Some(name) = flags.title.as_ref().or(flags.name.as_ref()) else {
                bail!("--title (or --name) is required when creating an opportunity");
            };
            let mut opportunity = OpportunityFields::new(name);
            if let Some(v) = flags.amount {
                opportunity = opportunity.with_amount(v);
            }
            if let Some(v) = flags.stage {
                opportunity = opportunity.with_stage(v);
            }
            if let Some(v) = flags.probability {
                opportunity = opportunity.with_probability(v);
            }
            if let Some(v) = flags.close_date {
                opportunity = opportunity.with_close_date(v);
            }
            opportunity.into_body()
        }
        _ => {
            let Some(raw) = fields else {
                bail!("--fields is required for this resource");
            };
            return Ok(parse_fields_json(raw)?);
        }
    };

    // --fields entries override the typed flags.
    if let Some(raw) = fields {
        let extra = parse_fields_json(raw)?;
        if let (Value::Object(target), Value::Object(extra)) = (&mut body, extra) {
            target.extend(extra);
        }
    }

    Ok(body)
}

pub async fn get(args: &GetArgs, client: &Client) -> Result<()> {
    let record = client.get_record(&args.resource, &args.id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub async fn create(args: &CreateArgs, client: &Client) -> Result<()> {
    let body = build_body(&args.resource, &args.record, args.fields.as_deref())?;
    let created = client.create_record(&args.resource, body).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

pub async fn update(args: &UpdateArgs, client: &Client) -> Result<()> {
    let body = parse_fields_json(&args.fields)?;
    let updated = client
        .update_record(&args.resource, &args.id, body)
        .await?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

pub async fn delete(args: &DeleteArgs, client: &Client) -> Result<()> {
    let deleted = client.delete_record(&args.resource, &args.id).await?;
    println!("{}", serde_json::to_string_pretty(&deleted)?);
    Ok(())
}
