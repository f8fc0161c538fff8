use anyhow::Result;
use clap::Args;
use twentycrm_api::{Client, ListQuery, OrderDirection, Resource};

#[derive(Args)]
pub struct ListArgs {
    /// Resource to list: person, company, opportunity, task, note,
    /// calendar-event, message, attachment, workflow, or a custom
    /// collection name (plural form)
    pub resource: Resource,

    /// Return every record, paging until the server is exhausted
    #[arg(long)]
    pub all: bool,

    /// Max number of records to return
    #[arg(long, default_value = "50")]
    pub limit: u32,

    /// Field to order results by
    #[arg(long)]
    pub order_by: Option<String>,

    /// Order direction: asc or desc
    #[arg(long, default_value = "asc")]
    pub order_direction: OrderDirection,

    /// Filter query in JSON format
    #[arg(long)]
    pub filter: Option<String>,
}

pub async fn run(args: &ListArgs, client: &Client) -> Result<()> {
    let mut query = ListQuery::new(args.resource.clone()).with_limit(args.limit);
    if args.all {
        query = query.return_all();
    }
    if let Some(order_by) = &args.order_by {
        query = query
            .with_order_by(order_by)
            .with_order_direction(args.order_direction);
    }
    if let Some(filter) = &args.filter {
        query = query.with_filter_json(filter)?;
    }

    let records = client.list_records(&query).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
