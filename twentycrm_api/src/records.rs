//! Builders that shape flat record fields into the nested JSON bodies the
//! Twenty API expects (`name { firstName, lastName }`, `emails`, `phones`,
//! `bodyV2` and friends).

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::Error;

/// Flat person fields, rendered into the nested Twenty person shape.
#[derive(Debug, Clone, Default)]
pub struct PersonFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub city: Option<String>,
}

impl PersonFields {
    pub fn with_first_name(mut self, first_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }
    pub fn with_last_name(mut self, last_name: &str) -> Self {
        self.last_name = Some(last_name.to_string());
        self
    }
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }
    pub fn with_job_title(mut self, job_title: &str) -> Self {
        self.job_title = Some(job_title.to_string());
        self
    }
    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    /// Renders the request body. Each nested group (`name`, `emails`,
    /// `phones`) is emitted only when at least one of its inputs is set,
    /// so the same builder works for partial updates.
    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        if self.first_name.is_some() || self.last_name.is_some() {
            body.insert(
                "name".to_string(),
                json!({
                    "firstName": self.first_name.unwrap_or_default(),
                    "lastName": self.last_name.unwrap_or_default(),
                }),
            );
        }
        if let Some(email) = self.email {
            body.insert(
                "emails".to_string(),
                json!({ "primaryEmail": email, "additionalEmails": [] }),
            );
        }
        if let Some(phone) = self.phone {
            body.insert(
                "phones".to_string(),
                json!({
                    "primaryPhoneNumber": phone,
                    "primaryPhoneCountryCode": "US",
                    "additionalPhones": [],
                }),
            );
        }
        if let Some(job_title) = self.job_title {
            body.insert("jobTitle".to_string(), Value::String(job_title));
        }
        if let Some(city) = self.city {
            body.insert("city".to_string(), Value::String(city));
        }
        Value::Object(body)
    }
}

/// Flat company fields.
#[derive(Debug, Clone)]
pub struct CompanyFields {
    pub name: String,
    pub domain_name: Option<String>,
    pub employees: Option<i64>,
    pub address: Option<String>,
}

impl CompanyFields {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            domain_name: None,
            employees: None,
            address: None,
        }
    }

    pub fn with_domain_name(mut self, domain_name: &str) -> Self {
        self.domain_name = Some(domain_name.to_string());
        self
    }
    pub fn with_employees(mut self, employees: i64) -> Self {
        self.employees = Some(employees);
        self
    }
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(self.name));
        if let Some(domain) = self.domain_name {
            body.insert(
                "domainName".to_string(),
                json!({
                    "primaryLinkLabel": domain,
                    "primaryLinkUrl": format!("https://{}", domain),
                }),
            );
        }
        // Zero means "not provided" on the wire.
        if let Some(employees) = self.employees.filter(|n| *n > 0) {
            body.insert("employees".to_string(), json!(employees));
        }
        if let Some(address) = self.address {
            body.insert(
                "address".to_string(),
                json!({
                    "addressStreet1": address,
                    "addressCity": "",
                    "addressCountry": "",
                }),
            );
        }
        Value::Object(body)
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" | "TODO" => Ok(TaskStatus::Todo),
            "in-progress" | "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "done" | "DONE" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status {other:?}")),
        }
    }
}

/// Flat task fields.
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub body: Option<String>,
    pub status: TaskStatus,
    pub due_at: Option<DateTime<Utc>>,
}

impl TaskFields {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            status: TaskStatus::default(),
            due_at: None,
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert("title".to_string(), Value::String(self.title));
        if let Some(text) = self.body {
            body.insert("bodyV2".to_string(), json!({ "markdown": text }));
        }
        body.insert(
            "status".to_string(),
            Value::String(self.status.as_str().to_string()),
        );
        if let Some(due_at) = self.due_at {
            body.insert(
                "dueAt".to_string(),
                Value::String(due_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        Value::Object(body)
    }
}

/// Flat note fields.
#[derive(Debug, Clone)]
pub struct NoteFields {
    pub title: String,
    pub body: Option<String>,
}

impl NoteFields {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert("title".to_string(), Value::String(self.title));
        if let Some(text) = self.body {
            body.insert("bodyV2".to_string(), json!({ "markdown": text }));
        }
        Value::Object(body)
    }
}

/// Opportunity pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpportunityStage {
    #[default]
    New,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl OpportunityStage {
    pub fn as_str(self) -> &'static str {
        match self {
            OpportunityStage::New => "NEW",
            OpportunityStage::Qualified => "QUALIFIED",
            OpportunityStage::Proposal => "PROPOSAL",
            OpportunityStage::Negotiation => "NEGOTIATION",
            OpportunityStage::Won => "WON",
            OpportunityStage::Lost => "LOST",
        }
    }
}

impl FromStr for OpportunityStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(OpportunityStage::New),
            "QUALIFIED" => Ok(OpportunityStage::Qualified),
            "PROPOSAL" => Ok(OpportunityStage::Proposal),
            "NEGOTIATION" => Ok(OpportunityStage::Negotiation),
            "WON" => Ok(OpportunityStage::Won),
            "LOST" => Ok(OpportunityStage::Lost),
            other => Err(format!("unknown opportunity stage {other:?}")),
        }
    }
}

/// Flat opportunity fields.
#[derive(Debug, Clone)]
pub struct OpportunityFields {
    pub name: String,
    pub amount: f64,
    pub stage: OpportunityStage,
    pub probability: f64,
    pub close_date: Option<DateTime<Utc>>,
}

impl OpportunityFields {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: 0.0,
            stage: OpportunityStage::default(),
            probability: 0.0,
            close_date: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
    pub fn with_stage(mut self, stage: OpportunityStage) -> Self {
        self.stage = stage;
        self
    }
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }
    pub fn with_close_date(mut self, close_date: DateTime<Utc>) -> Self {
        self.close_date = Some(close_date);
        self
    }

    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(self.name));
        body.insert("amount".to_string(), json!(self.amount));
        body.insert(
            "stage".to_string(),
            Value::String(self.stage.as_str().to_string()),
        );
        body.insert("probability".to_string(), json!(self.probability));
        if let Some(close_date) = self.close_date {
            body.insert(
                "closeDate".to_string(),
                Value::String(close_date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        Value::Object(body)
    }
}

/// Parses a raw JSON fields payload for custom resources. The payload must
/// be a JSON object; anything else fails before a request is built.
pub fn parse_fields_json(raw: &str) -> Result<Value, Error> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| Error::MalformedFields(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::MalformedFields(
            "expected a JSON object".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        parse_fields_json, CompanyFields, NoteFields, OpportunityFields, OpportunityStage,
        PersonFields, TaskFields, TaskStatus,
    };
    use crate::Error;

    #[test]
    fn person_name_and_contact_groups_are_nested() {
        let body = PersonFields::default()
            .with_first_name("Ada")
            .with_last_name("Lovelace")
            .with_email("ada@example.com")
            .with_phone("+15550100")
            .into_body();

        assert_eq!(
            body["name"],
            json!({"firstName": "Ada", "lastName": "Lovelace"})
        );
        assert_eq!(
            body["emails"],
            json!({"primaryEmail": "ada@example.com", "additionalEmails": []})
        );
        assert_eq!(body["phones"]["primaryPhoneNumber"], "+15550100");
        assert_eq!(body["phones"]["primaryPhoneCountryCode"], "US");
    }

    #[test]
    fn person_without_names_omits_the_name_group() {
        let body = PersonFields::default().with_city("Lisbon").into_body();
        assert!(body.get("name").is_none());
        assert_eq!(body["city"], "Lisbon");
    }

    #[test]
    fn person_with_only_first_name_defaults_last_name_to_empty() {
        let body = PersonFields::default().with_first_name("Ada").into_body();
        assert_eq!(body["name"], json!({"firstName": "Ada", "lastName": ""}));
    }

    #[test]
    fn company_domain_expands_to_a_link() {
        let body = CompanyFields::new("Acme")
            .with_domain_name("acme.com")
            .into_body();

        assert_eq!(body["name"], "Acme");
        assert_eq!(
            body["domainName"],
            json!({
                "primaryLinkLabel": "acme.com",
                "primaryLinkUrl": "https://acme.com",
            })
        );
    }

    #[test]
    fn company_zero_employees_is_not_emitted() {
        let body = CompanyFields::new("Acme").with_employees(0).into_body();
        assert!(body.get("employees").is_none());

        let body = CompanyFields::new("Acme").with_employees(12).into_body();
        assert_eq!(body["employees"], 12);
    }

    #[test]
    fn task_body_uses_body_v2_markdown() {
        let body = TaskFields::new("Follow up")
            .with_body("Call back on Monday")
            .with_status(TaskStatus::InProgress)
            .into_body();

        assert_eq!(body["title"], "Follow up");
        assert_eq!(body["bodyV2"], json!({"markdown": "Call back on Monday"}));
        assert_eq!(body["status"], "IN_PROGRESS");
        assert!(body.get("dueAt").is_none());
    }

    #[test]
    fn note_without_body_is_title_only() {
        let body = NoteFields::new("Kickoff notes").into_body();
        assert_eq!(body, json!({"title": "Kickoff notes"}));
    }

    #[test]
    fn opportunity_defaults_to_new_stage() {
        let body = OpportunityFields::new("Big deal")
            .with_amount(25_000.0)
            .into_body();

        assert_eq!(body["name"], "Big deal");
        assert_eq!(body["amount"], 25_000.0);
        assert_eq!(body["stage"], "NEW");
        assert_eq!(body["probability"], 0.0);
    }

    #[test]
    fn opportunity_stage_round_trips_from_str() {
        assert_eq!(
            "negotiation".parse::<OpportunityStage>().unwrap(),
            OpportunityStage::Negotiation
        );
        assert!("closed".parse::<OpportunityStage>().is_err());
    }

    #[test]
    fn custom_fields_must_be_a_json_object() {
        assert!(parse_fields_json(r#"{"position": 1}"#).is_ok());
        assert!(matches!(
            parse_fields_json("[1, 2]"),
            Err(Error::MalformedFields(_))
        ));
        assert!(matches!(
            parse_fields_json("{invalid"),
            Err(Error::MalformedFields(_))
        ));
    }
}
