//! The resource catalog: logical resources and their REST collection names.

use std::str::FromStr;

use crate::Error;

/// A record collection exposed by the Twenty REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Person,
    Company,
    Opportunity,
    Task,
    Note,
    CalendarEvent,
    Message,
    Attachment,
    Workflow,
    /// Any other collection, addressed by its plural REST name
    /// (e.g. `blocklists`, `views`).
    Custom(String),
}

impl Resource {
    /// The plural path segment under `/rest/`. Custom names are validated
    /// here: an empty name or one containing a path separator is rejected.
    pub fn collection(&self) -> Result<&str, Error> {
        Ok(match self {
            Resource::Person => "people",
            Resource::Company => "companies",
            Resource::Opportunity => "opportunities",
            Resource::Task => "tasks",
            Resource::Note => "notes",
            Resource::CalendarEvent => "calendarEvents",
            Resource::Message => "messages",
            Resource::Attachment => "attachments",
            Resource::Workflow => "workflows",
            Resource::Custom(name) => {
                if name.is_empty() || name.contains('/') || name.contains('?') {
                    return Err(Error::InvalidResource(name.clone()));
                }
                name.as_str()
            }
        })
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "person" => Resource::Person,
            "company" => Resource::Company,
            "opportunity" => Resource::Opportunity,
            "task" => Resource::Task,
            "note" => Resource::Note,
            "calendar-event" | "calendarEvent" => Resource::CalendarEvent,
            "message" => Resource::Message,
            "attachment" => Resource::Attachment,
            "workflow" => Resource::Workflow,
            "" => return Err(Error::InvalidResource(String::new())),
            other => Resource::Custom(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Resource;
    use crate::Error;

    #[test]
    fn known_resources_map_to_plural_collections() {
        assert_eq!(Resource::Person.collection().unwrap(), "people");
        assert_eq!(Resource::Company.collection().unwrap(), "companies");
        assert_eq!(Resource::CalendarEvent.collection().unwrap(), "calendarEvents");
    }

    #[test]
    fn custom_resource_uses_its_own_name() {
        let resource = Resource::Custom("blocklists".to_string());
        assert_eq!(resource.collection().unwrap(), "blocklists");
    }

    #[test]
    fn empty_custom_resource_is_rejected() {
        let resource = Resource::Custom(String::new());
        assert!(matches!(
            resource.collection(),
            Err(Error::InvalidResource(_))
        ));
    }

    #[test]
    fn custom_resource_with_path_separator_is_rejected() {
        let resource = Resource::Custom("people/../secrets".to_string());
        assert!(matches!(
            resource.collection(),
            Err(Error::InvalidResource(_))
        ));
    }
}
