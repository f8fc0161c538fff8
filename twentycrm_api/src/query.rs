//! List query construction: the [`ListQuery`] builder and its rendering
//! into a transport-ready [`RequestDescriptor`].

use std::str::FromStr;

use serde_json::Value;

use crate::{request::RequestDescriptor, resource::Resource, Error};

/// Page size used when the caller does not set a limit.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Page size sent on every request of a return-all listing. This is the
/// maximum the Twenty API accepts for `first`; the configured limit is
/// ignored once return-all is set.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Sort order for list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order. This is the default.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ASC" => Ok(OrderDirection::Asc),
            "desc" | "DESC" => Ok(OrderDirection::Desc),
            other => Err(format!("unknown order direction {other:?}")),
        }
    }
}

/// One logical listing of a collection: page size, ordering, filter, and
/// cursor position.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub resource: Resource,
    pub page_size: u32,
    pub return_all: bool,
    pub order_by: Option<String>,
    pub order_direction: OrderDirection,
    pub filter: Option<Value>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl ListQuery {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            page_size: DEFAULT_PAGE_SIZE,
            return_all: false,
            order_by: None,
            order_direction: OrderDirection::default(),
            filter: None,
            after: None,
            before: None,
        }
    }

    /// Sets the maximum number of records for a bounded listing. Ignored
    /// when [`return_all`](Self::return_all) is set.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.page_size = limit.max(1);
        self
    }

    /// Requests exhaustive pagination instead of a single bounded page.
    pub fn return_all(mut self) -> Self {
        self.return_all = true;
        self
    }

    /// Sets the field to order results by.
    pub fn with_order_by(mut self, field: &str) -> Self {
        self.order_by = Some(field.to_string());
        self
    }

    /// Sets the sort direction. Only emitted when an order-by field is set.
    pub fn with_order_direction(mut self, direction: OrderDirection) -> Self {
        self.order_direction = direction;
        self
    }

    /// Sets an already-parsed filter object.
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Parses a user-supplied filter string. A malformed string fails here,
    /// before any request is sent.
    pub fn with_filter_json(mut self, raw: &str) -> Result<Self, Error> {
        let parsed: Value = serde_json::from_str(raw).map_err(Error::MalformedFilter)?;
        self.filter = Some(parsed);
        Ok(self)
    }

    /// Starts the listing after the given opaque cursor.
    pub fn with_after(mut self, cursor: &str) -> Self {
        self.after = Some(cursor.to_string());
        self
    }

    /// Ends the listing before the given opaque cursor.
    pub fn with_before(mut self, cursor: &str) -> Self {
        self.before = Some(cursor.to_string());
        self
    }

    /// Renders this query as a GET descriptor. Pure: the same query always
    /// yields an identical descriptor, with parameters emitted in a fixed
    /// order (`first`, `after`, `before`, `orderBy`, `orderDirection`,
    /// `filter`).
    pub fn to_request(&self) -> Result<RequestDescriptor, Error> {
        let collection = self.resource.collection()?;
        let mut request = RequestDescriptor::get(format!("/rest/{}", collection));

        let first = if self.return_all {
            MAX_PAGE_SIZE
        } else {
            self.page_size
        };
        request
            .query
            .push(("first".to_string(), first.to_string()));

        if let Some(after) = &self.after {
            request.query.push(("after".to_string(), after.clone()));
        }
        if let Some(before) = &self.before {
            request.query.push(("before".to_string(), before.clone()));
        }
        if let Some(order_by) = self.order_by.as_deref().filter(|f| !f.is_empty()) {
            request
                .query
                .push(("orderBy".to_string(), order_by.to_string()));
            request.query.push((
                "orderDirection".to_string(),
                self.order_direction.as_str().to_string(),
            ));
        }
        if let Some(filter) = &self.filter {
            // The filter was validated at parse time; serializing a Value
            // back out is not a user-input failure.
            let serialized = serde_json::to_string(filter).map_err(|_| Error::RequestFailed)?;
            request.query.push(("filter".to_string(), serialized));
        }

        Ok(request)
    }
}
