//! High-level client for the Twenty CRM REST API.

use serde_json::Value;

use crate::{
    pagination::{self, PageEnvelope},
    query::ListQuery,
    request::RequestDescriptor,
    resource::Resource,
    transport::{HttpSender, Sender},
    Error,
};

/// Client for a Twenty CRM instance.
///
/// Wraps an authenticated [`Sender`] and exposes the record operations of
/// the REST API. Calls are strictly sequential: a listing runs to
/// completion (or failure) before anything else is sent.
pub struct Client {
    sender: Box<dyn Sender>,
}

impl Client {
    /// Creates a client for the given instance URL and API key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Ok(Self {
            sender: Box::new(HttpSender::new(base_url, api_key)?),
        })
    }

    /// Creates a client over a custom sender. Used in tests to script
    /// responses without a network.
    pub fn with_sender(sender: Box<dyn Sender>) -> Self {
        Self { sender }
    }

    /// Creates a record and returns the server's representation of it.
    pub async fn create_record(&self, resource: &Resource, body: Value) -> Result<Value, Error> {
        let collection = resource.collection()?;
        let request = RequestDescriptor::post(format!("/rest/{}", collection), body);
        self.sender.send(&request).await
    }

    /// Fetches a single record by ID.
    pub async fn get_record(&self, resource: &Resource, id: &str) -> Result<Value, Error> {
        let collection = resource.collection()?;
        let request = RequestDescriptor::get(format!("/rest/{}/{}", collection, id));
        self.sender.send(&request).await
    }

    /// Applies a partial update to a record.
    pub async fn update_record(
        &self,
        resource: &Resource,
        id: &str,
        body: Value,
    ) -> Result<Value, Error> {
        let collection = resource.collection()?;
        let request = RequestDescriptor::patch(format!("/rest/{}/{}", collection, id), body);
        self.sender.send(&request).await
    }

    /// Deletes a record by ID.
    pub async fn delete_record(&self, resource: &Resource, id: &str) -> Result<Value, Error> {
        let collection = resource.collection()?;
        let request = RequestDescriptor::delete(format!("/rest/{}/{}", collection, id));
        self.sender.send(&request).await
    }

    /// Lists records. A bounded query sends exactly one request; a
    /// return-all query pages until the server reports no next page.
    /// Either way the result is the flat record sequence in server order,
    /// and a failed listing never returns partial data.
    pub async fn list_records(&self, query: &ListQuery) -> Result<Vec<Value>, Error> {
        let request = query.to_request()?;
        if query.return_all {
            pagination::fetch_all(self.sender.as_ref(), &request).await
        } else {
            let envelope = PageEnvelope::decode(self.sender.send(&request).await?)?;
            envelope.into_records()
        }
    }
}
