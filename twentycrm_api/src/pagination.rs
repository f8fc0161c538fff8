//! Cursor pagination over Twenty list envelopes.
//!
//! The accumulation step is a pure fold over decoded [`PageEnvelope`]
//! values, so termination and ordering can be tested with scripted pages
//! and no network sender.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{request::RequestDescriptor, transport::Sender, Error};

/// Cursor state of one page. Field names match the wire format exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of a list response: a `data` mapping holding a single
/// collection, plus cursor information.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

impl PageEnvelope {
    pub fn decode(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| {
            tracing::error!("Unexpected list response shape: {}", e);
            Error::RequestFailed
        })
    }

    /// Takes the records out of `data`. The collection key is discovered
    /// from the response, never assumed from the request: an absent or
    /// empty `data` (or a non-array value) is an empty page, and more than
    /// one key is an error rather than an arbitrary pick.
    pub fn into_records(self) -> Result<Vec<Value>, Error> {
        let Some(mut data) = self.data else {
            return Ok(Vec::new());
        };
        match data.len() {
            0 => Ok(Vec::new()),
            1 => {
                let key = data.keys().next().cloned().unwrap_or_default();
                match data.remove(&key) {
                    Some(Value::Array(records)) => Ok(records),
                    _ => Ok(Vec::new()),
                }
            }
            n => Err(Error::AmbiguousEnvelope(n)),
        }
    }

    /// Cursor for the next page, if the server reports one. A page claiming
    /// `hasNextPage` without a usable `endCursor` terminates pagination
    /// instead of looping forever.
    pub fn next_cursor(&self) -> Option<&str> {
        let info = self.page_info.as_ref()?;
        if !info.has_next_page {
            return None;
        }
        info.end_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Pure accumulation step: appends one page's records onto the batch in
/// arrival order and reports the cursor to continue from, if any.
pub fn fold_page(batch: &mut Vec<Value>, envelope: PageEnvelope) -> Result<Option<String>, Error> {
    let next = envelope.next_cursor().map(str::to_owned);
    batch.extend(envelope.into_records()?);
    Ok(next)
}

/// Fetches every page of a listing through `sender`, strictly one request
/// in flight at a time, until the server stops reporting a next page.
///
/// Termination is driven entirely by the server's `hasNextPage`/`endCursor`
/// contract; there is no client-side iteration cap. Any failure mid-loop
/// propagates and the partial batch is dropped with it.
pub(crate) async fn fetch_all(
    sender: &dyn Sender,
    request: &RequestDescriptor,
) -> Result<Vec<Value>, Error> {
    let mut batch = Vec::new();
    let envelope = PageEnvelope::decode(sender.send(request).await?)?;

    // A first page without a collection key is a complete, empty listing.
    // A cursor advertised on such a page is not followed; only an empty
    // array under the key keeps the cursor contract alive.
    if envelope.data.as_ref().map_or(true, |data| data.is_empty()) {
        return Ok(batch);
    }

    let mut cursor = fold_page(&mut batch, envelope)?;

    while let Some(after) = cursor {
        let next = request.with_after_cursor(&after);
        let envelope = PageEnvelope::decode(sender.send(&next).await?)?;
        cursor = fold_page(&mut batch, envelope)?;
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{fold_page, PageEnvelope};
    use crate::Error;

    fn page(records: Value, has_next: bool, cursor: Option<&str>) -> PageEnvelope {
        PageEnvelope::decode(json!({
            "data": { "people": records },
            "pageInfo": { "hasNextPage": has_next, "endCursor": cursor },
            "totalCount": 3
        }))
        .unwrap()
    }

    #[test]
    fn fold_preserves_page_arrival_order() {
        let mut batch = Vec::new();

        let next = fold_page(
            &mut batch,
            page(json!([{"id": "a"}, {"id": "b"}]), true, Some("c1")),
        )
        .unwrap();
        assert_eq!(next.as_deref(), Some("c1"));

        let next = fold_page(&mut batch, page(json!([{"id": "c"}]), false, None)).unwrap();
        assert_eq!(next, None);

        let ids: Vec<&str> = batch.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn has_next_page_without_cursor_stops() {
        let envelope = page(json!([{"id": "a"}]), true, None);
        assert_eq!(envelope.next_cursor(), None);
    }

    #[test]
    fn has_next_page_with_empty_cursor_stops() {
        let envelope = page(json!([{"id": "a"}]), true, Some(""));
        assert_eq!(envelope.next_cursor(), None);
    }

    #[test]
    fn empty_collection_is_an_empty_page() {
        let envelope = page(json!([]), false, None);
        assert_eq!(envelope.next_cursor(), None);
        assert!(envelope.into_records().unwrap().is_empty());
    }

    #[test]
    fn missing_data_is_an_empty_page() {
        let envelope = PageEnvelope::decode(json!({
            "pageInfo": { "hasNextPage": false }
        }))
        .unwrap();
        assert!(envelope.into_records().unwrap().is_empty());
    }

    #[test]
    fn collection_key_is_discovered_from_the_response() {
        let envelope = PageEnvelope::decode(json!({
            "data": { "blocklists": [{"id": "x"}] },
            "pageInfo": { "hasNextPage": false }
        }))
        .unwrap();
        let records = envelope.into_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "x");
    }

    #[test]
    fn multiple_collection_keys_are_an_error() {
        let envelope = PageEnvelope::decode(json!({
            "data": { "people": [], "companies": [] },
            "pageInfo": { "hasNextPage": false }
        }))
        .unwrap();
        assert!(matches!(
            envelope.into_records(),
            Err(Error::AmbiguousEnvelope(2))
        ));
    }

    #[test]
    fn non_array_collection_value_is_an_empty_page() {
        let envelope = PageEnvelope::decode(json!({
            "data": { "people": {"id": "a"} },
            "pageInfo": { "hasNextPage": false }
        }))
        .unwrap();
        assert!(envelope.into_records().unwrap().is_empty());
    }
}
