//! Paged list envelopes and stock page filters.
//!
//! A list response looks like
//! `{"meta": {"offset": 0, "total_count": 6, "next": "..."}, "objects": [...]}`.
//! A page filter sees each page before its records are kept and may edit
//! `objects` or clear `meta.next` to end the walk.

use serde_json::Value;

use crate::errors::{AmaraError, Result};

pub(crate) const DEFAULT_PAGE_SIZE: u64 = 100;

/// The `meta` block of a list response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub offset: u64,
    pub total_count: Option<u64>,
    /// Continuation cursor. `None` means no more pages.
    pub next: Option<String>,
}

/// One page of a list response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub objects: Vec<Value>,
    pub meta: PageMeta,
}

impl Page {
    /// `true` while the server reports more pages.
    pub fn has_more(&self) -> bool {
        self.meta.next.is_some()
    }

    /// Mark the walk as finished after this page.
    pub fn finish(&mut self) {
        self.meta.next = None;
    }

    /// Split a list envelope. `objects` must be an array.
    pub(crate) fn from_envelope(mut envelope: Value) -> Result<Self> {
        let objects = match envelope.get_mut("objects").map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(AmaraError::MalformedPage(format!(
                    "`objects` is {} rather than an array",
                    json_kind(&other)
                )))
            }
            None => return Err(AmaraError::MalformedPage("missing `objects`".into())),
        };

        let meta = envelope.get("meta");
        let field = |key: &str| meta.and_then(|m| m.get(key));

        Ok(Page {
            objects,
            meta: PageMeta {
                offset: field("offset").and_then(Value::as_u64).unwrap_or(0),
                total_count: field("total_count").and_then(Value::as_u64),
                next: field("next")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
            },
        })
    }
}

/// `true` if `value` looks like a list envelope.
pub(crate) fn is_envelope(value: &Value) -> bool {
    value.get("objects").is_some()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Keep at most `n` records in total, then stop paging.
///
/// ```
/// use amara::pagination::{take, Page};
/// use serde_json::json;
///
/// let mut filter = take(3);
/// let page = Page { objects: vec![json!(1), json!(2)], ..Default::default() };
/// assert_eq!(filter(page).objects.len(), 2);
/// let page = Page { objects: vec![json!(3), json!(4)], ..Default::default() };
/// let page = filter(page);
/// assert_eq!(page.objects, vec![json!(3)]);
/// assert!(!page.has_more());
/// ```
pub fn take(n: usize) -> impl FnMut(Page) -> Page + Send {
    let mut remaining = n;
    move |mut page| {
        page.objects.truncate(remaining);
        remaining -= page.objects.len();
        if remaining == 0 {
            page.finish();
        }
        page
    }
}

/// Stop paging once a record matches `pred`. Matching and later records on
/// that page are dropped.
pub fn stop_when<P>(mut pred: P) -> impl FnMut(Page) -> Page + Send
where
    P: FnMut(&Value) -> bool + Send,
{
    move |mut page| {
        if let Some(pos) = page.objects.iter().position(&mut pred) {
            page.objects.truncate(pos);
            page.finish();
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_envelope() {
        let page = Page::from_envelope(json!({
            "meta": {"offset": 20, "total_count": 45, "next": "https://x/?offset=40"},
            "objects": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(page.objects.len(), 2);
        assert_eq!(page.meta.offset, 20);
        assert_eq!(page.meta.total_count, Some(45));
        assert!(page.has_more());
    }

    #[test]
    fn null_or_missing_next_means_done() {
        let page = Page::from_envelope(json!({"meta": {"next": null}, "objects": []})).unwrap();
        assert!(!page.has_more());
        let page = Page::from_envelope(json!({"objects": []})).unwrap();
        assert!(!page.has_more());
        assert_eq!(page.meta.total_count, None);
    }

    #[test]
    fn scalar_objects_is_rejected() {
        let err = Page::from_envelope(json!({"meta": {}, "objects": 7})).unwrap_err();
        assert!(matches!(err, AmaraError::MalformedPage(msg) if msg.contains("a number")));
    }

    #[test]
    fn stop_when_truncates_at_match() {
        let mut filter = stop_when(|v| v["id"] == 3);
        let page = Page {
            objects: vec![json!({"id": 2}), json!({"id": 3}), json!({"id": 4})],
            meta: PageMeta {
                next: Some("more".into()),
                ..Default::default()
            },
        };
        let page = filter(page);
        assert_eq!(page.objects, vec![json!({"id": 2})]);
        assert!(!page.has_more());
    }

    #[test]
    fn take_zero_keeps_nothing() {
        let mut filter = take(0);
        let page = filter(Page {
            objects: vec![json!(1)],
            ..Default::default()
        });
        assert!(page.objects.is_empty());
    }
}
