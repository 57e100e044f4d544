/// Ordered query-string parameters. `None` values are dropped, never sent empty.
///
/// ```
/// use amara::Query;
///
/// let q = Query::new()
///     .param("team", "acme")
///     .opt("project", None::<&str>)
///     .param("order_by", "-created");
/// assert_eq!(q.pairs(), vec![
///     ("team".to_string(), "acme".to_string()),
///     ("order_by".to_string(), "-created".to_string()),
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    entries: Vec<(String, Option<String>)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value in place.
    pub fn param(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.opt(key, Some(value))
    }

    /// Set `key` only when `value` is `Some`.
    pub fn opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set(key.into(), value.map(|v| v.to_string()));
        self
    }

    pub fn limit(self, n: u64) -> Self {
        self.param("limit", n)
    }

    pub fn offset(self, n: u64) -> Self {
        self.param("offset", n)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_none())
    }

    /// Present entries in insertion order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }

    pub(crate) fn set(&mut self, key: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Parse a numeric parameter, ignoring values that are not integers.
    pub(crate) fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_values_are_omitted() {
        let q = Query::new()
            .opt("completed-after", None::<u64>)
            .param("type", "Translate")
            .opt("assignee", Some("bob"));
        assert_eq!(
            q.pairs(),
            vec![
                ("type".to_string(), "Translate".to_string()),
                ("assignee".to_string(), "bob".to_string()),
            ]
        );
        assert_eq!(q.get("completed-after"), None);
    }

    #[test]
    fn setting_twice_keeps_position() {
        let q = Query::new().limit(10).param("team", "acme").limit(20);
        assert_eq!(q.pairs()[0], ("limit".to_string(), "20".to_string()));
        assert_eq!(q.get_u64("limit"), Some(20));
    }

    #[test]
    fn clearing_a_value_drops_it() {
        let q = Query::new().param("team", "acme").opt("team", None::<&str>);
        assert!(q.is_empty());
    }
}
