use ::anyhow::Context;
use ::anyhow::Result;
use ::serde::Serialize;

/// Query parameters added to a request, kept as decoded pairs in the order they were added.
///
/// They are encoded only when the request is built,
/// after any query already written into the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParamsStore {
    pairs: Vec<(String, String)>,
}

impl QueryParamsStore {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Adds anything which serializes to key value pairs.
    ///
    /// Nothing is added if it fails to encode.
    pub fn add<V>(&mut self, query_params: V) -> Result<()>
    where
        V: Serialize,
    {
        let encoded = ::serde_urlencoded::to_string(query_params)?;
        let pairs = ::serde_urlencoded::from_str::<Vec<(String, String)>>(&encoded)
            .with_context(|| format!("Failed to read back encoded query '{encoded}'"))?;

        self.pairs.extend(pairs);
        Ok(())
    }

    /// Adds the key once for each value, in order.
    pub fn add_values<'a, I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.clone()));
        }
    }

    pub fn has_content(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// Builds the full query string, with the raw query from the path first.
    ///
    /// The raw query is passed through as is, without re-encoding.
    /// `None` is returned when there is no query at all.
    pub fn to_query_string(&self, raw_query: Option<&str>) -> Option<String> {
        let raw_query = raw_query.unwrap_or_default();
        if !self.has_content() {
            return (!raw_query.is_empty()).then(|| raw_query.to_string());
        }

        let encoded = ::serde_urlencoded::to_string(&self.pairs).unwrap_or_default();
        if raw_query.is_empty() {
            Some(encoded)
        } else {
            Some(format!("{raw_query}&{encoded}"))
        }
    }
}
