//! Query-string construction with the omit-if-default rule.
//!
//! Optional filters are only sent when they carry a value: `None`, empty
//! strings, numeric zero and `false` are dropped. Numbers are rendered as
//! decimal strings and values are form-urlencoded.

/// A value that may appear in a query string.
pub trait QueryValue {
    /// Rendered value, or `None` when the parameter should be omitted.
    fn render(&self) -> Option<String>;
}

impl QueryValue for &str {
    fn render(&self) -> Option<String> {
        (!self.is_empty()).then(|| (*self).to_string())
    }
}

impl QueryValue for String {
    fn render(&self) -> Option<String> {
        self.as_str().render()
    }
}

impl QueryValue for &String {
    fn render(&self) -> Option<String> {
        self.as_str().render()
    }
}

impl QueryValue for bool {
    fn render(&self) -> Option<String> {
        (*self).then(|| "true".to_string())
    }
}

impl QueryValue for f64 {
    fn render(&self) -> Option<String> {
        (*self != 0.0).then(|| self.to_string())
    }
}

macro_rules! integer_query_value {
    ($($t:ty),*) => {
        $(
            impl QueryValue for $t {
                fn render(&self) -> Option<String> {
                    (*self != 0).then(|| self.to_string())
                }
            }
        )*
    };
}

integer_query_value!(u8, u16, u32, u64, i32, i64, usize);

impl<T: QueryValue> QueryValue for Option<T> {
    fn render(&self) -> Option<String> {
        self.as_ref().and_then(T::render)
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` unless `value` is empty or a default.
    pub fn push<V: QueryValue>(mut self, key: &str, value: V) -> Self {
        if let Some(rendered) = value.render() {
            self.pairs.push((key.to_string(), rendered));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// `""` when empty, otherwise `?k=v&...`.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        format!("?{encoded}")
    }
}
