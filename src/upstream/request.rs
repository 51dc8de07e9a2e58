use super::UpstreamError;
use reqwest::{Method, Url};
use serde_json::Value;

/// Shape of one outbound call: method, path below the platform base URL,
/// query string and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl UpstreamRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolve against a base URL. Each segment is percent-encoded on its own,
    /// so identifiers containing `/` or `?` stay inside their segment.
    /// Dot segments are refused since the URL parser would drop them.
    pub fn url(&self, base: &Url) -> Result<Url, UpstreamError> {
        if let Some(segment) = self.segments.iter().find(|s| matches!(s.as_str(), "." | "..")) {
            return Err(UpstreamError::InvalidUrl(format!(
                "dot segment '{}' in request path",
                segment
            )));
        }

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}
