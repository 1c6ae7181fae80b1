pub mod budget;
pub mod error;
pub mod expense;
pub mod health;
pub mod income;
pub mod user;

/// Normalized mount point of the API, used to build `Location` headers.
#[derive(Debug, Clone)]
pub struct ApiBase(pub String);

impl ApiBase {
    pub fn location(&self, path: &str) -> String {
        format!("{}/{}", self.0.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
