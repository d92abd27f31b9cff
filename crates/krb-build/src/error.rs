use thiserror::Error;

/// Failures raised while turning a parsed [`krb_format::Document`] into a
/// [`krb_model::RenderContext`]. Distinct from `krb_format::KrbError`
/// (malformed bytes) and `krb_model::ModelError` (bad arena navigation):
/// these are semantic problems in an otherwise well-formed document.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Model(#[from] krb_model::ModelError),
}

pub type Result<T> = std::result::Result<T, BuildError>;
