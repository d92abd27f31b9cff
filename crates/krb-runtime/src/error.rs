use thiserror::Error;

/// Failures that can stop the runtime before the frame loop starts.
/// Everything past this point — missing handlers, missing resources,
/// invalid indices — is tolerated and logged (spec §5, §7), not returned
/// here.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Parse(#[from] krb_format::KrbError),

    #[error(transparent)]
    Build(#[from] krb_build::BuildError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
