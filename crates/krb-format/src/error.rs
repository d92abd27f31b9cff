use thiserror::Error;

/// Name of a document section, used to locate a [`KrbError::MalformedDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Elements,
    Styles,
    ComponentDefinitions,
    Scripts,
    Strings,
    Resources,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Elements => "elements",
            Self::Styles => "styles",
            Self::ComponentDefinitions => "component_definitions",
            Self::Scripts => "scripts",
            Self::Strings => "strings",
            Self::Resources => "resources",
        };
        f.write_str(name)
    }
}

/// Parse-time failures (spec §7). Every variant here is fatal: the parser
/// frees whatever it built and returns no partial `Document`.
#[derive(Debug, Error)]
pub enum KrbError {
    #[error("truncated document: needed {needed} bytes at offset {offset}, had {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad magic: expected \"KRB1\", found {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("bad offset: section {section} offset {offset} overlaps the header or is zero with a non-zero count")]
    BadOffset { section: Section, offset: u32 },

    #[error("has_app flag set but element 0 is not an App element")]
    MissingApp,

    #[error("unsupported format in section {section}: {reason}")]
    UnsupportedFormat { section: Section, reason: String },

    #[error("malformed document in section {section} at offset {offset}: {reason}")]
    MalformedDocument {
        section: Section,
        offset: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, KrbError>;
