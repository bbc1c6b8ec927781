use std::borrow::Cow;

#[tnode_derive::tnode_error]
pub enum ArtifactError {
    #[error("Artifact directory not found{}: {message}", format_context(.context))]
    DirectoryNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Contract '{contract_name}' is defined twice{}", format_context(.context))]
    DuplicateContract { contract_name: String, context: Option<Cow<'static, str>> },

    #[error("Artifact scan failed{}: {source}", format_context(.context))]
    Walk { source: walkdir::Error, context: Option<Cow<'static, str>> },

    #[error("Artifact I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed artifact{}: {source}", format_context(.context))]
    Codec { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
