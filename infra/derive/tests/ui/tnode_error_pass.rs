use std::borrow::Cow;
use tnode_derive::tnode_error;

#[tnode_error]
pub enum ArtifactError {
    #[error("Artifact I/O error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Artifact fault{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let _err: ArtifactError = "unreadable".into();
}
