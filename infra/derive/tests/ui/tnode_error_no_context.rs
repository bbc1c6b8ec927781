#[tnode_derive::tnode_error]
pub enum LoaderError {
    #[error("Loader I/O error: {source}")]
    Io { source: std::io::Error },
}

fn main() {}
