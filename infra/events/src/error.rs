use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[tnode_derive::tnode_error]
pub enum EventBusError {
    /// Capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The bus was closed; no new subscriptions are accepted.
    #[error("Event bus closed{}: {message}", format_context(.context))]
    Closed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
