use crate::Response;

/// Result of a trigger call.
///
/// `Unhandled` is the "nobody is listening" sentinel. It is distinct from
/// `Handled(None)`, where the chain ran but the last listener returned no
/// response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No listeners were registered under the event name.
    Unhandled,
    /// The chain ran; carries the last invoked listener's response.
    Handled(Response),
}

impl Outcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled(_))
    }

    /// The final response, if the chain ran and produced one.
    pub fn into_response(self) -> Response {
        match self {
            Outcome::Handled(response) => response,
            Outcome::Unhandled => None,
        }
    }
}
