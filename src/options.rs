/// Knobs for [`parse_with`](crate::parse_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum tag nesting depth. Exceeding it aborts the parse; well-formed
    /// statements stay far below this, so a deeper tree indicates corrupted
    /// or adversarial input.
    pub max_depth: usize,
    /// Currency code assumed when a statement carries no `CURDEF`.
    pub default_currency: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: 256,
            default_currency: "USD".to_string(),
        }
    }
}
