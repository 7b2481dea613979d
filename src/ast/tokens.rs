#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Number literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 011.99
    /// -.5
    /// ```
    Number(f64),

    /// String literal, already percent-decoded
    ///
    /// # Examples
    /// ```text
    /// `hello%20world`
    /// !legacy!
    /// ```
    String(String),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Null value
    Null,

    // Identifiers
    /// Field or operator name, already percent-decoded
    ///
    /// Must not start with `-`, `.` or a digit as written, and must not be
    /// exactly `true`, `false` or `null`.
    ///
    /// # Examples
    /// ```text
    /// price
    /// a.b-c_d~e
    /// %C2%A9          // "©"
    /// ```
    Symbol(String),

    // Delimiters
    /// Opens a field expression
    LParen,

    /// Closes a field expression
    RParen,

    /// Opens a list literal
    LBracket,

    /// Closes a list literal
    RBracket,

    /// Separates items
    Comma,

    /// Operator tag sigil
    ///
    /// # Example
    /// ```text
    /// (price,:gte,100)
    /// ```
    Colon,

    /// Descending sort marker, only meaningful in sort values
    ///
    /// A `-` directly followed by a digit, or by `.` and a digit, is a
    /// number instead.
    Minus,

    /// A character no token can start with
    Unexpected(char),

    /// End of input
    Eof,
}
