//! The fixed reserved-token table.

/// Reserved tokens in their fixed order.
///
/// The order is significant: a reserved token's tag number is
/// `TokenTag::FIRST_RESERVED + index`. The first [`Reserved::NUM_WORDS`]
/// entries are the keywords; they are pre-interned and flagged by every
/// `StringInterner`. The rest are multi-byte operators and the sentinel
/// tags for end of stream and the literal token classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Reserved {
    // === Keywords ===
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    Global,
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,

    // === Multi-byte operators ===
    /// `//`
    IDiv,
    /// `..`
    Concat,
    /// `...`
    Dots,
    /// `==`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `!=` or `~=`
    Ne,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `::`
    DbColon,

    // === Sentinels ===
    Eos,
    Flt,
    Int,
    Name,
    String,
}

impl Reserved {
    /// Number of keyword entries at the front of [`Reserved::ALL`].
    pub const NUM_WORDS: usize = 23;

    /// Every reserved token, in tag order.
    pub const ALL: [Reserved; 38] = [
        Reserved::And,
        Reserved::Break,
        Reserved::Do,
        Reserved::Else,
        Reserved::Elseif,
        Reserved::End,
        Reserved::False,
        Reserved::For,
        Reserved::Function,
        Reserved::Global,
        Reserved::Goto,
        Reserved::If,
        Reserved::In,
        Reserved::Local,
        Reserved::Nil,
        Reserved::Not,
        Reserved::Or,
        Reserved::Repeat,
        Reserved::Return,
        Reserved::Then,
        Reserved::True,
        Reserved::Until,
        Reserved::While,
        Reserved::IDiv,
        Reserved::Concat,
        Reserved::Dots,
        Reserved::Eq,
        Reserved::Ge,
        Reserved::Le,
        Reserved::Ne,
        Reserved::Shl,
        Reserved::Shr,
        Reserved::DbColon,
        Reserved::Eos,
        Reserved::Flt,
        Reserved::Int,
        Reserved::Name,
        Reserved::String,
    ];

    /// The keyword prefix of [`Reserved::ALL`].
    pub fn words() -> &'static [Reserved] {
        &Self::ALL[..Self::NUM_WORDS]
    }

    /// Position in [`Reserved::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Reserved::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this entry is a keyword (as opposed to an operator or sentinel).
    #[inline]
    pub const fn is_word(self) -> bool {
        self.index() < Self::NUM_WORDS
    }

    /// Source spelling for keywords and operators; display text for sentinels.
    pub const fn spelling(self) -> &'static str {
        match self {
            Reserved::And => "and",
            Reserved::Break => "break",
            Reserved::Do => "do",
            Reserved::Else => "else",
            Reserved::Elseif => "elseif",
            Reserved::End => "end",
            Reserved::False => "false",
            Reserved::For => "for",
            Reserved::Function => "function",
            Reserved::Global => "global",
            Reserved::Goto => "goto",
            Reserved::If => "if",
            Reserved::In => "in",
            Reserved::Local => "local",
            Reserved::Nil => "nil",
            Reserved::Not => "not",
            Reserved::Or => "or",
            Reserved::Repeat => "repeat",
            Reserved::Return => "return",
            Reserved::Then => "then",
            Reserved::True => "true",
            Reserved::Until => "until",
            Reserved::While => "while",
            Reserved::IDiv => "//",
            Reserved::Concat => "..",
            Reserved::Dots => "...",
            Reserved::Eq => "==",
            Reserved::Ge => ">=",
            Reserved::Le => "<=",
            Reserved::Ne => "!=",
            Reserved::Shl => "<<",
            Reserved::Shr => ">>",
            Reserved::DbColon => "::",
            Reserved::Eos => "<eof>",
            Reserved::Flt => "<number>",
            Reserved::Int => "<integer>",
            Reserved::Name => "<name>",
            Reserved::String => "<string>",
        }
    }
}
