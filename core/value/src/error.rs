//! The error taxonomy (§3, §6, §7): a flag set plus an optional payload,
//! rendered into the bit-exact messages existing callers depend on.

bitflags::bitflags! {
    /// The flag set carried by an [`Error`]. More than one flag may be set
    /// at once — `UNDEFINED_IDENTIFIER | CHAINED_ACCESS` distinguishes a
    /// `TypeError` on a chained property from a root `ReferenceError`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ErrorFlags: u16 {
        const SYNTAX               = 1 << 0;
        const OUT_OF_MEMORY        = 1 << 1;
        const UNDEFINED_IDENTIFIER = 1 << 2;
        const NOT_A_FUNCTION       = 1 << 3;
        const CUSTOM_MESSAGE       = 1 << 4;
        const UNSUPPORTED_KEYWORD  = 1 << 5;
        const CHAINED_ACCESS       = 1 << 6;
    }
}

/// An evaluation error: a flag set plus an optional identifier or message
/// payload, borrowed from the arena that produced it.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", self.render())]
pub struct Error<'a> {
    flags: ErrorFlags,
    payload: Option<&'a str>,
}

impl<'a> Error<'a> {
    #[must_use]
    pub const fn new(flags: ErrorFlags, payload: Option<&'a str>) -> Self {
        Self { flags, payload }
    }

    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorFlags::SYNTAX, None)
    }

    #[must_use]
    pub const fn out_of_memory() -> Self {
        Self::new(ErrorFlags::OUT_OF_MEMORY, None)
    }

    #[must_use]
    pub const fn undefined_identifier(ident: &'a str, chained: bool) -> Self {
        let flags = if chained {
            ErrorFlags::UNDEFINED_IDENTIFIER.union(ErrorFlags::CHAINED_ACCESS)
        } else {
            ErrorFlags::UNDEFINED_IDENTIFIER
        };
        Self::new(flags, Some(ident))
    }

    #[must_use]
    pub const fn not_a_function(ident: &'a str) -> Self {
        Self::new(ErrorFlags::NOT_A_FUNCTION, Some(ident))
    }

    #[must_use]
    pub const fn unsupported_keyword(ident: &'a str) -> Self {
        Self::new(ErrorFlags::UNSUPPORTED_KEYWORD, Some(ident))
    }

    #[must_use]
    pub const fn custom(message: &'a str) -> Self {
        Self::new(ErrorFlags::CUSTOM_MESSAGE, Some(message))
    }

    #[must_use]
    pub const fn max_depth() -> Self {
        Self::custom("MaxDepthError")
    }

    #[must_use]
    pub const fn flags(&self) -> ErrorFlags {
        self.flags
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&'a str> {
        self.payload
    }

    #[must_use]
    pub fn is_out_of_memory(&self) -> bool {
        self.flags.contains(ErrorFlags::OUT_OF_MEMORY)
    }

    #[must_use]
    pub fn is_chained(&self) -> bool {
        self.flags.contains(ErrorFlags::CHAINED_ACCESS)
    }
}

impl Error<'_> {
    /// Renders the bit-exact message for this error's flag combination
    /// (§6's error-rendering table). `thiserror`'s `#[error]` attribute
    /// forwards to this rather than a literal format string, since the
    /// message depends on which flags are set, not on fixed fields.
    fn render(&self) -> String {
        let ident = self.payload.unwrap_or_default();
        if self.flags.contains(ErrorFlags::NOT_A_FUNCTION) {
            format!("TypeError: {ident} is not a function")
        } else if self.flags.contains(ErrorFlags::UNSUPPORTED_KEYWORD) {
            format!("SyntaxError: Unsupported keyword '{ident}'")
        } else if self.flags.contains(ErrorFlags::UNDEFINED_IDENTIFIER)
            && self.flags.contains(ErrorFlags::CHAINED_ACCESS)
        {
            format!("TypeError: Cannot read properties of undefined (reading '{ident}')")
        } else if self.flags.contains(ErrorFlags::UNDEFINED_IDENTIFIER) {
            format!("ReferenceError: Can't find variable: '{ident}'")
        } else if self.flags.contains(ErrorFlags::OUT_OF_MEMORY) {
            "MemoryError: Out of memory".to_string()
        } else if self.flags.contains(ErrorFlags::CUSTOM_MESSAGE) {
            ident.to_string()
        } else if self.flags.contains(ErrorFlags::SYNTAX) {
            "SyntaxError".to_string()
        } else {
            "Error".to_string()
        }
    }
}
