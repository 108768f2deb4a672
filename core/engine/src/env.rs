//! The environment bundle threaded through every evaluation (§6).

use jexpr_value::{Error, Value};

/// The host reference callback: resolves root identifiers (`this` is
/// [`Value::global_sentinel`]) and member accesses (`this` is the
/// receiver). The identifier is passed as a `String`-kind value, matching
/// the wire contract; returning `Undefined` means "unknown".
pub type RefCallback<'a> =
    dyn Fn(Value<'a>, Value<'a>, Option<&'a ()>) -> Result<Value<'a>, Error<'a>> + 'a;

/// Bundles the pieces `eval` needs beyond the expression text itself: a
/// case-sensitivity flag for string comparisons, an opaque pointer handed
/// back to callbacks untouched, the identifier-resolution callback, and the
/// recursion-depth ceiling.
pub struct Env<'a> {
    no_case: bool,
    udata: Option<&'a ()>,
    reference: Option<&'a RefCallback<'a>>,
    max_depth: u32,
}

impl<'a> Default for Env<'a> {
    fn default() -> Self {
        Self {
            no_case: false,
            udata: None,
            reference: None,
            max_depth: 100,
        }
    }
}

impl<'a> Env<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_no_case(mut self, no_case: bool) -> Self {
        self.no_case = no_case;
        self
    }

    #[must_use]
    pub const fn with_udata(mut self, udata: &'a ()) -> Self {
        self.udata = Some(udata);
        self
    }

    #[must_use]
    pub const fn with_reference(mut self, reference: &'a RefCallback<'a>) -> Self {
        self.reference = Some(reference);
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub const fn no_case(&self) -> bool {
        self.no_case
    }

    #[must_use]
    pub const fn udata(&self) -> Option<&'a ()> {
        self.udata
    }

    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Calls the host callback directly, with no undefined-identifier
    /// check: a miss and a callback-returned `Undefined` both come back as
    /// plain `Value::Undefined`. Used where a miss is not itself an error —
    /// a root identifier immediately followed by a chain segment defers
    /// the error to whatever that segment does with an undefined value.
    pub fn lookup(&self, this: Value<'a>, ident: &'a str) -> Result<Value<'a>, Error<'a>> {
        match self.reference {
            Some(cb) => cb(this, Value::String(ident), self.udata),
            None => Ok(Value::Undefined),
        }
    }

    /// Resolves an identifier through the host callback, or produces the
    /// appropriate undefined-identifier error if there is no callback or
    /// the callback itself reports `Undefined`.
    pub fn resolve(
        &self,
        this: Value<'a>,
        ident: &'a str,
        chained: bool,
    ) -> Result<Value<'a>, Error<'a>> {
        let resolved = self.lookup(this, ident)?;
        if matches!(resolved, Value::Undefined) {
            Err(Error::undefined_identifier(ident, chained))
        } else {
            Ok(resolved)
        }
    }
}
