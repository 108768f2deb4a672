//! The [`Value`] type shared by jexpr's parser and evaluator, plus
//! JavaScript-compatible coercion, comparison, and stringification.

mod cmp;
mod coerce;
pub mod error;
pub mod json_scan;
mod stringify;

pub use cmp::{less_or_equal, less_than, loose_eq, strict_eq};
pub use coerce::{to_bool, to_f64, to_i64, to_u64};
pub use error::{Error, ErrorFlags};

use std::fmt;

/// An opaque handle to a host object. jexpr never inspects the payload: it
/// only ever receives one back from a `ref`/`func` callback and hands it to
/// the next one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef<'a> {
    tag: u64,
    data: &'a (),
}

impl<'a> ObjectRef<'a> {
    /// Builds a reference around a host-owned value. `tag` is opaque to
    /// jexpr and round-trips unchanged through `ref`/`func` callbacks; hosts
    /// typically use it to distinguish object kinds without downcasting.
    #[must_use]
    pub fn new<T>(tag: u64, data: &'a T) -> Self {
        Self {
            tag,
            // SAFETY: `&'a T` and `&'a ()` have the same representation for a
            // thin reference; the host is the only party that ever casts
            // this back, and it does so through `downcast`, which requires
            // the caller to supply the same `T` that was passed to `new`.
            data: unsafe { &*(std::ptr::from_ref(data).cast::<()>()) },
        }
    }

    #[must_use]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Reinterprets the stored reference as `&T`. The caller must know `T`
    /// is the same type that was passed to [`ObjectRef::new`].
    #[must_use]
    pub fn downcast<T>(&self) -> &'a T {
        // SAFETY: caller contract, documented above.
        unsafe { &*(std::ptr::from_ref(self.data).cast::<T>()) }
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef").field("tag", &self.tag).finish()
    }
}

/// A callable surfaced as a `Value::Function` by the host's `ref` callback.
/// `receiver` is the value immediately left of the call's own receiver
/// (for `a.b(...)`, that's `a`); `args` are the already-evaluated, already
/// left-to-right-ordered arguments; `udata` is the opaque pointer threaded
/// through from [`crate`]'s environment. A slice stands in for the spec's
/// "args array value" — callers access it the same way, by length/index.
pub type HostFunction<'a> =
    &'a dyn Fn(Value<'a>, &[Value<'a>], Option<&'a ()>) -> Result<Value<'a>, Error<'a>>;

/// The coarse type tag used by `typeof`-style host logic and by the
/// coercion/comparison tables in §4.2/§4.5 of the specification this crate
/// implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Bool,
    Float,
    Int,
    UInt,
    String,
    Array,
    Json,
    Object,
    Function,
}

/// A JavaScript-subset runtime value. Borrows its string and JSON payloads
/// from the [`jexpr_arena::Arena`] that produced them, and its object/
/// function payloads from the host.
///
/// `Float`, `Int`, and `UInt` are kept distinct (rather than collapsed into
/// one `f64` kind) because `i64("9223372036854775807") - i64("1")` must
/// stay exact — `f64` cannot represent that range losslessly.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Undefined,
    Null,
    Bool(bool),
    Float(f64),
    Int(i64),
    UInt(u64),
    String(&'a str),
    /// An array literal's evaluated elements, arena-allocated.
    Array(&'a [Value<'a>]),
    /// Raw, still-escaped JSON text. Member and index access scan this text
    /// lazily rather than materializing a tree; see [`json_scan`].
    Json(&'a str),
    Object(ObjectRef<'a>),
    Function(HostFunction<'a>),
}

/// Reserved [`ObjectRef`] tag backing [`Value::global_sentinel`]. No host
/// callback should ever construct an `ObjectRef` with this tag itself.
const GLOBAL_SENTINEL_TAG: u64 = u64::MAX;

static GLOBAL_SENTINEL_DATA: () = ();

impl<'a> Value<'a> {
    /// The sentinel passed as `this` for root-identifier lookups, e.g. the
    /// leading `a` in `a.b`. An `Object` wrapping a reserved tag, distinct
    /// from `Value::Undefined`, so a `ref` callback can tell "no receiver"
    /// apart from "receiver evaluated to undefined" via
    /// [`Value::is_global_sentinel`].
    #[must_use]
    pub fn global_sentinel() -> Self {
        Self::Object(ObjectRef::new(GLOBAL_SENTINEL_TAG, &GLOBAL_SENTINEL_DATA))
    }

    /// True for exactly the value returned by [`Value::global_sentinel`].
    #[must_use]
    pub fn is_global_sentinel(&self) -> bool {
        matches!(self, Self::Object(o) if o.tag() == GLOBAL_SENTINEL_TAG)
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::UInt(_) => ValueKind::UInt,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Json(_) => ValueKind::Json,
            Self::Object(_) => ValueKind::Object,
            Self::Function(_) => ValueKind::Function,
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Float(_) | Self::Int(_) | Self::UInt(_))
    }

    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        to_f64(self)
    }

    #[must_use]
    pub fn to_bool(&self) -> bool {
        to_bool(self)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Self::Json(s) => f.debug_tuple("Json").field(s).finish(),
            Self::Object(o) => f.debug_tuple("Object").field(o).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
