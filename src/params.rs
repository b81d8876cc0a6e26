//! Backend parameter tables.
//!
//! Each backend names its tunables with a [`ParamId`] enum. A [`ParamTable`] maps every id to
//! either a value or "unset", and is validated in the order the backend defines, since the legal
//! range of some parameters depends on the value of others.

use std::{fmt, marker::PhantomData, ops::RangeInclusive};

use crate::{
    error::{Error, Result},
    holder::BufferLengths,
    Level,
};

/// Identifier of a backend parameter.
pub trait ParamId: Copy + Eq + fmt::Debug + 'static {
    /// Every parameter, in the order they are validated and applied.
    const ALL: &'static [Self];

    /// Position of this parameter in [`ALL`](Self::ALL).
    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&id| id == self)
            .unwrap_or_else(|| unreachable!("{self:?} missing from ParamId::ALL"))
    }

    /// Option name used in error messages.
    fn name(self) -> &'static str;

    /// Legal values given the parameters applied before this one.
    fn range(self, table: &ParamTable<Self>) -> RangeInclusive<i64>;

    /// Whether `value` is legal. Defaults to a range check.
    fn accepts(self, value: i64, table: &ParamTable<Self>) -> bool {
        self.range(table).contains(&value)
    }
}

/// Placeholder for backends with nothing to configure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoParam {}

impl ParamId for NoParam {
    const ALL: &'static [Self] = &[];

    fn index(self) -> usize {
        match self {}
    }

    fn name(self) -> &'static str {
        match self {}
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {}
    }
}

/// Value for each parameter of a backend, `None` meaning the backend default applies.
#[derive(Clone, PartialEq, Eq)]
pub struct ParamTable<P: ParamId> {
    values: Box<[Option<i64>]>,
    _id: PhantomData<P>,
}

impl<P: ParamId> Default for ParamTable<P> {
    fn default() -> Self {
        Self {
            values: vec![None; P::ALL.len()].into_boxed_slice(),
            _id: PhantomData,
        }
    }
}

impl<P: ParamId> ParamTable<P> {
    /// A table with every parameter unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `id`. Validation happens in [`validate`](Self::validate).
    pub fn set(&mut self, id: P, value: i64) -> &mut Self {
        self.values[id.index()] = Some(value);
        self
    }

    /// Returns `id` to its backend default.
    pub fn unset(&mut self, id: P) -> &mut Self {
        self.values[id.index()] = None;
        self
    }

    /// The value set for `id`, if any.
    pub fn get(&self, id: P) -> Option<i64> {
        self.values[id.index()]
    }

    /// Set parameters in application order.
    pub fn iter(&self) -> impl Iterator<Item = (P, i64)> + '_ {
        P::ALL
            .iter()
            .filter_map(move |&id| self.get(id).map(|value| (id, value)))
    }

    /// Checks every set value against its documented range, in application order.
    pub fn validate(&self) -> Result<()> {
        let mut applied = Self::new();
        for (id, value) in self.iter() {
            if !id.accepts(value, &applied) {
                let range = id.range(&applied);
                return Err(Error::invalid_argument(
                    id.name(),
                    format!(
                        "{value} is outside {}..={}",
                        range.start(),
                        range.end()
                    ),
                ));
            }
            applied.set(id, value);
        }
        Ok(())
    }
}

impl<P: ParamId> fmt::Debug for ParamTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Parameters and buffer lengths of one codec, validated together when the codec is built.
#[derive(Clone, Debug)]
pub struct CodecOptions<P: ParamId> {
    pub(crate) params: ParamTable<P>,
    pub(crate) lengths: BufferLengths,
}

impl<P: ParamId> Default for CodecOptions<P> {
    fn default() -> Self {
        Self {
            params: ParamTable::new(),
            lengths: BufferLengths::default(),
        }
    }
}

impl<P: ParamId> CodecOptions<P> {
    pub(crate) fn validate(&self) -> Result<()> {
        self.lengths.validate()?;
        self.params.validate()
    }

    pub(crate) fn set_level(&mut self, id: P, level: Level, fastest: i64, best: i64) {
        match level {
            Level::Fastest => self.params.set(id, fastest),
            Level::Best => self.params.set(id, best),
            Level::Precise(value) => self.params.set(id, i64::from(value)),
            Level::Default => self.params.unset(id),
        };
    }
}
