//! Command line enums for the schedule printer.
//!
//! Every variant can be given by its full name or by any prefix that singles it out, plus a few
//! short aliases.

use clap::ValueEnum;
use clap::builder::PossibleValue;
use ftpad_schedule::ByteOrder;

/// Which sequence of vectors to print.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TableOptions {
    /// The 16 generated schedule steps.
    Schedule,
    /// The per-step matrices relating each step to its predecessor.
    Inverse,
    /// The permutations consumed by the round function.
    Round,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ByteOrderOptions {
    Big,
    Little,
    Native,
}

impl ByteOrderOptions {
    pub const fn resolve(self) -> ByteOrder {
        match self {
            Self::Big => ByteOrder::Big,
            Self::Little => ByteOrder::Little,
            Self::Native => ByteOrder::native(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatOptions {
    Plain,
    Latex,
    Json,
}

/// Produce a `PossibleValue` accepting every prefix of `base` of length at least
/// `min_unique_base_prefix`, and every prefix of each alias down to its own minimum length.
fn get_aliases(
    base: &'static str,
    min_unique_base_prefix: usize,
    alias: Option<Vec<(&'static str, usize)>>,
) -> PossibleValue {
    let base_prefixes = (min_unique_base_prefix..base.len()).map(|i| &base[..i]);
    match alias {
        None => PossibleValue::new(base).aliases(base_prefixes),
        Some(vec) => PossibleValue::new(base).aliases(base_prefixes.chain(
            vec.into_iter().flat_map(|(alias, min_unique)| {
                (min_unique..alias.len() + 1).map(|i| &alias[..i])
            }),
        )),
    }
}

impl ValueEnum for TableOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Schedule, Self::Inverse, Self::Round]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Schedule => get_aliases("schedule", 1, Some(vec![("steps", 2)])),
            Self::Inverse => get_aliases("inverse", 1, Some(vec![("matrices", 1)])),
            Self::Round => get_aliases("round", 1, None),
        })
    }
}

impl ValueEnum for ByteOrderOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Big, Self::Little, Self::Native]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Big => get_aliases("big", 1, Some(vec![("be", 2)])),
            Self::Little => get_aliases("little", 1, Some(vec![("le", 2)])),
            Self::Native => get_aliases("native", 1, None),
        })
    }
}

impl ValueEnum for FormatOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Plain, Self::Latex, Self::Json]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Plain => get_aliases("plain", 1, Some(vec![("txt", 1)])),
            Self::Latex => get_aliases("latex", 1, Some(vec![("tex", 2)])),
            Self::Json => get_aliases("json", 1, None),
        })
    }
}
