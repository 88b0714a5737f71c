//! Columnar containers.
//!
//! A [`Series`] pairs a value array with an [`Index`]. Before
//! serialization the adapter reduces either one to its plain value array;
//! a period index is first turned into a `datetime64[ns]` array of period
//! start instants.

use ndarray::Array1;

use crate::array::NdArray;
use crate::error::Result;
use crate::temporal::{Period, PeriodFreq, TimeUnit, NAT};

/// Index of [`Period`]s sharing a frequency.
///
/// An ordinal equal to [`NAT`] marks a missing period.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodIndex {
    /// Period ordinals.
    pub ordinals: Vec<i64>,
    /// Shared frequency.
    pub freq: PeriodFreq,
}

impl PeriodIndex {
    /// Creates a period index.
    pub fn new(ordinals: Vec<i64>, freq: PeriodFreq) -> Self {
        Self { ordinals, freq }
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    /// Returns true if the index holds no periods.
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// Converts to a `datetime64[ns]` array of period start instants.
    ///
    /// # Errors
    /// Returns `WireError::OutOfRange` if a period starts outside the
    /// nanosecond timestamp range.
    pub fn to_timestamp(&self) -> Result<NdArray> {
        let nanos = self
            .ordinals
            .iter()
            .map(|&ordinal| {
                if ordinal == NAT {
                    Ok(NAT)
                } else {
                    Ok(Period::new(ordinal, self.freq).to_timestamp()?.as_nanos())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(NdArray::datetime64(
            Array1::from(nanos).into_dyn(),
            TimeUnit::Nanosecond,
        ))
    }
}

/// Row labels of a [`Series`], or a standalone index.
#[derive(Clone, Debug, PartialEq)]
pub enum Index {
    /// Integer positions `start..end`.
    Range(std::ops::Range<i64>),
    /// Arbitrary labels.
    Values(NdArray),
    /// Period labels.
    Period(PeriodIndex),
}

impl Index {
    /// Number of labels.
    pub fn len(&self) -> usize {
        match self {
            Self::Range(range) => {
                usize::try_from(range.end.saturating_sub(range.start)).unwrap_or(0)
            }
            Self::Values(values) => values.len(),
            Self::Period(periods) => periods.len(),
        }
    }

    /// Returns true if the index has no labels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the labels as an array.
    ///
    /// Range indexes yield int64 positions and period indexes their
    /// start instants.
    pub fn values(&self) -> Result<NdArray> {
        match self {
            Self::Range(range) => Ok(NdArray::from_vec(range.clone().collect::<Vec<i64>>())),
            Self::Values(values) => Ok(values.clone()),
            Self::Period(periods) => periods.to_timestamp(),
        }
    }
}

/// Labelled one-dimensional column.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Column values.
    pub values: NdArray,
    /// Row labels.
    pub index: Index,
    /// Optional column name.
    pub name: Option<String>,
}

impl Series {
    /// Creates an unnamed series with a default range index.
    pub fn new(values: NdArray) -> Self {
        let rows = values.len() as i64;
        Self {
            values,
            index: Index::Range(0..rows),
            name: None,
        }
    }

    /// Sets the series name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the index.
    pub fn with_index(mut self, index: Index) -> Self {
        self.index = index;
        self
    }
}

/// A columnar object accepted by [`extract_values`].
#[derive(Clone, Debug, PartialEq)]
pub enum Columnar {
    /// A labelled column.
    Series(Series),
    /// A bare index.
    Index(Index),
}

impl From<Series> for Columnar {
    fn from(series: Series) -> Self {
        Self::Series(series)
    }
}

impl From<Index> for Columnar {
    fn from(index: Index) -> Self {
        Self::Index(index)
    }
}

/// Reduces a series or index to its underlying value array.
///
/// # Example
/// ```rust
/// use arraywire::{extract_values, Columnar, Index, PeriodFreq, PeriodIndex};
///
/// let index = Index::Period(PeriodIndex::new(vec![0, 1], PeriodFreq::Daily));
/// let values = extract_values(&Columnar::Index(index))?;
/// assert_eq!(values.dtype().to_string(), "datetime64[ns]");
/// # Ok::<(), arraywire::WireError>(())
/// ```
pub fn extract_values(columnar: &Columnar) -> Result<NdArray> {
    match columnar {
        Columnar::Series(series) => Ok(series.values.clone()),
        Columnar::Index(index) => index.values(),
    }
}
