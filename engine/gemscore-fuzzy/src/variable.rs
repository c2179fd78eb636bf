//! Linguistic variables
//!
//! A linguistic variable is a named universe of discourse plus one triangular
//! fuzzy set per label. Labels are closed enums ([`InputTerm`] for the five
//! ranking indicators, [`OutputTerm`] for employability), which keeps the
//! label set of every variable fixed at compile time.

use crate::error::{FuzzyError, Result};
use crate::membership::Triangular;
use ndarray::Array1;
use serde::Serialize;
use std::fmt;

/// A label of a linguistic variable
pub trait Label: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// Every label, in canonical order
    const ALL: &'static [Self];

    /// Position of this label in [`Label::ALL`]
    fn index(self) -> usize;

    /// Lowercase name as used in rule text
    fn as_str(self) -> &'static str;
}

/// Labels shared by all five input variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputTerm {
    Low,
    Medium,
    High,
}

impl Label for InputTerm {
    const ALL: &'static [Self] = &[InputTerm::Low, InputTerm::Medium, InputTerm::High];

    fn index(self) -> usize {
        self as usize
    }

    fn as_str(self) -> &'static str {
        match self {
            InputTerm::Low => "low",
            InputTerm::Medium => "medium",
            InputTerm::High => "high",
        }
    }
}

impl fmt::Display for InputTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Labels of the employability output variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTerm {
    Poor,
    Average,
    Good,
    Excellent,
}

impl Label for OutputTerm {
    const ALL: &'static [Self] = &[
        OutputTerm::Poor,
        OutputTerm::Average,
        OutputTerm::Good,
        OutputTerm::Excellent,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn as_str(self) -> &'static str {
        match self {
            OutputTerm::Poor => "poor",
            OutputTerm::Average => "average",
            OutputTerm::Good => "good",
            OutputTerm::Excellent => "excellent",
        }
    }
}

impl fmt::Display for OutputTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Closed, evenly sampled universe of discourse
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Universe {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Sampling step
    pub step: f64,
}

impl Universe {
    /// Integer-sampled `[0, 100]`, the range of every QS indicator score
    pub const PERCENT: Universe = Universe {
        min: 0.0,
        max: 100.0,
        step: 1.0,
    };

    /// Number of sample points, both bounds included
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step).round() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// Sample points from `min` to `max`
    pub fn samples(&self) -> Array1<f64> {
        Array1::linspace(self.min, self.max, self.len())
    }

    /// Saturate a crisp value at the universe bounds
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }
}

/// Membership degree per label, in [`Label::ALL`] order
#[derive(Debug, Clone, PartialEq)]
pub struct Degrees<L: Label> {
    values: Vec<f64>,
    _label: std::marker::PhantomData<L>,
}

impl<L: Label> Degrees<L> {
    /// All labels at degree 0
    pub fn zero() -> Self {
        Self {
            values: vec![0.0; L::ALL.len()],
            _label: std::marker::PhantomData,
        }
    }

    pub fn get(&self, label: L) -> f64 {
        self.values[label.index()]
    }

    pub fn set(&mut self, label: L, degree: f64) {
        self.values[label.index()] = degree;
    }

    /// Iterate `(label, degree)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (L, f64)> + '_ {
        L::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// True when every label is at degree 0
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|&d| d <= 0.0)
    }
}

impl<L: Label> Serialize for Degrees<L> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (label, degree) in self.iter() {
            map.serialize_entry(label.as_str(), &degree)?;
        }
        map.end()
    }
}

/// Named variable with one triangular fuzzy set per label
#[derive(Debug, Clone)]
pub struct LinguisticVariable<L: Label> {
    name: &'static str,
    universe: Universe,
    terms: Vec<(L, Triangular)>,
}

impl<L: Label> LinguisticVariable<L> {
    /// Build a variable by asking `shape` for the membership function of
    /// every label. Each label therefore appears exactly once.
    pub fn new(name: &'static str, universe: Universe, shape: impl Fn(L) -> Triangular) -> Self {
        let terms = L::ALL.iter().map(|&label| (label, shape(label))).collect();
        Self {
            name,
            universe,
            terms,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Membership function of `label`
    pub fn term(&self, label: L) -> Triangular {
        self.terms[label.index()].1
    }

    pub fn terms(&self) -> impl Iterator<Item = (L, Triangular)> + '_ {
        self.terms.iter().copied()
    }

    /// Degree of every label at `value`.
    ///
    /// The value is saturated at the universe bounds first, so `-5` reads as
    /// fully `low` and `120` as fully `high`. Degrees are not normalized.
    pub fn fuzzify(&self, value: f64) -> Result<Degrees<L>> {
        if !value.is_finite() {
            return Err(FuzzyError::InvalidInput {
                variable: self.name.to_string(),
                value,
            });
        }
        let x = self.universe.clamp(value);
        let mut degrees = Degrees::zero();
        for (label, mf) in &self.terms {
            degrees.set(*label, mf.membership(x));
        }
        Ok(degrees)
    }
}
