//! Fuzzy rule base
//!
//! Rule antecedents are small expression trees over `(variable, term)`
//! propositions. `And` uses the minimum t-norm and `Or` the maximum t-conorm.
//! A rule's firing strength is its contribution to the consequent term; rules
//! never disable each other.
//!
//! ## Example
//!
//! ```rust
//! use gemscore_fuzzy::rules::{Antecedent, FuzzyRule};
//! use gemscore_fuzzy::{InputTerm, InputVariable, OutputTerm};
//!
//! let rule = FuzzyRule::new(
//!     Antecedent::is(InputVariable::AcademicReputation, InputTerm::High)
//!         .and(Antecedent::is(InputVariable::EmployerReputation, InputTerm::High)),
//!     OutputTerm::Excellent,
//! );
//! assert_eq!(
//!     rule.to_string(),
//!     "IF academic_reputation IS high AND employer_reputation IS high THEN employability IS excellent"
//! );
//! ```

use crate::request::InputVariable;
use crate::variable::{Degrees, InputTerm, OutputTerm};
use std::fmt;

/// Name of the output variable in rule text
pub const OUTPUT_VARIABLE: &str = "employability";

/// Fuzzified degrees of all five inputs
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzifiedInputs {
    degrees: Vec<Degrees<InputTerm>>,
}

impl FuzzifiedInputs {
    /// Assemble from per-variable degrees in [`InputVariable::ALL`] order
    pub fn new(degrees: [Degrees<InputTerm>; 5]) -> Self {
        Self {
            degrees: degrees.into(),
        }
    }

    /// Degree to which `variable` is `term`
    pub fn degree(&self, variable: InputVariable, term: InputTerm) -> f64 {
        self.degrees[variable.index()].get(term)
    }

    pub fn of(&self, variable: InputVariable) -> &Degrees<InputTerm> {
        &self.degrees[variable.index()]
    }
}

/// Antecedent expression
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    /// `variable IS term`
    Is(InputVariable, InputTerm),
    /// Conjunction (minimum)
    And(Vec<Antecedent>),
    /// Disjunction (maximum)
    Or(Vec<Antecedent>),
}

impl Antecedent {
    pub fn is(variable: InputVariable, term: InputTerm) -> Self {
        Antecedent::Is(variable, term)
    }

    /// Conjoin with `other`, flattening nested conjunctions
    pub fn and(self, other: Antecedent) -> Self {
        match self {
            Antecedent::And(mut operands) => {
                operands.push(other);
                Antecedent::And(operands)
            }
            first => Antecedent::And(vec![first, other]),
        }
    }

    /// Disjoin with `other`, flattening nested disjunctions
    pub fn or(self, other: Antecedent) -> Self {
        match self {
            Antecedent::Or(mut operands) => {
                operands.push(other);
                Antecedent::Or(operands)
            }
            first => Antecedent::Or(vec![first, other]),
        }
    }

    /// Truth degree of the expression.
    ///
    /// An empty `And` is fully true and an empty `Or` fully false, the
    /// identities of min and max over `[0, 1]`.
    pub fn evaluate(&self, inputs: &FuzzifiedInputs) -> f64 {
        match self {
            Antecedent::Is(variable, term) => inputs.degree(*variable, *term),
            Antecedent::And(operands) => operands
                .iter()
                .map(|op| op.evaluate(inputs))
                .fold(1.0, f64::min),
            Antecedent::Or(operands) => operands
                .iter()
                .map(|op| op.evaluate(inputs))
                .fold(0.0, f64::max),
        }
    }

    /// Every `(variable, term)` proposition in the expression
    pub fn propositions(&self) -> Vec<(InputVariable, InputTerm)> {
        match self {
            Antecedent::Is(variable, term) => vec![(*variable, *term)],
            Antecedent::And(operands) | Antecedent::Or(operands) => {
                operands.iter().flat_map(Antecedent::propositions).collect()
            }
        }
    }

    fn fmt_operands(f: &mut fmt::Formatter<'_>, operands: &[Antecedent], op: &str) -> fmt::Result {
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {op} ")?;
            }
            match operand {
                Antecedent::Is(..) => write!(f, "{operand}")?,
                _ => write!(f, "({operand})")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Antecedent::Is(variable, term) => write!(f, "{variable} IS {term}"),
            Antecedent::And(operands) => Self::fmt_operands(f, operands, "AND"),
            Antecedent::Or(operands) => Self::fmt_operands(f, operands, "OR"),
        }
    }
}

/// IF-THEN rule with a single consequent term
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyRule {
    pub antecedent: Antecedent,
    pub consequent: OutputTerm,
}

impl FuzzyRule {
    pub fn new(antecedent: Antecedent, consequent: OutputTerm) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// Firing strength for the given inputs
    pub fn firing_strength(&self, inputs: &FuzzifiedInputs) -> f64 {
        self.antecedent.evaluate(inputs)
    }
}

impl fmt::Display for FuzzyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IF {} THEN {OUTPUT_VARIABLE} IS {}",
            self.antecedent, self.consequent
        )
    }
}

/// Ordered, immutable collection of rules
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    rules: Vec<FuzzyRule>,
}

impl RuleBase {
    pub fn new(rules: Vec<FuzzyRule>) -> Self {
        Self { rules }
    }

    /// The eight employability rules
    pub fn employability() -> Self {
        use InputTerm::{High, Low, Medium};
        use InputVariable::*;
        use OutputTerm::{Average, Excellent, Good, Poor};

        let is = Antecedent::is;

        Self::new(vec![
            FuzzyRule::new(
                is(AcademicReputation, High).and(is(EmployerReputation, High)),
                Excellent,
            ),
            FuzzyRule::new(is(EmployerReputation, High).and(is(StaffPhd, High)), Good),
            FuzzyRule::new(
                is(CitationsPerPaper, High).and(is(AcademicReputation, High)),
                Good,
            ),
            FuzzyRule::new(is(FacultyStudentRatio, High).and(is(StaffPhd, High)), Good),
            FuzzyRule::new(
                is(AcademicReputation, Low).and(is(EmployerReputation, Low)),
                Poor,
            ),
            FuzzyRule::new(
                is(EmployerReputation, Medium).and(is(CitationsPerPaper, Medium)),
                Average,
            ),
            FuzzyRule::new(
                is(AcademicReputation, High)
                    .and(is(CitationsPerPaper, High))
                    .and(is(StaffPhd, High)),
                Excellent,
            ),
            FuzzyRule::new(is(FacultyStudentRatio, Low).or(is(StaffPhd, Low)), Average),
        ])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FuzzyRule> {
        self.rules.iter()
    }

    /// Firing strength of every rule, in rule order
    pub fn firing_strengths(&self, inputs: &FuzzifiedInputs) -> Vec<f64> {
        self.rules
            .iter()
            .map(|rule| rule.firing_strength(inputs))
            .collect()
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::employability()
    }
}

impl<'a> IntoIterator for &'a RuleBase {
    type Item = &'a FuzzyRule;
    type IntoIter = std::slice::Iter<'a, FuzzyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
