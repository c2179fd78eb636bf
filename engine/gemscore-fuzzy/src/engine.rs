//! Mamdani inference engine
//!
//! One call runs the full pipeline on a fresh set of buffers:
//!
//! 1. fuzzify each of the five inputs over `{low, medium, high}`
//! 2. compute the firing strength of every rule (min for AND, max for OR)
//! 3. aggregate per output term with max (rules sharing a consequent are
//!    max-combined, never summed)
//! 4. clip each output triangle at its aggregated strength, take the union
//!    and defuzzify with the centroid over `[0, 100]`
//! 5. round to two decimals
//!
//! The engine owns its variables and rules and never mutates them after
//! construction, so a single instance can serve any number of sequential or
//! parallel calls.

use crate::error::{FuzzyError, Result};
use crate::membership::Triangular;
use crate::request::{InferenceRequest, InputVariable};
use crate::rules::{FuzzifiedInputs, RuleBase};
use crate::variable::{Degrees, InputTerm, Label, LinguisticVariable, OutputTerm, Universe};
use ndarray::Array1;
use serde::Serialize;
use tracing::{debug, trace};

/// Aggregated strength per output term
pub type Activation = Degrees<OutputTerm>;

/// Membership function of an input label
pub fn input_shape(term: InputTerm) -> Triangular {
    match term {
        InputTerm::Low => Triangular::new(0.0, 0.0, 50.0),
        InputTerm::Medium => Triangular::new(0.0, 50.0, 100.0),
        InputTerm::High => Triangular::new(50.0, 100.0, 100.0),
    }
}

/// Membership function of an employability label
pub fn output_shape(term: OutputTerm) -> Triangular {
    match term {
        OutputTerm::Poor => Triangular::new(0.0, 0.0, 40.0),
        OutputTerm::Average => Triangular::new(20.0, 50.0, 80.0),
        OutputTerm::Good => Triangular::new(60.0, 80.0, 100.0),
        OutputTerm::Excellent => Triangular::new(80.0, 100.0, 100.0),
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Area-weighted centroid of a piecewise-linear curve through `(xs, mu)`.
///
/// Each segment is integrated exactly as a rectangle, triangle or
/// trapezoid. Returns `None` when the curve encloses no area.
pub fn centroid(xs: &Array1<f64>, mu: &Array1<f64>) -> Option<f64> {
    let mut moment_sum = 0.0;
    let mut area_sum = 0.0;

    for i in 1..xs.len() {
        let (x1, x2) = (xs[i - 1], xs[i]);
        let (y1, y2) = (mu[i - 1], mu[i]);
        if (y1 == 0.0 && y2 == 0.0) || x1 == x2 {
            continue;
        }
        let width = x2 - x1;
        let (moment, area) = if y1 == y2 {
            (0.5 * (x1 + x2), width * y1)
        } else if y1 == 0.0 {
            (2.0 / 3.0 * width + x1, 0.5 * width * y2)
        } else if y2 == 0.0 {
            (1.0 / 3.0 * width + x1, 0.5 * width * y1)
        } else {
            (
                (2.0 / 3.0 * width * (y2 + 0.5 * y1)) / (y1 + y2) + x1,
                0.5 * width * (y1 + y2),
            )
        };
        moment_sum += moment * area;
        area_sum += area;
    }

    if area_sum <= 0.0 {
        None
    } else {
        Some(moment_sum / area_sum)
    }
}

/// Every intermediate stage of one inference
#[derive(Debug, Clone, Serialize)]
pub struct InferenceTrace {
    /// Crisp inputs as supplied
    pub request: InferenceRequest,
    /// Degrees per input variable
    #[serde(serialize_with = "serialize_fuzzified")]
    pub fuzzified: FuzzifiedInputs,
    /// Firing strength of each rule, in rule order
    pub firing_strengths: Vec<f64>,
    /// Max-aggregated strength per output term
    pub activation: Activation,
    /// Centroid before rounding
    pub raw_score: f64,
    /// Centroid rounded to two decimals
    pub score: f64,
}

fn serialize_fuzzified<S: serde::Serializer>(
    fuzzified: &FuzzifiedInputs,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(InputVariable::ALL.len()))?;
    for variable in InputVariable::ALL {
        map.serialize_entry(variable.as_str(), fuzzified.of(variable))?;
    }
    map.end()
}

/// Employability inference engine
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    /// Input variables in [`InputVariable::ALL`] order
    inputs: Vec<LinguisticVariable<InputTerm>>,
    output: LinguisticVariable<OutputTerm>,
    rules: RuleBase,
}

impl InferenceEngine {
    /// Build the employability model: five indicators, one output and the
    /// eight-rule base.
    pub fn new() -> Self {
        let inputs = InputVariable::ALL
            .into_iter()
            .map(|variable| {
                LinguisticVariable::new(variable.as_str(), Universe::PERCENT, input_shape)
            })
            .collect();
        let output = LinguisticVariable::new(
            crate::rules::OUTPUT_VARIABLE,
            Universe::PERCENT,
            output_shape,
        );

        Self {
            inputs,
            output,
            rules: RuleBase::employability(),
        }
    }

    pub fn input_variable(&self, variable: InputVariable) -> &LinguisticVariable<InputTerm> {
        &self.inputs[variable.index()]
    }

    pub fn output_variable(&self) -> &LinguisticVariable<OutputTerm> {
        &self.output
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Degrees of every input. Fails on the first non-finite value.
    pub fn fuzzify(&self, request: &InferenceRequest) -> Result<FuzzifiedInputs> {
        let mut degrees: [Degrees<InputTerm>; 5] = std::array::from_fn(|_| Degrees::zero());
        for (variable, value) in request.iter() {
            degrees[variable.index()] = self.input_variable(variable).fuzzify(value)?;
        }
        Ok(FuzzifiedInputs::new(degrees))
    }

    /// Firing strength of every rule
    pub fn fire(&self, fuzzified: &FuzzifiedInputs) -> Vec<f64> {
        self.rules.firing_strengths(fuzzified)
    }

    /// Max-aggregate rule strengths per consequent term
    pub fn aggregate(&self, firing_strengths: &[f64]) -> Activation {
        let mut activation = Activation::zero();
        for (rule, &strength) in self.rules.iter().zip(firing_strengths) {
            let current = activation.get(rule.consequent);
            activation.set(rule.consequent, current.max(strength));
        }
        activation
    }

    /// Aggregated output membership at `x`: union of the clipped terms
    pub fn output_membership(&self, activation: &Activation, x: f64) -> f64 {
        activation
            .iter()
            .map(|(term, level)| self.output.term(term).membership(x).min(level))
            .fold(0.0, f64::max)
    }

    /// Centroid of the clipped output terms.
    ///
    /// The integer-sampled universe is refined with the points where each
    /// term crosses its clip level, so the clipped corners are integrated
    /// exactly. Fails with [`FuzzyError::Inference`] when nothing is
    /// activated.
    pub fn defuzzify(&self, activation: &Activation) -> Result<f64> {
        if activation.is_empty() {
            return Err(FuzzyError::Inference(
                "no rule fired; the aggregated output is empty and has no centroid".to_string(),
            ));
        }

        let universe = self.output.universe();
        let mut points = universe.samples().to_vec();
        for (term, level) in activation.iter() {
            if let Some((left, right)) = self.output.term(term).cut_points(level) {
                points.push(left);
                points.push(right);
            }
        }
        points.retain(|&x| universe.contains(x));
        points.sort_by(f64::total_cmp);
        points.dedup();

        let xs = Array1::from_vec(points);
        let mu = xs.mapv(|x| self.output_membership(activation, x));

        centroid(&xs, &mu).ok_or_else(|| {
            FuzzyError::Inference("aggregated output encloses no area".to_string())
        })
    }

    /// Run the full pipeline and keep every intermediate stage
    pub fn explain(&self, request: &InferenceRequest) -> Result<InferenceTrace> {
        let fuzzified = self.fuzzify(request)?;
        for variable in InputVariable::ALL {
            trace!(
                "Fuzzified {} = {}: {:?}",
                variable,
                request.get(variable),
                fuzzified.of(variable)
            );
        }

        let firing_strengths = self.fire(&fuzzified);
        trace!("Rule firing strengths: {:?}", firing_strengths);

        let activation = self.aggregate(&firing_strengths);
        trace!("Output activation: {:?}", activation);

        let raw_score = self.defuzzify(&activation)?;

        Ok(InferenceTrace {
            request: *request,
            fuzzified,
            firing_strengths,
            activation,
            raw_score,
            score: round2(raw_score),
        })
    }

    /// Crisp employability score in `[0, 100]`, rounded to two decimals
    pub fn infer(&self, request: &InferenceRequest) -> Result<f64> {
        let trace = self.explain(request)?;
        debug!("Inferred employability {:.2} for {:?}", trace.score, request);
        Ok(trace.score)
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activation(levels: [f64; 4]) -> Activation {
        let mut activation = Activation::zero();
        for (term, level) in OutputTerm::ALL.iter().zip(levels) {
            activation.set(*term, level);
        }
        activation
    }

    #[test]
    fn test_centroid_of_single_triangle() {
        let xs = Array1::from_vec(vec![0.0, 1.0, 2.0]);
        let mu = Array1::from_vec(vec![0.0, 1.0, 0.0]);
        let c = centroid(&xs, &mu).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_of_empty_curve() {
        let xs = Array1::from_vec(vec![0.0, 1.0, 2.0]);
        let mu = Array1::zeros(3);
        assert_eq!(centroid(&xs, &mu), None);
    }

    #[test]
    fn test_fuzzify_uses_fixed_shapes() {
        let engine = InferenceEngine::new();
        let fuzzified = engine
            .fuzzify(&InferenceRequest::new(90.0, 10.0, 50.0, 75.0, 100.0))
            .unwrap();

        assert_eq!(fuzzified.degree(InputVariable::AcademicReputation, InputTerm::High), 0.8);
        assert_eq!(fuzzified.degree(InputVariable::EmployerReputation, InputTerm::Low), 0.8);
        assert_eq!(fuzzified.degree(InputVariable::FacultyStudentRatio, InputTerm::Medium), 1.0);
        assert_eq!(fuzzified.degree(InputVariable::CitationsPerPaper, InputTerm::High), 0.5);
        assert_eq!(fuzzified.degree(InputVariable::StaffPhd, InputTerm::High), 1.0);
    }

    #[test]
    fn test_aggregate_takes_maximum_per_term() {
        let engine = InferenceEngine::new();
        let strengths = [0.8, 0.1, 0.3, 0.0, 0.0, 0.2, 0.5, 0.4];
        let activation = engine.aggregate(&strengths);

        assert_eq!(activation.get(OutputTerm::Excellent), 0.8);
        assert_eq!(activation.get(OutputTerm::Good), 0.3);
        assert_eq!(activation.get(OutputTerm::Average), 0.4);
        assert_eq!(activation.get(OutputTerm::Poor), 0.0);
    }

    #[test]
    fn test_defuzzify_single_full_term() {
        let engine = InferenceEngine::new();

        let average = engine.defuzzify(&activation([0.0, 1.0, 0.0, 0.0])).unwrap();
        assert!((average - 50.0).abs() < 1e-9);

        let poor = engine.defuzzify(&activation([1.0, 0.0, 0.0, 0.0])).unwrap();
        assert!((poor - 40.0 / 3.0).abs() < 1e-9);

        let excellent = engine.defuzzify(&activation([0.0, 0.0, 0.0, 1.0])).unwrap();
        assert!((excellent - 280.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_defuzzify_clipped_term_is_exact() {
        let engine = InferenceEngine::new();
        // Symmetric trapezoid centred on 50 regardless of clip level
        let score = engine.defuzzify(&activation([0.0, 0.37, 0.0, 0.0])).unwrap();
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_defuzzify_empty_activation_is_an_error() {
        let engine = InferenceEngine::new();
        match engine.defuzzify(&Activation::zero()) {
            Err(FuzzyError::Inference(_)) => {}
            other => panic!("expected inference error, got {other:?}"),
        }
    }

    #[test]
    fn test_output_membership_is_union_of_clipped_terms() {
        let engine = InferenceEngine::new();
        let act = activation([0.0, 0.2, 0.8, 0.8]);

        assert_eq!(engine.output_membership(&act, 50.0), 0.2);
        assert_eq!(engine.output_membership(&act, 80.0), 0.8);
        assert_eq!(engine.output_membership(&act, 90.0), 0.5);
        assert_eq!(engine.output_membership(&act, 100.0), 0.8);
        assert_eq!(engine.output_membership(&act, 10.0), 0.0);
    }

    #[test]
    fn test_explain_matches_infer() {
        let engine = InferenceEngine::new();
        let request = InferenceRequest::new(80.0, 70.0, 30.0, 60.0, 90.0);

        let trace = engine.explain(&request).unwrap();
        assert_eq!(trace.score, engine.infer(&request).unwrap());
        assert_eq!(trace.firing_strengths.len(), 8);
        assert_eq!(trace.score, 60.74);
        assert_eq!(trace.activation.get(OutputTerm::Average), 0.6);
    }

    #[test]
    fn test_trace_serializes() {
        let engine = InferenceEngine::new();
        let trace = engine.explain(&InferenceRequest::default()).unwrap();
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["score"], 50.0);
        assert_eq!(json["fuzzified"]["staff_phd"]["medium"], 1.0);
        assert_eq!(json["activation"]["average"], 1.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(73.1392405063291), 73.14);
        assert_eq!(round2(13.333333333333334), 13.33);
        assert_eq!(round2(50.00000000000002), 50.0);
    }
}
