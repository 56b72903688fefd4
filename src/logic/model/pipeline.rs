//! Fitted Pipeline - Preprocessing + linear stage
//!
//! Built once from a [`PipelineArtifact`] and never mutated afterwards.
//! This is the only place that knows how the stages are laid out; callers
//! get `predict` and `explain` and nothing else.

use std::collections::HashSet;

use ndarray::Array1;

use super::artifact::{CategoricalColumnSpec, PipelineArtifact, UnknownPolicy, SUPPORTED_FORMAT_VERSION};
use crate::logic::error::ModelError;
use crate::logic::explain::{rank_coefficients, CoefficientReport};
use crate::logic::features::{FeatureRecord, FeatureRow, FeatureValue};

// ============================================================================
// STAGES
// ============================================================================

/// Numeric passthrough with optional standard scaling
#[derive(Debug, Clone)]
struct NumericTransformer {
    features: Vec<String>,
    scaler: Option<(Array1<f64>, Array1<f64>)>,
}

impl NumericTransformer {
    fn transform(&self, values: Array1<f64>) -> Array1<f64> {
        match &self.scaler {
            Some((mean, scale)) => (values - mean) / scale,
            None => values,
        }
    }
}

/// One-hot encoder over fitted vocabularies
#[derive(Debug, Clone)]
struct OneHotEncoder {
    columns: Vec<CategoricalColumnSpec>,
    handle_unknown: UnknownPolicy,
}

impl OneHotEncoder {
    /// Categories that get an output column
    fn kept<'a>(column: &'a CategoricalColumnSpec) -> impl Iterator<Item = &'a String> + 'a {
        column
            .categories
            .iter()
            .filter(move |c| Some(c.as_str()) != column.drop.as_deref())
    }

    fn n_features_out(&self) -> usize {
        self.columns.iter().map(|c| Self::kept(c).count()).sum()
    }

    /// `<field>_<value>` for every kept category, in vocabulary order
    fn feature_names_out(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|col| Self::kept(col).map(move |cat| format!("{}_{}", col.name, cat)))
            .collect()
    }

    fn encode_into(&self, column: &CategoricalColumnSpec, value: &str, out: &mut Vec<f64>) -> Result<(), ModelError> {
        let width = Self::kept(column).count();

        // Dropped category: all-zero block
        if column.drop.as_deref() == Some(value) {
            out.extend(std::iter::repeat(0.0).take(width));
            return Ok(());
        }

        let hit = Self::kept(column).position(|c| c == value);

        if hit.is_none() && self.handle_unknown == UnknownPolicy::Error {
            return Err(ModelError::SchemaMismatch(format!(
                "Found unknown category '{}' in column '{}' during transform",
                value, column.name
            )));
        }

        out.extend((0..width).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        Ok(())
    }
}

/// Linear model stage
#[derive(Debug, Clone)]
struct LinearStage {
    coefficients: Array1<f64>,
    intercept: f64,
}

// ============================================================================
// FITTED PIPELINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct FittedPipeline {
    model_type: String,
    alpha: Option<f64>,
    numeric: NumericTransformer,
    encoder: OneHotEncoder,
    linear: LinearStage,
}

impl FittedPipeline {
    /// Introspect and validate an artifact.
    ///
    /// Any shape that can't be reconciled (coefficient count, scaler length,
    /// duplicate names) is an [`ModelError::ArtifactLoad`].
    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, ModelError> {
        if artifact.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(ModelError::ArtifactLoad(format!(
                "Unsupported artifact format v{} (expected v{})",
                artifact.format_version, SUPPORTED_FORMAT_VERSION
            )));
        }

        let numeric_spec = artifact.preprocessor.numeric;
        let categorical_spec = artifact.preprocessor.categorical;

        if numeric_spec.features.is_empty() && categorical_spec.features.is_empty() {
            return Err(ModelError::ArtifactLoad("Preprocessor declares no input features".to_string()));
        }

        let mut seen = HashSet::new();
        let input_names = numeric_spec
            .features
            .iter()
            .chain(categorical_spec.features.iter().map(|c| &c.name));
        for name in input_names {
            if name.is_empty() {
                return Err(ModelError::ArtifactLoad("Empty feature name".to_string()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ModelError::ArtifactLoad(format!("Duplicate feature '{}'", name)));
            }
        }

        for column in &categorical_spec.features {
            if column.categories.is_empty() {
                return Err(ModelError::ArtifactLoad(format!(
                    "Categorical feature '{}' has an empty vocabulary",
                    column.name
                )));
            }
            let unique: HashSet<&str> = column.categories.iter().map(String::as_str).collect();
            if unique.len() != column.categories.len() {
                return Err(ModelError::ArtifactLoad(format!(
                    "Categorical feature '{}' has duplicate categories",
                    column.name
                )));
            }
            if let Some(dropped) = &column.drop {
                if !unique.contains(dropped.as_str()) {
                    return Err(ModelError::ArtifactLoad(format!(
                        "Categorical feature '{}' drops unknown category '{}'",
                        column.name, dropped
                    )));
                }
            }
        }

        let n_numeric = numeric_spec.features.len();
        let scaler = match numeric_spec.scaler {
            Some(scaler) => {
                if scaler.mean.len() != n_numeric || scaler.scale.len() != n_numeric {
                    return Err(ModelError::ArtifactLoad(format!(
                        "Scaler has {} means and {} scales for {} numeric features",
                        scaler.mean.len(),
                        scaler.scale.len(),
                        n_numeric
                    )));
                }
                if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
                    || scaler.mean.iter().any(|m| !m.is_finite())
                {
                    return Err(ModelError::ArtifactLoad("Scaler parameters must be finite and non-zero".to_string()));
                }
                Some((Array1::from(scaler.mean), Array1::from(scaler.scale)))
            }
            None => None,
        };

        let encoder = OneHotEncoder {
            columns: categorical_spec.features,
            handle_unknown: categorical_spec.handle_unknown,
        };

        let expected = n_numeric + encoder.n_features_out();
        let coefficients = artifact.model.coefficients;
        if coefficients.len() != expected {
            return Err(ModelError::ArtifactLoad(format!(
                "Model has {} coefficients but preprocessor produces {} features",
                coefficients.len(),
                expected
            )));
        }
        if coefficients.iter().any(|c| !c.is_finite()) || !artifact.model.intercept.is_finite() {
            return Err(ModelError::ArtifactLoad("Model weights must be finite".to_string()));
        }

        Ok(Self {
            model_type: artifact.model_type,
            alpha: artifact.model.alpha,
            numeric: NumericTransformer {
                features: numeric_spec.features,
                scaler,
            },
            encoder,
            linear: LinearStage {
                coefficients: Array1::from(coefficients),
                intercept: artifact.model.intercept,
            },
        })
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn intercept(&self) -> f64 {
        self.linear.intercept
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.linear.coefficients
    }

    /// Column names the pipeline expects, numeric then categorical
    pub fn input_features(&self) -> Vec<&str> {
        self.numeric
            .features
            .iter()
            .map(String::as_str)
            .chain(self.encoder.columns.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// Expanded names in the order the preprocessor concatenates columns
    pub fn expanded_feature_names(&self) -> Vec<String> {
        let mut names = self.numeric.features.clone();
        names.extend(self.encoder.feature_names_out());
        names
    }

    pub fn n_features_out(&self) -> usize {
        self.linear.coefficients.len()
    }

    // ------------------------------------------------------------------------
    // Prediction
    // ------------------------------------------------------------------------

    pub fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        self.predict_row(&record.to_row())
    }

    /// Predict on a single named row.
    ///
    /// Column names must match the fitted input features exactly; order in
    /// the row doesn't matter.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        self.check_columns(row)?;

        let numeric = self
            .numeric
            .features
            .iter()
            .map(|name| match row.get(name) {
                Some(FeatureValue::Numeric(v)) if v.is_finite() => Ok(*v),
                Some(FeatureValue::Numeric(v)) => Err(ModelError::SchemaMismatch(format!(
                    "Column '{}' holds non-finite value {}",
                    name, v
                ))),
                Some(FeatureValue::Categorical(_)) => Err(ModelError::SchemaMismatch(format!(
                    "Column '{}' expected numeric, got categorical",
                    name
                ))),
                None => Err(ModelError::SchemaMismatch(format!("Missing column '{}'", name))),
            })
            .collect::<Result<Vec<f64>, ModelError>>()?;

        let mut features = self.numeric.transform(Array1::from(numeric)).to_vec();
        features.reserve(self.encoder.n_features_out());

        for column in &self.encoder.columns {
            match row.get(&column.name) {
                Some(FeatureValue::Categorical(value)) => self.encoder.encode_into(column, value, &mut features)?,
                Some(FeatureValue::Numeric(_)) => {
                    return Err(ModelError::SchemaMismatch(format!(
                        "Column '{}' expected categorical, got numeric",
                        column.name
                    )))
                }
                None => return Err(ModelError::SchemaMismatch(format!("Missing column '{}'", column.name))),
            }
        }

        let x = Array1::from(features);
        Ok(x.dot(&self.linear.coefficients) + self.linear.intercept)
    }

    fn check_columns(&self, row: &FeatureRow) -> Result<(), ModelError> {
        let expected: HashSet<&str> = self.input_features().into_iter().collect();
        let mut present = HashSet::new();
        let mut problems = Vec::new();

        for name in row.names() {
            if !present.insert(name) {
                problems.push(format!("duplicate column '{}'", name));
            } else if !expected.contains(name) {
                problems.push(format!("unexpected column '{}'", name));
            }
        }
        for name in self.input_features() {
            if !present.contains(name) {
                problems.push(format!("missing column '{}'", name));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ModelError::SchemaMismatch(problems.join("; ")))
        }
    }

    // ------------------------------------------------------------------------
    // Explanation
    // ------------------------------------------------------------------------

    /// Nonzero coefficients ranked by |weight|, at most `top_n`
    pub fn explain(&self, top_n: usize) -> CoefficientReport {
        let names = self.expanded_feature_names();
        rank_coefficients(
            names.iter().map(String::as_str),
            self.linear.coefficients.iter().copied(),
            top_n,
        )
    }
}
